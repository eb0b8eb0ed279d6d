//! Overlay placement
//!
//! Geometry for anchoring the overlay to the bottom-right corner of the host
//! window. The math is a pure function of [`PlacementInput`]; the host only
//! supplies the measured values through [`PlacementContext`] when it asks the
//! [`PlacementStrategy`] carried by a show request.

use crate::host::ReservedRegion;

/// Y coordinate that anchors the overlay one pixel above the window's bottom edge.
/// Negative coordinates are measured from the bottom of the parent window.
pub const BOTTOM_EDGE_Y: i32 = -1;

/// Top-left coordinate of a surface in parent-window pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

/// Everything the placement math depends on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PlacementInput {
    /// Width of one monospace cell in pixels
    pub font_width: u32,
    /// Number of characters in the rendered buffer
    pub buffer_length: usize,
    pub parent_width: u32,
    pub x_offset: i32,
    /// Width of reserved regions at the right edge (0 if none)
    pub reserved_width: i32,
}

impl PlacementInput {
    /// Pixel width of the rendered buffer, one font cell per character
    pub fn buffer_pixel_width(&self) -> i32 {
        let length = i32::try_from(self.buffer_length).unwrap_or(i32::MAX);
        length.saturating_mul(self.font_width as i32)
    }
}

/// Compute where the overlay's top-left corner goes.
///
/// The right edge lands on `parent_width - x_offset - reserved_width`. The
/// result is not clamped: an overlay wider than the free space gets a
/// negative `x` and the host decides what is visible.
pub fn compute_position(input: &PlacementInput) -> Position {
    let x = (input.parent_width as i32)
        .saturating_sub(input.buffer_pixel_width())
        .saturating_sub(input.x_offset)
        .saturating_sub(input.reserved_width);

    Position {
        x,
        y: BOTTOM_EDGE_Y,
    }
}

/// Combined width of all reserved regions
pub fn reserved_width(regions: &[ReservedRegion]) -> i32 {
    regions
        .iter()
        .map(ReservedRegion::width)
        .fold(0, i32::saturating_add)
}

// ─────────────────────────────────────────────────────────────────────────────
// Host-facing strategy
// ─────────────────────────────────────────────────────────────────────────────

/// Measured values the host provides when it places a surface
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlacementContext {
    pub font_width: u32,
    pub buffer_length: usize,
    pub parent_width: u32,
    pub x_offset: i32,
}

/// Placement strategy attached to a show request.
///
/// Built fresh on every refresh so the reserved width reflects the state of
/// the reserved regions at that moment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlacementStrategy {
    reserved_width: i32,
}

impl PlacementStrategy {
    /// Bottom-right anchoring, keeping clear of `reserved_width` pixels
    pub fn bottom_right(reserved_width: i32) -> Self {
        Self { reserved_width }
    }

    pub fn reserved_width(&self) -> i32 {
        self.reserved_width
    }

    pub fn place(&self, ctx: &PlacementContext) -> Position {
        compute_position(&PlacementInput {
            font_width: ctx.font_width,
            buffer_length: ctx.buffer_length,
            parent_width: ctx.parent_width,
            x_offset: ctx.x_offset,
            reserved_width: self.reserved_width,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input(buffer_length: usize, x_offset: i32, reserved_width: i32) -> PlacementInput {
        PlacementInput {
            font_width: 10,
            buffer_length,
            parent_width: 1920,
            x_offset,
            reserved_width,
        }
    }

    #[test]
    fn test_bottom_right_anchor() {
        // "WFH 12:00" is nine cells wide
        let pos = compute_position(&input(9, 10, 0));
        assert_eq!(pos, Position { x: 1820, y: -1 });
    }

    #[test]
    fn test_reserved_region_pushes_left() {
        let pos = compute_position(&input(9, 10, 60));
        assert_eq!(pos.x, 1760);
    }

    #[test]
    fn test_overflow_goes_negative() {
        let pos = compute_position(&input(200, 10, 0));
        assert_eq!(pos.x, 1920 - 2000 - 10);
        assert!(pos.x < 0);
    }

    #[test]
    fn test_x_decreases_monotonically() {
        let base = compute_position(&input(9, 10, 0)).x;
        assert!(compute_position(&input(10, 10, 0)).x < base);
        assert!(compute_position(&input(9, 11, 0)).x < base);
        assert!(compute_position(&input(9, 10, 1)).x < base);
    }

    #[test]
    fn test_same_input_same_output() {
        let i = input(12, 10, 24);
        assert_eq!(compute_position(&i), compute_position(&i));
    }

    #[test]
    fn test_reserved_width_sums_regions() {
        let regions = [
            ReservedRegion {
                icon_count: 3,
                icon_min_size: 16,
                icon_gap: 4,
            },
            ReservedRegion {
                icon_count: 1,
                icon_min_size: 20,
                icon_gap: 2,
            },
        ];
        assert_eq!(reserved_width(&regions), 3 * 20 + 22);
        assert_eq!(reserved_width(&[]), 0);
    }

    #[test]
    fn test_huge_region_saturates() {
        let region = ReservedRegion {
            icon_count: u32::MAX,
            icon_min_size: u32::MAX,
            icon_gap: 8,
        };
        assert_eq!(region.width(), i32::MAX);
        assert_eq!(reserved_width(&[region, region]), i32::MAX);
    }

    #[test]
    fn test_strategy_uses_its_reserved_width() {
        let strategy = PlacementStrategy::bottom_right(40);
        let pos = strategy.place(&PlacementContext {
            font_width: 10,
            buffer_length: 9,
            parent_width: 1920,
            x_offset: 10,
        });
        assert_eq!(pos, Position { x: 1780, y: BOTTOM_EDGE_Y });
    }
}
