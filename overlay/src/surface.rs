//! Software surface host
//!
//! `SoftwareSurface` implements the statusbar's surface collaborator without a
//! windowing system: each namespace gets one RGBA pixmap, placed inside a
//! parent window of known size. Showing the same namespace again replaces
//! the content of the existing surface and keeps its handle.

use statusbar_core::{
    PlacementContext, Position, ShowRequest, SurfaceError, SurfaceHandle, SurfaceHost,
};
use tiny_skia::{Color, Pixmap};

use crate::renderer::Renderer;

/// Size of the host window surfaces are placed in
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParentWindow {
    pub width: u32,
    pub height: u32,
}

/// Resolved on-screen rectangle, in parent-window pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SurfaceRect {
    pub x: i32,
    pub y: i32,
    pub width: u32,
    pub height: u32,
}

/// A rendered floating surface
pub struct SurfaceFrame {
    pub handle: SurfaceHandle,
    pub namespace: String,
    pub text: String,
    pub read_only: bool,
    /// Position returned by the placement strategy
    pub placement: Position,
    pub rect: SurfaceRect,
    pub pixmap: Pixmap,
}

/// Resolve a placement against the parent window.
///
/// A negative `y` anchors the surface's bottom edge: `-1` is flush with the
/// parent's bottom edge, `-N` leaves `N - 1` pixels below it. `x` is taken
/// as-is, so an overflowing surface extends past the left edge.
pub fn resolve_rect(
    placement: Position,
    width: u32,
    height: u32,
    parent: ParentWindow,
) -> SurfaceRect {
    let y = if placement.y < 0 {
        parent.height as i32 - height as i32 + placement.y + 1
    } else {
        placement.y
    };

    SurfaceRect {
        x: placement.x,
        y,
        width,
        height,
    }
}

/// CPU-rendered surface host
pub struct SoftwareSurface {
    renderer: Renderer,
    parent: ParentWindow,
    font_size: f32,
    background: Color,
    foreground: Color,
    frames: Vec<SurfaceFrame>,
    next_handle: u64,
}

impl SoftwareSurface {
    pub fn new(parent: ParentWindow, font_size: f32) -> Self {
        Self {
            renderer: Renderer::new(),
            parent,
            font_size,
            background: Color::from_rgba8(30, 30, 30, 180),
            foreground: Color::from_rgba8(255, 255, 255, 255),
            frames: Vec::new(),
            next_handle: 1,
        }
    }

    pub fn parent(&self) -> ParentWindow {
        self.parent
    }

    /// Resize the parent window; takes effect on the next show
    pub fn set_parent(&mut self, parent: ParentWindow) {
        self.parent = parent;
    }

    pub fn set_colors(&mut self, background: Color, foreground: Color) {
        self.background = background;
        self.foreground = foreground;
    }

    /// Width of one monospace cell at the configured font size
    pub fn cell_width(&mut self) -> u32 {
        self.renderer.cell_width(self.font_size)
    }

    pub fn frame(&self, namespace: &str) -> Option<&SurfaceFrame> {
        self.frames.iter().find(|f| f.namespace == namespace)
    }

    pub fn frame_count(&self) -> usize {
        self.frames.len()
    }

    fn render(
        &mut self,
        request: &ShowRequest,
    ) -> Result<(Position, SurfaceRect, Pixmap), SurfaceError> {
        let cell_width = self.renderer.cell_width(self.font_size);
        let buffer_length = request.text.chars().count();

        let placement = request.placement.place(&PlacementContext {
            font_width: cell_width,
            buffer_length,
            parent_width: self.parent.width,
            x_offset: request.x_offset,
        });

        let width = (buffer_length as u32 * cell_width + request.left_fringe + request.right_fringe)
            .max(1);
        let height = Renderer::line_height(self.font_size);
        let rect = resolve_rect(placement, width, height, self.parent);

        let mut pixmap = Pixmap::new(width, height).ok_or_else(|| SurfaceError::Render {
            namespace: request.namespace.clone(),
            reason: format!("invalid surface size {width}x{height}"),
        })?;
        pixmap.fill(self.background);
        self.renderer.draw_text(
            &mut pixmap,
            &request.text,
            request.left_fringe as f32,
            self.font_size,
            self.font_size,
            self.foreground,
        );

        Ok((placement, rect, pixmap))
    }
}

impl SurfaceHost for SoftwareSurface {
    fn show(&mut self, request: ShowRequest) -> Result<SurfaceHandle, SurfaceError> {
        let (placement, rect, pixmap) = self.render(&request)?;

        tracing::trace!(
            namespace = %request.namespace,
            x = rect.x,
            y = rect.y,
            width = rect.width,
            height = rect.height,
            "Surface placed"
        );

        if let Some(frame) = self
            .frames
            .iter_mut()
            .find(|f| f.namespace == request.namespace)
        {
            frame.text = request.text;
            frame.read_only = request.read_only;
            frame.placement = placement;
            frame.rect = rect;
            frame.pixmap = pixmap;
            return Ok(frame.handle);
        }

        let handle = SurfaceHandle(self.next_handle);
        self.next_handle += 1;
        self.frames.push(SurfaceFrame {
            handle,
            namespace: request.namespace,
            text: request.text,
            read_only: request.read_only,
            placement,
            rect,
            pixmap,
        });
        Ok(handle)
    }

    fn destroy(&mut self, handle: SurfaceHandle) -> Result<(), SurfaceError> {
        let idx = self
            .frames
            .iter()
            .position(|f| f.handle == handle)
            .ok_or(SurfaceError::UnknownSurface(handle.0))?;
        let frame = self.frames.remove(idx);
        tracing::debug!(namespace = %frame.namespace, "Surface destroyed");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use statusbar_core::PlacementStrategy;

    const PARENT: ParentWindow = ParentWindow {
        width: 1920,
        height: 1080,
    };

    fn request(text: &str, reserved: i32) -> ShowRequest {
        ShowRequest {
            namespace: "statusbar".into(),
            text: text.into(),
            read_only: true,
            x_offset: 10,
            left_fringe: 0,
            right_fringe: 0,
            placement: PlacementStrategy::bottom_right(reserved),
        }
    }

    #[test]
    fn test_resolve_bottom_anchor() {
        let rect = resolve_rect(Position { x: 100, y: -1 }, 50, 20, PARENT);
        assert_eq!(rect.y, 1080 - 20);
        assert_eq!(rect.x, 100);

        let rect = resolve_rect(Position { x: -30, y: 5 }, 50, 20, PARENT);
        assert_eq!((rect.x, rect.y), (-30, 5));
    }

    #[test]
    fn test_show_places_bottom_right() {
        let mut surface = SoftwareSurface::new(PARENT, 14.0);
        let cell = surface.cell_width() as i32;

        surface.show(request("WFH 12:00", 0)).unwrap();
        let frame = surface.frame("statusbar").unwrap();

        assert_eq!(frame.placement.x, 1920 - 9 * cell - 10);
        assert_eq!(frame.placement.y, -1);
        assert_eq!(frame.rect.width, 9 * cell as u32);
        assert_eq!(frame.rect.y + frame.rect.height as i32, 1080);
        assert!(frame.read_only);
    }

    #[test]
    fn test_show_reuses_namespace() {
        let mut surface = SoftwareSurface::new(PARENT, 14.0);
        let first = surface.show(request("12:00", 0)).unwrap();
        let second = surface.show(request("12:01 80%", 24)).unwrap();

        assert_eq!(first, second);
        assert_eq!(surface.frame_count(), 1);
        assert_eq!(surface.frame("statusbar").unwrap().text, "12:01 80%");
    }

    #[test]
    fn test_empty_text_still_renders() {
        let mut surface = SoftwareSurface::new(PARENT, 14.0);
        surface.show(request("", 0)).unwrap();
        let frame = surface.frame("statusbar").unwrap();
        assert_eq!(frame.placement.x, 1910);
        assert_eq!(frame.rect.width, 1);
    }

    #[test]
    fn test_destroy() {
        let mut surface = SoftwareSurface::new(PARENT, 14.0);
        let handle = surface.show(request("12:00", 0)).unwrap();
        surface.destroy(handle).unwrap();
        assert_eq!(surface.frame_count(), 0);
        assert_eq!(
            surface.destroy(handle),
            Err(SurfaceError::UnknownSurface(handle.0))
        );
    }
}
