//! Software text renderer using tiny-skia and cosmic-text
//!
//! The statusbar draws a single line of monospace text, so the renderer only
//! needs to measure the monospace cell and rasterize glyphs into a pixmap.
//! All rendering is done on the CPU.

use std::collections::HashMap;

use cosmic_text::{
    Attrs, Buffer, Color as CosmicColor, Family, FontSystem, LayoutGlyph, Metrics, Shaping,
    SwashCache,
};
use tiny_skia::{Color, Pixmap};

/// Sample used to measure the monospace cell width
const CELL_SAMPLE: &str = "0000000000";

/// Cell width relative to font size when no monospace font can be shaped
const FALLBACK_CELL_RATIO: f32 = 0.6;

/// Line height relative to font size
const LINE_HEIGHT_RATIO: f32 = 1.2;

/// A software renderer for overlay text
pub struct Renderer {
    font_system: FontSystem,
    swash_cache: SwashCache,
    /// Cell widths keyed by font size in tenths of a pixel
    cell_widths: HashMap<u32, u32>,
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new()
    }
}

impl Renderer {
    /// Create a new renderer, loading system fonts
    pub fn new() -> Self {
        Self {
            font_system: FontSystem::new(),
            swash_cache: SwashCache::new(),
            cell_widths: HashMap::new(),
        }
    }

    fn shape(&mut self, text: &str, font_size: f32) -> (Vec<LayoutGlyph>, f32, f32) {
        let metrics = Metrics::new(font_size, font_size * LINE_HEIGHT_RATIO);
        let mut text_buffer = Buffer::new(&mut self.font_system, metrics);

        let attrs = Attrs::new().family(Family::Monospace);
        text_buffer.set_text(&mut self.font_system, text, &attrs, Shaping::Advanced, None);
        text_buffer.shape_until_scroll(&mut self.font_system, false);

        let mut glyphs = Vec::new();
        let mut width = 0.0f32;
        let mut height = 0.0f32;

        for run in text_buffer.layout_runs() {
            width = width.max(run.line_w);
            height += run.line_height;
            glyphs.extend(run.glyphs.iter().cloned());
        }

        (glyphs, width, height)
    }

    /// Measure text dimensions as (width, height)
    pub fn measure_text(&mut self, text: &str, font_size: f32) -> (f32, f32) {
        let (_, width, height) = self.shape(text, font_size);
        (width, height)
    }

    /// Width in whole pixels of one monospace cell at `font_size`
    pub fn cell_width(&mut self, font_size: f32) -> u32 {
        let key = (font_size * 10.0).round() as u32;
        if let Some(width) = self.cell_widths.get(&key) {
            return *width;
        }

        let (measured, _) = self.measure_text(CELL_SAMPLE, font_size);
        let per_cell = measured / CELL_SAMPLE.len() as f32;
        let width = if per_cell > 0.0 {
            per_cell.ceil() as u32
        } else {
            tracing::debug!(font_size, "No monospace font available, estimating cell width");
            (font_size * FALLBACK_CELL_RATIO).ceil() as u32
        };

        let width = width.max(1);
        self.cell_widths.insert(key, width);
        width
    }

    /// Height in whole pixels of one text line at `font_size`
    pub fn line_height(font_size: f32) -> u32 {
        ((font_size * LINE_HEIGHT_RATIO).ceil() as u32).max(1)
    }

    /// Draw `text` with its baseline at `(x, y)`
    pub fn draw_text(
        &mut self,
        pixmap: &mut Pixmap,
        text: &str,
        x: f32,
        y: f32,
        font_size: f32,
        color: Color,
    ) {
        let (glyphs, _, _) = self.shape(text, font_size);
        let text_color = CosmicColor::rgba(
            (color.red() * 255.0) as u8,
            (color.green() * 255.0) as u8,
            (color.blue() * 255.0) as u8,
            (color.alpha() * 255.0) as u8,
        );

        for glyph in &glyphs {
            let physical_glyph = glyph.physical((x, y), 1.0);

            if let Some(image) = self
                .swash_cache
                .get_image(&mut self.font_system, physical_glyph.cache_key)
            {
                let glyph_x = physical_glyph.x + image.placement.left;
                let glyph_y = physical_glyph.y - image.placement.top;

                draw_glyph_to_pixmap(
                    pixmap,
                    &image.data,
                    image.placement.width,
                    image.placement.height,
                    glyph_x,
                    glyph_y,
                    text_color,
                );
            }
        }
    }
}

/// Alpha-blend a coverage mask onto the pixmap
fn draw_glyph_to_pixmap(
    pixmap: &mut Pixmap,
    glyph_data: &[u8],
    glyph_width: u32,
    glyph_height: u32,
    dest_x: i32,
    dest_y: i32,
    color: CosmicColor,
) {
    let pixmap_width = pixmap.width() as i32;
    let pixmap_height = pixmap.height() as i32;
    let data = pixmap.data_mut();

    for gy in 0..glyph_height as i32 {
        let py = dest_y + gy;
        if py < 0 || py >= pixmap_height {
            continue;
        }

        for gx in 0..glyph_width as i32 {
            let px = dest_x + gx;
            if px < 0 || px >= pixmap_width {
                continue;
            }

            let Some(&alpha) = glyph_data.get((gy as u32 * glyph_width + gx as u32) as usize)
            else {
                continue;
            };
            if alpha == 0 {
                continue;
            }

            let idx = ((py * pixmap_width + px) * 4) as usize;
            let src_a = (alpha as u32 * color.a() as u32) / 255;
            let inv_a = 255 - src_a;

            data[idx] = ((color.r() as u32 * src_a + data[idx] as u32 * inv_a) / 255) as u8;
            data[idx + 1] =
                ((color.g() as u32 * src_a + data[idx + 1] as u32 * inv_a) / 255) as u8;
            data[idx + 2] =
                ((color.b() as u32 * src_a + data[idx + 2] as u32 * inv_a) / 255) as u8;
            data[idx + 3] = (src_a + (data[idx + 3] as u32 * inv_a) / 255) as u8;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_height() {
        assert_eq!(Renderer::line_height(10.0), 12);
        assert_eq!(Renderer::line_height(0.0), 1);
    }

    #[test]
    fn test_cell_width_is_positive_and_cached() {
        let mut renderer = Renderer::new();
        let width = renderer.cell_width(14.0);
        assert!(width >= 1);
        assert_eq!(renderer.cell_width(14.0), width);
    }

    #[test]
    fn test_glyph_blend_clips_to_pixmap() {
        let mut pixmap = Pixmap::new(4, 4).unwrap();
        let mask = [255u8; 9];
        draw_glyph_to_pixmap(
            &mut pixmap,
            &mask,
            3,
            3,
            2,
            2,
            CosmicColor::rgba(255, 255, 255, 255),
        );
        // (3,3) is inside, (1,1) untouched
        assert_eq!(pixmap.data()[(3 * 4 + 3) * 4 + 3], 255);
        assert_eq!(pixmap.data()[(4 + 1) * 4 + 3], 0);
    }
}
