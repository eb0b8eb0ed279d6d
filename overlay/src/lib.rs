//! Statusbar Overlay Library
//!
//! Software surface host for the statusbar engine.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────┐
//! │                    surface                          │
//! │        SoftwareSurface (SurfaceHost impl)           │
//! │   measure → place → resolve rect → rasterize        │
//! ├─────────────────────────────────────────────────────┤
//! │                    renderer                         │
//! │            tiny-skia + cosmic-text                  │
//! │         (monospace cell metrics, glyphs)            │
//! └─────────────────────────────────────────────────────┘
//! ```

pub mod renderer;
pub mod surface;

pub use renderer::Renderer;
pub use surface::{ParentWindow, SoftwareSurface, SurfaceFrame, SurfaceRect, resolve_rect};

// Re-export tiny_skia Color for external use
pub use tiny_skia::Color;
