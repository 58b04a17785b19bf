//! Rendering module
//!
//! The simulation draws through the [`Surface`] trait: a fill color plus
//! filled axis-aligned rectangles. On the web this is a 2D canvas context.

pub mod color;
pub mod recording;

#[cfg(target_arch = "wasm32")]
pub mod canvas;

pub use color::Color;
pub use recording::{DrawCommand, RecordingSurface};

#[cfg(target_arch = "wasm32")]
pub use canvas::CanvasSurface;

/// A 2D drawing target
pub trait Surface {
    /// Viewport width in surface units
    fn width(&self) -> f32;
    /// Viewport height in surface units
    fn height(&self) -> f32;
    /// Set the color used by subsequent fills (alpha blended)
    fn set_fill(&mut self, color: Color);
    /// Fill a rectangle with its top-left corner at (x, y)
    fn fill_rect(&mut self, x: f32, y: f32, width: f32, height: f32);
}
