//! 2D canvas surface (WASM only)

use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, Document, HtmlCanvasElement};

use super::{Color, Surface};
use crate::error::SetupError;

/// A `<canvas>` element and its 2D context
pub struct CanvasSurface {
    canvas: HtmlCanvasElement,
    context: CanvasRenderingContext2d,
}

impl CanvasSurface {
    /// Look up the canvas by element id and acquire its 2D context
    pub fn from_document(document: &Document, canvas_id: &str) -> Result<Self, SetupError> {
        let canvas: HtmlCanvasElement = document
            .get_element_by_id(canvas_id)
            .ok_or_else(|| SetupError::CanvasNotFound(canvas_id.to_string()))?
            .dyn_into()
            .map_err(|_| SetupError::NotACanvas(canvas_id.to_string()))?;

        let context: CanvasRenderingContext2d = canvas
            .get_context("2d")
            .ok()
            .flatten()
            .ok_or(SetupError::ContextUnavailable)?
            .dyn_into()
            .map_err(|_| SetupError::ContextUnavailable)?;

        Ok(Self { canvas, context })
    }

    /// Match the drawing buffer to the element's layout size
    pub fn fit_to_client(&self) -> (f32, f32) {
        let width = self.canvas.client_width().max(0) as u32;
        let height = self.canvas.client_height().max(0) as u32;
        self.canvas.set_width(width);
        self.canvas.set_height(height);
        (width as f32, height as f32)
    }
}

impl Surface for CanvasSurface {
    fn width(&self) -> f32 {
        self.canvas.width() as f32
    }

    fn height(&self) -> f32 {
        self.canvas.height() as f32
    }

    fn set_fill(&mut self, color: Color) {
        self.context.set_fill_style_str(&color.to_css());
    }

    fn fill_rect(&mut self, x: f32, y: f32, width: f32, height: f32) {
        self.context
            .fill_rect(x as f64, y as f64, width as f64, height as f64);
    }
}
