//! In-memory surface that records draw calls
//!
//! Used by the headless native runner and by tests that check draw order.

use super::{Color, Surface};

/// A single recorded drawing operation
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    SetFill(Color),
    FillRect {
        x: f32,
        y: f32,
        width: f32,
        height: f32,
    },
}

/// Surface that stores every command instead of rasterizing it
#[derive(Debug, Clone)]
pub struct RecordingSurface {
    width: f32,
    height: f32,
    pub commands: Vec<DrawCommand>,
}

impl RecordingSurface {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            width,
            height,
            commands: Vec::new(),
        }
    }

    /// Drop recorded commands (call between frames to bound memory)
    pub fn clear(&mut self) {
        self.commands.clear();
    }

    /// Number of rectangles filled since the last clear
    pub fn rect_count(&self) -> usize {
        self.commands
            .iter()
            .filter(|c| matches!(c, DrawCommand::FillRect { .. }))
            .count()
    }

    /// Each filled rectangle paired with the fill color active at the time
    pub fn filled_rects(&self) -> Vec<(Color, [f32; 4])> {
        let mut fill = Color::default();
        let mut rects = Vec::new();
        for command in &self.commands {
            match *command {
                DrawCommand::SetFill(color) => fill = color,
                DrawCommand::FillRect {
                    x,
                    y,
                    width,
                    height,
                } => rects.push((fill, [x, y, width, height])),
            }
        }
        rects
    }
}

impl Surface for RecordingSurface {
    fn width(&self) -> f32 {
        self.width
    }

    fn height(&self) -> f32 {
        self.height
    }

    fn set_fill(&mut self, color: Color) {
        self.commands.push(DrawCommand::SetFill(color));
    }

    fn fill_rect(&mut self, x: f32, y: f32, width: f32, height: f32) {
        self.commands.push(DrawCommand::FillRect {
            x,
            y,
            width,
            height,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filled_rects_track_current_fill() {
        let mut surface = RecordingSurface::new(100.0, 50.0);
        surface.set_fill(Color::BLACK);
        surface.fill_rect(0.0, 0.0, 100.0, 50.0);
        surface.set_fill(Color::rgb(1, 2, 3));
        surface.fill_rect(5.0, 6.0, 3.0, 3.0);
        surface.fill_rect(7.0, 8.0, 3.0, 3.0);

        let rects = surface.filled_rects();
        assert_eq!(rects.len(), 3);
        assert_eq!(rects[0], (Color::BLACK, [0.0, 0.0, 100.0, 50.0]));
        assert_eq!(rects[2], (Color::rgb(1, 2, 3), [7.0, 8.0, 3.0, 3.0]));
        assert_eq!(surface.rect_count(), 3);

        surface.clear();
        assert_eq!(surface.rect_count(), 0);
    }
}
