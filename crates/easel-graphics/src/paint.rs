//! Stroke state for outline drawing

use crate::color::Color;

/// Color plus line width for outline rect and line strokes.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Paint {
    color: Color,
    line_width: f32,
}

impl Paint {
    pub fn new(color: Color) -> Self {
        Self {
            color,
            line_width: 1.0,
        }
    }

    pub fn color(&self) -> Color {
        self.color
    }

    pub fn set_color(&mut self, color: Color) {
        self.color = color;
    }

    pub fn line_width(&self) -> f32 {
        self.line_width
    }

    /// Panics if `width` is negative.
    pub fn set_line_width(&mut self, width: f32) {
        assert!(width >= 0.0, "line width must be nonnegative: {width}");
        self.line_width = width;
    }
}

impl Default for Paint {
    fn default() -> Self {
        Self::new(Color::BLACK)
    }
}
