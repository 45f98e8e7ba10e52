//! Flat-color texture

use easel_graphics::{Canvas, Color};

use crate::texture::{Texture, TextureState};

/// A solid color with a nominal size. Holds no GPU content, so it is always
/// ready and survives context loss.
pub struct ColorTexture {
    color: Color,
    width: i32,
    height: i32,
}

impl ColorTexture {
    pub fn new(color: Color) -> Self {
        Self {
            color,
            width: 1,
            height: 1,
        }
    }

    pub fn with_size(color: Color, width: i32, height: i32) -> Self {
        Self {
            color,
            width,
            height,
        }
    }

    pub fn color(&self) -> Color {
        self.color
    }

    pub fn set_size(&mut self, width: i32, height: i32) {
        self.width = width;
        self.height = height;
    }
}

impl Texture for ColorTexture {
    fn width(&self) -> i32 {
        self.width
    }

    fn height(&self) -> i32 {
        self.height
    }

    fn is_opaque(&self) -> bool {
        self.color.is_opaque()
    }

    fn state(&self) -> TextureState {
        TextureState::Loaded
    }

    fn draw(&mut self, canvas: &mut dyn Canvas, x: i32, y: i32, width: i32, height: i32) {
        canvas.fill_rect(x as f32, y as f32, width as f32, height as f32, self.color);
    }
}
