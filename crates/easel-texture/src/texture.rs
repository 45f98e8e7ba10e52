//! The texture capability trait and residency states

use easel_graphics::Canvas;

/// GPU residency of a texture's content.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TextureState {
    Unloaded,
    Loaded,
}

/// A drawable rectangular surface.
pub trait Texture: Send {
    fn width(&self) -> i32;

    fn height(&self) -> i32;

    /// Whether every covered pixel is fully opaque; a rendering hint only.
    fn is_opaque(&self) -> bool;

    fn state(&self) -> TextureState;

    /// Draws the texture scaled into the given rectangle. Content loss is
    /// recoverable: the variant reports it and skips rather than panicking.
    fn draw(&mut self, canvas: &mut dyn Canvas, x: i32, y: i32, width: i32, height: i32);

    /// Draws at natural size.
    fn draw_at(&mut self, canvas: &mut dyn Canvas, x: i32, y: i32) {
        let (width, height) = (self.width(), self.height());
        self.draw(canvas, x, y, width, height);
    }

    /// Releases GPU memory under pressure, where the variant can rebuild
    /// its content later. Variants without a backing copy keep their
    /// memory.
    fn evict(&mut self) {}

    /// Whether the visual is still changing over time (fading variants).
    fn is_animating(&self) -> bool {
        false
    }
}
