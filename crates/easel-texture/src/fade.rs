//! Time-limited fade-in over another texture

use std::cell::Cell;

use easel_animation::AnimationClock;
use easel_graphics::{Canvas, SaveFlags};

use crate::texture::{Texture, TextureState};

/// How long a fade runs, in clock time units.
pub const FADE_DURATION: u64 = 180;

/// Fades another texture in over [`FADE_DURATION`].
///
/// The fade is anchored to the clock value at construction. Once
/// [`FadeTexture::is_animating`] observes that the duration has elapsed it
/// latches to finished; the latch is one-way, so a clock that later reads
/// an earlier value cannot resurrect the fade.
pub struct FadeTexture {
    inner: Box<dyn Texture>,
    clock: AnimationClock,
    created: u64,
    animating: Cell<bool>,
}

impl FadeTexture {
    pub fn new(inner: Box<dyn Texture>, clock: AnimationClock) -> Self {
        let created = clock.now();
        Self {
            inner,
            clock,
            created,
            animating: Cell::new(true),
        }
    }

    /// Remaining fade amount: 1 at creation, 0 once the duration elapsed.
    pub fn ratio(&self) -> f32 {
        let elapsed = self.clock.now().saturating_sub(self.created);
        if elapsed >= FADE_DURATION {
            return 0.0;
        }
        (1.0 - elapsed as f32 / FADE_DURATION as f32).clamp(0.0, 1.0)
    }
}

impl Texture for FadeTexture {
    fn width(&self) -> i32 {
        self.inner.width()
    }

    fn height(&self) -> i32 {
        self.inner.height()
    }

    fn is_opaque(&self) -> bool {
        self.inner.is_opaque() && !self.is_animating()
    }

    fn state(&self) -> TextureState {
        self.inner.state()
    }

    fn draw(&mut self, canvas: &mut dyn Canvas, x: i32, y: i32, width: i32, height: i32) {
        if self.is_animating() {
            let alpha = 1.0 - self.ratio();
            canvas.save(SaveFlags::ALPHA);
            canvas.multiply_alpha(alpha);
            self.inner.draw(canvas, x, y, width, height);
            canvas.restore();
        } else {
            self.inner.draw(canvas, x, y, width, height);
        }
    }

    fn evict(&mut self) {
        self.inner.evict();
    }

    fn is_animating(&self) -> bool {
        if self.animating.get() {
            let elapsed = self.clock.now().saturating_sub(self.created);
            if elapsed >= FADE_DURATION {
                self.animating.set(false);
            }
        }
        self.animating.get()
    }
}
