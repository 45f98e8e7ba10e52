//! Animations that perturb drawing-context state

use easel_graphics::{Canvas, SaveFlags};

use crate::animation::Animation;

/// An animation applied to the drawing context around a subtree's render.
///
/// Implementors declare exactly which context state categories
/// [`CanvasAnimation::apply`] touches; the renderer saves that subset before
/// applying and restores it afterwards. Declaring too little leaks the
/// effect onto sibling draws.
pub trait CanvasAnimation: Send {
    /// The context state [`CanvasAnimation::apply`] perturbs.
    fn save_flags(&self) -> SaveFlags;

    /// Applies the current animated values to the context.
    fn apply(&mut self, canvas: &mut dyn Canvas);

    /// Maps eased progress to this animation's concrete values.
    fn on_calculate(&mut self, progress: f32);

    fn animation(&self) -> &Animation;

    fn animation_mut(&mut self) -> &mut Animation;

    /// Drives the underlying state machine and recomputes animated values.
    fn calculate(&mut self, now: u64) -> bool {
        let active = self.animation_mut().calculate(now);
        let progress = self.animation().interpolated_progress();
        self.on_calculate(progress);
        active
    }

    fn start(&mut self) {
        self.animation_mut().start();
    }

    fn is_active(&self) -> bool {
        self.animation().is_active()
    }
}

/// Linear alpha fade between two multipliers.
pub struct AlphaAnimation {
    animation: Animation,
    from: f32,
    to: f32,
    current: f32,
}

impl AlphaAnimation {
    pub fn new(from: f32, to: f32, duration: u64) -> Self {
        Self {
            animation: Animation::new(duration),
            from,
            to,
            current: from.clamp(0.0, 1.0),
        }
    }

    /// The alpha multiplier for the current progress, clamped into [0, 1].
    pub fn current_alpha(&self) -> f32 {
        self.current
    }
}

impl CanvasAnimation for AlphaAnimation {
    fn save_flags(&self) -> SaveFlags {
        SaveFlags::ALPHA
    }

    fn apply(&mut self, canvas: &mut dyn Canvas) {
        canvas.multiply_alpha(self.current);
    }

    fn on_calculate(&mut self, progress: f32) {
        let alpha = self.from + (self.to - self.from) * progress;
        self.current = alpha.clamp(0.0, 1.0);
    }

    fn animation(&self) -> &Animation {
        &self.animation
    }

    fn animation_mut(&mut self) -> &mut Animation {
        &mut self.animation
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn alpha_matches_endpoints() {
        let mut fade = AlphaAnimation::new(0.2, 0.8, 100);
        fade.on_calculate(0.0);
        assert_eq!(fade.current_alpha(), 0.2);
        fade.on_calculate(1.0);
        assert_eq!(fade.current_alpha(), 0.8);
        fade.on_calculate(0.5);
        assert_eq!(fade.current_alpha(), 0.5);
    }

    #[test]
    fn alpha_is_clamped_for_out_of_range_endpoints() {
        let mut fade = AlphaAnimation::new(-1.0, 2.0, 100);
        assert_eq!(fade.current_alpha(), 0.0);
        fade.on_calculate(0.0);
        assert_eq!(fade.current_alpha(), 0.0);
        fade.on_calculate(1.0);
        assert_eq!(fade.current_alpha(), 1.0);
        fade.on_calculate(0.5);
        assert_eq!(fade.current_alpha(), 0.5);
    }

    #[test]
    fn fade_declares_only_alpha_state() {
        let fade = AlphaAnimation::new(0.0, 1.0, 100);
        assert_eq!(fade.save_flags(), SaveFlags::ALPHA);
    }

    #[test]
    fn calculate_drives_the_embedded_machine() {
        let mut fade = AlphaAnimation::new(0.0, 1.0, 100);
        fade.start();
        assert!(fade.calculate(0));
        assert_eq!(fade.current_alpha(), 0.0);
        assert!(fade.calculate(50));
        assert_eq!(fade.current_alpha(), 0.5);
        assert!(!fade.calculate(100));
        assert_eq!(fade.current_alpha(), 1.0);
        assert!(!fade.is_active());
    }
}
