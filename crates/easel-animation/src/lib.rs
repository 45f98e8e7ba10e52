//! Time-driven animation framework for Easel
//!
//! Animations are parameterized by a frame timestamp taken from an
//! [`AnimationClock`], never by wall-clock reads scattered through the
//! code, so every time-dependent behavior can be driven deterministically
//! in tests.

mod animation;
mod canvas_animation;
mod clock;

pub use animation::*;
pub use canvas_animation::*;
pub use clock::*;

pub mod prelude {
    pub use crate::animation::{Animation, AnimationState, Easing};
    pub use crate::canvas_animation::{AlphaAnimation, CanvasAnimation};
    pub use crate::clock::AnimationClock;
}
