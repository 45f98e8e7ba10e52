//! Root controller for an easel scene: render-thread arbitration, the
//! frame body, idle work, and orientation compensation.

mod orientation;
mod root;

pub use orientation::{DisplayRotation, OrientationSource};
pub use root::{IdleListener, Root, SceneGuard};

pub mod prelude {
    pub use crate::orientation::{DisplayRotation, OrientationSource};
    pub use crate::root::{Root, SceneGuard};
}
