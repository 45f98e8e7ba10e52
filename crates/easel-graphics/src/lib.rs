//! Pure math/data and the drawing-context contract for Easel

mod canvas;
mod color;
mod geometry;
mod paint;
mod transform;

pub use canvas::*;
pub use color::*;
pub use geometry::*;
pub use paint::*;
pub use transform::*;

pub mod prelude {
    pub use crate::canvas::{Canvas, ContextId, ResourceIdAllocator, SaveFlags, TextureId};
    pub use crate::color::Color;
    pub use crate::geometry::{Insets, Point, Rect, Size};
    pub use crate::paint::Paint;
    pub use crate::transform::Transform;
}
