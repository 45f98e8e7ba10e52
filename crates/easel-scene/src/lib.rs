//! Retained view tree: a scene of views measured, laid out, rendered and
//! hit-tested against an immediate-mode [`Canvas`](easel_graphics::Canvas).

mod dispatch;
mod event;
mod layout_params;
mod policy;
mod render;
mod requests;
mod scene;
mod stack;
mod view;

pub use event::{TouchAction, TouchEvent};
pub use layout_params::LayoutParams;
pub use policy::{DefaultPolicy, LayoutContext, MeasureContext, ViewPolicy};
pub use requests::FrameRequests;
pub use scene::Scene;
pub use stack::StackPolicy;
pub use view::{View, ViewId, Visibility};

pub mod prelude {
    pub use crate::event::{TouchAction, TouchEvent};
    pub use crate::layout_params::LayoutParams;
    pub use crate::policy::{DefaultPolicy, LayoutContext, MeasureContext, ViewPolicy};
    pub use crate::requests::FrameRequests;
    pub use crate::scene::Scene;
    pub use crate::stack::StackPolicy;
    pub use crate::view::{View, ViewId, Visibility};
}
