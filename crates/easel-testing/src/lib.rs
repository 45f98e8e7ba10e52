//! Testing utilities for Easel: a recording canvas and a scene harness

mod harness;
mod recording_canvas;

pub use harness::SceneHarness;
pub use recording_canvas::{CanvasOp, RecordingCanvas};

pub mod prelude {
    pub use crate::harness::SceneHarness;
    pub use crate::recording_canvas::{CanvasOp, RecordingCanvas};
}
