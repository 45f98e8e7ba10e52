use std::sync::Arc;

use easel_animation::AnimationClock;
use easel_graphics::{Canvas, Size};
use easel_scene::{FrameRequests, Scene, TouchEvent, ViewId};

use crate::recording_canvas::RecordingCanvas;

/// Drives a [`Scene`] the way the frame loop would, without a window:
/// manual clock, recording canvas, explicit frames.
///
/// ```
/// use easel_scene::View;
/// use easel_testing::SceneHarness;
///
/// let mut harness = SceneHarness::new(640, 480);
/// let pane = harness.scene.insert(View::new());
/// harness.scene.set_content_pane(Some(pane));
/// harness.frame();
/// assert_eq!(harness.scene.bounds(pane).width(), 640);
/// ```
pub struct SceneHarness {
    pub scene: Scene,
    pub canvas: RecordingCanvas,
    pub clock: AnimationClock,
    requests: Arc<FrameRequests>,
    surface: Size,
}

impl SceneHarness {
    pub fn new(width: i32, height: i32) -> Self {
        let scene = Scene::new();
        let requests = scene.frame_requests();
        Self {
            scene,
            canvas: RecordingCanvas::new(),
            clock: AnimationClock::manual(),
            requests,
            surface: Size::new(width, height),
        }
    }

    pub fn surface_size(&self) -> Size {
        self.surface
    }

    /// Simulates a surface resize and schedules the layout pass a real
    /// host would.
    pub fn resize(&mut self, width: i32, height: i32) {
        self.surface = Size::new(width, height);
        self.requests.request_layout();
    }

    /// The scheduling flags shared with the scene, for asserting on
    /// pending work.
    pub fn requests(&self) -> &FrameRequests {
        &self.requests
    }

    /// Runs one frame: recycled resources are deleted, a pending layout
    /// pass sizes the content pane to the surface, the tree renders, and
    /// animations advance to the current clock value.
    ///
    /// Returns whether a render had been requested when the frame began.
    pub fn frame(&mut self) -> bool {
        self.canvas.delete_recycled_resources();
        let render_requested = self.requests.take_render();
        if self.requests.take_layout() {
            if let Some(pane) = self.scene.content_pane() {
                self.scene.measure(pane, self.surface.width, self.surface.height);
                self.scene
                    .layout(pane, 0, 0, self.surface.width, self.surface.height);
            }
        }
        let now = self.clock.now();
        self.scene.render(&mut self.canvas, now);
        self.scene.drive_animations(now);
        render_requested
    }

    /// Advances the clock and runs a frame.
    pub fn frame_after(&mut self, elapsed: u64) -> bool {
        self.clock.advance(elapsed);
        self.frame()
    }

    /// Dispatches an event to the content pane. Returns whether any view
    /// consumed it; false with no pane set.
    pub fn touch(&mut self, event: TouchEvent) -> bool {
        match self.scene.content_pane() {
            Some(pane) => self.scene.dispatch_touch(pane, event),
            None => false,
        }
    }

    /// Down followed by up at the same point.
    pub fn tap(&mut self, x: f32, y: f32) -> bool {
        let consumed = self.touch(TouchEvent::down(x, y));
        self.touch(TouchEvent::up(x, y));
        consumed
    }

    /// The content pane id, for tests that need a dispatch origin.
    pub fn pane(&self) -> Option<ViewId> {
        self.scene.content_pane()
    }
}
