//! Root frame controller arbitrating the control and render threads

use std::ops::{Deref, DerefMut};
use std::sync::{Arc, Condvar, Mutex, MutexGuard};

use easel_animation::AnimationClock;
use easel_graphics::{Canvas, Point, SaveFlags, Transform};
use easel_scene::{FrameRequests, Scene, TouchAction, TouchEvent, ViewId};

use crate::orientation::{compensation_matrix, DisplayRotation, OrientationSource};

/// Per-frame idle callback.
///
/// Runs at the top of a frame with the canvas and a flag telling whether
/// this frame was explicitly requested; returns whether it did work that
/// needs another frame. Returning `false` unregisters the listener.
pub type IdleListener = Box<dyn FnMut(&mut dyn Canvas, bool) -> bool + Send>;

struct RootState {
    scene: Scene,
    frozen: bool,
    paused: bool,
    in_down_state: bool,
    idle_listeners: Vec<IdleListener>,
    orientation_source: Option<Box<dyn OrientationSource>>,
    display_rotation: DisplayRotation,
    compensation: DisplayRotation,
    compensation_matrix: Transform,
    surface_width: i32,
    surface_height: i32,
    lights_out: bool,
}

/// Owner of the content tree and the boundary between the control thread
/// and the render thread.
///
/// The control thread mutates the tree through [`Root::lock_render_thread`]
/// and delivers input through [`Root::dispatch_touch`]; the render thread
/// calls [`Root::draw_frame`] at presentation cadence. Both sides
/// serialize on one lock, so a frame never observes a half-applied
/// mutation. The only lock-free entry points are the frame scheduling
/// calls, which touch coalescing flags and nothing else.
pub struct Root {
    state: Mutex<RootState>,
    unfrozen: Condvar,
    requests: Arc<FrameRequests>,
    clock: AnimationClock,
}

impl Root {
    /// A root whose animations run on wall time.
    pub fn new() -> Self {
        Self::with_clock(AnimationClock::wall())
    }

    /// A root driven by the given clock. Tests pass a manual clock and
    /// step it between frames.
    pub fn with_clock(clock: AnimationClock) -> Self {
        let scene = Scene::new();
        let requests = scene.frame_requests();
        Self {
            state: Mutex::new(RootState {
                scene,
                frozen: false,
                paused: false,
                in_down_state: false,
                idle_listeners: Vec::new(),
                orientation_source: None,
                display_rotation: DisplayRotation::Deg0,
                compensation: DisplayRotation::Deg0,
                compensation_matrix: Transform::IDENTITY,
                surface_width: 0,
                surface_height: 0,
                lights_out: false,
            }),
            unfrozen: Condvar::new(),
            requests,
            clock,
        }
    }

    fn lock_state(&self) -> MutexGuard<'_, RootState> {
        self.state.lock().expect("render thread lock poisoned")
    }

    /// Takes the render-thread lock, giving exclusive access to the scene.
    ///
    /// Control-thread code holds this guard across a whole tree mutation;
    /// the render thread holds the same lock for the whole frame body, so
    /// a held guard also delays the next frame.
    pub fn lock_render_thread(&self) -> SceneGuard<'_> {
        SceneGuard {
            state: self.lock_state(),
        }
    }

    /// The clock frames are timestamped with.
    pub fn clock(&self) -> &AnimationClock {
        &self.clock
    }

    /// The scheduling flags shared with the scene. Hosts hand this to
    /// whatever owns the swap chain.
    pub fn frame_requests(&self) -> Arc<FrameRequests> {
        Arc::clone(&self.requests)
    }

    /// Installs the callback that wakes the render loop.
    ///
    /// The callback may run while the render-thread lock is held, so it
    /// must post a wakeup and return, never call back into the root.
    pub fn set_frame_waker(&self, waker: impl Fn() + Send + Sync + 'static) {
        self.requests.set_frame_waker(waker);
    }

    /// Schedules a frame. Safe from any thread; requests coalesce until
    /// the next frame consumes them.
    pub fn request_render(&self) {
        self.requests.request_render();
    }

    /// Schedules a frame even when one is already pending.
    pub fn request_render_forced(&self) {
        self.requests.request_render_forced();
    }

    /// Schedules a measure and layout pass over the content pane before
    /// the next render.
    pub fn request_layout_content_pane(&self) {
        self.requests.request_layout();
    }

    /// Swaps the content pane.
    ///
    /// A gesture aimed at the old pane is cancelled into it first; the old
    /// pane is then detached, the new one attached, and a layout pass
    /// scheduled.
    pub fn set_content_pane(&self, pane: Option<ViewId>) {
        let mut state = self.lock_state();
        if state.scene.content_pane() == pane {
            return;
        }
        if let Some(old) = state.scene.content_pane() {
            if state.in_down_state {
                state.scene.dispatch_touch(old, TouchEvent::cancel());
                state.in_down_state = false;
            }
        }
        state.scene.set_content_pane(pane);
    }

    pub fn content_pane(&self) -> Option<ViewId> {
        self.lock_state().scene.content_pane()
    }

    /// Registers a per-frame idle callback and schedules the frame that
    /// will run it.
    ///
    /// Callbacks run under the render-thread lock, so they must not call
    /// back into the root. A listener stays registered for as long as it
    /// returns `true`, and each such return schedules another frame.
    pub fn add_idle_listener(
        &self,
        listener: impl FnMut(&mut dyn Canvas, bool) -> bool + Send + 'static,
    ) {
        self.lock_state().idle_listeners.push(Box::new(listener));
        self.requests.request_render();
    }

    /// Delivers a pointer event to the tree, mapped through the
    /// compensation matrix when compensation is active.
    ///
    /// Moves arriving without a preceding consumed down are dropped, so a
    /// pane swapped in mid-gesture never sees the tail of a gesture it did
    /// not accept.
    pub fn dispatch_touch(&self, event: TouchEvent) -> bool {
        let mut state = self.lock_state();
        match event.action {
            TouchAction::Up | TouchAction::Cancel => state.in_down_state = false,
            TouchAction::Move if !state.in_down_state => return false,
            _ => {}
        }
        let mapped = state.map_into_content(event);
        let Some(pane) = state.scene.content_pane() else {
            return false;
        };
        let handled = state.scene.dispatch_touch(pane, mapped);
        if mapped.action == TouchAction::Down && handled {
            state.in_down_state = true;
        }
        handled
    }

    /// Stops frame production until [`Root::unfreeze`]. A frame already
    /// past the freeze check finishes first; GPU resources stay resident.
    pub fn freeze(&self) {
        self.lock_state().frozen = true;
        log::debug!("root frozen");
    }

    /// Lifts a freeze, waking a frame blocked on it.
    pub fn unfreeze(&self) {
        let mut state = self.lock_state();
        state.frozen = false;
        self.unfrozen.notify_all();
    }

    /// Resumes frame production after [`Root::pause`] and pushes a frame
    /// through.
    pub fn resume(&self) {
        self.lock_state().paused = false;
        log::debug!("root resumed");
        self.requests.request_render_forced();
    }

    /// Stops frame production. Any freeze is released first so the render
    /// thread observes the pause instead of sleeping against the freeze.
    pub fn pause(&self) {
        let mut state = self.lock_state();
        state.paused = true;
        state.frozen = false;
        self.unfrozen.notify_all();
        log::debug!("root paused");
    }

    /// Records new surface dimensions and schedules a layout pass.
    pub fn resize(&self, width: i32, height: i32) {
        {
            let mut state = self.lock_state();
            state.surface_width = width;
            state.surface_height = height;
        }
        self.requests.request_layout();
    }

    /// Installs the source the layout pass reads display rotation from and
    /// schedules a pass to pick up its current value.
    pub fn set_orientation_source(&self, source: impl OrientationSource + 'static) {
        self.lock_state().orientation_source = Some(Box::new(source));
        self.requests.request_layout();
    }

    /// Display rotation as of the last layout pass.
    pub fn display_rotation(&self) -> DisplayRotation {
        self.lock_state().display_rotation
    }

    /// Content rotation compensating the display rotation, as of the last
    /// layout pass.
    pub fn compensation(&self) -> DisplayRotation {
        self.lock_state().compensation
    }

    /// Transform mapping surface coordinates into content coordinates
    /// under the current compensation.
    pub fn compensation_matrix(&self) -> Transform {
        self.lock_state().compensation_matrix
    }

    /// Sets the immersive-presentation hint. The root only stores it; the
    /// host reads it back and applies it to its window chrome.
    pub fn set_lights_out_mode(&self, enabled: bool) {
        self.lock_state().lights_out = enabled;
    }

    pub fn lights_out_mode(&self) -> bool {
        self.lock_state().lights_out
    }

    /// Produces one frame. Called by the render thread at presentation
    /// cadence.
    ///
    /// Blocks while frozen, returns immediately while paused. The body
    /// runs under the render-thread lock: recycled GPU resources are
    /// drained, idle listeners run, the content pane is measured and laid
    /// out if a pass is pending or the display rotation changed, the tree
    /// renders under the compensation rotation, and launched animations
    /// are advanced to the frame timestamp.
    pub fn draw_frame(&self, canvas: &mut dyn Canvas) {
        let mut state = self.lock_state();
        while state.frozen {
            state = self
                .unfrozen
                .wait(state)
                .expect("render thread lock poisoned");
        }
        if state.paused {
            log::trace!("skipping frame while paused");
            return;
        }

        self.clock.tick();
        let now = self.clock.now();

        canvas.delete_recycled_resources();

        let render_requested = self.requests.take_render();
        state.run_idle_listeners(canvas, render_requested, &self.requests);

        let rotation_changed = match state.orientation_source.as_ref() {
            Some(source) => source.display_rotation() != state.display_rotation,
            None => false,
        };
        if self.requests.take_layout() || rotation_changed {
            state.layout_content_pane();
        }

        canvas.save(SaveFlags::ALL);
        state.rotate_for_compensation(canvas);
        state.scene.render(canvas, now);
        canvas.restore();

        state.scene.drive_animations(now);
    }
}

impl Default for Root {
    fn default() -> Self {
        Self::new()
    }
}

impl RootState {
    fn map_into_content(&self, event: TouchEvent) -> TouchEvent {
        if self.compensation == DisplayRotation::Deg0 {
            return event;
        }
        let mapped = self.compensation_matrix.apply(Point::new(event.x, event.y));
        TouchEvent::new(event.action, mapped.x, mapped.y)
    }

    fn run_idle_listeners(
        &mut self,
        canvas: &mut dyn Canvas,
        render_requested: bool,
        requests: &FrameRequests,
    ) {
        if self.idle_listeners.is_empty() {
            return;
        }
        self.idle_listeners
            .retain_mut(|listener| listener(canvas, render_requested));
        if !self.idle_listeners.is_empty() {
            requests.request_render();
        }
    }

    /// Measures and lays out the content pane against the surface,
    /// swapping the specs when compensation turns the surface a quarter
    /// turn, and rebuilds the compensation matrix.
    fn layout_content_pane(&mut self) {
        let (display_rotation, compensation) = match self.orientation_source.as_ref() {
            Some(source) => (source.display_rotation(), source.compensation()),
            None => (DisplayRotation::Deg0, DisplayRotation::Deg0),
        };
        self.display_rotation = display_rotation;
        self.compensation = compensation;
        self.compensation_matrix =
            compensation_matrix(compensation, self.surface_width, self.surface_height);

        let (mut width, mut height) = (self.surface_width, self.surface_height);
        if compensation.swaps_axes() {
            std::mem::swap(&mut width, &mut height);
        }
        let Some(pane) = self.scene.content_pane() else {
            return;
        };
        if width == 0 || height == 0 {
            return;
        }
        log::debug!("layout content pane {width}x{height}");
        self.scene.measure(pane, width, height);
        self.scene.layout(pane, 0, 0, width, height);
    }

    /// Counter-rotates the canvas so compensated content lands upright on
    /// the surface.
    fn rotate_for_compensation(&self, canvas: &mut dyn Canvas) {
        if self.compensation == DisplayRotation::Deg0 {
            return;
        }
        let center_x = (self.surface_width / 2) as f32;
        let center_y = (self.surface_height / 2) as f32;
        canvas.translate(center_x, center_y);
        canvas.rotate(-(self.compensation.degrees() as f32));
        if self.compensation.swaps_axes() {
            canvas.translate(-center_y, -center_x);
        } else {
            canvas.translate(-center_x, -center_y);
        }
    }
}

/// Exclusive access to the scene, blocking the render thread while held.
///
/// Dereferences to [`Scene`], so the whole tree mutation surface is
/// available through it.
pub struct SceneGuard<'a> {
    state: MutexGuard<'a, RootState>,
}

impl Deref for SceneGuard<'_> {
    type Target = Scene;

    fn deref(&self) -> &Scene {
        &self.state.scene
    }
}

impl DerefMut for SceneGuard<'_> {
    fn deref_mut(&mut self) -> &mut Scene {
        &mut self.state.scene
    }
}
