use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

type FrameWaker = Box<dyn Fn() + Send + Sync>;

/// Cross-thread frame scheduling flags shared between the scene and the
/// loop that owns the render surface.
///
/// Render requests coalesce: while one is pending, further requests do
/// not wake the loop again. The forced variant always wakes, for callers
/// that must push a frame through even when one is already queued.
pub struct FrameRequests {
    render: AtomicBool,
    layout: AtomicBool,
    waker: Mutex<Option<FrameWaker>>,
}

impl FrameRequests {
    pub fn new() -> Self {
        Self {
            render: AtomicBool::new(false),
            layout: AtomicBool::new(false),
            waker: Mutex::new(None),
        }
    }

    /// Installs the callback used to wake the render loop. Replaces any
    /// previous waker.
    pub fn set_frame_waker(&self, waker: impl Fn() + Send + Sync + 'static) {
        if let Ok(mut slot) = self.waker.lock() {
            *slot = Some(Box::new(waker));
        }
    }

    pub fn request_render(&self) {
        if !self.render.swap(true, Ordering::AcqRel) {
            self.wake();
        }
    }

    /// Schedules a frame even when one is already pending.
    pub fn request_render_forced(&self) {
        self.render.store(true, Ordering::Release);
        self.wake();
    }

    /// Schedules a measure and layout pass for the next frame.
    pub fn request_layout(&self) {
        self.layout.store(true, Ordering::Release);
        self.request_render();
    }

    pub fn render_requested(&self) -> bool {
        self.render.load(Ordering::Acquire)
    }

    pub fn layout_requested(&self) -> bool {
        self.layout.load(Ordering::Acquire)
    }

    /// Consumes the pending render flag.
    pub fn take_render(&self) -> bool {
        self.render.swap(false, Ordering::AcqRel)
    }

    /// Consumes the pending layout flag.
    pub fn take_layout(&self) -> bool {
        self.layout.swap(false, Ordering::AcqRel)
    }

    fn wake(&self) {
        if let Ok(slot) = self.waker.lock() {
            if let Some(waker) = slot.as_ref() {
                waker();
            }
        }
    }
}

impl Default for FrameRequests {
    fn default() -> Self {
        Self::new()
    }
}
