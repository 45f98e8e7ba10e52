//! Frame-latched animation time source

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use web_time::Instant;

/// A shared, frame-latched time source in milliseconds.
///
/// The render loop calls [`AnimationClock::tick`] once at the top of each
/// frame; every animation and fading texture driven during that frame then
/// observes the same timestamp through [`AnimationClock::now`]. A manual
/// clock never advances on its own and is stepped explicitly, which is what
/// tests use to simulate arbitrary frame pacing.
#[derive(Clone)]
pub struct AnimationClock {
    inner: Arc<ClockInner>,
}

struct ClockInner {
    // None in manual mode.
    origin: Option<Instant>,
    now_ms: AtomicU64,
}

impl AnimationClock {
    /// A clock latching wall time on every tick.
    pub fn wall() -> Self {
        Self {
            inner: Arc::new(ClockInner {
                origin: Some(Instant::now()),
                now_ms: AtomicU64::new(0),
            }),
        }
    }

    /// A clock that only moves when told to.
    pub fn manual() -> Self {
        Self {
            inner: Arc::new(ClockInner {
                origin: None,
                now_ms: AtomicU64::new(0),
            }),
        }
    }

    /// The timestamp latched by the most recent tick or explicit step.
    pub fn now(&self) -> u64 {
        self.inner.now_ms.load(Ordering::Acquire)
    }

    /// Latches the current frame timestamp. No-op on a manual clock.
    pub fn tick(&self) {
        if let Some(origin) = self.inner.origin {
            let elapsed = origin.elapsed().as_millis() as u64;
            self.inner.now_ms.store(elapsed, Ordering::Release);
        }
    }

    /// Sets the timestamp directly. Intended for manual clocks; a wall
    /// clock overwrites it on its next tick.
    pub fn set(&self, now_ms: u64) {
        self.inner.now_ms.store(now_ms, Ordering::Release);
    }

    /// Moves the timestamp forward by `delta_ms`.
    pub fn advance(&self, delta_ms: u64) {
        self.inner.now_ms.fetch_add(delta_ms, Ordering::AcqRel);
    }
}

impl Default for AnimationClock {
    fn default() -> Self {
        Self::wall()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn manual_clock_only_moves_when_stepped() {
        let clock = AnimationClock::manual();
        assert_eq!(clock.now(), 0);
        clock.tick();
        assert_eq!(clock.now(), 0);
        clock.set(100);
        clock.advance(50);
        assert_eq!(clock.now(), 150);
    }

    #[test]
    fn clones_share_the_same_time() {
        let clock = AnimationClock::manual();
        let observer = clock.clone();
        clock.set(42);
        assert_eq!(observer.now(), 42);
    }

    #[test]
    fn wall_clock_latches_on_tick() {
        let clock = AnimationClock::wall();
        let before = clock.now();
        clock.tick();
        assert!(clock.now() >= before);
    }
}
