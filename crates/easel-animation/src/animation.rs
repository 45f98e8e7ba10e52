//! Animation state machine and easing curves

/// Lifecycle of an [`Animation`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AnimationState {
    Initialized,
    Started,
    Ended,
}

/// Easing curve applied to raw progress before consumers observe it.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Easing {
    #[default]
    Linear,
    /// Starts slow, finishes fast.
    Accelerate,
    /// Starts fast, finishes slow.
    Decelerate,
    /// Slow at both ends.
    AccelerateDecelerate,
}

impl Easing {
    pub fn transform(&self, t: f32) -> f32 {
        match self {
            Easing::Linear => t,
            Easing::Accelerate => t * t,
            Easing::Decelerate => 1.0 - (1.0 - t) * (1.0 - t),
            Easing::AccelerateDecelerate => {
                (((t + 1.0) * std::f32::consts::PI).cos() / 2.0) + 0.5
            }
        }
    }
}

/// A duration-bounded progress source.
///
/// `start` arms the animation without fixing a timestamp; the start time
/// latches to the frame time of the first [`Animation::calculate`] call
/// afterwards, so an animation launched between frames begins at progress 0
/// on the frame that first drives it.
#[derive(Clone, Debug)]
pub struct Animation {
    state: AnimationState,
    start_time: Option<u64>,
    duration: u64,
    easing: Easing,
    progress: f32,
}

impl Animation {
    pub fn new(duration: u64) -> Self {
        Self {
            state: AnimationState::Initialized,
            start_time: None,
            duration,
            easing: Easing::Linear,
            progress: 0.0,
        }
    }

    pub fn state(&self) -> AnimationState {
        self.state
    }

    pub fn duration(&self) -> u64 {
        self.duration
    }

    pub fn set_duration(&mut self, duration: u64) {
        self.duration = duration;
    }

    pub fn set_easing(&mut self, easing: Easing) {
        self.easing = easing;
    }

    /// Arms the animation. A finished animation may be started again.
    pub fn start(&mut self) {
        self.state = AnimationState::Started;
        self.start_time = None;
        self.progress = 0.0;
    }

    /// Latches the start timestamp if the first frame has not done so yet.
    pub fn start_at(&mut self, when: u64) {
        if self.state == AnimationState::Started {
            self.start_time.get_or_insert(when);
        }
    }

    /// Ends the animation immediately, keeping its current progress.
    pub fn force_stop(&mut self) {
        if self.state == AnimationState::Started {
            self.state = AnimationState::Ended;
        }
    }

    pub fn is_active(&self) -> bool {
        self.state == AnimationState::Started
    }

    /// Raw progress in [0, 1], before easing.
    pub fn progress(&self) -> f32 {
        self.progress
    }

    /// Progress after the easing curve.
    pub fn interpolated_progress(&self) -> f32 {
        self.easing.transform(self.progress)
    }

    /// Drives the animation to `now` and reports whether it is still
    /// running.
    ///
    /// Idempotent in `now`: a repeated or earlier timestamp never moves
    /// progress backwards, so the same frame may drive an animation more
    /// than once without visible effect.
    pub fn calculate(&mut self, now: u64) -> bool {
        if self.state != AnimationState::Started {
            return false;
        }
        let start = *self.start_time.get_or_insert(now);
        let elapsed = now.saturating_sub(start);
        let progress = if elapsed >= self.duration {
            1.0
        } else {
            elapsed as f32 / self.duration as f32
        };
        if progress > self.progress {
            self.progress = progress;
        }
        if elapsed >= self.duration {
            self.progress = 1.0;
            self.state = AnimationState::Ended;
        }
        self.state == AnimationState::Started
    }
}

#[cfg(test)]
#[path = "tests/animation_tests.rs"]
mod tests;
