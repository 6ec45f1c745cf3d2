//! Pacing clocks for modeled transition time.
//!
//! Gear commands are blocking: the caller is suspended for each modeled
//! duration before the next event fires. [`ThreadClock`] sleeps the calling
//! thread (optionally scaled), [`SimulatedClock`] only advances a counter.
//! Both report the modeled elapsed time so transitions can be checked
//! against their performance requirement.

use lgcs_common::consts::TIME_SCALE_MAX;
use std::time::Duration;

/// Blocking delay contract used by the gear machine.
pub trait PacingClock: Send {
    /// Block for a modeled duration.
    fn wait(&mut self, duration: Duration);

    /// Total modeled time waited since construction.
    fn elapsed(&self) -> Duration;
}

impl<C: PacingClock + ?Sized> PacingClock for Box<C> {
    fn wait(&mut self, duration: Duration) {
        (**self).wait(duration);
    }

    fn elapsed(&self) -> Duration {
        (**self).elapsed()
    }
}

/// Sleeps the calling thread for `duration * time_scale`.
#[derive(Debug, Clone)]
pub struct ThreadClock {
    time_scale: f64,
    modeled: Duration,
}

impl ThreadClock {
    /// Create a clock. `time_scale` 1.0 is real time, 0.0 never sleeps.
    /// Out-of-range factors are clamped; non-finite ones fall back to 1.0.
    pub fn new(time_scale: f64) -> Self {
        Self {
            time_scale: if time_scale.is_finite() {
                time_scale.clamp(0.0, TIME_SCALE_MAX)
            } else {
                1.0
            },
            modeled: Duration::ZERO,
        }
    }

    /// Effective scale factor.
    #[inline]
    pub fn time_scale(&self) -> f64 {
        self.time_scale
    }
}

impl Default for ThreadClock {
    fn default() -> Self {
        Self::new(1.0)
    }
}

impl PacingClock for ThreadClock {
    fn wait(&mut self, duration: Duration) {
        self.modeled += duration;
        let wall = duration.mul_f64(self.time_scale);
        if !wall.is_zero() {
            std::thread::sleep(wall);
        }
    }

    #[inline]
    fn elapsed(&self) -> Duration {
        self.modeled
    }
}

/// Advances modeled time without sleeping.
#[derive(Debug, Clone, Default)]
pub struct SimulatedClock {
    now: Duration,
}

impl SimulatedClock {
    pub fn new() -> Self {
        Self::default()
    }
}

impl PacingClock for SimulatedClock {
    fn wait(&mut self, duration: Duration) {
        self.now += duration;
    }

    #[inline]
    fn elapsed(&self) -> Duration {
        self.now
    }
}
