//! Frame timing.
//!
//! The render loop asks a [`FrameScheduler`] whether a frame is due instead
//! of sleeping on its own, so tests can drive it with a [`ManualClock`].

use std::cell::Cell;
use std::time::{Duration, Instant};

/// Monotonic time source measured from an arbitrary start.
pub trait Clock {
    fn now(&self) -> Duration;
}

/// Wall-clock time since construction.
#[derive(Debug, Clone, Copy)]
pub struct SystemClock {
    start: Instant,
}

impl SystemClock {
    pub fn new() -> Self {
        Self {
            start: Instant::now(),
        }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for SystemClock {
    fn now(&self) -> Duration {
        self.start.elapsed()
    }
}

/// A clock that only moves when told to.
#[derive(Debug, Default)]
pub struct ManualClock {
    now: Cell<Duration>,
}

impl ManualClock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn advance(&self, by: Duration) {
        self.now.set(self.now.get() + by);
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Duration {
        self.now.get()
    }
}

impl<C: Clock + ?Sized> Clock for &C {
    fn now(&self) -> Duration {
        (**self).now()
    }
}

/// Hands out at most one frame per call, spaced by the frame interval.
///
/// When the loop falls behind, missed frames are dropped rather than
/// replayed back to back.
#[derive(Debug)]
pub struct FrameScheduler<C: Clock> {
    clock: C,
    interval: Duration,
    next_due: Duration,
}

impl<C: Clock> FrameScheduler<C> {
    /// Schedule `frame_rate` frames per second; the first frame is due
    /// immediately. A zero rate is treated as one frame per second.
    pub fn new(clock: C, frame_rate: u32) -> Self {
        let interval = Duration::from_secs(1) / frame_rate.max(1);
        let next_due = clock.now();
        Self {
            clock,
            interval,
            next_due,
        }
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Returns `true` if a frame is due, consuming it.
    pub fn poll(&mut self) -> bool {
        let now = self.clock.now();
        if now < self.next_due {
            return false;
        }
        self.next_due += self.interval;
        if self.next_due <= now {
            self.next_due = now + self.interval;
        }
        true
    }

    /// Time left until the next frame is due.
    pub fn time_until_next(&self) -> Duration {
        self.next_due.saturating_sub(self.clock.now())
    }
}
