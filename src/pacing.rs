//! Wall-clock pacing of race ticks.

use std::time::{Duration, Instant};

/// Decides when the next race tick is due.
///
/// The race itself never reads the clock: the host asks the clock whether enough time has passed
/// since the previous tick and steps the race when it has.
#[derive(Debug, Clone)]
pub(crate) struct TickClock {
    /// Minimum time between two ticks.
    ///
    /// A zero interval makes every check due, which is what tests use to drive the race
    /// deterministically.
    interval: Duration,
    /// Timestamp of the last tick.
    ///
    /// This field stores when a tick was last handed out, used to space the following one.
    last_update_time: Instant,
    /// Whether ticking is suspended.
    paused: bool,
}

impl TickClock {
    /// Creates a running clock whose first tick is due one interval from now.
    pub(crate) fn new(interval: Duration) -> Self {
        Self {
            interval,
            last_update_time: Instant::now(),
            paused: false,
        }
    }

    /// Whether a tick is due at `now`; if so, the tick is consumed.
    pub(crate) fn due(&mut self, now: Instant) -> bool {
        if self.paused || now.saturating_duration_since(self.last_update_time) < self.interval {
            return false;
        }
        self.last_update_time = now;

        true
    }

    /// Time left at `now` before the next tick is due; [`None`] while paused.
    pub(crate) fn until_due(&self, now: Instant) -> Option<Duration> {
        if self.paused {
            return None;
        }

        Some(
            self.interval
                .saturating_sub(now.saturating_duration_since(self.last_update_time)),
        )
    }

    /// Restarts the interval from `now`, e.g. at the start of a round.
    pub(crate) fn restart(&mut self, now: Instant) {
        self.last_update_time = now;
    }

    /// Suspends a running clock or resumes a suspended one.
    pub(crate) fn toggle_pause(&mut self) {
        self.paused = !self.paused;
    }

    /// Whether ticking is suspended.
    pub(crate) const fn is_paused(&self) -> bool {
        self.paused
    }
}
