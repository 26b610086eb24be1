//! Repeating timers driven by the event loop.
//!
//! Timers hold no thread. The loop asks each one how long it may sleep and
//! polls it with the current instant after waking.

use std::time::{Duration, Instant};

/// A stoppable fixed-interval timer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepeatingTimer {
    interval: Duration,
    next_due: Option<Instant>,
}

impl RepeatingTimer {
    /// Stopped timer with the given period.
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            next_due: None,
        }
    }

    /// Arm the timer; the first fire is one interval after `now`.
    pub fn start(&mut self, now: Instant) {
        self.next_due = Some(now + self.interval);
    }

    /// Disarm the timer. Pending fires are dropped.
    pub fn stop(&mut self) {
        self.next_due = None;
    }

    /// Whether the timer is armed.
    pub fn is_active(&self) -> bool {
        self.next_due.is_some()
    }

    /// Period between fires.
    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// True if the timer fired at or before `now`. Re-arms for the next period.
    ///
    /// Fires missed while the loop was busy collapse into one.
    pub fn poll(&mut self, now: Instant) -> bool {
        match self.next_due {
            Some(due) if due <= now => {
                let mut next = due + self.interval;
                if next <= now {
                    next = now + self.interval;
                }
                self.next_due = Some(next);
                true
            }
            _ => false,
        }
    }

    /// Time until the next fire, or `None` when stopped.
    pub fn time_until(&self, now: Instant) -> Option<Duration> {
        self.next_due.map(|due| due.saturating_duration_since(now))
    }
}
