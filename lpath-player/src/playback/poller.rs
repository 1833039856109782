//! Progress poller
//!
//! Keeps the single "next sample" deadline for the position poll. The
//! controller arms it when playback starts and disarms it whenever playback
//! leaves the playing phase; the modal loop sleeps until the deadline and
//! asks the controller to sample.

use std::time::Duration;
use tokio::time::Instant;

#[derive(Debug, Clone)]
pub struct ProgressPoller {
    interval: Duration,
    next_sample: Option<Instant>,
}

impl ProgressPoller {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            next_sample: None,
        }
    }

    /// Arm if `active`, disarm otherwise.
    ///
    /// Arming an already armed poller keeps its deadline, so repeated
    /// "playing" notifications do not postpone the next sample.
    pub fn sync(&mut self, active: bool, now: Instant) {
        if !active {
            self.next_sample = None;
        } else if self.next_sample.is_none() {
            self.next_sample = Some(now + self.interval);
        }
    }

    pub fn is_armed(&self) -> bool {
        self.next_sample.is_some()
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.next_sample
    }

    /// Record a sample taken at `now` and schedule the next one
    pub fn sampled(&mut self, now: Instant) {
        if self.next_sample.is_some() {
            self.next_sample = Some(now + self.interval);
        }
    }
}
