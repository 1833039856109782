//! Clock-driven stand-in for the embedded video player
//!
//! Plays a video of fixed duration against the tokio clock and reports
//! provider state codes (1 playing, 2 paused, 0 ended) through a
//! `ProviderSink`. Used by the `watch` CLI command and by tests; with a
//! paused test clock a full lesson "plays" instantly.
//!
//! `play` and `seek_to` schedule the end-of-video report with
//! `tokio::spawn`, so they must run inside a tokio runtime.

use super::modal::ProviderSink;
use super::provider::{ProviderState, VideoPlayer};
use crate::error::{Error, Result};
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::Instant;

/// Longest video the simulated player accepts (24 h)
pub const MAX_SIMULATED_DURATION: f64 = 86_400.0;

pub struct SimulatedPlayer {
    duration: f64,
    /// Position at `started_at` (or the frozen position while paused)
    base: f64,
    started_at: Option<Instant>,
    sink: ProviderSink,
    end_timer: Option<JoinHandle<()>>,
}

impl SimulatedPlayer {
    /// Fails unless `duration` is within `0..=MAX_SIMULATED_DURATION`
    pub fn new(duration: f64, sink: ProviderSink) -> Result<Self> {
        if !(0.0..=MAX_SIMULATED_DURATION).contains(&duration) {
            return Err(Error::InvalidDuration(duration));
        }
        Ok(Self {
            duration,
            base: 0.0,
            started_at: None,
            sink,
            end_timer: None,
        })
    }

    fn report(&self, state: ProviderState) {
        (self.sink)(state.code());
    }

    fn cancel_end_timer(&mut self) {
        if let Some(timer) = self.end_timer.take() {
            timer.abort();
        }
    }

    /// (Re)schedule the ended report from the current position
    fn schedule_end(&mut self) {
        self.cancel_end_timer();
        let remaining = (self.duration - self.current_time()).max(0.0);
        let sink = self.sink.clone();
        self.end_timer = Some(tokio::spawn(async move {
            tokio::time::sleep(Duration::from_secs_f64(remaining)).await;
            sink(ProviderState::Ended.code());
        }));
    }

    fn freeze(&mut self) {
        self.base = self.current_time();
        self.started_at = None;
    }
}

impl VideoPlayer for SimulatedPlayer {
    fn play(&mut self) {
        if self.current_time() >= self.duration {
            // Replay from the start after the end
            self.base = 0.0;
        } else {
            self.base = self.current_time();
        }
        self.started_at = Some(Instant::now());
        self.report(ProviderState::Playing);
        self.schedule_end();
    }

    fn pause(&mut self) {
        self.freeze();
        self.cancel_end_timer();
        self.report(ProviderState::Paused);
    }

    fn seek_to(&mut self, seconds: f64) {
        self.base = seconds.clamp(0.0, self.duration);
        if self.started_at.is_some() {
            self.started_at = Some(Instant::now());
            self.schedule_end();
        }
    }

    // No audio to attenuate
    fn mute(&mut self) {}

    fn unmute(&mut self) {}

    fn set_volume(&mut self, _volume: u8) {}

    fn current_time(&self) -> f64 {
        let elapsed = self
            .started_at
            .map(|t| t.elapsed().as_secs_f64())
            .unwrap_or(0.0);
        (self.base + elapsed).min(self.duration)
    }

    fn duration(&self) -> f64 {
        self.duration
    }
}

impl Drop for SimulatedPlayer {
    fn drop(&mut self) {
        self.cancel_end_timer();
    }
}
