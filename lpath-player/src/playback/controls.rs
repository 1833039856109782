//! Controls auto-hide timer
//!
//! Transport controls are visible until the pointer has been still for the
//! hide delay while the video plays. At most one hide deadline is pending;
//! every visibility change replaces or clears it.

use std::time::Duration;
use tokio::time::Instant;

#[derive(Debug, Clone)]
pub struct ControlsAutoHide {
    delay: Duration,
    visible: bool,
    hide_at: Option<Instant>,
}

impl ControlsAutoHide {
    /// Controls start visible with no countdown running
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            visible: true,
            hide_at: None,
        }
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.hide_at
    }

    /// Pointer moved over the video surface: show and restart the countdown
    pub fn pointer_moved(&mut self, now: Instant) {
        self.visible = true;
        self.hide_at = Some(now + self.delay);
    }

    /// Pointer left the surface: hide at once if playing
    pub fn pointer_left(&mut self, playing: bool) {
        if playing {
            self.visible = false;
            self.hide_at = None;
        }
    }

    /// Countdown check; hides only if playback is still active.
    ///
    /// Returns true when visibility changed.
    pub fn on_deadline(&mut self, now: Instant, playing: bool) -> bool {
        match self.hide_at {
            Some(at) if at <= now => {
                self.hide_at = None;
                if playing && self.visible {
                    self.visible = false;
                    return true;
                }
                false
            }
            _ => false,
        }
    }
}
