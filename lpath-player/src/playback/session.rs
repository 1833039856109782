//! Playback session state
//!
//! Mutable state of one open video modal: phase, position, duration and the
//! volume/mute pair. Pure bookkeeping; the controller decides which player
//! commands to issue from the values returned here.

use crate::config::SeekPolicy;
use crate::error::{Error, Result};
use lpath_common::events::PlaybackPhase;
use lpath_common::human_time::format_position_label;
use serde::Serialize;
use uuid::Uuid;

/// Highest value of the volume slider
pub const MAX_VOLUME: u8 = 100;

/// Player commands needed after a mute toggle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum MuteAction {
    Mute,
    /// Unmute and push this volume back to the player
    Unmute { volume: u8 },
}

#[derive(Debug, Clone)]
pub struct PlaybackSession {
    id: Uuid,
    lesson_id: u64,
    phase: PlaybackPhase,
    current_time: f64,
    duration: f64,
    volume: u8,
    muted: bool,
    /// Last non-zero slider value, restored when unmuting from 0
    restore_volume: u8,
    completion_fired: bool,
}

impl PlaybackSession {
    pub fn new(lesson_id: u64, initial_volume: u8) -> Self {
        let volume = initial_volume.min(MAX_VOLUME);
        Self {
            id: Uuid::new_v4(),
            lesson_id,
            phase: PlaybackPhase::Unready,
            current_time: 0.0,
            duration: 0.0,
            volume,
            muted: volume == 0,
            restore_volume: if volume > 0 { volume } else { MAX_VOLUME },
            completion_fired: false,
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn lesson_id(&self) -> u64 {
        self.lesson_id
    }

    pub fn phase(&self) -> PlaybackPhase {
        self.phase
    }

    pub fn is_playing(&self) -> bool {
        self.phase == PlaybackPhase::Playing
    }

    pub fn current_time(&self) -> f64 {
        self.current_time
    }

    pub fn duration(&self) -> f64 {
        self.duration
    }

    pub fn volume(&self) -> u8 {
        self.volume
    }

    pub fn is_muted(&self) -> bool {
        self.muted
    }

    pub fn completion_fired(&self) -> bool {
        self.completion_fired
    }

    /// Returns the previous phase
    pub(crate) fn set_phase(&mut self, phase: PlaybackPhase) -> PlaybackPhase {
        std::mem::replace(&mut self.phase, phase)
    }

    /// Latch completion; true only the first time
    pub(crate) fn mark_completed(&mut self) -> bool {
        !std::mem::replace(&mut self.completion_fired, true)
    }

    /// Negative or non-finite durations are stored as unknown (0)
    pub(crate) fn set_duration(&mut self, duration: f64) {
        self.duration = if duration.is_finite() && duration > 0.0 {
            duration
        } else {
            0.0
        };
        self.current_time = self.clamp_position(self.current_time);
    }

    /// Store a position, keeping `0 <= current_time <= duration`
    pub(crate) fn set_position(&mut self, seconds: f64) {
        self.current_time = self.clamp_position(seconds);
    }

    fn clamp_position(&self, seconds: f64) -> f64 {
        if !seconds.is_finite() {
            return self.current_time;
        }
        let upper = if self.duration > 0.0 { self.duration } else { f64::MAX };
        seconds.clamp(0.0, upper)
    }

    /// Resolve a seek target under `policy`.
    ///
    /// While the duration is unknown only the lower bound applies.
    pub(crate) fn resolve_seek(&self, target: f64, policy: SeekPolicy) -> Result<f64> {
        if !target.is_finite() {
            return Err(Error::InvalidSeek(target));
        }

        let in_range = target >= 0.0 && (self.duration <= 0.0 || target <= self.duration);
        match policy {
            SeekPolicy::Clamp => Ok(self.clamp_position(target)),
            SeekPolicy::Reject if in_range => Ok(target),
            SeekPolicy::Reject => Err(Error::SeekOutOfRange {
                requested: target,
                duration: self.duration,
            }),
        }
    }

    pub(crate) fn toggle_mute(&mut self) -> MuteAction {
        if self.muted {
            if self.volume == 0 {
                self.volume = self.restore_volume;
            }
            self.muted = false;
            MuteAction::Unmute {
                volume: self.volume,
            }
        } else {
            self.muted = true;
            MuteAction::Mute
        }
    }

    /// Apply a slider value; returns true when the player must be unmuted.
    ///
    /// Zero mutes implicitly, any positive value while muted unmutes.
    pub(crate) fn set_volume(&mut self, volume: u8) -> bool {
        let volume = volume.min(MAX_VOLUME);
        self.volume = volume;

        if volume == 0 {
            self.muted = true;
            return false;
        }

        self.restore_volume = volume;
        if self.muted {
            self.muted = false;
            return true;
        }
        false
    }

    /// Progress bar fill, 0 while the duration is unknown
    pub fn progress_percent(&self) -> f64 {
        if self.duration > 0.0 {
            self.current_time / self.duration * 100.0
        } else {
            0.0
        }
    }

    /// Value the volume slider displays (0 while muted)
    pub fn volume_slider_value(&self) -> u8 {
        if self.muted {
            0
        } else {
            self.volume
        }
    }

    /// Whether the transport shows the muted speaker icon
    pub fn shows_muted_icon(&self) -> bool {
        self.muted || self.volume == 0
    }
}

/// Read-only view of a session for rendering and logging
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlaybackSnapshot {
    pub session_id: Uuid,
    pub lesson_id: u64,
    pub phase: PlaybackPhase,
    pub is_playing: bool,
    pub current_time: f64,
    pub duration: f64,
    pub volume: u8,
    pub is_muted: bool,
    pub controls_visible: bool,
    pub progress_percent: f64,
    pub volume_slider_value: u8,
    pub position_label: String,
}

impl PlaybackSnapshot {
    pub(crate) fn capture(session: &PlaybackSession, controls_visible: bool) -> Self {
        Self {
            session_id: session.id,
            lesson_id: session.lesson_id,
            phase: session.phase,
            is_playing: session.is_playing(),
            current_time: session.current_time,
            duration: session.duration,
            volume: session.volume,
            is_muted: session.muted,
            controls_visible,
            progress_percent: session.progress_percent(),
            volume_slider_value: session.volume_slider_value(),
            position_label: format_position_label(session.current_time, session.duration),
        }
    }
}
