//! Playback controller
//!
//! Owns the playback session of one video modal and the single embedded
//! player handle bound to it. Provider events move the session through
//! `PlaybackPhase`; user commands are forwarded to the player. Commands that
//! arrive before the player is ready are dropped, not queued.

use super::controls::ControlsAutoHide;
use super::poller::ProgressPoller;
use super::provider::{ProviderState, VideoPlayer};
use super::session::{MuteAction, PlaybackSession, PlaybackSnapshot};
use crate::config::PlayerSettings;
use crate::error::Result;
use lpath_common::events::{EventBus, LessonEvent, PlaybackPhase};
use tokio::time::Instant;
use tracing::{debug, info, warn};

pub struct PlaybackController<P: VideoPlayer> {
    player: Option<P>,
    session: PlaybackSession,
    poller: ProgressPoller,
    controls: ControlsAutoHide,
    settings: PlayerSettings,
    events: EventBus,
}

impl<P: VideoPlayer> PlaybackController<P> {
    pub fn new(lesson_id: u64, settings: &PlayerSettings, events: EventBus) -> Self {
        Self {
            player: None,
            session: PlaybackSession::new(lesson_id, settings.initial_volume),
            poller: ProgressPoller::new(settings.progress_poll_interval()),
            controls: ControlsAutoHide::new(settings.controls_hide_delay()),
            settings: settings.clone(),
            events,
        }
    }

    // ========================================
    // Provider events
    // ========================================

    /// Player reported ready: bind it, read duration, auto-play.
    ///
    /// A second ready event keeps the first handle.
    pub fn on_ready(&mut self, mut player: P) {
        if self.player.is_some() {
            warn!(
                "Lesson {}: ignoring duplicate player ready event",
                self.session.lesson_id()
            );
            return;
        }

        self.session.set_duration(player.duration());
        player.set_volume(self.session.volume());
        if self.session.is_muted() {
            player.mute();
        }
        if self.settings.autoplay {
            player.play();
        }
        self.player = Some(player);

        info!(
            "Lesson {}: player ready (duration {:.1}s)",
            self.session.lesson_id(),
            self.session.duration()
        );
        self.transition(PlaybackPhase::Idle);
    }

    /// Provider state change.
    ///
    /// Returns true when this event completed the lesson (first natural end
    /// of the session).
    pub fn on_state_change(&mut self, code: i32) -> bool {
        if self.player.is_none() {
            debug!("Ignoring provider state {} before ready", code);
            return false;
        }

        let state = ProviderState::from_code(code);
        let Some(phase) = state.target_phase() else {
            debug!("Ignoring unknown provider state {}", code);
            return false;
        };
        self.transition(phase);

        if phase == PlaybackPhase::Ended && self.session.mark_completed() {
            info!("Lesson {} completed", self.session.lesson_id());
            self.events.emit_lossy(LessonEvent::LessonCompleted {
                session_id: self.session.id(),
                lesson_id: self.session.lesson_id(),
                timestamp: chrono::Utc::now(),
            });
            return true;
        }
        false
    }

    fn transition(&mut self, phase: PlaybackPhase) {
        let old_phase = self.session.set_phase(phase);
        self.poller
            .sync(self.session.is_playing() && self.player.is_some(), Instant::now());

        if old_phase != phase {
            debug!(
                "Lesson {}: {} -> {}",
                self.session.lesson_id(),
                old_phase,
                phase
            );
            self.events.emit_lossy(LessonEvent::PhaseChanged {
                session_id: self.session.id(),
                lesson_id: self.session.lesson_id(),
                old_phase,
                new_phase: phase,
                timestamp: chrono::Utc::now(),
            });
        }
    }

    // ========================================
    // User commands
    // ========================================

    pub fn toggle_play(&mut self) {
        let Some(player) = self.player.as_mut() else {
            debug!("Ignoring play/pause before ready");
            return;
        };
        if self.session.is_playing() {
            player.pause();
        } else {
            player.play();
        }
    }

    /// Jump to `seconds` and show it immediately; the next sample confirms.
    pub fn seek(&mut self, seconds: f64) -> Result<()> {
        let Some(player) = self.player.as_mut() else {
            debug!("Ignoring seek before ready");
            return Ok(());
        };
        let target = self.session.resolve_seek(seconds, self.settings.seek_policy)?;
        player.seek_to(target);
        self.session.set_position(target);
        Ok(())
    }

    pub fn toggle_mute(&mut self) {
        let Some(player) = self.player.as_mut() else {
            debug!("Ignoring mute toggle before ready");
            return;
        };
        match self.session.toggle_mute() {
            MuteAction::Mute => player.mute(),
            MuteAction::Unmute { volume } => {
                player.unmute();
                player.set_volume(volume);
            }
        }
    }

    pub fn set_volume(&mut self, volume: u8) {
        let Some(player) = self.player.as_mut() else {
            debug!("Ignoring volume change before ready");
            return;
        };
        let unmute = self.session.set_volume(volume);
        player.set_volume(self.session.volume());
        if unmute {
            player.unmute();
        }
    }

    pub fn pointer_moved(&mut self) {
        self.controls.pointer_moved(Instant::now());
    }

    pub fn pointer_left(&mut self) {
        self.controls.pointer_left(self.session.is_playing());
    }

    // ========================================
    // Timers
    // ========================================

    /// Next position sample, while armed
    pub fn poll_deadline(&self) -> Option<Instant> {
        self.poller.deadline()
    }

    /// Pending controls hide, if any
    pub fn controls_deadline(&self) -> Option<Instant> {
        self.controls.deadline()
    }

    /// Sample the player position into the session
    pub fn sample_progress(&mut self) {
        let Some(player) = self.player.as_ref() else {
            return;
        };
        if !self.poller.is_armed() {
            return;
        }

        if self.session.duration() <= 0.0 {
            self.session.set_duration(player.duration());
        }
        self.session.set_position(player.current_time());
        self.poller.sampled(Instant::now());

        self.events.emit_lossy(LessonEvent::PositionSampled {
            session_id: self.session.id(),
            lesson_id: self.session.lesson_id(),
            position: self.session.current_time(),
            duration: self.session.duration(),
        });
    }

    /// Hide deadline reached
    pub fn controls_deadline_elapsed(&mut self) {
        if self
            .controls
            .on_deadline(Instant::now(), self.session.is_playing())
        {
            debug!("Lesson {}: controls hidden", self.session.lesson_id());
        }
    }

    // ========================================
    // Accessors
    // ========================================

    pub fn session(&self) -> &PlaybackSession {
        &self.session
    }

    pub fn phase(&self) -> PlaybackPhase {
        self.session.phase()
    }

    pub fn is_playing(&self) -> bool {
        self.session.is_playing()
    }

    pub fn controls_visible(&self) -> bool {
        self.controls.is_visible()
    }

    pub fn is_polling(&self) -> bool {
        self.poller.is_armed()
    }

    pub fn has_player(&self) -> bool {
        self.player.is_some()
    }

    pub fn player(&self) -> Option<&P> {
        self.player.as_ref()
    }

    pub fn snapshot(&self) -> PlaybackSnapshot {
        PlaybackSnapshot::capture(&self.session, self.controls.is_visible())
    }

    /// Release the player handle, ending the session
    pub fn into_player(self) -> Option<P> {
        self.player
    }
}
