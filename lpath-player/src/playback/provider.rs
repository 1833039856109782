//! Embedded video player capability
//!
//! The modal never talks to a concrete widget. Whatever hosts the video
//! (an iframe bridge, a native player, `SimulatedPlayer` in tests) implements
//! `VideoPlayer` and forwards its ready/state-change events as
//! `ModalCommand`s.

use lpath_common::events::PlaybackPhase;

/// Commands and queries the controller issues to the embedded player.
///
/// Times are in seconds. Volume is the provider's 0-100 scale.
pub trait VideoPlayer: Send {
    fn play(&mut self);
    fn pause(&mut self);
    fn seek_to(&mut self, seconds: f64);
    fn mute(&mut self);
    fn unmute(&mut self);
    fn set_volume(&mut self, volume: u8);
    fn current_time(&self) -> f64;
    /// Total length; 0 while the provider has not loaded metadata
    fn duration(&self) -> f64;
}

/// Provider state codes as reported by the embedded player
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProviderState {
    Unstarted,
    Ended,
    Playing,
    Paused,
    Buffering,
    Cued,
    /// Code this controller does not know about
    Unknown(i32),
}

impl ProviderState {
    pub fn from_code(code: i32) -> Self {
        match code {
            -1 => ProviderState::Unstarted,
            0 => ProviderState::Ended,
            1 => ProviderState::Playing,
            2 => ProviderState::Paused,
            3 => ProviderState::Buffering,
            5 => ProviderState::Cued,
            other => ProviderState::Unknown(other),
        }
    }

    pub fn code(self) -> i32 {
        match self {
            ProviderState::Unstarted => -1,
            ProviderState::Ended => 0,
            ProviderState::Playing => 1,
            ProviderState::Paused => 2,
            ProviderState::Buffering => 3,
            ProviderState::Cued => 5,
            ProviderState::Unknown(code) => code,
        }
    }

    /// Phase a bound session moves to on this provider state.
    ///
    /// `None` leaves the phase unchanged. Buffering counts as paused: the
    /// position is not advancing, so sampling and auto-hide stop.
    pub fn target_phase(self) -> Option<PlaybackPhase> {
        match self {
            ProviderState::Unstarted | ProviderState::Cued => Some(PlaybackPhase::Idle),
            ProviderState::Playing => Some(PlaybackPhase::Playing),
            ProviderState::Paused | ProviderState::Buffering => Some(PlaybackPhase::Paused),
            ProviderState::Ended => Some(PlaybackPhase::Ended),
            ProviderState::Unknown(_) => None,
        }
    }
}
