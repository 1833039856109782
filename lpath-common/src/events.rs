//! Event types and EventBus for the lesson-path crates
//!
//! The video modal and the lesson map report what happened through a
//! `tokio::sync::broadcast` bus. Observers (loggers, the CLI progress
//! printer, tests) subscribe; nobody is required to listen.

use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;
use uuid::Uuid;

// ========================================
// Playback phase
// ========================================

/// Phase of a playback session.
///
/// `Unready` until the embedded player reports ready, then driven by
/// provider state codes.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum PlaybackPhase {
    /// No player handle bound yet
    #[default]
    Unready,
    /// Player bound, not started (or cued)
    Idle,
    /// Video is playing
    Playing,
    /// Paused by the user or stalled while buffering
    Paused,
    /// Video reached its natural end
    Ended,
}

impl std::fmt::Display for PlaybackPhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PlaybackPhase::Unready => write!(f, "unready"),
            PlaybackPhase::Idle => write!(f, "idle"),
            PlaybackPhase::Playing => write!(f, "playing"),
            PlaybackPhase::Paused => write!(f, "paused"),
            PlaybackPhase::Ended => write!(f, "ended"),
        }
    }
}

// ========================================
// Events
// ========================================

/// Lesson-path event types
///
/// Modal events carry the playback `session_id` so observers can tell two
/// openings of the same lesson apart.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type")]
pub enum LessonEvent {
    /// Playback phase changed
    PhaseChanged {
        session_id: Uuid,
        lesson_id: u64,
        old_phase: PlaybackPhase,
        new_phase: PlaybackPhase,
        timestamp: chrono::DateTime<chrono::Utc>,
    },

    /// Progress poller sampled the player position
    PositionSampled {
        session_id: Uuid,
        lesson_id: u64,
        /// Position in seconds
        position: f64,
        /// Duration in seconds (0 while unknown)
        duration: f64,
    },

    /// Video reached its natural end (fired once per session)
    LessonCompleted {
        session_id: Uuid,
        lesson_id: u64,
        timestamp: chrono::DateTime<chrono::Utc>,
    },

    /// User dismissed the modal
    ModalClosed { session_id: Uuid, lesson_id: u64 },

    /// Completion was accepted by the course API
    ProgressRecorded {
        lesson_id: u64,
        timestamp: chrono::DateTime<chrono::Utc>,
    },

    /// Lesson path was re-fetched
    PathRefreshed {
        course_id: Option<u64>,
        completed: usize,
        total: usize,
    },
}

// ========================================
// EventBus
// ========================================

/// Broadcast bus for `LessonEvent`s
///
/// Emission never fails: events sent while nobody is subscribed are dropped.
#[derive(Clone)]
pub struct EventBus {
    tx: broadcast::Sender<LessonEvent>,
}

impl EventBus {
    /// Creates a new EventBus with specified channel capacity
    ///
    /// # Examples
    ///
    /// ```
    /// use lpath_common::events::{EventBus, LessonEvent};
    ///
    /// let event_bus = EventBus::new(100);
    /// let mut rx = event_bus.subscribe();
    /// event_bus.emit_lossy(LessonEvent::PathRefreshed { course_id: None, completed: 0, total: 0 });
    /// assert!(rx.try_recv().is_ok());
    /// ```
    pub fn new(capacity: usize) -> Self {
        let (tx, _) = broadcast::channel(capacity);
        Self { tx }
    }

    /// Subscribe to all future events
    pub fn subscribe(&self) -> broadcast::Receiver<LessonEvent> {
        self.tx.subscribe()
    }

    /// Emit an event, ignoring if no subscribers are listening
    pub fn emit_lossy(&self, event: LessonEvent) {
        let _ = self.tx.send(event);
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new(256)
    }
}
