//! # Lesson Path Player Library (lpath-player)
//!
//! Headless video-modal playback for course lessons.
//!
//! **Purpose:** Drive an embedded video player for one lesson at a time,
//! sample its position while playing, auto-hide the transport controls, and
//! report completion back to the course API exactly once per session.
//!
//! **Architecture:** One `VideoModal` task per open lesson; provider events
//! arrive on an unbounded mpsc channel and user input on a bounded one,
//! timers are deadlines in the same `select!`.

pub mod config;
pub mod dashboard;
pub mod error;
pub mod lesson_map;
pub mod playback;
pub mod video_source;

pub use error::{Error, Result};
pub use lesson_map::{LessonMap, WatchOutcome};
