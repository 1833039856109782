//! # Lesson Path Common Library
//!
//! Shared code for the lesson-path crates including:
//! - Lesson, course and user types served by the course API
//! - The explicit `Session` credential object
//! - The `CourseApi` trait and its HTTP implementation
//! - Event types (`LessonEvent`) and the `EventBus`
//! - Bootstrap configuration loading
//! - Clock formatting for playback labels

pub mod api;
pub mod config;
pub mod error;
pub mod events;
pub mod human_time;

pub use error::{Error, Result};
