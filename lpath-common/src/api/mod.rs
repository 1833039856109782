//! Course API access
//!
//! Shared types served by the course API, the explicit `Session` credential
//! object, and the `CourseApi` trait with its HTTP implementation.
//!
//! # Design Principle
//!
//! Nothing here is global. A `Session` is created once (from CLI/config or a
//! login) and passed to whoever needs to talk to the API.

pub mod client;
pub mod session;
pub mod types;

pub use client::{CourseApi, HttpCourseApi};
pub use session::Session;
pub use types::{
    CompleteLessonRequest, CourseSummary, Lesson, LessonStatus, PathProgress, Profile,
    ProfileStats, ProfileUser, RecentCompletion, UserProfile,
};
