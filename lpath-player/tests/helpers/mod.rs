//! Test helpers shared by the lpath-player integration tests
//!
//! - InMemoryApi: `CourseApi` backed by a lesson list

// Each test binary uses a different subset
#![allow(dead_code)]

pub mod course_api;

pub use course_api::{ApiState, InMemoryApi};
