//! Course API request/response types
//!
//! Field names follow the JSON served by the course API.

use serde::{Deserialize, Serialize};

// ========================================
// Lessons
// ========================================

/// Per-user status of a lesson, decided by the server
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LessonStatus {
    /// Previous lessons not finished yet
    Locked,
    /// Next lesson to watch (or rewatchable)
    Active,
    /// Watched to the end
    Completed,
}

impl LessonStatus {
    /// Whether the lesson map may open this lesson in the video modal
    pub fn is_openable(self) -> bool {
        !matches!(self, LessonStatus::Locked)
    }

    /// Caption shown under the lesson title
    pub fn caption(self) -> &'static str {
        match self {
            LessonStatus::Locked => "Locked",
            LessonStatus::Active => "Ready to watch",
            LessonStatus::Completed => "✓ Completed",
        }
    }
}

impl std::fmt::Display for LessonStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LessonStatus::Locked => write!(f, "locked"),
            LessonStatus::Active => write!(f, "active"),
            LessonStatus::Completed => write!(f, "completed"),
        }
    }
}

/// One node of a learning path
///
/// # Examples
///
/// ```
/// use lpath_common::api::types::{Lesson, LessonStatus};
///
/// let lesson: Lesson = serde_json::from_str(
///     r#"{"id": 7, "title": "Intro", "status": "active", "video_url": "https://youtu.be/dQw4w9WgXcQ"}"#,
/// ).unwrap();
/// assert_eq!(lesson.status, LessonStatus::Active);
/// assert_eq!((lesson.x, lesson.y), (0, 0));
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Lesson {
    pub id: u64,
    pub title: String,
    pub status: LessonStatus,
    /// Map coordinates (server default 0)
    #[serde(default)]
    pub x: i32,
    #[serde(default)]
    pub y: i32,
    pub video_url: String,
}

/// Body of `POST /progress/complete`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CompleteLessonRequest {
    pub video_id: u64,
}

// ========================================
// Courses and users
// ========================================

/// Entry of `GET /courses`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CourseSummary {
    pub id: u64,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub difficulty: String,
    #[serde(default)]
    pub video_count: u32,
}

/// Response of `GET /auth/me`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct UserProfile {
    pub id: u64,
    pub email: String,
    #[serde(default)]
    pub is_admin: bool,
    #[serde(default)]
    pub is_premium: bool,
}

/// Response of `GET /profile`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Profile {
    pub user: ProfileUser,
    pub stats: ProfileStats,
}

/// Account details inside `Profile`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ProfileUser {
    pub id: u64,
    pub email: String,
    #[serde(default)]
    pub is_premium: bool,
    #[serde(default)]
    pub is_admin: bool,
    /// Server timestamp, ISO 8601 without offset
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub premium_expires_at: Option<String>,
}

/// Progress across every lesson of every course
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct ProfileStats {
    pub total_videos: u32,
    pub completed_videos: u32,
    /// Rounded to one decimal by the server
    pub progress_percentage: f64,
    /// Newest first, at most five
    #[serde(default)]
    pub recent_completions: Vec<RecentCompletion>,
}

impl ProfileStats {
    /// Lessons left to watch
    pub fn remaining(&self) -> u32 {
        self.total_videos.saturating_sub(self.completed_videos)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RecentCompletion {
    pub title: String,
    #[serde(default)]
    pub completed_at: Option<String>,
}

// ========================================
// Derived progress
// ========================================

/// Completion summary of a path
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PathProgress {
    pub completed: usize,
    pub total: usize,
    /// `completed / total * 100`, 0 for an empty path
    pub percent: f64,
}

impl PathProgress {
    pub fn from_lessons(lessons: &[Lesson]) -> Self {
        let total = lessons.len();
        let completed = lessons
            .iter()
            .filter(|l| l.status == LessonStatus::Completed)
            .count();
        let percent = if total > 0 {
            completed as f64 / total as f64 * 100.0
        } else {
            0.0
        };

        Self {
            completed,
            total,
            percent,
        }
    }
}

impl std::fmt::Display for PathProgress {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} of {} lessons completed", self.completed, self.total)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lesson(id: u64, status: LessonStatus) -> Lesson {
        Lesson {
            id,
            title: format!("Lesson {}", id),
            status,
            x: 0,
            y: 0,
            video_url: String::new(),
        }
    }

    #[test]
    fn test_status_wire_format() {
        let statuses: Vec<LessonStatus> =
            serde_json::from_str(r#"["locked", "active", "completed"]"#).unwrap();
        assert_eq!(
            statuses,
            vec![LessonStatus::Locked, LessonStatus::Active, LessonStatus::Completed]
        );
        assert!(serde_json::from_str::<LessonStatus>(r#""Locked""#).is_err());
    }

    #[test]
    fn test_only_locked_is_not_openable() {
        assert!(!LessonStatus::Locked.is_openable());
        assert!(LessonStatus::Active.is_openable());
        assert!(LessonStatus::Completed.is_openable());
    }

    #[test]
    fn test_path_progress() {
        let lessons = vec![
            lesson(1, LessonStatus::Completed),
            lesson(2, LessonStatus::Completed),
            lesson(3, LessonStatus::Active),
            lesson(4, LessonStatus::Locked),
        ];
        let progress = PathProgress::from_lessons(&lessons);
        assert_eq!(progress.completed, 2);
        assert_eq!(progress.total, 4);
        assert!((progress.percent - 50.0).abs() < f64::EPSILON);
        assert_eq!(progress.to_string(), "2 of 4 lessons completed");
    }

    #[test]
    fn test_empty_path_progress_is_zero() {
        let progress = PathProgress::from_lessons(&[]);
        assert_eq!(progress, PathProgress::default());
    }

    #[test]
    fn test_user_profile_flags_default_false() {
        let user: UserProfile = serde_json::from_str(r#"{"id": 1, "email": "a@b.c"}"#).unwrap();
        assert!(!user.is_admin);
        assert!(!user.is_premium);
    }

    #[test]
    fn test_profile_wire_format() {
        let profile: Profile = serde_json::from_str(
            r#"{
                "user": {"id": 3, "email": "a@b.c", "is_premium": false, "is_admin": false,
                         "created_at": "2024-03-05T10:20:30.123456", "premium_expires_at": null},
                "stats": {"total_videos": 12, "completed_videos": 5, "progress_percentage": 41.7,
                          "recent_completions": [{"title": "Borrowing", "completed_at": "2024-04-01T08:00:00"}]}
            }"#,
        )
        .unwrap();
        assert_eq!(profile.user.premium_expires_at, None);
        assert_eq!(profile.stats.remaining(), 7);
        assert_eq!(profile.stats.recent_completions[0].title, "Borrowing");
    }

    #[test]
    fn test_remaining_never_underflows() {
        let stats = ProfileStats {
            total_videos: 2,
            completed_videos: 3,
            ..Default::default()
        };
        assert_eq!(stats.remaining(), 0);
    }
}
