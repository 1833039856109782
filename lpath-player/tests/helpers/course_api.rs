//! In-memory course API
//!
//! Unlocks the next lesson when one is completed, the way the course server
//! does, so refresh-after-completion is observable.

use async_trait::async_trait;
use lpath_common::api::{
    CourseApi, CourseSummary, Lesson, LessonStatus, Profile, ProfileStats, ProfileUser,
    RecentCompletion, Session, UserProfile,
};
use std::sync::{Arc, Mutex};

#[derive(Default)]
pub struct ApiState {
    pub courses: Vec<CourseSummary>,
    pub lessons: Vec<Lesson>,
    pub completed_calls: Vec<u64>,
    pub path_fetches: usize,
    pub fail_complete: bool,
    pub fail_fetch: bool,
    pub premium: bool,
}

#[derive(Clone, Default)]
pub struct InMemoryApi {
    state: Arc<Mutex<ApiState>>,
}

impl InMemoryApi {
    pub fn with_path(lessons: Vec<Lesson>) -> Self {
        let api = Self::default();
        {
            let mut state = api.state.lock().unwrap();
            state.lessons = lessons;
            state.courses = vec![CourseSummary {
                id: 2,
                title: "Rust Foundations".to_string(),
                description: String::new(),
                difficulty: "beginner".to_string(),
                video_count: 3,
            }];
        }
        api
    }

    pub fn set(&self, f: impl FnOnce(&mut ApiState)) {
        f(&mut self.state.lock().unwrap());
    }

    pub fn completed_calls(&self) -> Vec<u64> {
        self.state.lock().unwrap().completed_calls.clone()
    }

    pub fn path_fetches(&self) -> usize {
        self.state.lock().unwrap().path_fetches
    }
}

#[async_trait]
impl CourseApi for InMemoryApi {
    async fn current_user(&self, _session: &Session) -> lpath_common::Result<UserProfile> {
        Ok(UserProfile {
            id: 1,
            email: "learner@example.com".to_string(),
            is_admin: false,
            is_premium: self.state.lock().unwrap().premium,
        })
    }

    async fn list_courses(&self) -> lpath_common::Result<Vec<CourseSummary>> {
        Ok(self.state.lock().unwrap().courses.clone())
    }

    async fn fetch_path(
        &self,
        _session: &Session,
        _course_id: Option<u64>,
    ) -> lpath_common::Result<Vec<Lesson>> {
        let mut state = self.state.lock().unwrap();
        if state.fail_fetch {
            return Err(lpath_common::Error::Internal("path unavailable".to_string()));
        }
        state.path_fetches += 1;
        Ok(state.lessons.clone())
    }

    async fn complete_lesson(&self, _session: &Session, lesson_id: u64) -> lpath_common::Result<()> {
        let mut state = self.state.lock().unwrap();
        if state.fail_complete {
            return Err(lpath_common::Error::Api {
                status: 500,
                message: "database unavailable".to_string(),
            });
        }
        state.completed_calls.push(lesson_id);

        let Some(index) = state.lessons.iter().position(|l| l.id == lesson_id) else {
            return Err(lpath_common::Error::NotFound(format!("video {}", lesson_id)));
        };
        state.lessons[index].status = LessonStatus::Completed;
        if let Some(next) = state.lessons.get_mut(index + 1) {
            if next.status == LessonStatus::Locked {
                next.status = LessonStatus::Active;
            }
        }
        Ok(())
    }

    async fn profile(&self, session: &Session) -> lpath_common::Result<Profile> {
        let user = self.current_user(session).await?;
        let state = self.state.lock().unwrap();
        let completed: Vec<&Lesson> = state
            .lessons
            .iter()
            .filter(|l| l.status == LessonStatus::Completed)
            .collect();
        let total = state.lessons.len() as u32;
        let percentage = if total > 0 {
            (completed.len() as f64 / total as f64 * 1000.0).round() / 10.0
        } else {
            0.0
        };

        Ok(Profile {
            user: ProfileUser {
                id: user.id,
                email: user.email,
                is_premium: user.is_premium,
                is_admin: user.is_admin,
                created_at: Some("2024-03-05T10:20:30.5".to_string()),
                premium_expires_at: None,
            },
            stats: ProfileStats {
                total_videos: total,
                completed_videos: completed.len() as u32,
                progress_percentage: percentage,
                recent_completions: completed
                    .iter()
                    .rev()
                    .take(5)
                    .map(|l| RecentCompletion {
                        title: l.title.clone(),
                        completed_at: Some("2024-04-01T08:00:00".to_string()),
                    })
                    .collect(),
            },
        })
    }
}
