//! Lesson map
//!
//! The learning path of one course as seen by the signed-in user. Opens
//! openable lessons in a `VideoModal`, records completion with the course
//! API when the video ends, and re-fetches the path so the next lesson
//! unlocks.

use crate::config::PlayerSettings;
use crate::error::{Error, Result};
use crate::playback::{ModalExit, ModalInbox, VideoModal, VideoPlayer};
use lpath_common::api::{CourseApi, Lesson, PathProgress, Session};
use lpath_common::events::{EventBus, LessonEvent};
use tracing::{debug, error, info};

/// Title shown until the course list has been fetched
pub const LOADING_TITLE: &str = "Loading...";

/// How a `watch` call ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WatchOutcome {
    /// Video ended, completion recorded, modal closed
    Completed,
    /// User closed the modal before completion was recorded
    Closed,
    /// Lesson URL unusable; the modal showed this message instead of a player
    InvalidVideo(&'static str),
    /// Command senders dropped while the modal was open
    Detached,
}

pub struct LessonMap<A: CourseApi> {
    api: A,
    session: Session,
    course_id: Option<u64>,
    course_title: String,
    lessons: Vec<Lesson>,
    settings: PlayerSettings,
    events: EventBus,
}

impl<A: CourseApi> LessonMap<A> {
    pub fn new(
        api: A,
        session: Session,
        course_id: Option<u64>,
        settings: PlayerSettings,
        events: EventBus,
    ) -> Self {
        Self {
            api,
            session,
            course_id,
            course_title: LOADING_TITLE.to_string(),
            lessons: Vec::new(),
            settings,
            events,
        }
    }

    /// Fetch the course title and the path
    pub async fn load(&mut self) -> Result<()> {
        self.load_course_title().await;
        self.refresh().await
    }

    /// Look up the course title; failures keep the current title
    pub async fn load_course_title(&mut self) {
        let Some(course_id) = self.course_id else {
            debug!("No course selected, keeping title {:?}", self.course_title);
            return;
        };

        match self.api.list_courses().await {
            Ok(courses) => match courses.into_iter().find(|c| c.id == course_id) {
                Some(course) => self.course_title = course.title,
                None => debug!("Course {} not in course list", course_id),
            },
            Err(e) => error!("Failed to fetch course title: {}", e),
        }
    }

    /// Re-fetch the path; a session without a token leaves it untouched
    pub async fn refresh(&mut self) -> Result<()> {
        if !self.session.is_authenticated() {
            debug!("Not signed in, skipping path fetch");
            return Ok(());
        }

        self.lessons = self.api.fetch_path(&self.session, self.course_id).await?;
        let progress = self.progress();
        info!("Path loaded: {}", progress);
        self.events.emit_lossy(LessonEvent::PathRefreshed {
            course_id: self.course_id,
            completed: progress.completed,
            total: progress.total,
        });
        Ok(())
    }

    pub fn course_id(&self) -> Option<u64> {
        self.course_id
    }

    pub fn course_title(&self) -> &str {
        &self.course_title
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn lessons(&self) -> &[Lesson] {
        &self.lessons
    }

    pub fn lesson(&self, lesson_id: u64) -> Option<&Lesson> {
        self.lessons.iter().find(|l| l.id == lesson_id)
    }

    pub fn progress(&self) -> PathProgress {
        PathProgress::from_lessons(&self.lessons)
    }

    /// Lesson to open in the modal; locked lessons are refused
    pub fn select(&self, lesson_id: u64) -> Result<&Lesson> {
        let lesson = self
            .lesson(lesson_id)
            .ok_or(Error::LessonNotFound(lesson_id))?;
        if !lesson.status.is_openable() {
            return Err(Error::LessonLocked(lesson_id));
        }
        Ok(lesson)
    }

    /// Tell the course API the lesson was watched, then re-fetch the path.
    ///
    /// Only the completion call can fail; a failed re-fetch is logged and the
    /// previous path is kept.
    pub async fn record_completion(&mut self, lesson_id: u64) -> Result<()> {
        self.api.complete_lesson(&self.session, lesson_id).await?;
        info!("Progress saved for lesson {}", lesson_id);
        self.events.emit_lossy(LessonEvent::ProgressRecorded {
            lesson_id,
            timestamp: chrono::Utc::now(),
        });

        if let Err(e) = self.refresh().await {
            error!("Failed to refresh path after completion: {}", e);
        }
        Ok(())
    }

    /// Open `lesson_id` in a video modal fed by `inbox` and run it.
    ///
    /// On completion the progress is recorded and the modal closed. If
    /// recording fails the modal stays open and keeps consuming commands
    /// until the user closes it.
    pub async fn watch<P: VideoPlayer>(
        &mut self,
        lesson_id: u64,
        inbox: &mut ModalInbox<P>,
    ) -> Result<WatchOutcome> {
        let lesson = self.select(lesson_id)?.clone();
        let mut modal: VideoModal<P> =
            VideoModal::open(&lesson, &self.settings, self.events.clone());
        if let Some(message) = modal.fallback_message() {
            return Ok(WatchOutcome::InvalidVideo(message));
        }
        info!("Watching lesson {}: {}", lesson.id, modal.title());

        loop {
            match modal.run(inbox).await {
                ModalExit::Completed => match self.record_completion(lesson_id).await {
                    Ok(()) => {
                        modal.close();
                        return Ok(WatchOutcome::Completed);
                    }
                    Err(e) => error!("Failed to save progress: {}", e),
                },
                ModalExit::Closed => return Ok(WatchOutcome::Closed),
                ModalExit::Detached => return Ok(WatchOutcome::Detached),
            }
        }
    }
}
