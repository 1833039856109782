//! Course API client
//!
//! `CourseApi` is the seam between the lesson map and the remote server.
//! `HttpCourseApi` talks to the real server; tests substitute in-memory
//! implementations.

use crate::api::session::Session;
use crate::api::types::{CompleteLessonRequest, CourseSummary, Lesson, Profile, UserProfile};
use crate::{Error, Result};
use async_trait::async_trait;
use serde::Deserialize;
use std::time::Duration;
use tracing::debug;

/// Request timeout for every API call
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Remote operations used by the lesson map
#[async_trait]
pub trait CourseApi: Send + Sync {
    /// `GET /auth/me`
    async fn current_user(&self, session: &Session) -> Result<UserProfile>;

    /// `GET /courses` (no authentication)
    async fn list_courses(&self) -> Result<Vec<CourseSummary>>;

    /// `GET /courses/{id}/path`, or `GET /path` when `course_id` is `None`
    async fn fetch_path(&self, session: &Session, course_id: Option<u64>) -> Result<Vec<Lesson>>;

    /// `POST /progress/complete`
    async fn complete_lesson(&self, session: &Session, lesson_id: u64) -> Result<()>;

    /// `GET /profile`: account details and overall progress
    async fn profile(&self, session: &Session) -> Result<Profile>;
}

/// Error body returned by the server (`{"detail": "..."}`)
#[derive(Debug, Deserialize)]
struct ErrorBody {
    detail: String,
}

/// reqwest-backed `CourseApi`
#[derive(Debug, Clone)]
pub struct HttpCourseApi {
    client: reqwest::Client,
    base_url: String,
}

impl HttpCourseApi {
    pub fn new(base_url: impl Into<String>) -> Result<Self> {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        if base_url.is_empty() {
            return Err(Error::InvalidInput("API base URL is empty".to_string()));
        }

        let client = reqwest::Client::builder()
            .user_agent(concat!("lpath/", env!("CARGO_PKG_VERSION")))
            .timeout(REQUEST_TIMEOUT)
            .build()?;

        Ok(Self { client, base_url })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn bearer<'a>(&self, session: &'a Session) -> Result<&'a str> {
        session
            .token()
            .ok_or_else(|| Error::Unauthorized("session has no bearer token".to_string()))
    }

    /// Map non-success statuses to `Error`
    async fn check(response: reqwest::Response) -> Result<reqwest::Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let text = response.text().await.unwrap_or_default();
        let message = serde_json::from_str::<ErrorBody>(&text)
            .map(|body| body.detail)
            .unwrap_or(text);

        Err(match status {
            reqwest::StatusCode::UNAUTHORIZED => Error::Unauthorized(message),
            reqwest::StatusCode::NOT_FOUND => Error::NotFound(message),
            _ => Error::Api {
                status: status.as_u16(),
                message,
            },
        })
    }
}

#[async_trait]
impl CourseApi for HttpCourseApi {
    async fn current_user(&self, session: &Session) -> Result<UserProfile> {
        let token = self.bearer(session)?;
        let response = self
            .client
            .get(self.url("/auth/me"))
            .bearer_auth(token)
            .send()
            .await?;

        Ok(Self::check(response).await?.json().await?)
    }

    async fn list_courses(&self) -> Result<Vec<CourseSummary>> {
        let response = self.client.get(self.url("/courses")).send().await?;
        Ok(Self::check(response).await?.json().await?)
    }

    async fn fetch_path(&self, session: &Session, course_id: Option<u64>) -> Result<Vec<Lesson>> {
        let token = self.bearer(session)?;
        let endpoint = match course_id {
            Some(id) => format!("/courses/{}/path", id),
            None => "/path".to_string(),
        };
        debug!("Fetching path from {}", endpoint);

        let response = self
            .client
            .get(self.url(&endpoint))
            .bearer_auth(token)
            .send()
            .await?;

        Ok(Self::check(response).await?.json().await?)
    }

    async fn complete_lesson(&self, session: &Session, lesson_id: u64) -> Result<()> {
        let token = self.bearer(session)?;
        let response = self
            .client
            .post(self.url("/progress/complete"))
            .bearer_auth(token)
            .json(&CompleteLessonRequest {
                video_id: lesson_id,
            })
            .send()
            .await?;

        Self::check(response).await?;
        Ok(())
    }

    async fn profile(&self, session: &Session) -> Result<Profile> {
        let token = self.bearer(session)?;
        let response = self
            .client
            .get(self.url("/profile"))
            .bearer_auth(token)
            .send()
            .await?;

        Ok(Self::check(response).await?.json().await?)
    }
}
