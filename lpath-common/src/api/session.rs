//! Explicit session/credential object
//!
//! Holds the bearer token and, once resolved, the signed-in user. Passed by
//! reference to every `CourseApi` call that needs authentication.

use crate::api::client::CourseApi;
use crate::api::types::UserProfile;
use tracing::{error, info};

#[derive(Clone, Default, PartialEq)]
pub struct Session {
    token: Option<String>,
    user: Option<UserProfile>,
}

impl Session {
    /// Session without credentials
    pub fn anonymous() -> Self {
        Self::default()
    }

    /// Session carrying a token whose user has not been resolved yet.
    ///
    /// An empty token yields an anonymous session.
    pub fn with_token(token: impl Into<String>) -> Self {
        let token = token.into();
        Self {
            token: (!token.is_empty()).then_some(token),
            user: None,
        }
    }

    /// Resolve the user behind `token`.
    ///
    /// A rejected token or an unreachable server logs the failure and yields
    /// an anonymous session, the same outcome as logging out.
    pub async fn login(api: &dyn CourseApi, token: impl Into<String>) -> Self {
        let mut session = Self::with_token(token);
        if session.token.is_none() {
            return session;
        }

        match api.current_user(&session).await {
            Ok(user) => {
                info!("Signed in as {}", user.email);
                session.user = Some(user);
            }
            Err(e) => {
                error!("Failed to fetch user: {}", e);
                session.logout();
            }
        }
        session
    }

    /// Drop token and user
    pub fn logout(&mut self) {
        self.token = None;
        self.user = None;
    }

    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    pub fn user(&self) -> Option<&UserProfile> {
        self.user.as_ref()
    }

    pub fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }

    pub fn is_premium(&self) -> bool {
        self.user.as_ref().is_some_and(|u| u.is_premium)
    }
}

// Token stays out of logs
impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("token", &self.token.as_ref().map(|_| "<redacted>"))
            .field("user", &self.user)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::types::{CourseSummary, Lesson, Profile};
    use crate::{Error, Result};
    use async_trait::async_trait;

    struct FixedUserApi {
        accept: &'static str,
    }

    #[async_trait]
    impl CourseApi for FixedUserApi {
        async fn current_user(&self, session: &Session) -> Result<UserProfile> {
            if session.token() == Some(self.accept) {
                Ok(UserProfile {
                    id: 1,
                    email: "learner@example.com".to_string(),
                    is_admin: false,
                    is_premium: true,
                })
            } else {
                Err(Error::Unauthorized("bad token".to_string()))
            }
        }

        async fn list_courses(&self) -> Result<Vec<CourseSummary>> {
            Ok(Vec::new())
        }

        async fn fetch_path(&self, _: &Session, _: Option<u64>) -> Result<Vec<Lesson>> {
            Ok(Vec::new())
        }

        async fn complete_lesson(&self, _: &Session, _: u64) -> Result<()> {
            Ok(())
        }

        async fn profile(&self, _: &Session) -> Result<Profile> {
            Err(Error::NotFound("profile".to_string()))
        }
    }

    #[test]
    fn test_empty_token_is_anonymous() {
        let session = Session::with_token("");
        assert!(!session.is_authenticated());
        assert_eq!(session.token(), None);
    }

    #[test]
    fn test_debug_redacts_token() {
        let session = Session::with_token("secret-token");
        let printed = format!("{:?}", session);
        assert!(!printed.contains("secret-token"));
        assert!(printed.contains("<redacted>"));
    }

    #[tokio::test]
    async fn test_login_resolves_user() {
        let api = FixedUserApi { accept: "good" };
        let session = Session::login(&api, "good").await;
        assert!(session.is_authenticated());
        assert!(session.is_premium());
        assert_eq!(session.user().unwrap().email, "learner@example.com");
    }

    #[tokio::test]
    async fn test_rejected_login_logs_out() {
        let api = FixedUserApi { accept: "good" };
        let session = Session::login(&api, "stale").await;
        assert_eq!(session, Session::anonymous());
    }
}
