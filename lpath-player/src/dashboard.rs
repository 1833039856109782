//! Course catalog and profile dashboard
//!
//! Plain-text views of `GET /courses` and `GET /profile` for the CLI.

use crate::error::Result;
use lpath_common::api::{CourseApi, CourseSummary, Profile, ProfileUser, Session};
use lpath_common::human_time::parse_api_date;
use tracing::info;

pub const NO_COURSES_MESSAGE: &str = "No courses available";
pub const NO_COMPLETIONS_MESSAGE: &str = "No completed lessons yet. Start learning!";
pub const UPGRADE_OFFER: &str = "Upgrade to Premium to unlock every course";

/// Every course offered by the server; no sign-in needed
pub async fn load_catalog<A: CourseApi>(api: &A) -> Result<Vec<CourseSummary>> {
    let courses = api.list_courses().await?;
    info!("Loaded {} courses", courses.len());
    Ok(courses)
}

pub fn format_catalog(courses: &[CourseSummary]) -> Vec<String> {
    if courses.is_empty() {
        return vec![NO_COURSES_MESSAGE.to_string()];
    }

    let mut lines = Vec::new();
    for course in courses {
        lines.push(format!(
            "{:>4}  {:<40}  {:<12}  {} lessons",
            course.id, course.title, course.difficulty, course.video_count
        ));
        if !course.description.is_empty() {
            lines.push(format!("      {}", course.description));
        }
    }
    lines
}

/// Account details and overall progress of the signed-in user.
///
/// Anonymous sessions are refused without contacting the server.
pub async fn load_profile<A: CourseApi>(api: &A, session: &Session) -> Result<Profile> {
    if !session.is_authenticated() {
        return Err(lpath_common::Error::Unauthorized(
            "sign in to view the profile".to_string(),
        )
        .into());
    }
    let profile = api.profile(session).await?;
    info!(
        "Profile loaded: {} of {} lessons completed",
        profile.stats.completed_videos, profile.stats.total_videos
    );
    Ok(profile)
}

/// `Joined <Month> <Year>`, if the account date is readable
pub fn joined_label(user: &ProfileUser) -> Option<String> {
    let date = parse_api_date(user.created_at.as_deref()?)?;
    Some(format!("Joined {}", date.format("%B %Y")))
}

pub fn format_profile(profile: &Profile) -> Vec<String> {
    let user = &profile.user;
    let stats = &profile.stats;

    let mut header = user.email.clone();
    if user.is_premium {
        header.push_str("  PREMIUM");
    }
    if user.is_admin {
        header.push_str("  ADMIN");
    }

    let mut lines = vec![header];
    lines.extend(joined_label(user));
    if user.is_premium {
        if let Some(until) = user.premium_expires_at.as_deref().and_then(parse_api_date) {
            lines.push(format!("Premium until {}", until));
        }
    }

    lines.push(String::new());
    lines.push(format!(
        "Overall progress: {}% ({} of {} lessons)",
        stats.progress_percentage, stats.completed_videos, stats.total_videos
    ));
    lines.push(format!("Completed: {} lessons finished", stats.completed_videos));
    lines.push(format!("Remaining: {} lessons to go", stats.remaining()));

    lines.push(String::new());
    if stats.recent_completions.is_empty() {
        lines.push(NO_COMPLETIONS_MESSAGE.to_string());
    } else {
        lines.push("Recent completions:".to_string());
        for completion in &stats.recent_completions {
            match completion.completed_at.as_deref().and_then(parse_api_date) {
                Some(date) => lines.push(format!("  {}  {}", completion.title, date)),
                None => lines.push(format!("  {}", completion.title)),
            }
        }
    }

    if !user.is_premium {
        lines.push(String::new());
        lines.push(UPGRADE_OFFER.to_string());
    }
    lines
}
