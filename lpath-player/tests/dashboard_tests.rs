//! Course catalog and profile views against an in-memory course API

mod helpers;

use helpers::InMemoryApi;
use lpath_common::api::{Lesson, LessonStatus, Session};
use lpath_player::dashboard::{
    format_catalog, format_profile, load_catalog, load_profile, NO_COMPLETIONS_MESSAGE,
    NO_COURSES_MESSAGE, UPGRADE_OFFER,
};
use lpath_player::Error;

fn lesson(id: u64, status: LessonStatus) -> Lesson {
    Lesson {
        id,
        title: format!("Lesson {}", id),
        status,
        x: 0,
        y: 0,
        video_url: "https://youtu.be/dQw4w9WgXcQ".to_string(),
    }
}

#[tokio::test]
async fn test_catalog_lists_courses_with_lesson_counts() {
    let api = InMemoryApi::with_path(Vec::new());
    let courses = load_catalog(&api).await.unwrap();
    let lines = format_catalog(&courses);

    assert_eq!(lines.len(), 1);
    assert!(lines[0].contains("Rust Foundations"));
    assert!(lines[0].contains("beginner"));
    assert!(lines[0].ends_with("3 lessons"));
}

#[tokio::test]
async fn test_empty_catalog_message() {
    let api = InMemoryApi::default();
    let courses = load_catalog(&api).await.unwrap();
    assert_eq!(format_catalog(&courses), vec![NO_COURSES_MESSAGE]);
}

#[tokio::test]
async fn test_profile_requires_sign_in() {
    let api = InMemoryApi::with_path(Vec::new());
    let result = load_profile(&api, &Session::anonymous()).await;
    assert!(matches!(
        result,
        Err(Error::Common(lpath_common::Error::Unauthorized(_)))
    ));
}

#[tokio::test]
async fn test_profile_shows_progress_and_recent_completions() {
    let api = InMemoryApi::with_path(vec![
        lesson(1, LessonStatus::Completed),
        lesson(2, LessonStatus::Completed),
        lesson(3, LessonStatus::Active),
    ]);
    let profile = load_profile(&api, &Session::with_token("token"))
        .await
        .unwrap();
    let lines = format_profile(&profile);

    assert_eq!(lines[0], "learner@example.com");
    assert_eq!(lines[1], "Joined March 2024");
    assert!(lines.contains(&"Overall progress: 66.7% (2 of 3 lessons)".to_string()));
    assert!(lines.contains(&"Remaining: 1 lessons to go".to_string()));
    assert!(lines.contains(&"  Lesson 2  2024-04-01".to_string()));
    assert_eq!(lines.last().map(String::as_str), Some(UPGRADE_OFFER));
}

#[tokio::test]
async fn test_premium_profile_without_completions() {
    let api = InMemoryApi::with_path(vec![lesson(1, LessonStatus::Active)]);
    api.set(|s| s.premium = true);
    let profile = load_profile(&api, &Session::with_token("token"))
        .await
        .unwrap();
    let lines = format_profile(&profile);

    assert_eq!(lines[0], "learner@example.com  PREMIUM");
    assert!(lines.contains(&"Overall progress: 0% (0 of 1 lessons)".to_string()));
    assert!(lines.contains(&NO_COMPLETIONS_MESSAGE.to_string()));
    assert!(!lines.contains(&UPGRADE_OFFER.to_string()));
}
