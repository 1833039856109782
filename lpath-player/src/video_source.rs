//! Video source resolution
//!
//! Lessons carry a free-form `video_url`. The embedded provider needs an
//! 11-character video id; anything we cannot extract one from becomes
//! `VideoSource::Invalid`, which the modal renders as a static message
//! instead of failing.

use once_cell::sync::Lazy;
use regex::Regex;

/// Message shown in place of the player when the URL is unusable
pub const INVALID_VIDEO_MESSAGE: &str = "Invalid Video URL";

/// Provider video ids are always this long
const VIDEO_ID_LEN: usize = 11;

// Greedy prefix: the last marker in the URL wins
static VIDEO_ID_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^.*(youtu\.be/|v/|u/\w/|embed/|watch\?v=|&v=)([^#&?]*).*")
        .expect("video id pattern is valid")
});

/// Provider video id
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct VideoId(String);

impl VideoId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for VideoId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// What the modal can show for a lesson URL
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VideoSource {
    /// Playable through the embedded provider
    Embedded(VideoId),
    /// Unusable URL; show `INVALID_VIDEO_MESSAGE`
    Invalid,
}

impl VideoSource {
    /// Resolve a lesson URL.
    ///
    /// # Examples
    ///
    /// ```
    /// use lpath_player::video_source::VideoSource;
    ///
    /// let source = VideoSource::parse("https://www.youtube.com/watch?v=dQw4w9WgXcQ");
    /// assert_eq!(source.video_id().map(|id| id.as_str()), Some("dQw4w9WgXcQ"));
    ///
    /// assert_eq!(VideoSource::parse("not a url"), VideoSource::Invalid);
    /// ```
    pub fn parse(url: &str) -> Self {
        VIDEO_ID_PATTERN
            .captures(url.trim())
            .and_then(|caps| caps.get(2))
            .map(|m| m.as_str())
            .filter(|id| id.chars().count() == VIDEO_ID_LEN)
            .map(|id| VideoSource::Embedded(VideoId(id.to_string())))
            .unwrap_or(VideoSource::Invalid)
    }

    pub fn video_id(&self) -> Option<&VideoId> {
        match self {
            VideoSource::Embedded(id) => Some(id),
            VideoSource::Invalid => None,
        }
    }

    pub fn is_valid(&self) -> bool {
        matches!(self, VideoSource::Embedded(_))
    }

    /// Static message to render instead of a player, if any
    pub fn fallback_message(&self) -> Option<&'static str> {
        match self {
            VideoSource::Embedded(_) => None,
            VideoSource::Invalid => Some(INVALID_VIDEO_MESSAGE),
        }
    }
}
