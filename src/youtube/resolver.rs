//! Video ID extraction and validation.
//!
//! Supported URL shapes: `youtube.com/watch?v=ID`, `youtube.com/shorts/ID`
//! and `youtu.be/ID`. Scheme and subdomain are optional, matching is
//! case-insensitive and trailing query parameters are ignored.

use regex::Regex;
use std::sync::LazyLock;

/// Returned by [`resolve_video_id`] when no URL pattern matches.
pub const INVALID_URL: &str = "invalid url";

/// URL patterns, tried in order. Group 1 is the video ID.
static URL_PATTERNS: LazyLock<[Regex; 3]> = LazyLock::new(|| {
    [
        r"(?i)(?:https?://)?(?:[a-z0-9_]+\.)?youtube\.com/watch\?v=([a-z0-9_-]+)(?:&.*)?",
        r"(?i)(?:https?://)?(?:[a-z0-9_]+\.)?youtube\.com/shorts/([a-z0-9_-]+)(?:[?&].*)?",
        r"(?i)(?:https?://)?youtu\.be/([a-z0-9_-]+)(?:\?.*)?",
    ]
    .map(|pattern| Regex::new(pattern).expect("video URL pattern is valid"))
});

static ALPHANUMERIC_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[a-zA-Z0-9]+").expect("alphanumeric pattern is valid"));

/// Extract a video ID from a YouTube URL.
///
/// # Returns
/// * `Option<String>` - The ID captured by the first matching pattern
pub fn try_resolve_video_id(video_url: &str) -> Option<String> {
    URL_PATTERNS.iter().find_map(|pattern| {
        pattern
            .captures(video_url)
            .and_then(|caps| caps.get(1))
            .map(|id| id.as_str().to_string())
    })
}

/// Extract a video ID from a YouTube URL, or [`INVALID_URL`].
///
/// Unparseable input is not an error here. Callers compare against
/// [`INVALID_URL`] or use [`try_resolve_video_id`].
pub fn resolve_video_id(video_url: &str) -> String {
    try_resolve_video_id(video_url).unwrap_or_else(|| INVALID_URL.to_string())
}

/// Whether `candidate` is a single contiguous run of ASCII alphanumerics,
/// ignoring any non-alphanumeric characters around it.
pub fn is_valid_video_id(candidate: &str) -> bool {
    ALPHANUMERIC_RUN.find_iter(candidate).take(2).count() == 1
}
