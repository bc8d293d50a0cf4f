use std::fmt;
use std::sync::LazyLock;

use regex::Regex;

use crate::error::CoreError;

pub const VIDEO_ID_LEN: usize = 11;

// The trailing group rejects ids longer than eleven characters; the regex crate
// has no lookahead.
static VIDEO_ID_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?:v=|/)([0-9A-Za-z_-]{11})(?:[^0-9A-Za-z_-]|$)")
        .expect("video id pattern is valid")
});

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct VideoId(String);

impl VideoId {
    /// Like [`extract_video_id`], but reports a missing id as an input error.
    pub fn from_url(url: &str) -> Result<Self, CoreError> {
        extract_video_id(url).ok_or_else(|| CoreError::InvalidVideoUrl(url.trim().to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Returns the first 11-character id that follows `v=` or `/` in `url`.
pub fn extract_video_id(url: &str) -> Option<VideoId> {
    VIDEO_ID_PATTERN
        .captures(url)
        .and_then(|caps| caps.get(1))
        .map(|id| VideoId(id.as_str().to_string()))
}

fn is_id_char(ch: char) -> bool {
    ch.is_ascii_alphanumeric() || ch == '-' || ch == '_'
}

impl TryFrom<&str> for VideoId {
    type Error = CoreError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let trimmed = value.trim();
        if trimmed.len() != VIDEO_ID_LEN || !trimmed.chars().all(is_id_char) {
            return Err(CoreError::InvalidVideoId(trimmed.to_string()));
        }
        Ok(VideoId(trimmed.to_string()))
    }
}

impl fmt::Display for VideoId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
