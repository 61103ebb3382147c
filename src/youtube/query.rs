//! Request configuration values.
//!
//! Each query is an owned value built with chained calls and handed to
//! [`YouTubeClient`](super::YouTubeClient). Nothing is shared between calls.

use super::resolver::{is_valid_video_id, resolve_video_id};
use crate::error::{Error, Result};

/// Lookup of a single video by ID.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VideoQuery {
    video_id: Option<String>,
    api_key: Option<String>,
}

impl VideoQuery {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a raw video ID.
    ///
    /// # Returns
    /// * `Result<VideoQuery>` - Updated query, or [`Error::InvalidVideoId`]
    ///   when the ID is not a single alphanumeric token
    pub fn video_id(mut self, video_id: impl Into<String>) -> Result<Self> {
        let video_id = video_id.into();
        if !is_valid_video_id(&video_id) {
            return Err(Error::InvalidVideoId(video_id));
        }
        self.video_id = Some(video_id);
        Ok(self)
    }

    /// Set the video from a watch, shorts or youtu.be URL.
    ///
    /// # Details
    /// The resolved ID is stored without validation. An unrecognized URL
    /// stores [`INVALID_URL`](super::resolver::INVALID_URL).
    pub fn video_url(mut self, video_url: &str) -> Self {
        self.video_id = Some(resolve_video_id(video_url));
        self
    }

    /// Override the client's default API key for this request.
    pub fn api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    pub fn get_video_id(&self) -> Option<&str> {
        self.video_id.as_deref()
    }

    pub fn get_api_key(&self) -> Option<&str> {
        self.api_key.as_deref()
    }
}

/// One page of a channel's videos.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChannelQuery {
    channel_id: Option<String>,
    api_key: Option<String>,
    max_per_page: Option<u32>,
    page_token: Option<String>,
}

impl ChannelQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn channel_id(mut self, channel_id: impl Into<String>) -> Self {
        self.channel_id = Some(channel_id.into());
        self
    }

    pub fn api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    /// Limit the number of videos per page. Unset means the client default.
    pub fn max_per_page(mut self, limit: u32) -> Self {
        self.max_per_page = Some(limit);
        self
    }

    /// Request the page behind `page_token`. An empty token is ignored.
    pub fn paginate(mut self, page_token: impl Into<String>) -> Self {
        let page_token = page_token.into();
        if !page_token.is_empty() {
            self.page_token = Some(page_token);
        }
        self
    }

    pub fn get_channel_id(&self) -> Option<&str> {
        self.channel_id.as_deref()
    }

    pub fn get_api_key(&self) -> Option<&str> {
        self.api_key.as_deref()
    }

    pub fn get_max_per_page(&self) -> Option<u32> {
        self.max_per_page
    }

    pub fn get_page_token(&self) -> Option<&str> {
        self.page_token.as_deref()
    }
}
