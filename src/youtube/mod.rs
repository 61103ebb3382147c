//! YouTube Data API v3 integration module.
//!
//! Provides the client, its request values, URL resolution and the models
//! responses are mapped onto.

pub mod client;
pub mod models;
pub mod query;
pub mod resolver;

pub use client::{ApiResponse, ErrorPayload, YouTubeClient};
pub use models::{
    PageToken, ResponseMapper, Thumbnail, ThumbnailSet, ThumbnailSize, VideoList, VideoListItem,
    VideoMetadata,
};
pub use query::{ChannelQuery, VideoQuery};
pub use resolver::{INVALID_URL, is_valid_video_id, resolve_video_id, try_resolve_video_id};
