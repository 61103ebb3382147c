//! Thin client for the YouTube Data API v3.
//!
//! Look up a single video by ID or URL, or list one page of a channel's
//! videos:
//!
//! ```no_run
//! use youtube_data_api::{ApiResponse, Config, VideoQuery, YouTubeClient};
//!
//! # async fn run() -> youtube_data_api::Result<()> {
//! let client = YouTubeClient::new(&Config::with_api_key("my-key"))?;
//! let query = VideoQuery::new().video_url("https://youtu.be/dQw4w9WgXcQ");
//! match client.fetch(&query).await? {
//!     ApiResponse::Success(video) => println!("{}", video.title()),
//!     ApiResponse::Failure(payload) => eprintln!("{}", payload.to_json()),
//! }
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod error;
pub mod youtube;

pub use config::Config;
pub use error::{Error, Result};
pub use youtube::{
    ApiResponse, ChannelQuery, ErrorPayload, PageToken, ResponseMapper, Thumbnail, ThumbnailSet,
    ThumbnailSize, VideoList, VideoListItem, VideoMetadata, VideoQuery, YouTubeClient,
};
