//! Error types for the YouTube Data API client.
//!
//! Transport failures are not represented here: the client turns them into an
//! [`ErrorPayload`](crate::youtube::ErrorPayload) instead of failing the call.

use thiserror::Error;

/// Errors raised before a request is sent or while mapping its response.
#[derive(Debug, Error)]
pub enum Error {
    /// No video ID was set on the query.
    #[error("Video ID not specified.")]
    MissingVideoId,

    /// No channel ID was set on the query.
    #[error("Channel ID not specified.")]
    MissingChannelId,

    /// Neither the query nor the client configuration carries an API key.
    #[error("API key not found")]
    MissingApiKey,

    /// A mapper was asked for data before any response was stored in it.
    #[error("Failed to parse response, fetch method was not invoked")]
    NotFetched,

    /// A raw video ID failed validation.
    #[error("Video ID seems to be invalid: {0:?}")]
    InvalidVideoId(String),

    /// The response body was JSON but not of the shape the API documents.
    #[error("Unexpected response shape: {0}")]
    UnexpectedShape(String),

    /// A thumbnail label other than `default`, `medium` or `high`.
    #[error("Unknown thumbnail size: {0}")]
    UnknownThumbnailSize(String),

    /// The response body was not JSON.
    #[error("Failed to decode response body: {0}")]
    Json(#[from] serde_json::Error),

    /// A `publishedAt` value was not an RFC 3339 timestamp.
    #[error("Failed to parse published date: {0}")]
    Timestamp(#[from] chrono::ParseError),

    /// The HTTP client could not be constructed.
    #[error("Failed to create HTTP client: {0}")]
    Client(#[from] reqwest::Error),
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;
