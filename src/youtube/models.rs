//! YouTube Data API v3 models and response mapping.
//!
//! The `Api*` structures mirror the JSON the API returns. [`ResponseMapper`]
//! turns them into the public [`VideoMetadata`] and [`VideoList`] values.

use crate::error::{Error, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize, Serializer};
use serde_json::Value;
use std::fmt;
use std::str::FromStr;

/// One thumbnail variant.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Thumbnail {
    /// Image URL, copied verbatim
    pub url: String,
    /// Width in pixels
    pub width: u32,
    /// Height in pixels
    pub height: u32,
}

/// Thumbnail quality tiers returned for every video.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ThumbnailSize {
    Default,
    Medium,
    High,
}

impl ThumbnailSize {
    /// All tiers, lowest quality first.
    pub const ALL: [ThumbnailSize; 3] = [Self::Default, Self::Medium, Self::High];

    /// Label used by the API for this tier.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Default => "default",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }
}

impl fmt::Display for ThumbnailSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ThumbnailSize {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|size| size.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| Error::UnknownThumbnailSize(s.to_string()))
    }
}

/// The default, medium and high thumbnails of a video, addressed by label.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct ThumbnailSet {
    default: Thumbnail,
    medium: Thumbnail,
    high: Thumbnail,
}

impl ThumbnailSet {
    /// Thumbnail for the given tier.
    pub fn get(&self, size: ThumbnailSize) -> &Thumbnail {
        match size {
            ThumbnailSize::Default => &self.default,
            ThumbnailSize::Medium => &self.medium,
            ThumbnailSize::High => &self.high,
        }
    }

    /// Labeled entries in default, medium, high order.
    pub fn iter(&self) -> impl Iterator<Item = (ThumbnailSize, &Thumbnail)> {
        ThumbnailSize::ALL.into_iter().map(|size| (size, self.get(size)))
    }
}

impl From<ApiThumbnails> for ThumbnailSet {
    fn from(thumbnails: ApiThumbnails) -> Self {
        Self {
            default: thumbnails.default,
            medium: thumbnails.medium,
            high: thumbnails.high,
        }
    }
}

/// Metadata of a single video, from the `videos` endpoint.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct VideoMetadata {
    video_id: String,
    title: String,
    description: String,
    channel_title: String,
    published_at: String,
    thumbnails: ThumbnailSet,
}

impl VideoMetadata {
    pub fn video_id(&self) -> &str {
        &self.video_id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn channel_title(&self) -> &str {
        &self.channel_title
    }

    /// Publication timestamp exactly as the API returned it.
    pub fn published_at(&self) -> &str {
        &self.published_at
    }

    pub fn thumbnails(&self) -> &ThumbnailSet {
        &self.thumbnails
    }

    /// Parse [`published_at`](Self::published_at) as an RFC 3339 timestamp.
    pub fn published_at_utc(&self) -> Result<DateTime<Utc>> {
        parse_timestamp(&self.published_at)
    }

    /// Watch page URL for this video.
    pub fn watch_url(&self) -> String {
        format!("https://www.youtube.com/watch?v={}", self.video_id)
    }
}

impl From<ApiVideoItem> for VideoMetadata {
    fn from(item: ApiVideoItem) -> Self {
        Self {
            video_id: item.id.trim().to_string(),
            title: item.snippet.title,
            description: item.snippet.description.trim().to_string(),
            channel_title: item.snippet.channel_title,
            published_at: item.snippet.published_at,
            thumbnails: item.snippet.thumbnails.into(),
        }
    }
}

/// One entry of a channel listing, from the `search` endpoint.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct VideoListItem {
    video_id: String,
    title: String,
    description: String,
    published_at: String,
    published_time: String,
    thumbnails: ThumbnailSet,
}

impl VideoListItem {
    pub fn video_id(&self) -> &str {
        &self.video_id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn published_at(&self) -> &str {
        &self.published_at
    }

    /// The snippet's `publishTime`, kept apart from `publishedAt`.
    pub fn published_time(&self) -> &str {
        &self.published_time
    }

    pub fn thumbnails(&self) -> &ThumbnailSet {
        &self.thumbnails
    }

    pub fn published_at_utc(&self) -> Result<DateTime<Utc>> {
        parse_timestamp(&self.published_at)
    }
}

impl From<ApiSearchItem> for VideoListItem {
    fn from(item: ApiSearchItem) -> Self {
        Self {
            video_id: item.id.video_id,
            title: item.snippet.title,
            description: item.snippet.description,
            published_at: item.snippet.published_at,
            published_time: item.snippet.publish_time,
            thumbnails: item.snippet.thumbnails.into(),
        }
    }
}

/// Pagination cursor of a [`VideoList`].
///
/// An absent token serializes as JSON `false`, not `null` or `""`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageToken {
    Token(String),
    Absent,
}

impl PageToken {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Token(token) => Some(token),
            Self::Absent => None,
        }
    }

    pub fn is_absent(&self) -> bool {
        matches!(self, Self::Absent)
    }
}

impl From<Option<String>> for PageToken {
    fn from(token: Option<String>) -> Self {
        token.map_or(Self::Absent, Self::Token)
    }
}

impl Serialize for PageToken {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        match self {
            Self::Token(token) => serializer.serialize_str(token),
            Self::Absent => serializer.serialize_bool(false),
        }
    }
}

/// One page of a channel's videos.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct VideoList {
    total_results: u64,
    results_per_page: u32,
    next_page_token: PageToken,
    prev_page_token: PageToken,
    video_items: Vec<VideoListItem>,
}

impl VideoList {
    pub fn total_results(&self) -> u64 {
        self.total_results
    }

    pub fn results_per_page(&self) -> u32 {
        self.results_per_page
    }

    pub fn next_page_token(&self) -> &PageToken {
        &self.next_page_token
    }

    pub fn prev_page_token(&self) -> &PageToken {
        &self.prev_page_token
    }

    /// Entries in the order the API returned them.
    pub fn items(&self) -> &[VideoListItem] {
        &self.video_items
    }

    pub fn into_items(self) -> Vec<VideoListItem> {
        self.video_items
    }
}

impl From<ApiSearchResponse> for VideoList {
    fn from(response: ApiSearchResponse) -> Self {
        Self {
            total_results: response.page_info.total_results,
            results_per_page: response.page_info.results_per_page,
            next_page_token: response.next_page_token.into(),
            prev_page_token: response.prev_page_token.into(),
            video_items: response.items.into_iter().map(Into::into).collect(),
        }
    }
}

/// Maps a decoded response body onto the public models.
///
/// An empty mapper stands for a request that was never made; every accessor
/// then fails with [`Error::NotFetched`].
#[derive(Debug, Clone, Default)]
pub struct ResponseMapper {
    response: Option<Value>,
}

impl ResponseMapper {
    pub fn new(response: Value) -> Self {
        Self {
            response: Some(response),
        }
    }

    /// Decode a raw response body.
    pub fn from_body(body: &str) -> Result<Self> {
        Ok(Self::new(serde_json::from_str(body)?))
    }

    pub fn is_empty(&self) -> bool {
        self.response.is_none()
    }

    /// Build the metadata of the first item of a `videos` response.
    ///
    /// # Details
    /// The ID and description are trimmed; everything else, thumbnails
    /// included, is copied verbatim.
    pub fn video_metadata(&self) -> Result<VideoMetadata> {
        let response = ApiVideosResponse::deserialize(self.response()?).map_err(shape_error)?;
        let item = response
            .items
            .into_iter()
            .next()
            .ok_or_else(|| Error::UnexpectedShape("response contains no items".to_string()))?;
        Ok(item.into())
    }

    /// Build a [`VideoList`] from a `search` response.
    pub fn video_list(&self) -> Result<VideoList> {
        let response = ApiSearchResponse::deserialize(self.response()?).map_err(shape_error)?;
        Ok(response.into())
    }

    /// Title of the first item, without building the full metadata.
    pub fn title(&self) -> Result<&str> {
        self.first_snippet_field("title")
    }

    /// Description of the first item, untrimmed.
    pub fn description(&self) -> Result<&str> {
        self.first_snippet_field("description")
    }

    pub fn channel_title(&self) -> Result<&str> {
        self.first_snippet_field("channelTitle")
    }

    pub fn published_at(&self) -> Result<&str> {
        self.first_snippet_field("publishedAt")
    }

    fn response(&self) -> Result<&Value> {
        self.response.as_ref().ok_or(Error::NotFetched)
    }

    fn first_snippet_field(&self, field: &str) -> Result<&str> {
        self.response()?
            .pointer(&format!("/items/0/snippet/{field}"))
            .and_then(Value::as_str)
            .ok_or_else(|| {
                Error::UnexpectedShape(format!("missing string field items[0].snippet.{field}"))
            })
    }
}

fn shape_error(err: serde_json::Error) -> Error {
    Error::UnexpectedShape(err.to_string())
}

fn parse_timestamp(value: &str) -> Result<DateTime<Utc>> {
    Ok(DateTime::parse_from_rfc3339(value)?.with_timezone(&Utc))
}

/// `videos` endpoint response.
#[derive(Debug, Deserialize)]
pub struct ApiVideosResponse {
    pub items: Vec<ApiVideoItem>,
}

/// Item of a `videos` response.
#[derive(Debug, Deserialize)]
pub struct ApiVideoItem {
    pub id: String,
    pub snippet: ApiVideoSnippet,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiVideoSnippet {
    pub title: String,
    pub description: String,
    pub channel_title: String,
    pub published_at: String,
    pub thumbnails: ApiThumbnails,
}

/// Thumbnails as returned by both endpoints. All three tiers are required.
#[derive(Debug, Deserialize)]
pub struct ApiThumbnails {
    pub default: Thumbnail,
    pub medium: Thumbnail,
    pub high: Thumbnail,
}

/// `search` endpoint response.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiSearchResponse {
    pub page_info: ApiPageInfo,
    #[serde(default)]
    pub next_page_token: Option<String>,
    #[serde(default)]
    pub prev_page_token: Option<String>,
    pub items: Vec<ApiSearchItem>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiPageInfo {
    pub total_results: u64,
    pub results_per_page: u32,
}

/// Item of a `search` response.
#[derive(Debug, Deserialize)]
pub struct ApiSearchItem {
    pub id: ApiSearchItemId,
    pub snippet: ApiSearchSnippet,
}

#[derive(Debug, Deserialize)]
pub struct ApiSearchItemId {
    #[serde(rename = "videoId")]
    pub video_id: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiSearchSnippet {
    pub title: String,
    pub description: String,
    pub published_at: String,
    pub publish_time: String,
    pub thumbnails: ApiThumbnails,
}
