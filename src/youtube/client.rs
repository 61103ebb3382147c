//! YouTube Data API v3 client implementation.
//!
//! Handles video lookups and channel listings. Every call issues exactly one
//! GET request.

use crate::config::Config;
use crate::error::{Error, Result};
use crate::youtube::models::{ResponseMapper, VideoList, VideoMetadata};
use crate::youtube::query::{ChannelQuery, VideoQuery};
use reqwest::Client;
use serde::Serialize;
use std::time::Duration;
use tracing::{debug, warn};

/// Value of the `part` parameter on both endpoints.
const PART: &str = "id, snippet";

/// HTTP status reported with every [`ErrorPayload`].
pub const ERROR_STATUS: u16 = 500;

/// Transport failure of a request, reported instead of an error.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct ErrorPayload {
    /// Status the host application should answer with
    #[serde(skip)]
    pub status: u16,
    /// Upstream HTTP status, or 0 when no response was received
    pub code: u16,
    /// Description of the failure
    pub message: String,
}

impl ErrorPayload {
    fn from_transport(err: &reqwest::Error) -> Self {
        Self {
            status: ERROR_STATUS,
            code: err.status().map_or(0, |status| status.as_u16()),
            message: err.to_string(),
        }
    }

    /// JSON body `{"code": .., "message": ..}`.
    pub fn to_json(&self) -> serde_json::Value {
        serde_json::json!({ "code": self.code, "message": self.message })
    }
}

/// Outcome of a request that passed its preconditions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiResponse<T> {
    Success(T),
    Failure(ErrorPayload),
}

impl<T> ApiResponse<T> {
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success(_))
    }

    /// The success value, if any.
    pub fn success(self) -> Option<T> {
        match self {
            Self::Success(value) => Some(value),
            Self::Failure(_) => None,
        }
    }

    pub fn failure(&self) -> Option<&ErrorPayload> {
        match self {
            Self::Success(_) => None,
            Self::Failure(payload) => Some(payload),
        }
    }
}

/// YouTube Data API v3 client.
///
/// Holds only the defaults from [`Config`]; per-request state lives in the
/// query values, so one client can be cloned and shared freely.
#[derive(Debug, Clone)]
pub struct YouTubeClient {
    /// HTTP client for API requests
    client: Client,
    /// Default API key, may be empty
    api_key: String,
    /// Default page size for channel listings
    max_per_page: u32,
    /// Base URL for YouTube Data API
    base_url: String,
}

impl YouTubeClient {
    /// Create a new YouTube client from configuration.
    ///
    /// # Arguments
    /// * `config` - Client configuration
    ///
    /// # Returns
    /// * `Result<YouTubeClient>` - New client or error
    ///
    /// # Details
    /// An empty API key is allowed here; requests then need a key of their
    /// own. Certificate verification is only disabled when
    /// `accept_invalid_certs` is set.
    pub fn new(config: &Config) -> Result<Self> {
        if config.accept_invalid_certs {
            warn!("TLS certificate verification is disabled for YouTube API requests");
        }

        let mut builder = Client::builder().danger_accept_invalid_certs(config.accept_invalid_certs);
        if let Some(secs) = config.timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        let client = builder.build()?;

        Ok(Self {
            client,
            api_key: config.api_key.clone(),
            max_per_page: config.max_per_page,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Fetch metadata for the video selected by `query`.
    ///
    /// # Returns
    /// * `Ok(ApiResponse::Success)` - Mapped metadata
    /// * `Ok(ApiResponse::Failure)` - Network error or non-2xx status
    /// * `Err` - Missing video ID or API key (no request is sent), or a body
    ///   that does not map onto [`VideoMetadata`]
    pub async fn fetch(&self, query: &VideoQuery) -> Result<ApiResponse<VideoMetadata>> {
        let video_id = query
            .get_video_id()
            .filter(|id| !id.is_empty())
            .ok_or(Error::MissingVideoId)?;
        let api_key = self.resolve_api_key(query.get_api_key())?;

        let url = format!("{}/videos", self.base_url);
        let params = [("part", PART), ("key", api_key), ("id", video_id)];

        debug!(%url, video_id, "fetching video metadata");
        let mapper = match self.get(&url, &params).await {
            Ok(mapper) => mapper,
            Err(payload) => return Ok(ApiResponse::Failure(payload)),
        };
        Ok(ApiResponse::Success(mapper?.video_metadata()?))
    }

    /// List one page of videos uploaded to the channel selected by `query`.
    ///
    /// # Returns
    /// * `Result<ApiResponse<VideoList>>` - Same conventions as [`fetch`](Self::fetch)
    ///
    /// # Details
    /// Uses the search endpoint with `type=video`. The page size falls back
    /// to the client default, the page token is only sent when set.
    pub async fn video_list(&self, query: &ChannelQuery) -> Result<ApiResponse<VideoList>> {
        let channel_id = query
            .get_channel_id()
            .filter(|id| !id.is_empty())
            .ok_or(Error::MissingChannelId)?;
        let api_key = self.resolve_api_key(query.get_api_key())?;
        let max_results = query.get_max_per_page().unwrap_or(self.max_per_page).to_string();

        let url = format!("{}/search", self.base_url);
        let mut params = vec![
            ("key", api_key),
            ("part", PART),
            ("channelId", channel_id),
            ("type", "video"),
            ("maxResults", max_results.as_str()),
        ];
        if let Some(token) = query.get_page_token() {
            params.push(("pageToken", token));
        }

        debug!(%url, channel_id, page_token = ?query.get_page_token(), "listing channel videos");
        let mapper = match self.get(&url, &params).await {
            Ok(mapper) => mapper,
            Err(payload) => return Ok(ApiResponse::Failure(payload)),
        };
        Ok(ApiResponse::Success(mapper?.video_list()?))
    }

    fn resolve_api_key<'a>(&'a self, query_key: Option<&'a str>) -> Result<&'a str> {
        query_key
            .or(Some(self.api_key.as_str()))
            .filter(|key| !key.is_empty())
            .ok_or(Error::MissingApiKey)
    }

    /// Send one GET request and decode its body.
    ///
    /// The outer `Err` carries transport failures; the inner result carries
    /// a body that is not JSON.
    async fn get(
        &self,
        url: &str,
        params: &[(&str, &str)],
    ) -> std::result::Result<Result<ResponseMapper>, ErrorPayload> {
        let body = async {
            self.client
                .get(url)
                .query(params)
                .send()
                .await?
                .error_for_status()?
                .text()
                .await
        }
        .await
        .map_err(|err| {
            // The request URL carries the API key.
            let err = err.without_url();
            let payload = ErrorPayload::from_transport(&err);
            warn!(%url, code = payload.code, error = %err, "YouTube API request failed");
            payload
        })?;

        Ok(ResponseMapper::from_body(&body))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::youtube::resolver::INVALID_URL;
    use reqwest::Url;
    use std::collections::HashMap;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;
    use tokio::task::JoinHandle;

    const VIDEO_BODY: &str = r#"{
        "items": [{
            "id": "abc123",
            "snippet": {
                "title": "Title",
                "description": " Description ",
                "channelTitle": "Channel",
                "publishedAt": "2024-01-15T10:30:00Z",
                "thumbnails": {
                    "default": { "url": "https://i.ytimg.com/d.jpg", "width": 120, "height": 90 },
                    "medium": { "url": "https://i.ytimg.com/m.jpg", "width": 320, "height": 180 },
                    "high": { "url": "https://i.ytimg.com/h.jpg", "width": 480, "height": 360 }
                }
            }
        }]
    }"#;

    const EMPTY_SEARCH_BODY: &str =
        r#"{"items":[],"pageInfo":{"totalResults":0,"resultsPerPage":15}}"#;

    /// Serve a single canned HTTP response and hand back the request target.
    async fn serve_once(status: &'static str, body: &'static str) -> (String, JoinHandle<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let base_url = format!("http://{}/youtube/v3", listener.local_addr().unwrap());

        let handle = tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut request = Vec::new();
            let mut buf = [0u8; 1024];
            while !request.windows(4).any(|w| w == b"\r\n\r\n") {
                let n = socket.read(&mut buf).await.unwrap();
                if n == 0 {
                    break;
                }
                request.extend_from_slice(&buf[..n]);
            }
            let response = format!(
                "HTTP/1.1 {status}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
                body.len()
            );
            socket.write_all(response.as_bytes()).await.unwrap();
            socket.shutdown().await.unwrap();

            let request = String::from_utf8_lossy(&request).into_owned();
            request
                .lines()
                .next()
                .and_then(|line| line.split_whitespace().nth(1))
                .unwrap_or_default()
                .to_string()
        });

        (base_url, handle)
    }

    fn client(base_url: &str, api_key: &str) -> YouTubeClient {
        let config = Config {
            base_url: base_url.to_string(),
            ..Config::with_api_key(api_key)
        };
        YouTubeClient::new(&config).unwrap()
    }

    fn query_pairs(target: &str) -> (String, HashMap<String, String>) {
        let url = Url::parse(&format!("http://localhost{target}")).unwrap();
        let pairs = url.query_pairs().into_owned().collect();
        (url.path().to_string(), pairs)
    }

    #[test]
    fn test_client_new_without_api_key() {
        assert!(YouTubeClient::new(&Config::default()).is_ok());
    }

    #[test]
    fn test_client_new_with_timeout() {
        let config = Config {
            timeout_secs: Some(5),
            ..Config::with_api_key("key")
        };
        assert!(YouTubeClient::new(&config).is_ok());
    }

    #[tokio::test]
    async fn test_fetch_requires_video_id() {
        let client = client("http://127.0.0.1:9", "key");
        let err = client.fetch(&VideoQuery::new()).await.unwrap_err();
        assert!(matches!(err, Error::MissingVideoId));
    }

    #[tokio::test]
    async fn test_fetch_requires_api_key() {
        let client = client("http://127.0.0.1:9", "");
        let query = VideoQuery::new().video_id("abc123").unwrap();
        let err = client.fetch(&query).await.unwrap_err();
        assert!(matches!(err, Error::MissingApiKey));
    }

    #[tokio::test]
    async fn test_video_list_requires_channel_id() {
        let client = client("http://127.0.0.1:9", "key");
        let err = client.video_list(&ChannelQuery::new()).await.unwrap_err();
        assert!(matches!(err, Error::MissingChannelId));

        let err = client
            .video_list(&ChannelQuery::new().channel_id(""))
            .await
            .unwrap_err();
        assert!(matches!(err, Error::MissingChannelId));
    }

    #[tokio::test]
    async fn test_video_list_requires_api_key() {
        let client = client("http://127.0.0.1:9", "");
        let query = ChannelQuery::new().channel_id("UCchannel");
        let err = client.video_list(&query).await.unwrap_err();
        assert!(matches!(err, Error::MissingApiKey));

        let err = client.video_list(&query.api_key("")).await.unwrap_err();
        assert!(matches!(err, Error::MissingApiKey));
    }

    #[tokio::test]
    async fn test_fetch_sends_video_request() {
        let (base_url, server) = serve_once("200 OK", VIDEO_BODY).await;
        let client = client(&base_url, "default-key");
        let query = VideoQuery::new().video_url("https://www.youtube.com/watch?v=abc123&t=5");

        let metadata = client.fetch(&query).await.unwrap().success().unwrap();
        assert_eq!(metadata.video_id(), "abc123");
        assert_eq!(metadata.description(), "Description");

        let (path, params) = query_pairs(&server.await.unwrap());
        assert_eq!(path, "/youtube/v3/videos");
        assert_eq!(params["part"], "id, snippet");
        assert_eq!(params["key"], "default-key");
        assert_eq!(params["id"], "abc123");
    }

    #[tokio::test]
    async fn test_query_api_key_overrides_default() {
        let (base_url, server) = serve_once("200 OK", VIDEO_BODY).await;
        let client = client(&base_url, "default-key");
        let query = VideoQuery::new().video_id("abc123").unwrap().api_key("own-key");

        assert!(client.fetch(&query).await.unwrap().is_success());
        let (_, params) = query_pairs(&server.await.unwrap());
        assert_eq!(params["key"], "own-key");
    }

    #[tokio::test]
    async fn test_fetch_sentinel_id_reaches_mapper() {
        let (base_url, server) = serve_once("200 OK", r#"{"items":[]}"#).await;
        let client = client(&base_url, "key");
        let query = VideoQuery::new().video_url("not a youtube url");

        let err = client.fetch(&query).await.unwrap_err();
        assert!(matches!(err, Error::UnexpectedShape(_)));
        let (_, params) = query_pairs(&server.await.unwrap());
        assert_eq!(params["id"], INVALID_URL);
    }

    #[tokio::test]
    async fn test_fetch_http_error_becomes_payload() {
        let (base_url, server) = serve_once("404 Not Found", r#"{"error":{}}"#).await;
        let client = client(&base_url, "key");
        let query = VideoQuery::new().video_id("abc123").unwrap();

        let response = client.fetch(&query).await.unwrap();
        let payload = response.failure().unwrap();
        assert_eq!(payload.status, ERROR_STATUS);
        assert_eq!(payload.code, 404);
        assert_eq!(payload.to_json()["code"], 404);
        assert!(payload.to_json()["message"].is_string());
        assert!(!payload.message.contains("key="));
        server.await.unwrap();
    }

    #[tokio::test]
    async fn test_fetch_connection_error_becomes_payload() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let client = client(&format!("http://{addr}"), "key");
        let query = VideoQuery::new().video_id("abc123").unwrap();

        let response = client.fetch(&query).await.unwrap();
        let payload = response.failure().unwrap();
        assert_eq!(payload.code, 0);
        assert!(!payload.message.is_empty());
    }

    #[tokio::test]
    async fn test_fetch_non_json_body_is_error() {
        let (base_url, server) = serve_once("200 OK", "<html></html>").await;
        let client = client(&base_url, "key");
        let query = VideoQuery::new().video_id("abc123").unwrap();

        assert!(matches!(client.fetch(&query).await, Err(Error::Json(_))));
        server.await.unwrap();
    }

    #[tokio::test]
    async fn test_video_list_sends_search_request() {
        let (base_url, server) = serve_once("200 OK", EMPTY_SEARCH_BODY).await;
        let client = client(&base_url, "key");
        let query = ChannelQuery::new().channel_id("UCchannel");

        let list = client.video_list(&query).await.unwrap().success().unwrap();
        assert!(list.items().is_empty());
        assert!(list.next_page_token().is_absent());
        assert!(list.prev_page_token().is_absent());

        let (path, params) = query_pairs(&server.await.unwrap());
        assert_eq!(path, "/youtube/v3/search");
        assert_eq!(params["key"], "key");
        assert_eq!(params["part"], "id, snippet");
        assert_eq!(params["channelId"], "UCchannel");
        assert_eq!(params["type"], "video");
        assert_eq!(params["maxResults"], "15");
        assert!(!params.contains_key("pageToken"));
    }

    #[tokio::test]
    async fn test_video_list_sends_page_size_and_token() {
        let (base_url, server) = serve_once("200 OK", EMPTY_SEARCH_BODY).await;
        let client = client(&base_url, "key");
        let query = ChannelQuery::new()
            .channel_id("UCchannel")
            .max_per_page(50)
            .paginate("CAoQAA");

        assert!(client.video_list(&query).await.unwrap().is_success());

        let (_, params) = query_pairs(&server.await.unwrap());
        assert_eq!(params["maxResults"], "50");
        assert_eq!(params["pageToken"], "CAoQAA");
    }

    #[tokio::test]
    async fn test_video_list_http_error_becomes_payload() {
        let (base_url, server) = serve_once("403 Forbidden", r#"{"error":{}}"#).await;
        let client = client(&base_url, "key");
        let query = ChannelQuery::new().channel_id("UCchannel");

        let response = client.video_list(&query).await.unwrap();
        assert_eq!(response.failure().map(|p| p.code), Some(403));
        server.await.unwrap();
    }
}
