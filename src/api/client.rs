//! HTTP client for the front end's backend endpoints

use crate::api::types::{
    DownloadOptions, DownloadOptionsResponse, DownloadResponse, DownloadResult, SaveVideoRequest,
    SaveVideoResponse, SearchResponse,
};
use crate::core::SearchQuery;
use crate::error::FrontError;
use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, COOKIE};
use reqwest::{Client, ClientBuilder, Response};
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::{debug, warn};
use url::Url;

/// The endpoints the controllers call.
///
/// Implemented over HTTP by [`BackendClient`]; tests substitute scripted
/// backends.
#[async_trait]
pub trait Backend: Send + Sync {
    /// `GET /search?q=&type=`
    async fn search(&self, query: &SearchQuery) -> Result<SearchResponse, FrontError>;

    /// `GET /video/download-options/{video_id}`
    async fn download_options(&self, video_id: &str) -> Result<DownloadOptions, FrontError>;

    /// `GET /video/download/{video_id}?itag=`
    async fn start_download(&self, video_id: &str, itag: u32) -> Result<DownloadResult, FrontError>;

    /// `POST /save-video/{video_id}`
    async fn save_video(
        &self,
        video_id: &str,
        request: &SaveVideoRequest,
    ) -> Result<SaveVideoResponse, FrontError>;
}

/// HTTP client configuration
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Origin serving the backend endpoints
    pub base_url: String,
    /// Request timeout; none by default, a hung request keeps its loader up
    pub timeout: Option<Duration>,
    /// User agent string
    pub user_agent: Option<String>,
    /// Session cookie of a logged-in user
    pub session_cookie: Option<String>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:5000".to_string(),
            timeout: None,
            user_agent: None,
            session_cookie: None,
        }
    }
}

impl ClientConfig {
    /// Set the backend origin
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Set a request timeout
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Set the user agent
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    /// Send a session cookie with every request
    pub fn with_session_cookie(mut self, cookie: impl Into<String>) -> Self {
        self.session_cookie = Some(cookie.into());
        self
    }
}

/// Backend client over HTTP
pub struct BackendClient {
    client: Client,
    base_url: Url,
}

impl BackendClient {
    /// Create a client with default configuration
    pub fn new() -> Result<Self, FrontError> {
        Self::with_config(ClientConfig::default())
    }

    /// Create a client with custom configuration
    pub fn with_config(config: ClientConfig) -> Result<Self, FrontError> {
        let base_url = Url::parse(&config.base_url)?;
        if base_url.cannot_be_a_base() {
            return Err(FrontError::Generic(format!(
                "Backend URL cannot carry paths: {}",
                config.base_url
            )));
        }

        let mut builder = ClientBuilder::new()
            .gzip(true)
            .brotli(true)
            .cookie_store(true);

        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }

        if let Some(user_agent) = &config.user_agent {
            builder = builder.user_agent(user_agent);
        } else {
            builder = builder.user_agent(concat!("tubefront/", env!("CARGO_PKG_VERSION")));
        }

        if let Some(cookie) = &config.session_cookie {
            let mut headers = HeaderMap::new();
            let value = HeaderValue::from_str(cookie)
                .map_err(|e| FrontError::Generic(format!("Invalid session cookie: {}", e)))?;
            headers.insert(COOKIE, value);
            builder = builder.default_headers(headers);
        }

        Ok(Self {
            client: builder.build()?,
            base_url,
        })
    }

    /// Backend origin
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Build an endpoint URL; segments are percent-encoded
    fn endpoint(&self, segments: &[&str]) -> Result<Url, FrontError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| FrontError::Generic("Backend URL cannot carry paths".to_string()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    /// Read a JSON body whatever the status; the status is returned when not ok
    async fn read_json<T: DeserializeOwned>(
        response: Response,
    ) -> Result<(T, Option<u16>), FrontError> {
        let status = response.status();
        let path = response.url().path().to_string();
        let body = response.text().await?;
        let parsed = serde_json::from_str(&body)?;
        let failed_status = if status.is_success() {
            None
        } else {
            warn!("Backend answered {} for {}", status, path);
            Some(status.as_u16())
        };
        Ok((parsed, failed_status))
    }
}

#[async_trait]
impl Backend for BackendClient {
    async fn search(&self, query: &SearchQuery) -> Result<SearchResponse, FrontError> {
        let url = self.endpoint(&["search"])?;
        debug!("Searching {} for {:?}", query.mode(), query.text());

        let response = self
            .client
            .get(url)
            .query(&[("q", query.text()), ("type", query.mode().as_str())])
            .send()
            .await?;

        let (body, failed_status): (SearchResponse, _) = Self::read_json(response).await?;
        if failed_status.is_some() {
            return Err(FrontError::rejected(failed_status, body.error));
        }
        Ok(body)
    }

    async fn download_options(&self, video_id: &str) -> Result<DownloadOptions, FrontError> {
        let url = self.endpoint(&["video", "download-options", video_id])?;
        debug!("Fetching download options for {}", video_id);

        let response = self.client.get(url).send().await?;
        let (body, failed_status): (DownloadOptionsResponse, _) =
            Self::read_json(response).await?;
        body.into_result(failed_status)
    }

    async fn start_download(&self, video_id: &str, itag: u32) -> Result<DownloadResult, FrontError> {
        let url = self.endpoint(&["video", "download", video_id])?;
        debug!("Requesting download of {} itag={}", video_id, itag);

        let response = self
            .client
            .get(url)
            .query(&[("itag", itag)])
            .send()
            .await?;
        let (body, failed_status): (DownloadResponse, _) = Self::read_json(response).await?;
        body.into_result(failed_status)
    }

    async fn save_video(
        &self,
        video_id: &str,
        request: &SaveVideoRequest,
    ) -> Result<SaveVideoResponse, FrontError> {
        let url = self.endpoint(&["save-video", video_id])?;
        debug!("Saving video {}", video_id);

        let response = self.client.post(url).json(request).send().await?;
        // Failures still carry `{success:false, message}`
        let (body, _): (SaveVideoResponse, _) = Self::read_json(response).await?;
        Ok(body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::SearchMode;
    use mockito::Matcher;

    fn client_for(server: &mockito::ServerGuard) -> BackendClient {
        BackendClient::with_config(ClientConfig::default().with_base_url(server.url())).unwrap()
    }

    #[test]
    fn test_client_config_builder() {
        let config = ClientConfig::default()
            .with_base_url("http://example.com")
            .with_timeout(Duration::from_secs(10))
            .with_user_agent("test-agent")
            .with_session_cookie("session=abc");
        assert_eq!(config.base_url, "http://example.com");
        assert_eq!(config.timeout, Some(Duration::from_secs(10)));
        assert_eq!(config.user_agent.as_deref(), Some("test-agent"));
        assert_eq!(config.session_cookie.as_deref(), Some("session=abc"));
        assert!(ClientConfig::default().timeout.is_none());
    }

    #[test]
    fn test_invalid_base_url() {
        let result = BackendClient::with_config(ClientConfig::default().with_base_url("::"));
        assert!(matches!(result, Err(FrontError::Url(_))));
    }

    #[test]
    fn test_endpoint_encodes_segments() {
        let client = BackendClient::with_config(
            ClientConfig::default().with_base_url("http://example.com/app/"),
        )
        .unwrap();
        let url = client.endpoint(&["video", "download", "a b/c"]).unwrap();
        assert_eq!(url.as_str(), "http://example.com/app/video/download/a%20b%2Fc");
    }

    #[tokio::test]
    async fn test_search_sends_query_and_type() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/search")
            .match_query(Matcher::AllOf(vec![
                Matcher::UrlEncoded("q".into(), "cats and dogs".into()),
                Matcher::UrlEncoded("type".into(), "channels".into()),
            ]))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                r#"{"search_type":"channels","channels":[{"id":"c1","name":"Cat Channel"}],"total_results":1}"#,
            )
            .expect(1)
            .create_async()
            .await;

        let client = client_for(&server);
        let query = SearchQuery::new("  cats and dogs ", SearchMode::Channels).unwrap();
        let response = client.search(&query).await.unwrap();

        mock.assert_async().await;
        assert_eq!(response.search_type.as_deref(), Some("channels"));
        assert_eq!(response.channels.unwrap()[0].name, "Cat Channel");
    }

    #[tokio::test]
    async fn test_search_error_status_uses_error_field() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/search")
            .match_query(Matcher::Any)
            .with_status(500)
            .with_body(r#"{"error":"Failed to fetch search results"}"#)
            .create_async()
            .await;

        let client = client_for(&server);
        let query = SearchQuery::new("cats", SearchMode::Videos).unwrap();
        let err = client.search(&query).await.unwrap_err();
        assert!(matches!(err, FrontError::Rejected { status: Some(500), .. }));
        assert_eq!(err.user_message("Search failed"), "Failed to fetch search results");
    }

    #[tokio::test]
    async fn test_search_non_json_is_transport_failure() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/search")
            .match_query(Matcher::Any)
            .with_status(502)
            .with_body("<html>Bad Gateway</html>")
            .create_async()
            .await;

        let client = client_for(&server);
        let query = SearchQuery::new("cats", SearchMode::Videos).unwrap();
        let err = client.search(&query).await.unwrap_err();
        assert!(err.is_transport());
    }

    #[tokio::test]
    async fn test_download_options_success() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/video/download-options/abc123")
            .with_status(200)
            .with_body(
                r#"{"success":true,"title":"T","author":"A","thumbnail":"https://i/t.jpg","length":125,
                    "video_streams":[],
                    "audio_streams":[{"itag":5,"abr":"128kbps","mime_type":"audio/mp4","size_mb":3.2}]}"#,
            )
            .create_async()
            .await;

        let client = client_for(&server);
        let options = client.download_options("abc123").await.unwrap();
        assert_eq!(options.length_secs, 125);
        assert!(options.video_streams.is_empty());
        assert_eq!(options.audio_streams[0].itag, 5);
    }

    #[tokio::test]
    async fn test_download_options_server_error_body() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/video/download-options/abc123")
            .with_status(500)
            .with_body(r#"{"error":"Failed to get download options"}"#)
            .create_async()
            .await;

        let client = client_for(&server);
        let err = client.download_options("abc123").await.unwrap_err();
        assert_eq!(
            err.user_message("Failed to load download options"),
            "Failed to get download options"
        );
    }

    #[tokio::test]
    async fn test_start_download_passes_itag() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/video/download/abc123")
            .match_query(Matcher::UrlEncoded("itag".into(), "140".into()))
            .with_status(200)
            .with_body(
                r#"{"success":true,"file_path":"downloads/abc123.m4a","title":"T","note":"Audio only"}"#,
            )
            .create_async()
            .await;

        let client = client_for(&server);
        let result = client.start_download("abc123", 140).await.unwrap();
        mock.assert_async().await;
        assert_eq!(result.file_name(), "abc123.m4a");
        assert_eq!(result.note.as_deref(), Some("Audio only"));
    }

    #[tokio::test]
    async fn test_save_video_posts_json() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/save-video/abc123")
            .match_body(Matcher::Json(serde_json::json!({
                "title": "It's a \"title\"",
                "thumbnail": "https://i/t.jpg"
            })))
            .with_status(200)
            .with_body(r#"{"success":false,"message":"Video already in your collection"}"#)
            .create_async()
            .await;

        let client = client_for(&server);
        let response = client
            .save_video(
                "abc123",
                &SaveVideoRequest {
                    title: "It's a \"title\"".to_string(),
                    thumbnail: "https://i/t.jpg".to_string(),
                },
            )
            .await
            .unwrap();

        mock.assert_async().await;
        assert!(!response.success);
        assert_eq!(response.message, "Video already in your collection");
    }
}
