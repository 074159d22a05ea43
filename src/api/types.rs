//! Request and response bodies of the backend endpoints

use crate::core::{
    ChannelSummary, ResultItems, SearchMode, SearchResultSet, StreamOption, VideoSummary,
};
use crate::error::FrontError;
use serde::{Deserialize, Serialize};

/// `GET /search`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SearchResponse {
    /// Declared result type ("channels" or "videos")
    #[serde(default)]
    pub search_type: Option<String>,
    /// Channel results
    #[serde(default)]
    pub channels: Option<Vec<ChannelSummary>>,
    /// Video results
    #[serde(default)]
    pub results: Option<Vec<VideoSummary>>,
    /// Total matches known to the backend
    #[serde(default)]
    pub total_results: Option<usize>,
    /// Error text on non-ok responses
    #[serde(default)]
    pub error: Option<String>,
}

impl SearchResponse {
    /// Extract the result set for the requested mode.
    ///
    /// Returns `None` when the declared type differs from `mode` or the list
    /// the mode expects is missing.
    pub fn into_result_set(self, mode: SearchMode) -> Option<SearchResultSet> {
        let declared = self
            .search_type
            .as_deref()
            .and_then(|t| t.parse::<SearchMode>().ok())?;
        if declared != mode {
            return None;
        }

        let items = match mode {
            SearchMode::Channels => ResultItems::Channels(self.channels?),
            SearchMode::Videos => ResultItems::Videos(self.results?),
        };
        Some(SearchResultSet::new(items, self.total_results))
    }
}

/// `GET /video/download-options/{id}`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DownloadOptionsResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub author: String,
    #[serde(default)]
    pub thumbnail: String,
    /// Length in seconds
    #[serde(default)]
    pub length: u64,
    #[serde(default)]
    pub video_streams: Vec<StreamOption>,
    #[serde(default)]
    pub audio_streams: Vec<StreamOption>,
}

/// Metadata and streams of a video, ready for the dialog
#[derive(Debug, Clone, PartialEq)]
pub struct DownloadOptions {
    pub title: String,
    pub author: String,
    pub thumbnail: String,
    pub length_secs: u64,
    pub video_streams: Vec<StreamOption>,
    pub audio_streams: Vec<StreamOption>,
}

impl DownloadOptionsResponse {
    /// Turn `success:false` into a rejection
    pub fn into_result(self, status: Option<u16>) -> Result<DownloadOptions, FrontError> {
        if !self.success {
            return Err(FrontError::rejected(status, self.error));
        }
        Ok(DownloadOptions {
            title: self.title,
            author: self.author,
            thumbnail: self.thumbnail,
            length_secs: self.length,
            video_streams: self.video_streams,
            audio_streams: self.audio_streams,
        })
    }
}

/// `GET /video/download/{id}?itag=`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DownloadResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub error: Option<String>,
    /// Server-relative path of the produced file
    #[serde(default)]
    pub file_path: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub note: Option<String>,
}

/// A finished server-side download
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownloadResult {
    pub file_path: String,
    pub title: String,
    pub note: Option<String>,
}

impl DownloadResult {
    /// Link target for the produced file
    pub fn href(&self) -> String {
        format!("/{}", self.file_path.trim_start_matches('/'))
    }

    /// Suggested file name: the last path segment
    pub fn file_name(&self) -> &str {
        self.file_path
            .rsplit('/')
            .next()
            .unwrap_or(&self.file_path)
    }
}

impl DownloadResponse {
    /// Turn `success:false` into a rejection
    pub fn into_result(self, status: Option<u16>) -> Result<DownloadResult, FrontError> {
        if !self.success {
            return Err(FrontError::rejected(status, self.error));
        }
        Ok(DownloadResult {
            file_path: self.file_path,
            title: self.title,
            note: self.note.filter(|n| !n.trim().is_empty()),
        })
    }
}

/// `POST /save-video/{id}` body
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SaveVideoRequest {
    pub title: String,
    pub thumbnail: String,
}

/// `POST /save-video/{id}` response
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SaveVideoResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_channels_response_to_set() {
        let response: SearchResponse = serde_json::from_str(
            r#"{"search_type":"channels","channels":[{"id":"c1","name":"Cat Channel"}],"total_results":1}"#,
        )
        .unwrap();
        let set = response.into_result_set(SearchMode::Channels).unwrap();
        assert_eq!(set.total_available, 1);
        assert!(matches!(set.items, ResultItems::Channels(ref c) if c[0].id == "c1"));
    }

    #[test]
    fn test_mismatched_type_is_no_results() {
        let response: SearchResponse =
            serde_json::from_str(r#"{"search_type":"videos","results":[]}"#).unwrap();
        assert!(response.into_result_set(SearchMode::Channels).is_none());
    }

    #[test]
    fn test_missing_list_is_no_results() {
        // the backend answers an empty channel search with `results`
        let response: SearchResponse =
            serde_json::from_str(r#"{"search_type":"channels","results":[]}"#).unwrap();
        assert!(response.into_result_set(SearchMode::Channels).is_none());
    }

    #[test]
    fn test_options_rejection_keeps_message() {
        let response: DownloadOptionsResponse = serde_json::from_str(
            r#"{"success":false,"error":"Failed to load video data: HTTP 404"}"#,
        )
        .unwrap();
        let err = response.into_result(None).unwrap_err();
        assert_eq!(err.user_message("x"), "Failed to load video data: HTTP 404");
    }

    #[test]
    fn test_error_only_body_is_rejection() {
        let response: DownloadOptionsResponse =
            serde_json::from_str(r#"{"error":"Failed to get download options"}"#).unwrap();
        assert!(response.into_result(Some(500)).unwrap_err().is_rejection());
    }

    #[test]
    fn test_download_result_link() {
        let result = DownloadResponse {
            success: true,
            file_path: "downloads/My Video.mp4".to_string(),
            title: "My Video".to_string(),
            note: Some(String::new()),
            error: None,
        }
        .into_result(None)
        .unwrap();
        assert_eq!(result.href(), "/downloads/My Video.mp4");
        assert_eq!(result.file_name(), "My Video.mp4");
        assert_eq!(result.note, None);
    }
}
