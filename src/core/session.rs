//! Download sessions, stream options and player state

use serde::{Deserialize, Serialize};
use std::fmt;

/// Size of a stream as reported by the backend.
///
/// Usually megabytes; some backends send a note such as
/// "Unknown (size calculated during download)" instead.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum StreamSize {
    Megabytes(f64),
    Label(String),
}

impl Default for StreamSize {
    fn default() -> Self {
        StreamSize::Label("Unknown".to_string())
    }
}

impl fmt::Display for StreamSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StreamSize::Megabytes(mb) => write!(f, "{} MB", mb),
            StreamSize::Label(label) => f.write_str(label),
        }
    }
}

/// Which list a stream belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StreamKind {
    Video,
    Audio,
}

impl StreamKind {
    /// Placeholder row text when the list is empty
    pub fn none_available(&self) -> &'static str {
        match self {
            StreamKind::Video => "No video streams available",
            StreamKind::Audio => "No audio streams available",
        }
    }
}

/// One downloadable stream variant
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StreamOption {
    /// Stream identifier, unique per session and kind
    pub itag: u32,
    /// Resolution for video rows, bitrate for audio rows
    #[serde(alias = "resolution", alias = "abr", default)]
    pub label: String,
    /// MIME type (e.g. "video/mp4")
    #[serde(default)]
    pub mime_type: String,
    /// Reported size
    #[serde(rename = "size_mb", default)]
    pub size: StreamSize,
}

impl StreamOption {
    /// Container part of the MIME type ("mp4" for "video/mp4; codecs=...")
    pub fn container(&self) -> &str {
        let subtype = self
            .mime_type
            .split_once('/')
            .map(|(_, sub)| sub)
            .unwrap_or(&self.mime_type);
        subtype.split(';').next().unwrap_or(subtype).trim()
    }
}

/// Phase of the download dialog
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DownloadPhase {
    #[default]
    Idle,
    FetchingOptions,
    OptionsReady,
    OptionsFailed,
    Downloading,
    DownloadSucceeded,
    DownloadFailed,
}

/// State of the open download dialog
#[derive(Debug, Clone, PartialEq)]
pub struct DownloadSession {
    /// Video the dialog was opened for
    pub video_id: String,
    /// Current phase
    pub phase: DownloadPhase,
    /// Video streams, in backend order
    pub video_streams: Vec<StreamOption>,
    /// Audio streams, in backend order
    pub audio_streams: Vec<StreamOption>,
    /// Message shown in the error panel
    pub error_message: Option<String>,
    /// Sequence number of the request that opened the session
    pub seq: u64,
}

impl DownloadSession {
    /// Fresh session waiting for its options
    pub fn new(video_id: impl Into<String>, seq: u64) -> Self {
        Self {
            video_id: video_id.into(),
            phase: DownloadPhase::FetchingOptions,
            video_streams: Vec::new(),
            audio_streams: Vec::new(),
            error_message: None,
            seq,
        }
    }

    /// Find a stream by itag in either list
    pub fn stream(&self, itag: u32) -> Option<(StreamKind, &StreamOption)> {
        self.video_streams
            .iter()
            .find(|s| s.itag == itag)
            .map(|s| (StreamKind::Video, s))
            .or_else(|| {
                self.audio_streams
                    .iter()
                    .find(|s| s.itag == itag)
                    .map(|s| (StreamKind::Audio, s))
            })
    }
}

/// What is playing on the page
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PlayerState {
    /// Currently embedded video
    pub active_video_id: Option<String>,
    /// Read once from the page context
    pub is_logged_in: bool,
}
