//! Error types for tubefront

use crate::page::Region;
use thiserror::Error;

/// Main error type for tubefront operations
#[derive(Debug, Error)]
pub enum FrontError {
    #[error("Search query is empty")]
    EmptyQuery,

    #[error("Page region not found: {0}")]
    MissingRegion(Region),

    #[error("{}", .message.as_deref().unwrap_or("Request rejected by server"))]
    Rejected {
        /// HTTP status, when the rejection came with a non-ok status
        status: Option<u16>,
        /// Server-provided message, if any
        message: Option<String>,
    },

    #[error("Response superseded by a newer request (seq {0})")]
    Superseded(u64),

    #[error("{0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("URL parsing error: {0}")]
    Url(#[from] url::ParseError),

    #[error("Generic error: {0}")]
    Generic(String),
}

impl FrontError {
    /// Build a rejection carrying the server message
    pub fn rejected(status: Option<u16>, message: Option<String>) -> Self {
        FrontError::Rejected {
            status,
            message: message.filter(|m| !m.trim().is_empty()),
        }
    }

    /// Check if error is a local validation failure (never shown to the user)
    pub fn is_local_validation(&self) -> bool {
        matches!(self, FrontError::EmptyQuery)
    }

    /// Check if error came from the network or response decoding
    pub fn is_transport(&self) -> bool {
        matches!(
            self,
            FrontError::Http(_) | FrontError::Json(_) | FrontError::Url(_)
        )
    }

    /// Check if error is an application-level rejection
    pub fn is_rejection(&self) -> bool {
        matches!(self, FrontError::Rejected { .. })
    }

    /// Text to put in front of the user.
    ///
    /// Rejections use the server message or `fallback`; transport failures
    /// carry the raw error text.
    pub fn user_message(&self, fallback: &str) -> String {
        match self {
            FrontError::Rejected {
                message: Some(message),
                ..
            } => message.clone(),
            FrontError::Rejected { message: None, .. } => fallback.to_string(),
            other => format!("Error: {}", other),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_message_prefers_server_text() {
        let err = FrontError::rejected(Some(500), Some("Failed to get download options".into()));
        assert_eq!(
            err.user_message("fallback"),
            "Failed to get download options"
        );
    }

    #[test]
    fn test_user_message_falls_back_when_blank() {
        let err = FrontError::rejected(None, Some("   ".into()));
        assert_eq!(err.user_message("Download failed"), "Download failed");
        assert!(err.is_rejection());
    }

    #[test]
    fn test_transport_message_is_prefixed() {
        let err = FrontError::Json(serde_json::from_str::<u32>("nope").unwrap_err());
        assert!(err.is_transport());
        assert!(err.user_message("x").starts_with("Error: JSON error"));
    }

    #[test]
    fn test_classification() {
        assert!(FrontError::EmptyQuery.is_local_validation());
        assert!(!FrontError::Superseded(3).is_transport());
        assert!(!FrontError::MissingRegion(Region::DownloadDialog).is_rejection());
    }
}
