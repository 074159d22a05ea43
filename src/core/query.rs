//! Search queries and the search mode switch

use crate::error::FrontError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// What a search looks for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SearchMode {
    /// Creator channels (default)
    #[default]
    Channels,
    /// Individual videos
    Videos,
}

impl SearchMode {
    /// Value of the `type` query parameter
    pub fn as_str(&self) -> &'static str {
        match self {
            SearchMode::Channels => "channels",
            SearchMode::Videos => "videos",
        }
    }

    /// The other mode
    pub fn toggled(&self) -> SearchMode {
        match self {
            SearchMode::Channels => SearchMode::Videos,
            SearchMode::Videos => SearchMode::Channels,
        }
    }

    /// Label shown next to the toggle
    pub fn label(&self) -> &'static str {
        match self {
            SearchMode::Channels => "Search by: Channels",
            SearchMode::Videos => "Search by: Videos",
        }
    }

    /// Placeholder of the search input
    pub fn placeholder(&self) -> &'static str {
        match self {
            SearchMode::Channels => "Search for YouTube channels...",
            SearchMode::Videos => "Search for videos...",
        }
    }

    /// Headline of the loading state
    pub fn loading_message(&self) -> &'static str {
        match self {
            SearchMode::Channels => "Discovering YouTube creators...",
            SearchMode::Videos => "Searching for videos...",
        }
    }

    /// Class of the loading container
    pub fn loading_class(&self) -> &'static str {
        match self {
            SearchMode::Channels => "loading-container channel-loading",
            SearchMode::Videos => "loading-container video-loading",
        }
    }
}

impl fmt::Display for SearchMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SearchMode {
    type Err = FrontError;

    /// Parse the wire value, ignoring case
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "channels" => Ok(SearchMode::Channels),
            "videos" => Ok(SearchMode::Videos),
            other => Err(FrontError::Generic(format!("unknown search type: {}", other))),
        }
    }
}

/// A search as issued to the backend; immutable once built
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchQuery {
    text: String,
    mode: SearchMode,
}

impl SearchQuery {
    /// Build a query from raw input. Whitespace-only input is rejected.
    pub fn new(text: &str, mode: SearchMode) -> Result<Self, FrontError> {
        let text = text.trim();
        if text.is_empty() {
            return Err(FrontError::EmptyQuery);
        }
        Ok(Self {
            text: text.to_string(),
            mode,
        })
    }

    /// Trimmed query text
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Search mode
    pub fn mode(&self) -> SearchMode {
        self.mode
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_query_is_trimmed() {
        let query = SearchQuery::new("  cats \n", SearchMode::Videos).unwrap();
        assert_eq!(query.text(), "cats");
        assert_eq!(query.mode(), SearchMode::Videos);
    }

    #[test]
    fn test_blank_query_rejected() {
        assert!(matches!(
            SearchQuery::new(" \t ", SearchMode::Channels),
            Err(FrontError::EmptyQuery)
        ));
        assert!(SearchQuery::new("", SearchMode::Channels).is_err());
    }

    #[test]
    fn test_mode_toggle_and_labels() {
        let mode = SearchMode::default();
        assert_eq!(mode, SearchMode::Channels);
        assert_eq!(mode.toggled(), SearchMode::Videos);
        assert_eq!(mode.toggled().toggled(), SearchMode::Channels);
        assert_eq!(SearchMode::Videos.label(), "Search by: Videos");
        assert_eq!(SearchMode::Channels.placeholder(), "Search for YouTube channels...");
    }

    #[test]
    fn test_mode_wire_values() {
        assert_eq!("Videos".parse::<SearchMode>().unwrap(), SearchMode::Videos);
        assert_eq!("channels".parse::<SearchMode>().unwrap(), SearchMode::Channels);
        assert!(matches!(
            "playlists".parse::<SearchMode>(),
            Err(FrontError::Generic(_))
        ));
        assert_eq!(SearchMode::Channels.to_string(), "channels");
    }
}
