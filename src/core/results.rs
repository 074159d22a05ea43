//! Search results and the catalog of rendered videos

use crate::core::SearchMode;
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::HashMap;
use std::sync::{PoisonError, RwLock};

/// One video in a result list
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct VideoSummary {
    /// Video ID, the stable key
    pub id: String,
    /// Video title
    #[serde(default)]
    pub title: String,
    /// Thumbnail URL
    #[serde(rename = "thumbnail", default)]
    pub thumbnail_url: String,
    /// Duration as displayed (e.g. "12:04")
    #[serde(rename = "duration", default)]
    pub duration_label: String,
    /// Owning channel; `None` disables the channel link
    #[serde(default, deserialize_with = "non_empty")]
    pub channel_id: Option<String>,
    /// Channel display name
    #[serde(rename = "channel", default)]
    pub channel_name: String,
    /// Raw view count text (e.g. "1,234,567 views")
    #[serde(rename = "views", default)]
    pub views_raw: String,
    /// Relative publish time (e.g. "3 years ago")
    #[serde(rename = "publish_time", default)]
    pub publish_time_label: String,
    /// Description snippet
    #[serde(default, deserialize_with = "non_empty")]
    pub description: Option<String>,
}

/// One channel in a result list
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ChannelSummary {
    /// Channel ID
    pub id: String,
    /// Channel name
    #[serde(default)]
    pub name: String,
    /// Avatar URL
    #[serde(rename = "thumbnail", default, deserialize_with = "non_empty")]
    pub thumbnail_url: Option<String>,
    /// Subscriber count as displayed
    #[serde(rename = "subscriber_count", default, deserialize_with = "non_empty")]
    pub subscriber_count_label: Option<String>,
    /// Description snippet
    #[serde(default, deserialize_with = "non_empty")]
    pub description: Option<String>,
}

/// Blank strings from the backend mean "absent"
fn non_empty<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value: Option<String> = Option::deserialize(deserializer)?;
    Ok(value.filter(|s| !s.trim().is_empty()))
}

/// Items of one response
#[derive(Debug, Clone, PartialEq)]
pub enum ResultItems {
    Videos(Vec<VideoSummary>),
    Channels(Vec<ChannelSummary>),
}

impl ResultItems {
    /// Number of items
    pub fn len(&self) -> usize {
        match self {
            ResultItems::Videos(items) => items.len(),
            ResultItems::Channels(items) => items.len(),
        }
    }

    /// Whether there are no items
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Mode the items belong to
    pub fn mode(&self) -> SearchMode {
        match self {
            ResultItems::Videos(_) => SearchMode::Videos,
            ResultItems::Channels(_) => SearchMode::Channels,
        }
    }
}

/// The result set of one search; replaces the previous one entirely
#[derive(Debug, Clone, PartialEq)]
pub struct SearchResultSet {
    /// Ordered items
    pub items: ResultItems,
    /// Total matches known to the backend, never below `items.len()`
    pub total_available: usize,
}

impl SearchResultSet {
    /// Build a result set, clamping the total to at least the item count
    pub fn new(items: ResultItems, total_available: Option<usize>) -> Self {
        let total_available = total_available.unwrap_or(0).max(items.len());
        Self {
            items,
            total_available,
        }
    }

    /// An empty set for the given mode
    pub fn empty(mode: SearchMode) -> Self {
        let items = match mode {
            SearchMode::Videos => ResultItems::Videos(Vec::new()),
            SearchMode::Channels => ResultItems::Channels(Vec::new()),
        };
        Self::new(items, None)
    }

    /// Whether the backend knows more matches than it returned
    pub fn is_partial(&self) -> bool {
        self.total_available > self.items.len()
    }

    /// Whether there are no items
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// Videos of the last rendered result set, by id.
///
/// Written by the search controller on every render, read by the player
/// controller to recover title and thumbnail for a clicked id.
#[derive(Debug, Default)]
pub struct ResultCatalog {
    videos: RwLock<HashMap<String, VideoSummary>>,
}

impl ResultCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the catalog with the videos of a new result set
    pub fn replace(&self, set: &SearchResultSet) {
        let mut videos = self.videos.write().unwrap_or_else(PoisonError::into_inner);
        videos.clear();
        if let ResultItems::Videos(items) = &set.items {
            for video in items {
                videos.insert(video.id.clone(), video.clone());
            }
        }
    }

    /// Drop every entry
    pub fn clear(&self) {
        self.videos
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }

    /// Look up a rendered video
    pub fn video(&self, id: &str) -> Option<VideoSummary> {
        self.videos
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(id)
            .cloned()
    }

    /// Number of videos held
    pub fn len(&self) -> usize {
        self.videos.read().unwrap_or_else(PoisonError::into_inner).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
