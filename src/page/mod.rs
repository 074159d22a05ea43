//! The page surface the controllers draw into
//!
//! Controllers never touch a document directly. They address a fixed set of
//! named [`Region`]s through the [`Page`] trait: replace markup or text, set an
//! attribute, toggle visibility, drive the download dialog and stack toasts.
//! Writes to a region the page does not have are silently dropped, so callers
//! check [`Page::has_region`] when a missing region changes the flow.

pub mod memory;

pub use memory::*;

use std::fmt;

/// Named regions of the search, channel and download markup
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Region {
    SearchInput,
    SearchTypeLabel,
    SearchResults,
    LoadingSpinner,
    LoadingContainer,
    LoadingMessage,
    LoadingQuote,
    VideoPlayer,
    ChannelVideos,
    ChannelLoading,
    ChannelLoadingQuote,
    DownloadDialog,
    DownloadLoading,
    DownloadContent,
    DownloadError,
    DownloadTitle,
    DownloadAuthor,
    DownloadThumbnail,
    DownloadLength,
    VideoStreamsList,
    AudioStreamsList,
    DownloadProgress,
    DownloadSuccess,
    DownloadLink,
}

impl Region {
    /// Element id of the region in the page markup
    pub fn element_id(&self) -> &'static str {
        match self {
            Region::SearchInput => "searchInput",
            Region::SearchTypeLabel => "searchTypeLabel",
            Region::SearchResults => "searchResults",
            Region::LoadingSpinner => "loadingSpinner",
            Region::LoadingContainer => "loadingContainer",
            Region::LoadingMessage => "loadingMessage",
            Region::LoadingQuote => "loadingQuote",
            Region::VideoPlayer => "videoPlayer",
            Region::ChannelVideos => "channelVideos",
            Region::ChannelLoading => "channelLoadingSpinner",
            Region::ChannelLoadingQuote => "channelLoadingQuote",
            Region::DownloadDialog => "downloadModal",
            Region::DownloadLoading => "downloadLoading",
            Region::DownloadContent => "downloadContent",
            Region::DownloadError => "downloadError",
            Region::DownloadTitle => "downloadTitle",
            Region::DownloadAuthor => "downloadAuthor",
            Region::DownloadThumbnail => "downloadThumbnail",
            Region::DownloadLength => "downloadLength",
            Region::VideoStreamsList => "videoStreamsList",
            Region::AudioStreamsList => "audioStreamsList",
            Region::DownloadProgress => "downloadProgress",
            Region::DownloadSuccess => "downloadSuccess",
            Region::DownloadLink => "downloadLink",
        }
    }

    /// Regions of the search page
    pub fn search_page() -> Vec<Region> {
        vec![
            Region::SearchInput,
            Region::SearchTypeLabel,
            Region::SearchResults,
            Region::LoadingSpinner,
            Region::LoadingContainer,
            Region::LoadingMessage,
            Region::LoadingQuote,
            Region::VideoPlayer,
        ]
    }

    /// Regions of the download dialog
    pub fn download_dialog() -> Vec<Region> {
        vec![
            Region::DownloadDialog,
            Region::DownloadLoading,
            Region::DownloadContent,
            Region::DownloadError,
            Region::DownloadTitle,
            Region::DownloadAuthor,
            Region::DownloadThumbnail,
            Region::DownloadLength,
            Region::VideoStreamsList,
            Region::AudioStreamsList,
            Region::DownloadProgress,
            Region::DownloadSuccess,
            Region::DownloadLink,
        ]
    }

    /// Regions of a channel page
    pub fn channel_page() -> Vec<Region> {
        vec![
            Region::ChannelVideos,
            Region::ChannelLoading,
            Region::ChannelLoadingQuote,
            Region::VideoPlayer,
        ]
    }

    /// Whether the region starts out hidden in the served markup
    pub fn hidden_by_default(&self) -> bool {
        matches!(
            self,
            Region::LoadingSpinner
                | Region::VideoPlayer
                | Region::ChannelLoading
                | Region::DownloadLoading
                | Region::DownloadContent
                | Region::DownloadError
                | Region::DownloadSuccess
        )
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.element_id())
    }
}

/// Narrow contract over the rendered document.
///
/// Implementations use interior mutability: controllers share one page
/// behind an `Arc` and may have several requests in flight.
pub trait Page: Send + Sync {
    /// Whether the region exists in the current document
    fn has_region(&self, region: Region) -> bool;

    /// Replace the region's markup
    fn set_html(&self, region: Region, html: &str);

    /// Replace the region's text content
    fn set_text(&self, region: Region, text: &str);

    /// Set an attribute on the region's element
    fn set_attribute(&self, region: Region, name: &str, value: &str);

    /// Show or hide the region
    fn set_visible(&self, region: Region, visible: bool);

    /// Whether the region is currently shown
    fn is_visible(&self, region: Region) -> bool;

    /// Open the download dialog
    fn open_dialog(&self);

    /// Close the download dialog
    fn close_dialog(&self);

    /// Whether the download dialog is open
    fn is_dialog_open(&self) -> bool;

    /// Smoothly scroll the region into view
    fn scroll_into_view(&self, region: Region);

    /// Append a toast element to the document body
    fn append_toast(&self, id: u64, html: &str);

    /// Remove a toast element from the document body
    fn remove_toast(&self, id: u64);
}
