//! Page context and UI timings

use crate::error::FrontError;
use std::time::Duration;
use url::Url;

/// Inputs read from the page the controllers are mounted on
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageContext {
    /// The document is flagged as belonging to a logged-in user
    pub logged_in: bool,
    /// Search must start in channel mode
    pub force_channels: bool,
}

impl PageContext {
    /// Build the context from the page URL.
    ///
    /// Channel focus is forced by a `focus_channels` query parameter or by
    /// any path under `/channel`.
    pub fn from_url(page_url: &str, logged_in: bool) -> Result<Self, FrontError> {
        let parsed = Url::parse(page_url)?;
        let force_channels = parsed
            .query_pairs()
            .any(|(key, _)| key == "focus_channels")
            || parsed.path().contains("/channel");

        Ok(Self {
            logged_in,
            force_channels,
        })
    }

    /// Set the logged-in flag
    pub fn with_logged_in(mut self, logged_in: bool) -> Self {
        self.logged_in = logged_in;
        self
    }

    /// Set the channel focus flag
    pub fn with_force_channels(mut self, force_channels: bool) -> Self {
        self.force_channels = force_channels;
        self
    }
}

/// Delays of the purely presentational timers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UiTimings {
    /// Error and download toasts
    pub toast_delay: Duration,
    /// Save-video toasts
    pub save_toast_delay: Duration,
    /// How long the channel loading affordance stays up when a video starts
    pub channel_loading_flash: Duration,
}

impl Default for UiTimings {
    fn default() -> Self {
        Self {
            toast_delay: Duration::from_secs(5),
            save_toast_delay: Duration::from_secs(3),
            channel_loading_flash: Duration::from_millis(800),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_focus_channels_query_parameter() {
        let ctx = PageContext::from_url("http://localhost:5000/?focus_channels=1", false).unwrap();
        assert!(ctx.force_channels);
        assert!(!ctx.logged_in);
    }

    #[test]
    fn test_channel_path_forces_channels() {
        let ctx = PageContext::from_url("http://localhost:5000/channel/UC123", true).unwrap();
        assert!(ctx.force_channels);
        assert!(ctx.logged_in);
    }

    #[test]
    fn test_plain_index() {
        let ctx = PageContext::from_url("http://localhost:5000/?q=cats", false).unwrap();
        assert!(!ctx.force_channels);
    }

    #[test]
    fn test_invalid_url() {
        assert!(matches!(
            PageContext::from_url("not a url", false),
            Err(FrontError::Url(_))
        ));
    }

    #[test]
    fn test_default_timings() {
        let timings = UiTimings::default();
        assert_eq!(timings.toast_delay, Duration::from_secs(5));
        assert_eq!(timings.save_toast_delay, Duration::from_secs(3));
        assert_eq!(timings.channel_loading_flash, Duration::from_millis(800));
    }
}
