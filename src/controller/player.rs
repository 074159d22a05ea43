//! Embedded player and the save-to-collection action

use crate::api::{Backend, SaveVideoRequest, SaveVideoResponse};
use crate::controller::{pick_quote, ToastNotifier};
use crate::core::{PlayerState, ResultCatalog, UiTimings};
use crate::error::FrontError;
use crate::page::{Page, Region};
use crate::render::{render_player, ToastBody, ToastLevel};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tracing::{debug, error, info, warn};

/// Lines shown under the channel page spinner
pub const CHANNEL_QUOTES: &[&str] = &[
    "Finding the best videos from this creator...",
    "Organizing this channel's content for you...",
    "Creator's videos incoming...",
    "Quality content from this channel on the way...",
    "Gathering video highlights from this creator...",
];

/// Swaps embeds into the player region
pub struct PlayerController {
    page: Arc<dyn Page>,
    backend: Arc<dyn Backend>,
    catalog: Arc<ResultCatalog>,
    toasts: Arc<ToastNotifier>,
    timings: UiTimings,
    state: Mutex<PlayerState>,
}

impl PlayerController {
    pub fn new(
        page: Arc<dyn Page>,
        backend: Arc<dyn Backend>,
        catalog: Arc<ResultCatalog>,
        toasts: Arc<ToastNotifier>,
        logged_in: bool,
        timings: UiTimings,
    ) -> Self {
        Self {
            page,
            backend,
            catalog,
            toasts,
            timings,
            state: Mutex::new(PlayerState {
                active_video_id: None,
                is_logged_in: logged_in,
            }),
        }
    }

    fn state(&self) -> MutexGuard<'_, PlayerState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Put a random quote under the channel page spinner, if there is one
    pub fn init_channel_page(&self) {
        if self.page.has_region(Region::ChannelLoading) {
            self.page
                .set_text(Region::ChannelLoadingQuote, pick_quote(CHANNEL_QUOTES));
        }
    }

    /// Id of the video currently embedded
    pub fn active_video(&self) -> Option<String> {
        self.state().active_video_id.clone()
    }

    /// Whether Save is offered
    pub fn is_logged_in(&self) -> bool {
        self.state().is_logged_in
    }

    /// Hide the player and discard its embed
    pub fn hide(&self) {
        self.page.set_visible(Region::VideoPlayer, false);
        self.page.set_html(Region::VideoPlayer, "");
        self.state().active_video_id = None;
    }

    /// Embed `video_id` in the player region, replacing any prior embed.
    ///
    /// Title and thumbnail come from the last rendered result set; an id
    /// that is not there plays with empty metadata.
    pub fn play_video(&self, video_id: &str) -> Result<(), FrontError> {
        if !self.page.has_region(Region::VideoPlayer) {
            warn!("No player region on this page; ignoring play of {}", video_id);
            return Err(FrontError::MissingRegion(Region::VideoPlayer));
        }

        self.flash_channel_loading();

        let (title, thumbnail) = match self.catalog.video(video_id) {
            Some(video) => (video.title, video.thumbnail_url),
            None => {
                debug!("{} not in rendered results; playing without metadata", video_id);
                (String::new(), String::new())
            }
        };

        let logged_in = {
            let mut state = self.state();
            state.active_video_id = Some(video_id.to_string());
            state.is_logged_in
        };

        self.page.set_visible(Region::VideoPlayer, true);
        self.page.set_html(
            Region::VideoPlayer,
            &render_player(video_id, &title, &thumbnail, logged_in),
        );
        self.page.scroll_into_view(Region::VideoPlayer);
        info!("Playing {}", video_id);
        Ok(())
    }

    /// Show the channel page spinner briefly; presentation only
    fn flash_channel_loading(&self) {
        if !self.page.has_region(Region::ChannelLoading) {
            return;
        }

        self.set_channel_loading(true);
        match tokio::runtime::Handle::try_current() {
            Ok(handle) => {
                let page = Arc::clone(&self.page);
                let delay = self.timings.channel_loading_flash;
                handle.spawn(async move {
                    tokio::time::sleep(delay).await;
                    page.set_visible(Region::ChannelLoading, false);
                    page.set_attribute(Region::ChannelVideos, "style", "opacity: 1");
                });
            }
            Err(_) => self.set_channel_loading(false),
        }
    }

    fn set_channel_loading(&self, visible: bool) {
        self.page.set_visible(Region::ChannelLoading, visible);
        let opacity = if visible { "opacity: 0.3" } else { "opacity: 1" };
        self.page
            .set_attribute(Region::ChannelVideos, "style", opacity);
    }

    /// Save a video to the user's collection and report the outcome in a toast.
    ///
    /// The server message is shown green on success and amber otherwise. A
    /// transport failure is logged and shown as a red toast.
    pub async fn save_video(
        &self,
        video_id: &str,
        title: &str,
        thumbnail: &str,
    ) -> Result<SaveVideoResponse, FrontError> {
        let request = SaveVideoRequest {
            title: title.to_string(),
            thumbnail: thumbnail.to_string(),
        };

        match self.backend.save_video(video_id, &request).await {
            Ok(response) => {
                let level = if response.success {
                    ToastLevel::Success
                } else {
                    ToastLevel::Warning
                };
                self.toasts.show(
                    level,
                    &ToastBody::new(response.message.clone()),
                    self.timings.save_toast_delay,
                );
                Ok(response)
            }
            Err(err) => {
                error!("Saving {} failed: {}", video_id, err);
                self.toasts.show(
                    ToastLevel::Danger,
                    &ToastBody::new(format!("Could not save video: {}", err)),
                    self.timings.save_toast_delay,
                );
                Err(err)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::SaveVideoResponse;
    use crate::controller::testing::ScriptedBackend;
    use crate::core::{ResultItems, SearchResultSet, VideoSummary};
    use crate::page::{MemoryPage, PageEvent};
    use std::time::Duration;

    fn controller(
        page: &Arc<MemoryPage>,
        backend: &Arc<ScriptedBackend>,
        logged_in: bool,
    ) -> (PlayerController, Arc<ResultCatalog>) {
        let catalog = Arc::new(ResultCatalog::new());
        let toasts = Arc::new(ToastNotifier::new(page.clone()));
        let player = PlayerController::new(
            page.clone(),
            backend.clone(),
            Arc::clone(&catalog),
            toasts,
            logged_in,
            UiTimings::default(),
        );
        (player, catalog)
    }

    #[test]
    fn test_play_uses_catalog_metadata() {
        let page = Arc::new(MemoryPage::search_page());
        let backend = Arc::new(ScriptedBackend::default());
        let (player, catalog) = controller(&page, &backend, true);
        catalog.replace(&SearchResultSet::new(
            ResultItems::Videos(vec![VideoSummary {
                id: "v1".to_string(),
                title: "Kittens".to_string(),
                thumbnail_url: "https://i/k.jpg".to_string(),
                ..Default::default()
            }]),
            None,
        ));

        player.play_video("v1").unwrap();

        let html = page.html(Region::VideoPlayer);
        assert!(page.is_visible(Region::VideoPlayer));
        assert!(html.contains(r#"data-title="Kittens""#));
        assert!(html.contains("youtube-nocookie.com/embed/v1"));
        assert!(page.events().contains(&PageEvent::Scrolled(Region::VideoPlayer)));
    }

    #[test]
    fn test_unknown_id_plays_without_metadata() {
        let page = Arc::new(MemoryPage::search_page());
        let backend = Arc::new(ScriptedBackend::default());
        let (player, _catalog) = controller(&page, &backend, true);

        player.play_video("ghost").unwrap();
        assert!(page.html(Region::VideoPlayer).contains(r#"data-title="""#));
        assert_eq!(player.active_video(), Some("ghost".to_string()));
    }

    #[test]
    fn test_new_video_replaces_prior_embed() {
        let page = Arc::new(MemoryPage::search_page());
        let backend = Arc::new(ScriptedBackend::default());
        let (player, _catalog) = controller(&page, &backend, false);

        player.play_video("first").unwrap();
        player.play_video("second").unwrap();

        let html = page.html(Region::VideoPlayer);
        assert!(!html.contains("embed/first"));
        assert!(html.contains("embed/second"));
        assert!(!html.contains(r#"data-action="save""#));
        assert_eq!(player.active_video(), Some("second".to_string()));
    }

    #[test]
    fn test_missing_player_region_is_noop() {
        let page = Arc::new(MemoryPage::new([Region::SearchResults]));
        let backend = Arc::new(ScriptedBackend::default());
        let (player, _catalog) = controller(&page, &backend, false);

        assert!(matches!(
            player.play_video("v1"),
            Err(FrontError::MissingRegion(Region::VideoPlayer))
        ));
        assert!(page.events().is_empty());
        assert_eq!(player.active_video(), None);
    }

    #[tokio::test(start_paused = true)]
    async fn test_channel_loading_flash() {
        let page = Arc::new(MemoryPage::channel_page());
        let backend = Arc::new(ScriptedBackend::default());
        let (player, _catalog) = controller(&page, &backend, false);
        player.init_channel_page();
        assert!(CHANNEL_QUOTES.contains(&page.text(Region::ChannelLoadingQuote).as_str()));

        player.play_video("v1").unwrap();
        assert!(page.is_visible(Region::ChannelLoading));
        assert_eq!(
            page.attribute(Region::ChannelVideos, "style").as_deref(),
            Some("opacity: 0.3")
        );

        tokio::time::sleep(Duration::from_millis(900)).await;
        assert!(!page.is_visible(Region::ChannelLoading));
        assert_eq!(
            page.attribute(Region::ChannelVideos, "style").as_deref(),
            Some("opacity: 1")
        );
    }

    #[tokio::test]
    async fn test_save_outcomes_colour_toasts() {
        let page = Arc::new(MemoryPage::search_page());
        let backend = Arc::new(ScriptedBackend::default());
        let (player, _catalog) = controller(&page, &backend, true);

        *backend.save.lock().unwrap() = Some(Ok(SaveVideoResponse {
            success: true,
            message: "Video saved to your collection".to_string(),
        }));
        player.save_video("v1", "T", "https://i/t.jpg").await.unwrap();

        *backend.save.lock().unwrap() = Some(Ok(SaveVideoResponse {
            success: false,
            message: "Video already in your collection".to_string(),
        }));
        player.save_video("v1", "T", "https://i/t.jpg").await.unwrap();

        let toasts = page.toasts();
        assert_eq!(toasts.len(), 2);
        assert!(toasts[0].contains("bg-success") && toasts[0].contains("saved to your collection"));
        assert!(toasts[1].contains("bg-warning") && toasts[1].contains("already in your collection"));
        assert_eq!(backend.calls(), vec!["save:v1:T", "save:v1:T"]);
    }

    #[tokio::test]
    async fn test_save_transport_failure_toasts_error() {
        let page = Arc::new(MemoryPage::search_page());
        let backend = Arc::new(ScriptedBackend::default());
        let (player, _catalog) = controller(&page, &backend, true);

        assert!(player.save_video("v1", "T", "").await.is_err());
        let toasts = page.toasts();
        assert_eq!(toasts.len(), 1);
        assert!(toasts[0].contains("bg-danger"));
        assert!(toasts[0].contains("Could not save video"));
    }
}
