//! Controllers wiring user actions to backend calls and page updates

pub mod download;
pub mod player;
pub mod search;
pub mod toast;

pub use download::*;
pub use player::*;
pub use search::*;
pub use toast::*;

use crate::api::Backend;
use crate::core::{PageContext, ResultCatalog, SearchMode, UiTimings};
use crate::error::FrontError;
use crate::page::{Page, Region};
use rand::seq::SliceRandom;
use std::collections::BTreeMap;
use std::sync::Arc;

/// Pick a random line from a quote pool
pub(crate) fn pick_quote(pool: &'static [&'static str]) -> &'static str {
    pool.choose(&mut rand::thread_rng()).copied().unwrap_or_default()
}

/// Keeps a loading region visible for its lifetime.
///
/// The region is hidden exactly once: by [`LoadingGuard::release`], or on
/// drop if the owning future is cancelled first. A superseded request
/// [`LoadingGuard::abandon`]s it instead, leaving the loader to the newer one.
pub(crate) struct LoadingGuard<'a> {
    page: &'a dyn Page,
    region: Region,
    armed: bool,
}

impl<'a> LoadingGuard<'a> {
    pub(crate) fn show(page: &'a dyn Page, region: Region) -> Self {
        page.set_visible(region, true);
        Self {
            page,
            region,
            armed: true,
        }
    }

    pub(crate) fn release(mut self) {
        self.hide();
    }

    pub(crate) fn abandon(mut self) {
        self.armed = false;
    }

    fn hide(&mut self) {
        if self.armed {
            self.armed = false;
            self.page.set_visible(self.region, false);
        }
    }
}

impl Drop for LoadingGuard<'_> {
    fn drop(&mut self) {
        self.hide();
    }
}

/// A user action carried by the `data-action` attributes of rendered markup
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Submit the search form
    Search { text: String },
    /// Flip the search mode switch
    ToggleMode,
    /// Click on a video result
    Play { video_id: String },
    /// Player "Download" button
    OpenDownload { video_id: String },
    /// Player "Save to My Videos" button
    Save {
        video_id: String,
        title: String,
        thumbnail: String,
    },
    /// A stream row in the download dialog
    DownloadStream { video_id: String, itag: u32 },
}

impl Action {
    /// Decode an action from an element's attributes (`data-action`,
    /// `data-video-id`, `data-itag`, `data-title`, `data-thumbnail`)
    pub fn from_attributes(attributes: &BTreeMap<String, String>) -> Option<Action> {
        let get = |name: &str| attributes.get(name).cloned();
        let video_id = get("data-video-id").filter(|id| !id.is_empty());

        match attributes.get("data-action")?.as_str() {
            "play" => Some(Action::Play {
                video_id: video_id?,
            }),
            "download" => Some(Action::OpenDownload {
                video_id: video_id?,
            }),
            "save" => Some(Action::Save {
                video_id: video_id?,
                title: get("data-title").unwrap_or_default(),
                thumbnail: get("data-thumbnail").unwrap_or_default(),
            }),
            "download-stream" => Some(Action::DownloadStream {
                video_id: video_id?,
                itag: get("data-itag")?.parse().ok()?,
            }),
            _ => None,
        }
    }
}

/// All controllers of one page.
///
/// Holds the per-page state: search mode, rendered results, the playing
/// video and the download session.
pub struct Frontend {
    context: PageContext,
    toasts: Arc<ToastNotifier>,
    search: SearchController,
    player: Arc<PlayerController>,
    downloads: DownloadFlow,
}

impl Frontend {
    /// Mount the controllers on a page with default timings
    pub fn new(page: Arc<dyn Page>, backend: Arc<dyn Backend>, context: PageContext) -> Self {
        Self::with_timings(page, backend, context, UiTimings::default())
    }

    /// Mount the controllers with custom timings
    pub fn with_timings(
        page: Arc<dyn Page>,
        backend: Arc<dyn Backend>,
        context: PageContext,
        timings: UiTimings,
    ) -> Self {
        let toasts = Arc::new(ToastNotifier::new(Arc::clone(&page)));
        let catalog = Arc::new(ResultCatalog::new());
        let player = Arc::new(PlayerController::new(
            Arc::clone(&page),
            Arc::clone(&backend),
            Arc::clone(&catalog),
            Arc::clone(&toasts),
            context.logged_in,
            timings,
        ));
        let search = SearchController::new(
            Arc::clone(&page),
            Arc::clone(&backend),
            catalog,
            Arc::clone(&player),
            &context,
        );
        let downloads =
            DownloadFlow::new(page, backend, Arc::clone(&toasts), timings);

        player.init_channel_page();

        Self {
            context,
            toasts,
            search,
            player,
            downloads,
        }
    }

    pub fn context(&self) -> &PageContext {
        &self.context
    }

    pub fn toasts(&self) -> &ToastNotifier {
        &self.toasts
    }

    pub fn search(&self) -> &SearchController {
        &self.search
    }

    pub fn player(&self) -> &PlayerController {
        &self.player
    }

    pub fn downloads(&self) -> &DownloadFlow {
        &self.downloads
    }

    /// Current search mode
    pub fn mode(&self) -> SearchMode {
        self.search.mode()
    }

    /// Route a user action to its controller.
    ///
    /// Failures have already been surfaced on the page when this returns an
    /// error; callers only log it.
    pub async fn dispatch(&self, action: Action) -> Result<(), FrontError> {
        match action {
            Action::Search { text } => self.search.submit_search(&text).await.map(|_| ()),
            Action::ToggleMode => {
                self.search.toggle_mode();
                Ok(())
            }
            Action::Play { video_id } => self.player.play_video(&video_id),
            Action::OpenDownload { video_id } => {
                self.downloads.open_download_modal(&video_id).await.map(|_| ())
            }
            Action::Save {
                video_id,
                title,
                thumbnail,
            } => self
                .player
                .save_video(&video_id, &title, &thumbnail)
                .await
                .map(|_| ()),
            Action::DownloadStream { video_id, itag } => {
                self.downloads.download_stream(&video_id, itag).await.map(|_| ())
            }
        }
    }
}
