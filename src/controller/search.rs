//! Search form: mode switch, submission and result routing

use crate::api::Backend;
use crate::controller::{pick_quote, LoadingGuard, PlayerController};
use crate::core::{PageContext, ResultCatalog, SearchMode, SearchQuery, SearchResultSet, VideoSummary};
use crate::error::FrontError;
use crate::page::{Page, Region};
use crate::render::{render_alert, render_error, render_results};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, PoisonError};
use tracing::{debug, info, warn};

/// Lines rotated under the search spinner
pub const LOADING_QUOTES: &[&str] = &[
    "Great videos take time to find, just like hidden treasures.",
    "Discovering creators who match your interests...",
    "The internet is vast, finding the gems just for you...",
    "Traversing the YouTube universe to find what you're looking for...",
    "Sifting through pixels to find perfect content...",
    "Connecting you with creators who speak your language...",
    "Some videos are worth waiting for...",
    "Quality content incoming...",
    "Finding videos that will brighten your day...",
    "Searching for content that matches your interests...",
];

const NO_RESULTS: &str = "No results found for your search.";
const SEARCH_FAILED: &str = "Search failed";

/// Owns the search mode and the last rendered result set
pub struct SearchController {
    page: Arc<dyn Page>,
    backend: Arc<dyn Backend>,
    catalog: Arc<ResultCatalog>,
    player: Arc<PlayerController>,
    mode: Mutex<SearchMode>,
    seq: AtomicU64,
}

impl SearchController {
    /// Mount on a page.
    ///
    /// Rendered videos go into `catalog`; `player` is hidden whenever a
    /// search starts.
    pub fn new(
        page: Arc<dyn Page>,
        backend: Arc<dyn Backend>,
        catalog: Arc<ResultCatalog>,
        player: Arc<PlayerController>,
        context: &PageContext,
    ) -> Self {
        let controller = Self {
            page,
            backend,
            catalog,
            player,
            mode: Mutex::new(SearchMode::default()),
            seq: AtomicU64::new(0),
        };

        if context.force_channels {
            debug!("Page context forces channel search");
            controller.set_mode(SearchMode::Channels);
        } else {
            controller.apply_mode(SearchMode::default());
        }
        controller
    }

    /// Rendered video by id
    pub fn lookup_video(&self, id: &str) -> Option<VideoSummary> {
        self.catalog.video(id)
    }

    /// Current mode
    pub fn mode(&self) -> SearchMode {
        *self.mode.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Switch to `mode` and update the label and placeholder
    pub fn set_mode(&self, mode: SearchMode) {
        *self.mode.lock().unwrap_or_else(PoisonError::into_inner) = mode;
        self.apply_mode(mode);
    }

    /// Flip the mode switch. Returns the new mode.
    pub fn toggle_mode(&self) -> SearchMode {
        let mode = {
            let mut current = self.mode.lock().unwrap_or_else(PoisonError::into_inner);
            *current = current.toggled();
            *current
        };
        self.apply_mode(mode);
        debug!("Search mode toggled to {}", mode);
        mode
    }

    fn apply_mode(&self, mode: SearchMode) {
        self.page.set_text(Region::SearchTypeLabel, mode.label());
        self.page
            .set_attribute(Region::SearchInput, "placeholder", mode.placeholder());
    }

    /// Submit the search form.
    ///
    /// Whitespace-only input returns [`FrontError::EmptyQuery`] without touching
    /// the page or the network. Otherwise the loading state is shown and the
    /// player hidden before the request goes out, and the loader is hidden
    /// again whatever the outcome. A response overtaken by a newer search is
    /// dropped with [`FrontError::Superseded`].
    pub async fn submit_search(&self, text: &str) -> Result<SearchResultSet, FrontError> {
        let mode = self.mode();
        let query = SearchQuery::new(text, mode)?;
        let seq = self.seq.fetch_add(1, Ordering::SeqCst) + 1;
        info!("Search #{} for {:?} ({})", seq, query.text(), mode);

        let loading = self.show_loading(mode);
        self.player.hide();

        let outcome = self.backend.search(&query).await;

        if self.seq.load(Ordering::SeqCst) != seq {
            debug!("Dropping search #{}: superseded", seq);
            loading.abandon();
            return Err(FrontError::Superseded(seq));
        }

        let result = self.route(outcome, mode);
        loading.release();
        result
    }

    fn show_loading(&self, mode: SearchMode) -> LoadingGuard<'_> {
        self.page
            .set_attribute(Region::LoadingContainer, "class", mode.loading_class());
        self.page.set_text(Region::LoadingMessage, mode.loading_message());
        self.page
            .set_text(Region::LoadingQuote, pick_quote(LOADING_QUOTES));
        self.page.set_html(Region::SearchResults, "");
        LoadingGuard::show(self.page.as_ref(), Region::LoadingSpinner)
    }

    fn route(
        &self,
        outcome: Result<crate::api::SearchResponse, FrontError>,
        mode: SearchMode,
    ) -> Result<SearchResultSet, FrontError> {
        match outcome {
            Ok(response) => match response.into_result_set(mode) {
                Some(set) => {
                    debug!(
                        "Rendering {} of {} {}",
                        set.items.len(),
                        set.total_available,
                        mode
                    );
                    self.catalog.replace(&set);
                    self.page.set_html(Region::SearchResults, &render_results(&set));
                    Ok(set)
                }
                None => {
                    debug!("Response does not match {} search; no results", mode);
                    self.catalog.clear();
                    self.page
                        .set_html(Region::SearchResults, &render_alert("info", NO_RESULTS));
                    Ok(SearchResultSet::empty(mode))
                }
            },
            Err(err) => {
                warn!("Search failed: {}", err);
                self.catalog.clear();
                let message = match &err {
                    FrontError::Rejected { .. } => err.user_message(SEARCH_FAILED),
                    other => other.to_string(),
                };
                self.page
                    .set_html(Region::SearchResults, &render_error(&message));
                Err(err)
            }
        }
    }
}
