//! Download dialog state machine
//!
//! Opening the dialog fetches the stream options of a video; picking a row
//! asks the backend to produce the file. Only the most recently opened
//! dialog may write into the page: an older options or download response
//! that arrives late is dropped.

use crate::api::{Backend, DownloadOptions, DownloadResult};
use crate::controller::{LoadingGuard, ToastNotifier};
use crate::core::{DownloadPhase, DownloadSession, StreamKind, UiTimings};
use crate::error::FrontError;
use crate::page::{Page, Region};
use crate::render::{format_length, render_stream_rows, ToastBody, ToastLevel};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tracing::{debug, error, info, warn};

const NO_DIALOG_MESSAGE: &str =
    "Download feature is not available on this page. Please go to the home page to use this feature.";
const OPTIONS_FAILED: &str = "Failed to load download options";
const DOWNLOAD_FAILED: &str = "Download failed";

/// Drives the download dialog
pub struct DownloadFlow {
    page: Arc<dyn Page>,
    backend: Arc<dyn Backend>,
    toasts: Arc<ToastNotifier>,
    timings: UiTimings,
    session: Mutex<Option<DownloadSession>>,
    seq: AtomicU64,
}

impl DownloadFlow {
    pub fn new(
        page: Arc<dyn Page>,
        backend: Arc<dyn Backend>,
        toasts: Arc<ToastNotifier>,
        timings: UiTimings,
    ) -> Self {
        Self {
            page,
            backend,
            toasts,
            timings,
            session: Mutex::new(None),
            seq: AtomicU64::new(0),
        }
    }

    fn lock_session(&self) -> MutexGuard<'_, Option<DownloadSession>> {
        self.session.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Snapshot of the current session
    pub fn session(&self) -> Option<DownloadSession> {
        self.lock_session().clone()
    }

    /// Current phase, `Idle` before the dialog was ever opened
    pub fn phase(&self) -> DownloadPhase {
        self.lock_session()
            .as_ref()
            .map(|session| session.phase)
            .unwrap_or_default()
    }

    fn require(&self, regions: &[Region]) -> Result<(), FrontError> {
        match regions.iter().find(|r| !self.page.has_region(**r)) {
            Some(missing) => {
                error!("Download dialog is missing {}", missing);
                Err(FrontError::MissingRegion(*missing))
            }
            None => Ok(()),
        }
    }

    /// Open the dialog for `video_id` and load its stream options.
    ///
    /// Returns the phase the dialog settled in. A page without the dialog
    /// gets a toast and stays `Idle`; a response overtaken by a newer open
    /// yields [`FrontError::Superseded`] and leaves the page alone.
    pub async fn open_download_modal(&self, video_id: &str) -> Result<DownloadPhase, FrontError> {
        if !self.page.has_region(Region::DownloadDialog) {
            warn!("No download dialog on this page");
            self.toasts.show(
                ToastLevel::Danger,
                &ToastBody::new(NO_DIALOG_MESSAGE).with_lead("Error:"),
                self.timings.toast_delay,
            );
            return Ok(DownloadPhase::Idle);
        }
        self.require(&[
            Region::DownloadLoading,
            Region::DownloadContent,
            Region::DownloadError,
            Region::VideoStreamsList,
            Region::AudioStreamsList,
        ])?;

        let seq = self.seq.fetch_add(1, Ordering::SeqCst) + 1;
        *self.lock_session() = Some(DownloadSession::new(video_id, seq));

        let loading = LoadingGuard::show(self.page.as_ref(), Region::DownloadLoading);
        self.page.set_visible(Region::DownloadContent, false);
        self.page.set_visible(Region::DownloadError, false);
        self.page
            .set_attribute(Region::DownloadDialog, "data-video-id", video_id);
        self.page.open_dialog();
        debug!("Fetching download options for {} (#{})", video_id, seq);

        let outcome = self.backend.download_options(video_id).await;

        let mut session = self.lock_session();
        let current = matches!(session.as_ref(), Some(s) if s.seq == seq);
        if !current {
            drop(session);
            loading.abandon();
            debug!("Dropping download options for {} (#{})", video_id, seq);
            return Err(FrontError::Superseded(seq));
        }

        let phase = match outcome {
            Ok(options) => {
                self.show_options(video_id, &options);
                if let Some(session) = session.as_mut() {
                    session.video_streams = options.video_streams;
                    session.audio_streams = options.audio_streams;
                    session.error_message = None;
                }
                info!("Download options ready for {}", video_id);
                DownloadPhase::OptionsReady
            }
            Err(err) => {
                warn!("Download options for {} failed: {}", video_id, err);
                let message = err.user_message(OPTIONS_FAILED);
                self.show_error(&message);
                if let Some(session) = session.as_mut() {
                    session.error_message = Some(message);
                }
                DownloadPhase::OptionsFailed
            }
        };
        if let Some(session) = session.as_mut() {
            session.phase = phase;
        }
        drop(session);

        loading.release();
        Ok(phase)
    }

    fn show_options(&self, video_id: &str, options: &DownloadOptions) {
        self.page.set_text(Region::DownloadTitle, &options.title);
        self.page
            .set_text(Region::DownloadAuthor, &format!("By: {}", options.author));
        self.page
            .set_attribute(Region::DownloadThumbnail, "src", &options.thumbnail);
        self.page.set_text(
            Region::DownloadLength,
            &format!("Length: {}", format_length(options.length_secs)),
        );
        self.page.set_html(
            Region::VideoStreamsList,
            &render_stream_rows(video_id, StreamKind::Video, &options.video_streams),
        );
        self.page.set_html(
            Region::AudioStreamsList,
            &render_stream_rows(video_id, StreamKind::Audio, &options.audio_streams),
        );
        self.page.set_visible(Region::DownloadContent, true);
    }

    fn show_error(&self, message: &str) {
        self.page.set_text(Region::DownloadError, message);
        self.page.set_visible(Region::DownloadError, true);
    }

    /// Ask the backend to produce `video_id` in format `itag`.
    ///
    /// On success the dialog closes and the file is offered through the
    /// success panel, or through a toast on pages without one. Without an
    /// open session for `video_id` a new one is started. A result that
    /// arrives after another dialog was opened yields
    /// [`FrontError::Superseded`] and leaves the page alone.
    pub async fn download_stream(
        &self,
        video_id: &str,
        itag: u32,
    ) -> Result<DownloadPhase, FrontError> {
        self.require(&[
            Region::DownloadLoading,
            Region::DownloadContent,
            Region::DownloadError,
        ])?;

        let seq = {
            let mut session = self.lock_session();
            match session.as_mut() {
                Some(open) if open.video_id == video_id => {
                    open.phase = DownloadPhase::Downloading;
                    open.error_message = None;
                    open.seq
                }
                _ => {
                    let seq = self.seq.fetch_add(1, Ordering::SeqCst) + 1;
                    let mut fresh = DownloadSession::new(video_id, seq);
                    fresh.phase = DownloadPhase::Downloading;
                    *session = Some(fresh);
                    seq
                }
            }
        };

        self.page.set_visible(Region::DownloadContent, false);
        let loading = LoadingGuard::show(self.page.as_ref(), Region::DownloadLoading);
        self.page.set_visible(Region::DownloadError, false);
        self.page.set_text(Region::DownloadError, "");
        info!("Downloading {} (itag {}, #{})", video_id, itag, seq);

        let outcome = self.backend.start_download(video_id, itag).await;

        let mut session = self.lock_session();
        let current = matches!(session.as_ref(), Some(s) if s.seq == seq);
        if !current {
            drop(session);
            loading.abandon();
            debug!("Dropping download of {} (itag {}, #{})", video_id, itag, seq);
            return Err(FrontError::Superseded(seq));
        }

        let phase = match outcome {
            Ok(result) => {
                self.offer_file(&result);
                DownloadPhase::DownloadSucceeded
            }
            Err(err) => {
                warn!("Download of {} (itag {}) failed: {}", video_id, itag, err);
                let message = err.user_message(DOWNLOAD_FAILED);
                self.show_error(&message);
                if let Some(session) = session.as_mut() {
                    session.error_message = Some(message);
                }
                DownloadPhase::DownloadFailed
            }
        };
        if let Some(session) = session.as_mut() {
            session.phase = phase;
        }
        drop(session);

        loading.release();
        Ok(phase)
    }

    fn offer_file(&self, result: &DownloadResult) {
        if self.page.is_dialog_open() {
            self.page.close_dialog();
        }

        if self.page.has_region(Region::DownloadSuccess) {
            self.page.set_visible(Region::DownloadProgress, false);
            self.page.set_visible(Region::DownloadSuccess, true);
            self.page
                .set_attribute(Region::DownloadLink, "href", &result.href());
            self.page
                .set_attribute(Region::DownloadLink, "download", result.file_name());
        } else {
            self.toasts.show(
                ToastLevel::Success,
                &ToastBody::new(result.title.clone())
                    .with_lead("Download Ready:")
                    .with_note(result.note.clone()),
                self.timings.toast_delay,
            );
        }
        info!("Download ready: {}", result.href());
    }
}
