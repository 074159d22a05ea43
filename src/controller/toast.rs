//! Self-dismissing toast notifications

use crate::page::Page;
use crate::render::{render_toast, ToastBody, ToastLevel};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};

/// Shows toasts and removes them after their delay
pub struct ToastNotifier {
    page: Arc<dyn Page>,
    next_id: AtomicU64,
}

impl ToastNotifier {
    /// Create a notifier drawing into `page`
    pub fn new(page: Arc<dyn Page>) -> Self {
        Self {
            page,
            next_id: AtomicU64::new(1),
        }
    }

    /// Append a toast and schedule its removal. Returns the toast id.
    pub fn show(&self, level: ToastLevel, body: &ToastBody, delay: Duration) -> u64 {
        let id = self.next_id.fetch_add(1, Ordering::SeqCst);
        self.page.append_toast(id, &render_toast(level, body));
        debug!("Toast {} shown ({:?}, {:?})", id, level, delay);

        match tokio::runtime::Handle::try_current() {
            Ok(handle) => {
                let page = Arc::clone(&self.page);
                handle.spawn(async move {
                    tokio::time::sleep(delay).await;
                    page.remove_toast(id);
                    debug!("Toast {} dismissed", id);
                });
            }
            Err(_) => warn!("No runtime to dismiss toast {}; it stays until dismissed", id),
        }

        id
    }

    /// Dismiss a toast early (close button)
    pub fn dismiss(&self, id: u64) {
        self.page.remove_toast(id);
    }
}
