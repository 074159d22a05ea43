//! # tubefront - video search and download front end
//!
//! Client-side controllers for a video search site: search by channel or
//! video, play a result in an embedded player, save it to a collection and
//! download one of its streams through the backend.
//!
//! ## Features
//!
//! - Channel / video search with loading affordances and partial-result notice
//! - Escaped, deterministic markup for results, player, dialog and toasts
//! - Download dialog state machine that drops late responses
//! - Self-dismissing toast notifications
//!
//! ## Example
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use tubefront::{BackendClient, Frontend, MemoryPage, PageContext};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let page = Arc::new(MemoryPage::search_page());
//!     let backend = Arc::new(BackendClient::new()?);
//!     let frontend = Frontend::new(page.clone(), backend, PageContext::default());
//!
//!     let results = frontend.search().submit_search("cats").await?;
//!     println!("{} results", results.items.len());
//!
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod cli;
pub mod controller;
pub mod core;
pub mod error;
pub mod page;
pub mod render;

// Re-export main types
pub use api::{Backend, BackendClient, ClientConfig};
pub use controller::{
    Action, DownloadFlow, Frontend, PlayerController, SearchController, ToastNotifier,
};
pub use core::{DownloadPhase, PageContext, SearchMode, SearchResultSet, UiTimings};
pub use error::FrontError;
pub use page::{MemoryPage, Page, Region};

/// Result type alias for tubefront operations
pub type Result<T> = std::result::Result<T, FrontError>;
