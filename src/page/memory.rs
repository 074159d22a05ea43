//! In-memory page used by the CLI and the controller tests

use crate::page::{Page, Region};
use std::collections::{BTreeMap, HashMap};
use std::sync::{Mutex, MutexGuard, PoisonError};

/// Snapshot of one region
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RegionState {
    /// Markup, or escaped text after `set_text`
    pub html: String,
    /// Plain text content
    pub text: String,
    /// Element attributes
    pub attributes: BTreeMap<String, String>,
    /// Visibility
    pub visible: bool,
}

/// Every mutation applied to a [`MemoryPage`], in order
#[derive(Debug, Clone, PartialEq)]
pub enum PageEvent {
    Html(Region),
    Text(Region),
    Attribute(Region, String),
    Visible(Region, bool),
    DialogOpened,
    DialogClosed,
    Scrolled(Region),
    ToastAdded(u64),
    ToastRemoved(u64),
}

#[derive(Debug, Default)]
struct Document {
    regions: HashMap<Region, RegionState>,
    dialog_open: bool,
    toasts: BTreeMap<u64, String>,
    events: Vec<PageEvent>,
}

/// A document held in memory
#[derive(Debug, Default)]
pub struct MemoryPage {
    doc: Mutex<Document>,
}

impl MemoryPage {
    /// Create a page containing the given regions
    pub fn new(regions: impl IntoIterator<Item = Region>) -> Self {
        let regions = regions
            .into_iter()
            .map(|region| {
                (
                    region,
                    RegionState {
                        visible: !region.hidden_by_default(),
                        ..Default::default()
                    },
                )
            })
            .collect();

        Self {
            doc: Mutex::new(Document {
                regions,
                ..Default::default()
            }),
        }
    }

    /// Index page: search form, results, player and the download dialog
    pub fn search_page() -> Self {
        Self::new(
            Region::search_page()
                .into_iter()
                .chain(Region::download_dialog()),
        )
    }

    /// Channel page: video grid, loading affordance, player and dialog
    pub fn channel_page() -> Self {
        Self::new(
            Region::channel_page()
                .into_iter()
                .chain(Region::download_dialog()),
        )
    }

    fn doc(&self) -> MutexGuard<'_, Document> {
        self.doc.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Current state of a region
    pub fn region(&self, region: Region) -> Option<RegionState> {
        self.doc().regions.get(&region).cloned()
    }

    /// Markup of a region, empty when absent
    pub fn html(&self, region: Region) -> String {
        self.region(region).map(|r| r.html).unwrap_or_default()
    }

    /// Text of a region, empty when absent
    pub fn text(&self, region: Region) -> String {
        self.region(region).map(|r| r.text).unwrap_or_default()
    }

    /// Attribute of a region
    pub fn attribute(&self, region: Region, name: &str) -> Option<String> {
        self.region(region)
            .and_then(|r| r.attributes.get(name).cloned())
    }

    /// Toasts currently attached to the body
    pub fn toasts(&self) -> Vec<String> {
        self.doc().toasts.values().cloned().collect()
    }

    /// Mutation log
    pub fn events(&self) -> Vec<PageEvent> {
        self.doc().events.clone()
    }

    /// Visibility transitions recorded for one region
    pub fn visibility_changes(&self, region: Region) -> Vec<bool> {
        self.doc()
            .events
            .iter()
            .filter_map(|event| match event {
                PageEvent::Visible(r, visible) if *r == region => Some(*visible),
                _ => None,
            })
            .collect()
    }

    /// Forget the mutation log
    pub fn clear_events(&self) {
        self.doc().events.clear();
    }

    /// Regions currently visible, in declaration order
    pub fn visible_regions(&self) -> Vec<Region> {
        let doc = self.doc();
        let mut regions: Vec<Region> = doc
            .regions
            .iter()
            .filter(|(_, state)| state.visible)
            .map(|(region, _)| *region)
            .collect();
        regions.sort();
        regions
    }

    fn update(&self, region: Region, event: PageEvent, f: impl FnOnce(&mut RegionState)) {
        let mut doc = self.doc();
        if let Some(state) = doc.regions.get_mut(&region) {
            f(state);
            doc.events.push(event);
        }
    }
}

impl Page for MemoryPage {
    fn has_region(&self, region: Region) -> bool {
        self.doc().regions.contains_key(&region)
    }

    fn set_html(&self, region: Region, html: &str) {
        self.update(region, PageEvent::Html(region), |state| {
            state.html = html.to_string();
            state.text.clear();
        });
    }

    fn set_text(&self, region: Region, text: &str) {
        self.update(region, PageEvent::Text(region), |state| {
            state.html = crate::render::escape(text);
            state.text = text.to_string();
        });
    }

    fn set_attribute(&self, region: Region, name: &str, value: &str) {
        self.update(
            region,
            PageEvent::Attribute(region, name.to_string()),
            |state| {
                state
                    .attributes
                    .insert(name.to_string(), value.to_string());
            },
        );
    }

    fn set_visible(&self, region: Region, visible: bool) {
        self.update(region, PageEvent::Visible(region, visible), |state| {
            state.visible = visible;
        });
    }

    fn is_visible(&self, region: Region) -> bool {
        self.doc()
            .regions
            .get(&region)
            .map(|state| state.visible)
            .unwrap_or(false)
    }

    fn open_dialog(&self) {
        let mut doc = self.doc();
        doc.dialog_open = true;
        doc.events.push(PageEvent::DialogOpened);
    }

    fn close_dialog(&self) {
        let mut doc = self.doc();
        doc.dialog_open = false;
        doc.events.push(PageEvent::DialogClosed);
    }

    fn is_dialog_open(&self) -> bool {
        self.doc().dialog_open
    }

    fn scroll_into_view(&self, region: Region) {
        if self.has_region(region) {
            self.doc().events.push(PageEvent::Scrolled(region));
        }
    }

    fn append_toast(&self, id: u64, html: &str) {
        let mut doc = self.doc();
        doc.toasts.insert(id, html.to_string());
        doc.events.push(PageEvent::ToastAdded(id));
    }

    fn remove_toast(&self, id: u64) {
        let mut doc = self.doc();
        if doc.toasts.remove(&id).is_some() {
            doc.events.push(PageEvent::ToastRemoved(id));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_visibility() {
        let page = MemoryPage::search_page();
        assert!(page.is_visible(Region::SearchResults));
        assert!(!page.is_visible(Region::LoadingSpinner));
        assert!(!page.is_visible(Region::DownloadContent));
    }

    #[test]
    fn test_writes_to_missing_region_are_dropped() {
        let page = MemoryPage::new([Region::SearchResults]);
        page.set_html(Region::VideoPlayer, "<p>x</p>");
        assert!(!page.has_region(Region::VideoPlayer));
        assert!(page.events().is_empty());
    }

    #[test]
    fn test_set_text_escapes_markup() {
        let page = MemoryPage::search_page();
        page.set_text(Region::LoadingQuote, "<b>hi</b>");
        assert_eq!(page.text(Region::LoadingQuote), "<b>hi</b>");
        assert_eq!(page.html(Region::LoadingQuote), "&lt;b&gt;hi&lt;/b&gt;");
    }

    #[test]
    fn test_toast_lifecycle() {
        let page = MemoryPage::default();
        page.append_toast(1, "hello");
        assert_eq!(page.toasts(), vec!["hello".to_string()]);
        page.remove_toast(1);
        page.remove_toast(1);
        assert!(page.toasts().is_empty());
        assert_eq!(
            page.events(),
            vec![PageEvent::ToastAdded(1), PageEvent::ToastRemoved(1)]
        );
    }
}
