//! # Generic list/table state
//!
//! [`ListState`] holds the loading/loaded/error/pagination state for one
//! displayed collection. Every transition is a pure method on the state;
//! side effects (the fetch itself, the subscription) live in
//! [`ListContainer`](super::ListContainer) and the workflows.
//!
//! Two invariants hold at every exit point:
//! - `loading` and `loaded` are never both true;
//! - `error` is cleared whenever a new load begins.

use crate::errors::ErrorDetail;
use serde::{Deserialize, Serialize};

/// Page sizes the UI offers.
pub const PAGE_SIZE_OPTIONS: [usize; 3] = [10, 25, 50];

/// Page size a fresh state starts with.
pub const DEFAULT_PAGE_SIZE: usize = 10;

/// Items that carry a stable key for delta merging.
pub trait Keyed {
    /// The stable key push updates identify this item by.
    fn key(&self) -> String;
}

/// What a single push update did.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DeltaKind {
    /// A new item appeared in the collection
    Inserted,
    /// An existing item's fields changed
    Updated,
    /// The item left the collection
    Removed,
}

/// One push update delivered by a subscription.
#[derive(Debug, Clone, PartialEq)]
pub struct Delta<T> {
    /// What happened
    pub kind: DeltaKind,
    /// The key the change applies to
    pub key: String,
    /// The new item; `None` for removals
    pub item: Option<T>,
}

impl<T: Keyed> Delta<T> {
    /// A delta announcing a new item.
    pub fn inserted(item: T) -> Self {
        Self {
            kind: DeltaKind::Inserted,
            key: item.key(),
            item: Some(item),
        }
    }

    /// A delta announcing changed fields.
    pub fn updated(item: T) -> Self {
        Self {
            kind: DeltaKind::Updated,
            key: item.key(),
            item: Some(item),
        }
    }

    /// A delta announcing a removal.
    pub fn removed(key: impl Into<String>) -> Self {
        Self {
            kind: DeltaKind::Removed,
            key: key.into(),
            item: None,
        }
    }
}

/// What applying a delta did to the state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeltaOutcome {
    /// The delta was merged into `items`
    Applied,
    /// The state is not loaded yet; the delta was dropped (the initial
    /// fetch is authoritative once it lands)
    DiscardedNotLoaded,
    /// A removal or update referenced a key we do not hold
    UnknownKey,
}

/// Loading/loaded/error/pagination state for one displayed collection.
#[derive(Debug, Clone)]
pub struct ListState<T> {
    items: Vec<T>,
    loading: bool,
    loaded: bool,
    error: Option<ErrorDetail>,
    page: usize,
    page_size: usize,
    search_text: Option<String>,
}

impl<T> Default for ListState<T> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            loading: false,
            loaded: false,
            error: None,
            page: 0,
            page_size: DEFAULT_PAGE_SIZE,
            search_text: None,
        }
    }
}

impl<T: Keyed> ListState<T> {
    /// A fresh, empty, not-yet-loading state.
    pub fn new() -> Self {
        Self::default()
    }

    // ─── Queries ─────────────────────────────────────────────

    /// The loaded items, in collection order.
    pub fn items(&self) -> &[T] {
        &self.items
    }

    /// Whether a load is in flight.
    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// Whether an initial load has completed (successfully or not).
    pub fn is_loaded(&self) -> bool {
        self.loaded
    }

    /// Whether the last completed load succeeded.
    pub fn load_succeeded(&self) -> bool {
        self.loaded && self.error.is_none()
    }

    /// The last load error, if the last load failed.
    pub fn error(&self) -> Option<&ErrorDetail> {
        self.error.as_ref()
    }

    /// Current zero-based page index.
    pub fn page(&self) -> usize {
        self.page
    }

    /// Current page size.
    pub fn page_size(&self) -> usize {
        self.page_size
    }

    /// The raw search text, if a search is active.
    pub fn search_text(&self) -> Option<&str> {
        self.search_text.as_deref().filter(|s| !s.is_empty())
    }

    /// Index of the last page for the current items and page size.
    pub fn last_page(&self) -> usize {
        if self.items.is_empty() {
            0
        } else {
            (self.items.len() - 1) / self.page_size
        }
    }

    // ─── Transitions (the reducer) ───────────────────────────

    /// A load is starting. Clears any previous error.
    pub fn begin_load(&mut self) {
        self.loading = true;
        self.loaded = false;
        self.error = None;
    }

    /// A load finished. On success the items are replaced wholesale; on
    /// failure the error is recorded and the previous items stay visible.
    /// Either way `loaded` becomes true so the UI stops spinning.
    pub fn complete_load(&mut self, outcome: Result<Vec<T>, ErrorDetail>) {
        self.loading = false;
        self.loaded = true;
        match outcome {
            Ok(items) => {
                self.items = items;
                self.error = None;
                self.page = self.page.min(self.last_page());
            }
            Err(error) => {
                self.error = Some(error);
            }
        }
    }

    /// Merge one push update by key.
    ///
    /// Dropped while not loaded: a delta that raced ahead of the initial
    /// snapshot would otherwise be applied against a base that does not
    /// contain its neighbors.
    pub fn apply_delta(&mut self, delta: Delta<T>) -> DeltaOutcome {
        if !self.loaded {
            return DeltaOutcome::DiscardedNotLoaded;
        }
        let existing = self.items.iter().position(|item| item.key() == delta.key);
        match (delta.kind, delta.item, existing) {
            (DeltaKind::Removed, _, Some(idx)) => {
                self.items.remove(idx);
                self.page = self.page.min(self.last_page());
                DeltaOutcome::Applied
            }
            (DeltaKind::Removed, _, None) => DeltaOutcome::UnknownKey,
            // Inserts and updates both upsert: the server stream wins over
            // whatever we hold for that key.
            (_, Some(item), Some(idx)) => {
                self.items[idx] = item;
                DeltaOutcome::Applied
            }
            (_, Some(item), None) => {
                self.items.push(item);
                DeltaOutcome::Applied
            }
            // An insert/update without a payload carries nothing to merge.
            (_, None, _) => DeltaOutcome::UnknownKey,
        }
    }

    /// Jump to a page, clamped to `[0, last_page]`.
    pub fn set_page(&mut self, page: usize) {
        self.page = page.min(self.last_page());
    }

    /// Change the page size, clamped to the configured options, and
    /// re-clamp the page for the new geometry.
    pub fn set_page_size(&mut self, size: usize) {
        self.page_size = nearest_page_size(size);
        self.page = self.page.min(self.last_page());
    }

    /// Store the raw search text. Filtering happens on read (see
    /// [`pager`](super::pager)); nothing derived is persisted here.
    pub fn set_search_text(&mut self, text: impl Into<String>) {
        let text = text.into();
        self.search_text = if text.is_empty() { None } else { Some(text) };
        self.page = 0;
    }

    /// Clear the search, restoring the unfiltered rows.
    pub fn clear_search(&mut self) {
        self.search_text = None;
        self.page = 0;
    }

    /// Back to the pristine state (used when a container is released).
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

/// Snap an arbitrary size to the closest configured option.
fn nearest_page_size(requested: usize) -> usize {
    PAGE_SIZE_OPTIONS
        .iter()
        .copied()
        .min_by_key(|option| option.abs_diff(requested))
        .unwrap_or(DEFAULT_PAGE_SIZE)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, PartialEq)]
    struct Row {
        id: String,
    }

    impl Keyed for Row {
        fn key(&self) -> String {
            self.id.clone()
        }
    }

    fn row(id: &str) -> Row {
        Row { id: id.to_string() }
    }

    #[test]
    fn test_load_success_sequence() {
        let mut state = ListState::new();
        state.begin_load();
        assert!(state.is_loading());
        assert!(!state.is_loaded());

        state.complete_load(Ok(vec![row("a"), row("b")]));
        assert!(!state.is_loading());
        assert!(state.is_loaded());
        assert!(state.error().is_none());
        assert_eq!(state.items(), &[row("a"), row("b")]);
    }

    #[test]
    fn test_load_error_keeps_previous_items() {
        let mut state = ListState::new();
        state.begin_load();
        state.complete_load(Ok(vec![row("a")]));

        state.begin_load();
        assert!(state.error().is_none(), "begin_load clears the error");
        state.complete_load(Err(ErrorDetail::new("fetch failed")));

        assert!(state.is_loaded(), "UI must stop spinning on failure");
        assert!(!state.is_loading());
        assert_eq!(state.error().map(|e| e.message.as_str()), Some("fetch failed"));
        assert_eq!(state.items(), &[row("a")], "items unchanged by a failed load");
    }

    #[test]
    fn test_loading_and_loaded_never_both_true() {
        let mut state = ListState::new();
        state.begin_load();
        assert!(state.is_loading() && !state.is_loaded());
        state.complete_load(Ok(vec![row("a")]));
        assert!(!state.is_loading() && state.is_loaded());
        state.begin_load();
        assert!(state.is_loading() && !state.is_loaded());
    }

    #[test]
    fn test_delta_discarded_before_load() {
        let mut state = ListState::new();
        let outcome = state.apply_delta(Delta::inserted(row("early")));
        assert_eq!(outcome, DeltaOutcome::DiscardedNotLoaded);
        assert!(state.items().is_empty());

        state.begin_load();
        let outcome = state.apply_delta(Delta::inserted(row("early")));
        assert_eq!(outcome, DeltaOutcome::DiscardedNotLoaded);
    }

    #[test]
    fn test_insert_appends_and_replaces_by_key() {
        let mut state = ListState::new();
        state.begin_load();
        state.complete_load(Ok(vec![row("a"), row("b"), row("c")]));

        assert_eq!(state.apply_delta(Delta::inserted(row("d"))), DeltaOutcome::Applied);
        assert_eq!(state.items().len(), 4);
        assert_eq!(state.items()[3], row("d"));

        // Same key again: replaced in place, not duplicated.
        assert_eq!(state.apply_delta(Delta::inserted(row("d"))), DeltaOutcome::Applied);
        assert_eq!(state.items().len(), 4);
    }

    #[test]
    fn test_update_upserts() {
        let mut state = ListState::new();
        state.begin_load();
        state.complete_load(Ok(vec![row("a")]));

        assert_eq!(state.apply_delta(Delta::updated(row("a"))), DeltaOutcome::Applied);
        assert_eq!(state.apply_delta(Delta::updated(row("z"))), DeltaOutcome::Applied);
        assert_eq!(state.items().len(), 2);
    }

    #[test]
    fn test_remove_deletes_and_reclamps_page() {
        let mut state = ListState::new();
        state.begin_load();
        state.complete_load(Ok((0..11).map(|i| row(&format!("r{i}"))).collect()));
        state.set_page(1);
        assert_eq!(state.page(), 1);

        assert_eq!(state.apply_delta(Delta::removed("r10")), DeltaOutcome::Applied);
        assert_eq!(state.page(), 0, "page clamps down when the last page empties");
        assert_eq!(state.apply_delta(Delta::<Row>::removed("missing")), DeltaOutcome::UnknownKey);
    }

    #[test]
    fn test_set_page_clamps() {
        let mut state = ListState::new();
        state.begin_load();
        state.complete_load(Ok(vec![row("a"), row("b"), row("c")]));
        state.set_page_size(2);

        state.set_page(0);
        assert_eq!(state.page(), 0);
        state.set_page(1);
        assert_eq!(state.page(), 1);
        state.set_page(2);
        assert_eq!(state.page(), 1, "page 2 is invalid for 3 items @ 2/page");
    }

    #[test]
    fn test_page_size_snaps_to_options() {
        let mut state = ListState::<Row>::new();
        state.set_page_size(25);
        assert_eq!(state.page_size(), 25);
        state.set_page_size(24);
        assert_eq!(state.page_size(), 25);
        state.set_page_size(1);
        assert_eq!(state.page_size(), 10);
        state.set_page_size(5000);
        assert_eq!(state.page_size(), 50);
    }

    #[test]
    fn test_search_text_is_raw_storage_only() {
        let mut state = ListState::<Row>::new();
        state.set_search_text("Bob");
        assert_eq!(state.search_text(), Some("Bob"));
        state.set_search_text("");
        assert_eq!(state.search_text(), None);
    }

    #[test]
    fn test_empty_fetch_is_loaded_without_error() {
        let mut state = ListState::<Row>::new();
        state.begin_load();
        state.complete_load(Ok(vec![]));
        assert!(state.is_loaded());
        assert!(state.error().is_none());
        assert!(state.items().is_empty());
    }
}
