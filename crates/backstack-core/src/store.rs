//! Navigation state store.
//!
//! Pure state container for the page stack and modal stack. Every mutation
//! goes through a typed operation and ends by recomputing the derived
//! `can_go_back` flag; outside code never splices the stacks directly.
//!
//! Policy no-ops (popping the root page, popping an empty modal stack,
//! jumping to a nonexistent page id) are not errors: they return
//! `None`/`false` and log at debug level.

use crate::page::{Page, PageEntry, PageLevel};

/// Maximum page stack depth. Oldest non-root entries are trimmed first when
/// a push would exceed this.
pub const MAX_PAGE_DEPTH: usize = 10;

/// Maximum modal stack depth. An oversized modal stack is treated as a
/// stuck/leaked state and wiped entirely during cleanup.
pub const MAX_MODAL_DEPTH: usize = 5;

/// Holds the page stack, modal stack, and derived navigation flags.
///
/// Created once per app session and owned by the navigation manager; tests
/// construct a fresh instance each.
#[derive(Debug, Clone, Default)]
pub struct NavStore {
    page_stack: Vec<PageEntry>,
    modal_stack: Vec<PageEntry>,
    can_go_back: bool,
    is_mobile: bool,
    next_seq: u64,
}

impl NavStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Push a page onto the page stack; it becomes the current page.
    ///
    /// A push whose id matches the current top is a no-op (idempotent
    /// navigation). Returns whether the stack changed.
    pub fn push_page(&mut self, page: Page) -> bool {
        if self.current_page().is_some_and(|top| top.page.id == page.id) {
            tracing::debug!(id = %page.id, "skipping push of current page");
            return false;
        }
        let entry = self.stamp(page);
        tracing::debug!(id = %entry.page.id, path = %entry.page.path, "push page");
        self.page_stack.push(entry);
        self.recompute_derived();
        true
    }

    /// Pop the current page. Returns `None` if the stack holds at most one
    /// entry: the root page cannot be popped.
    pub fn pop_page(&mut self) -> Option<PageEntry> {
        if self.page_stack.len() <= 1 {
            tracing::debug!("cannot pop page: already at root");
            return None;
        }
        let popped = self.page_stack.pop();
        self.recompute_derived();
        if let Some(entry) = &popped {
            tracing::debug!(id = %entry.page.id, "pop page");
        }
        popped
    }

    /// Push a modal onto the modal stack.
    pub fn push_modal(&mut self, modal: Page) {
        let entry = self.stamp(modal);
        tracing::debug!(id = %entry.page.id, "push modal");
        self.modal_stack.push(entry);
        self.recompute_derived();
    }

    /// Pop the topmost modal. Returns `None` if no modal is open.
    pub fn pop_modal(&mut self) -> Option<PageEntry> {
        let popped = self.modal_stack.pop();
        match &popped {
            Some(entry) => tracing::debug!(id = %entry.page.id, "pop modal"),
            None => tracing::debug!("cannot pop modal: modal stack is empty"),
        }
        self.recompute_derived();
        popped
    }

    /// Close every open modal.
    pub fn clear_modals(&mut self) {
        if !self.modal_stack.is_empty() {
            tracing::debug!(count = self.modal_stack.len(), "clear modals");
        }
        self.modal_stack.clear();
        self.recompute_derived();
    }

    /// Truncate the page stack to the first occurrence of `id` inclusive and
    /// close all modals. No-op returning `false` if `id` is not on the stack.
    pub fn go_to_page(&mut self, id: &str) -> bool {
        let Some(index) = self.page_stack.iter().position(|entry| entry.page.id == id) else {
            tracing::debug!(%id, "cannot jump: page not on stack");
            return false;
        };
        self.page_stack.truncate(index + 1);
        self.modal_stack.clear();
        self.recompute_derived();
        tracing::debug!(%id, "jumped to page");
        true
    }

    /// Collapse the page stack to exactly the dashboard entry and close all
    /// modals. No-op returning `false` if no dashboard entry exists.
    pub fn go_to_dashboard(&mut self) -> bool {
        let Some(dashboard) = self.dashboard_entry().cloned() else {
            tracing::debug!("cannot collapse: no dashboard on stack");
            return false;
        };
        self.page_stack.clear();
        self.page_stack.push(dashboard);
        self.modal_stack.clear();
        self.recompute_derived();
        tracing::debug!("collapsed to dashboard");
        true
    }

    /// Unwind one layer: the topmost modal if any exist, else the current
    /// page if more than one exists. Returns `false` when there is nothing
    /// to unwind.
    pub fn go_back(&mut self) -> bool {
        if !self.modal_stack.is_empty() {
            self.pop_modal();
            return true;
        }
        if self.page_stack.len() > 1 {
            self.pop_page();
            return true;
        }
        tracing::debug!("cannot go back: at root with no modals");
        false
    }

    /// Clear both stacks. The sequence counter is kept so timestamps stay
    /// unique across a reset.
    pub fn reset(&mut self) {
        tracing::debug!("reset navigation state");
        self.page_stack.clear();
        self.modal_stack.clear();
        self.recompute_derived();
    }

    /// Record whether the app runs inside a mobile host. Set once during
    /// initialization.
    pub fn set_mobile(&mut self, is_mobile: bool) {
        self.is_mobile = is_mobile;
    }

    /// Whether the app runs inside a mobile host.
    pub fn is_mobile(&self) -> bool {
        self.is_mobile
    }

    /// The page currently on top of the page stack.
    pub fn current_page(&self) -> Option<&PageEntry> {
        self.page_stack.last()
    }

    /// Effective UI level: `Modal` while any modal is open, otherwise the
    /// level of the current page, otherwise `Dashboard`.
    pub fn current_level(&self) -> PageLevel {
        if !self.modal_stack.is_empty() {
            return PageLevel::Modal;
        }
        self.current_page().map_or(PageLevel::Dashboard, |entry| entry.page.level)
    }

    /// Whether a back action has anything to unwind.
    pub fn can_go_back(&self) -> bool {
        self.can_go_back
    }

    /// Whether pressing back should be allowed to leave the app: no modals,
    /// at most one page, and that page (if present) is the dashboard.
    pub fn can_exit_app(&self) -> bool {
        self.modal_stack.is_empty()
            && self.page_stack.len() <= 1
            && self.current_page().is_none_or(|entry| entry.page.level == PageLevel::Dashboard)
    }

    /// Number of pages on the page stack.
    pub fn depth(&self) -> usize {
        self.page_stack.len()
    }

    /// Number of open modals.
    pub fn modal_depth(&self) -> usize {
        self.modal_stack.len()
    }

    /// The page stack, oldest first.
    pub fn page_stack(&self) -> &[PageEntry] {
        &self.page_stack
    }

    /// The modal stack, oldest first.
    pub fn modal_stack(&self) -> &[PageEntry] {
        &self.modal_stack
    }

    /// Whether a page with this id is anywhere on the page stack.
    pub fn contains_page(&self, id: &str) -> bool {
        self.page_stack.iter().any(|entry| entry.page.id == id)
    }

    /// Whether a page with this path is anywhere on the page stack.
    pub fn contains_path(&self, path: &str) -> bool {
        self.page_stack.iter().any(|entry| entry.page.path == path)
    }

    /// The dashboard entry, if one is on the page stack.
    pub fn dashboard_entry(&self) -> Option<&PageEntry> {
        self.page_stack.iter().find(|entry| entry.page.level == PageLevel::Dashboard)
    }

    /// Prepend a synthesized root at index 0 without disturbing the current
    /// navigation position.
    ///
    /// The prepended entry is stamped just below the oldest existing entry so
    /// timestamps keep increasing with stack order.
    pub fn insert_root(&mut self, page: Page) {
        let timestamp = match self.page_stack.first() {
            Some(first) => first.timestamp.saturating_sub(1),
            None => self.next_timestamp(),
        };
        tracing::debug!(id = %page.id, "prepend root page");
        self.page_stack.insert(0, PageEntry { page, timestamp });
        self.recompute_derived();
    }

    /// Replace the current top of the page stack in place, stamping the
    /// replacement with a fresh timestamp. Pushes instead when the stack is
    /// empty.
    pub fn replace_top(&mut self, page: Page) {
        let entry = self.stamp(page);
        tracing::debug!(id = %entry.page.id, path = %entry.page.path, "replace top page");
        match self.page_stack.last_mut() {
            Some(top) => *top = entry,
            None => self.page_stack.push(entry),
        }
        self.recompute_derived();
    }

    /// Trim the oldest non-root entries until the page stack fits
    /// [`MAX_PAGE_DEPTH`].
    pub fn trim_oldest_pages(&mut self) {
        while self.page_stack.len() > MAX_PAGE_DEPTH {
            // Index 0 is the root once a dashboard is present; spare it.
            let cut = usize::from(
                self.page_stack.first().is_some_and(|e| e.page.level == PageLevel::Dashboard),
            );
            let removed = self.page_stack.remove(cut);
            tracing::debug!(id = %removed.page.id, "trimmed oldest page");
        }
        self.recompute_derived();
    }

    /// Keep only the most recent `keep` pages, dropping oldest first even if
    /// that discards the dashboard entry. Used by stack-repair cleanup; the
    /// root is re-seeded on the next initialization.
    pub fn keep_most_recent_pages(&mut self, keep: usize) {
        if self.page_stack.len() > keep {
            let drop = self.page_stack.len() - keep;
            tracing::warn!(dropped = drop, "page stack oversized, dropping oldest entries");
            self.page_stack.drain(..drop);
            self.recompute_derived();
        }
    }

    fn stamp(&mut self, page: Page) -> PageEntry {
        PageEntry { page, timestamp: self.next_timestamp() }
    }

    fn next_timestamp(&mut self) -> u64 {
        self.next_seq += 1;
        self.next_seq
    }

    fn recompute_derived(&mut self) {
        self.can_go_back = self.page_stack.len() > 1 || !self.modal_stack.is_empty();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn feature(id: &str, path: &str) -> Page {
        Page::new(id, PageLevel::Feature, id.to_uppercase(), path)
    }

    fn modal(id: &str) -> Page {
        Page::new(id, PageLevel::Modal, id.to_uppercase(), format!("/modals/{id}"))
    }

    fn seeded() -> NavStore {
        let mut store = NavStore::new();
        store.push_page(Page::dashboard());
        store
    }

    #[test]
    fn root_page_cannot_be_popped() {
        let mut store = seeded();
        assert!(store.pop_page().is_none());
        assert_eq!(store.depth(), 1);

        store.push_page(feature("budgets", "/budgets"));
        assert!(store.pop_page().is_some());
        assert!(store.pop_page().is_none());
        assert_eq!(store.depth(), 1);
    }

    #[test]
    fn modal_stack_is_lifo() {
        let mut store = seeded();
        store.push_modal(modal("a"));
        store.push_modal(modal("b"));

        assert_eq!(store.pop_modal().map(|e| e.page.id), Some("b".to_string()));
        assert_eq!(store.pop_modal().map(|e| e.page.id), Some("a".to_string()));
        assert!(store.pop_modal().is_none());
    }

    #[test]
    fn duplicate_top_push_is_noop() {
        let mut store = seeded();
        assert!(store.push_page(feature("x", "/budgets")));
        assert!(!store.push_page(feature("x", "/budgets")));
        assert_eq!(store.depth(), 2);
    }

    #[test]
    fn timestamps_strictly_increase_with_stack_order() {
        let mut store = seeded();
        store.push_page(feature("a", "/budgets"));
        store.push_page(feature("b", "/budgets/detail"));

        let stamps: Vec<u64> = store.page_stack().iter().map(|e| e.timestamp).collect();
        assert!(stamps.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn insert_root_keeps_timestamp_order() {
        let mut store = NavStore::new();
        store.push_page(feature("a", "/budgets"));
        store.insert_root(Page::dashboard());

        assert_eq!(store.page_stack()[0].page.id, "dashboard");
        let stamps: Vec<u64> = store.page_stack().iter().map(|e| e.timestamp).collect();
        assert!(stamps.windows(2).all(|w| w[0] < w[1]));
        // Navigation position is undisturbed.
        assert_eq!(store.current_page().map(|e| e.page.id.as_str()), Some("a"));
    }

    #[test]
    fn go_back_prefers_modals() {
        let mut store = seeded();
        store.push_page(feature("budgets", "/budgets"));
        store.push_modal(modal("detail"));

        assert!(store.go_back());
        assert_eq!(store.modal_depth(), 0);
        assert_eq!(store.depth(), 2);

        assert!(store.go_back());
        assert_eq!(store.depth(), 1);

        assert!(!store.go_back());
    }

    #[test]
    fn go_to_page_truncates_inclusive_and_clears_modals() {
        let mut store = seeded();
        store.push_page(feature("a", "/budgets"));
        store.push_page(feature("b", "/budgets/sub"));
        store.push_modal(modal("m"));

        assert!(store.go_to_page("a"));
        assert_eq!(store.depth(), 2);
        assert_eq!(store.current_page().map(|e| e.page.id.as_str()), Some("a"));
        assert_eq!(store.modal_depth(), 0);

        assert!(!store.go_to_page("missing"));
        assert_eq!(store.depth(), 2);
    }

    #[test]
    fn dashboard_collapse() {
        let mut store = seeded();
        store.push_page(feature("a", "/budgets"));
        store.push_page(feature("b", "/settings"));
        store.push_modal(modal("m"));

        assert!(store.go_to_dashboard());
        assert_eq!(store.depth(), 1);
        assert_eq!(store.modal_depth(), 0);
        assert_eq!(store.current_level(), PageLevel::Dashboard);
        assert!(!store.can_go_back());
    }

    #[test]
    fn dashboard_collapse_requires_a_dashboard() {
        let mut store = NavStore::new();
        store.push_page(feature("a", "/budgets"));
        assert!(!store.go_to_dashboard());
        assert_eq!(store.depth(), 1);
    }

    #[test]
    fn can_exit_only_from_bare_dashboard() {
        let mut store = seeded();
        assert!(store.can_exit_app());

        store.push_modal(modal("m"));
        assert!(!store.can_exit_app());
        store.pop_modal();

        store.push_page(feature("a", "/budgets"));
        assert!(!store.can_exit_app());
        store.pop_page();
        assert!(store.can_exit_app());

        // An empty store is also exitable.
        assert!(NavStore::new().can_exit_app());
    }

    #[test]
    fn current_level_reports_topmost_layer() {
        let mut store = seeded();
        assert_eq!(store.current_level(), PageLevel::Dashboard);

        store.push_page(feature("a", "/budgets"));
        assert_eq!(store.current_level(), PageLevel::Feature);

        store.push_modal(modal("m"));
        assert_eq!(store.current_level(), PageLevel::Modal);
    }

    #[test]
    fn trim_spares_the_root() {
        let mut store = seeded();
        for i in 0..14 {
            store.push_page(feature(&format!("p{i}"), &format!("/budgets/{i}")));
        }
        store.trim_oldest_pages();

        assert_eq!(store.depth(), MAX_PAGE_DEPTH);
        assert_eq!(store.page_stack()[0].page.level, PageLevel::Dashboard);
        assert_eq!(store.current_page().map(|e| e.page.id.as_str()), Some("p13"));
    }

    #[test]
    fn keep_most_recent_may_drop_the_root() {
        let mut store = seeded();
        for i in 0..14 {
            store.push_page(feature(&format!("p{i}"), &format!("/budgets/{i}")));
        }
        store.keep_most_recent_pages(MAX_PAGE_DEPTH);

        assert_eq!(store.depth(), MAX_PAGE_DEPTH);
        assert!(store.dashboard_entry().is_none());
    }

    #[test]
    fn reset_clears_both_stacks() {
        let mut store = seeded();
        store.push_page(feature("a", "/budgets"));
        store.push_modal(modal("m"));

        store.reset();
        assert_eq!(store.depth(), 0);
        assert_eq!(store.modal_depth(), 0);
        assert!(!store.can_go_back());
    }
}
