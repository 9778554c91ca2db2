//! Navigation manager.
//!
//! Policy layer on top of [`NavStore`]: translates page-open intents into
//! store mutations, keeps the stack bounded, and repairs stack integrity
//! for deep-linked modals. Naive stack-push navigation in a mobile shell
//! produces unbounded back-chains across unrelated feature tabs; the
//! category-replace rule below approximates a tab-bar mental model while
//! still allowing drill-down within one feature area.

use backstack_core::{
    MAX_MODAL_DEPTH, MAX_PAGE_DEPTH, NavStore, Page, PageEntry, PageLevel, page_id_from_path,
    path_category,
};

/// Feature roots used to infer a parent page for deep-linked modals.
/// Modal paths outside these roots are left unparented.
pub const FEATURE_ROOTS: &[&str] = &["/settings", "/budgets", "/transactions", "/statistics"];

/// What a [`NavManager::navigate_to_page`] call did to the stack.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavOutcome {
    /// Duplicate or same-path navigation; nothing changed.
    Ignored,
    /// The page was pushed onto a stack.
    Pushed,
    /// The top feature page was replaced in place (category switch).
    Replaced,
    /// The stack collapsed onto the existing dashboard entry.
    Collapsed,
}

/// Orchestration layer owning the navigation store.
///
/// One instance per app shell; constructed explicitly and passed by
/// reference so tests build a fresh one each.
#[derive(Debug, Default)]
pub struct NavManager {
    store: NavStore,
    initialized: bool,
}

impl NavManager {
    /// Create a manager with an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// One-time initialization: record the mobile flag, repair any restored
    /// state, and seed the dashboard root if the stack is empty.
    ///
    /// Repeated calls are no-ops, so multiple UI mount points may race to
    /// initialize during remounts without double-seeding.
    pub fn initialize(&mut self, is_mobile: bool) {
        if self.initialized {
            tracing::debug!("navigation manager already initialized");
            return;
        }
        self.initialized = true;
        self.store.set_mobile(is_mobile);
        self.restore();
        tracing::debug!(is_mobile, "navigation manager initialized");
    }

    /// Repair pass run at initialization and again on every app resume:
    /// bound the stacks, then seed the dashboard if nothing is left.
    pub fn restore(&mut self) {
        self.cleanup_invalid_states();
        if self.store.depth() == 0 {
            self.store.push_page(Page::dashboard());
        }
    }

    /// Bound both stacks after restoring potentially corrupt state.
    ///
    /// An oversized page stack keeps its most recent [`MAX_PAGE_DEPTH`]
    /// entries even when that discards the dashboard root (the next
    /// [`Self::restore`] re-seeds it). An oversized modal stack is treated
    /// as stuck/leaked and wiped entirely rather than trimmed.
    pub fn cleanup_invalid_states(&mut self) {
        self.store.keep_most_recent_pages(MAX_PAGE_DEPTH);
        if self.store.modal_depth() > MAX_MODAL_DEPTH {
            tracing::warn!(
                depth = self.store.modal_depth(),
                "modal stack oversized, wiping as leaked state"
            );
            self.store.clear_modals();
        }
    }

    /// Whether [`Self::initialize`] has run.
    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    /// Register a screen that just became active, applying the smart
    /// navigation policy.
    pub fn navigate_to_page(&mut self, page: Page) -> NavOutcome {
        // Rule 1: duplicate suppression.
        if self.store.current_page().is_some_and(|top| top.page.id == page.id) {
            tracing::debug!(id = %page.id, "duplicate navigation suppressed");
            return NavOutcome::Ignored;
        }

        let outcome = match page.level {
            // Rule 2: collapse onto an existing dashboard, else push one.
            PageLevel::Dashboard => {
                if self.store.dashboard_entry().is_some() {
                    self.store.go_to_dashboard();
                    NavOutcome::Collapsed
                } else {
                    self.store.push_page(page);
                    NavOutcome::Pushed
                }
            },
            // Rule 3: modals get a sensible parent before they open.
            PageLevel::Modal => {
                self.open_modal(page);
                NavOutcome::Pushed
            },
            // Rule 4: feature pages replace across categories, push within.
            PageLevel::Feature => self.navigate_to_feature(page),
        };

        self.store.trim_oldest_pages();
        tracing::debug!(?outcome, "navigation applied");
        outcome
    }

    fn navigate_to_feature(&mut self, page: Page) -> NavOutcome {
        let current = self.store.current_page().map(|entry| entry.page.clone());

        if let Some(current) = &current {
            if current.path == page.path {
                tracing::debug!(path = %page.path, "same-path navigation suppressed");
                return NavOutcome::Ignored;
            }
            // Switching feature areas keeps the stack shallow: back from
            // any feature area returns directly to the dashboard.
            if current.level == PageLevel::Feature
                && path_category(&current.path) != path_category(&page.path)
            {
                self.ensure_dashboard_in_stack();
                self.store.replace_top(page);
                return NavOutcome::Replaced;
            }
        }

        self.ensure_dashboard_in_stack();
        self.store.push_page(page);
        NavOutcome::Pushed
    }

    /// Open a modal, first repairing the page stack so that closing a
    /// deep-linked modal lands on a sensible intermediate page.
    pub fn open_modal(&mut self, modal: Page) {
        self.ensure_parent_page_exists(&modal.path);
        self.store.push_modal(modal);
    }

    /// Close the topmost modal.
    pub fn close_modal(&mut self) -> Option<PageEntry> {
        self.store.pop_modal()
    }

    /// Unwind one layer. Returns whether anything was popped.
    pub fn handle_back_action(&mut self) -> bool {
        self.store.go_back()
    }

    /// Synthesize and prepend a dashboard root if none exists, so it
    /// becomes the eventual back-target without disturbing the current
    /// navigation position.
    pub fn ensure_dashboard_in_stack(&mut self) {
        if self.store.dashboard_entry().is_none() {
            self.store.insert_root(Page::dashboard());
        }
    }

    /// Make sure the feature page a modal logically belongs to is on the
    /// stack, pushing it if needed. Paths outside the known feature roots
    /// are skipped.
    pub fn ensure_parent_page_exists(&mut self, modal_path: &str) {
        self.ensure_dashboard_in_stack();

        let Some(parent) = Self::parent_feature_path(modal_path) else {
            tracing::debug!(path = %modal_path, "no known parent for modal path");
            return;
        };
        if self.store.contains_path(parent) {
            return;
        }

        let title = parent.trim_start_matches('/').to_string();
        let page = Page::new(page_id_from_path(parent), PageLevel::Feature, title, parent);
        tracing::debug!(parent = %parent, "pushing inferred parent page for modal");
        self.store.push_page(page);
    }

    fn parent_feature_path(modal_path: &str) -> Option<&'static str> {
        FEATURE_ROOTS
            .iter()
            .find(|root| {
                modal_path.starts_with(**root)
                    && modal_path.len() > root.len()
                    && modal_path.as_bytes().get(root.len()) == Some(&b'/')
            })
            .copied()
    }

    /// The route path the UI should show right now: the current page's
    /// path, or the dashboard when the stack is empty.
    pub fn current_path(&self) -> String {
        self.store
            .current_page()
            .map_or_else(|| "/dashboard".to_string(), |entry| entry.page.path.clone())
    }

    /// Read access to the underlying store.
    pub fn store(&self) -> &NavStore {
        &self.store
    }

    /// Mutable access for callers that need raw store operations
    /// (`go_to_page`, `reset`, ...). All mutation still goes through the
    /// store's typed operations.
    pub fn store_mut(&mut self) -> &mut NavStore {
        &mut self.store
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn feature(id: &str, path: &str) -> Page {
        Page::new(id, PageLevel::Feature, id.to_uppercase(), path)
    }

    fn modal(id: &str, path: &str) -> Page {
        Page::new(id, PageLevel::Modal, id.to_uppercase(), path)
    }

    fn initialized() -> NavManager {
        let mut manager = NavManager::new();
        manager.initialize(true);
        manager
    }

    #[test]
    fn initialize_seeds_dashboard_once() {
        let mut manager = NavManager::new();
        manager.initialize(true);
        assert_eq!(manager.store().depth(), 1);
        assert!(manager.store().is_mobile());

        manager.initialize(false);
        assert_eq!(manager.store().depth(), 1);
        // The mobile flag from the first call stands.
        assert!(manager.store().is_mobile());
    }

    #[test]
    fn duplicate_navigation_is_suppressed() {
        let mut manager = initialized();
        assert_eq!(manager.navigate_to_page(feature("x", "/budgets")), NavOutcome::Pushed);
        assert_eq!(manager.navigate_to_page(feature("x", "/budgets")), NavOutcome::Ignored);
        assert_eq!(manager.store().depth(), 2);
    }

    #[test]
    fn category_switch_replaces_top() {
        let mut manager = initialized();
        manager.navigate_to_page(feature("budgets", "/budgets/list"));
        let depth = manager.store().depth();

        let outcome = manager.navigate_to_page(feature("profile", "/settings/profile"));
        assert_eq!(outcome, NavOutcome::Replaced);
        assert_eq!(manager.store().depth(), depth);
        assert_eq!(
            manager.store().current_page().map(|e| e.page.path.as_str()),
            Some("/settings/profile")
        );
    }

    #[test]
    fn same_category_drill_down_pushes() {
        let mut manager = initialized();
        manager.navigate_to_page(feature("list", "/budgets/list"));
        let depth = manager.store().depth();

        let outcome = manager.navigate_to_page(feature("detail", "/budgets/detail/7"));
        assert_eq!(outcome, NavOutcome::Pushed);
        assert_eq!(manager.store().depth(), depth + 1);
    }

    #[test]
    fn same_path_navigation_is_ignored() {
        let mut manager = initialized();
        manager.navigate_to_page(feature("a", "/budgets/list"));
        let outcome = manager.navigate_to_page(feature("b", "/budgets/list"));
        assert_eq!(outcome, NavOutcome::Ignored);
    }

    #[test]
    fn dashboard_navigation_collapses() {
        let mut manager = initialized();
        manager.navigate_to_page(feature("a", "/budgets/list"));
        manager.navigate_to_page(feature("b", "/budgets/detail/7"));
        manager.open_modal(modal("m", "/budgets/detail/7/edit"));

        let outcome = manager.navigate_to_page(Page::dashboard());
        assert_eq!(outcome, NavOutcome::Collapsed);
        assert_eq!(manager.store().depth(), 1);
        assert_eq!(manager.store().modal_depth(), 0);
    }

    #[test]
    fn bounded_growth_under_many_pushes() {
        let mut manager = initialized();
        for i in 0..15 {
            manager.navigate_to_page(feature(&format!("p{i}"), &format!("/budgets/{i}")));
        }
        assert!(manager.store().depth() <= MAX_PAGE_DEPTH);
        // The root survives normal bounding.
        assert!(manager.store().dashboard_entry().is_some());
    }

    #[test]
    fn feature_navigation_repairs_missing_root() {
        let mut manager = NavManager::new();
        // Not initialized: simulates a deep link straight into a feature.
        manager.navigate_to_page(feature("a", "/budgets/list"));

        assert_eq!(manager.store().depth(), 2);
        assert_eq!(manager.store().page_stack()[0].page.level, PageLevel::Dashboard);
    }

    #[test]
    fn deep_linked_modal_gets_parent_and_root() {
        let mut manager = NavManager::new();
        manager.navigate_to_page(modal("edit", "/transactions/edit/42"));

        let paths: Vec<&str> =
            manager.store().page_stack().iter().map(|e| e.page.path.as_str()).collect();
        assert_eq!(paths, vec!["/dashboard", "/transactions"]);
        assert_eq!(manager.store().modal_depth(), 1);

        // Closing the modal lands on the inferred parent.
        assert!(manager.handle_back_action());
        assert_eq!(manager.current_path(), "/transactions");
    }

    #[test]
    fn modal_parent_is_not_duplicated() {
        let mut manager = initialized();
        manager.navigate_to_page(feature("budgets", "/budgets"));
        let depth = manager.store().depth();

        manager.open_modal(modal("detail", "/budgets/7"));
        assert_eq!(manager.store().depth(), depth);
    }

    #[test]
    fn unknown_modal_prefix_is_skipped() {
        let mut manager = initialized();
        manager.open_modal(modal("about", "/about/licenses"));

        assert_eq!(manager.store().depth(), 1);
        assert_eq!(manager.store().modal_depth(), 1);
    }

    #[test]
    fn modal_path_equal_to_root_has_no_parent() {
        assert_eq!(NavManager::parent_feature_path("/budgets"), None);
        assert_eq!(NavManager::parent_feature_path("/budgets/7"), Some("/budgets"));
        assert_eq!(NavManager::parent_feature_path("/budgetsx/7"), None);
    }

    #[test]
    fn cleanup_wipes_oversized_modal_stack() {
        let mut manager = initialized();
        for i in 0..(MAX_MODAL_DEPTH + 2) {
            manager.store_mut().push_modal(modal(&format!("m{i}"), "/budgets/7"));
        }
        manager.cleanup_invalid_states();
        assert_eq!(manager.store().modal_depth(), 0);
    }

    #[test]
    fn cleanup_keeps_most_recent_pages() {
        let mut manager = initialized();
        for i in 0..15 {
            manager.store_mut().push_page(feature(&format!("p{i}"), &format!("/budgets/{i}")));
        }
        manager.cleanup_invalid_states();
        assert_eq!(manager.store().depth(), MAX_PAGE_DEPTH);
    }

    #[test]
    fn restore_reseeds_after_lossy_cleanup() {
        let mut manager = initialized();
        manager.store_mut().reset();
        manager.restore();
        assert_eq!(manager.store().depth(), 1);
        assert_eq!(manager.store().current_level(), PageLevel::Dashboard);
    }
}
