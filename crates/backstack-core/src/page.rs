//! Page identity and hierarchy types.

use serde::{Deserialize, Serialize};

/// UI depth of a page.
///
/// The ordering is by depth: `Dashboard < Feature < Modal`. A back action
/// always unwinds from the deepest visible layer first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum PageLevel {
    /// Root page. At most one dashboard entry exists in a page stack, and it
    /// is always the oldest entry once present.
    Dashboard,
    /// Feature-area page (settings, budget list, transaction list, ...).
    Feature,
    /// Modal overlay (detail view, edit dialog, ...).
    Modal,
}

impl PageLevel {
    /// Gesture dispatch priority for back listeners registered at this level.
    ///
    /// Whichever UI layer is on top intercepts back gestures first. Ties
    /// between listeners at the same level are broken by registration order
    /// (stable sort at dispatch time).
    pub fn gesture_priority(self) -> u8 {
        match self {
            Self::Modal => 100,
            Self::Feature => 50,
            Self::Dashboard => 10,
        }
    }
}

/// Caller-supplied description of a page or modal.
///
/// Screen-mount code hands one of these to the navigation manager whenever a
/// screen becomes active; the store stamps it into a [`PageEntry`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Page {
    /// Stable page identifier. Uniqueness is not enforced globally, but a
    /// push whose id matches the current top is a no-op.
    pub id: String,
    /// UI depth of this page.
    pub level: PageLevel,
    /// Human-readable title.
    pub title: String,
    /// Route path, e.g. `/budgets/list`.
    pub path: String,
    /// Optional logical parent id.
    pub parent_id: Option<String>,
    /// Whether the page itself allows backing out of it.
    pub can_go_back: bool,
}

impl Page {
    /// Create a page descriptor. `can_go_back` defaults to true for anything
    /// below the dashboard.
    pub fn new(
        id: impl Into<String>,
        level: PageLevel,
        title: impl Into<String>,
        path: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            level,
            title: title.into(),
            path: path.into(),
            parent_id: None,
            can_go_back: level != PageLevel::Dashboard,
        }
    }

    /// The canonical dashboard root page.
    pub fn dashboard() -> Self {
        Self::new("dashboard", PageLevel::Dashboard, "Dashboard", "/dashboard")
    }

    /// Feature category of this page: the first path segment.
    ///
    /// `/budgets/list` and `/budgets/detail/7` share the category `budgets`;
    /// `/settings/profile` belongs to `settings`. `None` for the bare root
    /// path.
    pub fn category(&self) -> Option<&str> {
        path_category(&self.path)
    }
}

/// A page as stored on a stack.
///
/// The `timestamp` is a store-assigned sequence number that strictly
/// increases with insertion order within a stack.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageEntry {
    /// The page descriptor as supplied by the caller.
    pub page: Page,
    /// Insertion-order stamp assigned by the store.
    pub timestamp: u64,
}

/// First segment of a route path, if any.
pub fn path_category(path: &str) -> Option<&str> {
    path.trim_start_matches('/').split('/').next().filter(|seg| !seg.is_empty())
}

/// Derive a page id from a route path: `/budgets/detail/7` becomes
/// `budgets_detail_7`. The bare root path maps to `dashboard`.
pub fn page_id_from_path(path: &str) -> String {
    let trimmed = path.trim_matches('/');
    if trimmed.is_empty() {
        return "dashboard".to_string();
    }
    trimmed.replace('/', "_")
}
