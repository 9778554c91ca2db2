//! Prioritized back-gesture listener registry.
//!
//! Screens and modals that want first refusal on back gestures (e.g. an
//! "unsaved changes" confirmation) register a handler together with their
//! page level. Dispatch walks the handlers top-of-UI first; the first
//! handler that returns `true` consumes the gesture.

use std::panic::{AssertUnwindSafe, catch_unwind};

use backstack_core::PageLevel;

use crate::swipe::SwipeDirection;

/// Handle returned by [`BackDispatcher::add_listener`], used for removal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

/// A caller-supplied back-gesture handler. Returns whether it consumed the
/// gesture.
pub type BackHandler = Box<dyn FnMut(SwipeDirection) -> bool + Send>;

struct ListenerEntry {
    id: ListenerId,
    priority: u8,
    level: PageLevel,
    handler: BackHandler,
}

impl std::fmt::Debug for ListenerEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ListenerEntry")
            .field("id", &self.id)
            .field("priority", &self.priority)
            .field("level", &self.level)
            .finish_non_exhaustive()
    }
}

/// Priority-ordered registry of back-gesture listeners.
///
/// Listeners are kept in registration order and stably sorted by descending
/// priority at dispatch time, so listeners at the same level run in the
/// order they registered. The registry is not deduplicated by level:
/// multiple modal-level listeners can coexist (nested dialogs), each
/// deciding independently whether it consumes the gesture.
#[derive(Debug, Default)]
pub struct BackDispatcher {
    listeners: Vec<ListenerEntry>,
    next_id: u64,
}

impl BackDispatcher {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a handler at the given page level; the level determines its
    /// dispatch priority. Returns a handle for [`Self::remove_listener`].
    pub fn add_listener(
        &mut self,
        handler: impl FnMut(SwipeDirection) -> bool + Send + 'static,
        level: PageLevel,
    ) -> ListenerId {
        self.next_id += 1;
        let id = ListenerId(self.next_id);
        let priority = level.gesture_priority();
        tracing::debug!(?id, ?level, priority, "add back listener");
        self.listeners.push(ListenerEntry { id, priority, level, handler: Box::new(handler) });
        id
    }

    /// Remove a previously registered handler. Returns whether it was still
    /// registered.
    pub fn remove_listener(&mut self, id: ListenerId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|entry| entry.id != id);
        let removed = self.listeners.len() != before;
        tracing::debug!(?id, removed, "remove back listener");
        removed
    }

    /// Number of registered listeners.
    pub fn len(&self) -> usize {
        self.listeners.len()
    }

    /// Whether no listeners are registered.
    pub fn is_empty(&self) -> bool {
        self.listeners.is_empty()
    }

    /// Drop every listener.
    pub fn clear(&mut self) {
        self.listeners.clear();
    }

    /// Offer a back gesture to the listeners, highest priority first.
    ///
    /// Returns `true` as soon as one handler consumes it. A panicking
    /// handler is logged and treated as "did not handle"; the chain
    /// continues with the next listener.
    pub fn dispatch(&mut self, direction: SwipeDirection) -> bool {
        let mut order: Vec<usize> = (0..self.listeners.len()).collect();
        // Stable sort: ties fall back to registration order.
        order.sort_by_key(|&i| std::cmp::Reverse(self.listeners[i].priority));

        for index in order {
            let entry = &mut self.listeners[index];
            let outcome = catch_unwind(AssertUnwindSafe(|| (entry.handler)(direction)));
            match outcome {
                Ok(true) => {
                    tracing::debug!(id = ?entry.id, level = ?entry.level, "listener consumed back gesture");
                    return true;
                },
                Ok(false) => {},
                Err(_) => {
                    tracing::error!(
                        id = ?entry.id,
                        level = ?entry.level,
                        "back listener panicked; treating as unhandled"
                    );
                },
            }
        }
        false
    }
}
