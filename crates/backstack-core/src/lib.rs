//! Core navigation state for Backstack
//!
//! Holds the page hierarchy types and the [`NavStore`], the single source of
//! truth for "what does pressing back do right now". The store is a pure
//! state container: it mutates the page and modal stacks through typed
//! operations and recomputes derived flags after every mutation. It performs
//! no I/O and never suspends, so callers observe no torn intermediate state.
//!
//! # Components
//!
//! - [`PageLevel`]: UI depth ordering (`Dashboard < Feature < Modal`)
//! - [`Page`]: Caller-supplied page descriptor
//! - [`PageEntry`]: A page as stored on a stack, stamped with insertion order
//! - [`NavStore`]: The two stacks plus derived navigation flags

#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod page;
mod store;

pub use page::{Page, PageEntry, PageLevel, page_id_from_path, path_category};
pub use store::{MAX_MODAL_DEPTH, MAX_PAGE_DEPTH, NavStore};
