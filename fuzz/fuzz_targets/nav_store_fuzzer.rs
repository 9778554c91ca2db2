//! Fuzz target for the navigation state store
//!
//! Ensure stack invariants hold under arbitrary operation sequences
//!
//! # Strategy
//!
//! - All store mutations interleaved: pushes, pops, jumps, resets, trims
//! - Page identity collisions: small id space forces duplicates
//!
//! # Invariants
//!
//! - Page stack never empties while any page was ever pushed
//! - Timestamps strictly increase along the page stack
//! - Trimming never exceeds the requested bound

#![no_main]

use arbitrary::Arbitrary;
use backstack_core::{NavStore, Page, PageLevel};
use libfuzzer_sys::fuzz_target;

#[derive(Debug, Clone, Arbitrary)]
enum StoreOp {
    PushPage { id: u8 },
    PushModal { id: u8 },
    PopPage,
    PopModal,
    GoToPage { id: u8 },
    GoToDashboard,
    GoBack,
    ClearModals,
    Trim,
    KeepMostRecent { limit: u8 },
    Reset,
}

fn page(id: u8, level: PageLevel) -> Page {
    let id = format!("p{}", id % 16);
    let path = format!("/fuzz/{id}");
    Page::new(&id, level, "Fuzz", &path)
}

fuzz_target!(|ops: Vec<StoreOp>| {
    let mut store = NavStore::new();
    store.push_page(Page::dashboard());

    for op in ops {
        match op {
            StoreOp::PushPage { id } => {
                store.push_page(page(id, PageLevel::Feature));
            },
            StoreOp::PushModal { id } => store.push_modal(page(id, PageLevel::Modal)),
            StoreOp::PopPage => {
                store.pop_page();
            },
            StoreOp::PopModal => {
                store.pop_modal();
            },
            StoreOp::GoToPage { id } => {
                store.go_to_page(&format!("p{}", id % 16));
            },
            StoreOp::GoToDashboard => {
                store.go_to_dashboard();
            },
            StoreOp::GoBack => {
                store.go_back();
            },
            StoreOp::ClearModals => store.clear_modals(),
            StoreOp::Trim => store.trim_oldest_pages(),
            StoreOp::KeepMostRecent { limit } => {
                store.keep_most_recent_pages(usize::from(limit % 12).max(1));
            },
            StoreOp::Reset => {
                store.reset();
                store.push_page(Page::dashboard());
            },
        }

        assert!(store.depth() >= 1);

        let stack = store.page_stack();
        for window in stack.windows(2) {
            assert!(window[0].timestamp < window[1].timestamp);
        }
    }
});
