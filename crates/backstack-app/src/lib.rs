//! Application layer for Backstack
//!
//! Orchestration on top of the pure navigation store and gesture
//! recognizer: the smart navigation policy, the native-shell integration,
//! and a generic runtime that runs identically against a production host
//! and a simulated one.
//!
//! # Components
//!
//! - [`NavManager`]: Smart push/replace/collapse policy and stack repair
//! - [`HostBridge`]: Hardware back button, app lifecycle, press-twice-to-exit
//! - [`Driver`]: Trait for platform-specific I/O abstraction
//! - [`Runtime`]: Generic orchestration loop using Driver

#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod action;
mod bridge;
mod driver;
mod event;
mod manager;
mod runtime;

pub use action::{AppSignal, HostAction};
pub use bridge::{BridgeConfig, ExitHandler, HostBridge};
pub use driver::{Driver, HostInfo};
pub use event::HostEvent;
pub use manager::{FEATURE_ROOTS, NavManager, NavOutcome};
pub use runtime::Runtime;
