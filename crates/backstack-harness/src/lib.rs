//! Deterministic simulation harness for the navigation engine.
//!
//! Provides a scripted [`Driver`](backstack_app::Driver) implementation so
//! the exact orchestration code that runs against a real host can be driven
//! through full scenarios with a virtual clock and inspected afterwards.
//!
//! # Usage
//!
//! Script a sequence of [`HostEvent`](backstack_app::HostEvent)s, run the
//! [`Runtime`](backstack_app::Runtime) to completion, then assert on the
//! [`HostAction`](backstack_app::HostAction)s the driver recorded.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod script;
pub mod sim_driver;

pub use script::edge_swipe;
pub use sim_driver::{SimDriver, SimDriverError, SimHandle};
