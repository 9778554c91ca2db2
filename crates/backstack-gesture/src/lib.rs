//! Gesture recognition for Backstack
//!
//! Recognizes an edge-swipe-to-go-back gesture from low-level touch events,
//! independent of any UI framework, and dispatches synthetic back actions
//! through a prioritized listener chain.
//!
//! The recognizer follows the same sans-IO pattern as the rest of the
//! workspace: it consumes [`TouchEvent`] inputs and produces [`SwipeAction`]
//! instructions for the host driver to execute (prevent default scrolling,
//! render an edge indicator, fire the back pipeline).
//!
//! # Components
//!
//! - [`Platform`]: Host platform detection and per-platform input hooks
//! - [`GestureConfig`]: Tunable edge/distance/time thresholds
//! - [`SwipeRecognizer`]: Touch-based edge-swipe state machine
//! - [`BackDispatcher`]: Priority-ordered back listener registry

#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod config;
mod dispatch;
mod error;
mod platform;
mod swipe;

pub use config::GestureConfig;
pub use dispatch::{BackDispatcher, ListenerId};
pub use error::GestureError;
pub use platform::{InputHook, Platform, input_hooks};
pub use swipe::{Edge, SwipeAction, SwipeDirection, SwipeRecognizer, TouchEvent, TouchPhase};
