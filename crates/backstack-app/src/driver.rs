//! Driver trait for abstracting host I/O.
//!
//! The [`Driver`] trait decouples the navigation runtime from a specific
//! host. Each host implements the trait to provide platform I/O, while the
//! generic [`crate::Runtime`] handles all orchestration.

use std::future::Future;

use backstack_gesture::InputHook;

use crate::{action::HostAction, event::HostEvent};

/// What the host reports about itself at startup, before the engine decides
/// which platform profile and input hooks to use.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct HostInfo {
    /// Platform name from a native shell bridge, if one is present.
    pub native_platform: Option<String>,
    /// Browser user agent, if running inside one.
    pub user_agent: Option<String>,
    /// Initial viewport width in px.
    pub viewport_width: f32,
}

/// Abstracts host I/O for the navigation runtime.
///
/// Implementations provide platform-specific I/O while the generic
/// [`Runtime`](crate::Runtime) handles orchestration logic. This ensures
/// the same orchestration code runs against a real host and in simulation.
///
/// # Implementations
///
/// - **Web**: DOM touch/keyboard events, a router, `window.history`
/// - **Native shell**: the embedding bridge's back button and lifecycle
///   callbacks on top of the web driver
/// - **Simulation**: scripted events and a virtual clock
pub trait Driver: Send {
    /// Platform-specific error type.
    type Error: std::error::Error + Send + 'static;

    /// Describe the host environment. Called once at startup.
    fn host_info(&self) -> HostInfo;

    /// Install the input hooks chosen for the detected platform.
    ///
    /// # Errors
    ///
    /// Returns an error if the host rejects a hook.
    fn install_hooks(&mut self, hooks: &[InputHook]) -> Result<(), Self::Error>;

    /// Poll for the next host event.
    ///
    /// Returns `None` when the host has shut down and no more events will
    /// arrive.
    fn poll_event(&mut self) -> impl Future<Output = Result<Option<HostEvent>, Self::Error>> + Send;

    /// Execute a host action.
    ///
    /// # Errors
    ///
    /// Returns an error if the host cannot perform the action.
    fn apply(&mut self, action: HostAction) -> Result<(), Self::Error>;

    /// Whether host-level history has an entry to go back to.
    fn history_available(&self) -> bool;

    /// Current host clock in milliseconds. Virtual in simulation.
    fn now_ms(&self) -> u64;

    /// Release host resources and uninstall hooks.
    fn stop(&mut self);
}
