//! Simulation driver implementing the Driver trait.
//!
//! `SimDriver` plays back a scripted event sequence and records every
//! action the runtime applies. It implements [`Driver`] so the same
//! [`backstack_app::Runtime`] orchestration code runs in both production
//! and simulation.

#![allow(clippy::disallowed_types, reason = "Synchronous locking operations only")]

use std::{
    collections::VecDeque,
    sync::{Arc, Mutex},
};

use backstack_app::{Driver, HostAction, HostEvent, HostInfo};
use backstack_gesture::InputHook;

/// Error type for the simulation driver.
#[derive(Debug, Clone)]
pub struct SimDriverError(pub String);

impl std::fmt::Display for SimDriverError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "SimDriverError: {}", self.0)
    }
}

impl std::error::Error for SimDriverError {}

/// Shared state between the driver and the test's [`SimHandle`].
#[derive(Default)]
struct SharedState {
    script: VecDeque<HostEvent>,
    applied: Vec<HostAction>,
    installed_hooks: Vec<InputHook>,
    clock_ms: u64,
    history_entries: u32,
    stopped: bool,
}

/// Scripted driver for deterministic testing.
///
/// The runtime consumes the driver; create a [`SimHandle`] first to keep a
/// window into the shared state for post-run assertions.
pub struct SimDriver {
    state: Arc<Mutex<SharedState>>,
    info: HostInfo,
}

/// Inspection handle over a [`SimDriver`]'s shared state. Stays valid after
/// the runtime consumed the driver.
#[derive(Clone)]
pub struct SimHandle {
    state: Arc<Mutex<SharedState>>,
}

impl SimDriver {
    /// Create a driver reporting the given host environment.
    pub fn new(info: HostInfo) -> Self {
        Self { state: Arc::new(Mutex::new(SharedState::default())), info }
    }

    /// An Android shell host with a 400px viewport.
    pub fn android() -> Self {
        Self::new(HostInfo {
            native_platform: Some("android".to_string()),
            user_agent: Some("Mozilla/5.0 (Linux; Android 14) Mobile".to_string()),
            viewport_width: 400.0,
        })
    }

    /// An iOS shell host with a 400px viewport.
    pub fn ios() -> Self {
        Self::new(HostInfo {
            native_platform: Some("ios".to_string()),
            user_agent: Some("Mozilla/5.0 (iPhone; CPU iPhone OS 17_0)".to_string()),
            viewport_width: 400.0,
        })
    }

    /// A plain desktop browser host.
    pub fn web() -> Self {
        Self::new(HostInfo {
            native_platform: None,
            user_agent: Some("Mozilla/5.0 (X11; Linux x86_64)".to_string()),
            viewport_width: 1280.0,
        })
    }

    /// Inspection handle for after the runtime consumed this driver.
    pub fn handle(&self) -> SimHandle {
        SimHandle { state: Arc::clone(&self.state) }
    }

    /// Append one event to the script.
    pub fn push_event(&self, event: HostEvent) {
        let mut state = self.state.lock().unwrap();
        state.script.push_back(event);
    }

    /// Append a batch of events to the script.
    pub fn push_events(&self, events: impl IntoIterator<Item = HostEvent>) {
        let mut state = self.state.lock().unwrap();
        state.script.extend(events);
    }

    /// Pretend the host history has this many entries to go back to.
    pub fn set_history_entries(&self, entries: u32) {
        self.state.lock().unwrap().history_entries = entries;
    }
}

impl SimHandle {
    /// All actions applied so far, in order.
    pub fn applied(&self) -> Vec<HostAction> {
        self.state.lock().unwrap().applied.clone()
    }

    /// How many applied actions satisfy the predicate.
    pub fn count(&self, predicate: impl Fn(&HostAction) -> bool) -> usize {
        self.state.lock().unwrap().applied.iter().filter(|a| predicate(a)).count()
    }

    /// Whether any applied action satisfies the predicate.
    pub fn saw(&self, predicate: impl Fn(&HostAction) -> bool) -> bool {
        self.count(predicate) > 0
    }

    /// Hooks the runtime installed at startup.
    pub fn installed_hooks(&self) -> Vec<InputHook> {
        self.state.lock().unwrap().installed_hooks.clone()
    }

    /// Whether the runtime released the driver.
    pub fn stopped(&self) -> bool {
        self.state.lock().unwrap().stopped
    }

    /// Events left unconsumed when the loop ended.
    pub fn remaining_events(&self) -> usize {
        self.state.lock().unwrap().script.len()
    }
}

impl Driver for SimDriver {
    type Error = SimDriverError;

    fn host_info(&self) -> HostInfo {
        self.info.clone()
    }

    fn install_hooks(&mut self, hooks: &[InputHook]) -> Result<(), Self::Error> {
        let mut state = self.state.lock().unwrap();
        state.installed_hooks = hooks.to_vec();
        Ok(())
    }

    async fn poll_event(&mut self) -> Result<Option<HostEvent>, Self::Error> {
        let mut state = self.state.lock().unwrap();
        let event = state.script.pop_front();
        // Advance the virtual clock to the event's own timestamp.
        match &event {
            Some(HostEvent::Touch(touch)) => state.clock_ms = touch.at_ms,
            Some(HostEvent::BackButton { at_ms } | HostEvent::BackShortcut { at_ms }) => {
                state.clock_ms = *at_ms;
            },
            _ => {},
        }
        Ok(event)
    }

    fn apply(&mut self, action: HostAction) -> Result<(), Self::Error> {
        let mut state = self.state.lock().unwrap();
        if let HostAction::HistoryBack = action {
            state.history_entries = state.history_entries.saturating_sub(1);
        }
        tracing::debug!(?action, "sim applied");
        state.applied.push(action);
        Ok(())
    }

    fn history_available(&self) -> bool {
        self.state.lock().unwrap().history_entries > 0
    }

    fn now_ms(&self) -> u64 {
        self.state.lock().unwrap().clock_ms
    }

    fn stop(&mut self) {
        self.state.lock().unwrap().stopped = true;
    }
}
