//! Generic runtime for navigation orchestration.
//!
//! The Runtime drives the engine's event loop, coordinating between:
//! - [`SwipeRecognizer`]: edge-swipe state machine
//! - [`HostBridge`]: back chain, lifecycle, exit flow
//! - [`Driver`]: platform-specific I/O

use backstack_gesture::{
    GestureConfig, GestureError, Platform, SwipeAction, SwipeDirection, SwipeRecognizer,
    input_hooks,
};

use crate::{
    action::HostAction,
    bridge::{BridgeConfig, HostBridge},
    driver::Driver,
    event::HostEvent,
};

/// Generic runtime that orchestrates recognizer, bridge, and driver.
///
/// # Type Parameters
///
/// - `D`: Platform-specific I/O driver
pub struct Runtime<D>
where
    D: Driver,
{
    driver: D,
    bridge: HostBridge,
    recognizer: SwipeRecognizer,
    platform: Platform,
}

impl<D> Runtime<D>
where
    D: Driver,
{
    /// Create a new runtime with the given driver and configuration.
    ///
    /// # Errors
    ///
    /// Returns [`GestureError`] if the gesture configuration is invalid.
    pub fn new(
        driver: D,
        gesture_config: GestureConfig,
        bridge_config: BridgeConfig,
    ) -> Result<Self, GestureError> {
        // The real viewport width arrives with the host info at run time.
        let recognizer = SwipeRecognizer::new(gesture_config, 0.0)?;
        let bridge = HostBridge::new(bridge_config);
        Ok(Self { driver, bridge, recognizer, platform: Platform::Unknown })
    }

    /// The detected platform, meaningful once [`run`](Self::run) started.
    pub fn platform(&self) -> Platform {
        self.platform
    }

    /// The host bridge, for listener registration before the loop starts.
    pub fn bridge_mut(&mut self) -> &mut HostBridge {
        &mut self.bridge
    }

    /// Run the main event loop.
    ///
    /// Detects the platform, installs input hooks, then processes host
    /// events until the driver runs dry or an [`HostAction::ExitApp`] is
    /// applied.
    ///
    /// # Errors
    ///
    /// Returns an error if the driver encounters an I/O error.
    pub async fn run(mut self) -> Result<(), D::Error> {
        let info = self.driver.host_info();
        self.platform =
            Platform::detect(info.native_platform.as_deref(), info.user_agent.as_deref());

        let is_mobile = info.native_platform.is_some()
            || info.user_agent.as_deref().is_some_and(Platform::is_mobile_user_agent);

        tracing::info!(platform = ?self.platform, is_mobile, "runtime starting");

        self.driver.install_hooks(input_hooks(self.platform))?;
        self.recognizer.set_viewport_width(info.viewport_width);
        self.bridge.manager_mut().initialize(is_mobile);
        self.driver.apply(HostAction::Render)?;

        while let Some(event) = self.driver.poll_event().await? {
            let actions = self.handle_event(event);
            if self.apply_actions(actions)? {
                break;
            }
        }

        self.bridge.destroy();
        self.driver.stop();
        Ok(())
    }

    /// Route one host event to the recognizer, the bridge, or the manager.
    fn handle_event(&mut self, event: HostEvent) -> Vec<HostAction> {
        match event {
            HostEvent::Touch(touch) => {
                let swipe_actions = self.recognizer.on_touch(&touch);
                self.process_swipe_actions(swipe_actions)
            },
            HostEvent::BackButton { at_ms } => self.bridge.handle_back_button(at_ms),
            HostEvent::BackShortcut { at_ms: _ } => self
                .bridge
                .handle_back_gesture(SwipeDirection::Right, self.driver.history_available()),
            HostEvent::PageOpened(page) => {
                self.bridge.manager_mut().navigate_to_page(page);
                vec![HostAction::Render]
            },
            HostEvent::ModalOpened(modal) => {
                self.bridge.manager_mut().open_modal(modal);
                vec![HostAction::Render]
            },
            HostEvent::ModalClosed => {
                self.bridge.manager_mut().close_modal();
                vec![HostAction::Render]
            },
            HostEvent::AppStateChange { active } => self.bridge.handle_app_state_change(active),
            HostEvent::UrlOpened { url } => self.bridge.handle_url_open(&url),
            HostEvent::AppRestored => self.bridge.handle_app_restored(),
            HostEvent::ViewportResized { width } => {
                self.recognizer.set_viewport_width(width);
                vec![]
            },
        }
    }

    /// Translate recognizer output into host actions, running the back
    /// pipeline when a swipe completes.
    fn process_swipe_actions(&mut self, swipe_actions: Vec<SwipeAction>) -> Vec<HostAction> {
        let mut actions = Vec::new();
        for swipe_action in swipe_actions {
            match swipe_action {
                SwipeAction::ShowEdgeIndicator(edge) => {
                    actions.push(HostAction::ShowEdgeIndicator(edge));
                },
                SwipeAction::HideEdgeIndicator => actions.push(HostAction::HideEdgeIndicator),
                SwipeAction::PreventDefault => actions.push(HostAction::PreventDefault),
                SwipeAction::Back(direction) => {
                    let history = self.driver.history_available();
                    actions.extend(self.bridge.handle_back_gesture(direction, history));
                },
            }
        }
        actions
    }

    /// Apply actions through the driver.
    ///
    /// Returns `true` if the loop should stop.
    fn apply_actions(&mut self, actions: Vec<HostAction>) -> Result<bool, D::Error> {
        for action in actions {
            let exit = matches!(action, HostAction::ExitApp);
            self.driver.apply(action)?;
            if exit {
                return Ok(true);
            }
        }
        Ok(false)
    }
}
