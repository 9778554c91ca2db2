//! Host integration bridge.
//!
//! Adapts the navigation engine to a native app shell: hardware back
//! button, app lifecycle, press-twice-to-exit. Owns the [`NavManager`] and
//! the [`BackDispatcher`] so there is exactly one navigation truth.
//!
//! Entirely inert when no native shell is present: the driver simply never
//! produces `BackButton` or lifecycle events in pure web mode.

use backstack_gesture::{BackDispatcher, SwipeDirection};

use crate::{
    action::{AppSignal, HostAction},
    manager::NavManager,
};

/// Hardware back button handling configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BridgeConfig {
    /// Whether hardware back button handling is active.
    pub enabled: bool,
    /// Window in ms within which a second root-level back press exits.
    pub double_click_exit_interval_ms: u64,
    /// Show a blocking confirmation instead of double-press-to-exit.
    pub exit_confirmation: bool,
}

impl Default for BridgeConfig {
    fn default() -> Self {
        Self { enabled: true, double_click_exit_interval_ms: 2000, exit_confirmation: false }
    }
}

/// Caller-supplied exit handler with first refusal on hardware back
/// presses. Returns whether it handled the press.
pub type ExitHandler = Box<dyn FnMut() -> bool + Send>;

/// Bridge between the native shell and the navigation engine.
pub struct HostBridge {
    config: BridgeConfig,
    manager: NavManager,
    dispatcher: BackDispatcher,
    custom_exit_handler: Option<ExitHandler>,
    /// Timestamp of the last root-level back press; the state of the
    /// double-press window.
    last_back_press_ms: Option<u64>,
    /// Suppresses callbacks the native side fires after teardown began.
    destroyed: bool,
}

impl std::fmt::Debug for HostBridge {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HostBridge")
            .field("config", &self.config)
            .field("manager", &self.manager)
            .field("last_back_press_ms", &self.last_back_press_ms)
            .field("destroyed", &self.destroyed)
            .finish_non_exhaustive()
    }
}

impl HostBridge {
    /// Create a bridge with a fresh manager and empty listener registry.
    pub fn new(config: BridgeConfig) -> Self {
        Self {
            config,
            manager: NavManager::new(),
            dispatcher: BackDispatcher::new(),
            custom_exit_handler: None,
            last_back_press_ms: None,
            destroyed: false,
        }
    }

    /// Replace the configuration.
    pub fn set_config(&mut self, config: BridgeConfig) {
        tracing::debug!(?config, "bridge config updated");
        self.config = config;
    }

    /// Current configuration.
    pub fn config(&self) -> &BridgeConfig {
        &self.config
    }

    /// Install a custom exit handler consulted before anything else on a
    /// hardware back press.
    pub fn set_custom_exit_handler(
        &mut self,
        handler: impl FnMut() -> bool + Send + 'static,
    ) {
        self.custom_exit_handler = Some(Box::new(handler));
    }

    /// The navigation manager.
    pub fn manager(&self) -> &NavManager {
        &self.manager
    }

    /// Mutable access to the navigation manager.
    pub fn manager_mut(&mut self) -> &mut NavManager {
        &mut self.manager
    }

    /// Mutable access to the back listener registry.
    pub fn dispatcher_mut(&mut self) -> &mut BackDispatcher {
        &mut self.dispatcher
    }

    /// Handle a hardware back button press.
    ///
    /// Attempts, in order: the custom exit handler, the full back chain
    /// (listeners, then the navigation manager), and finally the exit flow
    /// when the chain handled nothing and the stack says the app may close.
    ///
    /// The hardware path never falls back to host history: at the root the
    /// button should reach the exit flow, not bounce into web history.
    pub fn handle_back_button(&mut self, at_ms: u64) -> Vec<HostAction> {
        if self.destroyed || !self.config.enabled {
            return vec![];
        }

        if let Some(handler) = &mut self.custom_exit_handler {
            if handler() {
                tracing::debug!("custom exit handler consumed back press");
                return vec![];
            }
        }

        let (mut actions, handled) = self.back_chain(SwipeDirection::Right, false);
        if !handled && self.manager.store().can_exit_app() {
            actions.extend(self.handle_app_exit(at_ms));
        }
        actions
    }

    /// Run the back-gesture pipeline for a recognized swipe or a web back
    /// shortcut: haptic and indicator feedback, then the listener chain,
    /// then the manager, then host history if any exists.
    ///
    /// Gesture feedback fires only on this path; the hardware button gives
    /// its own physical feedback.
    pub fn handle_back_gesture(
        &mut self,
        direction: SwipeDirection,
        history_available: bool,
    ) -> Vec<HostAction> {
        if self.destroyed {
            return vec![];
        }
        let (chain, _) = self.back_chain(direction, history_available);
        let mut actions = vec![HostAction::Haptic, HostAction::FlashBackIndicator];
        actions.extend(chain);
        actions
    }

    /// The shared back chain. Returns the resulting actions and whether any
    /// layer consumed the back intent.
    fn back_chain(
        &mut self,
        direction: SwipeDirection,
        history_available: bool,
    ) -> (Vec<HostAction>, bool) {
        if self.dispatcher.dispatch(direction) {
            return (vec![HostAction::Render], true);
        }

        if self.manager.handle_back_action() {
            return (self.route_sync_actions(), true);
        }

        if history_available {
            tracing::debug!("falling back to host history");
            return (vec![HostAction::HistoryBack], true);
        }

        tracing::debug!("back intent unhandled");
        (vec![], false)
    }

    /// Handle foreground/background transitions.
    ///
    /// Resume repairs the navigation state; pause clears the double-press
    /// window so a stale first press never counts after the app was
    /// backgrounded and resumed.
    pub fn handle_app_state_change(&mut self, active: bool) -> Vec<HostAction> {
        if self.destroyed {
            return vec![];
        }
        if active {
            tracing::debug!("app activated");
            self.manager.restore();
            vec![HostAction::Emit(AppSignal::Activated), HostAction::Render]
        } else {
            tracing::debug!("app deactivated");
            self.last_back_press_ms = None;
            vec![HostAction::Emit(AppSignal::Deactivated)]
        }
    }

    /// Hand a deep link to the routing layer.
    pub fn handle_url_open(&mut self, url: &str) -> Vec<HostAction> {
        if self.destroyed {
            return vec![];
        }
        tracing::debug!(%url, "app url open");
        vec![HostAction::DeepLink { url: url.to_string() }]
    }

    /// The host restored the app after OS eviction. The store is rebuilt by
    /// the routing layer replaying the restored route; nothing to do here.
    pub fn handle_app_restored(&mut self) -> Vec<HostAction> {
        if self.destroyed {
            return vec![];
        }
        tracing::debug!("app restored");
        vec![]
    }

    /// Begin teardown: every subsequent callback becomes a no-op and all
    /// listeners are released.
    pub fn destroy(&mut self) {
        tracing::debug!("bridge destroyed");
        self.destroyed = true;
        self.dispatcher.clear();
        self.custom_exit_handler = None;
        self.last_back_press_ms = None;
    }

    /// Whether teardown has begun.
    pub fn is_destroyed(&self) -> bool {
        self.destroyed
    }

    fn handle_app_exit(&mut self, at_ms: u64) -> Vec<HostAction> {
        if self.config.exit_confirmation {
            return vec![HostAction::ConfirmExit];
        }

        let within_window = self
            .last_back_press_ms
            .is_some_and(|last| at_ms.saturating_sub(last) < self.config.double_click_exit_interval_ms);

        if within_window {
            tracing::debug!("double press confirmed, exiting");
            self.last_back_press_ms = None;
            vec![HostAction::ExitApp]
        } else {
            // The timestamp itself is the state; a late second press
            // restarts the window.
            self.last_back_press_ms = Some(at_ms);
            vec![HostAction::ShowToast { message: "Press back again to exit".to_string() }]
        }
    }

    /// Route synchronization after a handled back: no route change while
    /// modals remain, otherwise follow the new current page.
    fn route_sync_actions(&self) -> Vec<HostAction> {
        if self.manager.store().modal_depth() > 0 {
            return vec![HostAction::Render];
        }
        vec![HostAction::Navigate { path: self.manager.current_path() }, HostAction::Render]
    }
}

#[cfg(test)]
mod tests {
    use backstack_core::{Page, PageLevel};

    use super::*;

    fn feature(id: &str, path: &str) -> Page {
        Page::new(id, PageLevel::Feature, id.to_uppercase(), path)
    }

    fn root_level_bridge() -> HostBridge {
        let mut bridge = HostBridge::new(BridgeConfig::default());
        bridge.manager_mut().initialize(true);
        bridge
    }

    fn has_exit(actions: &[HostAction]) -> bool {
        actions.contains(&HostAction::ExitApp)
    }

    fn has_toast(actions: &[HostAction]) -> bool {
        actions.iter().any(|a| matches!(a, HostAction::ShowToast { .. }))
    }

    #[test]
    fn double_press_within_interval_exits() {
        let mut bridge = root_level_bridge();

        let first = bridge.handle_back_button(1_000);
        assert!(has_toast(&first));
        assert!(!has_exit(&first));

        let second = bridge.handle_back_button(2_500);
        assert!(has_exit(&second));
    }

    #[test]
    fn slow_second_press_restarts_the_window() {
        let mut bridge = root_level_bridge();

        bridge.handle_back_button(1_000);
        // Too late: becomes a fresh first press.
        let late = bridge.handle_back_button(4_000);
        assert!(has_toast(&late));
        assert!(!has_exit(&late));

        // Within the restarted window.
        let third = bridge.handle_back_button(5_000);
        assert!(has_exit(&third));
    }

    #[test]
    fn exit_confirmation_mode_prompts_instead() {
        let mut bridge = HostBridge::new(BridgeConfig {
            exit_confirmation: true,
            ..BridgeConfig::default()
        });
        bridge.manager_mut().initialize(true);

        let actions = bridge.handle_back_button(1_000);
        assert!(actions.contains(&HostAction::ConfirmExit));
        assert!(!has_exit(&actions));
        assert!(!has_toast(&actions));
    }

    #[test]
    fn back_press_pops_before_exit_flow() {
        let mut bridge = root_level_bridge();
        bridge.manager_mut().navigate_to_page(feature("budgets", "/budgets"));

        let actions = bridge.handle_back_button(1_000);
        assert!(actions.contains(&HostAction::Navigate { path: "/dashboard".to_string() }));
        assert!(!has_exit(&actions));

        // Now at root: next two presses run the exit flow.
        bridge.handle_back_button(2_000);
        assert!(has_exit(&bridge.handle_back_button(2_500)));
    }

    #[test]
    fn custom_exit_handler_has_first_refusal() {
        let mut bridge = root_level_bridge();
        bridge.manager_mut().navigate_to_page(feature("budgets", "/budgets"));
        bridge.set_custom_exit_handler(|| true);

        let actions = bridge.handle_back_button(1_000);
        assert!(actions.is_empty());
        // The page stack was not touched.
        assert_eq!(bridge.manager().store().depth(), 2);
    }

    #[test]
    fn listener_consumes_before_manager() {
        let mut bridge = root_level_bridge();
        bridge.manager_mut().navigate_to_page(feature("budgets", "/budgets"));
        bridge.dispatcher_mut().add_listener(|_| true, PageLevel::Feature);

        let actions = bridge.handle_back_button(1_000);
        assert!(actions.contains(&HostAction::Render));
        assert!(!actions.iter().any(|a| matches!(a, HostAction::Navigate { .. })));
        assert_eq!(bridge.manager().store().depth(), 2);
    }

    #[test]
    fn gesture_pipeline_gives_feedback_then_pops() {
        let mut bridge = root_level_bridge();
        bridge.manager_mut().navigate_to_page(feature("budgets", "/budgets"));

        let actions = bridge.handle_back_gesture(SwipeDirection::Right, false);
        assert_eq!(actions[0], HostAction::Haptic);
        assert_eq!(actions[1], HostAction::FlashBackIndicator);
        assert!(actions.contains(&HostAction::Navigate { path: "/dashboard".to_string() }));
    }

    #[test]
    fn gesture_pipeline_history_fallback() {
        let mut bridge = root_level_bridge();

        // At root with no listeners: feedback only, nothing to pop.
        let without_history = bridge.handle_back_gesture(SwipeDirection::Right, false);
        assert_eq!(without_history, vec![HostAction::Haptic, HostAction::FlashBackIndicator]);

        let with_history = bridge.handle_back_gesture(SwipeDirection::Right, true);
        assert!(with_history.contains(&HostAction::HistoryBack));
    }

    #[test]
    fn hardware_back_gives_no_gesture_feedback() {
        let mut bridge = root_level_bridge();
        bridge.manager_mut().navigate_to_page(feature("budgets", "/budgets"));

        // A pop through the button carries no haptic or indicator flash.
        let pop = bridge.handle_back_button(1_000);
        assert!(pop.contains(&HostAction::Navigate { path: "/dashboard".to_string() }));
        assert!(!pop.contains(&HostAction::Haptic));
        assert!(!pop.contains(&HostAction::FlashBackIndicator));

        // Neither does a root-level press entering the exit flow.
        let toast = bridge.handle_back_button(2_000);
        assert!(has_toast(&toast));
        assert!(!toast.contains(&HostAction::Haptic));
        assert!(!toast.contains(&HostAction::FlashBackIndicator));
    }

    #[test]
    fn closing_modal_keeps_current_route() {
        let mut bridge = root_level_bridge();
        bridge.manager_mut().navigate_to_page(feature("budgets", "/budgets"));
        bridge
            .manager_mut()
            .open_modal(Page::new("m1", PageLevel::Modal, "M1", "/budgets/7"));
        bridge
            .manager_mut()
            .open_modal(Page::new("m2", PageLevel::Modal, "M2", "/budgets/7/edit"));

        // A modal remains open afterwards: no route change.
        let actions = bridge.handle_back_button(1_000);
        assert!(actions.contains(&HostAction::Render));
        assert!(!actions.iter().any(|a| matches!(a, HostAction::Navigate { .. })));
        assert_eq!(bridge.manager().store().modal_depth(), 1);
    }

    #[test]
    fn deactivation_resets_double_press_window() {
        let mut bridge = root_level_bridge();
        bridge.handle_back_button(1_000);

        let actions = bridge.handle_app_state_change(false);
        assert_eq!(actions, vec![HostAction::Emit(AppSignal::Deactivated)]);

        // Would have been within the window, but the pause cleared it.
        let after_resume = bridge.handle_back_button(1_500);
        assert!(has_toast(&after_resume));
        assert!(!has_exit(&after_resume));
    }

    #[test]
    fn activation_repairs_state_and_signals() {
        let mut bridge = root_level_bridge();
        bridge.manager_mut().store_mut().reset();

        let actions = bridge.handle_app_state_change(true);
        assert_eq!(
            actions,
            vec![HostAction::Emit(AppSignal::Activated), HostAction::Render]
        );
        assert_eq!(bridge.manager().store().depth(), 1);
    }

    #[test]
    fn url_open_forwards_deep_link() {
        let mut bridge = root_level_bridge();
        let actions = bridge.handle_url_open("moneytrail://transactions/new");
        assert_eq!(
            actions,
            vec![HostAction::DeepLink { url: "moneytrail://transactions/new".to_string() }]
        );
    }

    #[test]
    fn destroyed_bridge_suppresses_all_callbacks() {
        let mut bridge = root_level_bridge();
        bridge.destroy();

        assert!(bridge.is_destroyed());
        assert!(bridge.handle_back_button(1_000).is_empty());
        assert!(bridge.handle_back_gesture(SwipeDirection::Right, true).is_empty());
        assert!(bridge.handle_app_state_change(true).is_empty());
        assert!(bridge.handle_url_open("x://y").is_empty());
        assert!(bridge.handle_app_restored().is_empty());
    }

    #[test]
    fn disabled_config_ignores_back_button() {
        let mut bridge = HostBridge::new(BridgeConfig {
            enabled: false,
            ..BridgeConfig::default()
        });
        bridge.manager_mut().initialize(true);
        bridge.manager_mut().navigate_to_page(feature("budgets", "/budgets"));

        assert!(bridge.handle_back_button(1_000).is_empty());
        assert_eq!(bridge.manager().store().depth(), 2);
    }
}
