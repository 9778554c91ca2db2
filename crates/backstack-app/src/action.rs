//! Host side-effects and intents.
//!
//! This module defines [`HostAction`], instructions produced by the bridge
//! and runtime for the driver to execute. The engine itself performs no
//! I/O; everything user-visible happens on the other side of these actions.

use backstack_gesture::Edge;

/// Signals re-emitted to the surrounding app code (the excluded UI layer
/// listens for these as custom events).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppSignal {
    /// The app returned to the foreground.
    Activated,
    /// The app moved to the background.
    Deactivated,
}

/// Actions produced for the driver to execute.
#[derive(Debug, Clone, PartialEq)]
pub enum HostAction {
    /// Re-render the UI from the current navigation state.
    Render,

    /// Ask the router to move to this path (route sync after a back).
    Navigate {
        /// Target route path.
        path: String,
    },

    /// Show a transient toast.
    ShowToast {
        /// Toast text.
        message: String,
    },

    /// Trigger haptic feedback if the host supports it; degrade to a no-op
    /// otherwise.
    Haptic,

    /// Briefly flash the back indicator.
    FlashBackIndicator,

    /// Render the edge-swipe indicator at this edge.
    ShowEdgeIndicator(Edge),

    /// Remove the edge-swipe indicator.
    HideEdgeIndicator,

    /// Suppress the host's default handling of the triggering input event.
    PreventDefault,

    /// Fall back to host-level history navigation.
    HistoryBack,

    /// Show a blocking exit confirmation and exit the app if the user
    /// confirms.
    ConfirmExit,

    /// Exit the app immediately.
    ExitApp,

    /// Re-emit a lifecycle signal for the surrounding app code.
    Emit(AppSignal),

    /// Hand a deep link to the routing layer.
    DeepLink {
        /// The URL that opened the app.
        url: String,
    },
}
