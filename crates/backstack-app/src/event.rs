//! Host input events.
//!
//! This module defines [`HostEvent`], the set of inputs that drive the
//! navigation engine. Events originate from three distinct sources:
//!
//! - Raw input the driver forwards (touches, hardware back button, web back
//!   shortcuts).
//! - The routing/UI layer announcing screens and modals becoming active.
//! - The native shell's lifecycle notifications.
//!
//! All timestamps are host-clock milliseconds; the engine never reads a
//! clock itself, which keeps every transition replayable under a virtual
//! clock.

use backstack_core::Page;
use backstack_gesture::TouchEvent;

/// Events processed by the navigation engine.
#[derive(Debug, Clone, PartialEq)]
pub enum HostEvent {
    /// A raw touch sample for the edge-swipe recognizer.
    Touch(TouchEvent),

    /// The hardware back button was pressed (native shells only).
    BackButton {
        /// Press timestamp in ms, used for the double-press-to-exit window.
        at_ms: u64,
    },

    /// A web back shortcut fired: `Escape`, `Alt+ArrowLeft`, or the mouse
    /// side back button. Runs the gesture pipeline but never the exit flow.
    BackShortcut {
        /// Event timestamp in ms.
        at_ms: u64,
    },

    /// A screen became active; screen-mount code registers it here.
    PageOpened(Page),

    /// A modal/dialog component opened.
    ModalOpened(Page),

    /// The topmost modal closed through its own UI (not via back).
    ModalClosed,

    /// The host app moved between foreground and background.
    AppStateChange {
        /// `true` on resume, `false` on pause.
        active: bool,
    },

    /// The host shell received a deep link.
    UrlOpened {
        /// The full URL that opened the app.
        url: String,
    },

    /// The host restored the app after the OS evicted it.
    AppRestored,

    /// The viewport was resized or rotated.
    ViewportResized {
        /// New viewport width in px.
        width: f32,
    },
}
