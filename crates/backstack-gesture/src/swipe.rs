//! Edge-swipe state machine.
//!
//! Consumes raw touch events and produces [`SwipeAction`]s. Only a
//! left-edge start followed by a predominantly horizontal rightward drag
//! fires a back gesture; right-edge swipes are tracked for indicator
//! rendering but never trigger back.
//!
//! ```text
//! ┌──────┐ start in edge band ┌──────────┐ thresholds met ┌──────────┐
//! │ Idle │───────────────────>│ Tracking │───────────────>│ Back(→)  │
//! └──────┘                    └──────────┘                └──────────┘
//!                                  │ vertical drift / too slow /
//!                                  │ end / cancel
//!                                  ↓
//!                               (reset)
//! ```
//!
//! Cancellation is just a state reset: there is no token, a gesture that
//! fails the horizontal-dominance check simply clears the tracking state.

use crate::{config::GestureConfig, error::GestureError};

/// Horizontal travel must exceed vertical travel by this factor before a
/// drag counts as a back swipe.
const HORIZONTAL_DOMINANCE: f32 = 1.5;

/// Touch lifecycle phase, mirroring the host's touch events.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TouchPhase {
    /// A finger landed.
    Start,
    /// A tracked finger moved.
    Move,
    /// The finger lifted.
    End,
    /// The host cancelled the touch sequence.
    Cancel,
}

/// A raw touch sample forwarded by the host driver.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TouchEvent {
    /// Lifecycle phase.
    pub phase: TouchPhase,
    /// Horizontal position in px from the left screen edge.
    pub x: f32,
    /// Vertical position in px from the top screen edge.
    pub y: f32,
    /// Event timestamp in ms.
    pub at_ms: u64,
    /// Number of active touch points.
    pub touches: u8,
}

/// Which screen edge a tracked gesture started from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Edge {
    /// Left screen edge; rightward swipes from here mean "back".
    Left,
    /// Right screen edge; tracked for indicator purposes only.
    Right,
}

/// Direction of travel of a recognized swipe.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SwipeDirection {
    /// Leftward travel.
    Left,
    /// Rightward travel. A back gesture always travels right.
    Right,
}

/// Instructions for the host driver.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SwipeAction {
    /// Render the visual edge indicator at this edge.
    ShowEdgeIndicator(Edge),
    /// Remove the visual edge indicator.
    HideEdgeIndicator,
    /// Suppress the host's default handling (scroll) for this event.
    PreventDefault,
    /// A back gesture was recognized; run the back pipeline.
    Back(SwipeDirection),
}

#[derive(Debug, Clone, Copy)]
struct TouchPoint {
    x: f32,
    y: f32,
    at_ms: u64,
}

/// Touch-based edge-swipe recognizer.
///
/// Pure state machine: no timers, no I/O. Time arrives on the events
/// themselves, so the recognizer behaves identically under a virtual clock.
#[derive(Debug)]
pub struct SwipeRecognizer {
    config: GestureConfig,
    viewport_width: f32,
    tracking: Option<(TouchPoint, Edge)>,
}

impl SwipeRecognizer {
    /// Create a recognizer for a viewport of the given width.
    ///
    /// # Errors
    ///
    /// Returns [`GestureError::InvalidConfig`] if the thresholds are
    /// unusable.
    pub fn new(config: GestureConfig, viewport_width: f32) -> Result<Self, GestureError> {
        config.validate()?;
        Ok(Self { config, viewport_width, tracking: None })
    }

    /// Replace the thresholds, aborting any gesture in progress.
    ///
    /// # Errors
    ///
    /// Returns [`GestureError::InvalidConfig`] if the new thresholds are
    /// unusable; the previous config stays in effect.
    pub fn set_config(&mut self, config: GestureConfig) -> Result<(), GestureError> {
        config.validate()?;
        self.config = config;
        self.tracking = None;
        Ok(())
    }

    /// Current thresholds.
    pub fn config(&self) -> &GestureConfig {
        &self.config
    }

    /// Update the viewport width (host resize/rotation).
    pub fn set_viewport_width(&mut self, width: f32) {
        self.viewport_width = width;
    }

    /// Whether a gesture is currently being tracked.
    pub fn is_tracking(&self) -> bool {
        self.tracking.is_some()
    }

    /// Feed one touch event through the state machine.
    pub fn on_touch(&mut self, event: &TouchEvent) -> Vec<SwipeAction> {
        if !self.config.enabled {
            return vec![];
        }
        match event.phase {
            TouchPhase::Start => self.on_start(event),
            TouchPhase::Move => self.on_move(event),
            TouchPhase::End | TouchPhase::Cancel => self.on_finish(),
        }
    }

    fn on_start(&mut self, event: &TouchEvent) -> Vec<SwipeAction> {
        if event.touches != 1 {
            return self.on_finish();
        }

        let edge = if event.x <= self.config.edge_width {
            Edge::Left
        } else if event.x >= self.viewport_width - self.config.edge_width {
            Edge::Right
        } else {
            return vec![];
        };

        tracing::debug!(x = event.x, ?edge, "edge swipe started");
        self.tracking = Some((TouchPoint { x: event.x, y: event.y, at_ms: event.at_ms }, edge));
        vec![SwipeAction::ShowEdgeIndicator(edge)]
    }

    fn on_move(&mut self, event: &TouchEvent) -> Vec<SwipeAction> {
        let Some((start, edge)) = self.tracking else {
            return vec![];
        };
        if event.touches != 1 {
            return vec![];
        }

        let dx = event.x - start.x;
        let dy = event.y - start.y;
        let distance = dx.hypot(dy);
        let elapsed = event.at_ms.saturating_sub(start.at_ms);

        // Too slow to ever qualify; stop tracking instead of waiting for
        // touchend.
        if elapsed >= self.config.max_time_ms {
            tracing::debug!(elapsed, "swipe too slow, aborting");
            self.tracking = None;
            return vec![SwipeAction::HideEdgeIndicator];
        }

        // Clearly vertical movement aborts early.
        if dy.abs() > dx.abs() && distance > self.config.min_distance * 0.5 {
            tracing::debug!(dx, dy, "vertical drift, aborting swipe");
            self.tracking = None;
            return vec![SwipeAction::HideEdgeIndicator];
        }

        let horizontal = dx.abs() > HORIZONTAL_DOMINANCE * dy.abs();
        if horizontal && distance > self.config.min_distance {
            // Only a left-edge rightward swipe means "back".
            if edge == Edge::Left && dx > 0.0 {
                tracing::debug!(dx, dy, elapsed, "back swipe recognized");
                self.tracking = None;
                return vec![
                    SwipeAction::PreventDefault,
                    SwipeAction::HideEdgeIndicator,
                    SwipeAction::Back(SwipeDirection::Right),
                ];
            }
        }

        vec![]
    }

    fn on_finish(&mut self) -> Vec<SwipeAction> {
        if self.tracking.take().is_some() {
            vec![SwipeAction::HideEdgeIndicator]
        } else {
            vec![]
        }
    }
}
