//! Gesture thresholds.

use crate::error::GestureError;

/// Tunable thresholds for the edge-swipe recognizer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GestureConfig {
    /// Whether gesture recognition is active at all.
    pub enabled: bool,
    /// Width in px of the screen-edge band where a back swipe may start.
    pub edge_width: f32,
    /// Minimum euclidean travel in px before a swipe counts.
    pub min_distance: f32,
    /// Maximum gesture duration in ms; slower drags are not back swipes.
    pub max_time_ms: u64,
}

impl Default for GestureConfig {
    fn default() -> Self {
        Self { enabled: true, edge_width: 20.0, min_distance: 50.0, max_time_ms: 300 }
    }
}

impl GestureConfig {
    /// Validate the thresholds.
    ///
    /// # Errors
    ///
    /// Returns [`GestureError::InvalidConfig`] for non-positive or
    /// non-finite widths/distances and a zero time budget.
    pub fn validate(&self) -> Result<(), GestureError> {
        if !self.edge_width.is_finite() || self.edge_width <= 0.0 {
            return Err(GestureError::InvalidConfig {
                field: "edge_width",
                value: f64::from(self.edge_width),
                reason: "must be a positive number of pixels",
            });
        }
        if !self.min_distance.is_finite() || self.min_distance <= 0.0 {
            return Err(GestureError::InvalidConfig {
                field: "min_distance",
                value: f64::from(self.min_distance),
                reason: "must be a positive number of pixels",
            });
        }
        if self.max_time_ms == 0 {
            return Err(GestureError::InvalidConfig {
                field: "max_time_ms",
                value: 0.0,
                reason: "must allow at least one millisecond",
            });
        }
        Ok(())
    }
}
