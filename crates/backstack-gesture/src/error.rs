//! Gesture layer errors.

use thiserror::Error;

/// Errors produced by the gesture layer.
///
/// Runtime gesture handling never fails: an implausible touch sequence is a
/// state reset, not an error. The only fallible surface is configuration.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GestureError {
    /// A configuration field holds a value the recognizer cannot work with.
    #[error("invalid gesture config: {field} = {value} ({reason})")]
    InvalidConfig {
        /// Offending field name.
        field: &'static str,
        /// The rejected value.
        value: f64,
        /// Why the value is rejected.
        reason: &'static str,
    },
}
