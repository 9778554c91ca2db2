//! Prebuilt event sequences for scenario scripts.

use backstack_app::HostEvent;
use backstack_gesture::{TouchEvent, TouchPhase};

/// A complete left-edge back swipe: touch down inside the edge band,
/// a fast rightward drag past the default distance threshold, then lift.
pub fn edge_swipe(start_ms: u64) -> Vec<HostEvent> {
    let sample = |phase, x, y, offset_ms| {
        HostEvent::Touch(TouchEvent { phase, x, y, at_ms: start_ms + offset_ms, touches: 1 })
    };
    vec![
        sample(TouchPhase::Start, 8.0, 300.0, 0),
        sample(TouchPhase::Move, 35.0, 302.0, 40),
        sample(TouchPhase::Move, 75.0, 305.0, 90),
        sample(TouchPhase::End, 75.0, 305.0, 110),
    ]
}
