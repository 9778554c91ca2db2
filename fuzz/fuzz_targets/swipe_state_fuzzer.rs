//! Fuzz target for the edge-swipe state machine
//!
//! Ensure the recognizer never misfires on hostile touch streams
//!
//! # Strategy
//!
//! - Arbitrary phase interleavings: moves without starts, double starts,
//!   cancels mid-gesture, multi-touch storms
//! - Coordinates: NaN-free but extreme values, negative positions
//! - Timestamps: non-monotonic, large jumps
//!
//! # Invariants
//!
//! - Never panics
//! - A back action only ever travels right
//! - End/Cancel always leaves the recognizer idle

#![no_main]

use arbitrary::Arbitrary;
use backstack_gesture::{
    GestureConfig, SwipeAction, SwipeDirection, SwipeRecognizer, TouchEvent, TouchPhase,
};
use libfuzzer_sys::fuzz_target;

#[derive(Debug, Clone, Arbitrary)]
enum Phase {
    Start,
    Move,
    End,
    Cancel,
}

#[derive(Debug, Clone, Arbitrary)]
struct FuzzTouch {
    phase: Phase,
    x: i16,
    y: i16,
    at_ms: u32,
    touches: u8,
}

fuzz_target!(|samples: Vec<FuzzTouch>| {
    let Ok(mut recognizer) = SwipeRecognizer::new(GestureConfig::default(), 400.0) else {
        return;
    };

    for sample in samples {
        let phase = match sample.phase {
            Phase::Start => TouchPhase::Start,
            Phase::Move => TouchPhase::Move,
            Phase::End => TouchPhase::End,
            Phase::Cancel => TouchPhase::Cancel,
        };
        let event = TouchEvent {
            phase,
            x: f32::from(sample.x),
            y: f32::from(sample.y),
            at_ms: u64::from(sample.at_ms),
            touches: sample.touches,
        };

        let actions = recognizer.on_touch(&event);

        for action in &actions {
            if let SwipeAction::Back(direction) = action {
                assert_eq!(*direction, SwipeDirection::Right);
            }
        }

        if matches!(phase, TouchPhase::End | TouchPhase::Cancel) {
            assert!(!recognizer.is_tracking());
        }
    }
});
