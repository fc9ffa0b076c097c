//! Utility helpers for tests.
//!
//! [`doubles`] holds recording stand-ins for the presentation contracts and
//! [`scenario`] wires them to a session so tests can step whole ticks.

pub mod doubles;
pub mod scenario;

pub use doubles::{FixedCamera, RecordingLayer, RecordingSounds};
pub use scenario::{session_at, Harness, DT};

/// Assert that `value` lies in `[low, high]`.
///
/// # Panics
/// Panics with the offending value when it falls outside the range.
pub fn assert_within(value: f32, low: f32, high: f32) {
    assert!(
        (low..=high).contains(&value),
        "{value} outside [{low}, {high}]"
    );
}
