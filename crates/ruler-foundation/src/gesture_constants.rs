//! Gesture thresholds, in logical pixels unless noted.
//!
//! Values match the Android `ViewConfiguration` defaults at a baseline
//! density. Multiply by the display density before comparing against raw
//! pointer coordinates.

/// Slowest release (px/s) that still starts a fling.
///
/// `ViewConfiguration.getScaledMinimumFlingVelocity()` is 50dp/s.
pub const MIN_FLING_VELOCITY: f32 = 50.0;

/// Release velocities are clamped to this magnitude (px/s).
pub const MAX_FLING_VELOCITY: f32 = 8_000.0;

/// A running fling ends once its speed drops below this (px/s).
pub const FLING_STOP_VELOCITY: f32 = 1.0;

/// Scales a density-independent threshold to physical pixels.
pub fn scaled(value: f32, density: f32) -> f32 {
    value * density
}
