//! Frame-by-frame evaluation of a decay curve.
//!
//! The caller owns the clock: every [`DecayAnimation::advance`] call moves the
//! play time forward by the supplied delta and reports how far the curve
//! travelled since the previous call. Positions come from the closed-form
//! curve, so uneven frame pacing never accumulates drift.

use crate::decay_spec::FloatDecayAnimationSpec;

const NANOS_PER_SECOND: f64 = 1_000_000_000.0;

/// Result of one [`DecayAnimation::advance`] call.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DecayStep {
    /// Displacement since the previous step, in the units of the initial velocity.
    pub delta: f32,
    /// Signed velocity at the new play time.
    pub velocity: f32,
    /// The curve reached its resting point on this step or earlier.
    pub finished: bool,
}

/// A running decay animation. Starts at value `0.0`; only deltas are reported.
#[derive(Debug, Clone)]
pub struct DecayAnimation<S: FloatDecayAnimationSpec> {
    spec: S,
    initial_velocity: f32,
    duration_nanos: i64,
    play_time_nanos: i64,
    last_value: f32,
    velocity: f32,
    finished: bool,
}

impl<S: FloatDecayAnimationSpec> DecayAnimation<S> {
    pub fn new(spec: S, initial_velocity: f32) -> Self {
        let duration_nanos = spec.duration_nanos(0.0, initial_velocity).max(0);
        Self {
            spec,
            initial_velocity,
            duration_nanos,
            play_time_nanos: 0,
            last_value: 0.0,
            velocity: initial_velocity,
            finished: duration_nanos == 0,
        }
    }

    /// Moves the animation forward by `dt_seconds`. Negative or non-finite
    /// deltas are treated as zero.
    pub fn advance(&mut self, dt_seconds: f32) -> DecayStep {
        if self.finished {
            return DecayStep {
                delta: 0.0,
                velocity: 0.0,
                finished: true,
            };
        }

        let dt = if dt_seconds.is_finite() {
            dt_seconds.max(0.0)
        } else {
            0.0
        };
        let dt_nanos = (dt as f64 * NANOS_PER_SECOND) as i64;
        self.play_time_nanos = self
            .play_time_nanos
            .saturating_add(dt_nanos)
            .min(self.duration_nanos);

        let value = self
            .spec
            .value_at_nanos(self.play_time_nanos, 0.0, self.initial_velocity);
        let delta = value - self.last_value;
        self.last_value = value;

        let mut velocity = self
            .spec
            .velocity_at_nanos(self.play_time_nanos, 0.0, self.initial_velocity);
        // Sampled curves may wobble by a rounding error; speed only goes down.
        if velocity.abs() > self.velocity.abs() {
            velocity = self.velocity;
        }
        self.velocity = velocity;

        self.finished = self.play_time_nanos >= self.duration_nanos
            || velocity.abs() < self.spec.abs_velocity_threshold();
        if self.finished {
            log::trace!(
                "decay finished after {}ms, travelled {}",
                self.play_time_nanos / 1_000_000,
                self.last_value
            );
        }

        DecayStep {
            delta,
            velocity,
            finished: self.finished,
        }
    }

    pub fn initial_velocity(&self) -> f32 {
        self.initial_velocity
    }

    /// Velocity reported by the latest step (the initial velocity before any step).
    pub fn velocity(&self) -> f32 {
        self.velocity
    }

    pub fn play_time_nanos(&self) -> i64 {
        self.play_time_nanos
    }

    pub fn duration_nanos(&self) -> i64 {
        self.duration_nanos
    }

    /// Total displacement applied so far.
    pub fn travelled(&self) -> f32 {
        self.last_value
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    pub fn spec(&self) -> &S {
        &self.spec
    }
}

#[cfg(test)]
#[path = "tests/decay_animation_tests.rs"]
mod tests;
