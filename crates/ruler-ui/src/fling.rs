//! Post-release coasting of the tape.

use ruler_animation::{
    DecayAnimation, DecayStep, ExponentialDecaySpec, FlingCalculator, SplineBasedDecaySpec,
};

use crate::config::{FlingConfig, FlingDecay};

#[derive(Debug, Clone)]
enum Curve {
    Spline(DecayAnimation<SplineBasedDecaySpec>),
    Exponential(DecayAnimation<ExponentialDecaySpec>),
}

/// An active fling.
///
/// `velocity` is in pointer space: positive while the pointer would be moving
/// right. [`FlingState::step`] returns the matching tape displacement, which has
/// the opposite sign.
#[derive(Debug, Clone)]
pub struct FlingState {
    curve: Curve,
    stop_velocity: f32,
}

/// Outcome of one fling step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FlingStep {
    /// Pixels to add to the pending drag offset.
    pub tape_delta: f32,
    /// Pointer-space velocity after the step.
    pub velocity: f32,
    /// The curve came to rest or dropped below the stop velocity.
    pub finished: bool,
}

impl FlingState {
    pub fn start(config: &FlingConfig, density: f32, velocity: f32) -> Self {
        let curve = match config.decay {
            FlingDecay::Spline { friction } => {
                let spec =
                    SplineBasedDecaySpec::with_calculator(FlingCalculator::new(friction, density));
                Curve::Spline(DecayAnimation::new(spec, velocity))
            }
            FlingDecay::Exponential {
                friction_multiplier,
            } => {
                let spec = ExponentialDecaySpec::new(friction_multiplier, config.stop_velocity);
                Curve::Exponential(DecayAnimation::new(spec, velocity))
            }
        };
        Self {
            curve,
            stop_velocity: config.stop_velocity,
        }
    }

    pub fn step(&mut self, dt_seconds: f32) -> FlingStep {
        let DecayStep {
            delta,
            velocity,
            finished,
        } = match &mut self.curve {
            Curve::Spline(animation) => animation.advance(dt_seconds),
            Curve::Exponential(animation) => animation.advance(dt_seconds),
        };
        FlingStep {
            tape_delta: -delta,
            velocity,
            finished: finished || velocity.abs() < self.stop_velocity,
        }
    }

    pub fn initial_velocity(&self) -> f32 {
        match &self.curve {
            Curve::Spline(animation) => animation.initial_velocity(),
            Curve::Exponential(animation) => animation.initial_velocity(),
        }
    }

    pub fn velocity(&self) -> f32 {
        match &self.curve {
            Curve::Spline(animation) => animation.velocity(),
            Curve::Exponential(animation) => animation.velocity(),
        }
    }

    pub fn elapsed_nanos(&self) -> i64 {
        match &self.curve {
            Curve::Spline(animation) => animation.play_time_nanos(),
            Curve::Exponential(animation) => animation.play_time_nanos(),
        }
    }
}
