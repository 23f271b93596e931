//! Fling physics for the ruler picker.
//!
//! [`decay_spec`] holds the curves, [`decay_animation`] steps one of them with
//! a caller-provided clock.

pub mod decay_animation;
pub mod decay_spec;

pub use decay_animation::{DecayAnimation, DecayStep};
pub use decay_spec::{
    AndroidFlingSpline, ExponentialDecaySpec, FlingCalculator, FlingInfo,
    FloatDecayAnimationSpec, SplineBasedDecaySpec, SplineSample,
};
