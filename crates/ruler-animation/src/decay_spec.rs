//! Decay curves used to coast the ruler tape after the pointer is released.
//!
//! Two curves are provided: the Android `Scroller` spline, which is what a
//! platform ruler view coasts with, and a plain exponential decay whose
//! velocity shrinks by a constant factor per unit of time.

use std::sync::LazyLock;

const INFLECTION: f32 = 0.35;
const START_TENSION: f32 = 0.5;
const END_TENSION: f32 = 1.0;
const P1: f32 = START_TENSION * INFLECTION;
const P2: f32 = 1.0 - END_TENSION * (1.0 - INFLECTION);

const SPLINE_SAMPLES: usize = 100;
const BISECT_TOLERANCE: f32 = 1e-5;

/// Distance fraction travelled at each of the evenly spaced time samples.
static SPLINE_POSITIONS: LazyLock<[f32; SPLINE_SAMPLES + 1]> = LazyLock::new(|| {
    let mut positions = [0.0f32; SPLINE_SAMPLES + 1];
    let mut lower = 0.0f32;

    for (i, slot) in positions.iter_mut().take(SPLINE_SAMPLES).enumerate() {
        let alpha = i as f32 / SPLINE_SAMPLES as f32;

        // Solve time_bezier(x) == alpha; the solution grows with alpha so the
        // lower bracket carries over between samples.
        let mut upper = 1.0f32;
        let x = loop {
            let mid = lower + (upper - lower) / 2.0;
            let t = bezier(mid, P1, P2);
            if (t - alpha).abs() < BISECT_TOLERANCE {
                break mid;
            }
            if t > alpha {
                upper = mid;
            } else {
                lower = mid;
            }
        };
        *slot = bezier(x, START_TENSION, 1.0);
    }

    positions[SPLINE_SAMPLES] = 1.0;
    positions
});

/// Cubic bezier through (0, c1, c2, 1) evaluated at `x`.
fn bezier(x: f32, c1: f32, c2: f32) -> f32 {
    let weight = 3.0 * x * (1.0 - x);
    weight * ((1.0 - x) * c1 + x * c2) + x * x * x
}

/// One sample of the fling spline.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SplineSample {
    /// Fraction of the total fling distance covered, `0.0..=1.0`.
    pub distance_coefficient: f32,
    /// Slope of the distance curve at this point.
    pub velocity_coefficient: f32,
}

/// The `android.widget.Scroller` fling spline.
pub struct AndroidFlingSpline;

impl AndroidFlingSpline {
    /// Samples the spline at normalized time `time` (clamped to `0.0..=1.0`).
    pub fn sample(time: f32) -> SplineSample {
        let time = time.clamp(0.0, 1.0);
        let index = (SPLINE_SAMPLES as f32 * time) as usize;
        if index >= SPLINE_SAMPLES {
            return SplineSample {
                distance_coefficient: 1.0,
                velocity_coefficient: 0.0,
            };
        }

        let t_low = index as f32 / SPLINE_SAMPLES as f32;
        let t_high = (index + 1) as f32 / SPLINE_SAMPLES as f32;
        let d_low = SPLINE_POSITIONS[index];
        let d_high = SPLINE_POSITIONS[index + 1];
        let slope = (d_high - d_low) / (t_high - t_low);

        SplineSample {
            distance_coefficient: d_low + (time - t_low) * slope,
            velocity_coefficient: slope,
        }
    }

    fn deceleration(velocity: f32, friction: f32) -> f64 {
        (INFLECTION as f64 * velocity.abs() as f64 / friction as f64).ln()
    }
}

const GRAVITY_EARTH: f32 = 9.80665;
const INCHES_PER_METER: f32 = 39.37;
// (ln(0.78) / ln(0.9)).abs()
const DECELERATION_RATE: f64 = 2.358_201_6;

/// Converts fling velocities into a travel distance and a duration the way the
/// platform scroller does, scaled by display density.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FlingCalculator {
    friction: f32,
    physical_coefficient: f32,
}

impl FlingCalculator {
    /// `ViewConfiguration.getScrollFriction()`.
    pub const DEFAULT_FRICTION: f32 = 0.015;

    pub fn new(friction: f32, density: f32) -> Self {
        Self {
            friction,
            physical_coefficient: GRAVITY_EARTH * INCHES_PER_METER * density * 160.0 * 0.84,
        }
    }

    pub fn with_density(density: f32) -> Self {
        Self::new(Self::DEFAULT_FRICTION, density)
    }

    pub fn friction(&self) -> f32 {
        self.friction
    }

    fn spline_deceleration(&self, velocity: f32) -> f64 {
        AndroidFlingSpline::deceleration(velocity, self.friction * self.physical_coefficient)
    }

    /// Duration of a fling in milliseconds.
    pub fn duration_ms(&self, velocity: f32) -> i64 {
        if velocity == 0.0 {
            return 0;
        }
        let l = self.spline_deceleration(velocity);
        (1000.0 * (l / (DECELERATION_RATE - 1.0)).exp()) as i64
    }

    /// Unsigned distance in pixels a fling with `velocity` will travel.
    pub fn distance(&self, velocity: f32) -> f32 {
        if velocity == 0.0 {
            return 0.0;
        }
        let l = self.spline_deceleration(velocity);
        let scale = (DECELERATION_RATE / (DECELERATION_RATE - 1.0) * l).exp();
        self.friction * self.physical_coefficient * scale as f32
    }

    pub fn fling_info(&self, velocity: f32) -> FlingInfo {
        FlingInfo {
            initial_velocity: velocity,
            distance: self.distance(velocity),
            duration_ms: self.duration_ms(velocity),
        }
    }
}

/// A fully resolved spline fling.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FlingInfo {
    pub initial_velocity: f32,
    /// Unsigned total distance in pixels.
    pub distance: f32,
    pub duration_ms: i64,
}

impl FlingInfo {
    fn progress(&self, time_ms: i64) -> f32 {
        if self.duration_ms > 0 {
            time_ms as f32 / self.duration_ms as f32
        } else {
            1.0
        }
    }

    /// Signed displacement from the start after `time_ms`.
    pub fn position(&self, time_ms: i64) -> f32 {
        let sample = AndroidFlingSpline::sample(self.progress(time_ms));
        self.distance * self.initial_velocity.signum() * sample.distance_coefficient
    }

    /// Signed velocity in px/s after `time_ms`.
    pub fn velocity(&self, time_ms: i64) -> f32 {
        if self.duration_ms <= 0 {
            return 0.0;
        }
        let sample = AndroidFlingSpline::sample(self.progress(time_ms));
        sample.velocity_coefficient * self.initial_velocity.signum() * self.distance
            / self.duration_ms as f32
            * 1000.0
    }

    pub fn is_finished(&self, time_ms: i64) -> bool {
        time_ms >= self.duration_ms
    }
}

/// A target-less animation curve: it starts with a velocity and slows to rest.
pub trait FloatDecayAnimationSpec {
    /// Speed below which the curve is considered to have come to rest.
    fn abs_velocity_threshold(&self) -> f32;

    fn value_at_nanos(&self, play_time_nanos: i64, initial_value: f32, initial_velocity: f32) -> f32;

    fn velocity_at_nanos(
        &self,
        play_time_nanos: i64,
        initial_value: f32,
        initial_velocity: f32,
    ) -> f32;

    fn duration_nanos(&self, initial_value: f32, initial_velocity: f32) -> i64;

    /// Resting position.
    fn target_value(&self, initial_value: f32, initial_velocity: f32) -> f32;
}

/// Platform scroller physics.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SplineBasedDecaySpec {
    calculator: FlingCalculator,
}

impl SplineBasedDecaySpec {
    pub fn new(density: f32) -> Self {
        Self::with_calculator(FlingCalculator::with_density(density))
    }

    pub fn with_calculator(calculator: FlingCalculator) -> Self {
        Self { calculator }
    }

    pub fn calculator(&self) -> &FlingCalculator {
        &self.calculator
    }
}

impl FloatDecayAnimationSpec for SplineBasedDecaySpec {
    fn abs_velocity_threshold(&self) -> f32 {
        0.0
    }

    fn value_at_nanos(
        &self,
        play_time_nanos: i64,
        initial_value: f32,
        initial_velocity: f32,
    ) -> f32 {
        let info = self.calculator.fling_info(initial_velocity);
        initial_value + info.position(play_time_nanos / 1_000_000)
    }

    fn velocity_at_nanos(
        &self,
        play_time_nanos: i64,
        _initial_value: f32,
        initial_velocity: f32,
    ) -> f32 {
        let info = self.calculator.fling_info(initial_velocity);
        info.velocity(play_time_nanos / 1_000_000)
    }

    fn duration_nanos(&self, _initial_value: f32, initial_velocity: f32) -> i64 {
        self.calculator.duration_ms(initial_velocity) * 1_000_000
    }

    fn target_value(&self, initial_value: f32, initial_velocity: f32) -> f32 {
        initial_value + self.calculator.distance(initial_velocity) * initial_velocity.signum()
    }
}

const EXPONENTIAL_DECAY_FRICTION: f32 = -4.2;

/// Velocity falls as `v0 * e^(friction * t)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ExponentialDecaySpec {
    friction: f32,
    abs_velocity_threshold: f32,
}

impl ExponentialDecaySpec {
    pub const DEFAULT_FRICTION_MULTIPLIER: f32 = 1.0;
    pub const DEFAULT_VELOCITY_THRESHOLD: f32 = 0.1;

    /// Larger `friction_multiplier` values stop sooner.
    pub fn new(friction_multiplier: f32, abs_velocity_threshold: f32) -> Self {
        Self {
            friction: EXPONENTIAL_DECAY_FRICTION * friction_multiplier.max(f32::EPSILON),
            abs_velocity_threshold: abs_velocity_threshold.max(f32::EPSILON),
        }
    }

    fn seconds(play_time_nanos: i64) -> f32 {
        play_time_nanos as f32 / 1_000_000_000.0
    }
}

impl Default for ExponentialDecaySpec {
    fn default() -> Self {
        Self::new(
            Self::DEFAULT_FRICTION_MULTIPLIER,
            Self::DEFAULT_VELOCITY_THRESHOLD,
        )
    }
}

impl FloatDecayAnimationSpec for ExponentialDecaySpec {
    fn abs_velocity_threshold(&self) -> f32 {
        self.abs_velocity_threshold
    }

    fn value_at_nanos(
        &self,
        play_time_nanos: i64,
        initial_value: f32,
        initial_velocity: f32,
    ) -> f32 {
        let decay = (self.friction * Self::seconds(play_time_nanos)).exp();
        initial_value - initial_velocity / self.friction + initial_velocity / self.friction * decay
    }

    fn velocity_at_nanos(
        &self,
        play_time_nanos: i64,
        _initial_value: f32,
        initial_velocity: f32,
    ) -> f32 {
        initial_velocity * (self.friction * Self::seconds(play_time_nanos)).exp()
    }

    fn duration_nanos(&self, _initial_value: f32, initial_velocity: f32) -> i64 {
        if initial_velocity.abs() <= self.abs_velocity_threshold {
            return 0;
        }
        let seconds = (self.abs_velocity_threshold / initial_velocity.abs()).ln() / self.friction;
        (seconds as f64 * 1_000_000_000.0) as i64
    }

    fn target_value(&self, initial_value: f32, initial_velocity: f32) -> f32 {
        initial_value - initial_velocity / self.friction
    }
}
