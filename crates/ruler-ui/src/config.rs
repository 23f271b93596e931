//! Ruler configuration.
//!
//! ```ignore
//! let range = RangeConfig::default()
//!     .with_bounds(0, 283)
//!     .with_minor_tick_value(10)
//!     .with_density_scale(2.0);
//! let fling = FlingConfig::for_density(2.0);
//! ```

use ruler_animation::FlingCalculator;
use ruler_foundation::{scaled, FLING_STOP_VELOCITY, MAX_FLING_VELOCITY, MIN_FLING_VELOCITY};

use crate::error::ScaleError;

/// Value range and tick geometry.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RangeConfig {
    pub min_value: i32,
    pub max_value: i32,
    /// Committed values are multiples of this.
    pub snap_unit: i32,
    /// Value covered by one minor tick.
    pub minor_tick_value: i32,
    /// Distance between minor ticks before density scaling.
    pub pixel_gap: f32,
    /// Minor ticks per labelled major tick.
    pub major_tick_stride: i32,
    pub density_scale: f32,
}

impl Default for RangeConfig {
    fn default() -> Self {
        Self {
            min_value: 0,
            max_value: 100,
            snap_unit: 1,
            minor_tick_value: 1,
            pixel_gap: 4.0,
            major_tick_stride: 10,
            density_scale: 1.0,
        }
    }
}

impl RangeConfig {
    pub fn with_bounds(mut self, min_value: i32, max_value: i32) -> Self {
        self.min_value = min_value;
        self.max_value = max_value;
        self
    }

    pub fn with_snap_unit(mut self, snap_unit: i32) -> Self {
        self.snap_unit = snap_unit;
        self
    }

    pub fn with_minor_tick_value(mut self, minor_tick_value: i32) -> Self {
        self.minor_tick_value = minor_tick_value;
        self
    }

    pub fn with_pixel_gap(mut self, pixel_gap: f32) -> Self {
        self.pixel_gap = pixel_gap;
        self
    }

    pub fn with_major_tick_stride(mut self, major_tick_stride: i32) -> Self {
        self.major_tick_stride = major_tick_stride;
        self
    }

    pub fn with_density_scale(mut self, density_scale: f32) -> Self {
        self.density_scale = density_scale;
        self
    }

    pub fn validate(&self) -> Result<(), ScaleError> {
        let reason = if self.min_value > self.max_value {
            "min_value is greater than max_value"
        } else if self.snap_unit < 1 {
            "snap_unit must be at least 1"
        } else if self.minor_tick_value < 1 {
            "minor_tick_value must be at least 1"
        } else if self.major_tick_stride < 1 {
            "major_tick_stride must be at least 1"
        } else if !(self.pixel_gap.is_finite() && self.pixel_gap > 0.0) {
            "pixel_gap must be positive"
        } else if !(self.density_scale.is_finite() && self.density_scale > 0.0) {
            "density_scale must be positive"
        } else {
            return Ok(());
        };
        Err(ScaleError::InvalidConfiguration { reason })
    }

    /// Screen pixels per unit of value.
    pub fn pixels_per_unit(&self) -> f32 {
        self.pixel_gap * self.density_scale / self.minor_tick_value as f32
    }

    /// Screen pixels between adjacent minor ticks.
    pub fn tick_spacing(&self) -> f32 {
        self.pixel_gap * self.density_scale
    }

    pub fn clamp(&self, value: i32) -> i32 {
        value.clamp(self.min_value, self.max_value)
    }
}

/// Deceleration curve used after a release.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FlingDecay {
    /// Platform scroller spline.
    Spline { friction: f32 },
    /// Velocity decays as `e^(-4.2 * friction_multiplier * t)`.
    Exponential { friction_multiplier: f32 },
}

impl Default for FlingDecay {
    fn default() -> Self {
        FlingDecay::Spline {
            friction: FlingCalculator::DEFAULT_FRICTION,
        }
    }
}

/// Fling thresholds and physics, in physical pixels per second.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FlingConfig {
    /// Releases at or below this speed settle without a fling.
    pub min_fling_velocity: f32,
    /// Release velocities are clamped to this magnitude.
    pub max_fling_velocity: f32,
    /// A fling ends once its speed drops below this.
    pub stop_velocity: f32,
    pub decay: FlingDecay,
}

impl Default for FlingConfig {
    fn default() -> Self {
        Self::for_density(1.0)
    }
}

impl FlingConfig {
    /// Platform defaults scaled to `density`.
    pub fn for_density(density: f32) -> Self {
        Self {
            min_fling_velocity: scaled(MIN_FLING_VELOCITY, density),
            max_fling_velocity: scaled(MAX_FLING_VELOCITY, density),
            stop_velocity: FLING_STOP_VELOCITY,
            decay: FlingDecay::default(),
        }
    }

    pub fn with_min_fling_velocity(mut self, velocity: f32) -> Self {
        self.min_fling_velocity = velocity;
        self
    }

    pub fn with_max_fling_velocity(mut self, velocity: f32) -> Self {
        self.max_fling_velocity = velocity;
        self
    }

    pub fn with_stop_velocity(mut self, velocity: f32) -> Self {
        self.stop_velocity = velocity;
        self
    }

    pub fn with_decay(mut self, decay: FlingDecay) -> Self {
        self.decay = decay;
        self
    }

    pub fn validate(&self) -> Result<(), ScaleError> {
        let friction = match self.decay {
            FlingDecay::Spline { friction } => friction,
            FlingDecay::Exponential {
                friction_multiplier,
            } => friction_multiplier,
        };
        let reason = if !(self.min_fling_velocity.is_finite() && self.min_fling_velocity >= 0.0) {
            "min_fling_velocity must be a non-negative number"
        } else if !(self.max_fling_velocity.is_finite()
            && self.max_fling_velocity >= self.min_fling_velocity)
        {
            "max_fling_velocity must be at least min_fling_velocity"
        } else if !(self.stop_velocity.is_finite() && self.stop_velocity > 0.0) {
            "stop_velocity must be positive"
        } else if !(friction.is_finite() && friction > 0.0) {
            "fling friction must be positive"
        } else {
            return Ok(());
        };
        Err(ScaleError::InvalidConfiguration { reason })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        assert_eq!(RangeConfig::default().validate(), Ok(()));
        assert_eq!(FlingConfig::default().validate(), Ok(()));
    }

    #[test]
    fn pixels_per_unit_divides_the_gap_across_the_tick_value() {
        let range = RangeConfig::default()
            .with_bounds(0, 500)
            .with_pixel_gap(8.0)
            .with_minor_tick_value(10);
        assert!((range.pixels_per_unit() - 0.8).abs() < 1e-6);

        let dense = range.with_density_scale(3.0);
        assert!((dense.pixels_per_unit() - 2.4).abs() < 1e-5);
        assert!((dense.tick_spacing() - 24.0).abs() < 1e-5);
    }

    #[test]
    fn each_broken_field_is_rejected() {
        let base = RangeConfig::default();
        let broken = [
            base.with_bounds(10, 0),
            base.with_snap_unit(0),
            base.with_minor_tick_value(0),
            base.with_major_tick_stride(0),
            base.with_pixel_gap(0.0),
            base.with_pixel_gap(f32::NAN),
            base.with_density_scale(-1.0),
        ];
        for range in broken {
            assert!(
                matches!(
                    range.validate(),
                    Err(ScaleError::InvalidConfiguration { .. })
                ),
                "{range:?} should be rejected"
            );
        }
    }

    #[test]
    fn single_value_range_is_allowed() {
        assert_eq!(RangeConfig::default().with_bounds(7, 7).validate(), Ok(()));
    }

    #[test]
    fn fling_thresholds_scale_with_density() {
        let fling = FlingConfig::for_density(2.0);
        assert_eq!(fling.min_fling_velocity, 100.0);
        assert_eq!(fling.max_fling_velocity, 16_000.0);
    }

    #[test]
    fn broken_fling_configs_are_rejected() {
        let base = FlingConfig::default();
        let broken = [
            base.with_min_fling_velocity(-1.0),
            base.with_max_fling_velocity(10.0),
            base.with_stop_velocity(0.0),
            base.with_decay(FlingDecay::Exponential {
                friction_multiplier: 0.0,
            }),
            base.with_decay(FlingDecay::Spline {
                friction: f32::INFINITY,
            }),
        ];
        for fling in broken {
            assert!(fling.validate().is_err(), "{fling:?} should be rejected");
        }
    }
}
