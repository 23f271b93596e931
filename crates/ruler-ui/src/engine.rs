//! The value-scroll engine behind the ruler picker.
//!
//! Pointer displacement accumulates in a pixel remainder. Whole units are
//! folded into the value as soon as they are fully crossed (truncating), so
//! the value moves in integer steps while the tape itself follows the finger
//! smoothly. On release the remainder is rounded, the value snapped to the
//! configured unit and clamped, and an optional fling takes over. The caller
//! drives the fling with [`ScaleEngine::advance`] once per frame.
//!
//! Sign convention: a pointer moving left (decreasing x) increases the value.

use std::fmt;

use crate::config::{FlingConfig, RangeConfig};
use crate::error::ScaleError;
use crate::fling::FlingState;

/// Receives every reported value.
pub type ValueChangeListener = Box<dyn FnMut(i32)>;

/// Slack added before truncating a pixel count to whole units so that a
/// displacement of exactly `k` units in pixel space is not lost to rounding.
const UNIT_EPSILON: f64 = 1e-4;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScrollPhase {
    Idle,
    Dragging,
    Flinging,
}

/// Result of one [`ScaleEngine::advance`] call.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AdvanceResult {
    /// The fling ended on this call and the value has been committed.
    pub finished: bool,
    /// Pointer-space fling velocity after the step, `0.0` when stopped by a bound.
    pub velocity: f32,
}

pub struct ScaleEngine {
    range: RangeConfig,
    fling_config: FlingConfig,
    pixels_per_unit: f32,
    current_value: i32,
    pending_pixels: f32,
    last_pointer_x: f32,
    dragging: bool,
    fling: Option<FlingState>,
    redraw_requested: bool,
    listener: Option<ValueChangeListener>,
}

impl ScaleEngine {
    pub fn new(range: RangeConfig, fling_config: FlingConfig) -> Result<Self, ScaleError> {
        range.validate()?;
        fling_config.validate()?;
        Ok(Self {
            range,
            fling_config,
            pixels_per_unit: range.pixels_per_unit(),
            current_value: range.min_value,
            pending_pixels: 0.0,
            last_pointer_x: 0.0,
            dragging: false,
            fling: None,
            redraw_requested: true,
            listener: None,
        })
    }

    /// Engine with platform fling defaults for the range's density.
    pub fn with_range(range: RangeConfig) -> Result<Self, ScaleError> {
        Self::new(range, FlingConfig::for_density(range.density_scale))
    }

    pub fn set_value_change_listener(&mut self, listener: impl FnMut(i32) + 'static) {
        self.listener = Some(Box::new(listener));
    }

    pub fn clear_value_change_listener(&mut self) {
        self.listener = None;
    }

    /// Replaces the range. Any drag or fling is abandoned, the value is clamped
    /// into the new bounds and the listener is not called. On error nothing
    /// changes.
    pub fn configure(&mut self, range: RangeConfig) -> Result<(), ScaleError> {
        if let Err(err) = range.validate() {
            log::warn!("rejected range {range:?}: {err}");
            return Err(err);
        }
        self.range = range;
        self.pixels_per_unit = range.pixels_per_unit();
        self.current_value = range.clamp(self.current_value);
        self.pending_pixels = 0.0;
        self.dragging = false;
        if self.fling.take().is_some() {
            log::debug!("fling cancelled by reconfiguration");
        }
        self.redraw_requested = true;
        Ok(())
    }

    pub fn set_fling_config(&mut self, fling_config: FlingConfig) -> Result<(), ScaleError> {
        if let Err(err) = fling_config.validate() {
            log::warn!("rejected fling config {fling_config:?}: {err}");
            return Err(err);
        }
        self.fling_config = fling_config;
        Ok(())
    }

    /// Jumps to `value` (clamped), drops the pixel remainder and reports it.
    pub fn set_value(&mut self, value: i32) {
        self.current_value = self.range.clamp(value);
        self.pending_pixels = 0.0;
        self.redraw_requested = true;
        self.notify();
    }

    pub fn value(&self) -> i32 {
        self.current_value
    }

    /// Pixel shift to apply to ticks laid out around [`value`](Self::value).
    /// Positive when the tape has been pulled left.
    pub fn render_offset(&self) -> f32 {
        self.pending_pixels
    }

    pub fn pixels_per_unit(&self) -> f32 {
        self.pixels_per_unit
    }

    pub fn range(&self) -> &RangeConfig {
        &self.range
    }

    pub fn fling_config(&self) -> &FlingConfig {
        &self.fling_config
    }

    pub fn phase(&self) -> ScrollPhase {
        if self.dragging {
            ScrollPhase::Dragging
        } else if self.fling.is_some() {
            ScrollPhase::Flinging
        } else {
            ScrollPhase::Idle
        }
    }

    pub fn is_flinging(&self) -> bool {
        self.fling.is_some()
    }

    /// Current fling velocity in pointer space, if a fling is running.
    pub fn fling_velocity(&self) -> Option<f32> {
        self.fling.as_ref().map(FlingState::velocity)
    }

    /// Returns whether anything visible changed since the last call, and clears it.
    pub fn take_redraw_request(&mut self) -> bool {
        std::mem::take(&mut self.redraw_requested)
    }

    /// Starts (or re-anchors) a drag at `x`. A running fling is dropped without
    /// committing, and the pixel remainder carries over into the drag. A
    /// non-finite `x` is ignored and leaves the phase unchanged.
    pub fn on_pointer_down(&mut self, x: f32) {
        if !x.is_finite() {
            log::warn!("ignoring pointer down at non-finite position {x}");
            return;
        }
        if let Some(fling) = self.fling.take() {
            log::debug!(
                "fling caught at {} px/s, value {}",
                fling.velocity(),
                self.current_value
            );
        }
        self.dragging = true;
        self.last_pointer_x = x;
        log::trace!("drag started at x={x}");
    }

    pub fn on_pointer_move(&mut self, x: f32) -> Result<(), ScaleError> {
        self.expect_dragging("on_pointer_move")?;
        if !x.is_finite() {
            log::warn!("ignoring non-finite pointer position {x}");
            return Ok(());
        }
        self.pending_pixels += self.last_pointer_x - x;
        self.last_pointer_x = x;
        self.normalize();
        self.redraw_requested = true;
        Ok(())
    }

    /// Commits the drag and, if `release_velocity` (pointer space, px/s) is fast
    /// enough, starts a fling.
    pub fn on_pointer_up(&mut self, x: f32, release_velocity: f32) -> Result<(), ScaleError> {
        self.expect_dragging("on_pointer_up")?;
        self.dragging = false;
        if x.is_finite() {
            self.last_pointer_x = x;
        }
        self.finalize();

        let max = self.fling_config.max_fling_velocity;
        let velocity = if release_velocity.is_finite() {
            release_velocity.clamp(-max, max)
        } else {
            0.0
        };
        if velocity.abs() > self.fling_config.min_fling_velocity {
            log::debug!("fling started at {velocity} px/s from {}", self.current_value);
            self.fling = Some(FlingState::start(
                &self.fling_config,
                self.range.density_scale,
                velocity,
            ));
        }
        Ok(())
    }

    /// Commits the drag without a fling.
    pub fn on_pointer_cancel(&mut self) -> Result<(), ScaleError> {
        self.expect_dragging("on_pointer_cancel")?;
        self.dragging = false;
        self.finalize();
        Ok(())
    }

    /// Steps the running fling by `dt_seconds`. Returns `finished: true` on
    /// the call that ends the fling, after the value has been committed.
    pub fn advance(&mut self, dt_seconds: f32) -> Result<AdvanceResult, ScaleError> {
        let Some(fling) = self.fling.as_mut() else {
            return Err(self.violation("advance"));
        };
        let step = fling.step(dt_seconds);

        self.pending_pixels += step.tape_delta;
        let hit_bound = self.normalize();
        self.redraw_requested = true;

        if !(hit_bound || step.finished) {
            return Ok(AdvanceResult {
                finished: false,
                velocity: step.velocity,
            });
        }

        self.fling = None;
        self.finalize();
        log::debug!(
            "fling ended at {}{}",
            self.current_value,
            if hit_bound { " (bound)" } else { "" }
        );
        Ok(AdvanceResult {
            finished: true,
            velocity: if hit_bound { 0.0 } else { step.velocity },
        })
    }

    /// Folds fully crossed units into the value. Returns whether a bound was
    /// hit, in which case the remainder and any fling are dropped.
    fn normalize(&mut self) -> bool {
        let ppu = f64::from(self.pixels_per_unit);
        let pending = f64::from(self.pending_pixels);
        let crossed = pending / ppu;
        if crossed.is_nan() {
            log::warn!("dropping non-numeric drag remainder");
            self.pending_pixels = 0.0;
            return false;
        }

        let span = i64::from(self.range.max_value) - i64::from(self.range.min_value);
        let (units, remainder) = if crossed.abs() > span as f64 + 1.0 {
            // Past the far bound whatever the current value is.
            ((span + 2) * crossed.signum() as i64, 0.0)
        } else {
            let mut units = whole_units(crossed);
            let mut remainder = pending - units as f64 * ppu;
            while (remainder as f32).abs() >= self.pixels_per_unit {
                let carry = remainder.signum() as i64;
                units += carry;
                remainder -= carry as f64 * ppu;
            }
            (units, remainder as f32)
        };
        if units == 0 {
            self.pending_pixels = remainder;
            return false;
        }

        let next = i64::from(self.current_value) + units;
        self.pending_pixels = remainder;

        let min = i64::from(self.range.min_value);
        let max = i64::from(self.range.max_value);
        let hit_bound = next <= min || next > max;
        if hit_bound {
            self.current_value = if next <= min {
                self.range.min_value
            } else {
                self.range.max_value
            };
            self.pending_pixels = 0.0;
            if self.fling.take().is_some() {
                log::debug!("fling stopped at bound {}", self.current_value);
            }
        } else {
            self.current_value = next as i32;
        }
        log::trace!(
            "normalize: {units:+} units -> {} (remainder {})",
            self.current_value,
            self.pending_pixels
        );

        self.notify();
        hit_bound
    }

    /// Rounds the remainder into the value, snaps and clamps it, and reports
    /// it even when it did not change.
    fn finalize(&mut self) {
        let rounded = (self.pending_pixels / self.pixels_per_unit).round() as i64;
        self.current_value = snap_to_unit(i64::from(self.current_value) + rounded, &self.range);
        self.pending_pixels = 0.0;
        self.redraw_requested = true;
        self.notify();
    }

    fn notify(&mut self) {
        let value = self.current_value;
        if let Some(listener) = self.listener.as_mut() {
            listener(value);
        }
    }

    fn expect_dragging(&self, operation: &'static str) -> Result<(), ScaleError> {
        if self.dragging {
            Ok(())
        } else {
            Err(self.violation(operation))
        }
    }

    fn violation(&self, operation: &'static str) -> ScaleError {
        let phase = self.phase();
        log::warn!("{operation} called while {phase:?}");
        ScaleError::ProtocolViolation { operation, phase }
    }
}

impl fmt::Debug for ScaleEngine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ScaleEngine")
            .field("range", &self.range)
            .field("value", &self.current_value)
            .field("pending_pixels", &self.pending_pixels)
            .field("phase", &self.phase())
            .field("has_listener", &self.listener.is_some())
            .finish_non_exhaustive()
    }
}

/// Truncates toward zero.
fn whole_units(units: f64) -> i64 {
    if !units.is_finite() {
        return 0;
    }
    (units + units.signum() * UNIT_EPSILON).trunc() as i64
}

/// Rounds to the nearest multiple of the snap unit and clamps into the range.
/// When a bound is not itself a multiple, the nearest multiple inside the
/// range is used instead, if there is one.
fn snap_to_unit(value: i64, range: &RangeConfig) -> i32 {
    let unit = i64::from(range.snap_unit);
    let min = i64::from(range.min_value);
    let max = i64::from(range.max_value);

    let snapped = (value as f64 / unit as f64).round() as i64 * unit;
    let clamped = snapped.clamp(min, max);
    if clamped.rem_euclid(unit) == 0 {
        return clamped as i32;
    }

    let inward = if clamped == max {
        max - max.rem_euclid(unit)
    } else {
        min + (unit - min.rem_euclid(unit)) % unit
    };
    if (min..=max).contains(&inward) {
        inward as i32
    } else {
        clamped as i32
    }
}

#[cfg(test)]
#[path = "tests/engine_tests.rs"]
mod tests;
