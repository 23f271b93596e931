//! Release velocity estimation for the ruler tape.
//!
//! Impulse strategy: the velocity is the one that would carry the kinetic
//! energy imparted by the recent pointer samples. Only samples within
//! [`HORIZON_MS`] of the newest one count, and a pause longer than
//! [`ASSUME_STOPPED_MS`] discards everything before it.

const HISTORY_SIZE: usize = 20;

/// Samples older than this (relative to the newest) are ignored.
pub const HORIZON_MS: i64 = 100;

/// A gap between consecutive samples larger than this means the pointer rested.
pub const ASSUME_STOPPED_MS: i64 = 40;

#[derive(Clone, Copy, Debug, Default)]
struct Sample {
    time_ms: i64,
    position: f32,
}

/// Ring buffer of absolute positions along one axis.
#[derive(Clone, Debug)]
pub struct VelocityTracker1D {
    samples: [Option<Sample>; HISTORY_SIZE],
    newest: usize,
}

impl Default for VelocityTracker1D {
    fn default() -> Self {
        Self::new()
    }
}

impl VelocityTracker1D {
    pub fn new() -> Self {
        Self {
            samples: [None; HISTORY_SIZE],
            newest: 0,
        }
    }

    pub fn add_data_point(&mut self, time_ms: i64, position: f32) {
        self.newest = (self.newest + 1) % HISTORY_SIZE;
        self.samples[self.newest] = Some(Sample { time_ms, position });
    }

    /// Velocity in units per second, `0.0` with fewer than two usable samples.
    pub fn calculate_velocity(&self) -> f32 {
        let Some(newest) = self.samples[self.newest] else {
            return 0.0;
        };

        // Newest first; times are negative ages.
        let mut positions = [0.0f32; HISTORY_SIZE];
        let mut times = [0.0f32; HISTORY_SIZE];
        let mut count = 0;
        let mut index = self.newest;
        let mut previous_time = newest.time_ms;

        while let Some(sample) = self.samples[index] {
            let age = newest.time_ms - sample.time_ms;
            let gap = (previous_time - sample.time_ms).abs();
            if age > HORIZON_MS {
                break;
            }
            if gap > ASSUME_STOPPED_MS {
                log::trace!("pointer rested {gap} ms, ignoring older samples");
                break;
            }
            previous_time = sample.time_ms;

            positions[count] = sample.position;
            times[count] = -(age as f32);
            count += 1;
            if count == HISTORY_SIZE {
                break;
            }
            index = (index + HISTORY_SIZE - 1) % HISTORY_SIZE;
        }

        if count < 2 {
            return 0.0;
        }

        impulse_velocity(&positions[..count], &times[..count]) * 1000.0
    }

    /// [`calculate_velocity`](Self::calculate_velocity) clamped to `±max_velocity`.
    /// A non-positive or non-finite cap yields `0.0`.
    pub fn calculate_velocity_with_max(&self, max_velocity: f32) -> f32 {
        if !max_velocity.is_finite() || max_velocity <= 0.0 {
            return 0.0;
        }
        let velocity = self.calculate_velocity();
        if !velocity.is_finite() {
            return 0.0;
        }
        velocity.clamp(-max_velocity, max_velocity)
    }

    pub fn reset(&mut self) {
        self.samples = [None; HISTORY_SIZE];
        self.newest = 0;
    }
}

/// `positions`/`times` are ordered newest first. Returns units per millisecond.
fn impulse_velocity(positions: &[f32], times: &[f32]) -> f32 {
    let oldest = positions.len() - 1;
    let mut work = 0.0f32;

    for i in (1..=oldest).rev() {
        let dt = times[i] - times[i - 1];
        if dt == 0.0 {
            continue;
        }
        let segment_velocity = (positions[i] - positions[i - 1]) / dt;
        let carried = energy_to_velocity(work);
        work += (segment_velocity - carried) * segment_velocity.abs();
        if i == oldest {
            work *= 0.5;
        }
    }

    energy_to_velocity(work)
}

/// `E = v² / 2` with unit mass, keeping the sign.
#[inline]
fn energy_to_velocity(energy: f32) -> f32 {
    energy.signum() * (2.0 * energy.abs()).sqrt()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_tracker_is_still() {
        assert_eq!(VelocityTracker1D::new().calculate_velocity(), 0.0);
    }

    #[test]
    fn one_sample_is_still() {
        let mut tracker = VelocityTracker1D::new();
        tracker.add_data_point(0, 100.0);
        assert_eq!(tracker.calculate_velocity(), 0.0);
    }

    #[test]
    fn steady_motion_reports_its_speed() {
        let mut tracker = VelocityTracker1D::new();
        for step in 0..4 {
            tracker.add_data_point(step * 10, step as f32 * 100.0);
        }
        let velocity = tracker.calculate_velocity();
        assert!((velocity - 10_000.0).abs() < 1_000.0, "got {velocity}");
    }

    #[test]
    fn leftward_motion_is_negative() {
        let mut tracker = VelocityTracker1D::new();
        tracker.add_data_point(0, 300.0);
        tracker.add_data_point(10, 200.0);
        tracker.add_data_point(20, 100.0);
        assert!(tracker.calculate_velocity() < 0.0);
    }

    #[test]
    fn cap_applies_in_both_directions() {
        let mut tracker = VelocityTracker1D::new();
        tracker.add_data_point(0, 0.0);
        tracker.add_data_point(1, 10_000.0);
        assert_eq!(tracker.calculate_velocity_with_max(8_000.0), 8_000.0);

        tracker.reset();
        tracker.add_data_point(0, 10_000.0);
        tracker.add_data_point(1, 0.0);
        assert_eq!(tracker.calculate_velocity_with_max(8_000.0), -8_000.0);
        assert_eq!(tracker.calculate_velocity_with_max(0.0), 0.0);
    }

    #[test]
    fn reset_forgets_samples() {
        let mut tracker = VelocityTracker1D::new();
        tracker.add_data_point(0, 0.0);
        tracker.add_data_point(10, 100.0);
        tracker.reset();
        assert_eq!(tracker.calculate_velocity(), 0.0);
    }

    #[test]
    fn stale_samples_are_outside_the_horizon() {
        let mut tracker = VelocityTracker1D::new();
        tracker.add_data_point(0, 0.0);
        tracker.add_data_point(150, 100.0);
        tracker.add_data_point(160, 200.0);
        tracker.add_data_point(170, 300.0);
        let velocity = tracker.calculate_velocity();
        assert!((velocity - 10_000.0).abs() < 1_000.0, "got {velocity}");
    }

    #[test]
    fn pause_before_release_means_no_velocity() {
        let mut tracker = VelocityTracker1D::new();
        tracker.add_data_point(0, 0.0);
        tracker.add_data_point(ASSUME_STOPPED_MS + 1, 100.0);
        assert_eq!(tracker.calculate_velocity(), 0.0);
    }
}
