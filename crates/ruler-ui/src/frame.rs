//! Turns absolute frame timestamps into per-frame deltas.

const NANOS_PER_SECOND: f32 = 1_000_000_000.0;

#[derive(Debug, Clone, Copy, Default)]
pub struct FrameTicker {
    last_frame_nanos: Option<u64>,
}

impl FrameTicker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seconds since the previous frame. The first frame after a reset, and
    /// any frame stamped earlier than its predecessor, yields `0.0`.
    pub fn tick(&mut self, frame_time_nanos: u64) -> f32 {
        let dt = match self.last_frame_nanos {
            Some(last) => frame_time_nanos.saturating_sub(last) as f32 / NANOS_PER_SECOND,
            None => 0.0,
        };
        self.last_frame_nanos = Some(frame_time_nanos);
        dt
    }

    pub fn reset(&mut self) {
        self.last_frame_nanos = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_frame_is_zero_then_deltas() {
        let mut ticker = FrameTicker::new();
        assert_eq!(ticker.tick(1_000_000_000), 0.0);
        assert!((ticker.tick(1_016_000_000) - 0.016).abs() < 1e-6);
        assert!((ticker.tick(1_050_000_000) - 0.034).abs() < 1e-6);
    }

    #[test]
    fn time_going_backwards_is_zero() {
        let mut ticker = FrameTicker::new();
        ticker.tick(500);
        assert_eq!(ticker.tick(100), 0.0);
    }

    #[test]
    fn reset_restarts_the_clock() {
        let mut ticker = FrameTicker::new();
        ticker.tick(0);
        ticker.tick(16_000_000);
        ticker.reset();
        assert_eq!(ticker.tick(99_000_000), 0.0);
    }
}
