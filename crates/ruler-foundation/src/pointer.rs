//! Single-pointer, horizontal-axis input events.

use smallvec::SmallVec;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PointerEventKind {
    Down,
    Move,
    Up,
    Cancel,
}

/// A coalesced sample delivered alongside a move event.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct HistoricalSample {
    pub uptime_ms: i64,
    pub x: f32,
}

/// One pointer event as seen by the ruler.
///
/// Platforms that batch several samples into one move event put the older
/// ones in `historical`, oldest first; `x`/`uptime_ms` are always the newest.
#[derive(Clone, Debug, PartialEq)]
pub struct PointerEvent {
    pub kind: PointerEventKind,
    pub x: f32,
    pub uptime_ms: i64,
    pub historical: SmallVec<[HistoricalSample; 4]>,
}

impl PointerEvent {
    pub fn new(kind: PointerEventKind, x: f32, uptime_ms: i64) -> Self {
        Self {
            kind,
            x,
            uptime_ms,
            historical: SmallVec::new(),
        }
    }

    pub fn down(x: f32, uptime_ms: i64) -> Self {
        Self::new(PointerEventKind::Down, x, uptime_ms)
    }

    pub fn move_to(x: f32, uptime_ms: i64) -> Self {
        Self::new(PointerEventKind::Move, x, uptime_ms)
    }

    pub fn up(x: f32, uptime_ms: i64) -> Self {
        Self::new(PointerEventKind::Up, x, uptime_ms)
    }

    pub fn cancel(x: f32, uptime_ms: i64) -> Self {
        Self::new(PointerEventKind::Cancel, x, uptime_ms)
    }

    pub fn with_historical(mut self, samples: impl IntoIterator<Item = HistoricalSample>) -> Self {
        self.historical.extend(samples);
        self
    }

    /// Historical samples followed by the current one, oldest first.
    pub fn samples(&self) -> impl Iterator<Item = HistoricalSample> + '_ {
        self.historical.iter().copied().chain(std::iter::once(HistoricalSample {
            uptime_ms: self.uptime_ms,
            x: self.x,
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn samples_end_with_the_current_position() {
        let event = PointerEvent::move_to(30.0, 20).with_historical([
            HistoricalSample { uptime_ms: 10, x: 10.0 },
            HistoricalSample { uptime_ms: 15, x: 20.0 },
        ]);

        let xs: Vec<f32> = event.samples().map(|sample| sample.x).collect();
        assert_eq!(xs, vec![10.0, 20.0, 30.0]);
    }

    #[test]
    fn plain_event_has_one_sample() {
        let event = PointerEvent::down(5.0, 0);
        assert_eq!(event.samples().count(), 1);
        assert_eq!(event.kind, PointerEventKind::Down);
    }
}
