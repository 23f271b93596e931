//! Pointer and frame glue around [`ScaleEngine`].
//!
//! A platform view forwards its raw pointer events and vsync timestamps here;
//! the controller estimates the release velocity, converts timestamps into
//! frame deltas and keeps the engine's fling running.

use ruler_foundation::{PointerEvent, PointerEventKind, VelocityTracker1D};

use crate::config::{FlingConfig, RangeConfig};
use crate::engine::ScaleEngine;
use crate::error::ScaleError;
use crate::frame::FrameTicker;
use crate::layout::TapeLayout;

/// What a frame did.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FrameOutcome {
    /// A fling is still running; schedule another frame.
    pub animating: bool,
    /// A fling ended on this frame and the value was committed.
    pub settled: bool,
    pub needs_redraw: bool,
}

#[derive(Debug)]
pub struct ScaleController {
    engine: ScaleEngine,
    velocity_tracker: VelocityTracker1D,
    frame_ticker: FrameTicker,
}

impl ScaleController {
    pub fn new(range: RangeConfig, fling: FlingConfig) -> Result<Self, ScaleError> {
        Ok(Self::from_engine(ScaleEngine::new(range, fling)?))
    }

    pub fn with_range(range: RangeConfig) -> Result<Self, ScaleError> {
        Ok(Self::from_engine(ScaleEngine::with_range(range)?))
    }

    pub fn from_engine(engine: ScaleEngine) -> Self {
        Self {
            engine,
            velocity_tracker: VelocityTracker1D::new(),
            frame_ticker: FrameTicker::new(),
        }
    }

    pub fn engine(&self) -> &ScaleEngine {
        &self.engine
    }

    pub fn engine_mut(&mut self) -> &mut ScaleEngine {
        &mut self.engine
    }

    pub fn value(&self) -> i32 {
        self.engine.value()
    }

    /// Feeds one pointer event. Returns whether the tape needs a redraw.
    pub fn on_pointer_event(&mut self, event: &PointerEvent) -> Result<bool, ScaleError> {
        match event.kind {
            PointerEventKind::Down => {
                self.velocity_tracker.reset();
                self.velocity_tracker.add_data_point(event.uptime_ms, event.x);
                self.frame_ticker.reset();
                self.engine.on_pointer_down(event.x);
            }
            PointerEventKind::Move => {
                for sample in event.samples() {
                    self.velocity_tracker.add_data_point(sample.uptime_ms, sample.x);
                }
                self.engine.on_pointer_move(event.x)?;
            }
            PointerEventKind::Up => {
                self.velocity_tracker.add_data_point(event.uptime_ms, event.x);
                let velocity = self
                    .velocity_tracker
                    .calculate_velocity_with_max(self.engine.fling_config().max_fling_velocity);
                self.velocity_tracker.reset();
                log::trace!("release at x={} with {velocity} px/s", event.x);
                self.engine.on_pointer_up(event.x, velocity)?;
            }
            PointerEventKind::Cancel => {
                self.velocity_tracker.reset();
                self.engine.on_pointer_cancel()?;
            }
        }
        Ok(self.engine.take_redraw_request())
    }

    /// Advances a running fling to `frame_time_nanos`. Frames while nothing is
    /// animating only report pending redraws.
    pub fn on_frame(&mut self, frame_time_nanos: u64) -> Result<FrameOutcome, ScaleError> {
        if !self.engine.is_flinging() {
            self.frame_ticker.reset();
            return Ok(FrameOutcome {
                needs_redraw: self.engine.take_redraw_request(),
                ..FrameOutcome::default()
            });
        }

        let dt = self.frame_ticker.tick(frame_time_nanos);
        let result = self.engine.advance(dt)?;
        if result.finished {
            self.frame_ticker.reset();
        }
        Ok(FrameOutcome {
            animating: !result.finished,
            settled: result.finished,
            needs_redraw: self.engine.take_redraw_request(),
        })
    }

    pub fn layout(&self, width: f32) -> TapeLayout {
        TapeLayout::for_engine(&self.engine, width)
    }
}
