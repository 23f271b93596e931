use ruler_foundation::PointerEvent;
use ruler_ui::{AdvanceResult, FrameOutcome, ScaleController, ScaleEngine, ScaleError};

/// One frame at 60 Hz.
pub const FRAME_NANOS: u64 = 16_666_667;

/// Drives flings frame by frame on a virtual 60 Hz clock.
#[derive(Debug, Default)]
pub struct FlingRobot {
    frame_time_nanos: u64,
}

impl FlingRobot {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn frame_time_nanos(&self) -> u64 {
        self.frame_time_nanos
    }

    /// Calls [`ScaleEngine::advance`] until the fling finishes and returns
    /// every step. Panics if it runs longer than `max_frames`.
    pub fn run_engine(&mut self, engine: &mut ScaleEngine, max_frames: usize) -> Vec<AdvanceResult> {
        let dt = FRAME_NANOS as f32 / 1_000_000_000.0;
        let mut steps = Vec::new();
        for _ in 0..max_frames {
            self.frame_time_nanos += FRAME_NANOS;
            let step = engine.advance(dt).expect("engine is flinging");
            steps.push(step);
            if step.finished {
                return steps;
            }
        }
        panic!("fling still running after {max_frames} frames");
    }

    /// Pumps [`ScaleController::on_frame`] until nothing is animating and
    /// returns the outcome of every frame. Panics after `max_frames`.
    pub fn run_controller(
        &mut self,
        controller: &mut ScaleController,
        max_frames: usize,
    ) -> Vec<FrameOutcome> {
        let mut outcomes = Vec::new();
        for _ in 0..max_frames {
            let outcome = controller
                .on_frame(self.frame_time_nanos)
                .expect("frame succeeds");
            self.frame_time_nanos += FRAME_NANOS;
            outcomes.push(outcome);
            if !outcome.animating {
                return outcomes;
            }
        }
        panic!("controller still animating after {max_frames} frames");
    }
}

/// Scripts single-pointer gestures with a virtual uptime in milliseconds.
#[derive(Debug, Default)]
pub struct GestureRobot {
    uptime_ms: i64,
    x: f32,
}

impl GestureRobot {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn uptime_ms(&self) -> i64 {
        self.uptime_ms
    }

    /// Lets `ms` of virtual time pass without input.
    pub fn wait(&mut self, ms: i64) {
        self.uptime_ms += ms;
    }

    pub fn press(&mut self, controller: &mut ScaleController, x: f32) -> Result<bool, ScaleError> {
        self.x = x;
        controller.on_pointer_event(&PointerEvent::down(x, self.uptime_ms))
    }

    /// Moves to `x`, `after_ms` after the previous event.
    pub fn move_to(
        &mut self,
        controller: &mut ScaleController,
        x: f32,
        after_ms: i64,
    ) -> Result<bool, ScaleError> {
        self.uptime_ms += after_ms;
        self.x = x;
        controller.on_pointer_event(&PointerEvent::move_to(x, self.uptime_ms))
    }

    /// Releases at the current position, `after_ms` after the previous event.
    pub fn release(&mut self, controller: &mut ScaleController, after_ms: i64) -> Result<bool, ScaleError> {
        self.uptime_ms += after_ms;
        controller.on_pointer_event(&PointerEvent::up(self.x, self.uptime_ms))
    }

    pub fn cancel(&mut self, controller: &mut ScaleController) -> Result<bool, ScaleError> {
        controller.on_pointer_event(&PointerEvent::cancel(self.x, self.uptime_ms))
    }

    /// Press at `from_x`, move to `to_x` in `steps` evenly timed moves spread
    /// over `duration_ms`, and leave the pointer down.
    pub fn drag(
        &mut self,
        controller: &mut ScaleController,
        from_x: f32,
        to_x: f32,
        steps: u32,
        duration_ms: i64,
    ) -> Result<(), ScaleError> {
        let steps = steps.max(1);
        let step_ms = (duration_ms / i64::from(steps)).max(1);
        self.press(controller, from_x)?;
        for step in 1..=steps {
            let x = from_x + (to_x - from_x) * step as f32 / steps as f32;
            self.move_to(controller, x, step_ms)?;
        }
        Ok(())
    }

    /// A drag released immediately, which flings when fast enough.
    pub fn swipe(
        &mut self,
        controller: &mut ScaleController,
        from_x: f32,
        to_x: f32,
        steps: u32,
        duration_ms: i64,
    ) -> Result<(), ScaleError> {
        self.drag(controller, from_x, to_x, steps, duration_ms)?;
        self.release(controller, 1)?;
        Ok(())
    }
}
