use ruler_testing::{FlingRobot, GestureRobot, RecordingListener, FRAME_NANOS};
use ruler_ui::{
    HistoricalSample, PointerEvent, RangeConfig, ScaleController, ScaleEngine, ScaleError,
    ScrollPhase,
};

fn wide_controller(start: i32) -> (ScaleController, RecordingListener) {
    let range = RangeConfig::default().with_bounds(0, 1_000);
    let mut controller = ScaleController::with_range(range).expect("valid range");
    let recorder = RecordingListener::new();
    recorder.attach(controller.engine_mut());
    controller.engine_mut().set_value(start);
    recorder.clear();
    (controller, recorder)
}

#[test]
fn fast_swipe_left_flings_toward_larger_values() {
    let (mut controller, recorder) = wide_controller(500);
    let mut gestures = GestureRobot::new();

    gestures
        .drag(&mut controller, 300.0, 100.0, 5, 50)
        .expect("drag");
    let after_drag = controller.value();
    assert_eq!(after_drag, 550);

    gestures.release(&mut controller, 1).expect("release");
    assert_eq!(controller.engine().phase(), ScrollPhase::Flinging);
    let velocity = controller.engine().fling_velocity().expect("flinging");
    assert!(velocity < 0.0, "pointer moved left, got {velocity}");

    let outcomes = FlingRobot::new().run_controller(&mut controller, 2_000);
    let last = outcomes.last().expect("at least one frame");
    assert!(last.settled);
    assert_eq!(outcomes.iter().filter(|o| o.settled).count(), 1);

    assert!(controller.value() > after_drag);
    assert_eq!(controller.engine().phase(), ScrollPhase::Idle);
    assert_eq!(controller.engine().render_offset(), 0.0);
    assert_eq!(recorder.last(), Some(controller.value()));

    let values = recorder.values();
    assert!(values.windows(2).all(|pair| pair[0] <= pair[1]), "{values:?}");
}

#[test]
fn fast_swipe_right_flings_toward_smaller_values() {
    let (mut controller, _recorder) = wide_controller(500);
    let mut gestures = GestureRobot::new();

    gestures
        .swipe(&mut controller, 100.0, 300.0, 5, 50)
        .expect("swipe");
    assert!(controller.engine().is_flinging());
    FlingRobot::new().run_controller(&mut controller, 2_000);

    assert!(controller.value() < 450);
}

#[test]
fn slow_drag_commits_without_fling() {
    let (mut controller, recorder) = wide_controller(500);
    let mut gestures = GestureRobot::new();

    gestures.press(&mut controller, 400.0).expect("press");
    for step in 1..=4 {
        gestures
            .move_to(&mut controller, 400.0 - 10.0 * step as f32, 50)
            .expect("move");
    }
    gestures.release(&mut controller, 60).expect("release");

    assert_eq!(controller.engine().phase(), ScrollPhase::Idle);
    assert_eq!(controller.value(), 510);
    assert_eq!(recorder.last(), Some(510));
    // One report per move that crossed a unit, plus the commit.
    assert_eq!(recorder.len(), 5);
}

#[test]
fn swipe_into_the_upper_bound_stops_there() {
    let range = RangeConfig::default().with_bounds(0, 283);
    let mut controller = ScaleController::with_range(range).expect("valid range");
    controller.engine_mut().set_value(270);
    let mut gestures = GestureRobot::new();

    gestures
        .swipe(&mut controller, 400.0, 100.0, 5, 40)
        .expect("swipe");
    if controller.engine().is_flinging() {
        FlingRobot::new().run_controller(&mut controller, 2_000);
    }

    assert_eq!(controller.value(), 283);
    assert_eq!(controller.engine().render_offset(), 0.0);
}

#[test]
fn press_during_fling_catches_the_tape() {
    let (mut controller, recorder) = wide_controller(500);
    let mut gestures = GestureRobot::new();

    gestures
        .swipe(&mut controller, 300.0, 100.0, 5, 50)
        .expect("swipe");
    for frame in 0..4 {
        let outcome = controller.on_frame(frame * FRAME_NANOS).expect("frame");
        assert!(outcome.animating);
    }
    assert!(controller.engine().is_flinging());
    let caught_at = controller.value();
    assert!(caught_at > 550);

    gestures.press(&mut controller, 200.0).expect("press");
    assert_eq!(controller.engine().phase(), ScrollPhase::Dragging);
    assert_eq!(controller.value(), caught_at);

    let outcome = controller.on_frame(u64::MAX / 2).expect("frame");
    assert!(!outcome.animating);

    gestures.release(&mut controller, 200).expect("release");
    assert_eq!(controller.engine().phase(), ScrollPhase::Idle);
    assert_eq!(recorder.last(), Some(controller.value()));
}

#[test]
fn cancel_commits_without_fling() {
    let (mut controller, recorder) = wide_controller(500);
    let mut gestures = GestureRobot::new();

    gestures
        .drag(&mut controller, 300.0, 100.0, 5, 50)
        .expect("drag");
    gestures.cancel(&mut controller).expect("cancel");

    assert_eq!(controller.engine().phase(), ScrollPhase::Idle);
    assert_eq!(controller.value(), 550);
    assert_eq!(recorder.last(), Some(550));
}

#[test]
fn move_without_press_is_rejected() {
    let (mut controller, recorder) = wide_controller(500);

    let err = controller
        .on_pointer_event(&PointerEvent::move_to(10.0, 0))
        .expect_err("no drag in progress");
    assert!(matches!(
        err,
        ScaleError::ProtocolViolation {
            operation: "on_pointer_move",
            phase: ScrollPhase::Idle,
        }
    ));
    assert_eq!(controller.value(), 500);
    assert!(recorder.is_empty());
}

#[test]
fn historical_samples_feed_the_velocity_estimate() {
    let (mut controller, _recorder) = wide_controller(500);

    controller
        .on_pointer_event(&PointerEvent::down(300.0, 0))
        .expect("down");
    let batched = PointerEvent::move_to(100.0, 40).with_historical([
        HistoricalSample { uptime_ms: 10, x: 250.0 },
        HistoricalSample { uptime_ms: 20, x: 200.0 },
        HistoricalSample { uptime_ms: 30, x: 150.0 },
    ]);
    controller.on_pointer_event(&batched).expect("move");
    controller
        .on_pointer_event(&PointerEvent::up(100.0, 41))
        .expect("up");

    assert!(controller.engine().is_flinging());
}

#[test]
fn idle_frames_only_report_redraws() {
    let (mut controller, _recorder) = wide_controller(500);
    controller.on_frame(0).expect("frame");

    let outcome = controller.on_frame(FRAME_NANOS).expect("frame");
    assert!(!outcome.animating);
    assert!(!outcome.settled);
    assert!(!outcome.needs_redraw);

    controller.engine_mut().set_value(42);
    assert!(controller.on_frame(2 * FRAME_NANOS).expect("frame").needs_redraw);
}

#[test]
fn layout_follows_the_controller() {
    let (mut controller, _recorder) = wide_controller(500);
    let layout = controller.layout(400.0);
    assert_eq!(layout.indicator_x, 200.0);
    let under = layout.tick_under_indicator().expect("tick under indicator");
    assert_eq!(under.value, 500);

    GestureRobot::new()
        .drag(&mut controller, 300.0, 299.0, 1, 16)
        .expect("drag");
    let shifted = controller.layout(400.0);
    let under = shifted.tick_under_indicator().expect("tick under indicator");
    assert_eq!(under.value, 500);
    assert_eq!(under.x, 199.0);
}

#[test]
fn pausing_before_release_settles_without_fling() {
    let (mut controller, recorder) = wide_controller(500);
    let mut gestures = GestureRobot::new();

    gestures
        .drag(&mut controller, 300.0, 100.0, 5, 50)
        .expect("drag");
    assert_eq!(gestures.uptime_ms(), 50);
    gestures.wait(100);
    gestures.release(&mut controller, 0).expect("release");

    assert_eq!(gestures.uptime_ms(), 150);
    assert_eq!(controller.engine().phase(), ScrollPhase::Idle);
    assert_eq!(controller.value(), 550);
    assert_eq!(recorder.last(), Some(550));
}

#[test]
fn engine_fling_runs_on_the_virtual_clock() {
    let range = RangeConfig::default().with_bounds(0, 10_000);
    let mut engine = ScaleEngine::with_range(range).expect("valid range");
    engine.set_value(5_000);
    engine.on_pointer_down(0.0);
    engine.on_pointer_up(0.0, -3_000.0).expect("dragging");

    let mut frames = FlingRobot::new();
    let steps = frames.run_engine(&mut engine, 2_000);

    assert_eq!(steps.iter().filter(|step| step.finished).count(), 1);
    assert_eq!(frames.frame_time_nanos(), steps.len() as u64 * FRAME_NANOS);
    assert!(engine.value() > 5_000);
    assert_eq!(engine.render_offset(), 0.0);
}
