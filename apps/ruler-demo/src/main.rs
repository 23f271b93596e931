use std::time::Duration;

use ruler_foundation::PointerEvent;
use ruler_ui::{RangeConfig, ScaleController, ScaleError, TapeLayout, TickKind};
use web_time::Instant;

const COLUMNS: usize = 72;
/// Screen pixels per terminal column.
const CELL_PX: f32 = 4.0;
const FRAME_NANOS: u64 = 16_666_667;
const NANOS_PER_MS: u64 = 1_000_000;

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp_millis()
        .init();

    let paced = !std::env::args().any(|arg| arg == "--no-pace");
    if let Err(err) = run(paced) {
        log::error!("demo failed: {err}");
        std::process::exit(1);
    }
}

fn run(paced: bool) -> Result<(), ScaleError> {
    let range = RangeConfig::default().with_bounds(0, 283);
    let mut controller = ScaleController::with_range(range)?;
    controller
        .engine_mut()
        .set_value_change_listener(|value| log::debug!("value -> {value}"));
    controller.engine_mut().set_value(20);

    println!("=== Ruler picker ===");
    println!("range {}..={}, starting at {}", range.min_value, range.max_value, controller.value());
    draw(&controller);

    println!();
    println!("Slow drag: 60 px to the left, pausing between moves");
    let mut uptime_ms = 0;
    controller.on_pointer_event(&PointerEvent::down(400.0, uptime_ms))?;
    for step in 1..=6 {
        uptime_ms += 50;
        let x = 400.0 - 10.0 * step as f32;
        controller.on_pointer_event(&PointerEvent::move_to(x, uptime_ms))?;
    }
    uptime_ms += 60;
    controller.on_pointer_event(&PointerEvent::up(340.0, uptime_ms))?;
    log::info!("released without fling at {}", controller.value());
    draw(&controller);

    println!();
    println!("Fast swipe: 200 px to the left in 50 ms");
    uptime_ms += 1_000;
    controller.on_pointer_event(&PointerEvent::down(600.0, uptime_ms))?;
    for step in 1..=5 {
        uptime_ms += 10;
        let x = 600.0 - 40.0 * step as f32;
        controller.on_pointer_event(&PointerEvent::move_to(x, uptime_ms))?;
    }
    uptime_ms += 1;
    controller.on_pointer_event(&PointerEvent::up(400.0, uptime_ms))?;
    if let Some(velocity) = controller.engine().fling_velocity() {
        log::info!("fling at {velocity:.0} px/s from {}", controller.value());
    }
    draw(&controller);

    pump_frames(&mut controller, uptime_ms as u64 * NANOS_PER_MS, paced)?;
    log::info!("settled at {}", controller.value());
    Ok(())
}

/// Runs the fling to completion on a synthetic 60 Hz clock, optionally
/// sleeping so it plays back in real time.
fn pump_frames(
    controller: &mut ScaleController,
    start_nanos: u64,
    paced: bool,
) -> Result<(), ScaleError> {
    let started = Instant::now();
    let mut frame = 0u64;
    loop {
        let outcome = controller.on_frame(start_nanos + frame * FRAME_NANOS)?;
        if outcome.needs_redraw {
            draw(controller);
        }
        if !outcome.animating {
            break;
        }
        frame += 1;
        if paced {
            let deadline = Duration::from_nanos(frame * FRAME_NANOS);
            if let Some(wait) = deadline.checked_sub(started.elapsed()) {
                std::thread::sleep(wait);
            }
        }
    }
    log::info!(
        "fling ran {frame} frames in {:.0} ms",
        started.elapsed().as_secs_f64() * 1_000.0
    );
    Ok(())
}

fn draw(controller: &ScaleController) {
    let layout = controller.layout(COLUMNS as f32 * CELL_PX);
    for line in render(&layout) {
        println!("{line}");
    }
    println!("{:>width$}", controller.value(), width = COLUMNS / 2 + 2);
}

/// Label row, tick row and indicator row.
fn render(layout: &TapeLayout) -> [String; 3] {
    let mut labels = vec![' '; COLUMNS];
    let mut ticks = vec![' '; COLUMNS];

    if let Some((start, end)) = layout.baseline {
        for cell in column(start).unwrap_or(0)..=column(end).unwrap_or(COLUMNS - 1) {
            ticks[cell] = '_';
        }
    }
    for tick in layout.ticks.iter() {
        let Some(cell) = column(tick.x) else {
            continue;
        };
        ticks[cell] = match tick.kind {
            TickKind::Major => '|',
            TickKind::Minor => '.',
        };
        if let Some(label) = tick.label() {
            let first = cell.saturating_sub(label.len() / 2);
            for (offset, ch) in label.chars().enumerate() {
                if let Some(slot) = labels.get_mut(first + offset) {
                    *slot = ch;
                }
            }
        }
    }

    let mut indicator = vec![' '; COLUMNS];
    if let Some(cell) = column(layout.indicator_x) {
        indicator[cell] = '^';
    }

    [
        labels.into_iter().collect(),
        ticks.into_iter().collect(),
        indicator.into_iter().collect(),
    ]
}

fn column(x: f32) -> Option<usize> {
    let cell = (x / CELL_PX).round();
    (cell >= 0.0 && cell < COLUMNS as f32).then_some(cell as usize)
}
