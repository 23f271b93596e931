use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use ruler_ui::{FlingConfig, FlingDecay, RangeConfig, ScaleEngine, TapeLayout};

const FRAME_SECONDS: f32 = 1.0 / 60.0;
const VIEWPORT_WIDTHS: &[f32] = &[360.0, 1080.0, 2560.0];

fn bench_range() -> RangeConfig {
    RangeConfig::default().with_bounds(0, 100_000)
}

fn drag_moves(c: &mut Criterion) {
    let mut engine = ScaleEngine::with_range(bench_range()).expect("valid range");
    engine.set_value(50_000);

    c.bench_function("drag_1000_moves", |b| {
        b.iter(|| {
            let mut x = 500.0;
            engine.on_pointer_down(x);
            for step in 0..1_000 {
                x += if step % 2 == 0 { -7.3 } else { 6.9 };
                engine.on_pointer_move(black_box(x)).expect("dragging");
            }
            engine.on_pointer_cancel().expect("dragging");
            black_box(engine.value());
        });
    });
}

fn fling_to_rest(c: &mut Criterion) {
    let mut group = c.benchmark_group("fling_to_rest");
    let decays = [
        ("spline", FlingDecay::default()),
        ("exponential", FlingDecay::Exponential { friction_multiplier: 1.0 }),
    ];
    for (name, decay) in decays {
        let fling = FlingConfig::default().with_decay(decay);
        let mut engine = ScaleEngine::new(bench_range(), fling).expect("valid config");
        group.bench_function(BenchmarkId::from_parameter(name), |b| {
            b.iter(|| {
                engine.set_value(50_000);
                engine.on_pointer_down(0.0);
                engine.on_pointer_up(0.0, black_box(-6_000.0)).expect("dragging");
                while engine.is_flinging() {
                    if engine.advance(FRAME_SECONDS).expect("flinging").finished {
                        break;
                    }
                }
                black_box(engine.value());
            });
        });
    }
    group.finish();
}

fn tape_layout(c: &mut Criterion) {
    let range = bench_range();
    let mut group = c.benchmark_group("tape_layout");
    for &width in VIEWPORT_WIDTHS {
        group.bench_with_input(BenchmarkId::from_parameter(width), &width, |b, &width| {
            b.iter(|| {
                let layout = TapeLayout::compute(&range, black_box(50_000), 1.5, width);
                black_box(layout.ticks.len());
            });
        });
    }
    group.finish();
}

criterion_group!(benches, drag_moves, fling_to_rest, tape_layout);
criterion_main!(benches);
