use criterion::{Criterion, criterion_group, criterion_main};
use forecast_sketch::capture::{CaptureConfig, CaptureEngine};
use forecast_sketch::core::{AnchorPoint, AxisBounds, PointerPosition, StaticViewport, Viewport};
use forecast_sketch::render::NullRenderer;
use std::hint::black_box;

fn build_engine() -> CaptureEngine<StaticViewport, NullRenderer> {
    let source = StaticViewport::new(
        AnchorPoint::new(10.0, 540.0, 100.0),
        AxisBounds::new(0.0, 200.0),
    );
    CaptureEngine::new(
        NullRenderer::default(),
        source,
        Viewport::new(1920, 1080),
        CaptureConfig::default(),
    )
    .expect("engine init")
}

fn bench_record_1k_samples(c: &mut Criterion) {
    let mut engine = build_engine();

    c.bench_function("record_1k_samples", |b| {
        b.iter(|| {
            engine.reset();
            engine.begin_capture(0);
            for i in 1..=1_000 {
                let x = 10.0 + f64::from(i) * 1.5;
                let y = 540.0 + (f64::from(i) * 0.05).sin() * 200.0;
                engine.record_sample(black_box(PointerPosition::new(x, y)), i64::from(i) * 8);
            }
            black_box(engine.end_capture());
        })
    });
}

fn bench_stroke_frame_1k(c: &mut Criterion) {
    let mut engine = build_engine();
    engine.begin_capture(0);
    for i in 1..=1_000 {
        let x = 10.0 + f64::from(i) * 1.5;
        engine.record_sample(PointerPosition::new(x, 540.0), i64::from(i) * 8);
    }
    engine.end_capture();

    c.bench_function("stroke_frame_1k", |b| {
        b.iter(|| {
            let frame = black_box(&engine).build_frame();
            frame.validate().expect("valid frame");
        })
    });
}

criterion_group!(benches, bench_record_1k_samples, bench_stroke_frame_1k);
criterion_main!(benches);
