// ─────────────────────────────────────────────────────────────────────
// StepBlend — Scheduler Benchmarks
// ─────────────────────────────────────────────────────────────────────
//! Criterion benchmarks for curve assembly and adaptive analysis.

use std::sync::Arc;

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use ndarray::Array4;

use stepblend_core::{
    AdaptiveMode, BlendRequest, BlendScheduler, BlendShape, CurveBuilder, ImageBatch,
    NullObserver, SchedulerConfig,
};

fn noise_batch(frames: usize, size: usize) -> ImageBatch {
    let mut state: u32 = 0x2545_f491;
    let data = Array4::from_shape_fn((frames, size, size, 3), |_| {
        state = state.wrapping_mul(1_664_525).wrapping_add(1_013_904_223);
        (state >> 8) as f32 / (1u32 << 24) as f32
    });
    ImageBatch::from_array(data)
}

fn quiet_scheduler() -> BlendScheduler {
    BlendScheduler::with_observer(SchedulerConfig::default(), Arc::new(NullObserver))
        .expect("default config is valid")
}

// ── CurveBuilder.build() ────────────────────────────────────────────

fn bench_curve_sigmoid_30(c: &mut Criterion) {
    let builder = CurveBuilder::default();
    c.bench_function("curve_sigmoid_30", |b| {
        b.iter(|| {
            builder.build(
                black_box(30),
                black_box(0),
                black_box(-1),
                BlendShape::Sigmoid,
                false,
                black_box(1.2),
                None,
            )
        })
    });
}

fn bench_curve_custom_1000(c: &mut Criterion) {
    let builder = CurveBuilder::default();
    let curve: Vec<f64> = (0..64).map(|i| (i as f64 / 63.0).sqrt()).collect();
    c.bench_function("curve_custom_1000", |b| {
        b.iter(|| {
            builder.build(
                black_box(1000),
                black_box(100),
                black_box(900),
                BlendShape::CustomCurve,
                true,
                1.0,
                Some(curve.as_slice()),
            )
        })
    });
}

// ── BlendScheduler.schedule() ───────────────────────────────────────

fn bench_schedule_frequency_8x256(c: &mut Criterion) {
    let scheduler = quiet_scheduler();
    let images = noise_batch(8, 256);
    let request = BlendRequest::new(30, 0, -1);
    c.bench_function("schedule_frequency_8x256", |b| {
        b.iter(|| scheduler.schedule(black_box(&request), Some(&images)))
    });
}

fn bench_schedule_variance_8x256(c: &mut Criterion) {
    let scheduler = quiet_scheduler();
    let images = noise_batch(8, 256);
    let request = BlendRequest {
        adaptive_mode: AdaptiveMode::BasicVariance,
        ..BlendRequest::new(30, 0, -1)
    };
    c.bench_function("schedule_variance_8x256", |b| {
        b.iter(|| scheduler.schedule(black_box(&request), Some(&images)))
    });
}

criterion_group!(
    benches,
    bench_curve_sigmoid_30,
    bench_curve_custom_1000,
    bench_schedule_frequency_8x256,
    bench_schedule_variance_8x256,
);
criterion_main!(benches);
