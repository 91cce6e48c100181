use std::hint::black_box;
use std::time::Duration;

use criterion::{Criterion, criterion_group, criterion_main};
use dca_viz::api::{
    ChartConfig, HeadlessNavigation, LineChart, ManualTickScheduler,
    VisualizationController,
};
use dca_viz::core::{DCA_STEPS, LinearScale, PixelSpan, SampleGrid, Viewport, sample_curves};
use dca_viz::render::NullRenderer;

fn bench_linear_scale_round_trip(c: &mut Criterion) {
    let scale = LinearScale::new(-2.0, 2.0).expect("valid scale");
    let span = PixelSpan::new(48.0, 1_896.0);

    c.bench_function("linear_scale_round_trip", |b| {
        b.iter(|| {
            let px = scale
                .domain_to_pixel(black_box(0.6180), span)
                .expect("to pixel");
            let _ = scale.pixel_to_domain(px, span).expect("from pixel");
        })
    });
}

fn bench_sample_curves_all_steps(c: &mut Criterion) {
    c.bench_function("sample_curves_all_steps", |b| {
        b.iter(|| {
            for step in &DCA_STEPS {
                let total: f64 = sample_curves(SampleGrid::chart_default(), black_box(step.point))
                    .map(|sample| sample.convex_surrogate)
                    .sum();
                black_box(total);
            }
        })
    });
}

fn bench_build_frame_1080p(c: &mut Criterion) {
    let chart = LineChart::new(
        NullRenderer::default(),
        ChartConfig::dca_default(),
        Viewport::new(1920, 1080),
    )
    .expect("chart init");
    let controller = VisualizationController::new(
        chart,
        HeadlessNavigation::default(),
        ManualTickScheduler::default(),
    )
    .expect("controller init");

    c.bench_function("build_frame_1080p", |b| {
        b.iter(|| {
            let _ = black_box(controller.chart()).build_frame().expect("frame");
        })
    });
}

fn bench_full_animation_cycle(c: &mut Criterion) {
    c.bench_function("full_animation_cycle", |b| {
        b.iter(|| {
            let chart = LineChart::new(
                NullRenderer::default(),
                ChartConfig::dca_default(),
                Viewport::new(1280, 720),
            )
            .expect("chart init");
            let mut controller = VisualizationController::new(
                chart,
                HeadlessNavigation::default(),
                ManualTickScheduler::default(),
            )
            .expect("controller init");
            controller.start_animation().expect("animate");
            let _ = controller
                .advance_clock(Duration::from_secs(12))
                .expect("ticks");
            black_box(controller.state());
        })
    });
}

criterion_group!(
    benches,
    bench_linear_scale_round_trip,
    bench_sample_curves_all_steps,
    bench_build_frame_1080p,
    bench_full_animation_cycle
);
criterion_main!(benches);
