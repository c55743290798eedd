use candle_chart::api::{LayoutConfig, layout_scene};
use candle_chart::core::{
    DEFAULT_MIN_SPACING_PX, DEFAULT_WIDTH_SCALE, OhlcPoint, OhlcSeries, ScaleMapper, ValueRange,
    Viewport, project_candles, select_price_ticks, select_time_ticks,
};
use criterion::{Criterion, criterion_group, criterion_main};
use std::hint::black_box;

fn generated_series(len: usize) -> OhlcSeries {
    let points = (0..len)
        .map(|i| {
            let t = i as f64;
            let base = 100.0 + t * 0.05;
            let open = base;
            let close = if i % 2 == 0 { base + 1.0 } else { base - 1.0 };
            let low = open.min(close) - 0.75;
            let high = open.max(close) + 0.75;
            OhlcPoint::new(t, open, high, low, close).expect("valid generated candle")
        })
        .collect();
    OhlcSeries::new(points).expect("valid generated series")
}

fn bench_tick_selection(c: &mut Criterion) {
    let range = ValueRange::new(93.4, 131.0, 5_000).expect("valid range");
    let mapper = ScaleMapper::new(range, Viewport::new(1920, 1080)).expect("valid mapper");

    c.bench_function("tick_selection_1080p", |b| {
        b.iter(|| {
            let _ = select_price_ticks(black_box(mapper), black_box(DEFAULT_MIN_SPACING_PX))
                .expect("price ticks");
            let _ = select_time_ticks(black_box(mapper), black_box(DEFAULT_MIN_SPACING_PX))
                .expect("time ticks");
        })
    });
}

fn bench_candle_projection_10k(c: &mut Criterion) {
    let series = generated_series(10_000);
    let range = ValueRange::from_points(&series.points).expect("valid range");
    let mapper = ScaleMapper::new(range, Viewport::new(1920, 1080)).expect("valid mapper");

    c.bench_function("candle_projection_10k", |b| {
        b.iter(|| {
            let _ = project_candles(
                black_box(&series.points),
                black_box(mapper),
                black_box(DEFAULT_WIDTH_SCALE),
            )
            .expect("projection should succeed");
        })
    });
}

fn bench_layout_scene_10k(c: &mut Criterion) {
    let series = generated_series(10_000);
    let config = LayoutConfig::default().with_axis_labels();

    c.bench_function("layout_scene_10k", |b| {
        b.iter(|| {
            let _ = layout_scene(
                black_box(&series),
                black_box(Viewport::new(1920, 1080)),
                black_box(&config),
            )
            .expect("layout should succeed");
        })
    });
}

criterion_group!(
    benches,
    bench_tick_selection,
    bench_candle_projection_10k,
    bench_layout_scene_10k
);
criterion_main!(benches);
