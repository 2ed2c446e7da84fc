//! Benchmarks for flow measurement and arrangement.
//!
//! Run with: cargo bench -p flowscroll-layout

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use flowscroll_layout::{
    Extent, FlowConstraints, FlowItem, FlowMeasurer, Gravity, HorizontalAlign, ItemParams, Sides,
    Size, SizeSpec, VerticalAlign,
};
use std::hint::black_box;

/// `n` chips of varying width, with every 17th child filling its row and
/// every 5th filling its row's height.
fn make_items(n: usize) -> Vec<FlowItem<Size>> {
    (0..n)
        .map(|i| {
            let size = Size::new(40 + (i as i32 * 37) % 120, 24 + (i as i32 * 13) % 20);
            let mut params = ItemParams::default().with_margins(Sides::all(4));
            if i % 17 == 0 {
                params = params.with_width(Extent::Fill);
            }
            if i % 5 == 0 {
                params = params.with_height(Extent::Fill);
            }
            FlowItem::new(size).with_params(params)
        })
        .collect()
}

fn constraints() -> FlowConstraints {
    FlowConstraints::default()
        .with_padding(8)
        .with_gravity(Gravity::new(HorizontalAlign::Center, VerticalAlign::Center))
}

fn bench_measure_exact(c: &mut Criterion) {
    let mut group = c.benchmark_group("flow/measure_exact");
    let measurer = FlowMeasurer::new(constraints());

    for n in [10, 100, 1_000, 10_000] {
        let mut items = make_items(n);
        group.bench_with_input(BenchmarkId::from_parameter(n), &n, |b, _| {
            b.iter(|| {
                black_box(measurer.measure(
                    &mut items,
                    SizeSpec::Exact(black_box(720)),
                    SizeSpec::AtMost(1_280),
                ))
            })
        });
    }

    group.finish();
}

fn bench_measure_flexible(c: &mut Criterion) {
    let mut group = c.benchmark_group("flow/measure_flexible");
    let measurer = FlowMeasurer::new(constraints().with_width_limits(Some(200), Some(640)));

    for n in [10, 100, 1_000, 10_000] {
        let mut items = make_items(n);
        group.bench_with_input(BenchmarkId::from_parameter(n), &n, |b, _| {
            b.iter(|| {
                black_box(measurer.measure(
                    &mut items,
                    SizeSpec::AtMost(black_box(900)),
                    SizeSpec::AtMost(1_280),
                ))
            })
        });
    }

    group.finish();
}

fn bench_arrange(c: &mut Criterion) {
    let mut group = c.benchmark_group("flow/arrange");
    let measurer = FlowMeasurer::new(constraints());

    for n in [10, 100, 1_000, 10_000] {
        let mut items = make_items(n);
        let measurement = measurer.measure(&mut items, SizeSpec::Exact(720), SizeSpec::Unbounded);
        group.bench_with_input(BenchmarkId::from_parameter(n), &measurement, |b, m| {
            b.iter(|| black_box(m.arrange()))
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_measure_exact,
    bench_measure_flexible,
    bench_arrange
);
criterion_main!(benches);
