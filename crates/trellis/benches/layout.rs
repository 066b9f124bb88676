//! Layout and draw benchmarks for trellis.

use std::hint::black_box;

use criterion::{Criterion, criterion_group, criterion_main};
use trellis::{
    Core,
    layout::{InsetTier, Layout},
    metrics::DeviceMetrics,
    testing::{FixedFont, Harness, RecordingRenderer},
    widgets::{Label, LinearBox},
};

/// Build a scrolling list of labelled rows under the top of a core.
fn populate(c: &mut Core, rows: usize) {
    let list = c.add(LinearBox::vertical());
    for i in 0..rows {
        let row = c.add(
            LinearBox::horizontal()
                .with_layout(Layout::shrink().insets(InsetTier::Small, InsetTier::Small)),
        );
        let label = c.add(Label::new(&format!("row {i}")));
        let body = c.add(Label::new("a few words of body text"));
        c.attach(row, label).expect("Failed to attach label");
        c.attach(row, body).expect("Failed to attach body");
        c.attach(list, row).expect("Failed to attach row");
    }
    c.set_top(list).expect("Failed to set top");
}

/// Benchmark a full re-layout of a long list.
fn benchmark_relayout(c: &mut Criterion) {
    let mut core = Core::new(
        DeviceMetrics::new(800.0, 600.0),
        Box::new(FixedFont::new(16.0)),
    );
    populate(&mut core, 1000);
    c.bench_function("relayout_1000_rows", |b| {
        b.iter(|| {
            core.mark_dirty();
            core.update_layout().expect("Failed to lay out");
            black_box(core.top());
        });
    });
}

/// Benchmark drawing a laid-out list.
fn benchmark_draw(c: &mut Criterion) {
    let mut core = Core::new(
        DeviceMetrics::new(800.0, 600.0),
        Box::new(FixedFont::new(16.0)),
    );
    populate(&mut core, 1000);
    core.update_layout().expect("Failed to lay out");
    let mut renderer = RecordingRenderer::default();
    c.bench_function("draw_1000_rows", |b| {
        b.iter(|| {
            renderer.clear();
            core.draw(&mut renderer).expect("Failed to draw");
            black_box(renderer.draws().len());
        });
    });
}

/// Benchmark a drag followed by kinetic frames until rest.
fn benchmark_fling(c: &mut Criterion) {
    c.bench_function("fling_to_rest", |b| {
        b.iter(|| {
            let mut h = Harness::new(800.0, 600.0);
            populate(h.core(), 200);
            h.frame().expect("Failed to run frame");
            h.drag((400.0, 550.0), (400.0, 50.0), 10)
                .expect("Failed to drag");
            black_box(h.settle(500).expect("Failed to settle"));
        });
    });
}

criterion_group!(benches, benchmark_relayout, benchmark_draw, benchmark_fling);
criterion_main!(benches);
