//! Criterion benchmarks for the [`DragController`] pointer-move hot path.
//!
//! Pointer-move events arrive at display refresh rate while a panel is being
//! dragged, so a single `move_to` must stay far below one frame budget.
//!
//! Run with:
//! ```bash
//! cargo bench --package panel-core --bench drag_bench
//! ```

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use panel_core::{
    ContainerSize, DragController, DragMode, LayoutState, PanelId, PointerPosition, SizeClass,
    DEFAULT_LAYOUT,
};

const CONTAINER: ContainerSize = ContainerSize::new(1280.0, 720.0);

// ── Fixture builders ──────────────────────────────────────────────────────────

/// Opens a drag on the products panel from the container centre.
fn open_drag(mode: DragMode) -> (DragController, LayoutState) {
    let mut layout = DEFAULT_LAYOUT;
    let mut drag = DragController::new();
    drag.start(&mut layout, PanelId::Products, mode, PointerPosition::new(640.0, 360.0))
        .expect("drag must start from idle");
    (drag, layout)
}

// ── Benchmarks: move_to ───────────────────────────────────────────────────────

/// Benchmarks a single [`DragController::move_to`] for every drag mode.
fn bench_move_to_by_mode(c: &mut Criterion) {
    let mut group = c.benchmark_group("move_to");

    for mode in DragMode::ALL {
        let (drag, mut layout) = open_drag(mode);
        group.bench_with_input(BenchmarkId::new("mode", mode.as_str()), &mode, |b, _| {
            b.iter(|| {
                drag.move_to(
                    black_box(&mut layout),
                    black_box(PointerPosition::new(600.0, 380.0)),
                    black_box(CONTAINER),
                )
            })
        });
    }

    group.finish();
}

/// Benchmarks a rejected corner resize (both axes fail their constraints).
fn bench_move_to_rejected(c: &mut Criterion) {
    let (drag, mut layout) = open_drag(DragMode::ResizeSe);
    let mut group = c.benchmark_group("move_to");

    group.bench_function("resize_se_rejected", |b| {
        b.iter(|| {
            drag.move_to(
                black_box(&mut layout),
                black_box(PointerPosition::new(4000.0, 4000.0)),
                black_box(CONTAINER),
            )
        })
    });

    group.finish();
}

// ── Benchmarks: full gesture ──────────────────────────────────────────────────

/// Benchmarks start + 60 moves + end, roughly one second of dragging.
fn bench_full_gesture(c: &mut Criterion) {
    c.bench_function("gesture_60_moves", |b| {
        b.iter(|| {
            let mut layout = DEFAULT_LAYOUT;
            let mut drag = DragController::new();
            drag.start(&mut layout, PanelId::CurrentBill, DragMode::Move, PointerPosition::new(0.0, 0.0))
                .expect("start");
            for i in 0..60 {
                let p = PointerPosition::new(i as f64 * 4.0, i as f64 * 2.0);
                let _ = drag.move_to(&mut layout, black_box(p), CONTAINER);
            }
            drag.end();
            layout
        })
    });
}

fn bench_size_class(c: &mut Criterion) {
    c.bench_function("size_class_classify", |b| {
        b.iter(|| SizeClass::classify(black_box(652.8), black_box(432.0)))
    });
}

criterion_group!(
    benches,
    bench_move_to_by_mode,
    bench_move_to_rejected,
    bench_full_gesture,
    bench_size_class,
);
criterion_main!(benches);
