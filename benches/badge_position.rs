//! Badge placement benchmark suite.
//!
//! Benchmarks the positioning engine across its fallback cascade:
//! - best case: the top candidate fits immediately
//! - each deeper fallback side
//! - worst case: nothing fits and both axes clamp
//!
//! Run with: cargo bench --bench badge_position
//! Results saved to: target/criterion/

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};

use dom_monitor::badge::position;
use dom_monitor::{Rect, Size, Viewport};

// ============================================================================
// Scenarios
// ============================================================================

const BADGE: Size = Size {
    width: 96.0,
    height: 22.0,
};

fn viewport() -> Viewport {
    Viewport::new(1280.0, 720.0)
}

/// (name, target rect) pairs walking the fallback cascade.
fn scenarios() -> Vec<(&'static str, Rect)> {
    vec![
        ("top", Rect::new(100.0, 100.0, 200.0, 50.0)),
        ("bottom", Rect::new(100.0, 20.0, 200.0, 50.0)),
        ("left", Rect::new(200.0, 20.0, 200.0, 680.0)),
        ("right", Rect::new(4.0, 20.0, 1100.0, 690.0)),
        ("constrained", Rect::new(4.0, 20.0, 1272.0, 690.0)),
    ]
}

// ============================================================================
// Benchmark: Single Placement
// ============================================================================

fn bench_placement(c: &mut Criterion) {
    let mut group = c.benchmark_group("badge_position");
    let viewport = viewport();

    for (name, target) in scenarios() {
        group.bench_with_input(BenchmarkId::new("place", name), &target, |b, &target| {
            b.iter(|| position(black_box(target), black_box(BADGE), black_box(viewport)));
        });
    }

    group.finish();
}

// ============================================================================
// Benchmark: Reposition Sweep
// ============================================================================

/// Simulates a scroll: one badge repositioned against a target sweeping
/// through the viewport.
fn bench_scroll_sweep(c: &mut Criterion) {
    let viewport = viewport();

    c.bench_function("badge_position/scroll_sweep", |b| {
        b.iter(|| {
            for step in 0..120 {
                let target = Rect::new(100.0, -60.0 + step as f64 * 8.0, 200.0, 50.0);
                black_box(position(target, BADGE, viewport));
            }
        });
    });
}

criterion_group!(benches, bench_placement, bench_scroll_sweep);
criterion_main!(benches);
