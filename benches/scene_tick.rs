//! Benchmarks for the per-frame CPU work.
//!
//! Run with: `cargo bench`

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use sparkfield::{Scene, SceneConfig};

fn bench_tick(c: &mut Criterion) {
    let mut group = c.benchmark_group("scene_tick");

    group.bench_function("field_only", |b| {
        let mut scene = Scene::with_viewport(SceneConfig::default().with_seed(1), 1280, 720);
        let mut t = 0.0f32;
        b.iter(|| {
            t += 1.0 / 60.0;
            scene.tick(black_box(t));
        })
    });

    group.bench_function("field_and_burst", |b| {
        let mut scene = Scene::with_viewport(SceneConfig::default().with_seed(2), 1280, 720);
        let mut t = 0.0f32;
        b.iter(|| {
            // Keep a burst alive for every measured frame.
            if scene.burst().is_none() {
                scene.trigger();
            }
            t += 1.0 / 60.0;
            scene.tick(black_box(t));
        })
    });

    group.finish();
}

fn bench_trigger(c: &mut Criterion) {
    let mut scene = Scene::with_viewport(SceneConfig::default().with_seed(3), 1280, 720);
    c.bench_function("burst_trigger", |b| b.iter(|| scene.trigger()));
}

criterion_group!(benches, bench_tick, bench_trigger);
criterion_main!(benches);
