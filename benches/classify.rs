use std::hint::black_box;
use std::time::Instant;

use criterion::{criterion_group, criterion_main, Criterion, Throughput};

use domset_registry::{
    classify, default_classification_map, legacy_grid, merge_into_existing, ClassificationId,
    ClassificationRegistry, ConfigurationStep, ConfigureOptions, DetectorSnapshot, GeometrySource,
    SimpleMultiplicityParams, TriggerConfigRegistry, TriggerSourceId,
};

fn seeded_triggers(n: i32) -> TriggerConfigRegistry {
    let mut triggers = TriggerConfigRegistry::new();
    for config_id in 0..n {
        triggers.define_smt(
            TriggerSourceId::InIce,
            config_id,
            SimpleMultiplicityParams {
                classification: ClassificationId::new(2),
                time_window: 5000.0,
                threshold: 8,
            },
            None,
        );
    }
    triggers
}

fn bench_classify_legacy_grid(c: &mut Criterion) {
    let registry = ClassificationRegistry::with_defaults();
    let grid = legacy_grid();

    let mut group = c.benchmark_group("classify");
    group.throughput(Throughput::Elements(grid.len() as u64));

    group.bench_function("legacy_grid_fresh", |b| {
        b.iter(|| black_box(classify(&registry, &grid, None)));
    });

    let base = default_classification_map();
    group.bench_function("legacy_grid_over_base", |b| {
        b.iter(|| black_box(classify(&registry, &grid, Some(&base))));
    });
    group.finish();
}

fn bench_merge(c: &mut Criterion) {
    let existing = seeded_triggers(64);
    let additions = seeded_triggers(128);

    let mut group = c.benchmark_group("merge");
    group.throughput(Throughput::Elements(1));
    group.bench_function("merge_128_into_64", |b| {
        b.iter_custom(|iters| {
            let start = Instant::now();
            for _ in 0..iters {
                black_box(merge_into_existing(&existing, &additions));
            }
            start.elapsed()
        });
    });
    group.finish();
}

fn bench_configure(c: &mut Criterion) {
    let grid = legacy_grid();
    let snapshot = DetectorSnapshot::new(seeded_triggers(8));
    let step = ConfigurationStep::with_extensions(ConfigureOptions::default());

    let mut group = c.benchmark_group("configure");
    group.throughput(Throughput::Elements(1));
    group.bench_function("apply_extensions", |b| {
        b.iter(|| black_box(step.apply(&snapshot, &grid).unwrap()));
    });
    group.finish();
}

criterion_group!(classification, bench_classify_legacy_grid, bench_merge, bench_configure);
criterion_main!(classification);
