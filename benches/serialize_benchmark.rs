//! Performance benchmarks for serialization and change detection on large drafts.
//!
//! Run with: cargo bench --bench serialize_benchmark

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use criteria_composer::{
    serialize, DimensionSelections, EngineConfig, FilterContext, FilterEngine, FilterGroup,
    GroupId, NoOpSink, NumericFilter,
};
use std::hint::black_box;

/// Generate a draft with `count` groups, every third one left blank.
fn generate_draft(count: usize) -> Vec<FilterGroup> {
    (0..count)
        .map(|i| {
            let group = FilterGroup::new(GroupId::new(format!("g-{i}")), format!("Group {i}"));
            if i % 3 == 0 {
                return group;
            }
            group
                .with_boolean(format!("flag_{}", i % 7), i % 2 == 0)
                .with_boolean("recycled", true)
                .with_numeric(
                    format!("metric_{}", i % 5),
                    NumericFilter::range(Some(i as f64), Some((i * 10) as f64)),
                )
                .with_numeric("empty", NumericFilter::equals(None))
        })
        .collect()
}

fn bench_serialize(c: &mut Criterion) {
    let context = FilterContext::default();
    let selections = DimensionSelections::for_context(&context);
    let mut group = c.benchmark_group("serialize");

    for size in [10, 100, 1000] {
        let draft = generate_draft(size);
        group.bench_with_input(BenchmarkId::from_parameter(size), &draft, |b, draft| {
            b.iter(|| black_box(serialize(black_box(draft.iter()), &selections, &context)));
        });
    }
    group.finish();
}

fn bench_unchanged_edit(c: &mut Criterion) {
    let mut group = c.benchmark_group("unchanged_edit");

    for size in [10, 100, 1000] {
        let mut engine = FilterEngine::new(generate_draft(size), &EngineConfig::default(), NoOpSink);
        let id = GroupId::new("g-1");
        group.bench_function(BenchmarkId::from_parameter(size), |b| {
            b.iter(|| {
                // Re-setting an existing value must be detected as no change.
                let _ = black_box(engine.set_boolean_filter(&id, "recycled", Some(true)));
            })
        });
    }
    group.finish();
}

fn bench_echo(c: &mut Criterion) {
    let draft = generate_draft(500);
    let mut engine = FilterEngine::new(Vec::new(), &EngineConfig::default(), NoOpSink);
    engine.sync_external_groups(draft);
    let id = GroupId::new("g-1");
    let _ = engine.set_boolean_filter(&id, "recycled", Some(false));
    let echoed = engine.criteria().groups;

    c.bench_function("echo_500_groups", |b| {
        b.iter(|| black_box(engine.sync_external_groups(black_box(echoed.clone()))))
    });
}

criterion_group!(benches, bench_serialize, bench_unchanged_edit, bench_echo);
criterion_main!(benches);
