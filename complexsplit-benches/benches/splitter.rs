//! End-to-end split benchmarks.
//!
//! Times `Splitter::run` (pairing, unions, component assignment and
//! allocation) for each engine.
#![expect(
    missing_docs,
    reason = "Criterion macros generate items without doc comments"
)]
use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};

use complexsplit_benches::{
    error::BenchSetupError,
    source::{SyntheticTableConfig, generate_table},
};
use complexsplit_core::{EngineStrategy, SplitterBuilder};

/// Seed used for all synthetic tables in this benchmark.
const SEED: u64 = 7;

/// Table sizes to benchmark.
const COMPLEX_COUNTS: &[usize] = &[1_000, 10_000];

fn splitter_run_impl(c: &mut Criterion) -> Result<(), BenchSetupError> {
    let mut group = c.benchmark_group("splitter_run");
    group.sample_size(20);

    for &complexes in COMPLEX_COUNTS {
        let config = SyntheticTableConfig {
            complexes,
            universe: complexes.saturating_mul(2),
            max_subunits: 4,
            window: 24,
            seed: SEED,
        };
        let table = generate_table(&config)?;

        for engine in [EngineStrategy::FlatRelabel, EngineStrategy::PathCompression] {
            let splitter = SplitterBuilder::new().with_engine(engine).build()?;
            group.bench_with_input(
                BenchmarkId::new(engine.as_str(), &config),
                &table,
                |b, table| {
                    b.iter(|| splitter.run(table));
                },
            );
        }
    }

    group.finish();
    Ok(())
}

fn splitter_run(c: &mut Criterion) {
    if let Err(err) = splitter_run_impl(c) {
        panic!("splitter_run benchmark setup failed: {err}");
    }
}

criterion_group!(benches, splitter_run);
criterion_main!(benches);
