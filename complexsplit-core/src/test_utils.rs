//! Shared test utilities for `complexsplit-core`.

use complexsplit_test_support::ci::property_test_profile::ProptestRunProfile;
use proptest::prelude::*;
use proptest::test_runner::Config as ProptestConfig;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use test_strategy::Arbitrary;

use crate::{complex::ComplexTable, union_find::Pair};

/// Largest universe generated by the property suites.
const MAX_UNIVERSE: usize = 64;
/// Largest number of complexes generated per table.
const MAX_COMPLEXES: usize = 48;

/// Builds a standard proptest configuration from the shared CI profile.
#[must_use]
pub(crate) fn suite_proptest_config(default_cases: u32) -> ProptestConfig {
    let profile = ProptestRunProfile::load(default_cases, false);
    ProptestConfig {
        cases: profile.cases(),
        fork: profile.fork(),
        ..ProptestConfig::default()
    }
}

/// How subunits are shared between generated complexes.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Arbitrary)]
pub(crate) enum TableShape {
    /// Subunits drawn uniformly from the whole universe.
    Scattered,
    /// Each complex reuses the previous complex's last cluster.
    Chained,
    /// Most complexes include one hub cluster.
    Hub,
    /// Single-subunit complexes only.
    Singletons,
}

/// A universe size and a pair list over it.
#[derive(Clone, Debug)]
pub(crate) struct PairFixture {
    pub universe: usize,
    pub pairs: Vec<Pair>,
}

/// Generates pair lists, including self-pairs and repeats.
pub(crate) fn pair_fixture_strategy() -> impl Strategy<Value = PairFixture> {
    (1..=MAX_UNIVERSE).prop_flat_map(|universe| {
        prop::collection::vec((0..universe, 0..universe), 0..(universe * 2)).prop_map(
            move |raw| PairFixture {
                universe,
                pairs: raw
                    .into_iter()
                    .map(|(left, right)| Pair::new(left, right))
                    .collect(),
            },
        )
    })
}

/// Generates complex tables across every [`TableShape`].
pub(crate) fn table_strategy() -> impl Strategy<Value = ComplexTable> {
    (any::<TableShape>(), any::<u64>()).prop_map(|(shape, seed)| {
        let mut rng = SmallRng::seed_from_u64(seed);
        generate_table(shape, &mut rng)
    })
}

/// Generates a table of the requested shape.
pub(crate) fn generate_table(shape: TableShape, rng: &mut SmallRng) -> ComplexTable {
    let universe = rng.gen_range(1..=MAX_UNIVERSE);
    let complexes = rng.gen_range(1..=MAX_COMPLEXES);
    let hub = rng.gen_range(0..universe);
    let mut previous = rng.gen_range(0..universe);
    let mut table = ComplexTable::new();

    for index in 0..complexes {
        let id = format!("C{index}");
        let subunits = match shape {
            TableShape::Scattered => random_subunits(rng, universe),
            TableShape::Chained => {
                let next = rng.gen_range(0..universe);
                let subunits = vec![previous, next];
                previous = next;
                subunits
            }
            TableShape::Hub => {
                let mut subunits = random_subunits(rng, universe);
                if rng.gen_bool(0.7) {
                    subunits.push(hub);
                }
                subunits
            }
            TableShape::Singletons => vec![rng.gen_range(0..universe)],
        };
        for cluster in subunits {
            table.push_subunit(&id, cluster);
        }
    }
    table
}

fn random_subunits(rng: &mut SmallRng, universe: usize) -> Vec<usize> {
    let count = rng.gen_range(1..=4);
    (0..count).map(|_| rng.gen_range(0..universe)).collect()
}

/// Builds a table whose components have exactly the given sizes.
///
/// Component `k` consists of `sizes[k]` single-subunit complexes named
/// `k-0`, `k-1`, ..., all on cluster `k`.
pub(crate) fn sized_components_table(sizes: &[usize]) -> ComplexTable {
    let mut table = ComplexTable::new();
    for (cluster, &size) in sizes.iter().enumerate() {
        for member in 0..size {
            table.push_subunit(&format!("{cluster}-{member}"), cluster);
        }
    }
    table
}
