//! Seeded synthetic complex tables.
//!
//! Each complex draws its subunits from a narrow window of cluster ids, so
//! neighbouring complexes overlap and form components of varied size, much
//! like homologous chains shared across related structures.

use std::fmt;

use complexsplit_core::ComplexTable;
use rand::{Rng, SeedableRng, rngs::SmallRng};

use crate::error::BenchSetupError;

/// Shape of a generated table.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SyntheticTableConfig {
    /// Number of complexes.
    pub complexes: usize,
    /// Number of distinct cluster ids to draw from.
    pub universe: usize,
    /// Largest subunit count per complex.
    pub max_subunits: usize,
    /// Width of the cluster-id window each complex draws from.
    pub window: usize,
    /// RNG seed.
    pub seed: u64,
}

impl fmt::Display for SyntheticTableConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "complexes={},universe={}", self.complexes, self.universe)
    }
}

/// Generates a table for `config`.
///
/// # Errors
/// Returns [`BenchSetupError::ZeroValue`] when any size parameter is zero and
/// [`BenchSetupError::Split`] if the generated rows are rejected.
///
/// # Examples
/// ```
/// use complexsplit_benches::source::{SyntheticTableConfig, generate_table};
///
/// let table = generate_table(&SyntheticTableConfig {
///     complexes: 100,
///     universe: 400,
///     max_subunits: 4,
///     window: 16,
///     seed: 7,
/// })?;
/// assert_eq!(table.len(), 100);
/// assert!(table.universe_size() <= 400);
/// # Ok::<(), complexsplit_benches::error::BenchSetupError>(())
/// ```
pub fn generate_table(config: &SyntheticTableConfig) -> Result<ComplexTable, BenchSetupError> {
    for (value, context) in [
        (config.complexes, "complexes"),
        (config.universe, "universe"),
        (config.max_subunits, "max_subunits"),
        (config.window, "window"),
    ] {
        if value == 0 {
            return Err(BenchSetupError::ZeroValue { context });
        }
    }

    let mut rng = SmallRng::seed_from_u64(config.seed);
    let window = config.window.min(config.universe);
    let mut table = ComplexTable::new();
    for index in 0..config.complexes {
        let start = rng.gen_range(0..=config.universe - window);
        let count = rng.gen_range(1..=config.max_subunits);
        let subunits = (0..count)
            .map(|_| start + rng.gen_range(0..window))
            .collect();
        table.insert(format!("complex-{index}"), subunits)?;
    }
    Ok(table)
}

#[cfg(test)]
mod tests {
    use super::*;

    use rstest::rstest;

    fn config() -> SyntheticTableConfig {
        SyntheticTableConfig {
            complexes: 50,
            universe: 200,
            max_subunits: 3,
            window: 8,
            seed: 42,
        }
    }

    #[test]
    fn generation_is_reproducible() -> Result<(), BenchSetupError> {
        let first = generate_table(&config())?;
        let second = generate_table(&config())?;
        assert_eq!(first, second);
        Ok(())
    }

    #[test]
    fn subunits_stay_inside_the_universe() -> Result<(), BenchSetupError> {
        let table = generate_table(&config())?;
        assert_eq!(table.len(), 50);
        assert!(table.iter().all(|complex| {
            !complex.subunits().is_empty()
                && complex.subunits().len() <= 3
                && complex.subunits().iter().all(|&cluster| cluster < 200)
        }));
        Ok(())
    }

    #[rstest]
    #[case::complexes(SyntheticTableConfig { complexes: 0, ..config() }, "complexes")]
    #[case::universe(SyntheticTableConfig { universe: 0, ..config() }, "universe")]
    #[case::window(SyntheticTableConfig { window: 0, ..config() }, "window")]
    fn zero_sizes_are_rejected(#[case] config: SyntheticTableConfig, #[case] expected: &str) {
        match generate_table(&config) {
            Err(BenchSetupError::ZeroValue { context }) => assert_eq!(context, expected),
            other => panic!("unexpected result: {other:?}"),
        }
    }
}
