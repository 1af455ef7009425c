//! Leakage-free dataset splitting for complexes that share subunits.
//!
//! Provides the [`Splitter`] entry point, which wires the pair adapter, the
//! configured disjoint-set engine, the component assigner and the split
//! allocator into one batch run.

use tracing::{Span, debug, field, info, instrument, warn};

use crate::{
    Result,
    allocator::{
        SplitAllocation, SplitFractions, SplitMembership, SplitSummary, ValidationTarget,
        allocate_splits,
    },
    complex::ComplexTable,
    components::{Component, ComponentAssignment, assign_components},
    pairs::complex_pairs,
    union_find::{CompressedDisjointSet, DisjointSets, EngineStrategy, FlatDisjointSet},
};

/// Everything a split run produces.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct SplitOutcome {
    assignment: ComponentAssignment,
    components: Vec<Component>,
    allocation: SplitAllocation,
}

impl SplitOutcome {
    /// Component label of every complex, in table order.
    #[must_use]
    pub fn assignment(&self) -> &ComponentAssignment {
        &self.assignment
    }

    /// Components ordered by first appearance in the table.
    #[must_use]
    pub fn components(&self) -> &[Component] {
        &self.components
    }

    /// Split of every complex, in table order.
    #[must_use]
    pub fn membership(&self) -> &SplitMembership {
        self.allocation.membership()
    }

    /// Allocation statistics.
    #[must_use]
    pub fn summary(&self) -> &SplitSummary {
        self.allocation.summary()
    }
}

/// Entry point for partitioning complexes into train, validation and test.
///
/// Each call to [`Splitter::run`] builds a fresh engine sized to the table,
/// so a `Splitter` carries no state between runs.
///
/// # Examples
/// ```
/// use complexsplit_core::{ComplexTable, SplitterBuilder};
///
/// let table = ComplexTable::try_from_iter([
///     ("AB", vec![0, 1]),
///     ("BC", vec![1, 2]),
///     ("CD", vec![2, 3]),
///     ("X", vec![10]),
/// ])?;
/// let outcome = SplitterBuilder::new().build()?.run(&table)?;
/// assert_eq!(outcome.components().len(), 2);
/// assert_eq!(outcome.membership().len(), 4);
/// # Ok::<(), complexsplit_core::SplitError>(())
/// ```
#[derive(Debug, Clone)]
pub struct Splitter {
    fractions: SplitFractions,
    engine: EngineStrategy,
    validation_target: ValidationTarget,
}

impl Splitter {
    pub(crate) fn new(
        fractions: SplitFractions,
        engine: EngineStrategy,
        validation_target: ValidationTarget,
    ) -> Self {
        Self {
            fractions,
            engine,
            validation_target,
        }
    }

    /// Returns the validated split fractions.
    #[must_use]
    pub fn fractions(&self) -> SplitFractions {
        self.fractions
    }

    /// Returns the configured engine.
    #[must_use]
    pub fn engine(&self) -> EngineStrategy {
        self.engine
    }

    /// Returns the validation target rule.
    #[must_use]
    pub fn validation_target(&self) -> ValidationTarget {
        self.validation_target
    }

    /// Resolves the component of every complex without allocating splits.
    ///
    /// # Errors
    /// Returns [`crate::SplitError::UnionFind`] when the universe cannot be
    /// built and [`crate::SplitError::InconsistentComponent`] when a complex's
    /// subunits fail to resolve to one component.
    #[instrument(
        name = "splitter.assign",
        err,
        skip(self, table),
        fields(complexes = table.len(), universe = field::Empty, engine = self.engine.as_str()),
    )]
    pub fn assign(&self, table: &ComplexTable) -> Result<ComponentAssignment> {
        let universe = table.universe_size();
        Span::current().record("universe", universe);
        match self.engine {
            EngineStrategy::FlatRelabel => connect(FlatDisjointSet::new(universe)?, table),
            EngineStrategy::PathCompression => {
                connect(CompressedDisjointSet::new(universe)?, table)
            }
        }
    }

    /// Runs the full pipeline: pairs, unions, component assignment and split
    /// allocation.
    ///
    /// An empty table yields an empty outcome.
    ///
    /// # Errors
    /// Propagates the errors of [`Splitter::assign`].
    #[instrument(
        name = "splitter.run",
        err,
        skip(self, table),
        fields(
            complexes = table.len(),
            train = self.fractions.train(),
            valid = self.fractions.valid(),
            validation_target = self.validation_target.as_str(),
        ),
    )]
    pub fn run(&self, table: &ComplexTable) -> Result<SplitOutcome> {
        if table.is_empty() {
            warn!("complex table is empty, returning an empty outcome");
            return Ok(SplitOutcome::default());
        }

        let assignment = self.assign(table)?;
        let components = assignment.components();
        let allocation = allocate_splits(
            &assignment,
            &components,
            self.fractions,
            self.validation_target,
        );

        let summary = allocation.summary();
        info!(
            components = components.len(),
            train = summary.train.complexes,
            validation = summary.validation.complexes,
            test = summary.test.complexes,
            "split completed"
        );
        Ok(SplitOutcome {
            assignment,
            components,
            allocation,
        })
    }
}

fn connect<E: DisjointSets>(mut engine: E, table: &ComplexTable) -> Result<ComponentAssignment> {
    let pairs = complex_pairs(table);
    let merges = engine.union_all(&pairs)?;
    debug!(
        pairs = pairs.len(),
        merges,
        components = engine.component_count(),
        "applied subunit unions"
    );
    assign_components(&engine, table)
}
