//! Greedy allocation of whole components to train, validation and test.
//!
//! Components are sorted by descending size (ties keep first-appearance
//! order) and handed out in that order: train takes components until it holds
//! at least `floor(total * train)` complexes, validation takes components until
//! it reaches its own target, and test receives everything left.
//!
//! Component sizes are discrete, so the requested fractions are only
//! approximated. Each split overshoots its target by less than the size of
//! the component that crossed the boundary. Exact allocation (bin packing) is
//! not attempted.

use std::{collections::HashMap, fmt, sync::Arc};

use tracing::debug;

use crate::{
    Result,
    components::{Component, ComponentAssignment, ComponentId},
    error::SplitError,
};

/// Relative tolerance for floating-point rounding in fraction arithmetic.
const FRACTION_EPSILON: f64 = 1e-9;

/// One of the three dataset partitions.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub enum Split {
    /// Training set.
    Train,
    /// Validation set.
    Validation,
    /// Held-out test set.
    Test,
}

impl Split {
    /// Every split, in allocation order.
    pub const ALL: [Self; 3] = [Self::Train, Self::Validation, Self::Test];

    /// Returns the lowercase label used in persisted memberships.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Train => "train",
            Self::Validation => "validation",
            Self::Test => "test",
        }
    }
}

impl fmt::Display for Split {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Requested split sizes as fractions of the complex count.
///
/// The test fraction is implied as `1 - train - valid`.
///
/// # Examples
/// ```
/// use complexsplit_core::SplitFractions;
///
/// let fractions = SplitFractions::new(0.8, 0.1)?;
/// assert!((fractions.test() - 0.1).abs() < 1e-12);
/// assert!((fractions.validation_share() - 0.5).abs() < 1e-12);
/// assert!(SplitFractions::new(0.9, 0.2).is_err());
/// # Ok::<(), complexsplit_core::SplitError>(())
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SplitFractions {
    train: f64,
    valid: f64,
}

impl Default for SplitFractions {
    fn default() -> Self {
        Self {
            train: 0.8,
            valid: 0.1,
        }
    }
}

impl SplitFractions {
    /// Validates and stores the requested fractions.
    ///
    /// # Errors
    /// Returns [`SplitError::InvalidConfig`] when either fraction is not
    /// finite or is negative, when `train` is not strictly between zero and
    /// one, or when `train + valid` exceeds one.
    ///
    /// The sum is compared against `1 + 1e-9` to absorb binary rounding in
    /// `train + valid`; an excess above that tolerance is rejected.
    pub fn new(train: f64, valid: f64) -> Result<Self> {
        let invalid = |reason| SplitError::InvalidConfig {
            reason,
            train,
            valid,
        };
        if !train.is_finite() || !valid.is_finite() {
            return Err(invalid("fractions must be finite"));
        }
        if train < 0.0 || valid < 0.0 {
            return Err(invalid("fractions must not be negative"));
        }
        if train == 0.0 || train >= 1.0 {
            return Err(invalid("train fraction must be strictly between 0 and 1"));
        }
        if train + valid > 1.0 + FRACTION_EPSILON {
            return Err(invalid("fractions must not sum to more than 1"));
        }
        Ok(Self { train, valid })
    }

    /// Requested training fraction.
    #[must_use]
    pub fn train(&self) -> f64 {
        self.train
    }

    /// Requested validation fraction.
    #[must_use]
    pub fn valid(&self) -> f64 {
        self.valid
    }

    /// Implied test fraction.
    #[must_use]
    pub fn test(&self) -> f64 {
        (1.0 - self.train - self.valid).max(0.0)
    }

    /// Share of the post-train remainder that validation should receive:
    /// `valid / (valid + test)`.
    #[must_use]
    pub fn validation_share(&self) -> f64 {
        (self.valid / (1.0 - self.train)).min(1.0)
    }
}

/// How the validation target is derived once train has been filled.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
pub enum ValidationTarget {
    /// `floor((total - train_count) * validation_share)`: validation and test
    /// split whatever train left behind in proportion to their fractions.
    #[default]
    RemainderShare,
    /// `floor(total * valid)`: validation aims at its fraction of the whole
    /// dataset regardless of how far train overshot.
    TotalShare,
}

impl ValidationTarget {
    /// Returns a short label suitable for logs and CLI output.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::RemainderShare => "remainder",
            Self::TotalShare => "total",
        }
    }
}

/// Split assigned to every complex, in table order.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct SplitMembership {
    entries: Vec<(Arc<str>, Split)>,
    lookup: HashMap<Arc<str>, Split>,
}

impl SplitMembership {
    /// Builds a membership from explicit `(complex, split)` entries, for
    /// instance one loaded from a previous run.
    ///
    /// Later entries for the same complex override earlier ones.
    pub fn from_entries<I, S>(entries: I) -> Self
    where
        I: IntoIterator<Item = (S, Split)>,
        S: Into<Arc<str>>,
    {
        let mut membership = Self::default();
        for (complex, split) in entries {
            membership.push(complex.into(), split);
        }
        membership
    }

    fn push(&mut self, complex: Arc<str>, split: Split) {
        if self.lookup.insert(Arc::clone(&complex), split).is_some() {
            self.entries.retain(|(existing, _)| *existing != complex);
        }
        self.entries.push((complex, split));
    }

    /// Returns the split of `complex`.
    #[must_use]
    pub fn get(&self, complex: &str) -> Option<Split> {
        self.lookup.get(complex).copied()
    }

    /// Iterates `(complex, split)` entries.
    pub fn iter(&self) -> impl Iterator<Item = (&str, Split)> + '_ {
        self.entries
            .iter()
            .map(|(complex, split)| (&**complex, *split))
    }

    /// Iterates the complexes placed in `split`.
    pub fn complexes_in(&self, split: Split) -> impl Iterator<Item = &str> + '_ {
        self.iter()
            .filter_map(move |(complex, placed)| (placed == split).then_some(complex))
    }

    /// Number of complexes placed in `split`.
    #[must_use]
    pub fn count(&self, split: Split) -> usize {
        self.complexes_in(split).count()
    }

    /// Number of complexes with a split.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns whether no complexes were placed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Complex and component counts for one split.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct SplitTally {
    /// Complexes placed in the split.
    pub complexes: usize,
    /// Components placed in the split.
    pub components: usize,
}

/// Outcome statistics of an allocation.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct SplitSummary {
    /// Total complexes allocated.
    pub total: usize,
    /// Complex count train had to reach.
    pub train_target: usize,
    /// Complex count validation had to reach.
    pub validation_target: usize,
    /// Train tally.
    pub train: SplitTally,
    /// Validation tally.
    pub validation: SplitTally,
    /// Test tally.
    pub test: SplitTally,
}

impl SplitSummary {
    /// Returns the tally of `split`.
    #[must_use]
    pub fn tally(&self, split: Split) -> SplitTally {
        match split {
            Split::Train => self.train,
            Split::Validation => self.validation,
            Split::Test => self.test,
        }
    }

    fn tally_mut(&mut self, split: Split) -> &mut SplitTally {
        match split {
            Split::Train => &mut self.train,
            Split::Validation => &mut self.validation,
            Split::Test => &mut self.test,
        }
    }
}

/// Membership and statistics produced by [`allocate_splits`].
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct SplitAllocation {
    membership: SplitMembership,
    summary: SplitSummary,
}

impl SplitAllocation {
    /// Returns the split of every complex.
    #[must_use]
    pub fn membership(&self) -> &SplitMembership {
        &self.membership
    }

    /// Returns the allocation statistics.
    #[must_use]
    pub fn summary(&self) -> &SplitSummary {
        &self.summary
    }

    /// Splits the allocation into its parts.
    #[must_use]
    pub fn into_parts(self) -> (SplitMembership, SplitSummary) {
        (self.membership, self.summary)
    }
}

/// `floor(count * fraction)`, with products that miss an integer by rounding
/// error alone counted as reaching it.
fn floor_share(count: usize, fraction: f64) -> usize {
    let exact = count as f64 * fraction;
    (exact + FRACTION_EPSILON * exact.max(1.0)).floor() as usize
}

/// Allocates whole components to splits.
///
/// `components` must be the grouping of `assignment` (see
/// [`ComponentAssignment::components`]). The membership lists complexes in
/// assignment order.
///
/// # Examples
/// ```
/// use complexsplit_core::{ComplexTable, Split, SplitterBuilder};
///
/// let table = ComplexTable::try_from_iter([
///     ("AB", vec![0, 1]),
///     ("BC", vec![1, 2]),
///     ("X", vec![10]),
/// ])?;
/// let outcome = SplitterBuilder::new().build()?.run(&table)?;
/// let membership = outcome.membership();
/// assert_eq!(membership.get("AB"), membership.get("BC"));
/// assert_eq!(membership.len(), 3);
/// # Ok::<(), complexsplit_core::SplitError>(())
/// ```
#[must_use]
pub fn allocate_splits(
    assignment: &ComponentAssignment,
    components: &[Component],
    fractions: SplitFractions,
    target: ValidationTarget,
) -> SplitAllocation {
    let total: usize = components.iter().map(Component::len).sum();
    let mut order: Vec<&Component> = components.iter().collect();
    order.sort_by(|left, right| right.len().cmp(&left.len()));
    let mut remaining = order.into_iter();

    let mut summary = SplitSummary {
        total,
        train_target: floor_share(total, fractions.train()),
        ..SplitSummary::default()
    };
    let mut placement: HashMap<ComponentId, Split> = HashMap::new();

    fill(
        &mut remaining,
        Split::Train,
        summary.train_target,
        &mut summary,
        &mut placement,
    );

    summary.validation_target = match target {
        ValidationTarget::RemainderShare => floor_share(
            total - summary.train.complexes,
            fractions.validation_share(),
        ),
        ValidationTarget::TotalShare => floor_share(total, fractions.valid()),
    };
    fill(
        &mut remaining,
        Split::Validation,
        summary.validation_target,
        &mut summary,
        &mut placement,
    );
    fill(
        &mut remaining,
        Split::Test,
        usize::MAX,
        &mut summary,
        &mut placement,
    );

    debug!(
        total,
        train = summary.train.complexes,
        validation = summary.validation.complexes,
        test = summary.test.complexes,
        "allocated components to splits"
    );

    let mut membership = SplitMembership::default();
    for (complex, component) in &assignment.entries {
        if let Some(&split) = placement.get(component) {
            membership.push(Arc::clone(complex), split);
        }
    }

    SplitAllocation {
        membership,
        summary,
    }
}

fn fill<'a>(
    remaining: &mut impl Iterator<Item = &'a Component>,
    split: Split,
    target: usize,
    summary: &mut SplitSummary,
    placement: &mut HashMap<ComponentId, Split>,
) {
    while summary.tally(split).complexes < target {
        let Some(component) = remaining.next() else {
            return;
        };
        placement.insert(component.id(), split);
        let tally = summary.tally_mut(split);
        tally.complexes += component.len();
        tally.components += 1;
    }
}

/// Checks that no component of `assignment` straddles two splits and that
/// every assigned complex has a split.
///
/// # Errors
/// Returns [`SplitError::MissingComplex`] for a complex without a split and
/// [`SplitError::Leakage`] for the first complex found in a different split
/// than the rest of its component.
///
/// # Examples
/// ```
/// use complexsplit_core::{
///     ComplexTable, Split, SplitError, SplitMembership, SplitterBuilder, verify_no_leakage,
/// };
///
/// let table = ComplexTable::try_from_iter([("AB", vec![0, 1]), ("BC", vec![1, 2])])?;
/// let outcome = SplitterBuilder::new().build()?.run(&table)?;
/// verify_no_leakage(outcome.assignment(), outcome.membership())?;
///
/// let leaky = SplitMembership::from_entries([("AB", Split::Train), ("BC", Split::Test)]);
/// let err = verify_no_leakage(outcome.assignment(), &leaky).unwrap_err();
/// assert!(matches!(err, SplitError::Leakage { .. }));
/// # Ok::<(), SplitError>(())
/// ```
pub fn verify_no_leakage(
    assignment: &ComponentAssignment,
    membership: &SplitMembership,
) -> Result<()> {
    let mut seen: HashMap<ComponentId, Split> = HashMap::new();
    for (complex, component) in &assignment.entries {
        let found = membership
            .get(complex)
            .ok_or_else(|| SplitError::MissingComplex {
                complex: Arc::clone(complex),
            })?;
        let expected = *seen.entry(*component).or_insert(found);
        if expected != found {
            return Err(SplitError::Leakage {
                component: *component,
                complex: Arc::clone(complex),
                expected,
                found,
            });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests;
