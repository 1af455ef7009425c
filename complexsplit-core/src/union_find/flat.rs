//! Flat representative array with relabel-on-merge.

use crate::error::UnionFindError;

use super::{DisjointSets, identity_labels, signed_len};

/// Disjoint sets stored as one representative label per item.
///
/// `labels[i]` is always the representative of `i`, so `find` never walks a
/// chain. `union(p, q)` rewrites every label equal to `find(p)` to `find(q)`:
/// the second argument's representative always survives, which keeps the
/// surviving labels reproducible for a fixed union order.
///
/// # Examples
/// ```
/// use complexsplit_core::{DisjointSets, FlatDisjointSet};
///
/// let mut sets = FlatDisjointSet::new(4)?;
/// assert!(sets.union(0, 1)?);
/// assert_eq!(sets.find(0)?, 1);
/// assert_eq!(sets.component_count(), 3);
/// # Ok::<(), complexsplit_core::UnionFindError>(())
/// ```
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct FlatDisjointSet {
    labels: Vec<u32>,
    components: usize,
}

impl FlatDisjointSet {
    /// Builds `size` singleton components labelled `0..size`.
    ///
    /// # Errors
    /// Returns [`UnionFindError::InvalidSize`] when `size` exceeds
    /// [`super::MAX_UNIVERSE`] or the labels cannot be allocated.
    pub fn new(size: usize) -> Result<Self, UnionFindError> {
        Ok(Self {
            labels: identity_labels(size)?,
            components: size,
        })
    }

    /// Builds an engine from a signed size reported by an external source.
    ///
    /// # Errors
    /// Returns [`UnionFindError::InvalidSize`] when `size` is negative or
    /// exceeds [`super::MAX_UNIVERSE`].
    ///
    /// # Examples
    /// ```
    /// use complexsplit_core::{FlatDisjointSet, UnionFindError};
    ///
    /// let err = FlatDisjointSet::from_signed(-1).unwrap_err();
    /// assert_eq!(err, UnionFindError::InvalidSize { size: -1 });
    /// ```
    pub fn from_signed(size: i64) -> Result<Self, UnionFindError> {
        Self::new(signed_len(size)?)
    }

    fn label(&self, item: usize) -> Result<u32, UnionFindError> {
        self.labels
            .get(item)
            .copied()
            .ok_or(UnionFindError::OutOfRange {
                item,
                size: self.labels.len(),
            })
    }
}

impl DisjointSets for FlatDisjointSet {
    fn len(&self) -> usize {
        self.labels.len()
    }

    fn find(&self, item: usize) -> Result<usize, UnionFindError> {
        self.label(item).map(|label| label as usize)
    }

    fn union(&mut self, p: usize, q: usize) -> Result<bool, UnionFindError> {
        let from = self.label(p)?;
        let to = self.label(q)?;
        if from == to {
            return Ok(false);
        }
        for label in &mut self.labels {
            if *label == from {
                *label = to;
            }
        }
        self.components -= 1;
        Ok(true)
    }

    fn component_count(&self) -> usize {
        self.components
    }

    fn members(&self, item: usize) -> Result<Vec<usize>, UnionFindError> {
        let root = self.label(item)?;
        Ok(self
            .labels
            .iter()
            .enumerate()
            .filter_map(|(other, &label)| (label == root).then_some(other))
            .collect())
    }
}
