//! Disjoint-set (union-find) engines over a fixed universe of cluster ids.
//!
//! Two engines implement [`DisjointSets`]:
//!
//! - [`FlatDisjointSet`] stores the representative of every item directly, so
//!   `find` is a single lookup and `union` relabels the losing component with
//!   a full scan (`O(N)` per merge).
//! - [`CompressedDisjointSet`] uses union by rank with path compression,
//!   giving amortised near-constant merges for large universes.
//!
//! Both produce the same partition for the same sequence of unions. Only the
//! representative labels can differ, so callers must treat representatives as
//! opaque component identifiers.

mod compressed;
mod flat;

use crate::error::UnionFindError;

pub use self::{compressed::CompressedDisjointSet, flat::FlatDisjointSet};

/// Largest universe an engine can be built over.
///
/// Cluster ids are expected to be dense, so a universe past 2^28 items
/// (1 GiB of labels) points at a stray id rather than a real clustering.
/// The bound also keeps every item inside the `u32` label space.
pub const MAX_UNIVERSE: usize = 1 << 28;

/// Two items that must end up in the same component.
///
/// # Examples
/// ```
/// use complexsplit_core::Pair;
///
/// let pair = Pair::new(750, 751);
/// assert_eq!((pair.left(), pair.right()), (750, 751));
/// ```
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct Pair {
    left: usize,
    right: usize,
}

impl Pair {
    /// Creates a pair asserting that `left` and `right` are connected.
    #[rustfmt::skip]
    #[must_use]
    pub const fn new(left: usize, right: usize) -> Self { Self { left, right } }

    /// Returns the first item of the pair.
    #[rustfmt::skip]
    #[must_use]
    pub const fn left(self) -> usize { self.left }

    /// Returns the second item of the pair, whose representative survives a
    /// flat-engine merge.
    #[rustfmt::skip]
    #[must_use]
    pub const fn right(self) -> usize { self.right }
}

/// Selects which disjoint-set engine a [`crate::Splitter`] builds.
///
/// # Examples
/// ```
/// use complexsplit_core::EngineStrategy;
///
/// assert_eq!(EngineStrategy::default(), EngineStrategy::FlatRelabel);
/// ```
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
pub enum EngineStrategy {
    /// Direct representative array relabelled on every merge.
    #[default]
    FlatRelabel,
    /// Union by rank with path compression.
    PathCompression,
}

impl EngineStrategy {
    /// Returns a short label suitable for logs and CLI output.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::FlatRelabel => "flat",
            Self::PathCompression => "compressed",
        }
    }
}

/// Partition of `0..len()` maintained under union operations.
///
/// `find` never mutates the structure, so a finished engine can be shared
/// across threads for read-only lookups. `union` requires exclusive access and
/// must be applied in one deterministic order.
pub trait DisjointSets {
    /// Number of items in the universe.
    fn len(&self) -> usize;

    /// Returns whether the universe is empty.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns the current representative of `item`.
    ///
    /// # Errors
    /// Returns [`UnionFindError::OutOfRange`] when `item >= len()`.
    fn find(&self, item: usize) -> Result<usize, UnionFindError>;

    /// Merges the components containing `p` and `q`.
    ///
    /// Returns `true` when two distinct components were merged and `false`
    /// when they were already connected.
    ///
    /// # Errors
    /// Returns [`UnionFindError::OutOfRange`] when either item is outside the
    /// universe. The structure is left unchanged in that case.
    fn union(&mut self, p: usize, q: usize) -> Result<bool, UnionFindError>;

    /// Number of distinct components.
    fn component_count(&self) -> usize;

    /// Returns whether `p` and `q` share a component.
    ///
    /// # Errors
    /// Returns [`UnionFindError::OutOfRange`] when either item is outside the
    /// universe.
    fn connected(&self, p: usize, q: usize) -> Result<bool, UnionFindError> {
        Ok(self.find(p)? == self.find(q)?)
    }

    /// Lists every item in the same component as `item`, in ascending order.
    ///
    /// # Errors
    /// Returns [`UnionFindError::OutOfRange`] when `item` is outside the
    /// universe.
    fn members(&self, item: usize) -> Result<Vec<usize>, UnionFindError> {
        let root = self.find(item)?;
        let mut members = Vec::new();
        for other in 0..self.len() {
            if self.find(other)? == root {
                members.push(other);
            }
        }
        Ok(members)
    }

    /// Applies `union` to every pair in input order and returns how many
    /// merges took place.
    ///
    /// # Errors
    /// Stops at the first out-of-range pair and returns its error. Unions
    /// applied before that pair are kept.
    fn union_all(&mut self, pairs: &[Pair]) -> Result<usize, UnionFindError> {
        let mut merges = 0;
        for pair in pairs {
            if self.union(pair.left(), pair.right())? {
                merges += 1;
            }
        }
        Ok(merges)
    }
}

/// Converts a signed universe size, rejecting negative values.
pub(crate) fn signed_len(size: i64) -> Result<usize, UnionFindError> {
    usize::try_from(size).map_err(|_| UnionFindError::InvalidSize { size })
}

fn invalid_size(size: usize) -> UnionFindError {
    UnionFindError::InvalidSize {
        size: i64::try_from(size).unwrap_or(i64::MAX),
    }
}

/// Allocates the identity labelling `0..size`.
///
/// Sizes above [`MAX_UNIVERSE`] and allocations the system refuses are both
/// reported as [`UnionFindError::InvalidSize`].
pub(crate) fn identity_labels(size: usize) -> Result<Vec<u32>, UnionFindError> {
    if size > MAX_UNIVERSE {
        return Err(invalid_size(size));
    }
    let upper = u32::try_from(size).map_err(|_| invalid_size(size))?;
    let mut labels = Vec::new();
    labels
        .try_reserve_exact(size)
        .map_err(|_| invalid_size(size))?;
    labels.extend(0..upper);
    Ok(labels)
}

/// Allocates `size` copies of `value`, failing like [`identity_labels`].
pub(crate) fn filled<T: Clone>(size: usize, value: T) -> Result<Vec<T>, UnionFindError> {
    let mut items = Vec::new();
    items
        .try_reserve_exact(size)
        .map_err(|_| invalid_size(size))?;
    items.resize(size, value);
    Ok(items)
}
