//! Union by rank with path compression for large cluster universes.

use crate::error::UnionFindError;

use super::{DisjointSets, filled, identity_labels, signed_len};

/// Parent-pointer forest with union by rank and path compression.
///
/// Compression only happens inside [`DisjointSets::union`]; `find` walks the
/// parent chain without rewriting it, so lookups stay side-effect free.
///
/// # Examples
/// ```
/// use complexsplit_core::{CompressedDisjointSet, DisjointSets};
///
/// let mut sets = CompressedDisjointSet::new(10)?;
/// sets.union(0, 1)?;
/// sets.union(1, 2)?;
/// assert!(sets.connected(0, 2)?);
/// assert_eq!(sets.component_count(), 8);
/// # Ok::<(), complexsplit_core::UnionFindError>(())
/// ```
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct CompressedDisjointSet {
    parent: Vec<u32>,
    rank: Vec<u8>,
    components: usize,
}

impl CompressedDisjointSet {
    /// Builds `size` singleton components.
    ///
    /// # Errors
    /// Returns [`UnionFindError::InvalidSize`] when `size` exceeds
    /// [`super::MAX_UNIVERSE`] or the forest cannot be allocated.
    pub fn new(size: usize) -> Result<Self, UnionFindError> {
        Ok(Self {
            parent: identity_labels(size)?,
            rank: filled(size, 0)?,
            components: size,
        })
    }

    /// Builds an engine from a signed size reported by an external source.
    ///
    /// # Errors
    /// Returns [`UnionFindError::InvalidSize`] when `size` is negative or
    /// exceeds [`super::MAX_UNIVERSE`].
    pub fn from_signed(size: i64) -> Result<Self, UnionFindError> {
        Self::new(signed_len(size)?)
    }

    fn check(&self, item: usize) -> Result<usize, UnionFindError> {
        if item < self.parent.len() {
            Ok(item)
        } else {
            Err(UnionFindError::OutOfRange {
                item,
                size: self.parent.len(),
            })
        }
    }

    fn root(&self, mut node: usize) -> usize {
        while self.parent[node] as usize != node {
            node = self.parent[node] as usize;
        }
        node
    }

    fn compress(&mut self, mut node: usize) -> usize {
        let root = self.root(node);
        while self.parent[node] as usize != node {
            let next = self.parent[node] as usize;
            self.parent[node] = root as u32;
            node = next;
        }
        root
    }
}

impl DisjointSets for CompressedDisjointSet {
    fn len(&self) -> usize {
        self.parent.len()
    }

    fn find(&self, item: usize) -> Result<usize, UnionFindError> {
        Ok(self.root(self.check(item)?))
    }

    fn union(&mut self, p: usize, q: usize) -> Result<bool, UnionFindError> {
        let p = self.check(p)?;
        let q = self.check(q)?;
        let left = self.compress(p);
        let right = self.compress(q);
        if left == right {
            return Ok(false);
        }

        // Equal ranks keep q's root, matching the flat engine's tie-break.
        let (root, child) = if self.rank[left] > self.rank[right] {
            (left, right)
        } else {
            (right, left)
        };
        self.parent[child] = root as u32;
        if self.rank[left] == self.rank[right] {
            self.rank[root] = self.rank[root].saturating_add(1);
        }
        self.components -= 1;
        Ok(true)
    }

    fn component_count(&self) -> usize {
        self.components
    }
}
