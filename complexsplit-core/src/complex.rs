//! Complexes and the table mapping each complex to its subunit cluster ids.

use std::{collections::HashMap, slice, sync::Arc};

use crate::{Result, error::SplitError};

/// A structural complex and the cluster ids of its subunits, in input order.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Complex {
    id: Arc<str>,
    subunits: Vec<usize>,
}

impl Complex {
    /// Returns the complex identifier.
    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    pub(crate) fn shared_id(&self) -> &Arc<str> {
        &self.id
    }

    /// Returns the subunit cluster ids in input order.
    #[must_use]
    pub fn subunits(&self) -> &[usize] {
        &self.subunits
    }

    /// Returns the first subunit's cluster id, which names the complex's
    /// component after all unions are applied.
    #[must_use]
    pub fn first_subunit(&self) -> Option<usize> {
        self.subunits.first().copied()
    }
}

/// Insertion-ordered mapping from complex identifier to subunit cluster ids.
///
/// Every complex holds at least one subunit and identifiers are unique. The
/// table is the only input the splitter needs besides its configuration.
///
/// # Examples
/// ```
/// use complexsplit_core::ComplexTable;
///
/// let table = ComplexTable::try_from_iter([
///     ("AB", vec![0, 1]),
///     ("BC", vec![1, 2]),
///     ("X", vec![10]),
/// ])?;
/// assert_eq!(table.len(), 3);
/// assert_eq!(table.universe_size(), 11);
/// # Ok::<(), complexsplit_core::SplitError>(())
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ComplexTable {
    complexes: Vec<Complex>,
    index: HashMap<Arc<str>, usize>,
}

impl ComplexTable {
    /// Creates an empty table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a table from `(id, subunits)` entries in iteration order.
    ///
    /// # Errors
    /// Returns [`SplitError::EmptyComplex`] for an entry without subunits and
    /// [`SplitError::DuplicateComplex`] when an identifier repeats.
    pub fn try_from_iter<I, S>(entries: I) -> Result<Self>
    where
        I: IntoIterator<Item = (S, Vec<usize>)>,
        S: Into<Arc<str>>,
    {
        let mut table = Self::new();
        for (id, subunits) in entries {
            table.insert(id, subunits)?;
        }
        Ok(table)
    }

    /// Adds a complex with its full subunit list.
    ///
    /// # Errors
    /// Returns [`SplitError::EmptyComplex`] when `subunits` is empty and
    /// [`SplitError::DuplicateComplex`] when `id` is already present.
    pub fn insert(&mut self, id: impl Into<Arc<str>>, subunits: Vec<usize>) -> Result<()> {
        let id = id.into();
        if subunits.is_empty() {
            return Err(SplitError::EmptyComplex { complex: id });
        }
        if self.index.contains_key(&id) {
            return Err(SplitError::DuplicateComplex { complex: id });
        }
        self.index.insert(Arc::clone(&id), self.complexes.len());
        self.complexes.push(Complex { id, subunits });
        Ok(())
    }

    /// Appends one subunit to `id`, creating the complex on first use.
    ///
    /// Row-oriented inputs list one subunit per row; this keeps rows of the
    /// same complex together in first-seen order.
    ///
    /// # Examples
    /// ```
    /// use complexsplit_core::ComplexTable;
    ///
    /// let mut table = ComplexTable::new();
    /// table.push_subunit("1abc", 4);
    /// table.push_subunit("2xyz", 9);
    /// table.push_subunit("1abc", 7);
    /// assert_eq!(table.get("1abc").map(|c| c.subunits().to_vec()), Some(vec![4, 7]));
    /// ```
    pub fn push_subunit(&mut self, id: &str, cluster: usize) {
        match self.index.get(id) {
            Some(&position) => self.complexes[position].subunits.push(cluster),
            None => {
                let id: Arc<str> = Arc::from(id);
                self.index.insert(Arc::clone(&id), self.complexes.len());
                self.complexes.push(Complex {
                    id,
                    subunits: vec![cluster],
                });
            }
        }
    }

    /// Looks up a complex by identifier.
    #[must_use]
    pub fn get(&self, id: &str) -> Option<&Complex> {
        self.index
            .get(id)
            .and_then(|&position| self.complexes.get(position))
    }

    /// Number of complexes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.complexes.len()
    }

    /// Returns whether the table holds no complexes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.complexes.is_empty()
    }

    /// Total number of subunits across all complexes.
    #[must_use]
    pub fn subunit_count(&self) -> usize {
        self.complexes.iter().map(|c| c.subunits.len()).sum()
    }

    /// Size of the cluster-id universe: `max(cluster id) + 1`, or `0` for an
    /// empty table.
    #[must_use]
    pub fn universe_size(&self) -> usize {
        self.complexes
            .iter()
            .flat_map(|c| c.subunits.iter().copied())
            .max()
            .map_or(0, |max| max.saturating_add(1))
    }

    /// Iterates complexes in insertion order.
    pub fn iter(&self) -> slice::Iter<'_, Complex> {
        self.complexes.iter()
    }
}

impl<'a> IntoIterator for &'a ComplexTable {
    type Item = &'a Complex;
    type IntoIter = slice::Iter<'a, Complex>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
