//! Converts complexes into the pairs that must share a component.
//!
//! Each complex `[c0, c1, ..., ck]` contributes the star `(c0, c1), (c0, c2),
//! ..., (c0, ck)`. A star is enough to connect every subunit of the complex;
//! pairs between non-first subunits would add no connectivity.

use crate::{complex::ComplexTable, union_find::Pair};

/// Emits the star pairs for one subunit list.
///
/// Single-subunit lists emit nothing. Repeated cluster ids are kept, so
/// `[750, 750]` yields the self-pair `(750, 750)`.
///
/// # Examples
/// ```
/// use complexsplit_core::{Pair, star_pairs};
///
/// let pairs: Vec<Pair> = star_pairs(&[3, 4, 5]).collect();
/// assert_eq!(pairs, vec![Pair::new(3, 4), Pair::new(3, 5)]);
/// ```
pub fn star_pairs(subunits: &[usize]) -> impl Iterator<Item = Pair> + '_ {
    subunits
        .split_first()
        .into_iter()
        .flat_map(|(&first, rest)| rest.iter().map(move |&other| Pair::new(first, other)))
}

/// Emits the star pairs of every complex in table order.
///
/// # Examples
/// ```
/// use complexsplit_core::{ComplexTable, Pair, complex_pairs};
///
/// let table = ComplexTable::try_from_iter([("AB", vec![0, 1]), ("X", vec![10])])?;
/// assert_eq!(complex_pairs(&table), vec![Pair::new(0, 1)]);
/// # Ok::<(), complexsplit_core::SplitError>(())
/// ```
#[must_use]
pub fn complex_pairs(table: &ComplexTable) -> Vec<Pair> {
    table
        .iter()
        .flat_map(|complex| star_pairs(complex.subunits()))
        .collect()
}
