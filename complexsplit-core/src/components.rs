//! Maps complexes to the connected component of their subunit clusters.

use std::{collections::HashMap, fmt, sync::Arc};

use crate::{Result, complex::ComplexTable, error::SplitError, union_find::DisjointSets};

/// Identifier of a connected component: the engine representative shared by
/// every subunit cluster of its complexes.
///
/// The numeric value depends on the engine and on union order, so use it as
/// an opaque group label.
///
/// # Examples
/// ```
/// use complexsplit_core::ComponentId;
///
/// let id = ComponentId::new(3);
/// assert_eq!(id.get(), 3);
/// assert_eq!(id.to_string(), "3");
/// ```
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct ComponentId(usize);

impl ComponentId {
    /// Creates a component identifier.
    #[rustfmt::skip]
    #[must_use]
    pub const fn new(id: usize) -> Self { Self(id) }

    /// Returns the underlying representative.
    #[rustfmt::skip]
    #[must_use]
    pub const fn get(self) -> usize { self.0 }
}

impl fmt::Display for ComponentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A maximal set of complexes connected through shared subunit clusters.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Component {
    id: ComponentId,
    complexes: Vec<Arc<str>>,
}

impl Component {
    /// Returns the component identifier.
    #[must_use]
    pub fn id(&self) -> ComponentId {
        self.id
    }

    /// Returns the member complexes in table order.
    #[must_use]
    pub fn complexes(&self) -> &[Arc<str>] {
        &self.complexes
    }

    /// Number of complexes in the component.
    #[must_use]
    pub fn len(&self) -> usize {
        self.complexes.len()
    }

    /// Returns whether the component has no complexes. Components built by
    /// [`ComponentAssignment::components`] are never empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.complexes.is_empty()
    }
}

/// Component label for every complex, in table order.
///
/// This is the "group label" consumed by grouped cross-validation tools.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct ComponentAssignment {
    pub(crate) entries: Vec<(Arc<str>, ComponentId)>,
    lookup: HashMap<Arc<str>, ComponentId>,
}

impl ComponentAssignment {
    fn push(&mut self, complex: Arc<str>, component: ComponentId) {
        self.lookup.insert(Arc::clone(&complex), component);
        self.entries.push((complex, component));
    }

    /// Returns the component of `complex`, if it was assigned.
    #[must_use]
    pub fn get(&self, complex: &str) -> Option<ComponentId> {
        self.lookup.get(complex).copied()
    }

    /// Iterates `(complex, component)` entries in table order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, ComponentId)> + '_ {
        self.entries
            .iter()
            .map(|(complex, component)| (&**complex, *component))
    }

    /// Number of assigned complexes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns whether no complexes were assigned.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Groups complexes by component.
    ///
    /// Components are ordered by the first table position of any member;
    /// members keep table order.
    #[must_use]
    pub fn components(&self) -> Vec<Component> {
        let mut position: HashMap<ComponentId, usize> = HashMap::new();
        let mut components: Vec<Component> = Vec::new();
        for (complex, id) in &self.entries {
            let slot = *position.entry(*id).or_insert_with(|| {
                components.push(Component {
                    id: *id,
                    complexes: Vec::new(),
                });
                components.len() - 1
            });
            components[slot].complexes.push(Arc::clone(complex));
        }
        components
    }
}

/// Resolves every complex to the representative of its first subunit.
///
/// All unions must already be applied to `engine`. Every remaining subunit is
/// checked against the first one, so a complex whose subunits ended up in
/// different components is reported instead of being silently relabelled.
///
/// # Errors
/// Returns [`SplitError::UnionFind`] when a subunit lies outside the engine's
/// universe, [`SplitError::EmptyComplex`] for a complex without subunits, and
/// [`SplitError::InconsistentComponent`] when subunits disagree.
///
/// # Examples
/// ```
/// use complexsplit_core::{
///     ComplexTable, DisjointSets, FlatDisjointSet, assign_components, complex_pairs,
/// };
///
/// let table = ComplexTable::try_from_iter([("AB", vec![0, 1]), ("BC", vec![1, 2])])?;
/// let mut engine = FlatDisjointSet::new(table.universe_size())?;
/// engine.union_all(&complex_pairs(&table))?;
/// let assignment = assign_components(&engine, &table)?;
/// assert_eq!(assignment.get("AB"), assignment.get("BC"));
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub fn assign_components<E>(engine: &E, table: &ComplexTable) -> Result<ComponentAssignment>
where
    E: DisjointSets + ?Sized,
{
    let mut assignment = ComponentAssignment::default();
    for complex in table {
        let first_cluster = complex
            .first_subunit()
            .ok_or_else(|| SplitError::EmptyComplex {
                complex: Arc::clone(complex.shared_id()),
            })?;
        let first_representative = engine.find(first_cluster)?;
        for &cluster in complex.subunits() {
            let representative = engine.find(cluster)?;
            if representative != first_representative {
                return Err(SplitError::InconsistentComponent {
                    complex: Arc::clone(complex.shared_id()),
                    first_cluster,
                    first_representative,
                    cluster,
                    representative,
                });
            }
        }
        assignment.push(
            Arc::clone(complex.shared_id()),
            ComponentId::new(first_representative),
        );
    }
    Ok(assignment)
}
