//! Error types for the complexsplit core library.
//!
//! Every failure in this crate is structural: a bad configuration, an index
//! outside the engine's universe, or a broken connectivity invariant. None are
//! retried, and each variant carries the offending identifiers.

use std::{fmt, sync::Arc};

use thiserror::Error;

use crate::{allocator::Split, components::ComponentId};

macro_rules! define_error_codes {
    (
        $(#[$enum_meta:meta])*
        enum $CodeTy:ident for $ErrTy:ident {
            $(
                $(#[$variant_meta:meta])*
                $CodeVariant:ident => $ErrVariant:ident $( { $($pattern:tt)* } )? => $code:expr
            ),+ $(,)?
        }
    ) => {
        $(#[$enum_meta])*
        #[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
        #[non_exhaustive]
        pub enum $CodeTy {
            $(
                $(#[$variant_meta])*
                $CodeVariant,
            )+
        }

        impl $CodeTy {
            /// Return the stable machine-readable representation of this error code.
            pub const fn as_str(self) -> &'static str {
                match self {
                    $(Self::$CodeVariant => $code,)+
                }
            }
        }

        impl fmt::Display for $CodeTy {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl $ErrTy {
            #[doc = concat!(
                "Retrieve the stable [`",
                stringify!($CodeTy),
                "`] for this error."
            )]
            pub const fn code(&self) -> $CodeTy {
                match self {
                    $(Self::$ErrVariant $( { $($pattern)* } )? => $CodeTy::$CodeVariant,)+
                }
            }
        }
    };
}

/// An error produced by the disjoint-set engines in [`crate::union_find`].
#[non_exhaustive]
#[derive(Clone, Debug, Eq, Error, PartialEq)]
pub enum UnionFindError {
    /// The requested universe size was negative, above
    /// [`crate::MAX_UNIVERSE`], or could not be allocated.
    #[error(
        "universe size {size} must be between 0 and {max} and fit in memory",
        max = crate::union_find::MAX_UNIVERSE
    )]
    InvalidSize {
        /// The rejected universe size.
        size: i64,
    },
    /// An item fell outside `[0, size)`.
    #[error("item {item} is outside the universe of {size} items")]
    OutOfRange {
        /// The offending item.
        item: usize,
        /// Number of items the engine was built over.
        size: usize,
    },
}

define_error_codes! {
    /// Stable codes describing [`UnionFindError`] variants.
    enum UnionFindErrorCode for UnionFindError {
        /// The requested universe size was negative or too large to index.
        InvalidSize => InvalidSize { .. } => "UNION_FIND_INVALID_SIZE",
        /// An item fell outside the engine's universe.
        OutOfRange => OutOfRange { .. } => "UNION_FIND_OUT_OF_RANGE",
    }
}

/// Error type produced while building or running a [`crate::Splitter`].
#[non_exhaustive]
#[derive(Clone, Debug, Error, PartialEq)]
pub enum SplitError {
    /// Split fractions were non-finite, negative, or summed to more than one.
    #[error("invalid split fractions (train={train}, valid={valid}): {reason}")]
    InvalidConfig {
        /// Which constraint the fractions violated.
        reason: &'static str,
        /// Requested training fraction.
        train: f64,
        /// Requested validation fraction.
        valid: f64,
    },
    /// The disjoint-set engine rejected an operation.
    #[error("disjoint-set engine failed: {error}")]
    UnionFind {
        /// Underlying engine error.
        #[from]
        error: UnionFindError,
    },
    /// A complex's subunits resolved to different components after all unions.
    #[error(
        "complex `{complex}` is split across components: cluster {first_cluster} -> {first_representative}, cluster {cluster} -> {representative}"
    )]
    InconsistentComponent {
        /// The complex whose subunits disagree.
        complex: Arc<str>,
        /// Cluster id of the complex's first subunit.
        first_cluster: usize,
        /// Representative of the first subunit.
        first_representative: usize,
        /// Cluster id of the disagreeing subunit.
        cluster: usize,
        /// Representative of the disagreeing subunit.
        representative: usize,
    },
    /// A complex was declared without any subunits.
    #[error("complex `{complex}` has no subunits")]
    EmptyComplex {
        /// The empty complex.
        complex: Arc<str>,
    },
    /// The same complex identifier was inserted twice.
    #[error("complex `{complex}` was declared more than once")]
    DuplicateComplex {
        /// The repeated complex identifier.
        complex: Arc<str>,
    },
    /// A membership did not assign a split to one of the complexes.
    #[error("complex `{complex}` has no split assignment")]
    MissingComplex {
        /// The unassigned complex.
        complex: Arc<str>,
    },
    /// Two complexes of the same component were placed in different splits.
    #[error("component {component} leaks across splits: `{complex}` is in {found}, expected {expected}")]
    Leakage {
        /// The component that straddles two splits.
        component: ComponentId,
        /// The complex found in the unexpected split.
        complex: Arc<str>,
        /// Split already holding the rest of the component.
        expected: Split,
        /// Split the offending complex was placed in.
        found: Split,
    },
}

define_error_codes! {
    /// Stable codes describing [`SplitError`] variants.
    enum SplitErrorCode for SplitError {
        /// Split fractions were invalid.
        InvalidConfig => InvalidConfig { .. } => "SPLIT_INVALID_CONFIG",
        /// The disjoint-set engine rejected an operation.
        UnionFindFailure => UnionFind { .. } => "SPLIT_UNION_FIND_FAILURE",
        /// A complex's subunits resolved to different components.
        InconsistentComponent => InconsistentComponent { .. } => "SPLIT_INCONSISTENT_COMPONENT",
        /// A complex was declared without any subunits.
        EmptyComplex => EmptyComplex { .. } => "SPLIT_EMPTY_COMPLEX",
        /// The same complex identifier was inserted twice.
        DuplicateComplex => DuplicateComplex { .. } => "SPLIT_DUPLICATE_COMPLEX",
        /// A complex had no split assignment.
        MissingComplex => MissingComplex { .. } => "SPLIT_MISSING_COMPLEX",
        /// A component straddled two splits.
        Leakage => Leakage { .. } => "SPLIT_LEAKAGE",
    }
}

impl SplitError {
    /// Retrieve the inner [`UnionFindErrorCode`] when the error originated in
    /// a disjoint-set engine.
    pub const fn union_find_code(&self) -> Option<UnionFindErrorCode> {
        match self {
            Self::UnionFind { error } => Some(error.code()),
            _ => None,
        }
    }
}

/// Convenient alias for results returned by the core API.
pub type Result<T> = core::result::Result<T, SplitError>;
