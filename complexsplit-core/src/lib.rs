//! complexsplit core library.
//!
//! Splits protein complexes into train, validation and test sets so that no
//! subunit cluster is shared across splits. Complexes connected through
//! shared cluster ids, directly or transitively, form one component, and
//! every component is placed wholly in a single split.
//!
//! The pipeline runs in four stages:
//!
//! 1. [`complex_pairs`] turns each complex into star pairs anchored on its
//!    first subunit.
//! 2. A [`DisjointSets`] engine applies those pairs as unions.
//! 3. [`assign_components`] labels every complex with its component.
//! 4. [`allocate_splits`] hands whole components to the splits, largest first.
//!
//! [`Splitter`] runs all four; the stages are public for callers that need
//! only part of the pipeline, such as group labels for grouped k-fold.

mod allocator;
mod builder;
mod complex;
mod components;
mod error;
mod pairs;
mod splitter;
pub mod union_find;

#[cfg(test)]
mod test_utils;

pub use crate::{
    allocator::{
        Split, SplitAllocation, SplitFractions, SplitMembership, SplitSummary, SplitTally,
        ValidationTarget, allocate_splits, verify_no_leakage,
    },
    builder::SplitterBuilder,
    complex::{Complex, ComplexTable},
    components::{Component, ComponentAssignment, ComponentId, assign_components},
    error::{Result, SplitError, SplitErrorCode, UnionFindError, UnionFindErrorCode},
    pairs::{complex_pairs, star_pairs},
    splitter::{SplitOutcome, Splitter},
    union_find::{
        CompressedDisjointSet, DisjointSets, EngineStrategy, FlatDisjointSet, MAX_UNIVERSE, Pair,
    },
};
