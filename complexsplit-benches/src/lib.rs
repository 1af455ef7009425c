//! Benchmark support crate for complexsplit.
//!
//! Generates reproducible complex tables for the Criterion benches that
//! compare the two disjoint-set engines and time full split runs.

pub mod error;
pub mod source;
