//! Unit and property tests for the split allocator.

use std::sync::Arc;

use proptest::prelude::*;
use rstest::rstest;

use crate::{
    ComplexTable, SplitterBuilder,
    error::SplitError,
    test_utils::{sized_components_table, suite_proptest_config, table_strategy},
};

use super::{
    Split, SplitFractions, SplitMembership, ValidationTarget, allocate_splits, floor_share,
    verify_no_leakage,
};

const SCENARIO_SIZES: [usize; 10] = [500, 100, 50, 20, 10, 5, 5, 5, 3, 2];

fn allocate(
    table: &ComplexTable,
    fractions: SplitFractions,
    target: ValidationTarget,
) -> super::SplitAllocation {
    let assignment = SplitterBuilder::new()
        .build()
        .expect("default configuration is valid")
        .assign(table)
        .expect("assignment succeeds");
    let components = assignment.components();
    allocate_splits(&assignment, &components, fractions, target)
}

fn split_of_component(
    membership: &SplitMembership,
    cluster: usize,
) -> Option<Split> {
    membership.get(&format!("{cluster}-0"))
}

#[test]
fn scenario_sizes_fill_train_then_halve_the_remainder() {
    let table = sized_components_table(&SCENARIO_SIZES);
    let allocation = allocate(
        &table,
        SplitFractions::default(),
        ValidationTarget::RemainderShare,
    );
    let summary = allocation.summary();
    let membership = allocation.membership();

    assert_eq!(split_of_component(membership, 0), Some(Split::Train));
    assert_eq!(summary.train_target, 560);
    assert_eq!(summary.train.complexes, 600);
    assert_eq!(summary.validation_target, 50);
    assert_eq!(summary.validation.complexes, 50);
    assert_eq!(summary.test.complexes, 50);
    assert_eq!(
        summary.train.complexes + summary.validation.complexes + summary.test.complexes,
        700
    );
    assert_eq!(membership.len(), 700);
}

#[test]
fn scenario_sizes_with_total_share_fill_validation_to_seventy() {
    let table = sized_components_table(&SCENARIO_SIZES);
    let allocation = allocate(
        &table,
        SplitFractions::default(),
        ValidationTarget::TotalShare,
    );
    let summary = allocation.summary();

    assert_eq!(split_of_component(allocation.membership(), 0), Some(Split::Train));
    assert!(summary.train.complexes >= 560);
    assert_eq!(summary.validation_target, 70);
    assert_eq!(summary.validation.complexes, 70);
    assert_eq!(summary.validation.components, 2);
    assert_eq!(summary.test.complexes, 30);
    assert_eq!(summary.total, 700);
}

#[test]
fn equal_sizes_keep_first_appearance_order() {
    let table = sized_components_table(&[2, 2, 2, 2, 2]);
    let allocation = allocate(
        &table,
        SplitFractions::new(0.6, 0.2).expect("valid fractions"),
        ValidationTarget::RemainderShare,
    );
    let membership = allocation.membership();

    let splits: Vec<Option<Split>> = (0..5)
        .map(|cluster| split_of_component(membership, cluster))
        .collect();
    assert_eq!(
        splits,
        vec![
            Some(Split::Train),
            Some(Split::Train),
            Some(Split::Train),
            Some(Split::Validation),
            Some(Split::Test),
        ]
    );
}

#[test]
fn zero_test_fraction_sends_the_remainder_to_validation() {
    let table = sized_components_table(&[5, 3, 1, 1]);
    let allocation = allocate(
        &table,
        SplitFractions::new(0.5, 0.5).expect("valid fractions"),
        ValidationTarget::RemainderShare,
    );
    let summary = allocation.summary();
    assert_eq!(summary.train.complexes, 5);
    assert_eq!(summary.validation.complexes, 5);
    assert_eq!(summary.test.complexes, 0);
}

#[test]
fn empty_components_allocate_nothing() {
    let allocation = allocate(
        &ComplexTable::new(),
        SplitFractions::default(),
        ValidationTarget::RemainderShare,
    );
    assert!(allocation.membership().is_empty());
    assert_eq!(allocation.summary().total, 0);
}

#[rstest]
#[case::nan_train(f64::NAN, 0.1)]
#[case::infinite_valid(0.8, f64::INFINITY)]
#[case::negative_train(-0.1, 0.1)]
#[case::negative_valid(0.8, -0.1)]
#[case::zero_train(0.0, 0.1)]
#[case::whole_train(1.0, 0.0)]
#[case::oversubscribed(0.9, 0.2)]
fn invalid_fractions_are_rejected(#[case] train: f64, #[case] valid: f64) {
    let err = SplitFractions::new(train, valid).expect_err("fractions are invalid");
    assert!(matches!(err, SplitError::InvalidConfig { .. }));
}

#[rstest]
#[case::just_past_one(0.8, 0.200_001)]
#[case::past_the_rounding_tolerance(0.8, 0.2 + 1e-8)]
fn sums_past_one_beyond_rounding_are_rejected(#[case] train: f64, #[case] valid: f64) {
    let err = SplitFractions::new(train, valid).expect_err("fractions sum past one");
    assert!(matches!(
        err,
        SplitError::InvalidConfig {
            reason: "fractions must not sum to more than 1",
            ..
        }
    ));
}

#[test]
fn sums_within_rounding_of_one_are_accepted() {
    let fractions = SplitFractions::new(0.8, 0.2 + 1e-12).expect("excess is rounding noise");
    assert!(fractions.test() < 1e-9);
}

#[test]
fn equal_validation_and_test_fractions_halve_the_remainder() {
    let table = sized_components_table(&[1; 100]);
    let fractions = SplitFractions::new(0.7, 0.15).expect("valid fractions");
    assert!(fractions.validation_share() < 0.5);

    let allocation = allocate(&table, fractions, ValidationTarget::RemainderShare);
    let summary = allocation.summary();
    assert_eq!(summary.train.complexes, 70);
    assert_eq!(summary.validation_target, 15);
    assert_eq!(summary.validation.complexes, 15);
    assert_eq!(summary.test.complexes, 15);
}

#[rstest]
#[case::train_share(100, 0.57, 57)]
#[case::remainder_share(30, 0.15 / (1.0 - 0.7), 15)]
#[case::exact(700, 0.8, 560)]
#[case::below_one(1, 0.8, 0)]
#[case::empty(0, 0.5, 0)]
fn floor_share_absorbs_rounding_error(
    #[case] count: usize,
    #[case] fraction: f64,
    #[case] expected: usize,
) {
    assert_eq!(floor_share(count, fraction), expected);
}

#[test]
fn odd_train_fraction_reaches_its_target() {
    let table = sized_components_table(&[1; 100]);
    let allocation = allocate(
        &table,
        SplitFractions::new(0.57, 0.2).expect("valid fractions"),
        ValidationTarget::TotalShare,
    );
    let summary = allocation.summary();
    assert_eq!(summary.train_target, 57);
    assert_eq!(summary.train.complexes, 57);
    assert_eq!(summary.validation.complexes, 20);
    assert_eq!(summary.test.complexes, 23);
}

#[rstest]
#[case(0.8, 0.1)]
#[case(0.7, 0.3)]
#[case(0.5, 0.0)]
#[case(0.99, 0.01)]
fn valid_fractions_are_accepted(#[case] train: f64, #[case] valid: f64) {
    let fractions = SplitFractions::new(train, valid).expect("fractions are valid");
    assert!(fractions.test() >= 0.0);
    assert!(fractions.validation_share() <= 1.0);
}

#[test]
fn leakage_check_reports_the_straddling_complex() {
    let table = ComplexTable::try_from_iter([("AB", vec![0, 1]), ("BC", vec![1, 2])])
        .expect("entries are valid");
    let assignment = SplitterBuilder::new()
        .build()
        .expect("valid configuration")
        .assign(&table)
        .expect("assignment succeeds");
    let component = assignment.get("AB").expect("AB is assigned");

    let leaky = SplitMembership::from_entries([("AB", Split::Train), ("BC", Split::Test)]);
    let err = verify_no_leakage(&assignment, &leaky).expect_err("BC leaks into test");
    assert_eq!(
        err,
        SplitError::Leakage {
            component,
            complex: Arc::from("BC"),
            expected: Split::Train,
            found: Split::Test,
        }
    );
}

#[test]
fn leakage_check_reports_unassigned_complexes() {
    let table = ComplexTable::try_from_iter([("X", vec![10])]).expect("entries are valid");
    let assignment = SplitterBuilder::new()
        .build()
        .expect("valid configuration")
        .assign(&table)
        .expect("assignment succeeds");

    let err = verify_no_leakage(&assignment, &SplitMembership::default())
        .expect_err("X has no split");
    assert_eq!(
        err,
        SplitError::MissingComplex {
            complex: Arc::from("X")
        }
    );
}

#[test]
fn membership_entries_override_earlier_duplicates() {
    let membership = SplitMembership::from_entries([
        ("A", Split::Train),
        ("B", Split::Test),
        ("A", Split::Validation),
    ]);
    assert_eq!(membership.len(), 2);
    assert_eq!(membership.get("A"), Some(Split::Validation));
    assert_eq!(membership.count(Split::Train), 0);
    assert_eq!(membership.complexes_in(Split::Test).collect::<Vec<_>>(), vec!["B"]);
}

fn run_allocation_properties(table: &ComplexTable) -> Result<(), TestCaseError> {
    let outcome = SplitterBuilder::new()
        .build()
        .map_err(|err| TestCaseError::fail(err.to_string()))?
        .run(table)
        .map_err(|err| TestCaseError::fail(err.to_string()))?;
    let summary = outcome.summary();
    let membership = outcome.membership();

    prop_assert!(verify_no_leakage(outcome.assignment(), membership).is_ok());
    prop_assert_eq!(membership.len(), table.len());
    for complex in table {
        prop_assert!(membership.get(complex.id()).is_some());
    }
    let placed: usize = Split::ALL
        .iter()
        .map(|&split| summary.tally(split).complexes)
        .sum();
    prop_assert_eq!(placed, table.len());

    let largest = outcome
        .components()
        .iter()
        .map(|component| component.len())
        .max()
        .unwrap_or(0);
    prop_assert!(summary.train.complexes < summary.train_target + largest.max(1));
    prop_assert!(
        summary.validation.complexes < summary.validation_target + largest.max(1)
    );
    if summary.validation.complexes + summary.test.complexes > 0 {
        prop_assert!(summary.train.complexes >= summary.train_target);
    }
    Ok(())
}

proptest! {
    #![proptest_config(suite_proptest_config(128))]

    #[test]
    fn allocation_never_leaks_and_covers_every_complex(table in table_strategy()) {
        run_allocation_properties(&table)?;
    }
}
