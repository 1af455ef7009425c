use std::sync::Arc;

use complexsplit_core::{
    ComponentId, Split, SplitError, SplitErrorCode, UnionFindError, UnionFindErrorCode,
};
use rstest::rstest;

#[rstest]
#[case(UnionFindError::InvalidSize { size: -1 }, UnionFindErrorCode::InvalidSize)]
#[case(
    UnionFindError::OutOfRange { item: 9, size: 4 },
    UnionFindErrorCode::OutOfRange,
)]
fn returns_expected_union_find_code(
    #[case] error: UnionFindError,
    #[case] expected: UnionFindErrorCode,
) {
    assert_eq!(error.code(), expected);
    assert_eq!(error.code().to_string(), expected.as_str());
}

#[rstest]
#[case(
    SplitError::InvalidConfig { reason: "fractions must be finite", train: f64::NAN, valid: 0.1 },
    SplitErrorCode::InvalidConfig,
    None,
)]
#[case(
    SplitError::UnionFind { error: UnionFindError::OutOfRange { item: 3, size: 2 } },
    SplitErrorCode::UnionFindFailure,
    Some(UnionFindErrorCode::OutOfRange),
)]
#[case(
    SplitError::InconsistentComponent {
        complex: Arc::from("AB"),
        first_cluster: 0,
        first_representative: 0,
        cluster: 1,
        representative: 1,
    },
    SplitErrorCode::InconsistentComponent,
    None,
)]
#[case(
    SplitError::EmptyComplex { complex: Arc::from("E") },
    SplitErrorCode::EmptyComplex,
    None,
)]
#[case(
    SplitError::DuplicateComplex { complex: Arc::from("D") },
    SplitErrorCode::DuplicateComplex,
    None,
)]
#[case(
    SplitError::MissingComplex { complex: Arc::from("M") },
    SplitErrorCode::MissingComplex,
    None,
)]
#[case(
    SplitError::Leakage {
        component: ComponentId::new(1),
        complex: Arc::from("L"),
        expected: Split::Train,
        found: Split::Test,
    },
    SplitErrorCode::Leakage,
    None,
)]
fn returns_expected_split_code(
    #[case] error: SplitError,
    #[case] expected: SplitErrorCode,
    #[case] union_find_code: Option<UnionFindErrorCode>,
) {
    assert_eq!(error.code(), expected);
    assert_eq!(error.code().as_str(), expected.as_str());
    assert_eq!(error.union_find_code(), union_find_code);
}

#[test]
fn union_find_errors_convert_into_split_errors() {
    let error: SplitError = UnionFindError::InvalidSize { size: -5 }.into();
    assert_eq!(error.code(), SplitErrorCode::UnionFindFailure);
    assert_eq!(
        error.to_string(),
        "disjoint-set engine failed: universe size -5 must be between 0 and 268435456 and fit in memory"
    );
}

#[test]
fn leakage_message_names_both_splits() {
    let error = SplitError::Leakage {
        component: ComponentId::new(7),
        complex: Arc::from("BC"),
        expected: Split::Train,
        found: Split::Validation,
    };
    assert_eq!(
        error.to_string(),
        "component 7 leaks across splits: `BC` is in validation, expected train"
    );
}
