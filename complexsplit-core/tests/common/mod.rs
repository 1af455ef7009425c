use complexsplit_core::ComplexTable;

/// Builds a table from literal `(id, subunits)` rows.
#[must_use]
pub fn table(rows: Vec<(&str, Vec<usize>)>) -> ComplexTable {
    ComplexTable::try_from_iter(rows).expect("fixture rows are valid")
}

/// Three complexes chained through clusters 1 and 2, plus an isolated one.
#[must_use]
pub fn chained_with_singleton() -> ComplexTable {
    table(vec![
        ("AB", vec![0, 1]),
        ("BC", vec![1, 2]),
        ("CD", vec![2, 3]),
        ("X", vec![10]),
    ])
}
