//! Line-based reader for `<complex_id> <cluster_id>` tables.

use std::io::BufRead;

use complexsplit_core::ComplexTable;
use thiserror::Error;

use super::CliError;

/// Why a single row was rejected.
#[derive(Clone, Debug, Eq, Error, PartialEq)]
pub enum RowError {
    /// The row did not hold exactly two whitespace-separated fields.
    #[error("expected `<complex_id> <cluster_id>`, found {fields} field(s)")]
    FieldCount {
        /// Number of fields found.
        fields: usize,
    },
    /// The cluster id was not an integer.
    #[error("cluster id `{raw}` is not an integer")]
    NotAnInteger {
        /// The rejected token.
        raw: String,
    },
    /// The cluster id was negative.
    #[error("cluster id {value} is negative")]
    Negative {
        /// The rejected value.
        value: i64,
    },
}

/// Reads a complex table, one subunit per row.
///
/// Blank lines and lines starting with `#` are skipped. Rows of the same
/// complex need not be adjacent; subunits are appended in file order.
///
/// # Errors
/// Returns [`CliError::Read`] when the reader fails, [`CliError::Parse`] with
/// the 1-based line number for a malformed row, and [`CliError::EmptyInput`]
/// when no rows remain after skipping blanks and comments.
///
/// # Examples
/// ```
/// use std::io::Cursor;
///
/// use complexsplit_cli::cli::parse_table;
///
/// let input = "# complex cluster\n1abc 4\n2xyz 9\n\n1abc 7\n";
/// let table = parse_table(Cursor::new(input))?;
/// assert_eq!(table.len(), 2);
/// assert_eq!(table.get("1abc").map(|c| c.subunits().to_vec()), Some(vec![4, 7]));
/// # Ok::<(), complexsplit_cli::cli::CliError>(())
/// ```
pub fn parse_table(reader: impl BufRead) -> Result<ComplexTable, CliError> {
    let mut table = ComplexTable::new();
    for (index, line) in reader.lines().enumerate() {
        let line_number = index + 1;
        let line = line.map_err(|source| CliError::Read {
            line: line_number,
            source,
        })?;
        let row = line.trim();
        if row.is_empty() || row.starts_with('#') {
            continue;
        }
        let (complex, cluster) = parse_row(row).map_err(|reason| CliError::Parse {
            line: line_number,
            reason,
        })?;
        table.push_subunit(complex, cluster);
    }
    if table.is_empty() {
        return Err(CliError::EmptyInput);
    }
    Ok(table)
}

fn parse_row(row: &str) -> Result<(&str, usize), RowError> {
    let fields: Vec<&str> = row.split_whitespace().collect();
    let [complex, raw] = fields.as_slice() else {
        return Err(RowError::FieldCount {
            fields: fields.len(),
        });
    };
    let value: i64 = raw.parse().map_err(|_| RowError::NotAnInteger {
        raw: (*raw).to_owned(),
    })?;
    let cluster = usize::try_from(value).map_err(|_| RowError::Negative { value })?;
    Ok((*complex, cluster))
}
