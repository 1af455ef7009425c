//! Command-line interface for splitting complex tables.
//!
//! `split` assigns every complex in a `<complex_id> <cluster_id>` table to
//! train, validation or test; `components` prints the component labels only,
//! for use as groups in grouped cross-validation.

mod commands;
mod table;

pub use commands::{
    Cli, CliError, Command, ComponentsCommand, EngineArg, ExecutionSummary, InputArgs, Report,
    SplitCommand, ValidationTargetArg, render_summary, run_cli,
};
pub use table::{RowError, parse_table};

#[cfg(test)]
mod test_helpers;
