//! Helpers shared by the CLI unit tests.

use std::fs::File;
use std::io::{self, Write};
use std::path::PathBuf;

use tempfile::TempDir;

use super::commands::run_command;
use super::{
    Cli, CliError, Command, ComponentsCommand, EngineArg, InputArgs, SplitCommand,
    ValidationTargetArg, run_cli,
};

/// Three chained complexes plus an isolated one, one subunit per row.
pub(super) const CHAINED_TABLE: &str = "\
# complex cluster
AB 0
AB 1
BC 1
BC 2
CD 2
CD 3
X 10
";

pub(super) fn temp_dir() -> TempDir {
    match TempDir::new() {
        Ok(dir) => dir,
        Err(err) => panic!("failed to create temp dir: {err}"),
    }
}

pub(super) fn create_table_file(dir: &TempDir, name: &str, contents: &str) -> io::Result<PathBuf> {
    let path = dir.path().join(name);
    let mut file = File::create(&path)?;
    file.write_all(contents.as_bytes())?;
    Ok(path)
}

pub(super) fn split_command(path: PathBuf, engine: EngineArg) -> SplitCommand {
    SplitCommand {
        input: InputArgs { path, engine },
        train_fraction: 0.8,
        valid_fraction: 0.1,
        validation_target: ValidationTargetArg::Remainder,
    }
}

pub(super) fn components_cli(path: PathBuf) -> Cli {
    Cli {
        command: Command::Components(ComponentsCommand {
            input: InputArgs {
                path,
                engine: EngineArg::Flat,
            },
        }),
    }
}

pub(super) fn run_cli_expecting_error(cli: Cli, panic_msg: &str) -> CliError {
    match run_cli(cli) {
        Ok(_) => panic!("{panic_msg}"),
        Err(err) => err,
    }
}

pub(super) fn run_command_expecting_error(command: Command, panic_msg: &str) -> CliError {
    match run_command(command) {
        Ok(_) => panic!("{panic_msg}"),
        Err(err) => err,
    }
}
