//! Command implementations and argument parsing for the complexsplit CLI.

use std::fs::File;
use std::io::{self, BufReader, Write};
use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand, ValueEnum};
use complexsplit_core::{
    ComplexTable, ComponentAssignment, EngineStrategy, Split, SplitError, SplitOutcome,
    SplitterBuilder, ValidationTarget,
};
use thiserror::Error;
use tracing::{Span, field, info, instrument};

use super::table::{RowError, parse_table};

const DEFAULT_TRAIN_FRACTION: f64 = 0.8;
const DEFAULT_VALID_FRACTION: f64 = 0.1;

/// Top-level CLI options parsed by [`clap`].
#[derive(Debug, Parser, Clone)]
#[command(
    name = "complexsplit",
    about = "Split protein complexes into leakage-free train, validation and test sets."
)]
pub struct Cli {
    /// Command to execute.
    #[command(subcommand)]
    pub command: Command,
}

/// Supported CLI commands.
#[derive(Debug, Subcommand, Clone)]
pub enum Command {
    /// Assign every complex to train, validation or test.
    Split(SplitCommand),
    /// Print the connected component of every complex.
    Components(ComponentsCommand),
}

impl Command {
    fn name(&self) -> &'static str {
        match self {
            Self::Split(_) => "split",
            Self::Components(_) => "components",
        }
    }

    fn input(&self) -> &InputArgs {
        match self {
            Self::Split(command) => &command.input,
            Self::Components(command) => &command.input,
        }
    }
}

/// Arguments shared by every command.
#[derive(Debug, Args, Clone)]
pub struct InputArgs {
    /// Table with one `<complex_id> <cluster_id>` row per subunit.
    pub path: PathBuf,

    /// Disjoint-set engine used to resolve components.
    #[arg(long, value_enum, default_value_t = EngineArg::Flat)]
    pub engine: EngineArg,
}

/// Options accepted by the `split` command.
#[derive(Debug, Args, Clone)]
pub struct SplitCommand {
    /// Input table and engine.
    #[command(flatten)]
    pub input: InputArgs,

    /// Fraction of complexes to place in train.
    #[arg(long = "train-fraction", default_value_t = DEFAULT_TRAIN_FRACTION)]
    pub train_fraction: f64,

    /// Fraction of complexes to place in validation.
    #[arg(long = "valid-fraction", default_value_t = DEFAULT_VALID_FRACTION)]
    pub valid_fraction: f64,

    /// How the validation target is derived once train is filled.
    #[arg(
        long = "validation-target",
        value_enum,
        default_value_t = ValidationTargetArg::Remainder,
    )]
    pub validation_target: ValidationTargetArg,
}

/// Options accepted by the `components` command.
#[derive(Debug, Args, Clone)]
pub struct ComponentsCommand {
    /// Input table and engine.
    #[command(flatten)]
    pub input: InputArgs,
}

/// Engine choices exposed on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum EngineArg {
    /// Flat label array; every union relabels the losing component.
    Flat,
    /// Union by rank with path compression.
    Compressed,
}

impl From<EngineArg> for EngineStrategy {
    fn from(arg: EngineArg) -> Self {
        match arg {
            EngineArg::Flat => Self::FlatRelabel,
            EngineArg::Compressed => Self::PathCompression,
        }
    }
}

/// Validation target rules exposed on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ValidationTargetArg {
    /// Split the post-train remainder by the validation and test fractions.
    Remainder,
    /// Aim at the validation fraction of all complexes.
    Total,
}

impl From<ValidationTargetArg> for ValidationTarget {
    fn from(arg: ValidationTargetArg) -> Self {
        match arg {
            ValidationTargetArg::Remainder => Self::RemainderShare,
            ValidationTargetArg::Total => Self::TotalShare,
        }
    }
}

/// Errors surfaced while executing CLI commands.
#[derive(Debug, Error)]
pub enum CliError {
    /// The input file could not be opened.
    #[error("failed to open `{path}`: {source}")]
    Io {
        /// Path that triggered the failure.
        path: PathBuf,
        /// Underlying operating system error.
        #[source]
        source: io::Error,
    },
    /// Reading the input failed part-way through.
    #[error("failed to read line {line}: {source}")]
    Read {
        /// 1-based line number being read.
        line: usize,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },
    /// A row was malformed.
    #[error("line {line}: {reason}")]
    Parse {
        /// 1-based line number of the row.
        line: usize,
        /// What was wrong with the row.
        reason: RowError,
    },
    /// The input held no rows.
    #[error("input contains no `<complex_id> <cluster_id>` rows")]
    EmptyInput,
    /// The core pipeline failed.
    #[error(transparent)]
    Core(#[from] SplitError),
}

/// What a command produced.
#[derive(Debug, Clone)]
pub enum Report {
    /// Output of `split`.
    Split(SplitOutcome),
    /// Output of `components`.
    Components(ComponentAssignment),
}

/// Summarises the outcome of executing a CLI command.
#[derive(Debug, Clone)]
pub struct ExecutionSummary {
    /// Input name derived from the file stem.
    pub input: String,
    /// Engine that resolved the components.
    pub engine: EngineStrategy,
    /// Command output.
    pub report: Report,
}

/// Executes the CLI command represented by `cli`.
///
/// # Errors
/// Returns [`CliError`] when the configuration is invalid, the input cannot
/// be read or parsed, or the pipeline fails.
///
/// # Examples
/// ```
/// # use std::error::Error;
/// # use complexsplit_cli::cli::{
/// #     Cli, Command, ComponentsCommand, EngineArg, InputArgs, Report, run_cli,
/// # };
/// # use tempfile::NamedTempFile;
/// #
/// # fn main() -> Result<(), Box<dyn Error>> {
/// let file = NamedTempFile::new()?;
/// std::fs::write(file.path(), "AB 0\nAB 1\nBC 1\nBC 2\nX 10\n")?;
/// let cli = Cli {
///     command: Command::Components(ComponentsCommand {
///         input: InputArgs {
///             path: file.path().to_path_buf(),
///             engine: EngineArg::Flat,
///         },
///     }),
/// };
/// let summary = run_cli(cli)?;
/// let Report::Components(assignment) = summary.report else {
///     unreachable!("components command yields a component report");
/// };
/// assert_eq!(assignment.get("AB"), assignment.get("BC"));
/// # Ok(())
/// # }
/// ```
#[instrument(name = "cli.run", err, skip(cli), fields(command = field::Empty))]
pub fn run_cli(cli: Cli) -> Result<ExecutionSummary, CliError> {
    Span::current().record("command", field::display(cli.command.name()));
    run_command(cli.command)
}

#[instrument(
    name = "cli.execute",
    err,
    skip(command),
    fields(path = field::Empty, engine = field::Empty),
)]
pub(super) fn run_command(command: Command) -> Result<ExecutionSummary, CliError> {
    let input = command.input();
    let engine = EngineStrategy::from(input.engine);
    let span = Span::current();
    span.record("path", field::display(input.path.display()));
    span.record("engine", field::display(engine.as_str()));

    let name = derive_input_name(&input.path);
    let report = match &command {
        Command::Split(args) => {
            let splitter = SplitterBuilder::new()
                .with_train_fraction(args.train_fraction)
                .with_valid_fraction(args.valid_fraction)
                .with_engine(engine)
                .with_validation_target(args.validation_target.into())
                .build()?;
            let table = read_table(&args.input.path)?;
            Report::Split(splitter.run(&table)?)
        }
        Command::Components(args) => {
            let splitter = SplitterBuilder::new().with_engine(engine).build()?;
            let table = read_table(&args.input.path)?;
            Report::Components(splitter.assign(&table)?)
        }
    };

    info!(
        input = name.as_str(),
        command = command.name(),
        "command completed"
    );
    Ok(ExecutionSummary {
        input: name,
        engine,
        report,
    })
}

#[instrument(
    name = "cli.read_table",
    err,
    skip(path),
    fields(path = field::Empty, complexes = field::Empty),
)]
pub(super) fn read_table(path: &Path) -> Result<ComplexTable, CliError> {
    let span = Span::current();
    span.record("path", field::display(path.display()));
    let file = File::open(path).map_err(|source| CliError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let table = parse_table(BufReader::new(file))?;
    span.record("complexes", table.len());
    Ok(table)
}

pub(super) fn derive_input_name(path: &Path) -> String {
    path.file_stem()
        .and_then(|value| value.to_str())
        .map(ToOwned::to_owned)
        .unwrap_or_else(|| "input".to_owned())
}

/// Renders `summary` to `writer` as a short header followed by one
/// tab-separated row per complex.
///
/// # Errors
/// Returns [`io::Error`] if writing to the supplied writer fails.
///
/// # Examples
/// ```
/// # use std::error::Error;
/// # use complexsplit_cli::cli::{ExecutionSummary, Report, render_summary};
/// # use complexsplit_core::{ComplexTable, EngineStrategy, SplitterBuilder};
/// #
/// # fn main() -> Result<(), Box<dyn Error>> {
/// let table = ComplexTable::try_from_iter([("X", vec![3])])?;
/// let assignment = SplitterBuilder::new().build()?.assign(&table)?;
/// let summary = ExecutionSummary {
///     input: "demo".into(),
///     engine: EngineStrategy::FlatRelabel,
///     report: Report::Components(assignment),
/// };
/// let mut buffer = Vec::new();
/// render_summary(&summary, &mut buffer)?;
/// assert!(String::from_utf8(buffer)?.ends_with("X\t3\n"));
/// # Ok(())
/// # }
/// ```
pub fn render_summary(summary: &ExecutionSummary, mut writer: impl Write) -> io::Result<()> {
    writeln!(writer, "input: {}", summary.input)?;
    writeln!(writer, "engine: {}", summary.engine.as_str())?;
    match &summary.report {
        Report::Split(outcome) => {
            let totals = outcome.summary();
            writeln!(writer, "complexes: {}", totals.total)?;
            writeln!(writer, "components: {}", outcome.components().len())?;
            for split in Split::ALL {
                let tally = totals.tally(split);
                writeln!(
                    writer,
                    "{split}: {} complexes in {} components",
                    tally.complexes, tally.components
                )?;
            }
            for (complex, component) in outcome.assignment().iter() {
                let split = outcome
                    .membership()
                    .get(complex)
                    .map_or("unassigned", |split| split.as_str());
                writeln!(writer, "{complex}\t{component}\t{split}")?;
            }
        }
        Report::Components(assignment) => {
            writeln!(writer, "complexes: {}", assignment.len())?;
            writeln!(writer, "components: {}", assignment.components().len())?;
            for (complex, component) in assignment.iter() {
                writeln!(writer, "{complex}\t{component}")?;
            }
        }
    }
    Ok(())
}
