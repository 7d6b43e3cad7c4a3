//! Command implementations and argument parsing for the dendra CLI.

use std::fs::File;
use std::io::{self, BufReader, Write};
use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand, ValueEnum};
use dendra_core::{
    ClusterBuilder, LinkageError, LinkageTable, MergeSegment, NonFinitePolicy, Point,
};
use dendra_providers_csv::{StatSource, StatSourceError};
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use serde::Serialize;
use thiserror::Error;
use tracing::{Span, field, info, instrument};

const RANDOM_COORDINATE_MIN: u32 = 1;
const RANDOM_COORDINATE_MAX: u32 = 359;

/// Top-level CLI options parsed by [`clap`].
#[derive(Debug, Parser, Clone)]
#[command(
    name = "dendra",
    about = "Build single-linkage dendrograms over planar points."
)]
pub struct Cli {
    /// Command to execute.
    #[command(subcommand)]
    pub command: Command,
}

impl Cli {
    /// Returns the output format requested by the command.
    #[must_use]
    pub fn output_format(&self) -> OutputFormat {
        match &self.command {
            Command::Run(run) => run.format,
        }
    }
}

/// Supported CLI commands.
#[derive(Debug, Subcommand, Clone)]
pub enum Command {
    /// Cluster a data source and print its linkage table.
    Run(RunCommand),
}

/// Options accepted by the `run` command.
#[derive(Debug, Args, Clone)]
pub struct RunCommand {
    /// Output format written to stdout.
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    /// Treatment of points with NaN or infinite coordinates.
    #[arg(long = "non-finite", value_enum, default_value_t = NonFiniteArg::Drop)]
    pub non_finite: NonFiniteArg,

    /// Data source configuration.
    #[command(subcommand)]
    pub source: RunSource,
}

/// Point sources supported by `run`.
#[derive(Debug, Subcommand, Clone)]
pub enum RunSource {
    /// Cluster a contiguous range of stat records from a CSV file.
    Csv(CsvArgs),
    /// Cluster uniformly random integer points.
    Random(RandomArgs),
}

/// CSV ingestion arguments.
#[derive(Debug, Args, Clone)]
pub struct CsvArgs {
    /// Path to a CSV file with a stat header row.
    pub path: PathBuf,

    /// Index of the first record to cluster.
    #[arg(long, default_value_t = 0)]
    pub base: usize,

    /// Number of records to cluster.
    #[arg(long)]
    pub count: usize,

    /// Override name for the data source (defaults to the file name).
    #[arg(long)]
    pub name: Option<String>,
}

/// Random point generation arguments.
#[derive(Debug, Args, Clone)]
pub struct RandomArgs {
    /// Number of points to generate.
    #[arg(long)]
    pub count: usize,

    /// Seed for reproducible output; drawn from the OS when omitted.
    #[arg(long)]
    pub seed: Option<u64>,
}

/// Output formats for [`render_summary`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Tab-separated text, one line per row and segment.
    Text,
    /// A single JSON document.
    Json,
}

/// Command-line spelling of [`NonFinitePolicy`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum NonFiniteArg {
    /// Remove non-finite points before clustering.
    Drop,
    /// Fail on the first non-finite point.
    Reject,
}

impl From<NonFiniteArg> for NonFinitePolicy {
    fn from(value: NonFiniteArg) -> Self {
        match value {
            NonFiniteArg::Drop => Self::Drop,
            NonFiniteArg::Reject => Self::Reject,
        }
    }
}

/// Errors surfaced while executing CLI commands.
#[derive(Debug, Error)]
pub enum CliError {
    /// File I/O failed while opening an input source.
    #[error("failed to open `{path}`: {source}")]
    Io {
        /// Path that triggered the failure.
        path: PathBuf,
        /// Underlying operating system error.
        #[source]
        source: io::Error,
    },
    /// Stat record ingestion or selection failed.
    #[error(transparent)]
    Source(#[from] StatSourceError),
    /// Clustering failed.
    #[error(transparent)]
    Core(#[from] LinkageError),
}

impl CliError {
    /// Returns a stable identifier for the failure.
    #[must_use]
    pub fn code(&self) -> &'static str {
        match self {
            Self::Io { .. } => "CLI_IO",
            Self::Source(err) => err.code(),
            Self::Core(err) => err.code().as_str(),
        }
    }
}

/// Outcome of a `run` command.
#[derive(Debug, Clone, Serialize)]
pub struct ExecutionSummary {
    /// Name of the clustered data source.
    pub data_source: String,
    /// Clustered points in leaf order.
    pub points: Vec<Point>,
    /// Linkage table over `points`.
    pub table: LinkageTable,
    /// Leaf pair realising each merge.
    pub segments: Vec<MergeSegment>,
}

/// Executes the CLI command represented by `cli`.
///
/// # Errors
/// Returns [`CliError`] when loading or clustering fails.
///
/// # Examples
/// ```
/// use dendra_cli::cli::{
///     Cli, Command, NonFiniteArg, OutputFormat, RandomArgs, RunCommand, RunSource, run_cli,
/// };
///
/// let cli = Cli {
///     command: Command::Run(RunCommand {
///         format: OutputFormat::Text,
///         non_finite: NonFiniteArg::Drop,
///         source: RunSource::Random(RandomArgs { count: 5, seed: Some(7) }),
///     }),
/// };
/// let summary = run_cli(cli)?;
/// assert_eq!(summary.table.len(), 4);
/// # Ok::<(), dendra_cli::cli::CliError>(())
/// ```
#[instrument(
    name = "cli.run",
    err,
    skip(cli),
    fields(command = field::Empty),
)]
pub fn run_cli(cli: Cli) -> Result<ExecutionSummary, CliError> {
    match cli.command {
        Command::Run(run) => {
            Span::current().record("command", field::display("run"));
            run_command(run)
        }
    }
}

#[instrument(
    name = "cli.execute",
    err,
    skip(command),
    fields(non_finite = field::Empty, source = field::Empty),
)]
pub(super) fn run_command(command: RunCommand) -> Result<ExecutionSummary, CliError> {
    let builder = ClusterBuilder::new().with_non_finite_policy(command.non_finite.into());

    let span = Span::current();
    span.record("non_finite", field::debug(command.non_finite));

    let summary = match command.source {
        RunSource::Csv(args) => {
            span.record("source", field::display("csv"));
            run_csv(&builder, args)?
        }
        RunSource::Random(args) => {
            span.record("source", field::display("random"));
            run_random(&builder, args)?
        }
    };

    info!(
        data_source = summary.data_source.as_str(),
        leaves = summary.table.leaf_count(),
        rows = summary.table.len(),
        "command completed"
    );
    Ok(summary)
}

#[instrument(
    name = "cli.run_csv",
    err,
    skip(builder, args),
    fields(
        path = field::Empty,
        base = args.base,
        count = args.count,
        override_name = field::Empty,
    ),
)]
pub(super) fn run_csv(
    builder: &ClusterBuilder,
    args: CsvArgs,
) -> Result<ExecutionSummary, CliError> {
    let CsvArgs {
        path,
        base,
        count,
        name,
    } = args;
    let span = Span::current();
    span.record("path", field::display(path.display()));
    span.record(
        "override_name",
        field::display(name.as_deref().unwrap_or("<derived>")),
    );
    let chosen_name = derive_data_source_name(&path, name.as_deref());
    let reader = open_csv_reader(&path)?;
    let source = StatSource::try_from_reader(chosen_name, reader)?;
    let points = source.points(base, count)?;
    cluster(builder, source.name(), &points)
}

#[instrument(
    name = "cli.run_random",
    err,
    skip(builder, args),
    fields(count = args.count, seed = field::Empty),
)]
pub(super) fn run_random(
    builder: &ClusterBuilder,
    args: RandomArgs,
) -> Result<ExecutionSummary, CliError> {
    let mut rng = match args.seed {
        Some(seed) => {
            Span::current().record("seed", seed);
            SmallRng::seed_from_u64(seed)
        }
        None => SmallRng::from_entropy(),
    };
    let points = random_points(&mut rng, args.count);
    cluster(builder, "random", &points)
}

pub(super) fn random_points<R: Rng>(rng: &mut R, count: usize) -> Vec<Point> {
    (0..count)
        .map(|_| {
            let x = rng.gen_range(RANDOM_COORDINATE_MIN..=RANDOM_COORDINATE_MAX);
            let y = rng.gen_range(RANDOM_COORDINATE_MIN..=RANDOM_COORDINATE_MAX);
            Point::new(f64::from(x), f64::from(y))
        })
        .collect()
}

fn cluster(
    builder: &ClusterBuilder,
    data_source: &str,
    points: &[Point],
) -> Result<ExecutionSummary, CliError> {
    let dendrogram = builder.cluster(points)?;
    let segments = dendrogram.segments()?;
    let (points, table) = dendrogram.into_parts();
    Ok(ExecutionSummary {
        data_source: data_source.to_owned(),
        points,
        table,
        segments,
    })
}

#[instrument(name = "cli.open_csv_reader", err, fields(path = field::Empty))]
pub(super) fn open_csv_reader(path: &Path) -> Result<BufReader<File>, CliError> {
    Span::current().record("path", field::display(path.display()));
    let file = File::open(path).map_err(|source| CliError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(BufReader::new(file))
}

pub(super) fn derive_data_source_name(path: &Path, override_name: Option<&str>) -> String {
    if let Some(name) = override_name {
        return name.to_owned();
    }

    path.file_stem()
        .and_then(|value| value.to_str())
        .map(ToOwned::to_owned)
        .unwrap_or_else(|| "data_source".to_owned())
}

/// Renders `summary` to `writer` in the requested format.
///
/// Text output lists the data source, the leaf count, one tab-separated line
/// per linkage row (`row left right distance size`) and one per merge
/// segment (`row from to distance`).
///
/// # Errors
/// Returns [`io::Error`] if writing or JSON encoding fails.
///
/// # Examples
/// ```
/// # use std::error::Error;
/// use dendra_cli::cli::{ExecutionSummary, OutputFormat, render_summary};
/// use dendra_core::{ClusterBuilder, Point};
///
/// # fn main() -> Result<(), Box<dyn Error>> {
/// let points = vec![Point::new(0.0, 0.0), Point::new(3.0, 4.0)];
/// let dendrogram = ClusterBuilder::new().cluster(&points)?;
/// let summary = ExecutionSummary {
///     data_source: "demo".into(),
///     segments: dendrogram.segments()?,
///     points,
///     table: dendrogram.table().clone(),
/// };
/// let mut buffer = Vec::new();
/// render_summary(&summary, OutputFormat::Text, &mut buffer)?;
/// assert_eq!(
///     String::from_utf8(buffer)?,
///     "data source: demo\nleaves: 2\nrows: 1\n0\t0\t1\t5.0000\t2\nsegments: 1\n0\t0\t1\t5.0000\n",
/// );
/// # Ok(())
/// # }
/// ```
pub fn render_summary(
    summary: &ExecutionSummary,
    format: OutputFormat,
    mut writer: impl Write,
) -> io::Result<()> {
    match format {
        OutputFormat::Text => render_text(summary, writer),
        OutputFormat::Json => {
            serde_json::to_writer_pretty(&mut writer, summary)?;
            writeln!(writer)
        }
    }
}

fn render_text(summary: &ExecutionSummary, mut writer: impl Write) -> io::Result<()> {
    writeln!(writer, "data source: {}", summary.data_source)?;
    writeln!(writer, "leaves: {}", summary.table.leaf_count())?;
    writeln!(writer, "rows: {}", summary.table.len())?;
    for (index, row) in summary.table.rows().iter().enumerate() {
        writeln!(
            writer,
            "{index}\t{}\t{}\t{:.4}\t{}",
            row.left, row.right, row.distance, row.size
        )?;
    }
    writeln!(writer, "segments: {}", summary.segments.len())?;
    for segment in &summary.segments {
        writeln!(
            writer,
            "{}\t{}\t{}\t{:.4}",
            segment.row, segment.from, segment.to, segment.distance
        )?;
    }
    Ok(())
}
