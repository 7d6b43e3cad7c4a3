//! Command-line interface for building and inspecting single-linkage
//! dendrograms.
//!
//! The `run` command clusters either a range of stat records read from CSV or
//! a batch of random points, then renders the linkage table and its merge
//! segments.

mod commands;

pub use commands::{
    Cli, CliError, Command, CsvArgs, ExecutionSummary, NonFiniteArg, OutputFormat, RandomArgs,
    RunCommand, RunSource, render_summary, run_cli,
};
