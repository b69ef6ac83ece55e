//! jcompare command-line interface.
//!
//! Parses two documents, compares them structurally and prints the
//! differences. Exits with 0 when the inputs are identical, 1 when they
//! differ and 2 on error.

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use jcompare::{
    format_report, parse_file, parse_stdin, DiffOptions, Differ, FormatHint, JcompareError, Node,
    OutputFormat, OutputOptions, ParseError,
};
use std::path::{Path, PathBuf};
use std::process;
use tracing::debug;
use tracing_subscriber::EnvFilter;

/// jcompare - structural diff for JSON documents
///
/// Compares two JSON (or YAML/TOML) documents and lists every added,
/// removed, changed or type-mismatched value by its path.
#[derive(Parser)]
#[command(name = "jcompare")]
#[command(version)]
#[command(about = "Structural diff for JSON documents", long_about = None)]
struct Cli {
    /// Left (original) document, or `-` for standard input
    #[arg(value_name = "LEFT")]
    left: PathBuf,

    /// Right (modified) document, or `-` for standard input
    #[arg(value_name = "RIGHT")]
    right: PathBuf,

    /// Treat arrays with the same elements in a different order as equal
    #[arg(short = 'u', long)]
    ignore_array_order: bool,

    /// Exchange the left and right inputs
    #[arg(long)]
    swap: bool,

    /// Output format
    #[arg(short = 'f', long, value_enum, default_value = "terminal")]
    format: OutputFormatArg,

    /// Input format for both documents
    #[arg(short = 'i', long, value_enum, default_value = "auto")]
    input_format: InputFormatArg,

    /// Maximum length for displayed values (0 for no limit)
    #[arg(long, default_value = "80")]
    max_value_length: usize,

    /// Log parsing and comparison steps to stderr
    #[arg(short, long)]
    verbose: bool,

    /// Suppress the summary line
    #[arg(short, long)]
    quiet: bool,
}

/// Output format argument for clap
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, ValueEnum)]
enum OutputFormatArg {
    /// Colored terminal output
    Terminal,
    /// JSON representation
    Json,
    /// Plain text (no colors)
    Plain,
}

impl From<OutputFormatArg> for OutputFormat {
    fn from(arg: OutputFormatArg) -> Self {
        match arg {
            OutputFormatArg::Terminal => OutputFormat::Terminal,
            OutputFormatArg::Json => OutputFormat::Json,
            OutputFormatArg::Plain => OutputFormat::Plain,
        }
    }
}

/// Input format argument for clap
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, ValueEnum)]
enum InputFormatArg {
    /// Detect from the file extension, then from the content
    Auto,
    Json,
    Yaml,
    Toml,
}

impl From<InputFormatArg> for FormatHint {
    fn from(arg: InputFormatArg) -> Self {
        match arg {
            InputFormatArg::Auto => FormatHint::Auto,
            InputFormatArg::Json => FormatHint::Json,
            InputFormatArg::Yaml => FormatHint::Yaml,
            InputFormatArg::Toml => FormatHint::Toml,
        }
    }
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(cli) {
        Ok(exit_code) => process::exit(exit_code),
        Err(err) => {
            eprintln!("Error: {:#}", err);
            process::exit(2);
        }
    }
}

/// `RUST_LOG` wins over `--verbose`.
fn init_tracing(verbose: bool) {
    let default_directive = if verbose { "jcompare=debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn run(cli: Cli) -> Result<i32> {
    if is_stdin(&cli.left) && is_stdin(&cli.right) {
        return Err(JcompareError::config("standard input can be used for only one side").into());
    }

    let (left_path, right_path) = if cli.swap {
        (&cli.right, &cli.left)
    } else {
        (&cli.left, &cli.right)
    };
    let hint: FormatHint = cli.input_format.into();

    let left = load(left_path, hint)
        .with_context(|| format!("Failed to parse left input: {}", left_path.display()))?;
    let right = load(right_path, hint)
        .with_context(|| format!("Failed to parse right input: {}", right_path.display()))?;

    let options = DiffOptions {
        ignore_array_order: cli.ignore_array_order,
    };
    let report = Differ::new(options).compare(&left, &right);
    debug!(
        added = report.stats.added,
        removed = report.stats.removed,
        changed = report.stats.changed,
        type_mismatch = report.stats.type_mismatch,
        "formatting report"
    );

    let output_options = OutputOptions {
        max_value_length: cli.max_value_length,
        show_summary: !cli.quiet,
    };
    let output_format: OutputFormat = cli.format.into();
    let output = format_report(&report, &output_format, &output_options)
        .context("Failed to format diff output")?;
    println!("{}", output);

    if report.is_empty() {
        Ok(0)
    } else {
        Ok(1)
    }
}

fn is_stdin(path: &Path) -> bool {
    path.as_os_str() == "-"
}

fn load(path: &Path, hint: FormatHint) -> Result<Node, ParseError> {
    debug!(path = %path.display(), "parsing input");
    if is_stdin(path) {
        parse_stdin(hint)
    } else {
        parse_file(path, hint)
    }
}
