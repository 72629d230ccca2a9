//! `jsonmatch` CLI — diff a JSON payload against an expectation document.
//!
//! ## Usage
//!
//! ```sh
//! # Payload on stdin, one diff per line on stdout
//! curl -s https://example.com/api/users/1 | jsonmatch diff --expected user.json
//!
//! # Payload from a file, diffs as a JSON array
//! jsonmatch diff --expected user.json -i response.json --format json
//!
//! # Verbose logging on stderr
//! RUST_LOG=jsonmatch=debug jsonmatch diff --expected user.json -i response.json
//! ```
//!
//! Exit status: 0 when the payload matches, 1 when there are diffs, 2 on
//! usage or I/O errors.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use jsonmatch::{Diff, Expected};
use std::io::{self, Read};
use std::process::ExitCode;
use tracing::debug;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "jsonmatch",
    version,
    about = "Diff JSON payloads against expectation documents"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compare a payload against an expectation and print every discrepancy
    Diff {
        /// Expectation document (JSON)
        #[arg(short, long)]
        expected: String,
        /// Actual payload (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,
        /// Output format for the diff list
        #[arg(long, value_enum, default_value_t = Format::Text)]
        format: Format,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum Format {
    /// One line per diff
    Text,
    /// A pretty-printed JSON array of diff objects
    Json,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    match run(cli.command) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::from(1),
        Err(err) => {
            eprintln!("Error: {err:#}");
            ExitCode::from(2)
        }
    }
}

/// Returns whether the payload matched.
fn run(command: Commands) -> Result<bool> {
    match command {
        Commands::Diff {
            expected,
            input,
            format,
        } => {
            let text = std::fs::read_to_string(&expected)
                .with_context(|| format!("Failed to read file: {}", expected))?;
            let expectation = Expected::from_json_str(&text)
                .with_context(|| format!("Expectation is not valid JSON: {}", expected))?;
            let payload = read_payload(input.as_deref())?;

            let diffs = expectation.diff_against(&payload);
            debug!(diffs = diffs.len(), "diff complete");
            print!("{}", render(&diffs, format)?);
            Ok(diffs.is_empty())
        }
    }
}

fn render(diffs: &[Diff], format: Format) -> Result<String> {
    match format {
        Format::Text => Ok(diffs.iter().map(|d| format!("{d}\n")).collect()),
        Format::Json => {
            let mut out = serde_json::to_string_pretty(diffs)?;
            out.push('\n');
            Ok(out)
        }
    }
}

/// Payloads are read as raw bytes so invalid UTF-8 reaches the matcher.
fn read_payload(path: Option<&str>) -> Result<Vec<u8>> {
    match path {
        Some(path) => std::fs::read(path).with_context(|| format!("Failed to read file: {}", path)),
        None => {
            let mut buf = Vec::new();
            io::stdin()
                .read_to_end(&mut buf)
                .context("Failed to read from stdin")?;
            Ok(buf)
        }
    }
}
