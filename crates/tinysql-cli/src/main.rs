//! tinysql CLI
//!
//! Prints tokens, AST and diagnostics for tinysql sources.

use std::io::{self, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;
use tracing::{error, Level};
use tracing_subscriber::FmtSubscriber;

use tinysql_cli::{run_source, Format, Input, Options};
use tinysql_core::{Dialect, Locations};

/// Lexes and parses tinysql sources.
#[derive(Parser)]
#[command(name = "tinysql")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Files to process. Reads standard input when empty or `-`.
    files: Vec<PathBuf>,

    /// How double quotes are tokenized.
    #[arg(short, long, env = "TINYSQL_DIALECT", default_value = "double-quoted-strings")]
    dialect: Dialect,

    /// Output format.
    #[arg(short, long, value_enum, default_value_t = Format::Report)]
    format: Format,

    /// Keep source locations in tokens and AST output.
    #[arg(long)]
    locations: bool,

    /// Enable verbose output.
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    // Setup logging
    let log_level = if cli.verbose {
        Level::DEBUG
    } else {
        Level::INFO
    };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_target(false)
        .without_time()
        .with_writer(io::stderr)
        .finish();
    if let Err(err) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("Failed to install logger: {err}");
    }

    match run(&cli) {
        Ok(false) => ExitCode::SUCCESS,
        Ok(true) => ExitCode::from(1),
        Err(err) => {
            error!("{err:#}");
            ExitCode::from(2)
        }
    }
}

/// Processes all inputs. Returns true if any of them had errors.
fn run(cli: &Cli) -> anyhow::Result<bool> {
    let options = Options {
        dialect: cli.dialect,
        format: cli.format,
        locations: if cli.locations {
            Locations::Keep
        } else {
            Locations::Strip
        },
    };

    let stdout = io::stdout();
    let mut out = stdout.lock();
    let mut has_errors = false;
    for input in Input::from_args(&cli.files) {
        let name = input.to_string();
        let source = input.read()?;
        has_errors |= run_source(&mut out, &name, &source, &options)
            .with_context(|| format!("Failed to process {name}"))?;
    }
    out.flush().context("Failed to flush output")?;
    Ok(has_errors)
}
