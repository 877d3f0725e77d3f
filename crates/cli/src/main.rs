//! envchain - resolve `.env` definition files and apply them.
//!
//! Responsibilities:
//! - Parse command-line arguments.
//! - Install logging before any command runs.
//! - Map the command outcome to a process exit code.
//!
//! Does NOT handle:
//! - Parsing, expansion or translation (see `crates/environment`).
//!
//! Invariants:
//! - Logs are written to stderr so `read` and `print` output on stdout stays clean.
//! - `RUST_LOG` takes precedence over `-v`.
//! - This is the only place the process exits.

mod args;
mod commands;
mod dispatch;
mod error;
mod paths;

use args::Cli;
use clap::Parser;
use dispatch::run_command;
use error::ExitCodeExt;
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

fn main() {
    let cli = Cli::parse();

    tracing_subscriber::registry()
        .with(log_filter(cli.verbose))
        .with(fmt::layer().with_writer(std::io::stderr))
        .init();

    let exit_code = match run_command(cli) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            e.exit_code().as_i32()
        }
    };

    std::process::exit(exit_code);
}

fn log_filter(verbose: u8) -> EnvFilter {
    let level = match verbose {
        0 => LevelFilter::WARN,
        1 => LevelFilter::INFO,
        _ => LevelFilter::DEBUG,
    };
    EnvFilter::builder()
        .with_default_directive(level.into())
        .from_env_lossy()
}
