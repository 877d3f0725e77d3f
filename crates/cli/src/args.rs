//! CLI argument definitions and parsing.
//!
//! Responsibilities:
//! - Define the CLI structure using clap derive macros.
//! - Turn the global flags into engine `Settings`.
//!
//! Non-responsibilities:
//! - Does not execute commands (see `dispatch` module).
//! - Does not expand globs (see `paths` module).

use clap::{Args, Parser, Subcommand, ValueEnum};
use envchain_environment::{EnvError, Settings};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "envchain")]
#[command(about = "Resolve .env definition files and apply them to commands and text", long_about = None)]
#[command(version)]
#[command(
    after_help = "Examples:\n  envchain exec -e 'conf/*.env' -a port=8080 ./server\n  envchain exec -e base.env -e prod.env --dry-run -- env\n  envchain read -e app.env -i config.tmpl -o config.ini\n  envchain print -e app.env --format json\n  envchain check -e 'env/*.env'\n"
)]
pub struct Cli {
    /// Treat blank lines in definition files as ignorable instead of malformed.
    ///
    /// Can also be enabled via ENVCHAIN_ALLOW_BLANK_LINES=true.
    #[arg(long, global = true)]
    pub allow_blank_lines: bool,

    /// Reject any `$` that does not start a `$NAME` or `${NAME}` reference.
    ///
    /// Can also be enabled via ENVCHAIN_STRICT_REFERENCES=true.
    #[arg(long, global = true)]
    pub strict_references: bool,

    /// Increase log verbosity (-v info, -vv debug). RUST_LOG takes precedence.
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    /// Settings from `ENVCHAIN_*` variables, with flags switching options on.
    pub fn settings(&self) -> Result<Settings, EnvError> {
        let mut settings = Settings::from_env()?;
        if self.allow_blank_lines {
            settings = settings.with_allow_blank_lines(true);
        }
        if self.strict_references {
            settings = settings.with_strict_references(true);
        }
        Ok(settings)
    }
}

/// Definition files to merge, in order.
#[derive(Args, Debug, Clone)]
pub struct EnvFiles {
    /// Glob matching definition files. Repeat to merge several in order.
    #[arg(short = 'e', long = "env", value_name = "GLOB", required = true)]
    pub patterns: Vec<String>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run a command with the resolved variables as its environment
    Exec {
        #[command(flatten)]
        env: EnvFiles,

        /// Argument for the command as NAME[=VALUE]; passed as `--NAME VALUE`
        /// (`-N VALUE` for single-letter names)
        #[arg(short = 'a', long = "arg", value_name = "NAME[=VALUE]")]
        args: Vec<String>,

        /// Start from the current process environment instead of an empty one
        #[arg(long)]
        inherit_env: bool,

        /// Print the command and its environment instead of running it
        #[arg(long)]
        dry_run: bool,

        /// Discard the command's standard output
        #[arg(long)]
        no_stdout: bool,

        /// Discard the command's standard error
        #[arg(long)]
        no_stderr: bool,

        /// Program to run
        #[arg(value_name = "COMMAND")]
        program: String,

        /// Extra arguments passed to the program verbatim
        #[arg(trailing_var_arg = true, allow_hyphen_values = true, value_name = "ARGS")]
        extra: Vec<String>,
    },

    /// Copy text, replacing references with resolved values
    Read {
        #[command(flatten)]
        env: EnvFiles,

        /// File to read (defaults to stdin)
        #[arg(short = 'i', long = "input", value_name = "FILE")]
        input: Option<PathBuf>,

        /// File to write (defaults to stdout)
        #[arg(short = 'o', long = "output", value_name = "FILE")]
        output: Option<PathBuf>,
    },

    /// Print the resolved variables
    Print {
        #[command(flatten)]
        env: EnvFiles,

        /// Output format
        #[arg(long, value_enum, default_value_t = PrintFormat::Dotenv)]
        format: PrintFormat,
    },

    /// Validate definition files without producing output
    Check {
        #[command(flatten)]
        env: EnvFiles,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum PrintFormat {
    /// NAME=VALUE lines
    Dotenv,
    /// export NAME=VALUE lines
    Export,
    /// A JSON object
    Json,
}
