//! Command dispatch logic.
//!
//! Responsibilities:
//! - Build the run's settings once and hand them to the selected command.
//! - Route parsed CLI arguments to the command handlers.
//!
//! Does NOT handle:
//! - CLI structure definitions (see `args` module).
//! - Exiting the process (see `main()`).

use anyhow::{Context, Result};

use crate::args::{Cli, Commands};
use crate::commands;
use crate::commands::exec::ExecOptions;
use crate::error::ExitCode;

/// Run the selected command and return the process exit code.
///
/// Every command except `exec` reports success as `ExitCode::Success`;
/// `exec` returns the child's exit code.
pub(crate) fn run_command(cli: Cli) -> Result<i32> {
    let settings = cli.settings().context("Failed to read settings")?;

    match cli.command {
        Commands::Exec {
            env,
            args,
            inherit_env,
            dry_run,
            no_stdout,
            no_stderr,
            program,
            extra,
        } => {
            let map = commands::load_variables(&env, &settings)?;
            let options = ExecOptions {
                program,
                args,
                extra,
                inherit_env,
                dry_run,
                no_stdout,
                no_stderr,
            };
            return commands::exec::run(&map, &options);
        }
        Commands::Read { env, input, output } => {
            let map = commands::load_variables(&env, &settings)?;
            commands::read::run(&map, &settings, input.as_deref(), output.as_deref())?;
        }
        Commands::Print { env, format } => {
            let map = commands::load_variables(&env, &settings)?;
            commands::print::run(&map, format)?;
        }
        Commands::Check { env } => {
            commands::check::run(&env, &settings)?;
        }
    }

    Ok(ExitCode::Success.as_i32())
}
