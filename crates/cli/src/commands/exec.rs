//! Exec command implementation.
//!
//! Responsibilities:
//! - Translate `NAME[=VALUE]` arguments into program flags.
//! - Run the program with the resolved variables as its environment.
//!
//! Invariants:
//! - The child environment is empty apart from the resolved variables unless
//!   `inherit_env` is set; resolved variables always win over inherited ones.
//! - Values reach the child without their surrounding quotes.

use std::process::{Command, Stdio};
use std::sync::LazyLock;

use anyhow::{Context, Result};
use envchain_environment::VariableMap;
use regex::Regex;

use crate::error::{CliError, ExitCode};

static COMMAND_ARGUMENT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([A-Za-z][A-Za-z0-9_.-]*)(?:[=:](.*))?$")
        .unwrap_or_else(|e| panic!("built-in argument pattern failed to compile: {e}"))
});

pub struct ExecOptions {
    pub program: String,
    pub args: Vec<String>,
    pub extra: Vec<String>,
    pub inherit_env: bool,
    pub dry_run: bool,
    pub no_stdout: bool,
    pub no_stderr: bool,
}

/// Turn `NAME=VALUE` into `--NAME VALUE`, and `NAME` into `--NAME`.
///
/// Single-letter names use one dash. `:` is accepted in place of `=`.
pub fn translate_argument(raw: &str) -> Result<Vec<String>, CliError> {
    let caps = COMMAND_ARGUMENT
        .captures(raw)
        .ok_or_else(|| CliError::InvalidCommandArgument(raw.to_string()))?;
    let name = &caps[1];
    let dashes = if name.len() == 1 { "-" } else { "--" };

    let mut out = vec![format!("{dashes}{name}")];
    if let Some(value) = caps.get(2).filter(|v| !v.as_str().is_empty()) {
        out.push(value.as_str().to_string());
    }
    Ok(out)
}

pub fn run(map: &VariableMap, options: &ExecOptions) -> Result<i32> {
    let mut argv = Vec::new();
    for raw in &options.args {
        argv.extend(translate_argument(raw)?);
    }
    argv.extend(options.extra.iter().cloned());

    let env = map.to_process_env();

    if options.dry_run {
        println!("Command: {} {}", options.program, argv.join(" "));
        println!("Inherit environment: {}", options.inherit_env);
        println!("Environment:");
        for (name, value) in &env {
            println!("  {name}={value}");
        }
        return Ok(ExitCode::Success.as_i32());
    }

    let mut command = Command::new(&options.program);
    command.args(&argv);
    if !options.inherit_env {
        command.env_clear();
    }
    command.envs(env);
    if options.no_stdout {
        command.stdout(Stdio::null());
    }
    if options.no_stderr {
        command.stderr(Stdio::null());
    }

    tracing::info!(program = %options.program, args = argv.len(), "Running command");
    let status = command
        .status()
        .with_context(|| format!("Failed to run '{}'", options.program))?;
    tracing::debug!(%status, "Command finished");

    Ok(status.code().unwrap_or(ExitCode::GeneralError.as_i32()))
}
