//! CLI errors and exit codes for scripting and automation.
//!
//! Responsibilities:
//! - Define structured exit codes that scripts can use to distinguish error types.
//! - Map `EnvError` and `CliError` variants to exit codes.
//!
//! Does NOT handle:
//! - Error message formatting (handled by anyhow Display).
//!
//! Invariants:
//! - Exit codes 1-6 are reserved for specific error categories.
//! - `exec` exits with the child's own code, which may overlap these values.

use envchain_environment::{EnvError, ErrorKind};
use std::path::PathBuf;
use thiserror::Error;

/// Errors raised by the CLI layer itself.
#[derive(Error, Debug)]
pub enum CliError {
    #[error("No files match pattern '{pattern}'")]
    NoMatches { pattern: String },

    #[error("Invalid pattern '{pattern}': {message}")]
    InvalidPattern { pattern: String, message: String },

    #[error("Failed to read {}", path.display())]
    Unreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid command argument '{0}', expected NAME or NAME=VALUE")]
    InvalidCommandArgument(String),
}

/// Structured exit codes for envchain.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum ExitCode {
    /// Success - command completed successfully.
    Success = 0,

    /// General error - unhandled or generic failure.
    GeneralError = 1,

    /// A definition line matched neither the comment nor the definition grammar.
    MalformedDefinition = 2,

    /// A reference named a variable that was not defined before it.
    UndefinedReference = 3,

    /// A `$` could not be read as a reference (strict mode).
    InvalidReferenceSyntax = 4,

    /// A file could not be found, opened, read or written.
    IoFailure = 5,

    /// An `ENVCHAIN_*` setting had an unusable value.
    InvalidSetting = 6,
}

impl ExitCode {
    /// Convert the exit code to an i32 for use with std::process::exit().
    pub const fn as_i32(self) -> i32 {
        self as u8 as i32
    }
}

impl From<&EnvError> for ExitCode {
    fn from(err: &EnvError) -> Self {
        match err.kind() {
            ErrorKind::MalformedLine => ExitCode::MalformedDefinition,
            ErrorKind::UndefinedReference => ExitCode::UndefinedReference,
            ErrorKind::InvalidReferenceSyntax => ExitCode::InvalidReferenceSyntax,
            ErrorKind::IoFailure => ExitCode::IoFailure,
            ErrorKind::InvalidSetting => ExitCode::InvalidSetting,
        }
    }
}

impl From<&CliError> for ExitCode {
    fn from(err: &CliError) -> Self {
        match err {
            CliError::NoMatches { .. } | CliError::Unreadable { .. } => ExitCode::IoFailure,
            CliError::InvalidPattern { .. } | CliError::InvalidCommandArgument(_) => {
                ExitCode::GeneralError
            }
        }
    }
}

/// Extension trait for anyhow::Error to extract exit codes.
pub trait ExitCodeExt {
    /// Extract the appropriate exit code from this error.
    ///
    /// Returns ExitCode::GeneralError if no known error is in the chain.
    /// Plain I/O errors anywhere in the chain map to ExitCode::IoFailure.
    fn exit_code(&self) -> ExitCode;
}

impl ExitCodeExt for anyhow::Error {
    fn exit_code(&self) -> ExitCode {
        for cause in self.chain() {
            if let Some(env_err) = cause.downcast_ref::<EnvError>() {
                return ExitCode::from(env_err);
            }
            if let Some(cli_err) = cause.downcast_ref::<CliError>() {
                return ExitCode::from(cli_err);
            }
            if cause.downcast_ref::<std::io::Error>().is_some() {
                return ExitCode::IoFailure;
            }
        }
        ExitCode::GeneralError
    }
}
