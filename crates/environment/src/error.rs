//! Error types for definition parsing, expansion and translation.
//!
//! Responsibilities:
//! - Define one error variant per failure kind of the resolution engine.
//! - Carry enough context (origin, line, missing names) to report a failure once.
//! - Recover structured errors that were tunnelled through `std::io::Error`.
//!
//! Does NOT handle:
//! - Exit codes or message presentation (see the CLI crate).
//!
//! Invariants:
//! - Errors NEVER include raw definition line contents or variable values,
//!   which may be secrets. Only names, origins and positions are reported.
//! - Errors are `Clone` so a translator can repeat a recorded failure.

use std::io;
use std::sync::Arc;
use thiserror::Error;

/// Errors produced by the resolution engine.
#[derive(Error, Debug, Clone)]
pub enum EnvError {
    /// A line matched neither the comment nor the definition grammar.
    #[error("Malformed definition in {origin} at line {line}")]
    MalformedLine { origin: String, line: usize },

    /// One or more reference tokens could not be resolved.
    ///
    /// `name` is the variable being defined when the failure happened during a
    /// merge, and `None` when plain text was being expanded.
    #[error("{}", undefined_reference_message(.name.as_deref(), .origin, .missing))]
    UndefinedReference {
        name: Option<String>,
        origin: String,
        missing: Vec<String>,
    },

    /// A `$` that cannot be tokenized as a reference (strict mode only).
    #[error("{}", invalid_reference_message(.line, .column))]
    InvalidReferenceSyntax { line: Option<usize>, column: usize },

    /// Opening, reading or writing a source failed.
    #[error("I/O failure on {origin}: {source}")]
    Io {
        origin: String,
        #[source]
        source: Arc<io::Error>,
    },

    /// A settings value could not be interpreted.
    #[error("Invalid value for {var}: {message}")]
    InvalidSetting { var: String, message: String },
}

/// Plain classification of an [`EnvError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    MalformedLine,
    UndefinedReference,
    InvalidReferenceSyntax,
    IoFailure,
    InvalidSetting,
}

impl EnvError {
    /// Wrap an I/O error raised while handling `origin`.
    pub fn io(origin: impl Into<String>, source: io::Error) -> Self {
        EnvError::Io {
            origin: origin.into(),
            source: Arc::new(source),
        }
    }

    /// Classify this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            EnvError::MalformedLine { .. } => ErrorKind::MalformedLine,
            EnvError::UndefinedReference { .. } => ErrorKind::UndefinedReference,
            EnvError::InvalidReferenceSyntax { .. } => ErrorKind::InvalidReferenceSyntax,
            EnvError::Io { .. } => ErrorKind::IoFailure,
            EnvError::InvalidSetting { .. } => ErrorKind::InvalidSetting,
        }
    }

    /// Names that were referenced but not defined, if this is an
    /// `UndefinedReference` error.
    pub fn missing(&self) -> &[String] {
        match self {
            EnvError::UndefinedReference { missing, .. } => missing,
            _ => &[],
        }
    }

    /// Recover an `EnvError` from an I/O error produced by [`crate::Translator`].
    ///
    /// Plain I/O failures are wrapped as [`EnvError::Io`] with `origin`.
    pub fn from_io(err: io::Error, origin: &str) -> Self {
        if !err.get_ref().is_some_and(|inner| inner.is::<EnvError>()) {
            return EnvError::io(origin, err);
        }
        let kind = err.kind();
        match err.into_inner().map(|inner| inner.downcast::<EnvError>()) {
            Some(Ok(env_err)) => *env_err,
            Some(Err(inner)) => EnvError::io(origin, io::Error::new(kind, inner)),
            None => EnvError::io(origin, io::Error::from(kind)),
        }
    }

    /// Tunnel this error through `std::io::Error`.
    pub fn into_io(self) -> io::Error {
        match &self {
            EnvError::Io { source, .. } => io::Error::new(source.kind(), self),
            _ => io::Error::other(self),
        }
    }

    /// Attach a line number to errors that are positional within a stream.
    pub(crate) fn at_line(self, line_number: usize, origin: &str) -> Self {
        match self {
            EnvError::InvalidReferenceSyntax { column, .. } => EnvError::InvalidReferenceSyntax {
                line: Some(line_number),
                column,
            },
            EnvError::UndefinedReference { name, missing, .. } => EnvError::UndefinedReference {
                name,
                origin: format!("{} line {}", origin, line_number),
                missing,
            },
            other => other,
        }
    }
}

fn undefined_reference_message(name: Option<&str>, origin: &str, missing: &[String]) -> String {
    match name {
        Some(name) => format!(
            "Variable '{}' in {} references {} undefined variable(s): {}",
            name,
            origin,
            missing.len(),
            missing.join(", ")
        ),
        None => format!(
            "Text in {} references {} undefined variable(s): {}",
            origin,
            missing.len(),
            missing.join(", ")
        ),
    }
}

fn invalid_reference_message(line: &Option<usize>, column: &usize) -> String {
    match line {
        Some(line) => format!("Invalid variable reference at line {}, column {}", line, column),
        None => format!("Invalid variable reference at column {}", column),
    }
}
