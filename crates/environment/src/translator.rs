//! Streaming translator: substitutes references in an arbitrary byte stream.
//!
//! Responsibilities:
//! - Pull whole lines from a source and expand each against a fixed map.
//! - Serve the expanded bytes through `std::io::Read` from an internal FIFO.
//!
//! Does NOT handle:
//! - Building the lookup map (see `store.rs`).
//! - Choosing where output goes; callers copy into any `Write`.
//!
//! Invariants:
//! - A line is the bytes up to and including `\n`, or the final unterminated
//!   fragment. Expansion never looks past the current line, so a `${NAME`
//!   whose `}` sits on the next line is passed through as literal text.
//! - The first failing line is recorded. Its error is returned only after all
//!   output produced before that line has been read, and every later read
//!   returns the same error.
//! - `Ok(0)` is returned for a non-empty buffer only once the source is
//!   exhausted and the FIFO is drained.

use std::collections::VecDeque;
use std::io::{self, BufRead, BufReader, Read, Write};

use crate::constants::{INLINE_ORIGIN, TRANSLATOR_READ_CAPACITY};
use crate::error::EnvError;
use crate::expander::Expander;
use crate::model::VariableMap;
use crate::settings::ExpandSettings;

/// Pull-based reader that expands references line by line.
pub struct Translator<'m, R> {
    reader: BufReader<R>,
    lookup: &'m VariableMap,
    expander: Expander,
    origin: String,
    pending: VecDeque<u8>,
    line: Vec<u8>,
    line_number: usize,
    exhausted: bool,
    failure: Option<EnvError>,
}

impl<'m, R: Read> Translator<'m, R> {
    /// Wrap `reader`, expanding against `lookup` with default settings.
    pub fn new(reader: R, lookup: &'m VariableMap) -> Self {
        Self {
            reader: BufReader::with_capacity(TRANSLATOR_READ_CAPACITY, reader),
            lookup,
            expander: Expander::default(),
            origin: INLINE_ORIGIN.to_string(),
            pending: VecDeque::new(),
            line: Vec::new(),
            line_number: 0,
            exhausted: false,
            failure: None,
        }
    }

    pub fn with_settings(mut self, settings: &ExpandSettings) -> Self {
        self.expander = Expander::new(settings);
        self
    }

    /// Label used for the source in error messages.
    pub fn with_origin(mut self, origin: impl Into<String>) -> Self {
        self.origin = origin.into();
        self
    }

    /// Number of expanded bytes waiting to be read.
    pub fn buffered_len(&self) -> usize {
        self.pending.len()
    }

    /// Number of source lines pulled so far.
    pub fn lines_read(&self) -> usize {
        self.line_number
    }

    /// Copy the whole translated stream into `out`.
    ///
    /// Bytes translated before a failing line are written before the error is
    /// returned.
    pub fn translate_to<W: Write + ?Sized>(mut self, out: &mut W) -> Result<u64, EnvError> {
        let origin = self.origin.clone();
        io::copy(&mut self, out).map_err(|e| EnvError::from_io(e, &format!("output for {}", origin)))
    }

    fn pull_line(&mut self) {
        self.line.clear();
        match self.reader.read_until(b'\n', &mut self.line) {
            Ok(0) => self.exhausted = true,
            Ok(_) => {
                self.line_number += 1;
                match self.translate_line() {
                    Ok(text) => self.pending.extend(text.as_bytes()),
                    Err(err) => {
                        tracing::debug!(origin = %self.origin, line = self.line_number, "Translation stopped");
                        self.failure = Some(err);
                    }
                }
            }
            Err(e) => self.failure = Some(EnvError::io(self.origin.clone(), e)),
        }
    }

    fn translate_line(&self) -> Result<String, EnvError> {
        let text = std::str::from_utf8(&self.line).map_err(|e| {
            EnvError::io(
                format!("{} line {}", self.origin, self.line_number),
                io::Error::new(io::ErrorKind::InvalidData, e),
            )
        })?;
        let outcome = self
            .expander
            .expand(text, self.lookup)
            .map_err(|e| e.at_line(self.line_number, &self.origin))?;
        if !outcome.is_fully_resolved() {
            return Err(EnvError::UndefinedReference {
                name: None,
                origin: self.origin.clone(),
                missing: outcome.missing,
            }
            .at_line(self.line_number, &self.origin));
        }
        Ok(outcome.text)
    }
}

impl<R: Read> Read for Translator<'_, R> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        if buf.is_empty() {
            return Ok(0);
        }
        while self.pending.len() < buf.len() && !self.exhausted && self.failure.is_none() {
            self.pull_line();
        }
        if self.pending.is_empty() {
            return match &self.failure {
                Some(err) => Err(err.clone().into_io()),
                None => Ok(0),
            };
        }
        let n = buf.len().min(self.pending.len());
        for (slot, byte) in buf.iter_mut().zip(self.pending.drain(..n)) {
            *slot = byte;
        }
        Ok(n)
    }
}
