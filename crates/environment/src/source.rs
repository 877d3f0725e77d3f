//! Line-oriented origins of definitions.
//!
//! Invariants:
//! - Files are opened inside the call that reads them and closed when that
//!   call returns, on success and failure alike.

use std::fmt;
use std::fs::File;
use std::io::{BufRead, BufReader, Read};
use std::path::PathBuf;

use crate::error::EnvError;

/// An ordered, line-oriented text origin supplying definitions.
pub enum Source<'a> {
    /// A file, opened lazily when the source is read.
    Path(PathBuf),
    /// In-memory text.
    Text { origin: String, text: String },
    /// Any reader, labelled for error reporting.
    Reader {
        origin: String,
        reader: Box<dyn Read + 'a>,
    },
}

impl<'a> Source<'a> {
    pub fn path(path: impl Into<PathBuf>) -> Self {
        Source::Path(path.into())
    }

    pub fn text(origin: impl Into<String>, text: impl Into<String>) -> Self {
        Source::Text {
            origin: origin.into(),
            text: text.into(),
        }
    }

    pub fn reader(origin: impl Into<String>, reader: impl Read + 'a) -> Self {
        Source::Reader {
            origin: origin.into(),
            reader: Box::new(reader),
        }
    }

    /// Human-readable label used in errors and logs.
    pub fn origin(&self) -> String {
        match self {
            Source::Path(path) => path.display().to_string(),
            Source::Text { origin, .. } | Source::Reader { origin, .. } => origin.clone(),
        }
    }

    /// Open the source for line reading.
    pub(crate) fn open(self) -> Result<(String, Box<dyn BufRead + 'a>), EnvError> {
        let origin = self.origin();
        let reader: Box<dyn BufRead + 'a> = match self {
            Source::Path(path) => {
                let file = File::open(&path).map_err(|e| EnvError::io(origin.clone(), e))?;
                Box::new(BufReader::new(file))
            }
            Source::Text { text, .. } => Box::new(std::io::Cursor::new(text.into_bytes())),
            Source::Reader { reader, .. } => Box::new(BufReader::new(reader)),
        };
        Ok((origin, reader))
    }
}

impl fmt::Debug for Source<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Source::Path(path) => f.debug_tuple("Path").field(path).finish(),
            Source::Text { origin, .. } => f.debug_struct("Text").field("origin", origin).finish(),
            Source::Reader { origin, .. } => {
                f.debug_struct("Reader").field("origin", origin).finish()
            }
        }
    }
}
