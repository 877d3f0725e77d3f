//! Variable resolution for `.env`-style definition files.
//!
//! This crate parses `NAME=VALUE` definitions, folds one or more ordered
//! sources into a fully-resolved [`VariableMap`], and applies that map to
//! arbitrary text streams through a pull-based [`Translator`].

pub mod builder;
mod constants;
pub mod error;
pub mod expander;
pub mod grammar;
pub mod model;
pub mod parser;
pub mod settings;
pub mod source;
pub mod store;
pub mod translator;

pub use builder::{DefinitionBuilder, Transform, wrap_string};
pub use error::{EnvError, ErrorKind};
pub use expander::{ExpansionOutcome, Expander, expand_var_string, validate_references};
pub use grammar::{is_valid_name, strip_quotes};
pub use model::{Variable, VariableMap, Variables};
pub use parser::{DefinitionParser, ParsedLine, parse_line, parse_reader, parse_source, parse_str};
pub use settings::{ExpandSettings, ParseSettings, Settings, env_var_or_none};
pub use source::Source;
pub use store::{VariableStore, merge};
pub use translator::Translator;
