//! Definition builder: writes variables back out as definition lines.
//!
//! Supports `.env` files, shell `export` scripts and other `name=value`
//! line formats through a prefix, separators and per-field transforms.

use std::fmt;
use std::sync::Arc;

use crate::constants::EXPORT_KEYWORD;
use crate::model::{VariableMap, Variables};

/// Operation applied to a name or value before it is written.
#[derive(Clone, Default)]
pub enum Transform {
    /// Write the text unchanged.
    #[default]
    AsIs,
    /// Wrap the text in double quotes.
    DoubleQuoted,
    /// Wrap the text in single quotes.
    SingleQuoted,
    /// Any other rewrite.
    Custom(Arc<dyn Fn(&str) -> String + Send + Sync>),
}

impl Transform {
    pub fn custom(f: impl Fn(&str) -> String + Send + Sync + 'static) -> Self {
        Transform::Custom(Arc::new(f))
    }

    pub fn apply(&self, text: &str) -> String {
        match self {
            Transform::AsIs => text.to_string(),
            Transform::DoubleQuoted => wrap_string(text, "\""),
            Transform::SingleQuoted => wrap_string(text, "'"),
            Transform::Custom(f) => f(text),
        }
    }
}

impl fmt::Debug for Transform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Transform::AsIs => f.write_str("AsIs"),
            Transform::DoubleQuoted => f.write_str("DoubleQuoted"),
            Transform::SingleQuoted => f.write_str("SingleQuoted"),
            Transform::Custom(_) => f.write_str("Custom(..)"),
        }
    }
}

/// Serializes variables into line-oriented definitions.
#[derive(Debug, Clone)]
pub struct DefinitionBuilder {
    /// Text written before each entry, traditionally `export`.
    pub prefix: String,
    /// Filler between the prefix and the name. Only used with a non-empty prefix.
    pub prefix_separator: String,
    /// Text between the name and the value, normally `=`.
    pub name_value_separator: String,
    pub name_transform: Transform,
    pub value_transform: Transform,
}

impl Default for DefinitionBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl DefinitionBuilder {
    /// `export NAME=VALUE` lines with names and values written as-is.
    pub fn new() -> Self {
        Self::shell_export()
    }

    pub fn shell_export() -> Self {
        Self {
            prefix: EXPORT_KEYWORD.to_string(),
            prefix_separator: " ".to_string(),
            name_value_separator: "=".to_string(),
            name_transform: Transform::AsIs,
            value_transform: Transform::AsIs,
        }
    }

    /// Plain `NAME=VALUE` lines.
    pub fn dotenv() -> Self {
        Self {
            prefix: String::new(),
            ..Self::shell_export()
        }
    }

    /// `NAME=VALUE` entries as a process environment would list them.
    pub fn process_env() -> Self {
        Self::dotenv()
    }

    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = prefix.into();
        self
    }

    pub fn with_prefix_separator(mut self, separator: impl Into<String>) -> Self {
        self.prefix_separator = separator.into();
        self
    }

    pub fn with_name_value_separator(mut self, separator: impl Into<String>) -> Self {
        self.name_value_separator = separator.into();
        self
    }

    pub fn with_name_transform(mut self, transform: Transform) -> Self {
        self.name_transform = transform;
        self
    }

    pub fn with_value_transform(mut self, transform: Transform) -> Self {
        self.value_transform = transform;
        self
    }

    /// One `\n`-terminated line per variable, in input order.
    pub fn build_string(&self, vars: &Variables) -> String {
        let mut out = String::new();
        for var in vars {
            self.write_line(&mut out, var.name(), var.value());
        }
        out
    }

    /// Lines for every entry of `map`, in name order.
    pub fn build_map(&self, map: &VariableMap) -> String {
        let mut out = String::new();
        for (name, value) in map {
            self.write_line(&mut out, name, value);
        }
        out
    }

    fn write_line(&self, out: &mut String, name: &str, value: &str) {
        if !self.prefix.is_empty() {
            out.push_str(&self.prefix);
            out.push_str(&self.prefix_separator);
        }
        out.push_str(&self.name_transform.apply(name));
        out.push_str(&self.name_value_separator);
        out.push_str(&self.value_transform.apply(value));
        out.push('\n');
    }
}

/// Surround `text` with `wrapper` on both sides.
pub fn wrap_string(text: &str, wrapper: &str) -> String {
    format!("{wrapper}{text}{wrapper}")
}
