//! Single-pass textual substitution of `$NAME` / `${NAME}` reference tokens.
//!
//! Responsibilities:
//! - Replace every well-formed reference token found in a text, including one
//!   preceded by a backslash.
//! - Report, in order of appearance, the names that could not be resolved.
//! - Optionally reject `$` sequences that cannot be tokenized.
//!
//! Does NOT handle:
//! - Recursive expansion: substituted values are never rescanned.
//! - Unescaping: backslashes stay in the output exactly as written.
//!
//! Invariants:
//! - Unresolved tokens are emitted as their own text and recorded in `missing`,
//!   once per occurrence.
//! - Substituted values lose one layer of surrounding double quotes.
//! - Expansion is not idempotent in general; callers must not assume a fixed point.

use crate::error::EnvError;
use crate::grammar::{REFERENCE_PATTERN, is_escaped, strip_quotes};
use crate::model::VariableMap;
use crate::settings::ExpandSettings;

/// Result of expanding one text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExpansionOutcome {
    /// The text with every resolvable token replaced.
    pub text: String,
    /// Names of unresolved tokens, in order of appearance, duplicates kept.
    pub missing: Vec<String>,
}

impl ExpansionOutcome {
    /// True when every reference token had an entry in the lookup.
    pub fn is_fully_resolved(&self) -> bool {
        self.missing.is_empty()
    }
}

/// Expand `text` against `lookup`, leaving unresolvable `$` sequences untouched.
pub fn expand_var_string(text: &str, lookup: &VariableMap) -> ExpansionOutcome {
    let mut out = String::with_capacity(text.len());
    let mut missing = Vec::new();
    let mut last_end = 0;

    for caps in REFERENCE_PATTERN.captures_iter(text) {
        let Some(token) = caps.get(0) else {
            continue;
        };
        let Some(name) = caps.get(1).or_else(|| caps.get(2)) else {
            continue;
        };

        out.push_str(&text[last_end..token.start()]);
        match lookup.get(name.as_str()) {
            Some(value) => out.push_str(strip_quotes(value)),
            None => {
                out.push_str(strip_quotes(token.as_str()));
                missing.push(name.as_str().to_string());
            }
        }
        last_end = token.end();
    }
    out.push_str(&text[last_end..]);

    ExpansionOutcome { text: out, missing }
}

/// Check that every unescaped `$` in `text` begins a well-formed reference token.
///
/// An escaped `$` may precede any character; it still expands when it begins a token.
/// The reported column is 1-based and counted in characters.
pub fn validate_references(text: &str) -> Result<(), EnvError> {
    for (idx, _) in text.match_indices('$') {
        if is_escaped(text, idx) {
            continue;
        }
        let starts_token = REFERENCE_PATTERN
            .find_at(text, idx)
            .is_some_and(|m| m.start() == idx);
        if !starts_token {
            return Err(EnvError::InvalidReferenceSyntax {
                line: None,
                column: text[..idx].chars().count() + 1,
            });
        }
    }
    Ok(())
}

/// Expander configured for one run.
#[derive(Debug, Clone, Copy, Default)]
pub struct Expander {
    settings: ExpandSettings,
}

impl Expander {
    pub fn new(settings: &ExpandSettings) -> Self {
        Self {
            settings: *settings,
        }
    }

    /// Expand `text`, validating reference syntax first when strict.
    ///
    /// Unresolved names are reported in the outcome, not as an error.
    pub fn expand(&self, text: &str, lookup: &VariableMap) -> Result<ExpansionOutcome, EnvError> {
        if self.settings.strict_references {
            validate_references(text)?;
        }
        Ok(expand_var_string(text, lookup))
    }
}
