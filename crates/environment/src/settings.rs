//! Per-run settings for parsing and expansion.
//!
//! Responsibilities:
//! - Hold the few behaviour switches of the engine in one explicit value.
//! - Apply overrides from `ENVCHAIN_*` environment variables.
//!
//! Does NOT handle:
//! - Command-line flags (the CLI builds a `Settings` and passes it down).
//!
//! Invariants:
//! - There is no global settings state; every component borrows a `Settings`.
//! - Empty or whitespace-only environment variables are treated as unset.
//! - Defaults reproduce the strict grammar: blank lines are malformed and
//!   unparseable `$` sequences are passed through untouched.

use crate::constants::{ENV_ALLOW_BLANK_LINES, ENV_STRICT_REFERENCES};
use crate::error::EnvError;

/// Settings for the definition parser.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ParseSettings {
    /// Classify empty or whitespace-only lines as `Blank` instead of malformed.
    pub allow_blank_lines: bool,
}

/// Settings for the variable expander.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ExpandSettings {
    /// Reject any unescaped `$` that does not begin a reference token.
    pub strict_references: bool,
}

/// All settings for one run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Settings {
    pub parse: ParseSettings,
    pub expand: ExpandSettings,
}

impl Settings {
    pub fn new() -> Self {
        Self::default()
    }

    /// Defaults with environment variable overrides applied.
    pub fn from_env() -> Result<Self, EnvError> {
        let mut settings = Self::default();
        settings.apply_env()?;
        Ok(settings)
    }

    pub fn with_allow_blank_lines(mut self, allow: bool) -> Self {
        self.parse.allow_blank_lines = allow;
        self
    }

    pub fn with_strict_references(mut self, strict: bool) -> Self {
        self.expand.strict_references = strict;
        self
    }

    /// Override fields from `ENVCHAIN_*` environment variables that are set.
    pub fn apply_env(&mut self) -> Result<(), EnvError> {
        if let Some(allow) = env_var_or_none(ENV_ALLOW_BLANK_LINES) {
            self.parse.allow_blank_lines = parse_bool(ENV_ALLOW_BLANK_LINES, &allow)?;
        }
        if let Some(strict) = env_var_or_none(ENV_STRICT_REFERENCES) {
            self.expand.strict_references = parse_bool(ENV_STRICT_REFERENCES, &strict)?;
        }
        Ok(())
    }
}

/// Value of `key` with surrounding whitespace removed.
///
/// Unset, blank and non-UTF-8 values all count as absent, so a stray
/// `ENVCHAIN_STRICT_REFERENCES=` leaves the default in place.
pub fn env_var_or_none(key: &str) -> Option<String> {
    let raw = std::env::var(key).ok()?;
    match raw.trim() {
        "" => None,
        value => Some(value.to_owned()),
    }
}

fn parse_bool(var: &str, raw: &str) -> Result<bool, EnvError> {
    match raw.to_ascii_lowercase().as_str() {
        "true" | "1" => Ok(true),
        "false" | "0" => Ok(false),
        _ => Err(EnvError::InvalidSetting {
            var: var.to_string(),
            message: "must be true, false, 1 or 0".to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    fn test_defaults_are_strict_grammar() {
        let settings = Settings::default();
        assert!(!settings.parse.allow_blank_lines);
        assert!(!settings.expand.strict_references);
    }

    #[test]
    fn test_builder_methods() {
        let settings = Settings::new()
            .with_allow_blank_lines(true)
            .with_strict_references(true);
        assert!(settings.parse.allow_blank_lines);
        assert!(settings.expand.strict_references);
    }

    #[test]
    #[serial]
    fn test_env_var_or_none_filters_empty_and_whitespace_strings() {
        let _lock = crate::test_util::global_test_lock().lock().unwrap();
        let key = "_ENVCHAIN_TEST_SETTING";
        temp_env::with_vars([(key, Some("   "))], || {
            assert!(env_var_or_none(key).is_none());
        });
        temp_env::with_vars([(key, Some(" on "))], || {
            assert_eq!(env_var_or_none(key), Some("on".to_string()));
        });
        temp_env::with_vars([(key, None::<&str>)], || {
            assert!(env_var_or_none(key).is_none());
        });
    }

    #[test]
    #[serial]
    fn test_from_env_reads_overrides() {
        let _lock = crate::test_util::global_test_lock().lock().unwrap();
        temp_env::with_vars(
            [
                (ENV_ALLOW_BLANK_LINES, Some("TRUE")),
                (ENV_STRICT_REFERENCES, Some("0")),
            ],
            || {
                let settings = Settings::from_env().unwrap();
                assert!(settings.parse.allow_blank_lines);
                assert!(!settings.expand.strict_references);
            },
        );
    }

    #[test]
    #[serial]
    fn test_from_env_rejects_unknown_boolean() {
        let _lock = crate::test_util::global_test_lock().lock().unwrap();
        temp_env::with_vars([(ENV_STRICT_REFERENCES, Some("sometimes"))], || {
            match Settings::from_env() {
                Err(EnvError::InvalidSetting { var, .. }) => {
                    assert_eq!(var, ENV_STRICT_REFERENCES)
                }
                other => panic!("expected InvalidSetting, got {:?}", other),
            }
        });
    }
}
