//! Definition parser.
//!
//! Responsibilities:
//! - Classify a single line as a definition, comment, blank or malformed line.
//! - Parse a whole source into ordered `Variables`, all or nothing.
//!
//! Does NOT handle:
//! - Expansion of reference tokens (see `expander.rs`).
//! - Merging definitions across sources (see `store.rs`).
//!
//! Invariants:
//! - The first malformed line aborts the whole source; no partial list is returned.
//! - Under default settings blank lines are malformed; there is no implicit
//!   comment status for them.
//! - Values are kept raw, including one optional layer of surrounding quotes.
//! - Errors report origin and line number only, never line contents.

use std::io::{BufRead, Read};

use crate::constants::INLINE_ORIGIN;
use crate::error::EnvError;
use crate::grammar::{COMMENT_PATTERN, DEFINITION_PATTERN, VALUE_PATTERN};
use crate::model::{Variable, Variables};
use crate::settings::ParseSettings;
use crate::source::Source;

/// Classification of a single line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParsedLine {
    Variable(Variable),
    Comment,
    Blank,
    Malformed,
}

/// Line parser configured for one run.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefinitionParser {
    settings: ParseSettings,
}

impl DefinitionParser {
    pub fn new(settings: &ParseSettings) -> Self {
        Self {
            settings: *settings,
        }
    }

    /// Classify one line. `line` must not contain its terminator.
    pub fn parse_line(&self, line: &str) -> ParsedLine {
        if line.trim_matches([' ', '\t']).is_empty() {
            return if self.settings.allow_blank_lines {
                ParsedLine::Blank
            } else {
                ParsedLine::Malformed
            };
        }
        if COMMENT_PATTERN.is_match(line) {
            return ParsedLine::Comment;
        }
        let Some(caps) = DEFINITION_PATTERN.captures(line) else {
            return ParsedLine::Malformed;
        };
        let (name, value) = (&caps[1], &caps[2]);
        if !VALUE_PATTERN.is_match(value) {
            return ParsedLine::Malformed;
        }
        ParsedLine::Variable(Variable::new(name, value))
    }

    /// Parse every line of `reader`, failing on the first malformed one.
    pub fn parse_reader<R: BufRead>(&self, reader: R, origin: &str) -> Result<Variables, EnvError> {
        let mut vars = Variables::new();
        for (idx, line) in reader.lines().enumerate() {
            let line = line.map_err(|e| EnvError::io(origin, e))?;
            match self.parse_line(&line) {
                ParsedLine::Variable(var) => vars.push(var),
                ParsedLine::Comment | ParsedLine::Blank => {}
                ParsedLine::Malformed => {
                    return Err(EnvError::MalformedLine {
                        origin: origin.to_string(),
                        line: idx + 1,
                    });
                }
            }
        }
        tracing::debug!(origin, count = vars.len(), "Parsed definitions");
        Ok(vars)
    }

    /// Open and parse a source.
    pub fn parse_source(&self, source: Source<'_>) -> Result<Variables, EnvError> {
        let (origin, reader) = source.open()?;
        self.parse_reader(reader, &origin)
    }
}

/// Classify one line under strict default settings.
pub fn parse_line(line: &str) -> ParsedLine {
    DefinitionParser::default().parse_line(line)
}

/// Parse definitions from any reader.
pub fn parse_reader<R: Read>(
    reader: R,
    origin: &str,
    settings: &ParseSettings,
) -> Result<Variables, EnvError> {
    DefinitionParser::new(settings).parse_reader(std::io::BufReader::new(reader), origin)
}

/// Parse definitions from in-memory text.
pub fn parse_str(text: &str, settings: &ParseSettings) -> Result<Variables, EnvError> {
    DefinitionParser::new(settings).parse_reader(text.as_bytes(), INLINE_ORIGIN)
}

/// Parse definitions from a source.
pub fn parse_source(source: Source<'_>, settings: &ParseSettings) -> Result<Variables, EnvError> {
    DefinitionParser::new(settings).parse_source(source)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn var(name: &str, value: &str) -> ParsedLine {
        ParsedLine::Variable(Variable::new(name, value))
    }

    #[test]
    fn test_simple_definition() {
        assert_eq!(parse_line("SOMEVAR=notmuch"), var("SOMEVAR", "notmuch"));
    }

    #[test]
    fn test_export_prefix_and_whitespace() {
        assert_eq!(parse_line("export SOMEVAR=notmuch"), var("SOMEVAR", "notmuch"));
        assert_eq!(parse_line("\t export \tA = 1"), var("A", "1"));
    }

    #[test]
    fn test_export_without_space_is_part_of_name() {
        assert_eq!(parse_line("exportSOMEVAR=x"), var("exportSOMEVAR", "x"));
        assert_eq!(parse_line("exportSOMEVAR+notmuch"), ParsedLine::Malformed);
    }

    #[test]
    fn test_quoted_value_is_kept_raw() {
        assert_eq!(parse_line("A=\"hello world\""), var("A", "\"hello world\""));
    }

    #[test]
    fn test_references_and_escapes_in_value() {
        assert_eq!(parse_line("URL=http://${HOST}:$PORT"), var("URL", "http://${HOST}:$PORT"));
        assert_eq!(parse_line(r"A=cost\$5"), var("A", r"cost\$5"));
        assert_eq!(parse_line(r#"A="say \"hi\"""#), var("A", r#""say \"hi\"""#));
    }

    #[test]
    fn test_trailing_backslash_is_literal() {
        assert_eq!(parse_line(r"DIR=C:\tmp\"), var("DIR", r"C:\tmp\"));
        assert_eq!(parse_line(r"SEP=\"), var("SEP", r"\"));
        assert_eq!(parse_line(r#"Q="open\""#), ParsedLine::Malformed);
    }

    #[test]
    fn test_empty_value() {
        assert_eq!(parse_line("EMPTY="), var("EMPTY", ""));
    }

    #[test]
    fn test_comments() {
        assert_eq!(parse_line("# note"), ParsedLine::Comment);
        assert_eq!(parse_line("   ## indented"), ParsedLine::Comment);
        assert_eq!(parse_line("#A=1"), ParsedLine::Comment);
    }

    #[test]
    fn test_malformed_lines() {
        for line in [
            "NO_EQUALS",
            "1A=bad-name",
            "A=\"unterminated",
            "A=in\"side",
            "A=$",
            "A=${OPEN",
            "A=\"x\" trailing",
        ] {
            assert_eq!(parse_line(line), ParsedLine::Malformed, "{line}");
        }
    }

    #[test]
    fn test_blank_line_is_malformed_by_default() {
        assert_eq!(parse_line(""), ParsedLine::Malformed);
        assert_eq!(parse_line(" \t "), ParsedLine::Malformed);
    }

    #[test]
    fn test_blank_line_allowed_by_settings() {
        let parser = DefinitionParser::new(&ParseSettings {
            allow_blank_lines: true,
        });
        assert_eq!(parser.parse_line(""), ParsedLine::Blank);
    }

    #[test]
    fn test_parse_str_skips_comments() {
        let vars = parse_str("# note\nA=1\n", &ParseSettings::default()).unwrap();
        assert_eq!(vars.as_slice(), &[Variable::new("A", "1")]);
    }

    #[test]
    fn test_parse_str_rejects_leading_blank_line() {
        match parse_str("\nA=1\n", &ParseSettings::default()) {
            Err(EnvError::MalformedLine { line, .. }) => assert_eq!(line, 1),
            other => panic!("expected MalformedLine, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_str_reports_offending_line_without_content() {
        let err = parse_str("A=1\nTOKEN secret\n", &ParseSettings::default()).unwrap_err();
        match &err {
            EnvError::MalformedLine { line, origin } => {
                assert_eq!(*line, 2);
                assert_eq!(origin, INLINE_ORIGIN);
            }
            other => panic!("expected MalformedLine, got {:?}", other),
        }
        assert!(!err.to_string().contains("secret"));
    }

    #[test]
    fn test_crlf_line_endings() {
        let vars = parse_str("A=1\r\nB=2\r\n", &ParseSettings::default()).unwrap();
        assert_eq!(vars.len(), 2);
        assert_eq!(vars.as_slice()[1], Variable::new("B", "2"));
    }

    #[test]
    fn test_duplicates_are_kept_in_order() {
        let vars = parse_str("A=1\nA=2", &ParseSettings::default()).unwrap();
        let values: Vec<&str> = vars.iter().map(|v| v.value()).collect();
        assert_eq!(values, vec!["1", "2"]);
    }
}
