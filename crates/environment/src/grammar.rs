//! Canonical name, reference and definition-line patterns.
//!
//! Responsibilities:
//! - Compile every matcher exactly once per process.
//! - Expose small helpers shared by the parser, expander and builder.
//!
//! Invariants:
//! - `name      := LETTER (LETTER | DIGIT | '_' | '-')*`
//! - `reference := '${' name '}' | '$' name` (braced form first, longest name)
//! - `line      := WS* ('export' WS+)? WS* name WS* '=' WS* value`
//! - `value     := '"' inner '"' | inner`
//! - `inner     := ('\' ANY | '\' END | reference | [^"$\\\r\n])*`
//! - Inside a definition value a backslash escapes the following character;
//!   escapes stay in the raw text. A lone trailing backslash is literal.

use regex::Regex;
use std::sync::LazyLock;

use crate::constants::{EXPORT_KEYWORD, HSPACE_FRAGMENT, NAME_FRAGMENT};

fn compile(pattern: String) -> Regex {
    match Regex::new(&pattern) {
        Ok(regex) => regex,
        Err(e) => panic!("built-in pattern {pattern:?} failed to compile: {e}"),
    }
}

/// Matches a complete name.
pub static NAME_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| compile(format!("^{NAME_FRAGMENT}$")));

/// Matches a reference token. Group 1 holds a braced name, group 2 a bare name.
pub static REFERENCE_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    compile(format!(
        r"\$\{{({NAME_FRAGMENT})\}}|\$({NAME_FRAGMENT})"
    ))
});

/// Matches the shape of a definition line. Group 1 is the name, group 2 the raw value.
pub static DEFINITION_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    compile(format!(
        r"^{ws}*(?:{EXPORT_KEYWORD}{ws}+)?{ws}*({NAME_FRAGMENT}){ws}*={ws}*(.*)$",
        ws = HSPACE_FRAGMENT
    ))
});

/// Matches a full-line comment.
pub static COMMENT_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| compile(format!("^{HSPACE_FRAGMENT}*#")));

/// Validates a raw value region, quoted or unquoted.
pub static VALUE_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    let inner = format!(
        r#"(?:\\.|\\$|\$\{{{NAME_FRAGMENT}\}}|\${NAME_FRAGMENT}|[^"$\\\r\n])*"#
    );
    compile(format!(r#"^(?:"{inner}"|{inner})$"#))
});

/// Returns true if `name` satisfies the name grammar.
pub fn is_valid_name(name: &str) -> bool {
    NAME_PATTERN.is_match(name)
}

/// Remove exactly one layer of surrounding double quotes, if present.
pub fn strip_quotes(text: &str) -> &str {
    if text.len() >= 2 && text.starts_with('"') && text.ends_with('"') {
        &text[1..text.len() - 1]
    } else {
        text
    }
}

/// Returns true if the byte at `index` is preceded by an odd run of backslashes.
pub fn is_escaped(text: &str, index: usize) -> bool {
    let run = text.as_bytes()[..index]
        .iter()
        .rev()
        .take_while(|&&b| b == b'\\')
        .count();
    run % 2 == 1
}
