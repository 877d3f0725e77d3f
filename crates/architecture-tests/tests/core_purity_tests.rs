//! Architecture tests for the resolution engine crate.
//!
//! Walks `crates/environment/src` and checks that non-test code:
//! - never terminates the process,
//! - holds no global mutable state,
//! - never unwraps or expects (errors are returned to the caller),
//! - reports through `tracing` rather than printing,
//! - compiles regular expressions only in `grammar.rs`.
//!
//! Files are analyzed statically. Everything from the first `#[cfg(test)]`
//! line onward is treated as test code and skipped.

use std::fs;
use std::path::{Path, PathBuf};

/// (needle, explanation) pairs forbidden in non-test engine code.
const FORBIDDEN: &[(&str, &str)] = &[
    ("process::exit", "terminates the process; return an EnvError instead"),
    ("static mut", "global mutable state; pass Settings by reference"),
    (".unwrap()", "panics on error; propagate with `?`"),
    (".expect(", "panics on error; propagate with `?`"),
    ("println!", "prints to stdout; log with tracing"),
    ("eprintln!", "prints to stderr; log with tracing"),
];

/// Only the grammar module may build regular expressions.
const REGEX_HOME: &str = "grammar.rs";

fn engine_src() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("../environment/src")
}

fn rust_files(dir: &Path) -> Vec<PathBuf> {
    walkdir::WalkDir::new(dir)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.path().extension().is_some_and(|ext| ext == "rs"))
        .map(|e| e.into_path())
        .collect()
}

/// Non-test, non-comment lines of `content` with their 1-based numbers.
fn production_lines(content: &str) -> Vec<(usize, &str)> {
    content
        .lines()
        .enumerate()
        .take_while(|(_, line)| line.trim() != "#[cfg(test)]")
        .filter(|(_, line)| !line.trim_start().starts_with("//"))
        .map(|(idx, line)| (idx + 1, line))
        .collect()
}

fn violations_in(path: &Path) -> Vec<String> {
    let content = fs::read_to_string(path).unwrap_or_default();
    let is_regex_home = path.file_name().is_some_and(|name| name == REGEX_HOME);
    let mut found = Vec::new();

    for (number, line) in production_lines(&content) {
        for (needle, why) in FORBIDDEN {
            if line.contains(needle) {
                found.push(format!("{}:{}: `{}` {}", path.display(), number, needle, why));
            }
        }
        if !is_regex_home && line.contains("Regex::new") {
            found.push(format!(
                "{}:{}: regex built outside {}; add a shared pattern there",
                path.display(),
                number,
                REGEX_HOME
            ));
        }
    }
    found
}

#[test]
fn engine_code_is_pure() {
    let src = engine_src();
    assert!(src.exists(), "engine sources not found at {:?}", src);

    let files = rust_files(&src);
    assert!(!files.is_empty(), "no Rust files under {:?}", src);

    let violations: Vec<String> = files.iter().flat_map(|p| violations_in(p)).collect();
    assert!(
        violations.is_empty(),
        "\n=== Architecture Test Failed: engine purity ===\n{}\n",
        violations.join("\n")
    );

    eprintln!("[architecture] Checked {} engine files for purity.", files.len());
}

#[test]
fn scanner_flags_violations_and_ignores_tests() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("sample.rs");
    fs::write(
        &path,
        "// value.unwrap() in a comment is fine\n\
         fn run() { let x = maybe().unwrap(); }\n\
         static mut COUNTER: u32 = 0;\n\
         fn pattern() { let _ = Regex::new(\"a\"); }\n\
         #[cfg(test)]\n\
         mod tests { fn t() { Some(1).unwrap(); std::process::exit(1); } }\n",
    )
    .unwrap();

    let found = violations_in(&path);
    assert_eq!(found.len(), 3, "{:#?}", found);
    assert!(found[0].contains(":2:"));
    assert!(found[1].contains("static mut"));
    assert!(found[2].contains("regex built outside"));
}
