//! Glob expansion for definition file patterns.
//!
//! Invariants:
//! - Patterns are expanded in the order given; matches of one pattern are
//!   alphabetical.
//! - Duplicates are kept, so a file named twice is merged twice.
//! - A pattern that matches nothing is an error.

use std::path::PathBuf;

use crate::error::CliError;

/// Expand every pattern into the ordered list of files to merge.
pub fn expand_patterns(patterns: &[String]) -> Result<Vec<PathBuf>, CliError> {
    let mut paths = Vec::new();
    for pattern in patterns {
        let matches = glob::glob(pattern).map_err(|e| CliError::InvalidPattern {
            pattern: pattern.clone(),
            message: e.msg.to_string(),
        })?;

        let before = paths.len();
        for entry in matches {
            let path = entry.map_err(|e| CliError::Unreadable {
                path: e.path().to_path_buf(),
                source: e.into_error(),
            })?;
            paths.push(path);
        }

        let found = paths.len() - before;
        if found == 0 {
            return Err(CliError::NoMatches {
                pattern: pattern.clone(),
            });
        }
        tracing::debug!(pattern = %pattern, found, "Expanded pattern");
    }
    Ok(paths)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn touch(dir: &TempDir, name: &str) -> String {
        let path = dir.path().join(name);
        fs::write(&path, "A=1\n").unwrap();
        path.display().to_string()
    }

    #[test]
    fn test_patterns_keep_caller_order() {
        let dir = TempDir::new().unwrap();
        let z = touch(&dir, "z.env");
        let a = touch(&dir, "a.env");
        let paths = expand_patterns(&[z.clone(), a.clone()]).unwrap();
        assert_eq!(paths, vec![PathBuf::from(z), PathBuf::from(a)]);
    }

    #[test]
    fn test_matches_within_pattern_are_sorted() {
        let dir = TempDir::new().unwrap();
        touch(&dir, "b.env");
        touch(&dir, "a.env");
        touch(&dir, "notes.txt");
        let pattern = format!("{}/*.env", dir.path().display());
        let names: Vec<String> = expand_patterns(&[pattern])
            .unwrap()
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, vec!["a.env", "b.env"]);
    }

    #[test]
    fn test_duplicates_are_kept() {
        let dir = TempDir::new().unwrap();
        let a = touch(&dir, "a.env");
        assert_eq!(expand_patterns(&[a.clone(), a]).unwrap().len(), 2);
    }

    #[test]
    fn test_no_match_is_error() {
        let dir = TempDir::new().unwrap();
        let pattern = format!("{}/*.env", dir.path().display());
        match expand_patterns(&[pattern.clone()]) {
            Err(CliError::NoMatches { pattern: p }) => assert_eq!(p, pattern),
            other => panic!("expected NoMatches, got {:?}", other),
        }
    }

    #[test]
    fn test_invalid_pattern() {
        assert!(matches!(
            expand_patterns(&["[".to_string()]),
            Err(CliError::InvalidPattern { .. })
        ));
    }
}
