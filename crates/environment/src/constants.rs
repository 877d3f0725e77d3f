//! Centralized constants for the envchain workspace.
//!
//! Grammar fragments are kept here so the precompiled matchers in
//! `grammar.rs` and any documentation share a single definition.

// =============================================================================
// Grammar Fragments
// =============================================================================

/// A variable name: a letter followed by letters, digits, underscores or hyphens.
pub const NAME_FRAGMENT: &str = r"[A-Za-z][A-Za-z0-9_-]*";

/// Horizontal whitespace accepted around definition tokens.
pub const HSPACE_FRAGMENT: &str = r"[ \t]";

/// Keyword that may prefix a definition line.
pub const EXPORT_KEYWORD: &str = "export";

// =============================================================================
// Settings Environment Variables
// =============================================================================

/// Enables `Blank` classification for empty lines instead of rejecting them.
pub const ENV_ALLOW_BLANK_LINES: &str = "ENVCHAIN_ALLOW_BLANK_LINES";

/// Enables strict reference syntax checking during expansion.
pub const ENV_STRICT_REFERENCES: &str = "ENVCHAIN_STRICT_REFERENCES";

// =============================================================================
// Streaming Defaults
// =============================================================================

/// Capacity of the line reader wrapped around a translator's source.
pub const TRANSLATOR_READ_CAPACITY: usize = 8 * 1024;

/// Origin label used for text that did not come from a named source.
pub const INLINE_ORIGIN: &str = "<inline>";
