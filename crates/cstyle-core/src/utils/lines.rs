//! Line and identifier helpers shared by the line-oriented rules.

use std::collections::HashSet;
use std::sync::OnceLock;

use regex::Regex;

/// Identifier-shaped substrings.
pub const IDENTIFIER_PATTERN: &str = "[a-zA-Z_][a-zA-Z_0-9]*";

/// Compiles a built-in pattern.
///
/// # Panics
///
/// Panics if `pattern` is not a valid regex. Only call this with string
/// literals that are exercised by tests.
#[must_use]
#[allow(clippy::expect_used)]
pub fn compile(pattern: &'static str) -> Regex {
    Regex::new(pattern).expect("Invalid regex")
}

/// Returns every distinct identifier-shaped substring of `text`.
///
/// This is not a tokenizer: run it on sanitized text when identifiers inside
/// comments or strings must not count.
#[must_use]
pub fn identifiers(text: &str) -> HashSet<&str> {
    static IDENTIFIER: OnceLock<Regex> = OnceLock::new();
    IDENTIFIER
        .get_or_init(|| compile(IDENTIFIER_PATTERN))
        .find_iter(text)
        .map(|m| m.as_str())
        .collect()
}

/// Iterates over `(line_number, line)` with 1-based numbers.
///
/// Splits on `\n` only, so a trailing line break yields a final empty line
/// and `\r` stays part of the line.
pub fn source_lines(text: &str) -> impl Iterator<Item = (usize, &str)> {
    text.split('\n').enumerate().map(|(i, line)| (i + 1, line))
}

/// True for preprocessor lines and `//` comment lines.
#[must_use]
pub fn is_directive_or_comment(line: &str) -> bool {
    let trimmed = line.trim_start();
    trimmed.starts_with('#') || trimmed.starts_with("//")
}

/// Prefixes every line with its right-aligned 1-based number.
///
/// ```
/// use cstyle_core::utils::number_lines;
///
/// assert_eq!(number_lines("a\nb"), "  1:a\n  2:b");
/// ```
#[must_use]
pub fn number_lines(text: &str) -> String {
    source_lines(text)
        .map(|(number, line)| format!("{number:3}:{line}"))
        .collect::<Vec<_>>()
        .join("\n")
}
