//! Core types for style violations and results.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::syntax::StructuralError;

/// What kind of failure a violation reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    /// Unterminated comment or literal, unbalanced braces.
    Structure,
    /// A style rule fired.
    Style,
    /// The file is not valid UTF-8.
    Encoding,
    /// The file could not be read.
    Io,
    /// An external tool ran but failed on this file.
    Tool,
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Structure => write!(f, "structure"),
            Self::Style => write!(f, "style"),
            Self::Encoding => write!(f, "encoding"),
            Self::Io => write!(f, "io"),
            Self::Tool => write!(f, "tool"),
        }
    }
}

/// Where a violation was found.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Location {
    /// File path as discovered (or the directory for project rules).
    pub file: PathBuf,
    /// Line number (1-indexed), when the rule knows it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub line: Option<usize>,
}

impl Location {
    /// A location covering the whole file.
    #[must_use]
    pub fn file(file: impl Into<PathBuf>) -> Self {
        Self {
            file: file.into(),
            line: None,
        }
    }

    /// A location on a specific line.
    #[must_use]
    pub fn line(file: impl Into<PathBuf>, line: usize) -> Self {
        Self {
            file: file.into(),
            line: Some(line),
        }
    }
}

impl std::fmt::Display for Location {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.line {
            Some(line) => write!(f, "{}:{line}", self.file.display()),
            None => write!(f, "{}", self.file.display()),
        }
    }
}

/// Pseudo-rule codes for failures that are not produced by a style rule.
pub mod codes {
    /// Structural error found while sanitizing or matching braces.
    pub const STRUCTURE: &str = "CS000";
    /// File listed but missing or unreadable.
    pub const NOT_FOUND: &str = "IO001";
    /// File is not UTF-8.
    pub const ENCODING: &str = "IO002";
    /// External tool failed on this file.
    pub const TOOL_FAILED: &str = "IO003";
}

/// A style violation found during analysis.
///
/// At most one is recorded per file: the first failing rule ends the
/// analysis of that file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Violation {
    /// Rule code (e.g., "CS007").
    pub code: String,
    /// Rule name (e.g., "line-too-long").
    pub rule: String,
    /// Failure category.
    pub category: Category,
    /// Primary location of the violation.
    pub location: Location,
    /// Human-readable message.
    pub message: String,
    /// Offending source text, possibly annotated with line numbers.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub excerpt: Option<String>,
}

impl Violation {
    /// Creates a new violation.
    #[must_use]
    pub fn new(
        code: impl Into<String>,
        rule: impl Into<String>,
        category: Category,
        location: Location,
        message: impl Into<String>,
    ) -> Self {
        Self {
            code: code.into(),
            rule: rule.into(),
            category,
            location,
            message: message.into(),
            excerpt: None,
        }
    }

    /// Shorthand for a [`Category::Style`] violation.
    #[must_use]
    pub fn style(
        code: &str,
        rule: &str,
        location: Location,
        message: impl Into<String>,
    ) -> Self {
        Self::new(code, rule, Category::Style, location, message)
    }

    /// A structural error in `file`.
    #[must_use]
    pub fn structural(file: &Path, error: &StructuralError) -> Self {
        Self::new(
            codes::STRUCTURE,
            "structure",
            Category::Structure,
            Location::file(file),
            error.to_string(),
        )
    }

    /// A listed file that does not exist or cannot be read.
    #[must_use]
    pub fn not_found(file: &Path, error: &std::io::Error) -> Self {
        let message = if error.kind() == std::io::ErrorKind::NotFound {
            format!("File {} not found", file.display())
        } else {
            format!("File {} could not be read: {error}", file.display())
        };
        Self::new(
            codes::NOT_FOUND,
            "not-found",
            Category::Io,
            Location::file(file),
            message,
        )
    }

    /// A file that is not valid UTF-8.
    #[must_use]
    pub fn not_utf8(file: &Path) -> Self {
        Self::new(
            codes::ENCODING,
            "encoding",
            Category::Encoding,
            Location::file(file),
            "The file is not UTF-8-encoded.",
        )
    }

    /// An external tool that failed while processing `file`.
    #[must_use]
    pub fn tool_failed(file: &Path, message: impl Into<String>) -> Self {
        Self::new(
            codes::TOOL_FAILED,
            "tool-failed",
            Category::Tool,
            Location::file(file),
            message,
        )
    }

    /// Attaches the offending source text.
    #[must_use]
    pub fn with_excerpt(mut self, excerpt: impl Into<String>) -> Self {
        self.excerpt = Some(excerpt.into());
        self
    }

    /// Formats the violation for terminal output.
    #[must_use]
    pub fn format(&self) -> String {
        use std::fmt::Write;
        let mut output = format!("[{} {}] {}\n", self.code, self.rule, self.message);
        if let Some(excerpt) = &self.excerpt {
            let _ = writeln!(output, "\n{excerpt}");
        }
        output
    }
}

impl std::fmt::Display for Violation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let headline = self.message.lines().next().unwrap_or_default();
        write!(
            f,
            "{}: {} [{}] {}",
            self.location, self.category, self.code, headline
        )
    }
}

/// Result of running an analysis.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct LintResult {
    /// First violation of every failed file, in check order.
    pub violations: Vec<Violation>,
    /// Violations from project-wide rules.
    pub project_violations: Vec<Violation>,
    /// Number of files checked (including missing ones).
    pub files_checked: usize,
}

impl LintResult {
    /// Creates a new empty result.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true if any file or project rule failed.
    #[must_use]
    pub fn has_errors(&self) -> bool {
        !self.violations.is_empty() || !self.project_violations.is_empty()
    }

    /// Number of files that failed.
    #[must_use]
    pub fn failed_files(&self) -> usize {
        self.violations.len()
    }

    /// All violations, per-file ones first.
    pub fn all_violations(&self) -> impl Iterator<Item = &Violation> {
        self.violations.iter().chain(&self.project_violations)
    }

    /// Adds violations from another result.
    pub fn extend(&mut self, other: Self) {
        self.violations.extend(other.violations);
        self.project_violations.extend(other.project_violations);
        self.files_checked += other.files_checked;
    }
}
