//! Configuration types for cstyle.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::PathBuf;

/// Top-level configuration for cstyle.
///
/// Immutable for the duration of a run; CLI flags are applied on top of the
/// loaded file before the analyzer is built.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Preset to use ("standard" or "exercise").
    #[serde(default)]
    pub preset: Option<String>,

    /// Analyzer configuration.
    #[serde(default)]
    pub analyzer: AnalyzerConfig,

    /// Length limits.
    #[serde(default)]
    pub limits: Limits,

    /// Deny-list overrides.
    #[serde(default)]
    pub deny: DenyConfig,

    /// Per-rule configurations.
    #[serde(default)]
    pub rules: HashMap<String, RuleConfig>,
}

impl Config {
    /// Creates a new default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_file(path: &std::path::Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;
        Self::parse(&content)
    }

    /// Parses configuration from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML is invalid.
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(|e| ConfigError::Parse {
            message: e.to_string(),
        })
    }

    /// Checks if a rule is enabled, by name or code.
    #[must_use]
    pub fn is_rule_enabled(&self, rule_name: &str) -> bool {
        self.rules
            .get(rule_name)
            .map_or(true, |c| c.enabled.unwrap_or(true))
    }
}

/// Which files a run covers.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalyzerConfig {
    /// Directory scope (default: current directory).
    #[serde(default = "default_root")]
    pub root: PathBuf,

    /// Explicit files to check; when non-empty the directory is not searched
    /// and the file-set size rule is skipped.
    #[serde(default)]
    pub files: Vec<PathBuf>,

    /// Files to skip entirely.
    #[serde(default)]
    pub whitelist: Vec<PathBuf>,
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            root: default_root(),
            files: Vec::new(),
            whitelist: Vec::new(),
        }
    }
}

fn default_root() -> PathBuf {
    PathBuf::from(".")
}

/// Length limits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Limits {
    /// Maximum characters per line, comments and strings included.
    #[serde(default = "default_max_line_length")]
    pub max_line_length: usize,

    /// Maximum non-blank lines per top-level brace group, after formatting
    /// and comment removal.
    #[serde(default = "default_max_function_lines")]
    pub max_function_lines: usize,
}

impl Limits {
    /// Built-in maximum line length.
    pub const DEFAULT_MAX_LINE_LENGTH: usize = 100;

    /// Built-in maximum number of lines per function.
    pub const DEFAULT_MAX_FUNCTION_LINES: usize = 60;
}

impl Default for Limits {
    fn default() -> Self {
        Self {
            max_line_length: default_max_line_length(),
            max_function_lines: default_max_function_lines(),
        }
    }
}

fn default_max_line_length() -> usize {
    Limits::DEFAULT_MAX_LINE_LENGTH
}

fn default_max_function_lines() -> usize {
    Limits::DEFAULT_MAX_FUNCTION_LINES
}

/// Replacement deny-lists. `None` keeps the built-in list.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DenyConfig {
    /// Identifiers that may not appear anywhere in a file.
    #[serde(default)]
    pub identifiers: Option<Vec<String>>,

    /// Substrings (headers, platform prefixes) that may not appear.
    #[serde(default)]
    pub substrings: Option<Vec<String>>,
}

/// Per-rule configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RuleConfig {
    /// Whether this rule is enabled.
    #[serde(default)]
    pub enabled: Option<bool>,
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// IO error reading config file.
    #[error("Failed to read config file {path}: {source}")]
    Io {
        /// Path that failed to read.
        path: PathBuf,
        /// Underlying IO error.
        source: std::io::Error,
    },

    /// Parse error in config file.
    #[error("Failed to parse config: {message}")]
    Parse {
        /// Parse error message.
        message: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.analyzer.root, PathBuf::from("."));
        assert_eq!(config.limits.max_line_length, 100);
        assert_eq!(config.limits.max_function_lines, 60);
        assert!(config.deny.identifiers.is_none());
        assert!(config.rules.is_empty());
    }

    #[test]
    fn test_parse_config() {
        let toml = r#"
preset = "exercise"

[analyzer]
root = "./src"
whitelist = ["src/keyboard.c"]

[limits]
max_function_lines = 40

[deny]
identifiers = ["goto", "alloca"]

[rules.multiple-statements]
enabled = false
"#;

        let config = Config::parse(toml).expect("Failed to parse");
        assert_eq!(config.preset.as_deref(), Some("exercise"));
        assert_eq!(config.analyzer.root, PathBuf::from("./src"));
        assert_eq!(config.analyzer.whitelist, vec![PathBuf::from("src/keyboard.c")]);
        assert_eq!(config.limits.max_function_lines, 40);
        assert_eq!(config.limits.max_line_length, 100);
        assert_eq!(
            config.deny.identifiers,
            Some(vec!["goto".to_string(), "alloca".to_string()])
        );
        assert!(config.deny.substrings.is_none());
        assert!(!config.is_rule_enabled("multiple-statements"));
        assert!(config.is_rule_enabled("line-too-long"));
    }

    #[test]
    fn test_parse_error() {
        let err = Config::parse("[limits]\nmax_line_length = \"wide\"\n").unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }
}
