//! # cstyle-core
//!
//! Core framework for checking C sources against a course style guide.
//!
//! This crate provides the foundational traits and types the rule battery is
//! built from. It includes:
//!
//! - [`syntax`]: a comment/literal sanitizer, a brace matcher and recovery
//!   of function-sized units, all without a C grammar
//! - [`Rule`] trait for per-file rules and [`ProjectRule`] for checks over
//!   the whole directory scope
//! - [`FileContext`], which derives the sanitized and formatted text forms
//!   on demand
//! - [`Toolchain`], the external formatter and tag lister
//! - [`Analyzer`] for orchestrating a run
//! - [`Violation`] for representing findings
//!
//! ## Example
//!
//! ```ignore
//! use cstyle_core::Analyzer;
//!
//! let analyzer = Analyzer::builder()
//!     .root("./src")
//!     .rule(MyRule::new())
//!     .build()?;
//!
//! let result = analyzer.analyze()?;
//! for violation in result.all_violations() {
//!     println!("{}", violation.format());
//! }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod analyzer;
mod config;
mod context;
mod rule;
mod tools;
mod types;

/// Lexical structure of C source text.
pub mod syntax;
/// Utility modules for rule implementations.
pub mod utils;

pub use analyzer::{Analyzer, AnalyzerBuilder, AnalyzerError};
pub use config::{AnalyzerConfig, Config, ConfigError, DenyConfig, Limits, RuleConfig};
pub use context::{FileContext, ProjectContext, SourceKind};
pub use rule::{Halt, ProjectRule, ProjectRuleBox, Rule, RuleBox, RuleResult};
pub use tools::{
    ClangFormat, Ctags, Formatter, TagLister, ToolError, Toolchain, CLANG_FORMAT_STYLE,
};
pub use types::{codes, Category, LintResult, Location, Violation};
