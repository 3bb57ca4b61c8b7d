//! # cstyle-rules
//!
//! Built-in style rules for cstyle.
//!
//! The rules encode a course style guide for C99 submissions. Most of them
//! are textual heuristics over the raw, sanitized or formatted text that
//! [`FileContext`] provides.
//!
//! ## Available Rules
//!
//! | Code | Name | Description |
//! |------|------|-------------|
//! | CS001 | `no-globals` | Forbids global variables |
//! | CS002 | `disallowed-identifiers` | Forbids `sprintf`, `static`, `goto`, POSIX names and more |
//! | CS003 | `disallowed-substrings` | Forbids POSIX/GNU headers, macros and `#pragma` |
//! | CS004 | `unsafe-scanf` | Flags `%s` without width, unchecked results and `%i` |
//! | CS005 | `c-file-include` | Forbids `#include` of `.c` files |
//! | CS006 | `large-stack-array` | Forbids arrays with more than 300 elements |
//! | CS007 | `line-too-long` | Limits line length (raw and formatted) |
//! | CS008 | `multiple-statements` | One statement per line |
//! | CS009 | `disallowed-characters` | Printable ASCII only, outside comments and strings |
//! | CS010 | `function-too-long` | Limits non-blank lines per function |
//! | CS100 | `file-set-size` | Limits the directory to 1000 files and 10 MB (project rule) |
//! | CS101 | `require-struct-enum` | Requires a struct and an enum (project rule, exercise preset) |
//!
//! ## Usage
//!
//! ```ignore
//! use cstyle_core::{Analyzer, Config};
//! use cstyle_rules::Preset;
//!
//! let config = Config::default();
//! let mut builder = Analyzer::builder().root("./src");
//! for rule in Preset::Standard.rules(&config) {
//!     builder = builder.rule_box(rule);
//! }
//! let result = builder.config(config).build()?.analyze()?;
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod c_file_include;
mod disallowed_characters;
mod disallowed_identifiers;
mod disallowed_substrings;
mod file_set_size;
mod function_too_long;
mod large_stack_array;
mod line_too_long;
mod multiple_statements;
mod no_globals;
mod presets;
mod require_struct_enum;
mod unsafe_scanf;

#[cfg(test)]
mod test_support;

pub use c_file_include::CFileInclude;
pub use disallowed_characters::{is_allowed, DisallowedCharacters};
pub use disallowed_identifiers::{DisallowedIdentifiers, DEFAULT_IDENTIFIERS};
pub use disallowed_substrings::{DisallowedSubstrings, Exemption, DEFAULT_SUBSTRINGS};
pub use file_set_size::FileSetSize;
pub use function_too_long::FunctionTooLong;
pub use large_stack_array::LargeStackArray;
pub use line_too_long::{LineTooLong, TextForm};
pub use multiple_statements::MultipleStatements;
pub use no_globals::NoGlobals;
pub use presets::{all_project_rules, all_rules, select, standard_rules, Preset};
pub use require_struct_enum::RequireStructEnum;
pub use unsafe_scanf::UnsafeScanf;

/// Re-export core types for convenience.
pub use cstyle_core::{FileContext, ProjectRule, Rule, Violation};
