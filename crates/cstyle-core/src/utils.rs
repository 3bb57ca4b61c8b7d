//! Utility functions for rule implementations.

pub mod lines;

#[doc(inline)]
pub use lines::{compile, identifiers, is_directive_or_comment, number_lines, source_lines};
