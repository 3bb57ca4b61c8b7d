//! Lexical approximation of C source structure.
//!
//! There is no grammar here. The [`sanitize`] scanner strips comments and
//! literal contents, [`BracePairs`] matches braces over the result, and
//! [`recover_unit`] turns a top-level brace pair into a function-sized
//! [`Unit`] by scanning backward for the end of the previous declaration.
//! This stays usable on partial or malformed student code that a real
//! parser would reject.

mod braces;
mod sanitize;
mod unit;

pub use braces::{find_brace_pairs, BracePair, BracePairs};
pub use sanitize::sanitize;
pub use unit::{recover_unit, Unit};

/// Which side of a brace imbalance was found.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BraceImbalance {
    /// A `}` without a matching `{`.
    MoreClosing,
    /// A `{` still open at the end of the text.
    MoreOpening,
}

impl std::fmt::Display for BraceImbalance {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MoreClosing => write!(f, "More '}}' than '{{' in file."),
            Self::MoreOpening => write!(f, "More '{{' than '}}' in file."),
        }
    }
}

/// Structural problems that stop analysis of a file.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StructuralError {
    /// A `/*` comment without `*/`.
    #[error("Block comment not closed.")]
    UnterminatedComment,

    /// A string or character literal without its closing quote.
    #[error("{quote} not closed")]
    UnterminatedLiteral {
        /// The opening delimiter, `"` or `'`.
        quote: char,
    },

    /// Braces that do not pair up.
    #[error("{0}")]
    UnbalancedBraces(BraceImbalance),
}
