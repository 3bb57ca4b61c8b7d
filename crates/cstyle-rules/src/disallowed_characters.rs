//! Rule to restrict code to printable ASCII.
//!
//! Runs on the formatted text with comments and literal contents removed,
//! so umlauts in comments and strings are fine.

use cstyle_core::utils::source_lines;
use cstyle_core::{FileContext, Location, Rule, RuleResult, Violation};

/// Rule code for disallowed-characters.
pub const CODE: &str = "CS009";

/// Rule name for disallowed-characters.
pub const NAME: &str = "disallowed-characters";

/// True for printable ASCII, tab, carriage return and line feed.
#[must_use]
pub fn is_allowed(c: char) -> bool {
    matches!(c, ' '..='~' | '\t' | '\r' | '\n')
}

/// Forbids characters outside printable ASCII in code.
#[derive(Debug, Clone, Copy, Default)]
pub struct DisallowedCharacters;

impl DisallowedCharacters {
    /// Creates a new rule.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Rule for DisallowedCharacters {
    fn name(&self) -> &'static str {
        NAME
    }

    fn code(&self) -> &'static str {
        CODE
    }

    fn description(&self) -> &'static str {
        "Forbids non-ASCII and control characters outside comments and strings"
    }

    fn check(&self, ctx: &FileContext<'_>) -> RuleResult {
        let text = ctx.formatted_sanitized()?;

        for (n, line) in source_lines(text) {
            if let Some(c) = line.chars().find(|&c| !is_allowed(c)) {
                return Err(Violation::style(
                    CODE,
                    NAME,
                    Location::line(ctx.path, n),
                    format!("Character '{c}' (Code {}) is not allowed.", u32::from(c)),
                )
                .into());
            }
        }

        Ok(())
    }
}
