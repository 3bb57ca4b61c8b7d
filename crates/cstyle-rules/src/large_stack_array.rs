//! Rule to forbid large fixed-size arrays declared as locals or globals.
//!
//! Matches `type name[N]` on the raw text with a literal size. Sizes given
//! by a macro are not resolved.

use std::sync::OnceLock;

use cstyle_core::utils::{compile, is_directive_or_comment, source_lines};
use cstyle_core::{FileContext, Location, Rule, RuleResult, Violation};
use regex::Regex;

/// Rule code for large-stack-array.
pub const CODE: &str = "CS006";

/// Rule name for large-stack-array.
pub const NAME: &str = "large-stack-array";

/// Largest array size that is still allowed.
pub const DEFAULT_MAX_ELEMENTS: u64 = 300;

fn array_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        compile(r"[a-zA-Z_][a-zA-Z0-9]*\s+[a-zA-Z_][a-zA-Z0-9]*\[\s*(\d+)\s*\]")
    })
}

/// Forbids large arrays on the stack.
#[derive(Debug, Clone, Copy)]
pub struct LargeStackArray {
    /// Sizes above this are rejected.
    pub max_elements: u64,
}

impl Default for LargeStackArray {
    fn default() -> Self {
        Self::new()
    }
}

impl LargeStackArray {
    /// Creates a new rule with the default limit.
    #[must_use]
    pub fn new() -> Self {
        Self {
            max_elements: DEFAULT_MAX_ELEMENTS,
        }
    }

    /// Sets the largest allowed size.
    #[must_use]
    pub fn max_elements(mut self, max: u64) -> Self {
        self.max_elements = max;
        self
    }

    fn exceeds(&self, line: &str) -> bool {
        array_pattern().captures_iter(line).any(|caps| {
            // digits that overflow u64 are certainly too large
            caps[1]
                .parse::<u64>()
                .map_or(true, |size| size > self.max_elements)
        })
    }
}

impl Rule for LargeStackArray {
    fn name(&self) -> &'static str {
        NAME
    }

    fn code(&self) -> &'static str {
        CODE
    }

    fn description(&self) -> &'static str {
        "Forbids arrays with more than 300 elements on the stack"
    }

    fn check(&self, ctx: &FileContext<'_>) -> RuleResult {
        let found = source_lines(ctx.content)
            .filter(|(_, line)| !is_directive_or_comment(line))
            .find(|(_, line)| self.exceeds(line));

        match found {
            Some((n, line)) => Err(Violation::style(
                CODE,
                NAME,
                Location::line(ctx.path, n),
                "Allocating large arrays on the stack is not allowed because it might cause a \
                 stack overflow.",
            )
            .with_excerpt(format!("Line {n}\n{line}"))
            .into()),
            None => Ok(()),
        }
    }
}
