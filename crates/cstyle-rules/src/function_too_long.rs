//! Rule to limit the length of functions.
//!
//! Runs on the formatted, sanitized text. Every top-level brace group is
//! recovered into a unit (signature through closing brace) and its
//! non-blank lines are counted. Struct, enum and initializer bodies at file
//! scope are measured the same way.

use cstyle_core::syntax::{find_brace_pairs, recover_unit};
use cstyle_core::utils::number_lines;
use cstyle_core::{FileContext, Limits, Location, Rule, RuleResult, Violation};
use tracing::debug;

/// Rule code for function-too-long.
pub const CODE: &str = "CS010";

/// Rule name for function-too-long.
pub const NAME: &str = "function-too-long";

/// Default maximum number of lines per function.
pub const DEFAULT_MAX_FUNCTION_LINES: usize = Limits::DEFAULT_MAX_FUNCTION_LINES;

/// Limits non-blank lines per function.
#[derive(Debug, Clone, Copy)]
pub struct FunctionTooLong {
    /// Maximum lines per unit, after formatting and comment removal.
    pub max_function_lines: usize,
}

impl Default for FunctionTooLong {
    fn default() -> Self {
        Self::new()
    }
}

impl FunctionTooLong {
    /// Creates a new rule with the default limit.
    #[must_use]
    pub fn new() -> Self {
        Self {
            max_function_lines: DEFAULT_MAX_FUNCTION_LINES,
        }
    }

    /// Sets the maximum number of lines.
    #[must_use]
    pub fn max_function_lines(mut self, max: usize) -> Self {
        self.max_function_lines = max;
        self
    }
}

impl Rule for FunctionTooLong {
    fn name(&self) -> &'static str {
        NAME
    }

    fn code(&self) -> &'static str {
        CODE
    }

    fn description(&self) -> &'static str {
        "Limits non-blank lines per function, after formatting"
    }

    fn check(&self, ctx: &FileContext<'_>) -> RuleResult {
        let text = ctx.formatted_sanitized()?;

        for pair in find_brace_pairs(text) {
            let pair = pair.map_err(|e| ctx.structural(&e))?;
            let unit = recover_unit(text, pair);
            let lines = unit.line_count();
            debug!("{}: unit at line {} has {} lines", ctx.path.display(), unit.line(), lines);

            if lines > self.max_function_lines {
                let message = format!(
                    "Function has too many lines ({lines} of {}).\n\
                     Note: The function has been formatted automatically.\n\
                     Whitespace, comments and strings have been removed.",
                    self.max_function_lines
                );
                return Err(Violation::style(
                    CODE,
                    NAME,
                    Location::line(ctx.path, unit.line()),
                    message,
                )
                .with_excerpt(number_lines(unit.cleaned().trim_end()))
                .into());
            }
        }

        Ok(())
    }
}
