//! Rule to limit line length.
//!
//! Runs twice in the standard battery: once on the file as written, so
//! that long comments and strings are caught, and once on the formatted
//! text, where the formatter may have produced lines it could not wrap.

use cstyle_core::utils::source_lines;
use cstyle_core::{FileContext, Limits, Location, Rule, RuleResult, Violation};

/// Rule code for line-too-long.
pub const CODE: &str = "CS007";

/// Rule name for line-too-long.
pub const NAME: &str = "line-too-long";

/// Default maximum line length.
pub const DEFAULT_MAX_LINE_LENGTH: usize = Limits::DEFAULT_MAX_LINE_LENGTH;

/// Which text the rule measures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextForm {
    /// The file as written.
    Raw,
    /// The output of the canonical formatter.
    Formatted,
}

/// Limits the number of characters per line.
#[derive(Debug, Clone, Copy)]
pub struct LineTooLong {
    /// Maximum characters per line, ignoring trailing whitespace.
    pub max_line_length: usize,
    /// Which text to measure.
    pub form: TextForm,
}

impl Default for LineTooLong {
    fn default() -> Self {
        Self::new()
    }
}

impl LineTooLong {
    /// Creates a rule that measures the raw text.
    #[must_use]
    pub fn new() -> Self {
        Self {
            max_line_length: DEFAULT_MAX_LINE_LENGTH,
            form: TextForm::Raw,
        }
    }

    /// Creates a rule that measures the formatted text.
    #[must_use]
    pub fn formatted() -> Self {
        Self {
            form: TextForm::Formatted,
            ..Self::new()
        }
    }

    /// Sets the maximum line length.
    #[must_use]
    pub fn max_line_length(mut self, max: usize) -> Self {
        self.max_line_length = max;
        self
    }
}

impl Rule for LineTooLong {
    fn name(&self) -> &'static str {
        NAME
    }

    fn code(&self) -> &'static str {
        CODE
    }

    fn description(&self) -> &'static str {
        "Limits line length, comments and strings included"
    }

    fn check(&self, ctx: &FileContext<'_>) -> RuleResult {
        let text = match self.form {
            TextForm::Raw => ctx.content,
            TextForm::Formatted => ctx.formatted()?,
        };

        let Some((n, line)) = source_lines(text)
            .find(|(_, line)| line.trim_end().chars().count() > self.max_line_length)
        else {
            return Ok(());
        };

        let mut message = format!(
            "Line {n} is too long ({} characters):",
            line.chars().count()
        );
        if self.form == TextForm::Formatted {
            message.push_str("\nNote: The file has been formatted automatically.");
        }

        Err(Violation::style(CODE, NAME, Location::line(ctx.path, n), message)
            .with_excerpt(line)
            .into())
    }
}
