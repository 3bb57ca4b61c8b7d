//! Rule to forbid `#include` of `.c` files.

use std::sync::OnceLock;

use cstyle_core::utils::{compile, source_lines};
use cstyle_core::{FileContext, Location, Rule, RuleResult, Violation};
use regex::Regex;

/// Rule code for c-file-include.
pub const CODE: &str = "CS005";

/// Rule name for c-file-include.
pub const NAME: &str = "c-file-include";

const MESSAGE: &str = "Do not include C-files. Only header files should be included. If you \
want to use functions from other files, include a header file with appropriate function \
declarations. The compiler will handle the rest (if the exercise allows for it).";

fn include_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| compile(r#"^\s*#\s*include\s*[<"]\s*.*?\.c\s*[">]"#))
}

/// Forbids including C source files.
#[derive(Debug, Clone, Copy, Default)]
pub struct CFileInclude;

impl CFileInclude {
    /// Creates a new rule.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Rule for CFileInclude {
    fn name(&self) -> &'static str {
        NAME
    }

    fn code(&self) -> &'static str {
        CODE
    }

    fn description(&self) -> &'static str {
        "Forbids #include of .c files"
    }

    fn check(&self, ctx: &FileContext<'_>) -> RuleResult {
        let pattern = include_pattern();

        match source_lines(ctx.content).find(|(_, line)| pattern.is_match(line)) {
            Some((n, line)) => Err(Violation::style(
                CODE,
                NAME,
                Location::line(ctx.path, n),
                MESSAGE,
            )
            .with_excerpt(format!("Line {n}\n{line}"))
            .into()),
            None => Ok(()),
        }
    }
}
