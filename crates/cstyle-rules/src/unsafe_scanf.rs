//! Rule to catch common `scanf` mistakes.
//!
//! # Detected Patterns
//!
//! Checked line by line on the raw text, skipping preprocessor and `//`
//! comment lines. On each line the first of these wins:
//!
//! 1. `%s` without a field width
//! 2. a `scanf` whose result is not compared against a number of read items
//!    (`!= EOF`, `!= -1` or an ignored result)
//! 3. `%i` instead of `%d`
//!
//! These are textual heuristics: a call split across lines, or a comparison
//! written without a space after the operator, is reported as unchecked.

use std::sync::OnceLock;

use cstyle_core::utils::{compile, is_directive_or_comment, source_lines};
use cstyle_core::{FileContext, Location, Rule, RuleResult, Violation};
use regex::Regex;

/// Rule code for unsafe-scanf.
pub const CODE: &str = "CS004";

/// Rule name for unsafe-scanf.
pub const NAME: &str = "unsafe-scanf";

const UNBOUNDED_STRING: &str = r"scanf\(.*?%s";

const CHECKED_RESULT: &str = r"(scanf\s*\(.*?\)\s*[!=]=\s\d+)|(\d+\s*[!=]=\s[a-z]*?scanf)|([a-zA-Z_][a-zA-Z_0-9]*\s*=\s*scanf)";

const INTEGER_CONVERSION: &str = r"scanf\(.*?%i.*?\)";

const UNCHECKED_MESSAGE: &str = "The result of scanf should be compared against the number of \
read parameters, e.g. scanf(\"%d %d\", &x, &y) == 2 instead of != EOF or != -1. For this \
example, scanf could return -1, 0, 1 or 2. Read the section about return values in the manual \
page for scanf (type \"man scanf\" in the terminal).";

const INTEGER_MESSAGE: &str = "You probably want to use %d (decimal integer) instead of %i \
(possibly hexadecimal or octal integer) for scanf. Read the section about return values in the \
manual page for scanf (type \"man scanf\" in the terminal).";

struct Patterns {
    unbounded_string: Regex,
    checked_result: Regex,
    integer_conversion: Regex,
}

fn patterns() -> &'static Patterns {
    static PATTERNS: OnceLock<Patterns> = OnceLock::new();
    PATTERNS.get_or_init(|| Patterns {
        unbounded_string: compile(UNBOUNDED_STRING),
        checked_result: compile(CHECKED_RESULT),
        integer_conversion: compile(INTEGER_CONVERSION),
    })
}

/// Flags unbounded `%s`, unchecked results and `%i` in `scanf` calls.
#[derive(Debug, Clone, Copy, Default)]
pub struct UnsafeScanf;

impl UnsafeScanf {
    /// Creates a new rule.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Rule for UnsafeScanf {
    fn name(&self) -> &'static str {
        NAME
    }

    fn code(&self) -> &'static str {
        CODE
    }

    fn description(&self) -> &'static str {
        "Flags scanf with unbounded %s, unchecked results or %i"
    }

    fn check(&self, ctx: &FileContext<'_>) -> RuleResult {
        let patterns = patterns();

        for (n, line) in source_lines(ctx.content) {
            if is_directive_or_comment(line) {
                continue;
            }

            let message = if patterns.unbounded_string.is_match(line) {
                format!(
                    "Use of scanf without limiting the string size (%s instead of e.g. %10s) \
                     in line {n}:"
                )
            } else if line.contains("scanf") && !patterns.checked_result.is_match(line) {
                format!("{UNCHECKED_MESSAGE}\n\nLine {n}:")
            } else if patterns.integer_conversion.is_match(line) {
                format!("{INTEGER_MESSAGE}\n\nLine {n}:")
            } else {
                continue;
            };

            return Err(Violation::style(CODE, NAME, Location::line(ctx.path, n), message)
                .with_excerpt(line)
                .into());
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{check, violation};

    fn scanf_line(line: &str) -> RuleResult {
        check(&UnsafeScanf::new(), &format!("int main(void) {{\n{line}\n}}\n"))
    }

    #[test]
    fn test_detects_unbounded_string() {
        let v = violation(scanf_line("    if (scanf(\"%s\", name) == 1) {}"));
        assert!(v.message.starts_with("Use of scanf without limiting the string size"));
        assert!(v.message.ends_with("in line 2:"));
        assert_eq!(v.excerpt.as_deref(), Some("    if (scanf(\"%s\", name) == 1) {}"));
    }

    #[test]
    fn test_detects_eof_comparison() {
        let v = violation(scanf_line("    if (scanf(\"%d\", &x) != EOF) {}"));
        assert!(v.message.starts_with("The result of scanf should be compared"));

        let v = violation(scanf_line("    if (scanf(\"%d\", &x) != -1) {}"));
        assert!(v.message.starts_with("The result of scanf should be compared"));
    }

    #[test]
    fn test_detects_ignored_result() {
        assert!(scanf_line("    scanf(\"%d\", &x);").is_err());
    }

    #[test]
    fn test_detects_integer_conversion() {
        let v = violation(scanf_line("    if (scanf(\"%i\", &x) == 1) {}"));
        assert!(v.message.starts_with("You probably want to use %d"));
    }

    #[test]
    fn test_allows_checked_calls() {
        assert!(scanf_line("    if (scanf(\"%d %d\", &x, &y) == 2) {}").is_ok());
        assert!(scanf_line("    if (1 == scanf(\"%d\", &x)) {}").is_ok());
        assert!(scanf_line("    int read = scanf(\"%9s\", name);").is_ok());
        assert!(scanf_line("    n = scanf(\"%d\", &x);").is_ok());
        assert!(scanf_line("    if (scanf(\"%9s\", name) != 1) {}").is_ok());
    }

    #[test]
    fn test_requires_space_after_operator() {
        assert!(scanf_line("    if (scanf(\"%d\", &x) ==1) {}").is_err());
    }

    #[test]
    fn test_skips_comments_and_directives() {
        assert!(scanf_line("    // scanf(\"%s\", name);").is_ok());
        assert!(scanf_line("#define READ(x) scanf(\"%d\", &x)").is_ok());
    }
}
