//! Rule to allow at most one statement per line.
//!
//! Counts `;` per line of the sanitized text, so semicolons in comments and
//! strings don't count. Lines that mention `for` or `break` are exempt
//! (loop headers and `case x: ...; break;`).

use cstyle_core::utils::{identifiers, source_lines};
use cstyle_core::{FileContext, Location, Rule, RuleResult, Violation};

/// Rule code for multiple-statements.
pub const CODE: &str = "CS008";

/// Rule name for multiple-statements.
pub const NAME: &str = "multiple-statements";

const EXEMPT_KEYWORDS: [&str; 2] = ["for", "break"];

/// Forbids more than one statement per line.
#[derive(Debug, Clone, Copy, Default)]
pub struct MultipleStatements;

impl MultipleStatements {
    /// Creates a new rule.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Rule for MultipleStatements {
    fn name(&self) -> &'static str {
        NAME
    }

    fn code(&self) -> &'static str {
        CODE
    }

    fn description(&self) -> &'static str {
        "Forbids more than one statement per line"
    }

    fn check(&self, ctx: &FileContext<'_>) -> RuleResult {
        for (n, line) in source_lines(ctx.sanitized()?) {
            let semicolons = line.matches(';').count();
            if semicolons <= 1 {
                continue;
            }

            let words = identifiers(line);
            if EXEMPT_KEYWORDS.iter().any(|k| words.contains(k)) {
                continue;
            }

            return Err(Violation::style(
                CODE,
                NAME,
                Location::line(ctx.path, n),
                format!("Line {n} contains multiple statements ({semicolons} semicolons):"),
            )
            .with_excerpt(format!("{n:3}:{line}"))
            .into());
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{check, violation};
    use cstyle_core::{Category, Halt};

    #[test]
    fn test_detects_two_statements() {
        let v = violation(check(&MultipleStatements::new(), "int a = 1; int b = 2;\n"));
        assert_eq!(v.message, "Line 1 contains multiple statements (2 semicolons):");
        assert_eq!(v.excerpt.as_deref(), Some("  1:int a = 1; int b = 2;"));
    }

    #[test]
    fn test_for_loops_are_exempt() {
        let code = "for (i = 0; i < n; i++) x++;\n";
        assert!(check(&MultipleStatements::new(), code).is_ok());
    }

    #[test]
    fn test_break_is_exempt() {
        let code = "switch (c) {\n    case 1: x = 2; break;\n}\n";
        assert!(check(&MultipleStatements::new(), code).is_ok());
    }

    #[test]
    fn test_ignores_comments_and_strings() {
        let code = "puts(\"a; b; c\"); /* x; y; */\n";
        assert!(check(&MultipleStatements::new(), code).is_ok());
    }

    #[test]
    fn test_identifier_containing_for_is_not_exempt() {
        let code = "format = 1; before = 2;\n";
        assert!(check(&MultipleStatements::new(), code).is_err());
    }

    #[test]
    fn test_structural_error_halts() {
        match check(&MultipleStatements::new(), "/* never closed\n") {
            Err(Halt::Violation(v)) => assert_eq!(v.category, Category::Structure),
            other => panic!("unexpected: {other:?}"),
        }
    }
}
