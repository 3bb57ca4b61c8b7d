//! Rule to forbid identifiers outside of portable C99 or that are
//! frequently misused.
//!
//! The check runs on the raw text, so identifiers inside comments and
//! string literals count as well. `sprintf` is reported first, with its own
//! message pointing at `snprintf`.

use cstyle_core::utils::{identifiers, source_lines};
use cstyle_core::{FileContext, Location, Rule, RuleResult, Violation};

/// Rule code for disallowed-identifiers.
pub const CODE: &str = "CS002";

/// Rule name for disallowed-identifiers.
pub const NAME: &str = "disallowed-identifiers";

/// Built-in deny-list, in reporting order.
pub const DEFAULT_IDENTIFIERS: &[&str] = &[
    "S_ISREG", "S_ISDIR", "F_OK", "R_OK", "W_OK", "X_OK", "O_CREAT", "O_WRONLY", "opendir",
    "strlcat", "strlcpy", "strdup", "ungetc", "errno", "pragma", "static", "goto", "setjmp",
    "longjmp",
];

const SPRINTF_MESSAGE: &str = "It usually is a bad idea to use the function sprintf because it \
could overwrite array boundaries if the printed string is longer than expected. Use snprintf \
instead.";

/// Forbids deny-listed identifiers.
#[derive(Debug, Clone)]
pub struct DisallowedIdentifiers {
    /// Identifiers to reject, checked in order after `sprintf`.
    pub identifiers: Vec<String>,
}

impl Default for DisallowedIdentifiers {
    fn default() -> Self {
        Self::new()
    }
}

impl DisallowedIdentifiers {
    /// Creates a new rule with the built-in deny-list.
    #[must_use]
    pub fn new() -> Self {
        Self::with_identifiers(DEFAULT_IDENTIFIERS.iter().map(|s| (*s).to_string()))
    }

    /// Creates a rule with a replacement deny-list.
    #[must_use]
    pub fn with_identifiers<I, S>(identifiers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            identifiers: identifiers.into_iter().map(Into::into).collect(),
        }
    }

    fn violation(ctx: &FileContext<'_>, identifier: &str, message: String) -> Violation {
        let location = source_lines(ctx.content)
            .find(|(_, line)| identifiers(line).contains(identifier))
            .map_or_else(
                || Location::file(ctx.path),
                |(n, _)| Location::line(ctx.path, n),
            );
        Violation::style(CODE, NAME, location, message)
    }
}

impl Rule for DisallowedIdentifiers {
    fn name(&self) -> &'static str {
        NAME
    }

    fn code(&self) -> &'static str {
        CODE
    }

    fn description(&self) -> &'static str {
        "Forbids sprintf and identifiers that are not C99 or frequently misused"
    }

    fn check(&self, ctx: &FileContext<'_>) -> RuleResult {
        let found = identifiers(ctx.content);

        if found.contains("sprintf") {
            return Err(Self::violation(ctx, "sprintf", SPRINTF_MESSAGE.to_string()).into());
        }

        for identifier in &self.identifiers {
            if found.contains(identifier.as_str()) {
                let message =
                    format!("\"{identifier}\" not allowed (not C99 or frequently used incorrectly)");
                return Err(Self::violation(ctx, identifier, message).into());
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{check, violation};

    #[test]
    fn test_detects_sprintf_first() {
        let code = "int main(void) {\n    goto end;\n    sprintf(buf, \"%d\", 1);\n}\n";
        let v = violation(check(&DisallowedIdentifiers::new(), code));
        assert!(v.message.contains("Use snprintf instead."));
        assert_eq!(v.location.line, Some(3));
    }

    #[test]
    fn test_detects_deny_listed_identifier() {
        let code = "static int counter;\n";
        let v = violation(check(&DisallowedIdentifiers::new(), code));
        assert_eq!(
            v.message,
            "\"static\" not allowed (not C99 or frequently used incorrectly)"
        );
        assert_eq!(v.location.line, Some(1));
    }

    #[test]
    fn test_reports_in_list_order() {
        let code = "goto x;\nint e = errno;\n";
        let v = violation(check(&DisallowedIdentifiers::new(), code));
        assert!(v.message.starts_with("\"errno\""));
    }

    #[test]
    fn test_whole_identifiers_only() {
        assert!(check(&DisallowedIdentifiers::new(), "int snprintf_count = 0;\nint gotox;\n").is_ok());
        assert!(check(&DisallowedIdentifiers::new(), "snprintf(b, 4, \"x\");\n").is_ok());
    }

    #[test]
    fn test_comments_count() {
        let code = "// never use goto\nint main(void) { return 0; }\n";
        assert!(check(&DisallowedIdentifiers::new(), code).is_err());
    }

    #[test]
    fn test_custom_list() {
        let rule = DisallowedIdentifiers::with_identifiers(["alloca"]);
        assert!(check(&rule, "static int x;\n").is_ok());
        assert!(check(&rule, "char* p = alloca(4);\n").is_err());
    }
}
