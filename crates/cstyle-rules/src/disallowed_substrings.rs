//! Rule to forbid platform headers and extensions by plain substring match.
//!
//! Runs on the raw text. The keyboard helper shipped with the exercises is
//! allowed to include `unistd.h`.

use cstyle_core::utils::source_lines;
use cstyle_core::{FileContext, Location, Rule, RuleResult, Violation};

/// Rule code for disallowed-substrings.
pub const CODE: &str = "CS003";

/// Rule name for disallowed-substrings.
pub const NAME: &str = "disallowed-substrings";

/// Built-in deny-list, in reporting order.
pub const DEFAULT_SUBSTRINGS: &[&str] = &[
    "unistd.h",
    "dirent.h",
    "setjmp.h",
    "fcntl.h",
    "<io.h>",
    "\"io.h\"",
    "sys/types.h",
    "sys/stat.h",
    "sys/",
    "_POSIX",
    "POSIX_",
    "GNU_",
    "#pragma",
];

/// A substring that is allowed in files with specific names.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Exemption {
    /// The deny-listed substring.
    pub substring: String,
    /// File names (without directories) that may contain it.
    pub file_names: Vec<String>,
}

impl Exemption {
    fn applies(&self, substring: &str, file_name: &str) -> bool {
        self.substring == substring && self.file_names.iter().any(|n| n == file_name)
    }
}

/// Forbids deny-listed substrings.
#[derive(Debug, Clone)]
pub struct DisallowedSubstrings {
    /// Substrings to reject, checked in order.
    pub substrings: Vec<String>,
    /// Per-file exceptions.
    pub exemptions: Vec<Exemption>,
}

impl Default for DisallowedSubstrings {
    fn default() -> Self {
        Self::new()
    }
}

impl DisallowedSubstrings {
    /// Creates a new rule with the built-in deny-list and exemptions.
    #[must_use]
    pub fn new() -> Self {
        Self::with_substrings(DEFAULT_SUBSTRINGS.iter().map(|s| (*s).to_string()))
    }

    /// Creates a rule with a replacement deny-list. The built-in
    /// exemptions are kept.
    #[must_use]
    pub fn with_substrings<I, S>(substrings: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            substrings: substrings.into_iter().map(Into::into).collect(),
            exemptions: vec![Exemption {
                substring: "unistd.h".to_string(),
                file_names: vec!["keyboard.c".to_string(), "keyboard.h".to_string()],
            }],
        }
    }

    /// Adds an exemption.
    #[must_use]
    pub fn exempt(mut self, exemption: Exemption) -> Self {
        self.exemptions.push(exemption);
        self
    }

    fn is_exempt(&self, substring: &str, file_name: &str) -> bool {
        self.exemptions
            .iter()
            .any(|e| e.applies(substring, file_name))
    }
}

impl Rule for DisallowedSubstrings {
    fn name(&self) -> &'static str {
        NAME
    }

    fn code(&self) -> &'static str {
        CODE
    }

    fn description(&self) -> &'static str {
        "Forbids non-C99 headers, POSIX/GNU macros and pragmas"
    }

    fn check(&self, ctx: &FileContext<'_>) -> RuleResult {
        let file_name = ctx.file_name();

        for substring in &self.substrings {
            if self.is_exempt(substring, file_name) || !ctx.content.contains(substring.as_str()) {
                continue;
            }

            // a multi-line entry never matches a single line; fall back to the file
            let location = source_lines(ctx.content)
                .find(|(_, line)| line.contains(substring.as_str()))
                .map_or_else(
                    || Location::file(ctx.path),
                    |(n, _)| Location::line(ctx.path, n),
                );

            return Err(Violation::style(
                CODE,
                NAME,
                location,
                format!("\"{substring}\" not allowed (not C99 or frequently used incorrectly)"),
            )
            .into());
        }

        Ok(())
    }
}
