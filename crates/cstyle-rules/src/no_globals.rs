//! Rule to forbid file-scope variables.
//!
//! # Detected Patterns
//!
//! Any symbol the tag lister reports as a variable (`ctags --c-kinds=v`).
//! Constants declared with `#define` and function-local statics are not
//! variables in this sense.
//!
//! `.ts` files are skipped because the tag lister cannot parse them.

use cstyle_core::{FileContext, Location, Rule, RuleResult, SourceKind, Violation};

/// Rule code for no-globals.
pub const CODE: &str = "CS001";

/// Rule name for no-globals.
pub const NAME: &str = "no-globals";

/// Forbids global variables.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoGlobals;

impl NoGlobals {
    /// Creates a new rule.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Rule for NoGlobals {
    fn name(&self) -> &'static str {
        NAME
    }

    fn code(&self) -> &'static str {
        CODE
    }

    fn description(&self) -> &'static str {
        "Forbids global variables"
    }

    fn check(&self, ctx: &FileContext<'_>) -> RuleResult {
        if ctx.kind == SourceKind::TypeScript {
            return Ok(());
        }

        let listing = ctx.list_globals()?;
        let listing = listing.trim();
        if listing.is_empty() {
            return Ok(());
        }

        Err(
            Violation::style(CODE, NAME, Location::file(ctx.path), "Found global variable(s):")
                .with_excerpt(listing)
                .into(),
        )
    }
}
