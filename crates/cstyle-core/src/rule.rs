//! Rule traits for defining style checks.

use crate::context::{FileContext, ProjectContext};
use crate::tools::ToolError;
use crate::types::Violation;

/// Why a rule stopped the analysis of a file.
#[derive(Debug)]
pub enum Halt {
    /// The file failed; no further rules run on it.
    Violation(Box<Violation>),
    /// A required tool is missing; the whole run stops.
    Abort(ToolError),
}

impl From<Violation> for Halt {
    fn from(violation: Violation) -> Self {
        Self::Violation(Box::new(violation))
    }
}

/// Outcome of a single rule on a single file.
///
/// `Ok(())` means the file passed; use `?` to forward a [`Halt`] from
/// [`FileContext`] accessors.
pub type RuleResult = Result<(), Halt>;

/// A per-file style rule.
///
/// Rules are pure given the text form they ask the [`FileContext`] for and
/// report at most one violation: the first match wins.
///
/// # Example
///
/// ```ignore
/// use cstyle_core::{FileContext, Location, Rule, RuleResult, Violation};
///
/// pub struct NoTabs;
///
/// impl Rule for NoTabs {
///     fn name(&self) -> &'static str { "no-tabs" }
///     fn code(&self) -> &'static str { "CS900" }
///
///     fn check(&self, ctx: &FileContext) -> RuleResult {
///         match ctx.content.find('\t') {
///             Some(_) => Err(Violation::style(
///                 self.code(), self.name(), Location::file(ctx.path), "Tab found",
///             ).into()),
///             None => Ok(()),
///         }
///     }
/// }
/// ```
pub trait Rule: Send + Sync {
    /// Returns the kebab-case name of this rule (e.g., "line-too-long").
    fn name(&self) -> &'static str;

    /// Returns the rule code (e.g., "CS007").
    fn code(&self) -> &'static str;

    /// Returns a brief description of what this rule checks.
    fn description(&self) -> &'static str {
        ""
    }

    /// Checks a single file.
    ///
    /// # Errors
    ///
    /// Returns [`Halt::Violation`] for the first offending construct, or
    /// [`Halt::Abort`] when an external tool the rule needs is missing.
    fn check(&self, ctx: &FileContext<'_>) -> RuleResult;
}

/// Type alias for boxed Rule trait objects.
pub type RuleBox = Box<dyn Rule>;

/// A rule evaluated once per run over the whole directory scope.
pub trait ProjectRule: Send + Sync {
    /// Returns the kebab-case name of this rule.
    fn name(&self) -> &'static str;

    /// Returns the rule code (e.g., "CS100").
    fn code(&self) -> &'static str;

    /// Returns a brief description of what this rule checks.
    fn description(&self) -> &'static str {
        ""
    }

    /// Checks the project and returns any violations found.
    fn check_project(&self, ctx: &ProjectContext<'_>) -> Vec<Violation>;
}

/// Type alias for boxed `ProjectRule` trait objects.
pub type ProjectRuleBox = Box<dyn ProjectRule>;
