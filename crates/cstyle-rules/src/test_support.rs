//! Fake tools and helpers shared by the rule tests.

use std::path::Path;

use cstyle_core::{
    FileContext, Formatter, Halt, Rule, RuleResult, TagLister, ToolError, Toolchain, Violation,
};

/// Formatter that returns a fixed text, whatever the path.
pub(crate) struct Fixed(pub String);

impl Formatter for Fixed {
    fn format(&self, _path: &Path) -> Result<String, ToolError> {
        Ok(self.0.clone())
    }
}

/// Tag lister that returns a fixed listing.
pub(crate) struct Tags(pub &'static str);

impl TagLister for Tags {
    fn list_globals(&self, _path: &Path) -> Result<String, ToolError> {
        Ok(self.0.to_string())
    }
}

/// Runs `rule` on `content` as `main.c`, with formatting as the identity.
pub(crate) fn check(rule: &dyn Rule, content: &str) -> RuleResult {
    check_file(rule, "main.c", content)
}

/// Runs `rule` on `content` under the given file name.
pub(crate) fn check_file(rule: &dyn Rule, name: &str, content: &str) -> RuleResult {
    check_formatted(rule, name, content, content)
}

/// Runs `rule` with an explicit formatter output.
pub(crate) fn check_formatted(
    rule: &dyn Rule,
    name: &str,
    content: &str,
    formatted: &str,
) -> RuleResult {
    let tools = Toolchain::new(Fixed(formatted.to_string()), Tags(""));
    let path = Path::new(name);
    let ctx = FileContext::new(path, content, Path::new("."), &tools);
    rule.check(&ctx)
}

/// Unwraps the violation of a failed check.
pub(crate) fn violation(result: RuleResult) -> Violation {
    match result {
        Err(Halt::Violation(v)) => *v,
        other => panic!("expected a violation, got {other:?}"),
    }
}
