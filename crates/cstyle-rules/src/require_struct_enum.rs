//! Project rule that requires at least one `struct` and one `enum`.
//!
//! Used by the exercise preset, where submissions must show both kinds of
//! user-defined type. Only code counts: the keywords are searched in the
//! sanitized text of every checked `.c` and `.h` file. Files that cannot be
//! read or sanitized are skipped, since they already failed on their own.

use cstyle_core::syntax::sanitize;
use cstyle_core::utils::identifiers;
use cstyle_core::{Location, ProjectContext, ProjectRule, SourceKind, Violation};
use tracing::debug;

/// Rule code for require-struct-enum.
pub const CODE: &str = "CS101";

/// Rule name for require-struct-enum.
pub const NAME: &str = "require-struct-enum";

/// Requires `struct` and `enum` to be used somewhere.
#[derive(Debug, Clone, Copy, Default)]
pub struct RequireStructEnum;

impl RequireStructEnum {
    /// Creates a new rule.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl ProjectRule for RequireStructEnum {
    fn name(&self) -> &'static str {
        NAME
    }

    fn code(&self) -> &'static str {
        CODE
    }

    fn description(&self) -> &'static str {
        "Requires at least one struct and one enum in the sources"
    }

    fn check_project(&self, ctx: &ProjectContext<'_>) -> Vec<Violation> {
        let mut has_struct = false;
        let mut has_enum = false;

        for path in &ctx.source_files {
            if !SourceKind::from_path(path).is_c() {
                continue;
            }
            let Ok(content) = std::fs::read_to_string(path) else {
                debug!("Skipping unreadable file: {}", path.display());
                continue;
            };
            let Ok(clean) = sanitize(&content) else {
                continue;
            };

            let words = identifiers(&clean);
            has_struct |= words.contains("struct");
            has_enum |= words.contains("enum");
            if has_struct && has_enum {
                return Vec::new();
            }
        }

        let mut violations = Vec::new();
        if !has_struct {
            violations.push(Violation::style(
                CODE,
                NAME,
                Location::file(ctx.root),
                "No struct was used.",
            ));
        }
        if !has_enum {
            violations.push(Violation::style(
                CODE,
                NAME,
                Location::file(ctx.root),
                "No enum was used.",
            ));
        }
        violations
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::path::PathBuf;
    use tempfile::TempDir;

    fn project(files: &[(&str, &str)]) -> (TempDir, Vec<PathBuf>) {
        let tmp = TempDir::new().unwrap();
        let paths = files
            .iter()
            .map(|(name, content)| {
                let path = tmp.path().join(name);
                fs::write(&path, content).unwrap();
                path
            })
            .collect();
        (tmp, paths)
    }

    fn messages(tmp: &TempDir, files: Vec<PathBuf>) -> Vec<String> {
        let ctx = ProjectContext::new(tmp.path()).with_source_files(files);
        RequireStructEnum::new()
            .check_project(&ctx)
            .into_iter()
            .map(|v| v.message)
            .collect()
    }

    #[test]
    fn test_passes_across_files() {
        let (tmp, files) = project(&[
            ("point.h", "struct point { int x; };\n"),
            ("color.c", "enum color { RED, GREEN };\n"),
        ]);
        assert!(messages(&tmp, files).is_empty());
    }

    #[test]
    fn test_reports_missing_enum() {
        let (tmp, files) = project(&[("main.c", "struct s { int a; };\n// enum in a comment\n")]);
        assert_eq!(messages(&tmp, files), vec!["No enum was used."]);
    }

    #[test]
    fn test_reports_both() {
        let (tmp, files) = project(&[("main.c", "int main(void) { return 0; }\n")]);
        assert_eq!(
            messages(&tmp, files),
            vec!["No struct was used.", "No enum was used."]
        );
    }

    #[test]
    fn test_ignores_typescript() {
        let (tmp, files) = project(&[("a.ts", "struct enum\n")]);
        assert_eq!(messages(&tmp, files).len(), 2);
    }
}
