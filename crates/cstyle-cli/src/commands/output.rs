//! Output formatting for check results.

use anyhow::Result;
use cstyle_core::LintResult;
use std::fmt::Write;

use crate::OutputFormat;

const RED: &str = "\x1b[31m";
const GREEN: &str = "\x1b[32m";
const RESET: &str = "\x1b[0m";

/// Print check results in the specified format.
pub fn print(result: &LintResult, format: OutputFormat) -> Result<()> {
    let rendered = match format {
        OutputFormat::Text => render_text(result),
        OutputFormat::Json => serde_json::to_string_pretty(result)? + "\n",
        OutputFormat::Compact => render_compact(result),
    };
    print!("{rendered}");
    Ok(())
}

fn render_text(result: &LintResult) -> String {
    let mut out = String::new();

    for violation in &result.violations {
        let _ = writeln!(
            out,
            "\n{RED}ERROR:{RESET} Code style violation in file:\n    {}\n",
            violation.location.file.display()
        );
        let _ = writeln!(out, "{}", violation.format());
    }

    for violation in &result.project_violations {
        let _ = writeln!(out, "\n{RED}ERROR:{RESET}\n{}", violation.format());
    }

    if result.has_errors() {
        let _ = writeln!(
            out,
            "{RED}{} of {} file(s) failed the code style test{RESET}",
            result.failed_files(),
            result.files_checked
        );
    } else {
        let _ = writeln!(out, "\n\t{GREEN}OK: Code style test passed.{RESET}\n");
    }

    out
}

fn render_compact(result: &LintResult) -> String {
    result
        .all_violations()
        .map(|v| format!("{v}\n"))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use cstyle_core::{Location, Violation};

    fn failing_result() -> LintResult {
        let mut result = LintResult::new();
        result.files_checked = 2;
        result.violations.push(
            Violation::style(
                "CS008",
                "multiple-statements",
                Location::line("src/main.c", 4),
                "Line 4 contains multiple statements (2 semicolons):",
            )
            .with_excerpt("  4:a(); b();"),
        );
        result.project_violations.push(Violation::style(
            "CS100",
            "file-set-size",
            Location::file("."),
            "More than 1000 files (1001) in directory",
        ));
        result
    }

    #[test]
    fn text_lists_file_and_excerpt() {
        let text = render_text(&failing_result());
        assert!(text.contains("Code style violation in file:\n    src/main.c\n"));
        assert!(text.contains("\n  4:a(); b();\n"));
        assert!(text.contains("More than 1000 files"));
        assert!(text.contains("1 of 2 file(s) failed"));
        assert!(!text.contains("OK: Code style test passed."));
    }

    #[test]
    fn text_reports_success() {
        let mut result = LintResult::new();
        result.files_checked = 3;
        assert!(render_text(&result).contains("OK: Code style test passed."));
    }

    #[test]
    fn compact_is_one_line_per_violation() {
        let compact = render_compact(&failing_result());
        let lines: Vec<_> = compact.lines().collect();
        assert_eq!(
            lines,
            vec![
                "src/main.c:4: style [CS008] Line 4 contains multiple statements (2 semicolons):",
                ".: style [CS100] More than 1000 files (1001) in directory",
            ]
        );
    }

    #[test]
    fn json_round_trips_counts() {
        let json = serde_json::to_value(failing_result()).unwrap();
        assert_eq!(json["files_checked"], 2);
        assert_eq!(json["violations"][0]["category"], "style");
        assert_eq!(json["violations"][0]["location"]["line"], 4);
    }
}
