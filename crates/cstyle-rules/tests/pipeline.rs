//! Integration test: the standard battery end-to-end via Analyzer, with
//! fake tools standing in for clang-format and ctags.

use cstyle_core::{
    Analyzer, AnalyzerBuilder, AnalyzerError, Category, Config, Formatter, LintResult, TagLister,
    ToolError, Toolchain,
};
use cstyle_rules::Preset;
use std::fmt::Write;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

/// Returns the file unchanged.
struct Identity;

impl Formatter for Identity {
    fn format(&self, path: &Path) -> Result<String, ToolError> {
        fs::read_to_string(path).map_err(|e| ToolError::Failed {
            tool: "identity",
            message: e.to_string(),
        })
    }
}

/// Reports a global in any file whose name starts with "global".
struct FakeTags;

impl TagLister for FakeTags {
    fn list_globals(&self, path: &Path) -> Result<String, ToolError> {
        let name = path.file_name().and_then(|n| n.to_str()).unwrap_or_default();
        if name.starts_with("global") {
            Ok(format!("counter variable 1 {} int counter;\n", path.display()))
        } else {
            Ok(String::new())
        }
    }
}

struct NotInstalled;

impl Formatter for NotInstalled {
    fn format(&self, _path: &Path) -> Result<String, ToolError> {
        Err(ToolError::Unavailable {
            tool: "clang-format",
            package: "clang-format",
        })
    }
}

const GOOD: &str = "#include <stdio.h>\n\nstruct point {\n    int x;\n};\n\nint main(void) {\n    printf(\"hi\\n\");\n    return 0;\n}\n";

fn tree(files: &[(&str, &str)]) -> TempDir {
    let tmp = TempDir::new().expect("temp dir");
    for (name, content) in files {
        let path = tmp.path().join(name);
        fs::create_dir_all(path.parent().expect("parent")).expect("mkdir");
        fs::write(path, content).expect("write fixture");
    }
    tmp
}

fn builder(root: &Path, preset: Preset, toolchain: Toolchain) -> AnalyzerBuilder {
    let config = Config::default();
    let mut builder = Analyzer::builder().root(root).toolchain(toolchain);
    for rule in preset.rules(&config) {
        builder = builder.rule_box(rule);
    }
    for rule in preset.project_rules() {
        builder = builder.project_rule_box(rule);
    }
    builder.config(config)
}

fn run(root: &Path) -> LintResult {
    builder(root, Preset::Standard, Toolchain::new(Identity, FakeTags))
        .build()
        .expect("analyzer should build")
        .analyze()
        .expect("analysis should succeed")
}

fn long_function(statements: usize) -> String {
    let mut code = String::from("int g(int x);\n\nint f(int x) {\n");
    for i in 0..statements {
        let _ = writeln!(code, "    x += {i};");
    }
    code.push_str("    return x;\n}\n");
    code
}

#[test]
fn clean_tree_passes() {
    let tmp = tree(&[("main.c", GOOD), ("point.h", "struct point;\n")]);
    let result = run(tmp.path());
    assert_eq!(result.files_checked, 2);
    assert!(!result.has_errors(), "{:#?}", result.violations);
}

#[test]
fn reports_first_violation_per_file_and_continues() {
    let tmp = tree(&[
        ("a.c", "int main(void) { int a = 1; int b = 2; return a + b; }\n"),
        ("b.c", GOOD),
        ("c.c", "static int helper(void) { return 1; }\n"),
        ("global.c", "int counter;\nstatic int x;\n"),
    ]);
    let result = run(tmp.path());

    assert_eq!(result.files_checked, 4);
    let rules: Vec<(&str, &str)> = result
        .violations
        .iter()
        .map(|v| {
            let name = v.location.file.file_name().and_then(|n| n.to_str()).unwrap_or_default();
            (name, v.rule.as_str())
        })
        .collect();
    assert_eq!(
        rules,
        vec![
            ("a.c", "multiple-statements"),
            ("c.c", "disallowed-identifiers"),
            ("global.c", "no-globals"),
        ]
    );
}

#[test]
fn function_of_65_lines_fails_at_60() {
    // signature + 62 statements + return + closing brace = 65 lines
    let tmp = tree(&[("long.c", &long_function(62))]);
    let result = run(tmp.path());
    assert_eq!(result.violations.len(), 1);
    let v = &result.violations[0];
    assert_eq!(v.rule, "function-too-long");
    assert!(v.message.starts_with("Function has too many lines (65 of 60)."));
}

#[test]
fn directory_with_1001_files_fails() {
    let tmp = tree(&[("main.c", GOOD)]);
    for i in 0..1000 {
        fs::write(tmp.path().join(format!("data{i}.txt")), "x").expect("write");
    }
    let result = run(tmp.path());
    assert!(result.violations.is_empty());
    assert_eq!(result.project_violations.len(), 1);
    assert_eq!(
        result.project_violations[0].message,
        "More than 1000 files (1001) in directory"
    );
}

#[test]
fn explicit_files_skip_file_set_size() {
    let tmp = tree(&[("main.c", GOOD)]);
    for i in 0..1000 {
        fs::write(tmp.path().join(format!("data{i}.txt")), "x").expect("write");
    }
    let result = builder(tmp.path(), Preset::Standard, Toolchain::new(Identity, FakeTags))
        .file(tmp.path().join("main.c"))
        .build()
        .expect("analyzer should build")
        .analyze()
        .expect("analysis should succeed");
    assert!(!result.has_errors());
}

#[test]
fn missing_and_non_utf8_files_are_reported() {
    let tmp = tree(&[("main.c", GOOD)]);
    fs::write(tmp.path().join("latin1.c"), b"int caf\xe9;\n").expect("write");

    let result = builder(tmp.path(), Preset::Standard, Toolchain::new(Identity, FakeTags))
        .files([tmp.path().join("latin1.c"), tmp.path().join("gone.c")])
        .build()
        .expect("analyzer should build")
        .analyze()
        .expect("analysis should succeed");

    let categories: Vec<Category> = result.violations.iter().map(|v| v.category).collect();
    assert_eq!(categories, vec![Category::Encoding, Category::Io]);
}

#[test]
fn missing_formatter_aborts_the_run() {
    let tmp = tree(&[("main.c", GOOD)]);
    let result = builder(tmp.path(), Preset::Standard, Toolchain::new(NotInstalled, FakeTags))
        .build()
        .expect("analyzer should build")
        .analyze();
    match result {
        Err(AnalyzerError::Tool(ToolError::Unavailable { tool, .. })) => {
            assert_eq!(tool, "clang-format");
        }
        other => panic!("expected a missing tool, got {other:?}"),
    }
}

#[test]
fn exercise_preset_requires_struct_and_enum() {
    let tmp = tree(&[("main.c", GOOD)]);
    let result = builder(tmp.path(), Preset::Exercise, Toolchain::new(Identity, FakeTags))
        .build()
        .expect("analyzer should build")
        .analyze()
        .expect("analysis should succeed");
    let messages: Vec<&str> = result
        .project_violations
        .iter()
        .map(|v| v.message.as_str())
        .collect();
    assert_eq!(messages, vec!["No enum was used."]);
}

#[test]
fn structural_errors_are_file_violations() {
    let tmp = tree(&[("open.c", "int main(void) {\n    return 0;\n")]);
    let result = run(tmp.path());
    assert_eq!(result.violations.len(), 1);
    assert_eq!(result.violations[0].category, Category::Structure);
    assert_eq!(result.violations[0].message, "More '{' than '}' in file.");
}
