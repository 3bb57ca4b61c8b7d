//! Run driver: discovers files, runs the rule battery, aggregates results.

use crate::config::Config;
use crate::context::{FileContext, ProjectContext, SourceKind};
use crate::rule::{Halt, ProjectRule, ProjectRuleBox, Rule, RuleBox};
use crate::tools::{ToolError, Toolchain};
use crate::types::{LintResult, Violation};

use miette::Diagnostic;
use std::path::{Component, Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info};

/// Errors that stop the whole run.
#[derive(Debug, Error, Diagnostic)]
pub enum AnalyzerError {
    /// A required external tool is missing.
    #[error(transparent)]
    #[diagnostic(transparent)]
    Tool(#[from] ToolError),

    /// The directory scope does not exist.
    #[error("Directory {} does not exist.", .0.display())]
    #[diagnostic(code(cstyle::missing_directory))]
    MissingDirectory(PathBuf),

    /// Discovery found nothing to check.
    #[error("Could not find any *.c-files or *.h-files in {scope} directory")]
    #[diagnostic(code(cstyle::no_source_files))]
    NoSourceFiles {
        /// Human-readable name of the searched directory.
        scope: String,
    },

    /// Glob pattern error.
    #[error("Invalid glob pattern: {0}")]
    Glob(#[from] glob::PatternError),
}

/// Builder for configuring an [`Analyzer`].
#[derive(Default)]
pub struct AnalyzerBuilder {
    root: Option<PathBuf>,
    files: Vec<PathBuf>,
    whitelist: Vec<PathBuf>,
    rules: Vec<RuleBox>,
    project_rules: Vec<ProjectRuleBox>,
    config: Option<Config>,
    toolchain: Option<Toolchain>,
}

impl AnalyzerBuilder {
    /// Creates a new builder with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the directory scope.
    #[must_use]
    pub fn root(mut self, path: impl Into<PathBuf>) -> Self {
        self.root = Some(path.into());
        self
    }

    /// Adds an explicit file; once any is given, discovery is skipped.
    #[must_use]
    pub fn file(mut self, path: impl Into<PathBuf>) -> Self {
        self.files.push(path.into());
        self
    }

    /// Adds multiple explicit files.
    #[must_use]
    pub fn files<I, P>(mut self, paths: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        self.files.extend(paths.into_iter().map(Into::into));
        self
    }

    /// Adds a file to skip.
    #[must_use]
    pub fn whitelist(mut self, path: impl Into<PathBuf>) -> Self {
        self.whitelist.push(path.into());
        self
    }

    /// Adds a per-file rule. Rules run in the order they are added.
    #[must_use]
    pub fn rule<R: Rule + 'static>(mut self, rule: R) -> Self {
        self.rules.push(Box::new(rule));
        self
    }

    /// Adds a boxed per-file rule to the analyzer.
    #[must_use]
    pub fn rule_box(mut self, rule: RuleBox) -> Self {
        self.rules.push(rule);
        self
    }

    /// Adds a project-wide rule to the analyzer.
    #[must_use]
    pub fn project_rule<R: ProjectRule + 'static>(mut self, rule: R) -> Self {
        self.project_rules.push(Box::new(rule));
        self
    }

    /// Adds a boxed project-wide rule to the analyzer.
    #[must_use]
    pub fn project_rule_box(mut self, rule: ProjectRuleBox) -> Self {
        self.project_rules.push(rule);
        self
    }

    /// Sets the configuration.
    #[must_use]
    pub fn config(mut self, config: Config) -> Self {
        self.config = Some(config);
        self
    }

    /// Sets the external tools (default: `clang-format` and `ctags`).
    #[must_use]
    pub fn toolchain(mut self, toolchain: Toolchain) -> Self {
        self.toolchain = Some(toolchain);
        self
    }

    /// Builds the analyzer.
    ///
    /// Explicit files and whitelist entries from the configuration are
    /// merged with the ones given to the builder.
    ///
    /// # Errors
    ///
    /// Returns [`AnalyzerError::MissingDirectory`] if the directory scope
    /// doesn't exist and no explicit files were given.
    pub fn build(self) -> Result<Analyzer, AnalyzerError> {
        let config = self.config.unwrap_or_default();

        let root = self
            .root
            .unwrap_or_else(|| config.analyzer.root.clone());

        let mut files = self.files;
        files.extend(config.analyzer.files.iter().cloned());

        let mut whitelist = self.whitelist;
        whitelist.extend(config.analyzer.whitelist.iter().cloned());

        if files.is_empty() && !root.is_dir() {
            return Err(AnalyzerError::MissingDirectory(root));
        }

        Ok(Analyzer {
            root,
            files,
            whitelist,
            rules: self.rules,
            project_rules: self.project_rules,
            config,
            toolchain: self.toolchain.unwrap_or_default(),
        })
    }
}

/// The main analyzer that orchestrates a run.
///
/// Files are checked one at a time; the first failing rule ends the
/// analysis of a file and the run moves on to the next one. Only a missing
/// external tool stops the run early.
///
/// Use [`Analyzer::builder()`] to construct an instance.
pub struct Analyzer {
    root: PathBuf,
    files: Vec<PathBuf>,
    whitelist: Vec<PathBuf>,
    rules: Vec<RuleBox>,
    project_rules: Vec<ProjectRuleBox>,
    config: Config,
    toolchain: Toolchain,
}

impl Analyzer {
    /// Creates a new builder for configuring an analyzer.
    #[must_use]
    pub fn builder() -> AnalyzerBuilder {
        AnalyzerBuilder::new()
    }

    /// Returns the directory scope.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Returns the number of registered rules.
    #[must_use]
    pub fn rule_count(&self) -> usize {
        self.rules.len() + self.project_rules.len()
    }

    /// Checks all files and returns the results.
    ///
    /// # Errors
    ///
    /// Returns [`AnalyzerError::Tool`] when an external tool is missing and
    /// [`AnalyzerError::NoSourceFiles`] when there is nothing to check.
    pub fn analyze(&self) -> Result<LintResult, AnalyzerError> {
        info!("Starting analysis at {}", self.root.display());

        let files = self.discover_files()?;
        if files.is_empty() {
            return Err(AnalyzerError::NoSourceFiles {
                scope: self.scope_name(),
            });
        }

        let mut result = LintResult::new();

        for (index, path) in files.iter().enumerate() {
            info!("{:3}: Checking code style of {}", index + 1, path.display());
            result.files_checked += 1;
            if let Some(violation) = self.analyze_file(path)? {
                debug!("{} failed: {}", path.display(), violation);
                result.violations.push(violation);
            }
        }

        let project_ctx = ProjectContext::new(&self.root)
            .with_source_files(files)
            .with_explicit_files(!self.files.is_empty());

        for rule in &self.project_rules {
            if !self.is_enabled(rule.name(), rule.code()) {
                debug!("Skipping disabled rule: {}", rule.name());
                continue;
            }
            result
                .project_violations
                .extend(rule.check_project(&project_ctx));
        }

        info!(
            "Analysis complete: {} of {} files failed",
            result.failed_files(),
            result.files_checked
        );

        Ok(result)
    }

    /// Checks a single file and returns its first violation, if any.
    fn analyze_file(&self, path: &Path) -> Result<Option<Violation>, AnalyzerError> {
        let bytes = match std::fs::read(path) {
            Ok(bytes) => bytes,
            Err(e) => return Ok(Some(Violation::not_found(path, &e))),
        };
        let Ok(content) = String::from_utf8(bytes) else {
            return Ok(Some(Violation::not_utf8(path)));
        };

        let ctx = FileContext::new(path, &content, &self.root, &self.toolchain);

        for rule in &self.rules {
            if !self.is_enabled(rule.name(), rule.code()) {
                debug!("Skipping disabled rule: {}", rule.name());
                continue;
            }

            match rule.check(&ctx) {
                Ok(()) => {}
                Err(Halt::Violation(violation)) => return Ok(Some(*violation)),
                Err(Halt::Abort(error)) => return Err(error.into()),
            }
        }

        Ok(None)
    }

    fn is_enabled(&self, name: &str, code: &str) -> bool {
        self.config.is_rule_enabled(name) && self.config.is_rule_enabled(code)
    }

    /// Returns the explicit files, or everything discovered under the root.
    fn discover_files(&self) -> Result<Vec<PathBuf>, AnalyzerError> {
        if !self.files.is_empty() {
            return Ok(self
                .files
                .iter()
                .filter(|path| !self.is_whitelisted(path))
                .cloned()
                .collect());
        }

        let options = glob::MatchOptions {
            require_literal_leading_dot: true,
            ..glob::MatchOptions::default()
        };

        let mut files = Vec::new();
        for extension in SourceKind::DISCOVERED_EXTENSIONS {
            let pattern = if self.root == Path::new(".") {
                format!("**/*.{extension}")
            } else {
                format!("{}/**/*.{extension}", self.root.display())
            };

            for entry in glob::glob_with(&pattern, options)? {
                let path = match entry {
                    Ok(path) => path,
                    Err(e) => {
                        debug!("Skipping unreadable entry: {}", e);
                        continue;
                    }
                };
                if !path.is_file() || self.is_hidden(&path) || self.is_whitelisted(&path) {
                    continue;
                }
                files.push(path);
            }
        }

        Ok(files)
    }

    /// True if any component below the root starts with a dot.
    fn is_hidden(&self, path: &Path) -> bool {
        path.strip_prefix(&self.root)
            .unwrap_or(path)
            .components()
            .any(|c| matches!(c, Component::Normal(name) if name.to_string_lossy().starts_with('.')))
    }

    /// Whitelist entries match the whole path or a trailing part of it.
    fn is_whitelisted(&self, path: &Path) -> bool {
        let skip = self
            .whitelist
            .iter()
            .any(|entry| !entry.as_os_str().is_empty() && path.ends_with(entry));
        if skip {
            debug!("Skipping whitelisted file: {}", path.display());
        }
        skip
    }

    fn scope_name(&self) -> String {
        if self.files.is_empty() && self.root == Path::new(".") {
            "current".to_string()
        } else {
            self.root.display().to_string()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rule::RuleResult;
    use crate::tools::{Formatter, TagLister};
    use crate::types::{Category, Location};
    use std::fs;
    use tempfile::TempDir;

    struct NoTools;

    impl Formatter for NoTools {
        fn format(&self, _path: &Path) -> Result<String, ToolError> {
            Err(ToolError::Unavailable {
                tool: "clang-format",
                package: "clang-format",
            })
        }
    }

    impl TagLister for NoTools {
        fn list_globals(&self, _path: &Path) -> Result<String, ToolError> {
            Ok(String::new())
        }
    }

    /// Fails files that contain the word "bad".
    struct NoBadWord;

    impl Rule for NoBadWord {
        fn name(&self) -> &'static str {
            "no-bad-word"
        }
        fn code(&self) -> &'static str {
            "TEST001"
        }
        fn check(&self, ctx: &FileContext<'_>) -> RuleResult {
            if ctx.content.contains("bad") {
                return Err(Violation::style(
                    self.code(),
                    self.name(),
                    Location::file(ctx.path),
                    "bad word",
                )
                .into());
            }
            Ok(())
        }
    }

    /// Always asks for the formatter.
    struct NeedsFormatter;

    impl Rule for NeedsFormatter {
        fn name(&self) -> &'static str {
            "needs-formatter"
        }
        fn code(&self) -> &'static str {
            "TEST002"
        }
        fn check(&self, ctx: &FileContext<'_>) -> RuleResult {
            ctx.formatted().map(|_| ())
        }
    }

    fn tree(files: &[(&str, &[u8])]) -> TempDir {
        let tmp = TempDir::new().unwrap();
        for (name, content) in files {
            let path = tmp.path().join(name);
            fs::create_dir_all(path.parent().unwrap()).unwrap();
            fs::write(path, content).unwrap();
        }
        tmp
    }

    fn analyzer(root: &Path) -> AnalyzerBuilder {
        Analyzer::builder()
            .root(root)
            .toolchain(Toolchain::new(NoTools, NoTools))
    }

    #[test]
    fn test_missing_directory() {
        let result = Analyzer::builder().root("/definitely/not/here").build();
        assert!(matches!(result, Err(AnalyzerError::MissingDirectory(_))));
    }

    #[test]
    fn discovers_c_then_h_then_ts() {
        let tmp = tree(&[
            ("z.ts", b"x"),
            ("src/b.h", b"x"),
            ("a.c", b"x"),
            ("notes.txt", b"x"),
            (".hidden/c.c", b"x"),
        ]);
        let analyzer = analyzer(tmp.path()).build().unwrap();
        let files = analyzer.discover_files().unwrap();
        let names: Vec<_> = files
            .iter()
            .map(|p| p.file_name().unwrap().to_str().unwrap())
            .collect();
        assert_eq!(names, vec!["a.c", "b.h", "z.ts"]);
    }

    #[test]
    fn whitelist_skips_files() {
        let tmp = tree(&[("src/keyboard.c", b"x"), ("src/main.c", b"x")]);
        let analyzer = analyzer(tmp.path())
            .whitelist("src/keyboard.c")
            .build()
            .unwrap();
        let files = analyzer.discover_files().unwrap();
        assert_eq!(files.len(), 1);
        assert!(files[0].ends_with("main.c"));
    }

    #[test]
    fn continues_after_failed_file() {
        let tmp = tree(&[("a.c", b"bad"), ("b.c", b"good"), ("c.c", b"bad")]);
        let result = analyzer(tmp.path())
            .rule(NoBadWord)
            .build()
            .unwrap()
            .analyze()
            .unwrap();
        assert_eq!(result.files_checked, 3);
        assert_eq!(result.violations.len(), 2);
        assert!(result.has_errors());
    }

    #[test]
    fn reports_missing_and_non_utf8_files() {
        let tmp = tree(&[("latin1.c", b"caf\xe9;\n")]);
        let result = analyzer(tmp.path())
            .file(tmp.path().join("latin1.c"))
            .file(tmp.path().join("missing.c"))
            .rule(NoBadWord)
            .build()
            .unwrap()
            .analyze()
            .unwrap();
        assert_eq!(result.files_checked, 2);
        assert_eq!(result.violations[0].category, Category::Encoding);
        assert_eq!(result.violations[1].category, Category::Io);
        assert!(result.violations[1].message.ends_with("not found"));
    }

    #[test]
    fn missing_tool_aborts_the_run() {
        let tmp = tree(&[("a.c", b"int x;"), ("b.c", b"int y;")]);
        let result = analyzer(tmp.path())
            .rule(NeedsFormatter)
            .build()
            .unwrap()
            .analyze();
        assert!(matches!(result, Err(AnalyzerError::Tool(_))));
    }

    #[test]
    fn disabled_rules_are_skipped() {
        let tmp = tree(&[("a.c", b"bad")]);
        let config = Config::parse("[rules.TEST001]\nenabled = false\n").unwrap();
        let result = analyzer(tmp.path())
            .config(config)
            .rule(NoBadWord)
            .build()
            .unwrap()
            .analyze()
            .unwrap();
        assert!(!result.has_errors());
    }

    #[test]
    fn empty_directory_has_no_source_files() {
        let tmp = tree(&[("README.md", b"x")]);
        let result = analyzer(tmp.path()).build().unwrap().analyze();
        assert!(matches!(result, Err(AnalyzerError::NoSourceFiles { .. })));
    }
}
