//! External collaborators: the canonical formatter and the tag lister.
//!
//! Both run as blocking child processes. A missing binary is a
//! [`ToolError::Unavailable`], which aborts the whole run; any other failure
//! is reported against the file being checked.

use std::path::Path;
use std::process::Command;

use miette::Diagnostic;
use tracing::debug;

/// Errors from invoking an external tool.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error, Diagnostic)]
pub enum ToolError {
    /// The tool is not installed or not on `PATH`.
    #[error("{tool} has not been installed")]
    #[diagnostic(
        code(cstyle::tool_unavailable),
        help("Install {package} and make sure `{tool}` is on your PATH, then run the check again.")
    )]
    Unavailable {
        /// Executable name.
        tool: &'static str,
        /// Package that provides it.
        package: &'static str,
    },

    /// The tool ran but did not produce usable output.
    #[error("{tool} failed: {message}")]
    #[diagnostic(code(cstyle::tool_failed))]
    Failed {
        /// Executable name.
        tool: &'static str,
        /// What went wrong.
        message: String,
    },
}

/// Produces the canonical formatting of a source file.
///
/// Implementations must be idempotent and must not change the lexical
/// meaning of the code.
pub trait Formatter: Send + Sync {
    /// Returns the reformatted contents of the file at `path`.
    ///
    /// # Errors
    ///
    /// Returns a [`ToolError`] if the formatter is missing or fails.
    fn format(&self, path: &Path) -> Result<String, ToolError>;
}

/// Lists file-scope variable symbols.
pub trait TagLister: Send + Sync {
    /// Returns one line per global variable in `path`; empty output means
    /// none were found.
    ///
    /// # Errors
    ///
    /// Returns a [`ToolError`] if the lister is missing or fails.
    fn list_globals(&self, path: &Path) -> Result<String, ToolError>;
}

/// Style passed to `clang-format`.
pub const CLANG_FORMAT_STYLE: &str = "{BasedOnStyle: Google, IndentWidth: 4, \
DerivePointerAlignment: false, PointerAlignment: Left, ColumnLimit: 100, \
AllowShortFunctionsOnASingleLine: None, AllowShortLoopsOnASingleLine: false}";

/// [`Formatter`] backed by `clang-format`.
#[derive(Debug, Clone)]
pub struct ClangFormat {
    program: String,
    style: String,
}

impl Default for ClangFormat {
    fn default() -> Self {
        Self::new()
    }
}

impl ClangFormat {
    /// Uses `clang-format` from `PATH` with the built-in style.
    #[must_use]
    pub fn new() -> Self {
        Self {
            program: "clang-format".to_string(),
            style: CLANG_FORMAT_STYLE.to_string(),
        }
    }

    /// Overrides the executable.
    #[must_use]
    pub fn program(mut self, program: impl Into<String>) -> Self {
        self.program = program.into();
        self
    }
}

impl Formatter for ClangFormat {
    fn format(&self, path: &Path) -> Result<String, ToolError> {
        let mut command = Command::new(&self.program);
        command.arg(format!("-style={}", self.style)).arg(path);
        run("clang-format", "clang-format", command)
    }
}

/// [`TagLister`] backed by universal-ctags.
#[derive(Debug, Clone)]
pub struct Ctags {
    program: String,
}

impl Default for Ctags {
    fn default() -> Self {
        Self::new()
    }
}

impl Ctags {
    /// Uses `ctags` from `PATH`.
    #[must_use]
    pub fn new() -> Self {
        Self {
            program: "ctags".to_string(),
        }
    }

    /// Overrides the executable.
    #[must_use]
    pub fn program(mut self, program: impl Into<String>) -> Self {
        self.program = program.into();
        self
    }
}

impl TagLister for Ctags {
    fn list_globals(&self, path: &Path) -> Result<String, ToolError> {
        let mut command = Command::new(&self.program);
        command
            .args(["-R", "-x", "--sort=yes", "--c-kinds=v", "--extras=-F"])
            .arg(path);
        run("ctags", "universal-ctags", command)
    }
}

/// Runs `command` to completion and returns its stdout.
fn run(tool: &'static str, package: &'static str, mut command: Command) -> Result<String, ToolError> {
    debug!("Running {:?}", command);

    let output = command.output().map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            ToolError::Unavailable { tool, package }
        } else {
            ToolError::Failed {
                tool,
                message: e.to_string(),
            }
        }
    })?;

    if !output.status.success() {
        return Err(ToolError::Failed {
            tool,
            message: format!(
                "exited with {}: {}",
                output.status,
                String::from_utf8_lossy(&output.stderr).trim()
            ),
        });
    }

    String::from_utf8(output.stdout).map_err(|_| ToolError::Failed {
        tool,
        message: "output is not valid UTF-8".to_string(),
    })
}

/// The pair of external tools a run depends on.
pub struct Toolchain {
    formatter: Box<dyn Formatter>,
    tags: Box<dyn TagLister>,
}

impl Default for Toolchain {
    fn default() -> Self {
        Self::system()
    }
}

impl std::fmt::Debug for Toolchain {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Toolchain").finish_non_exhaustive()
    }
}

impl Toolchain {
    /// Uses the given implementations.
    #[must_use]
    pub fn new<F, T>(formatter: F, tags: T) -> Self
    where
        F: Formatter + 'static,
        T: TagLister + 'static,
    {
        Self {
            formatter: Box::new(formatter),
            tags: Box::new(tags),
        }
    }

    /// `clang-format` and `ctags` from `PATH`.
    #[must_use]
    pub fn system() -> Self {
        Self::new(ClangFormat::new(), Ctags::new())
    }

    /// The formatter.
    #[must_use]
    pub fn formatter(&self) -> &dyn Formatter {
        self.formatter.as_ref()
    }

    /// The tag lister.
    #[must_use]
    pub fn tags(&self) -> &dyn TagLister {
        self.tags.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_program_is_unavailable() {
        let formatter = ClangFormat::new().program("cstyle-no-such-formatter");
        let err = formatter.format(Path::new("main.c")).unwrap_err();
        assert_eq!(
            err,
            ToolError::Unavailable {
                tool: "clang-format",
                package: "clang-format"
            }
        );
    }

    #[test]
    fn missing_ctags_names_the_package() {
        let tags = Ctags::new().program("cstyle-no-such-ctags");
        let err = tags.list_globals(Path::new(".")).unwrap_err();
        assert!(matches!(
            err,
            ToolError::Unavailable {
                package: "universal-ctags",
                ..
            }
        ));
        assert_eq!(err.to_string(), "ctags has not been installed");
    }

    #[test]
    fn style_is_a_single_flow_mapping() {
        assert!(CLANG_FORMAT_STYLE.starts_with('{'));
        assert!(CLANG_FORMAT_STYLE.ends_with('}'));
        assert!(CLANG_FORMAT_STYLE.contains("ColumnLimit: 100"));
    }
}
