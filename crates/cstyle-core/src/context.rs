//! Context types for rule execution.

use std::cell::OnceCell;
use std::path::{Path, PathBuf};

use crate::rule::Halt;
use crate::syntax::{sanitize, StructuralError};
use crate::tools::{ToolError, Toolchain};
use crate::types::Violation;

/// Kind of source file, derived from its extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceKind {
    /// `.c`
    C,
    /// `.h`
    Header,
    /// `.ts`, checked by every rule except the global-variable check.
    TypeScript,
    /// Anything else passed explicitly.
    Other,
}

impl SourceKind {
    /// Extensions picked up by directory discovery, in discovery order.
    pub const DISCOVERED_EXTENSIONS: [&'static str; 3] = ["c", "h", "ts"];

    /// Classifies `path` by extension.
    #[must_use]
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some("c") => Self::C,
            Some("h") => Self::Header,
            Some("ts") => Self::TypeScript,
            _ => Self::Other,
        }
    }

    /// True for `.c` and `.h` files.
    #[must_use]
    pub fn is_c(self) -> bool {
        matches!(self, Self::C | Self::Header)
    }
}

/// Context provided to per-file rules.
///
/// Holds the raw text and lazily computes the derived forms rules ask for:
/// the sanitized text, the canonically formatted text, and the sanitized
/// formatted text. Each form is computed at most once per file.
pub struct FileContext<'a> {
    /// Path to the file as discovered.
    pub path: &'a Path,
    /// File contents as a string.
    pub content: &'a str,
    /// File kind.
    pub kind: SourceKind,
    /// Path relative to the directory scope.
    pub relative_path: PathBuf,
    tools: &'a Toolchain,
    sanitized: OnceCell<String>,
    formatted: OnceCell<String>,
    formatted_sanitized: OnceCell<String>,
}

impl std::fmt::Debug for FileContext<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FileContext")
            .field("path", &self.path)
            .field("kind", &self.kind)
            .finish_non_exhaustive()
    }
}

impl<'a> FileContext<'a> {
    /// Creates a new file context.
    #[must_use]
    pub fn new(path: &'a Path, content: &'a str, root: &Path, tools: &'a Toolchain) -> Self {
        let relative_path = path
            .strip_prefix(root)
            .map_or_else(|_| path.to_path_buf(), Path::to_path_buf);

        Self {
            path,
            content,
            kind: SourceKind::from_path(path),
            relative_path,
            tools,
            sanitized: OnceCell::new(),
            formatted: OnceCell::new(),
            formatted_sanitized: OnceCell::new(),
        }
    }

    /// File name without directories.
    #[must_use]
    pub fn file_name(&self) -> &str {
        self.path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or_default()
    }

    /// The raw text with comments and literal contents removed.
    ///
    /// # Errors
    ///
    /// Halts with a structural violation on unterminated comments/literals.
    pub fn sanitized(&self) -> Result<&str, Halt> {
        if let Some(text) = self.sanitized.get() {
            return Ok(text);
        }
        let text = sanitize(self.content).map_err(|e| self.structural(&e))?;
        Ok(self.sanitized.get_or_init(|| text))
    }

    /// The file as printed by the canonical formatter.
    ///
    /// # Errors
    ///
    /// Halts with [`Halt::Abort`] when the formatter is missing, or with a
    /// tool violation when it fails on this file.
    pub fn formatted(&self) -> Result<&str, Halt> {
        if let Some(text) = self.formatted.get() {
            return Ok(text);
        }
        let text = self
            .tools
            .formatter()
            .format(self.path)
            .map_err(|e| self.tool_halt(e))?;
        Ok(self.formatted.get_or_init(|| text))
    }

    /// The formatted text, sanitized.
    ///
    /// # Errors
    ///
    /// See [`Self::formatted`] and [`Self::sanitized`].
    pub fn formatted_sanitized(&self) -> Result<&str, Halt> {
        if let Some(text) = self.formatted_sanitized.get() {
            return Ok(text);
        }
        let text = sanitize(self.formatted()?).map_err(|e| self.structural(&e))?;
        Ok(self.formatted_sanitized.get_or_init(|| text))
    }

    /// Asks the tag lister for file-scope variables in this file.
    ///
    /// # Errors
    ///
    /// Same tool handling as [`Self::formatted`].
    pub fn list_globals(&self) -> Result<String, Halt> {
        self.tools
            .tags()
            .list_globals(self.path)
            .map_err(|e| self.tool_halt(e))
    }

    /// Converts a structural error into a halting violation for this file.
    #[must_use]
    pub fn structural(&self, error: &StructuralError) -> Halt {
        Violation::structural(self.path, error).into()
    }

    fn tool_halt(&self, error: ToolError) -> Halt {
        match error {
            ToolError::Unavailable { .. } => Halt::Abort(error),
            ToolError::Failed { .. } => Violation::tool_failed(self.path, error.to_string()).into(),
        }
    }
}

/// Context provided to project-wide rules.
#[derive(Debug, Clone)]
pub struct ProjectContext<'a> {
    /// Directory scope of the run.
    pub root: &'a Path,
    /// All files that were checked.
    pub source_files: Vec<PathBuf>,
    /// Whether the files were given explicitly instead of discovered.
    pub explicit_files: bool,
}

impl<'a> ProjectContext<'a> {
    /// Creates a new project context.
    #[must_use]
    pub fn new(root: &'a Path) -> Self {
        Self {
            root,
            source_files: Vec::new(),
            explicit_files: false,
        }
    }

    /// Sets the list of source files.
    #[must_use]
    pub fn with_source_files(mut self, files: Vec<PathBuf>) -> Self {
        self.source_files = files;
        self
    }

    /// Marks the file list as explicitly given.
    #[must_use]
    pub fn with_explicit_files(mut self, explicit: bool) -> Self {
        self.explicit_files = explicit;
        self
    }
}
