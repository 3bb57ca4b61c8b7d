//! Project rule to cap the size of the checked directory.
//!
//! Counts every regular file below the directory scope, not only sources:
//! a submission that ships build output or data dumps fails here. Hidden
//! files are skipped and ignore files are not consulted.

use std::path::Path;

use cstyle_core::{Location, ProjectContext, ProjectRule, Violation};
use ignore::WalkBuilder;
use tracing::debug;

/// Rule code for file-set-size.
pub const CODE: &str = "CS100";

/// Rule name for file-set-size.
pub const NAME: &str = "file-set-size";

/// Default maximum number of files.
pub const DEFAULT_MAX_FILES: usize = 1000;

/// Default maximum total size in bytes (10 MB).
pub const DEFAULT_MAX_BYTES: u64 = 10_000_000;

/// Caps the number and total size of files in the directory scope.
#[derive(Debug, Clone, Copy)]
pub struct FileSetSize {
    /// Maximum number of files.
    pub max_files: usize,
    /// Maximum total size in bytes.
    pub max_bytes: u64,
}

impl Default for FileSetSize {
    fn default() -> Self {
        Self::new()
    }
}

impl FileSetSize {
    /// Creates a new rule with the default limits.
    #[must_use]
    pub fn new() -> Self {
        Self {
            max_files: DEFAULT_MAX_FILES,
            max_bytes: DEFAULT_MAX_BYTES,
        }
    }

    /// Sets the maximum number of files.
    #[must_use]
    pub fn max_files(mut self, max: usize) -> Self {
        self.max_files = max;
        self
    }

    /// Sets the maximum total size in bytes.
    #[must_use]
    pub fn max_bytes(mut self, max: u64) -> Self {
        self.max_bytes = max;
        self
    }
}

/// Counts regular files below `root` and sums their sizes.
fn measure(root: &Path) -> (usize, u64) {
    let mut builder = WalkBuilder::new(root);
    builder.standard_filters(false).hidden(true);

    let mut files = 0;
    let mut bytes = 0;
    for entry in builder.build() {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                debug!("Skipping unreadable entry: {}", e);
                continue;
            }
        };
        if !entry.file_type().is_some_and(|t| t.is_file()) {
            continue;
        }
        files += 1;
        bytes += entry.metadata().map_or(0, |m| m.len());
    }
    (files, bytes)
}

impl ProjectRule for FileSetSize {
    fn name(&self) -> &'static str {
        NAME
    }

    fn code(&self) -> &'static str {
        CODE
    }

    fn description(&self) -> &'static str {
        "Limits the directory to 1000 files and 10 MB"
    }

    #[allow(clippy::cast_precision_loss)]
    fn check_project(&self, ctx: &ProjectContext<'_>) -> Vec<Violation> {
        if ctx.explicit_files {
            debug!("Explicit file list given, skipping {}", NAME);
            return Vec::new();
        }

        let (files, bytes) = measure(ctx.root);
        debug!("{} files, {} bytes below {}", files, bytes, ctx.root.display());

        let message = if files > self.max_files {
            format!("More than {} files ({files}) in directory", self.max_files)
        } else if bytes > self.max_bytes {
            format!(
                "Total file size exceeds {} MB ({} MB)",
                self.max_bytes as f64 * 1e-6,
                bytes as f64 * 1e-6
            )
        } else {
            return Vec::new();
        };

        vec![Violation::style(CODE, NAME, Location::file(ctx.root), message)]
    }
}
