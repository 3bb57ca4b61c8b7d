//! Makefile command: checks for a `mytests` target and its test markers.

use anyhow::{bail, Context, Result};
use std::path::Path;
use tracing::warn;

/// Marker comments expected under the `mytests` target, in insertion order.
/// Each is inserted directly below the target, so the last one ends up first.
const MARKERS: [&str; 2] = ["# Test 2:", "# Test 1:"];

const TARGET: &str = "mytests";

/// Result of patching a Makefile.
#[derive(Debug, PartialEq, Eq)]
pub struct Patched {
    /// The new contents.
    pub text: String,
    /// Markers that were missing and have been inserted.
    pub inserted: Vec<&'static str>,
}

/// Inserts missing test markers below every `mytests` target line.
///
/// Returns `None` when the Makefile has no `mytests` target.
#[must_use]
pub fn patch_makefile(text: &str) -> Option<Patched> {
    let mut lines: Vec<String> = text.split('\n').map(str::to_string).collect();

    if !lines.iter().any(|line| line.starts_with(TARGET)) {
        return None;
    }

    let mut inserted = Vec::new();
    for marker in MARKERS {
        if lines.iter().any(|line| line.contains(marker)) {
            continue;
        }
        inserted.push(marker);

        let targets: Vec<usize> = lines
            .iter()
            .enumerate()
            .filter(|(_, line)| line.starts_with(TARGET))
            .map(|(i, _)| i)
            .collect();
        // back to front keeps the earlier indices valid
        for i in targets.into_iter().rev() {
            lines.insert(i + 1, format!("\t{marker}"));
        }
    }

    Some(Patched {
        text: lines.join("\n"),
        inserted,
    })
}

/// Runs the makefile command.
pub fn run(path: &Path) -> Result<()> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;

    let Some(patched) = patch_makefile(&text) else {
        bail!("\"{TARGET}:\" missing from {}.", path.display());
    };

    for marker in &patched.inserted {
        warn!(
            "\"{}\" missing from {}. Line has been inserted automatically. Please double-check \
             if you have described (briefly) what you are testing.",
            marker,
            path.display()
        );
    }

    if patched.text != text {
        std::fs::write(path, &patched.text)
            .with_context(|| format!("Failed to write {}", path.display()))?;
    }

    println!("\tOK: {} has a {TARGET} target.", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_target() {
        assert_eq!(patch_makefile("all:\n\tgcc main.c\n"), None);
    }

    #[test]
    fn inserts_both_markers_in_order() {
        let patched = patch_makefile("all: main\n\nmytests: main\n\t./main < in.txt\n").unwrap();
        assert_eq!(
            patched.text,
            "all: main\n\nmytests: main\n\t# Test 1:\n\t# Test 2:\n\t./main < in.txt\n"
        );
        assert_eq!(patched.inserted, vec!["# Test 2:", "# Test 1:"]);
    }

    #[test]
    fn keeps_existing_markers() {
        let text = "mytests:\n\t# Test 1: empty input\n\t./main\n\t# Test 2: long input\n";
        let patched = patch_makefile(text).unwrap();
        assert_eq!(patched.text, text);
        assert!(patched.inserted.is_empty());
    }

    #[test]
    fn inserts_only_missing_marker() {
        let patched = patch_makefile("mytests:\n\t# Test 1: a\n").unwrap();
        assert_eq!(patched.text, "mytests:\n\t# Test 2:\n\t# Test 1: a\n");
        assert_eq!(patched.inserted, vec!["# Test 2:"]);
    }
}
