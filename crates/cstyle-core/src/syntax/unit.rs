//! Recovery of function/struct/enum units from brace pairs.

use super::BracePair;

/// Characters that end the previous declaration when scanning backward.
///
/// `>` stops the scan at the end of an `#include <...>` line.
const UNIT_DELIMITERS: &[u8] = b"{};>\"";

/// A recovered declaration plus its brace-delimited body.
///
/// Note: a preprocessor macro directly in front of a function can pull its
/// text into the unit. This is an accepted limitation of the backward scan.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Unit<'a> {
    text: &'a str,
    /// Offset of the first character of the unit.
    pub start: usize,
    /// Offset of the closing brace.
    pub end: usize,
}

impl<'a> Unit<'a> {
    /// The raw span, signature through closing brace.
    #[must_use]
    pub fn span(&self) -> &'a str {
        &self.text[self.start..=self.end]
    }

    /// 1-based line of the unit's first character in the scanned text.
    #[must_use]
    pub fn line(&self) -> usize {
        self.text[..self.start].matches('\n').count() + 1
    }

    /// The span with all whitespace-only lines removed and exactly one
    /// trailing line break.
    #[must_use]
    pub fn cleaned(&self) -> String {
        let mut cleaned = self
            .span()
            .split('\n')
            .filter(|line| !line.trim().is_empty())
            .collect::<Vec<_>>()
            .join("\n");
        cleaned.truncate(cleaned.trim_end().len());
        cleaned.push('\n');
        cleaned
    }

    /// Number of non-blank lines, the length reported by the length check.
    #[must_use]
    pub fn line_count(&self) -> usize {
        self.cleaned().matches('\n').count()
    }
}

/// Extends `pair` backward to the end of the previous declaration.
///
/// Scans back from the opening brace to the nearest `{`, `}`, `;`, `>` or
/// `"` (or the start of the text), steps past it and skips whitespace.
#[must_use]
pub fn recover_unit(text: &str, pair: BracePair) -> Unit<'_> {
    let bytes = text.as_bytes();

    let mut start = pair.start;
    while start > 0 {
        start -= 1;
        if UNIT_DELIMITERS.contains(&bytes[start]) {
            start += 1;
            break;
        }
    }

    while start < pair.end && matches!(bytes[start], b' ' | b'\t' | b'\r' | b'\n') {
        start += 1;
    }

    Unit {
        text,
        start,
        end: pair.end,
    }
}
