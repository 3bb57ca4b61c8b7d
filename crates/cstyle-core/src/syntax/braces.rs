//! Brace matching over sanitized text.

use std::iter::FusedIterator;

use serde::Serialize;

use super::{BraceImbalance, StructuralError};

/// A matched `{` ... `}` pair.
///
/// Offsets are byte offsets into the text the pair was found in; `end` points
/// at the closing brace itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct BracePair {
    /// Offset of the opening brace.
    pub start: usize,
    /// Offset of the closing brace.
    pub end: usize,
    /// Number of braces still open around this pair (0 = file scope).
    pub depth: usize,
}

/// Lazy iterator over brace pairs, in order of their closing brace.
///
/// Only pairs whose depth is at most `min_depth_kept` are yielded. With the
/// default of 0 that means top-level function, struct and enum bodies.
///
/// An imbalance is reported as an `Err` item, after which the iterator is
/// exhausted. Pairs closed before the imbalance are still yielded first.
#[derive(Debug, Clone)]
pub struct BracePairs<'a> {
    bytes: &'a [u8],
    pos: usize,
    open: Vec<usize>,
    min_depth_kept: usize,
    done: bool,
}

impl<'a> BracePairs<'a> {
    /// Creates an iterator over `text`, which should already be sanitized.
    #[must_use]
    pub fn new(text: &'a str, min_depth_kept: usize) -> Self {
        Self {
            bytes: text.as_bytes(),
            pos: 0,
            open: Vec::new(),
            min_depth_kept,
            done: false,
        }
    }
}

impl Iterator for BracePairs<'_> {
    type Item = Result<BracePair, StructuralError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }

        while self.pos < self.bytes.len() {
            let i = self.pos;
            self.pos += 1;

            match self.bytes[i] {
                b'{' => self.open.push(i),
                b'}' => {
                    let Some(start) = self.open.pop() else {
                        self.done = true;
                        return Some(Err(StructuralError::UnbalancedBraces(
                            BraceImbalance::MoreClosing,
                        )));
                    };
                    let depth = self.open.len();
                    if depth <= self.min_depth_kept {
                        return Some(Ok(BracePair {
                            start,
                            end: i,
                            depth,
                        }));
                    }
                }
                _ => {}
            }
        }

        self.done = true;
        if self.open.is_empty() {
            None
        } else {
            Some(Err(StructuralError::UnbalancedBraces(
                BraceImbalance::MoreOpening,
            )))
        }
    }
}

impl FusedIterator for BracePairs<'_> {}

/// Top-level brace pairs of `text` (`min_depth_kept = 0`).
#[must_use]
pub fn find_brace_pairs(text: &str) -> BracePairs<'_> {
    BracePairs::new(text, 0)
}
