//! Positions and half-open ranges over document text.
//!
//! A position is a byte offset into the UTF-8 text. Every range handed out
//! by an annotator lies on char boundaries of the text it was computed from.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Byte offset into a document.
pub type Position = usize;

/// A half-open `[start, end)` byte range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct TextSpan {
    pub start: Position,
    pub end: Position,
}

impl TextSpan {
    /// Build a span, rejecting `start > end`.
    pub fn new(start: Position, end: Position) -> Result<Self> {
        if start > end {
            return Err(Error::InvertedRange { start, end });
        }
        Ok(Self { start, end })
    }

    /// Span of `len` bytes starting at `start`.
    pub(crate) fn at(start: Position, len: usize) -> Self {
        Self {
            start,
            end: start + len,
        }
    }

    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// Half-open membership: `start <= pos < end`.
    pub fn contains(&self, pos: Position) -> bool {
        self.start <= pos && pos < self.end
    }

    pub fn overlaps(&self, other: &TextSpan) -> bool {
        self.start < other.end && other.start < self.end
    }

    /// Check that the span addresses valid char boundaries of `text`.
    pub fn validate(&self, text: &str) -> Result<()> {
        check_offset(text, self.start)?;
        check_offset(text, self.end)
    }

    /// The substring covered by this span, if the span is valid for `text`.
    pub fn slice<'a>(&self, text: &'a str) -> Option<&'a str> {
        text.get(self.start..self.end)
    }
}

impl fmt::Display for TextSpan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..{}", self.start, self.end)
    }
}

pub(crate) fn check_offset(text: &str, offset: Position) -> Result<()> {
    if offset > text.len() {
        return Err(Error::OutOfBounds {
            offset,
            len: text.len(),
        });
    }
    if !text.is_char_boundary(offset) {
        return Err(Error::NotCharBoundary { offset });
    }
    Ok(())
}
