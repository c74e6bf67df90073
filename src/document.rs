use crate::error::Result;
use crate::span::{check_offset, Position, TextSpan};

/// The mutable text of an editing session.
///
/// All mutations are validated before anything is written, so a rejected
/// call leaves the text exactly as it was.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Document {
    text: String,
}

impl Document {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_text(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn len(&self) -> usize {
        self.text.len()
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Insert `text` at byte offset `at`.
    pub fn insert(&mut self, at: Position, text: &str) -> Result<()> {
        check_offset(&self.text, at)?;
        self.text.insert_str(at, text);
        Ok(())
    }

    /// Remove the bytes covered by `span`.
    pub fn delete(&mut self, span: TextSpan) -> Result<()> {
        span.validate(&self.text)?;
        self.text.replace_range(span.start..span.end, "");
        Ok(())
    }

    /// Swap in entirely new content.
    pub fn replace_all_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
    }

    /// 1-based line and column (in chars) of a byte offset.
    pub fn line_col(&self, offset: Position) -> Result<(usize, usize)> {
        check_offset(&self.text, offset)?;
        Ok(line_col(&self.text, offset))
    }
}

pub(crate) fn line_col(text: &str, offset: Position) -> (usize, usize) {
    let before = &text[..offset];
    let line = before.matches('\n').count() + 1;
    let line_start = before.rfind('\n').map_or(0, |i| i + 1);
    let column = before[line_start..].chars().count() + 1;
    (line, column)
}
