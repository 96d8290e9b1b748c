//! Source location spans.
//!
//! A [`Span`] points a violation at a position in the submitted manifest.

use std::fmt;
use std::path::PathBuf;

/// A position in a source file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Span {
    /// File path.
    pub file: PathBuf,
    /// Line (1-indexed).
    pub line: usize,
    /// Column (1-indexed).
    pub column: usize,
}

impl Span {
    /// Create a span at a line and column.
    pub fn new(file: impl Into<PathBuf>, line: usize, column: usize) -> Self {
        Self {
            file: file.into(),
            line,
            column,
        }
    }

    /// Create a span at the start of a line.
    pub fn line(file: impl Into<PathBuf>, line: usize) -> Self {
        Self::new(file, line, 1)
    }
}

impl fmt::Display for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}", self.file.display(), self.line, self.column)
    }
}
