//! A trait that can provide the [Span] of the complete context of a token or syntax tree node

use std::fmt::{Display, Formatter};

/// A trait that can provide the [Span] of the complete context of a token or syntax tree node
pub trait Spanned {
    fn span(&self) -> Span;
}

/// A location within a single source text.
///
/// Spans order by their byte offset first, so sorting spans sorts them into source order.
#[derive(Debug, Copy, Clone, Ord, PartialOrd, Eq, PartialEq, Hash, Default)]
pub struct Span {
    offset: usize,
    len: usize,
    line: usize,
    column: usize,
}

impl Span {
    /// Creates a new span. `line` and `column` are 1-based.
    pub const fn new(offset: usize, len: usize, line: usize, column: usize) -> Self {
        Self {
            offset,
            len,
            line,
            column,
        }
    }

    /// Gets the byte offset of the start of this span
    #[inline]
    pub const fn offset(&self) -> usize {
        self.offset
    }

    /// Gets the length of this span in bytes
    #[inline]
    pub const fn len(&self) -> usize {
        self.len
    }

    /// Checks if this span covers no characters
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// The 1-based line this span starts on
    #[inline]
    pub const fn line(&self) -> usize {
        self.line
    }

    /// The 1-based column this span starts on, counted in characters
    #[inline]
    pub const fn column(&self) -> usize {
        self.column
    }

    /// Gets the byte range this span covers
    pub const fn range(&self) -> std::ops::Range<usize> {
        self.offset..self.offset + self.len
    }

    /// Creates a span that encompasses both
    pub fn join(&self, other: Self) -> Self {
        let first = if self.offset <= other.offset {
            *self
        } else {
            other
        };
        let end = (self.offset + self.len).max(other.offset + other.len);
        Self {
            offset: first.offset,
            len: end - first.offset,
            line: first.line,
            column: first.column,
        }
    }
}

impl Display for Span {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

impl Spanned for Span {
    fn span(&self) -> Span {
        *self
    }
}

/// A line reader struct that's responsible for getting lines around a span
#[derive(Debug, Default)]
pub struct LineReader {
    before: usize,
    after: usize,
}

impl LineReader {
    /// Creates a new line reader that gets `before` number of lines before a span and `after` number
    /// of lines after.
    pub fn new(before: usize, after: usize) -> Self {
        Self { before, after }
    }

    /// Gets the lines surrounding a given span, plus the base line index
    pub fn lines(&self, src: &str, span: &Span) -> (Vec<Line>, usize) {
        let base_line = span.line().max(1);
        let range = base_line.saturating_sub(self.before)..=base_line.saturating_add(self.after);
        let mut byte_offset = 0usize;
        let mut lines = vec![];
        for (idx, text) in src.split('\n').enumerate() {
            let line = idx + 1;
            if range.contains(&line) {
                lines.push(Line {
                    line,
                    col: if line == base_line {
                        span.column().saturating_sub(1)
                    } else {
                        0
                    },
                    byte_offset,
                    src: text.trim_end_matches('\r').to_string(),
                });
            }
            byte_offset += text.len() + 1;
        }
        (lines, base_line)
    }
}

/// A single line of source text
#[derive(Debug)]
pub struct Line {
    pub line: usize,
    /// 0-based column of the span start, only set on the base line
    pub col: usize,
    pub byte_offset: usize,
    pub src: String,
}
