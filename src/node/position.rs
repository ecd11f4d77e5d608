//! Source positions attached to nodes.

use std::fmt;

/// A single place in the source text.
///
/// `line` and `column` are 1-based and count characters; `offset` is a
/// 0-based UTF-8 byte offset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Point {
    /// 1-based line
    pub line: usize,
    /// 1-based column
    pub column: usize,
    /// 0-based byte offset
    pub offset: usize,
}

impl Point {
    /// The beginning of any source.
    pub const START: Self = Self { line: 1, column: 1, offset: 0 };

    /// Create a point.
    pub const fn new(line: usize, column: usize, offset: usize) -> Self {
        Self { line, column, offset }
    }

    /// Advance over one character.
    #[inline]
    pub fn bump(&mut self, ch: char) {
        if ch == '\n' {
            self.line += 1;
            self.column = 1;
        } else {
            self.column += 1;
        }
        self.offset += ch.len_utf8();
    }
}

impl Default for Point {
    fn default() -> Self {
        Self::START
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

/// Start and end of a node in the source; `end` is exclusive.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Position {
    /// Where the node begins
    pub start: Point,
    /// Just past where the node ends
    pub end: Point,
}

impl Position {
    /// Create a position from two points.
    pub const fn new(start: Point, end: Point) -> Self {
        Self { start, end }
    }

    /// Byte length of the spanned source.
    pub fn len(&self) -> usize {
        self.end.offset.saturating_sub(self.start.offset)
    }

    /// Whether the span covers no source.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.start, self.end)
    }
}
