//! Incremental line/column tracking driven by token offsets.

use crate::node::Point;

/// Running start/end cursors for the span most recently consumed.
///
/// Offsets only move forward in normal use, so each call scans just the
/// bytes between the previous cursor and the new offset.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PositionTracker {
    /// Last located point; scanning resumes here
    cursor: Point,
    start: Point,
    end: Point,
}

impl PositionTracker {
    /// Tracker at the beginning of the source.
    pub fn new() -> Self {
        Self::default()
    }

    /// Start of the current span.
    pub fn start(&self) -> Point {
        self.start
    }

    /// End (exclusive) of the current span.
    pub fn end(&self) -> Point {
        self.end
    }

    /// Consume the span `from..to`. A delimited span also covers the
    /// closing `>` at `to`.
    pub fn advance(&mut self, source: &str, from: usize, to: usize, delimited: bool) {
        self.start = self.locate(source, from);
        self.extend(source, to, delimited);
    }

    /// Move only the end of the current span.
    pub fn extend(&mut self, source: &str, to: usize, delimited: bool) {
        let to = if delimited { to + 1 } else { to };
        self.end = self.locate(source, to);
    }

    fn locate(&mut self, source: &str, offset: usize) -> Point {
        let offset = offset.min(source.len());
        if offset < self.cursor.offset {
            self.cursor = Point::START;
        }
        if let Some(skipped) = source.get(self.cursor.offset..offset) {
            for ch in skipped.chars() {
                self.cursor.bump(ch);
            }
        }
        self.cursor
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_advance_over_lines() {
        let source = "<p>\nab</p>";
        let mut tracker = PositionTracker::new();

        tracker.advance(source, 0, 2, true);
        assert_eq!(tracker.start(), Point::new(1, 1, 0));
        assert_eq!(tracker.end(), Point::new(1, 4, 3));

        tracker.advance(source, 3, 6, false);
        assert_eq!(tracker.start(), Point::new(1, 4, 3));
        assert_eq!(tracker.end(), Point::new(2, 3, 6));

        tracker.advance(source, 6, 9, true);
        assert_eq!(tracker.end(), Point::new(2, 7, 10));
    }

    #[test]
    fn test_extend_keeps_start() {
        let source = "abcdef";
        let mut tracker = PositionTracker::new();
        tracker.advance(source, 0, 3, false);
        tracker.extend(source, 6, false);
        assert_eq!(tracker.start(), Point::START);
        assert_eq!(tracker.end(), Point::new(1, 7, 6));
    }

    #[test]
    fn test_columns_count_chars() {
        let source = "héllo";
        let mut tracker = PositionTracker::new();
        tracker.advance(source, 0, source.len(), false);
        assert_eq!(tracker.end(), Point::new(1, 6, 6));
    }

    #[test]
    fn test_rewind() {
        let source = "a\nb";
        let mut tracker = PositionTracker::new();
        tracker.advance(source, 2, 3, false);
        tracker.advance(source, 0, 1, false);
        assert_eq!(tracker.start(), Point::START);
        assert_eq!(tracker.end(), Point::new(1, 2, 1));
    }
}
