//! Source location tracking for tokens and AST nodes.
//!
//! Lines are 1-indexed, columns are 0-indexed, and both count Unicode code
//! points rather than bytes or UTF-16 units.

use serde::Serialize;

/// A position in the source code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct Point {
    /// Line number, starting at 1.
    pub line: u32,
    /// Column, starting at 0, counted in code points.
    pub column: u32,
}

impl Point {
    /// Creates a new point.
    #[must_use]
    pub const fn new(line: u32, column: u32) -> Self {
        Self { line, column }
    }

    /// The position before the first character of any input.
    #[must_use]
    pub const fn start() -> Self {
        Self::new(1, 0)
    }
}

impl Default for Point {
    fn default() -> Self {
        Self::start()
    }
}

/// A half-open span of source code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
pub struct Range {
    /// Start point (inclusive).
    pub from: Point,
    /// End point (exclusive).
    pub to: Point,
}

impl Range {
    /// Creates a new range.
    #[must_use]
    pub const fn new(from: Point, to: Point) -> Self {
        Self { from, to }
    }

    /// Creates a zero-width range at the given point.
    #[must_use]
    pub const fn empty_at(point: Point) -> Self {
        Self::new(point, point)
    }

    /// Creates a range that starts where `start` starts and ends where `end`
    /// ends.
    #[must_use]
    pub const fn between(start: Self, end: Self) -> Self {
        Self::new(start.from, end.to)
    }

    /// Returns true if the range covers no characters.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.from == self.to
    }

    /// Returns true if `other` lies completely inside this range.
    #[must_use]
    pub fn contains(&self, other: &Self) -> bool {
        self.from <= other.from && other.to <= self.to
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_point_ordering() {
        assert!(Point::new(1, 5) < Point::new(2, 0));
        assert!(Point::new(2, 1) > Point::new(2, 0));
        assert_eq!(Point::default(), Point::new(1, 0));
    }

    #[test]
    fn test_range_between() {
        let first = Range::new(Point::new(1, 0), Point::new(1, 6));
        let last = Range::new(Point::new(2, 3), Point::new(2, 7));
        let merged = Range::between(first, last);
        assert_eq!(merged.from, Point::new(1, 0));
        assert_eq!(merged.to, Point::new(2, 7));
        assert!(merged.contains(&first));
        assert!(merged.contains(&last));
        assert!(!first.contains(&merged));
    }

    #[test]
    fn test_range_is_empty() {
        let empty = Range::empty_at(Point::new(3, 4));
        let non_empty = Range::new(Point::new(3, 4), Point::new(3, 5));
        assert!(empty.is_empty());
        assert!(!non_empty.is_empty());
    }
}
