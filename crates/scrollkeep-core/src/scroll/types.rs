//! Value types exchanged between the scroller and the host

use std::fmt;

/// Vertical scroll direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Up,
    Down,
}

/// Amount scrolled by one request unit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScrollUnit {
    HalfPage,
    Page,
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::Up => f.write_str("up"),
            Direction::Down => f.write_str("down"),
        }
    }
}

impl fmt::Display for ScrollUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScrollUnit::HalfPage => f.write_str("halfPage"),
            ScrollUnit::Page => f.write_str("page"),
        }
    }
}

/// A raw viewport scroll handed to the host
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScrollRequest {
    pub direction: Direction,
    pub unit: ScrollUnit,
    /// Whether the host may move the cursor into view afterwards
    pub reveal_cursor: bool,
    /// Number of units to scroll
    pub value: u32,
}

impl ScrollRequest {
    /// One unit, scrolling the viewport only
    pub fn viewport_only(direction: Direction, unit: ScrollUnit) -> Self {
        Self {
            direction,
            unit,
            reveal_cursor: false,
            value: 1,
        }
    }

    /// One unit, letting the host reveal the cursor
    pub fn revealing(direction: Direction, unit: ScrollUnit) -> Self {
        Self {
            reveal_cursor: true,
            ..Self::viewport_only(direction, unit)
        }
    }
}

/// Visible span of a view, both ends inclusive
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VisibleRange {
    pub start_line: usize,
    pub end_line: usize,
}

impl VisibleRange {
    /// Build a range; an `end_line` before `start_line` collapses onto it
    pub fn new(start_line: usize, end_line: usize) -> Self {
        Self {
            start_line,
            end_line: end_line.max(start_line),
        }
    }

    /// Distance between first and last visible line (0 for a single line)
    #[inline]
    pub fn line_count(&self) -> usize {
        self.end_line - self.start_line
    }

    #[inline]
    pub fn contains(&self, line: usize) -> bool {
        line >= self.start_line && line <= self.end_line
    }
}

/// Zero-based line and character offset
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord)]
pub struct CursorPosition {
    pub line: usize,
    /// Offset in characters (Unicode scalar values) into the line
    pub character: usize,
}

impl CursorPosition {
    pub fn new(line: usize, character: usize) -> Self {
        Self { line, character }
    }
}

impl fmt::Display for CursorPosition {
    /// One-based `line:column`, the way status lines show it
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line + 1, self.character + 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_visible_range_normalizes_end() {
        let range = VisibleRange::new(12, 3);
        assert_eq!(range.start_line, 12);
        assert_eq!(range.end_line, 12);
        assert_eq!(range.line_count(), 0);
    }

    #[test]
    fn test_visible_range_contains_is_inclusive() {
        let range = VisibleRange::new(10, 30);
        assert!(range.contains(10));
        assert!(range.contains(30));
        assert!(!range.contains(9));
        assert!(!range.contains(31));
        assert_eq!(range.line_count(), 20);
    }

    #[test]
    fn test_request_constructors() {
        let quiet = ScrollRequest::viewport_only(Direction::Down, ScrollUnit::HalfPage);
        assert!(!quiet.reveal_cursor);
        assert_eq!(quiet.value, 1);

        let loud = ScrollRequest::revealing(Direction::Up, ScrollUnit::Page);
        assert!(loud.reveal_cursor);
        assert_eq!(loud.direction, Direction::Up);
        assert_eq!(loud.unit, ScrollUnit::Page);
        assert_eq!(loud.value, 1);
    }

    #[test]
    fn test_cursor_display_is_one_based() {
        assert_eq!(CursorPosition::new(0, 0).to_string(), "1:1");
        assert_eq!(CursorPosition::new(41, 7).to_string(), "42:8");
    }
}
