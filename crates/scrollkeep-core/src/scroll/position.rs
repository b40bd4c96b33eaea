//! Pure relative-position math
//!
//! Everything here is side-effect free so the scroller only has to sequence
//! host calls around it.

use super::types::VisibleRange;

/// Fractional placement of `cursor_line` inside `range` (0 = top, 1 = bottom)
///
/// Returns 0 for a zero-height range. A cursor outside the range yields a
/// ratio outside `[0, 1]`, which callers extrapolate with unchanged.
#[inline]
pub fn relative_position(range: VisibleRange, cursor_line: usize) -> f64 {
    let height = range.line_count();
    if height == 0 {
        return 0.0;
    }
    (cursor_line as f64 - range.start_line as f64) / height as f64
}

/// Line at `relative` inside `range`, rounded half away from zero
///
/// May be negative or past the document end; see [`clamp_line`].
#[inline]
pub fn project_line(range: VisibleRange, relative: f64) -> i64 {
    (range.start_line as f64 + relative * range.line_count() as f64).round() as i64
}

/// Clamp a projected line into `[0, line_count - 1]`
#[inline]
pub fn clamp_line(line: i64, line_count: usize) -> usize {
    let last = line_count.saturating_sub(1);
    if line <= 0 {
        0
    } else {
        usize::try_from(line).map_or(last, |line| line.min(last))
    }
}

/// Clamp a character offset to the length of `text` in characters
#[inline]
pub fn clamp_character(character: usize, text: &str) -> usize {
    character.min(text.chars().count())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_relative_position_midpoint() {
        let range = VisibleRange::new(10, 30);
        assert!((relative_position(range, 20) - 0.5).abs() < f64::EPSILON);
        assert!((relative_position(range, 10) - 0.0).abs() < f64::EPSILON);
        assert!((relative_position(range, 30) - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_relative_position_zero_height() {
        assert_eq!(relative_position(VisibleRange::new(0, 0), 0), 0.0);
        assert_eq!(relative_position(VisibleRange::new(7, 7), 90), 0.0);
    }

    #[test]
    fn test_relative_position_outside_range() {
        let range = VisibleRange::new(10, 20);
        assert!((relative_position(range, 0) + 1.0).abs() < f64::EPSILON);
        assert!((relative_position(range, 40) - 3.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_project_line() {
        assert_eq!(project_line(VisibleRange::new(25, 45), 0.5), 35);
        assert_eq!(project_line(VisibleRange::new(5, 5), 0.0), 5);
        // 0 + 0.25 * 2 = 0.5 rounds up
        assert_eq!(project_line(VisibleRange::new(0, 2), 0.25), 1);
        assert_eq!(project_line(VisibleRange::new(15, 25), -2.0), -5);
    }

    #[test]
    fn test_clamp_line() {
        assert_eq!(clamp_line(-5, 100), 0);
        assert_eq!(clamp_line(0, 100), 0);
        assert_eq!(clamp_line(42, 100), 42);
        assert_eq!(clamp_line(100, 100), 99);
        assert_eq!(clamp_line(i64::MAX, 100), 99);
        assert_eq!(clamp_line(3, 0), 0);
    }

    #[test]
    fn test_clamp_character_counts_chars() {
        assert_eq!(clamp_character(3, "hello"), 3);
        assert_eq!(clamp_character(50, "hello"), 5);
        assert_eq!(clamp_character(9, ""), 0);
        // 4 chars, 7 bytes
        assert_eq!(clamp_character(6, "ñañá"), 4);
    }
}
