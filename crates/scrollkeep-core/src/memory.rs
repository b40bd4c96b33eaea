//! In-memory editor host
//!
//! A single document view backed by a `Vec<String>`, implementing the host
//! contract the scroll commands need. The terminal front end and the headless
//! `replay` command both drive this.

use crate::config::ScrollConfig;
use crate::host::{EditorHost, TextView};
use crate::scroll::{CursorPosition, Direction, ScrollRequest, ScrollUnit, VisibleRange};
use crate::{Error, Result};

/// Immutable document contents split into lines
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemoryDocument {
    lines: Vec<String>,
}

impl MemoryDocument {
    /// Split text on `\n`, dropping a trailing `\r` from each line.
    ///
    /// Empty text is a single empty line; a trailing newline opens one more
    /// empty line, as editors count it.
    pub fn from_text(text: &str) -> Self {
        let lines = text
            .split('\n')
            .map(|line| line.strip_suffix('\r').unwrap_or(line).to_string())
            .collect();
        Self { lines }
    }

    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    pub fn line(&self, line: usize) -> Option<&str> {
        self.lines.get(line).map(String::as_str)
    }

    /// Length of a line in characters (0 for lines past the end)
    pub fn line_len(&self, line: usize) -> usize {
        self.line(line).map_or(0, |text| text.chars().count())
    }

    fn last_line(&self) -> usize {
        self.lines.len().saturating_sub(1)
    }
}

/// A viewport of `height` rows over a document
#[derive(Debug, Clone)]
pub struct MemoryView {
    document: MemoryDocument,
    top: usize,
    height: usize,
    cursor: CursorPosition,
    anchor: CursorPosition,
    scroll_beyond_last_line: bool,
}

impl MemoryView {
    pub fn new(document: MemoryDocument, height: usize) -> Self {
        Self {
            document,
            top: 0,
            height: height.max(1),
            cursor: CursorPosition::default(),
            anchor: CursorPosition::default(),
            scroll_beyond_last_line: false,
        }
    }

    /// Apply the scroll section of the configuration
    pub fn with_config(mut self, config: &ScrollConfig) -> Self {
        self.scroll_beyond_last_line = config.scroll_beyond_last_line;
        self.top = self.top.min(self.max_top());
        self
    }

    pub fn with_top(mut self, top: usize) -> Self {
        self.top = top.min(self.max_top());
        self
    }

    /// Place the cursor, clamped into the document, without scrolling
    pub fn with_cursor(mut self, position: CursorPosition) -> Self {
        let position = self.clamp_position(position);
        self.cursor = position;
        self.anchor = position;
        self
    }

    pub fn document(&self) -> &MemoryDocument {
        &self.document
    }

    pub fn top(&self) -> usize {
        self.top
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// The single contiguous span this view shows
    pub fn visible_range(&self) -> VisibleRange {
        let end = (self.top + self.height).min(self.document.line_count());
        VisibleRange::new(self.top, end.saturating_sub(1))
    }

    /// Selection as `(anchor, active)`; both equal when collapsed
    pub fn selection(&self) -> (CursorPosition, CursorPosition) {
        (self.anchor, self.cursor)
    }

    pub fn has_selection(&self) -> bool {
        self.anchor != self.cursor
    }

    /// Select from `anchor` to `active`
    pub fn set_selection(&mut self, anchor: CursorPosition, active: CursorPosition) -> Result<()> {
        self.validate(anchor)?;
        self.validate(active)?;
        self.anchor = anchor;
        self.cursor = active;
        Ok(())
    }

    /// Move the cursor by a line/character delta, collapsing the selection
    /// and scrolling just enough to keep it visible
    pub fn move_cursor_by(&mut self, lines: isize, characters: isize) {
        let line = self.cursor.line.saturating_add_signed(lines).min(self.document.last_line());
        let character = self
            .cursor
            .character
            .saturating_add_signed(characters)
            .min(self.document.line_len(line));
        self.collapse_to(CursorPosition::new(line, character));
        self.ensure_cursor_visible();
    }

    pub fn jump_to_top(&mut self) {
        self.collapse_to(CursorPosition::new(0, 0));
        self.ensure_cursor_visible();
    }

    pub fn jump_to_bottom(&mut self) {
        self.collapse_to(CursorPosition::new(self.document.last_line(), 0));
        self.ensure_cursor_visible();
    }

    /// Change the number of rows, keeping the top line where possible and
    /// the cursor on screen
    pub fn resize(&mut self, height: usize) {
        self.height = height.max(1);
        self.ensure_cursor_visible();
    }

    /// Scroll the minimum amount that brings the cursor line on screen
    pub fn ensure_cursor_visible(&mut self) {
        let line = self.cursor.line;
        if line < self.top {
            self.top = line;
        } else if line >= self.top + self.height {
            self.top = line + 1 - self.height;
        }
        self.top = self.top.min(self.max_top());
    }

    /// Apply a raw scroll request to the viewport
    pub fn apply_scroll(&mut self, request: ScrollRequest) {
        let amount = self.unit_lines(request.unit).saturating_mul(request.value as usize);
        self.top = match request.direction {
            Direction::Down => self.top.saturating_add(amount).min(self.max_top()),
            Direction::Up => self.top.saturating_sub(amount),
        };

        if request.reveal_cursor {
            self.reveal_cursor();
        }
    }

    fn unit_lines(&self, unit: ScrollUnit) -> usize {
        match unit {
            ScrollUnit::HalfPage => (self.height / 2).max(1),
            ScrollUnit::Page => self.height,
        }
    }

    fn max_top(&self) -> usize {
        if self.scroll_beyond_last_line {
            self.document.last_line()
        } else {
            self.document.line_count().saturating_sub(self.height)
        }
    }

    /// Pull the cursor into the visible range after a revealing scroll
    fn reveal_cursor(&mut self) {
        let range = self.visible_range();
        if range.contains(self.cursor.line) {
            return;
        }
        let line = self.cursor.line.clamp(range.start_line, range.end_line);
        let character = self.cursor.character.min(self.document.line_len(line));
        self.collapse_to(CursorPosition::new(line, character));
    }

    fn collapse_to(&mut self, position: CursorPosition) {
        self.cursor = position;
        self.anchor = position;
    }

    fn clamp_position(&self, position: CursorPosition) -> CursorPosition {
        let line = position.line.min(self.document.last_line());
        CursorPosition::new(line, position.character.min(self.document.line_len(line)))
    }

    fn validate(&self, position: CursorPosition) -> Result<()> {
        if position.line >= self.document.line_count()
            || position.character > self.document.line_len(position.line)
        {
            return Err(Error::InvalidPosition {
                line: position.line,
                character: position.character,
            });
        }
        Ok(())
    }
}

impl TextView for MemoryView {
    fn visible_ranges(&self) -> Vec<VisibleRange> {
        vec![self.visible_range()]
    }

    fn cursor(&self) -> CursorPosition {
        self.cursor
    }

    fn document_line_count(&self) -> usize {
        self.document.line_count()
    }

    fn line_text(&self, line: usize) -> Option<&str> {
        self.document.line(line)
    }

    fn set_cursor(&mut self, position: CursorPosition) -> Result<()> {
        self.validate(position)?;
        self.collapse_to(position);
        Ok(())
    }
}

/// Host with at most one view
#[derive(Debug, Clone, Default)]
pub struct MemoryHost {
    view: Option<MemoryView>,
}

impl MemoryHost {
    pub fn new(view: MemoryView) -> Self {
        Self { view: Some(view) }
    }

    /// A host with nothing open
    pub fn empty() -> Self {
        Self { view: None }
    }

    pub fn view(&self) -> Option<&MemoryView> {
        self.view.as_ref()
    }

    pub fn view_mut(&mut self) -> Option<&mut MemoryView> {
        self.view.as_mut()
    }

    pub fn close(&mut self) -> Option<MemoryView> {
        self.view.take()
    }
}

#[async_trait::async_trait]
impl EditorHost for MemoryHost {
    fn active_view(&self) -> Option<&dyn TextView> {
        self.view.as_ref().map(|view| view as &dyn TextView)
    }

    fn active_view_mut(&mut self) -> Option<&mut dyn TextView> {
        self.view.as_mut().map(|view| view as &mut dyn TextView)
    }

    async fn scroll_viewport(&mut self, request: ScrollRequest) -> Result<()> {
        if let Some(view) = self.view.as_mut() {
            view.apply_scroll(request);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn numbered(count: usize) -> MemoryDocument {
        let text = (0..count).map(|i| format!("line {i}")).collect::<Vec<_>>().join("\n");
        MemoryDocument::from_text(&text)
    }

    #[test]
    fn test_document_from_text() {
        let doc = MemoryDocument::from_text("one\r\ntwo\nthree");
        assert_eq!(doc.line_count(), 3);
        assert_eq!(doc.line(0), Some("one"));
        assert_eq!(doc.line(2), Some("three"));
        assert_eq!(doc.line(3), None);

        assert_eq!(MemoryDocument::from_text("").line_count(), 1);
        assert_eq!(MemoryDocument::from_text("a\n").line_count(), 2);
    }

    #[test]
    fn test_visible_range_short_document() {
        let view = MemoryView::new(numbered(5), 20);
        assert_eq!(view.visible_range(), VisibleRange::new(0, 4));

        let single = MemoryView::new(MemoryDocument::from_text("only"), 20);
        assert_eq!(single.visible_range(), VisibleRange::new(0, 0));
    }

    #[test]
    fn test_scroll_amounts() {
        let mut view = MemoryView::new(numbered(100), 20);
        view.apply_scroll(ScrollRequest::viewport_only(Direction::Down, ScrollUnit::HalfPage));
        assert_eq!(view.top(), 10);
        view.apply_scroll(ScrollRequest::viewport_only(Direction::Down, ScrollUnit::Page));
        assert_eq!(view.top(), 30);
        view.apply_scroll(ScrollRequest::viewport_only(Direction::Up, ScrollUnit::Page));
        assert_eq!(view.top(), 10);
        view.apply_scroll(ScrollRequest::viewport_only(Direction::Up, ScrollUnit::Page));
        assert_eq!(view.top(), 0);
    }

    #[test]
    fn test_half_page_of_one_row_still_moves() {
        let mut view = MemoryView::new(numbered(10), 1);
        view.apply_scroll(ScrollRequest::viewport_only(Direction::Down, ScrollUnit::HalfPage));
        assert_eq!(view.top(), 1);
    }

    #[test]
    fn test_scroll_stops_at_max_top() {
        let mut view = MemoryView::new(numbered(30), 20);
        view.apply_scroll(ScrollRequest::viewport_only(Direction::Down, ScrollUnit::Page));
        assert_eq!(view.top(), 10);
        assert_eq!(view.visible_range(), VisibleRange::new(10, 29));

        let mut beyond = MemoryView::new(numbered(30), 20).with_config(&ScrollConfig {
            scroll_beyond_last_line: true,
            ..Default::default()
        });
        beyond.apply_scroll(ScrollRequest::viewport_only(Direction::Down, ScrollUnit::Page));
        beyond.apply_scroll(ScrollRequest::viewport_only(Direction::Down, ScrollUnit::Page));
        assert_eq!(beyond.top(), 29);
        assert_eq!(beyond.visible_range(), VisibleRange::new(29, 29));
    }

    #[test]
    fn test_viewport_only_scroll_keeps_cursor() {
        let mut view = MemoryView::new(numbered(100), 20).with_cursor(CursorPosition::new(3, 2));
        view.apply_scroll(ScrollRequest::viewport_only(Direction::Down, ScrollUnit::Page));
        assert_eq!(view.cursor(), CursorPosition::new(3, 2));
        assert!(!view.visible_range().contains(3));
    }

    #[test]
    fn test_revealing_scroll_pulls_cursor_into_view() {
        let mut view = MemoryView::new(numbered(100), 20).with_cursor(CursorPosition::new(3, 6));
        view.apply_scroll(ScrollRequest::revealing(Direction::Down, ScrollUnit::Page));
        assert_eq!(view.visible_range(), VisibleRange::new(20, 39));
        assert_eq!(view.cursor(), CursorPosition::new(20, 6));

        view.apply_scroll(ScrollRequest::revealing(Direction::Up, ScrollUnit::Page));
        // line 20 is below [0, 19], pulled up to its last line
        assert_eq!(view.cursor().line, 19);
    }

    #[test]
    fn test_revealing_scroll_leaves_visible_cursor() {
        let mut view = MemoryView::new(numbered(100), 20).with_cursor(CursorPosition::new(15, 0));
        view.apply_scroll(ScrollRequest::revealing(Direction::Down, ScrollUnit::HalfPage));
        assert_eq!(view.cursor().line, 15);
    }

    #[test]
    fn test_set_cursor_collapses_selection() {
        let mut view = MemoryView::new(numbered(10), 5);
        view.set_selection(CursorPosition::new(1, 0), CursorPosition::new(2, 3)).unwrap();
        assert!(view.has_selection());

        view.set_cursor(CursorPosition::new(4, 1)).unwrap();
        assert!(!view.has_selection());
        assert_eq!(view.selection(), (CursorPosition::new(4, 1), CursorPosition::new(4, 1)));
    }

    #[test]
    fn test_set_cursor_rejects_invalid_positions() {
        let mut view = MemoryView::new(numbered(10), 5);
        assert!(matches!(
            view.set_cursor(CursorPosition::new(10, 0)),
            Err(Error::InvalidPosition { line: 10, character: 0 })
        ));
        // "line 3" has 6 characters; offset 6 is the end of line
        assert!(view.set_cursor(CursorPosition::new(3, 6)).is_ok());
        assert!(view.set_cursor(CursorPosition::new(3, 7)).is_err());
    }

    #[test]
    fn test_move_cursor_follows_viewport() {
        let mut view = MemoryView::new(numbered(100), 10);
        view.move_cursor_by(12, 0);
        assert_eq!(view.cursor().line, 12);
        assert_eq!(view.top(), 3);

        view.move_cursor_by(-20, 0);
        assert_eq!(view.cursor().line, 0);
        assert_eq!(view.top(), 0);

        view.move_cursor_by(0, 100);
        assert_eq!(view.cursor().character, 6);
    }

    #[test]
    fn test_jump_to_bottom_and_top() {
        let mut view = MemoryView::new(numbered(100), 10);
        view.jump_to_bottom();
        assert_eq!(view.cursor().line, 99);
        assert_eq!(view.visible_range(), VisibleRange::new(90, 99));

        view.jump_to_top();
        assert_eq!(view.cursor(), CursorPosition::new(0, 0));
        assert_eq!(view.top(), 0);
    }

    #[test]
    fn test_resize_clamps_top() {
        let mut view = MemoryView::new(numbered(30), 10)
            .with_top(20)
            .with_cursor(CursorPosition::new(29, 0));
        view.resize(25);
        assert_eq!(view.top(), 5);
        view.resize(0);
        assert_eq!(view.height(), 1);
        assert_eq!(view.top(), 29);
    }

    #[test]
    fn test_shrinking_keeps_cursor_visible() {
        let mut view = MemoryView::new(numbered(100), 40).with_cursor(CursorPosition::new(35, 2));
        view.resize(10);
        assert_eq!(view.visible_range(), VisibleRange::new(26, 35));
        assert_eq!(view.cursor(), CursorPosition::new(35, 2));

        // growing again keeps the top line
        view.resize(20);
        assert_eq!(view.top(), 26);
    }

    #[tokio::test]
    async fn test_empty_host_ignores_scrolls() {
        let mut host = MemoryHost::empty();
        assert!(host.active_view().is_none());
        host.scroll_viewport(ScrollRequest::revealing(Direction::Down, ScrollUnit::Page))
            .await
            .unwrap();
    }
}
