//! Editor host boundary
//!
//! The scroll commands never talk to a concrete editor. They go through these
//! two traits: a [`TextView`] for reading viewport/cursor state and writing
//! the cursor, and an [`EditorHost`] that owns the active view and performs
//! the raw viewport scroll.

use crate::scroll::{CursorPosition, ScrollRequest, VisibleRange};
use crate::Result;

/// A document view shown by the host
pub trait TextView {
    /// Visible line spans in display order (may be empty)
    fn visible_ranges(&self) -> Vec<VisibleRange>;

    /// Active end of the primary selection
    fn cursor(&self) -> CursorPosition;

    /// Number of lines in the document (at least 1 for a real document)
    fn document_line_count(&self) -> usize;

    /// Text of a line without its line terminator
    fn line_text(&self, line: usize) -> Option<&str>;

    /// Move the cursor and collapse the selection to that single point
    fn set_cursor(&mut self, position: CursorPosition) -> Result<()>;
}

/// The editor environment the commands run in
#[async_trait::async_trait]
pub trait EditorHost: Send {
    /// The focused view, if any
    fn active_view(&self) -> Option<&dyn TextView>;

    /// Mutable access to the focused view, if any
    fn active_view_mut(&mut self) -> Option<&mut dyn TextView>;

    /// Scroll the active viewport.
    ///
    /// With `reveal_cursor == false` the cursor must stay where it is; with
    /// `true` the host may move it into view using its own policy.
    async fn scroll_viewport(&mut self, request: ScrollRequest) -> Result<()>;
}
