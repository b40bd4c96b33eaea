//! Scroll operations driving an editor host
//!
//! A preserving scroll reads the viewport and cursor, lets the host scroll the
//! viewport without touching the cursor, then puts the cursor back at the same
//! fractional height of the new viewport.

use crate::host::EditorHost;
use crate::Result;

use super::position::{clamp_character, clamp_line, project_line, relative_position};
use super::types::{CursorPosition, Direction, ScrollRequest, ScrollUnit, VisibleRange};

/// Why a preserving scroll did nothing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// The host has no focused view
    NoActiveView,
    /// The view reported no visible range before scrolling
    NoVisibleRange,
    /// The view reported no visible range once the scroll finished
    NoVisibleRangeAfterScroll,
}

/// Result of a preserving scroll
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScrollOutcome {
    Skipped(SkipReason),
    Moved {
        from: CursorPosition,
        to: CursorPosition,
    },
}

/// Viewport state captured before the host is awaited
#[derive(Debug, Clone, Copy)]
struct Snapshot {
    range: VisibleRange,
    cursor: CursorPosition,
}

/// Scrolls a host's active view while keeping the cursor's relative height
pub struct CursorPreservingScroller<'a, H: EditorHost + ?Sized> {
    host: &'a mut H,
}

impl<'a, H: EditorHost + ?Sized> CursorPreservingScroller<'a, H> {
    pub fn new(host: &'a mut H) -> Self {
        Self { host }
    }

    /// Scroll one `unit` in `direction`, keeping the cursor's relative position.
    ///
    /// Missing preconditions are reported as [`ScrollOutcome::Skipped`]; only
    /// failures of the host primitives are returned as errors.
    pub async fn scroll(&mut self, direction: Direction, unit: ScrollUnit) -> Result<ScrollOutcome> {
        let before = match self.snapshot() {
            Ok(snapshot) => snapshot,
            Err(reason) => return Ok(ScrollOutcome::Skipped(reason)),
        };
        let relative = relative_position(before.range, before.cursor.line);

        self.host
            .scroll_viewport(ScrollRequest::viewport_only(direction, unit))
            .await?;

        let Some(view) = self.host.active_view_mut() else {
            return Ok(ScrollOutcome::Skipped(SkipReason::NoVisibleRangeAfterScroll));
        };
        let Some(range) = view.visible_ranges().first().copied() else {
            return Ok(ScrollOutcome::Skipped(SkipReason::NoVisibleRangeAfterScroll));
        };

        let line = clamp_line(project_line(range, relative), view.document_line_count());
        let character = clamp_character(before.cursor.character, view.line_text(line).unwrap_or(""));
        let target = CursorPosition::new(line, character);
        view.set_cursor(target)?;

        Ok(ScrollOutcome::Moved {
            from: before.cursor,
            to: target,
        })
    }

    /// Scroll one `unit` in `direction` and let the host reveal the cursor.
    ///
    /// The cursor is neither read nor written here.
    pub async fn raw_scroll(&mut self, direction: Direction, unit: ScrollUnit) -> Result<()> {
        self.host
            .scroll_viewport(ScrollRequest::revealing(direction, unit))
            .await
    }

    fn snapshot(&self) -> std::result::Result<Snapshot, SkipReason> {
        let view = self.host.active_view().ok_or(SkipReason::NoActiveView)?;
        let range = view
            .visible_ranges()
            .first()
            .copied()
            .ok_or(SkipReason::NoVisibleRange)?;
        Ok(Snapshot {
            range,
            cursor: view.cursor(),
        })
    }
}
