use std::sync::Arc;

use scrollkeep_core::scroll::{ScrollOutcome, SkipReason};
use scrollkeep_core::{AppConfig, MemoryDocument, MemoryHost, MemoryView, ScrollCommand};

use crate::input::Action;
use crate::theme::Theme;

/// Application state
pub struct App {
    /// Configuration
    pub config: Arc<AppConfig>,
    /// Theme colors
    pub theme: Theme,
    /// Editor host holding the open document
    pub host: MemoryHost,
    /// Name shown in the status bar
    pub file_name: String,
    /// Pending key for multi-key sequences (e.g. 'g' for 'gg')
    pub pending_key: Option<char>,
    /// Status bar message
    pub status_message: Option<String>,
    /// Whether the app should quit
    pub should_quit: bool,
}

impl App {
    pub fn new(
        config: Arc<AppConfig>,
        file_name: impl Into<String>,
        document: MemoryDocument,
        viewport_height: u16,
    ) -> Self {
        let view = MemoryView::new(document, viewport_height as usize).with_config(&config.scroll);
        Self {
            config,
            theme: Theme::default(),
            host: MemoryHost::new(view),
            file_name: file_name.into(),
            pending_key: None,
            status_message: None,
            should_quit: false,
        }
    }

    pub fn view(&self) -> Option<&MemoryView> {
        self.host.view()
    }

    /// Track the number of document rows on screen
    pub fn set_viewport_height(&mut self, height: u16) {
        if let Some(view) = self.host.view_mut() {
            if view.height() != height as usize {
                view.resize(height as usize);
            }
        }
    }

    pub fn set_status(&mut self, message: impl Into<String>) {
        self.status_message = Some(message.into());
    }

    pub fn clear_pending_key(&mut self) {
        self.pending_key = None;
    }

    /// Apply an input action
    pub async fn dispatch(&mut self, action: Action) {
        if action != Action::PendingG {
            self.clear_pending_key();
        }

        match action {
            Action::Quit => self.should_quit = true,
            Action::MoveUp => self.move_cursor(-1, 0),
            Action::MoveDown => self.move_cursor(1, 0),
            Action::MoveLeft => self.move_cursor(0, -1),
            Action::MoveRight => self.move_cursor(0, 1),
            Action::JumpToTop => {
                if let Some(view) = self.host.view_mut() {
                    view.jump_to_top();
                }
            }
            Action::JumpToBottom => {
                if let Some(view) = self.host.view_mut() {
                    view.jump_to_bottom();
                }
            }
            Action::Scroll(command) => {
                let outcome = command.execute(&mut self.host, &self.config.scroll).await;
                self.set_status(describe_outcome(command, outcome));
            }
            Action::PendingG => self.pending_key = Some('g'),
            Action::None => {}
        }
    }

    fn move_cursor(&mut self, lines: isize, characters: isize) {
        if let Some(view) = self.host.view_mut() {
            view.move_cursor_by(lines, characters);
        }
    }
}

/// Status bar text for a finished scroll command
pub fn describe_outcome(command: ScrollCommand, outcome: Option<ScrollOutcome>) -> String {
    match outcome {
        Some(ScrollOutcome::Moved { from, to }) => format!("{command}: {from} → {to}"),
        Some(ScrollOutcome::Skipped(reason)) => {
            let why = match reason {
                SkipReason::NoActiveView => "no active view",
                SkipReason::NoVisibleRange | SkipReason::NoVisibleRangeAfterScroll => {
                    "nothing visible"
                }
            };
            format!("{command}: skipped, {why}")
        }
        None => command.to_string(),
    }
}
