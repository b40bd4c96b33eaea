use std::io;
use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use crossterm::{
    cursor::Show,
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen, SetTitle},
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    layout::{Constraint, Direction, Layout},
    Terminal,
};
use tracing::{info, warn};

use scrollkeep_core::{AppConfig, MemoryDocument};
use scrollkeep_tui::{
    app::App,
    event::{AppEvent, EventHandler},
    input::handle_key_event,
    keymap::Keymap,
    widgets::{DocumentWidget, StatusBarWidget},
};

/// Runs its closure when dropped, on every exit path
struct RestoreOnDrop<F: FnMut()>(F);

impl<F: FnMut()> Drop for RestoreOnDrop<F> {
    fn drop(&mut self) {
        (self.0)();
    }
}

fn restore_terminal() {
    if let Err(e) = disable_raw_mode() {
        warn!("Failed to disable raw mode: {}", e);
    }
    if let Err(e) = execute!(io::stdout(), LeaveAlternateScreen, Show) {
        warn!("Failed to leave alternate screen: {}", e);
    }
}

pub async fn run(config: Arc<AppConfig>, file: &Path) -> Result<()> {
    let text = std::fs::read_to_string(file)
        .with_context(|| format!("Failed to read {}", file.display()))?;
    let file_name = file
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| file.display().to_string());

    // Create keymap from config
    let keymap = Keymap::from_config(&config.keymap);

    // Setup terminal; restored when `_restore` drops
    enable_raw_mode()?;
    let _restore = RestoreOnDrop(restore_terminal);
    execute!(io::stdout(), EnterAlternateScreen, SetTitle(format!("scrollkeep - {file_name}")))?;

    let backend = CrosstermBackend::new(io::stdout());
    let mut terminal = Terminal::new(backend)?;

    // Status bar takes the last row
    let rows = terminal.size()?.height.saturating_sub(1);
    let mut app = App::new(config.clone(), file_name, MemoryDocument::from_text(&text), rows);
    info!(file = %file.display(), rows, "Opened document");

    let event_handler = EventHandler::new(config.ui.tick_rate_ms);
    event_loop(&mut terminal, &mut app, &event_handler, &keymap).await
}

async fn event_loop<B: Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
    event_handler: &EventHandler,
    keymap: &Keymap,
) -> Result<()> {
    loop {
        terminal.draw(|frame| {
            let layout = Layout::default()
                .direction(Direction::Vertical)
                .constraints([Constraint::Min(1), Constraint::Length(1)])
                .split(frame.area());

            // Keep the viewport height in step with the drawn area
            app.set_viewport_height(layout[0].height);

            DocumentWidget::render(frame, layout[0], app);
            StatusBarWidget::render(frame, layout[1], app, keymap);
        })?;

        if let Some(event) = event_handler.next()? {
            match event {
                AppEvent::Key(key) => {
                    let action = handle_key_event(key, app, keymap);
                    app.dispatch(action).await;
                }
                AppEvent::Resize(_, height) => {
                    app.set_viewport_height(height.saturating_sub(1));
                }
                AppEvent::Tick => {}
            }
        }

        if app.should_quit {
            return Ok(());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    fn open_backend() -> Result<()> {
        Err(anyhow::anyhow!("backend unavailable"))
    }

    fn setup_then_fail(restored: &Cell<usize>) -> Result<()> {
        let _restore = RestoreOnDrop(|| restored.set(restored.get() + 1));
        open_backend()?;
        Ok(())
    }

    #[test]
    fn test_restore_runs_on_early_error() {
        let restored = Cell::new(0);
        assert!(setup_then_fail(&restored).is_err());
        assert_eq!(restored.get(), 1);
    }

    #[test]
    fn test_restore_runs_once_on_normal_exit() {
        let restored = Cell::new(0);
        {
            let _restore = RestoreOnDrop(|| restored.set(restored.get() + 1));
        }
        assert_eq!(restored.get(), 1);
    }
}
