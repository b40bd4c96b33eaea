use ratatui::{
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};
use scrollkeep_core::{ScrollCommand, TextView};
use unicode_width::UnicodeWidthStr;

use crate::app::App;
use crate::input::Action;
use crate::keymap::Keymap;

pub struct StatusBarWidget;

impl StatusBarWidget {
    pub fn render(frame: &mut Frame, area: Rect, app: &App, keymap: &Keymap) {
        let theme = &app.theme;

        let position = match app.view() {
            Some(view) => {
                let range = view.visible_range();
                format!(
                    " {} | {} | {}-{}/{}",
                    app.file_name,
                    view.cursor(),
                    range.start_line + 1,
                    range.end_line + 1,
                    view.document_line_count()
                )
            }
            None => format!(" {}", app.file_name),
        };

        let message = app
            .status_message
            .as_deref()
            .map(|msg| format!(" | {msg}"))
            .unwrap_or_default();

        let help_hint = help_hint(keymap);
        let used = position.width() + message.width() + help_hint.width();
        let padding_len = (area.width as usize).saturating_sub(used);

        let line = Line::from(vec![
            Span::styled(position, Style::default().fg(theme.fg0).bg(theme.bg2)),
            Span::styled(message, Style::default().fg(theme.warning).bg(theme.bg2)),
            Span::styled(" ".repeat(padding_len), Style::default().bg(theme.bg2)),
            Span::styled(help_hint, Style::default().fg(theme.grey2).bg(theme.bg2)),
        ]);

        frame.render_widget(Paragraph::new(line), area);
    }
}

/// Key hints for the bound scroll and quit actions
pub fn help_hint(keymap: &Keymap) -> String {
    let pairs = [
        (ScrollCommand::ScrollDownHalfPage, ScrollCommand::ScrollUpHalfPage, "half"),
        (ScrollCommand::ScrollDownPage, ScrollCommand::ScrollUpPage, "page"),
    ];

    let mut hints: Vec<String> = pairs
        .into_iter()
        .filter_map(|(down, up, label)| {
            let keys: Vec<String> = [down, up]
                .into_iter()
                .filter_map(|command| keymap.describe(Action::Scroll(command)))
                .collect();
            (!keys.is_empty()).then(|| format!("{}:{label}", keys.join("/")))
        })
        .collect();
    if let Some(quit) = keymap.describe(Action::Quit) {
        hints.push(format!("{quit}:quit"));
    }

    format!(" {} ", hints.join(" "))
}
