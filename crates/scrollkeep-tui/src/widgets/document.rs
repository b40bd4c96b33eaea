use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};
use scrollkeep_core::TextView;

use crate::app::App;

pub struct DocumentWidget;

impl DocumentWidget {
    pub fn render(frame: &mut Frame, area: Rect, app: &App) {
        let theme = &app.theme;
        let base = Style::default().fg(theme.fg0).bg(theme.bg0);

        let Some(view) = app.view() else {
            frame.render_widget(Paragraph::new("No document open").style(base), area);
            return;
        };

        let range = view.visible_range();
        let cursor = view.cursor();
        let gutter_width = view.document().line_count().to_string().len();

        let lines: Vec<Line> = (range.start_line..=range.end_line)
            .map(|line| {
                let text = view.line_text(line).unwrap_or("");
                let mut spans = Vec::with_capacity(4);

                if app.config.ui.show_line_numbers {
                    let number_style = if line == cursor.line {
                        Style::default().fg(theme.accent).add_modifier(Modifier::BOLD)
                    } else {
                        Style::default().fg(theme.grey0)
                    };
                    spans.push(Span::styled(
                        format!("{:>width$} ", line + 1, width = gutter_width),
                        number_style,
                    ));
                }

                if line == cursor.line {
                    let (before, at, after) = split_at_cursor(text, cursor.character);
                    let row = Style::default().bg(theme.cursor_line);
                    spans.push(Span::styled(before, row));
                    spans.push(Span::styled(
                        at,
                        Style::default().fg(theme.bg0).bg(theme.cursor),
                    ));
                    spans.push(Span::styled(after, row));
                    Line::from(spans).style(row)
                } else {
                    spans.push(Span::raw(text.to_string()));
                    Line::from(spans)
                }
            })
            .collect();

        frame.render_widget(Paragraph::new(lines).style(base), area);
    }
}

/// Split a line around the cursor cell; past the end the cell is a blank
pub fn split_at_cursor(text: &str, character: usize) -> (String, String, String) {
    let mut chars = text.chars();
    let before: String = chars.by_ref().take(character).collect();
    let at = chars.next().map_or_else(|| " ".to_string(), |c| c.to_string());
    let after: String = chars.collect();
    (before, at, after)
}
