use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::tui::app::App;

/// Render the header row: file name, plus the last error if any
pub fn render_header(frame: &mut Frame, app: &App, area: Rect) {
    let bg = app.theme.header_bg;
    let mut spans = vec![Span::styled(
        format!(" {}", app.file_name),
        Style::default()
            .fg(app.theme.header_fg)
            .bg(bg)
            .add_modifier(Modifier::BOLD),
    )];

    if let Some(ref err) = app.error {
        spans.push(Span::styled(
            format!("  [error: {}]", err),
            Style::default().fg(app.theme.error).bg(bg),
        ));
    }

    let paragraph = Paragraph::new(Line::from(spans)).style(Style::default().bg(bg));
    frame.render_widget(paragraph, area);
}
