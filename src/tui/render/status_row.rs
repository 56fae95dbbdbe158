use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::tui::app::App;
use crate::util::unicode::{display_width, truncate_to_width};

const KEY_HINTS: &str = "j/k move  h/l fold  r refresh  q quit";

/// Render the status row (bottom of screen): progress, the cursor item's
/// first detail line, and key hints when they fit
pub fn render_status_row(frame: &mut Frame, app: &App, area: Rect) {
    let bg = app.theme.footer_bg;
    let width = area.width as usize;

    let (done, total) = app.stats();
    let stats = format!(" {}/{} done", done, total);
    let mut used = display_width(&stats);
    let mut spans = vec![Span::styled(
        stats,
        Style::default().fg(app.theme.footer_fg).bg(bg),
    )];

    let hint_width = display_width(KEY_HINTS);
    let show_hints = app.show_key_hints && used + hint_width < width;
    let reserved = if show_hints { hint_width + 1 } else { 0 };

    let detail = app
        .cursor_row()
        .and_then(|row| row.item())
        .and_then(|item| item.details.first());
    if let Some(detail) = detail {
        let budget = width.saturating_sub(used + 2 + reserved);
        if budget > 0 {
            let text = truncate_to_width(detail, budget);
            used += 2 + display_width(&text);
            spans.push(Span::styled("  ", Style::default().bg(bg)));
            spans.push(Span::styled(text, Style::default().fg(app.theme.dim).bg(bg)));
        }
    }

    if show_hints && used + hint_width <= width {
        spans.push(Span::styled(
            " ".repeat(width - used - hint_width),
            Style::default().bg(bg),
        ));
        spans.push(Span::styled(
            KEY_HINTS,
            Style::default().fg(app.theme.dim).bg(bg),
        ));
    }

    let paragraph = Paragraph::new(Line::from(spans)).style(Style::default().bg(bg));
    frame.render_widget(paragraph, area);
}
