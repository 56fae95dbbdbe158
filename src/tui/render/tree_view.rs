use std::time::Instant;

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::model::TodoItem;
use crate::tui::app::App;
use crate::tui::flatten::{DisplayRow, RowKind};
use crate::util::unicode::display_width;

const EXPANDED: &str = "\u{25BC}"; // ▼
const COLLAPSED: &str = "\u{25B6}"; // ▶

/// Render the visible slice of the flattened tree
pub fn render_tree_view(frame: &mut Frame, app: &App, area: Rect) {
    if app.rows.is_empty() {
        let empty = Paragraph::new(" No sections")
            .style(Style::default().fg(app.theme.dim).bg(app.theme.background));
        frame.render_widget(empty, area);
        return;
    }

    let now = Instant::now();
    let width = area.width as usize;
    let cursor = app.viewport.cursor;
    let range = app.viewport.visible_range(app.rows.len());
    let lines: Vec<Line> = app.rows[range.clone()]
        .iter()
        .zip(range)
        .take(area.height as usize)
        .map(|(row, idx)| {
            let is_cursor = idx == cursor;
            let flashing = is_flashing(app, row, now);
            let bg = if is_cursor {
                app.theme.selection_bg
            } else if flashing {
                app.theme.flash_bg
            } else {
                app.theme.background
            };
            build_row_line(app, row, is_cursor, bg, width)
        })
        .collect();

    let paragraph = Paragraph::new(lines).style(Style::default().bg(app.theme.background));
    frame.render_widget(paragraph, area);
}

/// Items flash on their own; a section flashes only while it hides a flashing item.
fn is_flashing(app: &App, row: &DisplayRow, now: Instant) -> bool {
    match &row.kind {
        RowKind::Item(item) => app.changes.is_item_flashing(&row.key, &item.title, now),
        RowKind::Section { collapsed, .. } => {
            *collapsed && app.changes.section_has_flash(&row.key, now)
        }
    }
}

fn build_row_line<'a>(
    app: &App,
    row: &'a DisplayRow,
    is_cursor: bool,
    bg: Color,
    width: usize,
) -> Line<'a> {
    let color = app.theme.section_color(row.color);
    let marker = if is_cursor { "> " } else { "  " };
    let mut spans = vec![
        Span::styled(marker, Style::default().fg(app.theme.text).bg(bg)),
        Span::styled("  ".repeat(row.depth), Style::default().bg(bg)),
    ];

    match &row.kind {
        RowKind::Section {
            heading,
            done,
            total,
            collapsed,
            ..
        } => {
            let arrow = if *collapsed { COLLAPSED } else { EXPANDED };
            let mut heading_style = Style::default().fg(color).bg(bg);
            if row.depth == 0 {
                heading_style = heading_style.add_modifier(Modifier::BOLD);
            }
            spans.push(Span::styled(
                format!("{} ", arrow),
                Style::default().fg(color).bg(bg),
            ));
            spans.push(Span::styled(heading.as_str(), heading_style));
            spans.push(Span::styled(
                format!(" [{}/{}]", done, total),
                Style::default().fg(app.theme.badge).bg(bg),
            ));
        }
        RowKind::Item(item) => push_item_spans(&mut spans, app, item, color, bg),
    }

    // Fill the rest of the row so selection/flash backgrounds span the width
    let used: usize = spans.iter().map(|s| display_width(&s.content)).sum();
    if used < width {
        spans.push(Span::styled(" ".repeat(width - used), Style::default().bg(bg)));
    }
    Line::from(spans)
}

fn push_item_spans<'a>(
    spans: &mut Vec<Span<'a>>,
    app: &App,
    item: &'a TodoItem,
    section_color: Color,
    bg: Color,
) {
    let (checkbox, title_style) = if item.completed {
        (
            "[x] ",
            Style::default()
                .fg(app.theme.dim)
                .bg(bg)
                .add_modifier(Modifier::CROSSED_OUT),
        )
    } else {
        ("[ ] ", Style::default().fg(app.theme.text).bg(bg))
    };
    let checkbox_fg = if item.completed {
        app.theme.dim
    } else {
        section_color
    };
    spans.push(Span::styled(checkbox, Style::default().fg(checkbox_fg).bg(bg)));
    spans.push(Span::styled(item.title.as_str(), title_style));

    for tag in &item.tags {
        let fg = app.theme.tag_color(tag, section_color);
        spans.push(Span::styled(
            format!(" [{}]", tag),
            Style::default().fg(fg).bg(bg),
        ));
    }
}
