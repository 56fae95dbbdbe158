use std::path::PathBuf;

use ratatui::Terminal;
use ratatui::backend::TestBackend;
use ratatui::layout::Rect;

use crate::model::AppConfig;
use crate::parse::parse_sections;
use crate::tui::app::App;

pub const TERM_W: u16 = 60;
pub const TERM_H: u16 = 12;

/// Render into an in-memory buffer and return plain text (no styles).
pub fn render_to_string<F>(w: u16, h: u16, f: F) -> String
where
    F: FnOnce(&mut ratatui::Frame, Rect),
{
    let backend = TestBackend::new(w, h);
    let mut terminal = Terminal::new(backend).unwrap();
    terminal
        .draw(|frame| {
            let area = frame.area();
            f(frame, area);
        })
        .unwrap();

    let buf = terminal.backend().buffer().clone();
    let w = buf.area.width as usize;
    let lines: Vec<String> = buf
        .content
        .chunks(w)
        .map(|row| {
            let s: String = row.iter().map(|cell| cell.symbol()).collect();
            s.trim_end().to_string()
        })
        .collect();

    // Trim trailing blank lines
    let end = lines
        .iter()
        .rposition(|l| !l.is_empty())
        .map_or(0, |i| i + 1);
    lines[..end].join("\n")
}

/// Build an App for `/tmp/todo.md` from markdown, sized to the default test terminal.
pub fn app_from_md(md: &str) -> App {
    let mut app = App::new(
        PathBuf::from("/tmp/todo.md"),
        parse_sections(md),
        &AppConfig::default(),
    );
    app.resize(TERM_W, TERM_H);
    app
}

/// A small document with nesting, a completed section, tags and details.
pub const SAMPLE_MD: &str = "\
# Project Todo

## SSMD
- [ ] **Wire the exporter** [ssmd] [infra]
  - needs a staging bucket
### Active
- [x] Fix flaky test
- [ ] Review PR #42
## Shipped
- [x] Launch
";
