use std::io;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use crossterm::event::{self, Event, KeyEventKind};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;

use crate::io::file_io::{read_and_parse, resolve_document};
use crate::io::watcher::{DocWatcher, WatchMessage};
use crate::model::{AppConfig, TodoSection, tree_stats};

use super::changes::ChangeTracker;
use super::flatten::{DisplayRow, flatten};
use super::fold::FoldState;
use super::input::{self, Action};
use super::render;
use super::theme::Theme;
use super::viewport::Viewport;

/// How long the event loop waits for input before checking the watcher
const TICK: Duration = Duration::from_millis(50);

/// Main application state
pub struct App {
    /// Absolute path of the document being viewed
    pub file_path: PathBuf,
    /// File name shown in the header
    pub file_name: String,
    /// Last successfully parsed tree
    pub sections: Vec<TodoSection>,
    /// Collapsed sections; survives re-parses
    pub fold: FoldState,
    /// Visible rows, derived from `sections` and `fold`
    pub rows: Vec<DisplayRow>,
    pub viewport: Viewport,
    /// Most recent read/watch error, shown in the header
    pub error: Option<String>,
    pub theme: Theme,
    pub show_key_hints: bool,
    pub changes: ChangeTracker,
    pub should_quit: bool,
}

impl App {
    pub fn new(file_path: PathBuf, sections: Vec<TodoSection>, config: &AppConfig) -> Self {
        let file_name = file_path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| file_path.display().to_string());
        let theme = Theme::from_config(&config.ui);
        let fold = FoldState::from_sections(&sections);
        let mut changes = ChangeTracker::default();
        changes.observe(&sections, Instant::now());
        let rows = flatten(&sections, &fold, theme.palette.len());

        App {
            file_path,
            file_name,
            sections,
            fold,
            rows,
            viewport: Viewport::default(),
            error: None,
            theme,
            show_key_hints: config.ui.show_key_hints,
            changes,
            should_quit: false,
        }
    }

    /// Rebuild the row list from the current tree and fold state.
    fn reflatten(&mut self) {
        self.rows = flatten(&self.sections, &self.fold, self.theme.palette.len());
    }

    /// Re-derive rows, then pull the cursor and scroll window back in bounds.
    fn refresh_rows(&mut self) {
        self.reflatten();
        self.viewport.clamp(self.rows.len());
        self.viewport.ensure_visible();
    }

    pub fn cursor_row(&self) -> Option<&DisplayRow> {
        self.rows.get(self.viewport.cursor)
    }

    /// Fold key for the cursor: a section row's own key, or an item's parent key.
    pub fn current_section_key(&self) -> Option<&str> {
        self.cursor_row().map(|row| row.key.as_str())
    }

    pub fn move_cursor(&mut self, delta: isize) {
        self.viewport.move_by(delta, self.rows.len());
    }

    pub fn jump_top(&mut self) {
        self.viewport.set_cursor(0, self.rows.len());
    }

    pub fn jump_bottom(&mut self) {
        self.viewport.set_cursor(self.rows.len().saturating_sub(1), self.rows.len());
    }

    /// Move by whole screens (`pages` may be negative).
    pub fn page(&mut self, pages: isize) {
        let height = self.viewport.height as isize;
        self.move_cursor(pages.saturating_mul(height));
    }

    /// Collapse the section under the cursor (the parent section for items).
    pub fn collapse_at_cursor(&mut self) {
        let Some(key) = self.current_section_key().map(str::to_string) else {
            return;
        };
        tracing::debug!(key = %key, "collapse");
        self.fold.set_collapsed(&key, true);
        self.refresh_rows();
    }

    /// Expand the section under the cursor. Item rows are left alone.
    pub fn expand_at_cursor(&mut self) {
        let key = match self.cursor_row() {
            Some(row) if row.is_section() => row.key.clone(),
            _ => return,
        };
        tracing::debug!(key = %key, "expand");
        self.fold.set_collapsed(&key, false);
        self.reflatten();
        self.viewport.ensure_visible();
    }

    pub fn collapse_all(&mut self) {
        self.fold.collapse_all(&self.sections);
        self.refresh_rows();
    }

    pub fn expand_all(&mut self) {
        self.fold.expand_all();
        self.refresh_rows();
    }

    /// Adopt a freshly parsed tree, keeping the user's fold state.
    pub fn on_external_update(&mut self, sections: Vec<TodoSection>) {
        self.changes.observe(&sections, Instant::now());
        self.sections = sections;
        self.error = None;
        self.refresh_rows();
    }

    /// Record a read or watch failure. The last good tree stays on screen.
    pub fn on_external_error(&mut self, error: impl std::fmt::Display) {
        self.error = Some(error.to_string());
    }

    /// Re-read the document inline.
    pub fn refresh(&mut self) {
        match read_and_parse(&self.file_path) {
            Ok(sections) => {
                tracing::info!(path = %self.file_path.display(), "manual refresh");
                self.on_external_update(sections);
            }
            Err(e) => {
                tracing::warn!(error = %e, "manual refresh failed");
                self.on_external_error(e);
            }
        }
    }

    /// Apply a watcher message. Returns whether the watch should be re-armed.
    pub fn handle_watch_message(&mut self, msg: WatchMessage) -> bool {
        match msg {
            WatchMessage::Updated(sections) => {
                self.on_external_update(sections);
                true
            }
            WatchMessage::ReadFailed(e) => {
                self.on_external_error(e);
                true
            }
            WatchMessage::SubscriptionFailed(e) => {
                self.on_external_error(e);
                false
            }
        }
    }

    pub fn resize(&mut self, width: u16, height: u16) {
        self.viewport.resize(width, height);
    }

    /// `(completed, total)` over the whole document
    pub fn stats(&self) -> (usize, usize) {
        tree_stats(&self.sections)
    }

    /// Apply one input action. Refresh re-arming is up to the caller.
    pub fn apply(&mut self, action: Action) {
        match action {
            Action::Quit => self.should_quit = true,
            Action::Up => self.move_cursor(-1),
            Action::Down => self.move_cursor(1),
            Action::PageUp => self.page(-1),
            Action::PageDown => self.page(1),
            Action::Top => self.jump_top(),
            Action::Bottom => self.jump_bottom(),
            Action::Collapse => self.collapse_at_cursor(),
            Action::Expand => self.expand_at_cursor(),
            Action::CollapseAll => self.collapse_all(),
            Action::ExpandAll => self.expand_all(),
            Action::Refresh => self.refresh(),
        }
    }
}

/// Run the TUI on `file` until the user quits.
///
/// A missing or unreadable file is reported before the terminal is touched.
pub fn run(file: &Path, config: &AppConfig) -> Result<(), Box<dyn std::error::Error>> {
    let path = resolve_document(file)?;
    let sections = read_and_parse(&path)?;
    tracing::info!(path = %path.display(), sections = sections.len(), "loaded");

    let mut app = App::new(path, sections, config);
    let mut watcher = DocWatcher::new(
        &app.file_path,
        Duration::from_millis(config.watch.debounce_ms),
    );

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;

    // Install panic hook to restore terminal on panic
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        original_hook(panic_info);
    }));

    let size = terminal.size()?;
    app.resize(size.width, size.height);
    watcher.arm();

    let result = run_event_loop(&mut terminal, &mut app, &mut watcher);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

fn run_event_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    watcher: &mut DocWatcher,
) -> Result<(), Box<dyn std::error::Error>> {
    loop {
        terminal.draw(|frame| render::render(frame, app))?;

        if event::poll(TICK)? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => {
                    if let Some(action) = input::action_for_key(key) {
                        app.apply(action);
                        if action == Action::Refresh {
                            watcher.arm();
                        }
                    }
                }
                Event::Resize(width, height) => app.resize(width, height),
                _ => {}
            }
        }

        if let Some(msg) = watcher.poll()
            && app.handle_watch_message(msg)
        {
            watcher.arm();
        }

        if app.should_quit {
            break;
        }
    }
    Ok(())
}
