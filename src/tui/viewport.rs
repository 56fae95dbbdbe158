use std::ops::Range;

/// Fixed rows outside the content area: header and status row
pub const CHROME_ROWS: u16 = 2;

/// Content rows available for a terminal of the given height (at least 1)
pub fn content_height(term_height: u16) -> usize {
    (term_height.saturating_sub(CHROME_ROWS) as usize).max(1)
}

/// Cursor and scroll window over the flattened row list
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    /// Index of the selected row
    pub cursor: usize,
    /// Index of the first visible row
    pub scroll_offset: usize,
    /// Number of visible content rows
    pub height: usize,
    /// Terminal width in cells
    pub width: u16,
}

impl Default for Viewport {
    fn default() -> Self {
        Viewport {
            cursor: 0,
            scroll_offset: 0,
            height: 1,
            width: 0,
        }
    }
}

impl Viewport {
    pub fn new(term_width: u16, term_height: u16) -> Self {
        let mut vp = Viewport::default();
        vp.resize(term_width, term_height);
        vp
    }

    /// Adopt a new terminal size and keep the cursor on screen.
    pub fn resize(&mut self, term_width: u16, term_height: u16) {
        self.width = term_width;
        self.height = content_height(term_height);
        self.ensure_visible();
    }

    /// Move the cursor by `delta` rows, clamped to the list. No-op when empty.
    pub fn move_by(&mut self, delta: isize, len: usize) {
        if len == 0 {
            return;
        }
        let target = self.cursor.saturating_add_signed(delta);
        self.cursor = target.min(len - 1);
        self.ensure_visible();
    }

    /// Put the cursor on `index`, clamped to the list.
    pub fn set_cursor(&mut self, index: usize, len: usize) {
        self.cursor = index;
        self.clamp(len);
        self.ensure_visible();
    }

    /// Pull the cursor back inside `[0, len - 1]` (0 for an empty list).
    pub fn clamp(&mut self, len: usize) {
        self.cursor = self.cursor.min(len.saturating_sub(1));
    }

    /// Adjust the scroll offset so that
    /// `scroll_offset <= cursor < scroll_offset + height`.
    pub fn ensure_visible(&mut self) {
        let height = self.height.max(1);
        if self.cursor < self.scroll_offset {
            self.scroll_offset = self.cursor;
        }
        if self.cursor >= self.scroll_offset + height {
            self.scroll_offset = self.cursor + 1 - height;
        }
    }

    /// Row indices currently on screen
    pub fn visible_range(&self, len: usize) -> Range<usize> {
        let start = self.scroll_offset.min(len);
        let end = (self.scroll_offset + self.height).min(len);
        start..end
    }
}
