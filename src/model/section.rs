/// A single checkbox line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TodoItem {
    /// Display title (bold span content if present)
    pub title: String,
    /// `[x]` / `[X]` vs `[ ]`
    pub completed: bool,
    /// 1-based line number in the source text
    pub line: usize,
    /// Bracket tags like `[ssmd]`, in order of appearance
    pub tags: Vec<String>,
    /// Continuation lines following the checkbox
    pub details: Vec<String>,
}

impl TodoItem {
    pub fn new(title: impl Into<String>, completed: bool, line: usize) -> Self {
        TodoItem {
            title: title.into(),
            completed,
            line,
            tags: Vec::new(),
            details: Vec::new(),
        }
    }
}

/// A heading (levels 2-4) and everything nested under it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TodoSection {
    pub heading: String,
    /// Heading level, 2 through 4
    pub level: u8,
    /// Items directly under this heading, before any child heading
    pub items: Vec<TodoItem>,
    pub subsections: Vec<TodoSection>,
    /// True when every item at any depth is completed (vacuously true when empty)
    pub all_completed: bool,
}

impl TodoSection {
    /// Build a section, deriving `all_completed` from its items and subsections.
    pub fn new(
        heading: impl Into<String>,
        level: u8,
        items: Vec<TodoItem>,
        subsections: Vec<TodoSection>,
    ) -> Self {
        let all_completed =
            items.iter().all(|i| i.completed) && subsections.iter().all(|s| s.all_completed);
        TodoSection {
            heading: heading.into(),
            level,
            items,
            subsections,
            all_completed,
        }
    }

    /// `(completed, total)` item counts for this section and all descendants
    pub fn stats(&self) -> (usize, usize) {
        let mut done = self.items.iter().filter(|i| i.completed).count();
        let mut total = self.items.len();
        for sub in &self.subsections {
            let (d, t) = sub.stats();
            done += d;
            total += t;
        }
        (done, total)
    }

    /// Whether this section has anything to fold away
    pub fn has_children(&self) -> bool {
        !self.items.is_empty() || !self.subsections.is_empty()
    }
}

/// `(completed, total)` item counts across a whole tree
pub fn tree_stats(sections: &[TodoSection]) -> (usize, usize) {
    sections.iter().fold((0, 0), |(done, total), s| {
        let (d, t) = s.stats();
        (done + d, total + t)
    })
}
