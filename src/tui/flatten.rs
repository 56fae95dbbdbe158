use crate::model::section::{TodoItem, TodoSection};

use super::fold::{FoldState, section_key};

/// What a display row shows
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RowKind {
    /// A section heading, with counts taken from the tree it was flattened from
    Section {
        heading: String,
        level: u8,
        done: usize,
        total: usize,
        all_completed: bool,
        collapsed: bool,
    },
    /// A checkbox item
    Item(TodoItem),
}

/// One renderable line of the tree view.
///
/// Rows own their data, so the list can be swapped out independently of the
/// tree that produced it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayRow {
    pub kind: RowKind,
    pub depth: usize,
    /// Palette index, shared by a root section and everything under it
    pub color: usize,
    /// Section rows: the section's own path key. Item rows: the parent's key.
    pub key: String,
}

impl DisplayRow {
    pub fn is_section(&self) -> bool {
        matches!(self.kind, RowKind::Section { .. })
    }

    pub fn item(&self) -> Option<&TodoItem> {
        match &self.kind {
            RowKind::Item(item) => Some(item),
            RowKind::Section { .. } => None,
        }
    }
}

/// Flatten the tree into visible rows, depth-first pre-order.
///
/// Root `i` gets color `i % palette_len`. A collapsed section contributes its
/// heading row only.
pub fn flatten(sections: &[TodoSection], fold: &FoldState, palette_len: usize) -> Vec<DisplayRow> {
    let palette_len = palette_len.max(1);
    let mut rows = Vec::new();
    for (i, section) in sections.iter().enumerate() {
        flatten_section(section, 0, "", i % palette_len, fold, &mut rows);
    }
    rows
}

fn flatten_section(
    section: &TodoSection,
    depth: usize,
    prefix: &str,
    color: usize,
    fold: &FoldState,
    rows: &mut Vec<DisplayRow>,
) {
    let key = section_key(prefix, &section.heading);
    let collapsed = fold.is_collapsed(&key);
    let (done, total) = section.stats();

    rows.push(DisplayRow {
        kind: RowKind::Section {
            heading: section.heading.clone(),
            level: section.level,
            done,
            total,
            all_completed: section.all_completed,
            collapsed,
        },
        depth,
        color,
        key: key.clone(),
    });

    if collapsed {
        return;
    }

    for item in &section.items {
        rows.push(DisplayRow {
            kind: RowKind::Item(item.clone()),
            depth: depth + 1,
            color,
            key: key.clone(),
        });
    }

    for sub in &section.subsections {
        flatten_section(sub, depth + 1, &key, color, fold, rows);
    }
}
