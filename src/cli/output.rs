use serde::Serialize;

use crate::model::{TodoItem, TodoSection, tree_stats};
use crate::tui::flatten::{RowKind, flatten};
use crate::tui::fold::FoldState;

// ---------------------------------------------------------------------------
// JSON output structs
// ---------------------------------------------------------------------------

#[derive(Serialize)]
pub struct DocumentJson {
    pub file: String,
    pub done: usize,
    pub total: usize,
    pub sections: Vec<SectionJson>,
}

#[derive(Serialize)]
pub struct SectionJson {
    pub heading: String,
    pub level: u8,
    pub done: usize,
    pub total: usize,
    pub all_completed: bool,
    pub items: Vec<ItemJson>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub subsections: Vec<SectionJson>,
}

#[derive(Serialize)]
pub struct ItemJson {
    pub title: String,
    pub completed: bool,
    pub line: usize,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub details: Vec<String>,
}

// ---------------------------------------------------------------------------
// Conversion functions
// ---------------------------------------------------------------------------

pub fn item_to_json(item: &TodoItem) -> ItemJson {
    ItemJson {
        title: item.title.clone(),
        completed: item.completed,
        line: item.line,
        tags: item.tags.clone(),
        details: item.details.clone(),
    }
}

pub fn section_to_json(section: &TodoSection) -> SectionJson {
    let (done, total) = section.stats();
    SectionJson {
        heading: section.heading.clone(),
        level: section.level,
        done,
        total,
        all_completed: section.all_completed,
        items: section.items.iter().map(item_to_json).collect(),
        subsections: section.subsections.iter().map(section_to_json).collect(),
    }
}

pub fn document_to_json(file: &str, sections: &[TodoSection]) -> DocumentJson {
    let (done, total) = tree_stats(sections);
    DocumentJson {
        file: file.to_string(),
        done,
        total,
        sections: sections.iter().map(section_to_json).collect(),
    }
}

// ---------------------------------------------------------------------------
// Text outline
// ---------------------------------------------------------------------------

/// Indented outline of the tree as the viewer first shows it: completed
/// sections collapsed, two spaces per level.
pub fn format_outline(sections: &[TodoSection]) -> String {
    let fold = FoldState::from_sections(sections);
    let mut out = String::new();
    for row in flatten(sections, &fold, 1) {
        out.push_str(&"  ".repeat(row.depth));
        match &row.kind {
            RowKind::Section {
                heading,
                done,
                total,
                collapsed,
                ..
            } => {
                let arrow = if *collapsed { "\u{25B6}" } else { "\u{25BC}" };
                out.push_str(&format!("{} {} [{}/{}]", arrow, heading, done, total));
            }
            RowKind::Item(item) => {
                let check = if item.completed { "[x]" } else { "[ ]" };
                out.push_str(&format!("{} {}", check, item.title));
                for tag in &item.tags {
                    out.push_str(&format!(" [{}]", tag));
                }
            }
        }
        out.push('\n');
    }
    out
}
