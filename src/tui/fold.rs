use std::collections::HashSet;

use crate::model::section::TodoSection;

/// Separator between headings in a section path key
pub const KEY_SEPARATOR: &str = "/";

/// Build the path key for a section under `prefix` (empty for roots).
pub fn section_key(prefix: &str, heading: &str) -> String {
    if prefix.is_empty() {
        heading.to_string()
    } else {
        format!("{}{}{}", prefix, KEY_SEPARATOR, heading)
    }
}

/// Collapsed sections, keyed by heading path (e.g. `"SSMD/Active"`).
///
/// Only collapsed keys are stored; a missing key means expanded. Keys are
/// heading paths rather than tree positions, so the store outlives re-parses.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FoldState {
    collapsed: HashSet<String>,
}

impl FoldState {
    /// Default fold for a freshly loaded tree: every all-completed section,
    /// at any depth, starts collapsed.
    pub fn from_sections(sections: &[TodoSection]) -> Self {
        let mut fold = FoldState::default();
        seed_completed(sections, "", &mut fold.collapsed);
        fold
    }

    pub fn is_collapsed(&self, key: &str) -> bool {
        self.collapsed.contains(key)
    }

    /// Collapse (`true`) or expand (`false`) the section at `key`.
    pub fn set_collapsed(&mut self, key: &str, collapse: bool) {
        if collapse {
            self.collapsed.insert(key.to_string());
        } else {
            self.collapsed.remove(key);
        }
    }

    /// Collapse every section that has something to hide.
    pub fn collapse_all(&mut self, sections: &[TodoSection]) {
        collect_foldable(sections, "", &mut self.collapsed);
    }

    pub fn expand_all(&mut self) {
        self.collapsed.clear();
    }

    pub fn len(&self) -> usize {
        self.collapsed.len()
    }

    pub fn is_empty(&self) -> bool {
        self.collapsed.is_empty()
    }
}

fn seed_completed(sections: &[TodoSection], prefix: &str, out: &mut HashSet<String>) {
    for s in sections {
        let key = section_key(prefix, &s.heading);
        if s.all_completed {
            out.insert(key.clone());
        }
        seed_completed(&s.subsections, &key, out);
    }
}

fn collect_foldable(sections: &[TodoSection], prefix: &str, out: &mut HashSet<String>) {
    for s in sections {
        let key = section_key(prefix, &s.heading);
        if s.has_children() {
            out.insert(key.clone());
        }
        collect_foldable(&s.subsections, &key, out);
    }
}
