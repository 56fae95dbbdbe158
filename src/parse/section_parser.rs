use crate::model::section::{TodoItem, TodoSection};
use crate::parse::item_parser::{clean_detail, parse_checkbox};

/// Shallowest heading level that opens a section (`##`)
const MIN_LEVEL: usize = 2;
/// Deepest heading level that opens a section (`####`)
const MAX_LEVEL: usize = 4;

/// A section that is still open while scanning
struct SectionBuilder {
    level: u8,
    heading: String,
    items: Vec<TodoItem>,
    subsections: Vec<TodoSection>,
}

impl SectionBuilder {
    fn build(self) -> TodoSection {
        TodoSection::new(self.heading, self.level, self.items, self.subsections)
    }
}

/// Parse markdown into top-level sections.
///
/// Never fails: anything that isn't a level 2-4 heading or a checkbox is either
/// collected as detail text for the preceding item or ignored.
pub fn parse_sections(source: &str) -> Vec<TodoSection> {
    let mut roots: Vec<TodoSection> = Vec::new();
    let mut stack: Vec<SectionBuilder> = Vec::new();
    let mut pending_details: Vec<String> = Vec::new();

    for (idx, raw) in source.split('\n').enumerate() {
        let line = raw.trim();
        let line_number = idx + 1;

        if let Some((level, heading)) = parse_heading(line) {
            flush_details(&mut pending_details, &mut stack);
            while stack.last().is_some_and(|top| top.level >= level) {
                close_top(&mut stack, &mut roots);
            }
            stack.push(SectionBuilder {
                level,
                heading: heading.to_string(),
                items: Vec::new(),
                subsections: Vec::new(),
            });
        } else if let Some(item) = parse_checkbox(line, line_number) {
            flush_details(&mut pending_details, &mut stack);
            if let Some(top) = stack.last_mut() {
                top.items.push(item);
            }
        } else if !line.is_empty() && stack.last().is_some_and(|top| !top.items.is_empty()) {
            pending_details.push(clean_detail(line));
        }
    }

    flush_details(&mut pending_details, &mut stack);
    while !stack.is_empty() {
        close_top(&mut stack, &mut roots);
    }

    roots
}

/// Recognize `## Heading` through `#### Heading`.
/// Returns the level and the trimmed heading text.
fn parse_heading(line: &str) -> Option<(u8, &str)> {
    let level = line.bytes().take_while(|&b| b == b'#').count();
    if !(MIN_LEVEL..=MAX_LEVEL).contains(&level) {
        return None;
    }
    let heading = line[level..].trim();
    if heading.is_empty() {
        return None;
    }
    Some((level as u8, heading))
}

/// Attach accumulated detail lines to the last item of the deepest open section.
fn flush_details(details: &mut Vec<String>, stack: &mut [SectionBuilder]) {
    let taken = std::mem::take(details);
    if taken.is_empty() {
        return;
    }
    if let Some(item) = stack.last_mut().and_then(|top| top.items.last_mut()) {
        item.details = taken;
    }
}

/// Pop the deepest open section and move it into its parent (or the roots).
fn close_top(stack: &mut Vec<SectionBuilder>, roots: &mut Vec<TodoSection>) {
    let Some(builder) = stack.pop() else {
        return;
    };
    let section = builder.build();
    match stack.last_mut() {
        Some(parent) => parent.subsections.push(section),
        None => roots.push(section),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn count_items(s: &TodoSection) -> usize {
        s.items.len() + s.subsections.iter().map(count_items).sum::<usize>()
    }

    fn assert_strictly_nested(sections: &[TodoSection]) {
        for s in sections {
            for sub in &s.subsections {
                assert!(
                    sub.level > s.level,
                    "{} (level {}) nested under {} (level {})",
                    sub.heading,
                    sub.level,
                    s.heading,
                    s.level
                );
            }
            assert_strictly_nested(&s.subsections);
        }
    }

    #[test]
    fn simple_checkboxes() {
        let sections = parse_sections("## Tasks\n- [ ] Uncompleted task\n- [x] Completed task");
        assert_eq!(sections.len(), 1);
        let tasks = &sections[0];
        assert_eq!(tasks.heading, "Tasks");
        assert_eq!(tasks.level, 2);
        assert_eq!(tasks.items.len(), 2);
        assert!(!tasks.items[0].completed);
        assert_eq!(tasks.items[0].title, "Uncompleted task");
        assert!(tasks.items[1].completed);
        assert_eq!(tasks.items[1].title, "Completed task");
        assert!(!tasks.all_completed);
    }

    #[test]
    fn nested_headings() {
        let sections =
            parse_sections("## SSMD\n### Active\n- [ ] Task A\n### Pending\n- [ ] Task B\n- [ ] Task C");
        assert_eq!(sections.len(), 1);
        let subs = &sections[0].subsections;
        assert_eq!(subs.len(), 2);
        assert_eq!(subs[0].heading, "Active");
        assert_eq!(subs[0].items.len(), 1);
        assert_eq!(subs[1].heading, "Pending");
        assert_eq!(subs[1].items.len(), 2);
    }

    #[test]
    fn root_items_and_completed_subsection() {
        let sections = parse_sections("## Root\n- [ ] Root item\n### Sub A\n- [x] A1\n- [x] A2");
        let root = &sections[0];
        assert_eq!(root.items.len(), 1);
        assert_eq!(root.subsections.len(), 1);
        assert_eq!(root.subsections[0].heading, "Sub A");
        assert_eq!(root.subsections[0].items.len(), 2);
        assert!(root.subsections[0].all_completed);
        assert!(!root.all_completed);
    }

    #[test]
    fn bold_title_and_tags() {
        let sections = parse_sections("## Work\n- [ ] **Multi-exchange secmaster** [ssmd] - Feb 7");
        let item = &sections[0].items[0];
        assert_eq!(item.title, "Multi-exchange secmaster");
        assert_eq!(item.tags, vec!["ssmd".to_string()]);
    }

    #[test]
    fn all_completed_section() {
        let sections = parse_sections("## Done\n- [x] Task A\n- [x] Task B");
        assert!(sections[0].all_completed);
    }

    #[test]
    fn empty_section_is_all_completed() {
        let sections = parse_sections("## Nothing here\nJust prose.");
        assert_eq!(sections.len(), 1);
        assert!(sections[0].items.is_empty());
        assert!(sections[0].all_completed);
    }

    #[test]
    fn line_numbers_are_one_based() {
        let sections = parse_sections("## Section\n- [ ] First\n- [ ] Second");
        assert_eq!(sections[0].items[0].line, 2);
        assert_eq!(sections[0].items[1].line, 3);
    }

    #[test]
    fn non_checkbox_content_before_items_is_ignored() {
        let md = "## Summary\n| Col1 | Col2 |\n|------|------|\n| a    | b    |\n\nSome paragraph text.\n\n- [ ] Real task";
        let sections = parse_sections(md);
        assert_eq!(sections[0].items.len(), 1);
        assert_eq!(sections[0].items[0].title, "Real task");
        assert!(sections[0].items[0].details.is_empty());
    }

    #[test]
    fn deeply_nested() {
        let sections = parse_sections("## Domain\n### Category\n#### Subcategory\n- [ ] Deep task");
        let category = &sections[0].subsections[0];
        assert_eq!(category.heading, "Category");
        let sub = &category.subsections[0];
        assert_eq!(sub.heading, "Subcategory");
        assert_eq!(sub.level, 4);
        assert_eq!(sub.items[0].title, "Deep task");
    }

    #[test]
    fn details_accumulate_until_next_checkbox() {
        let md = "## S\n- [ ] Task\n  Detail one\n  Detail two\n- [ ] Next\n  - bullet detail";
        let sections = parse_sections(md);
        let items = &sections[0].items;
        assert_eq!(items[0].details, vec!["Detail one", "Detail two"]);
        assert_eq!(items[1].details, vec!["bullet detail"]);
    }

    #[test]
    fn details_survive_blank_lines() {
        let md = "## S\n- [ ] Task\n  one\n\n  two\n";
        let sections = parse_sections(md);
        assert_eq!(sections[0].items[0].details, vec!["one", "two"]);
    }

    #[test]
    fn details_flush_before_heading_closes_section() {
        let md = "## A\n- [ ] Task\n  belongs to task\n## B\n- [ ] Other";
        let sections = parse_sections(md);
        assert_eq!(sections.len(), 2);
        assert_eq!(sections[0].items[0].details, vec!["belongs to task"]);
        assert!(sections[1].items[0].details.is_empty());
    }

    #[test]
    fn details_attach_to_deepest_open_section() {
        let md = "## A\n- [ ] Parent item\n### B\n- [ ] Child item\n  child detail";
        let sections = parse_sections(md);
        assert!(sections[0].items[0].details.is_empty());
        assert_eq!(
            sections[0].subsections[0].items[0].details,
            vec!["child detail"]
        );
    }

    #[test]
    fn text_under_new_heading_without_items_is_dropped() {
        let md = "## A\n- [ ] Task\n### B\nintro text\n- [ ] B task";
        let sections = parse_sections(md);
        assert!(sections[0].items[0].details.is_empty());
        assert!(sections[0].subsections[0].items[0].details.is_empty());
    }

    #[test]
    fn non_structural_hash_runs() {
        let md = "# Title\n## Real\n- [ ] Task\n##### too deep\n##\n#   \n## Next";
        let sections = parse_sections(md);
        assert_eq!(sections.len(), 2);
        assert_eq!(sections[0].heading, "Real");
        assert!(sections[0].subsections.is_empty());
        assert_eq!(sections[0].items[0].details, vec!["##### too deep", "##", "#"]);
        assert_eq!(sections[1].heading, "Next");
    }

    #[test]
    fn checkboxes_before_any_heading_are_dropped() {
        let md = "- [ ] Orphan\n## S\n- [ ] Kept";
        let sections = parse_sections(md);
        assert_eq!(sections.len(), 1);
        assert_eq!(count_items(&sections[0]), 1);
        assert_eq!(sections[0].items[0].title, "Kept");
    }

    #[test]
    fn multiple_roots_are_independent() {
        let md = "## One\n- [x] a\n## Two\n### Two A\n- [ ] b\n## Three";
        let sections = parse_sections(md);
        let headings: Vec<&str> = sections.iter().map(|s| s.heading.as_str()).collect();
        assert_eq!(headings, vec!["One", "Two", "Three"]);
        assert!(sections[0].all_completed);
        assert!(!sections[1].all_completed);
        assert!(sections[2].all_completed);
    }

    #[test]
    fn shallower_heading_closes_deeper_ones() {
        let md = "## A\n### A1\n#### A1x\n- [ ] deep\n### A2\n- [ ] mid\n## B";
        let sections = parse_sections(md);
        assert_eq!(sections.len(), 2);
        let a = &sections[0];
        assert_eq!(a.subsections.len(), 2);
        assert_eq!(a.subsections[0].subsections[0].heading, "A1x");
        assert_eq!(a.subsections[1].heading, "A2");
        assert_eq!(count_items(a), 2);
    }

    #[test]
    fn skipped_level_still_nests() {
        let md = "## A\n#### Deep directly\n- [ ] x\n### Mid\n- [ ] y";
        let sections = parse_sections(md);
        let a = &sections[0];
        assert_eq!(a.subsections.len(), 2);
        assert_eq!(a.subsections[0].level, 4);
        assert_eq!(a.subsections[1].level, 3);
        assert_strictly_nested(&sections);
    }

    #[test]
    fn crlf_input() {
        let sections = parse_sections("## Tasks\r\n- [x] Done\r\n  detail\r\n");
        assert_eq!(sections[0].heading, "Tasks");
        assert_eq!(sections[0].items[0].title, "Done");
        assert_eq!(sections[0].items[0].details, vec!["detail"]);
    }

    #[test]
    fn arbitrary_text_never_panics_and_nests_strictly() {
        let samples = [
            "",
            "\n\n\n",
            "####",
            "## \n### \n- [ ]",
            "#### a\n### b\n## c\n### d\n#### e\n## f",
            "- [x] **\n- [ ] **x**\n## ** [t] - \n  - \n",
            "## ü\n- [ ] 日本語 [タグ] - x\n  詳細",
        ];
        for sample in samples {
            let sections = parse_sections(sample);
            assert_strictly_nested(&sections);
        }
    }
}
