use std::sync::LazyLock;

use regex::Regex;

use crate::model::section::TodoItem;

/// Bracket tags like `[ssmd]` or `[api/v2]`
static TAG_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[([a-zA-Z][a-zA-Z0-9/]*)\]").expect("tag pattern is valid"));

const OPEN_PREFIX: &str = "- [ ] ";
const DONE_PREFIXES: [&str; 2] = ["- [x] ", "- [X] "];

/// Parse a checkbox line: `- [ ] rest`, `- [x] rest` or `- [X] rest`.
/// Leading and trailing whitespace is ignored. Returns `None` for anything else.
pub fn parse_checkbox(line: &str, line_number: usize) -> Option<TodoItem> {
    let trimmed = line.trim();
    let (completed, rest) = if let Some(rest) = trimmed.strip_prefix(OPEN_PREFIX) {
        (false, rest)
    } else {
        let rest = DONE_PREFIXES
            .iter()
            .find_map(|prefix| trimmed.strip_prefix(prefix))?;
        (true, rest)
    };

    let mut item = TodoItem::new(extract_title(rest), completed, line_number);
    item.tags = extract_tags(rest);
    Some(item)
}

/// Display title for checkbox text.
///
/// The content of the first `**bold**` pair wins. Otherwise the text is cut at
/// the earliest `" ["` or `" - "`.
pub fn extract_title(text: &str) -> String {
    if let Some(start) = text.find("**") {
        let after = &text[start + 2..];
        if let Some(end) = after.find("**") {
            return after[..end].trim().to_string();
        }
    }

    let cut = [" [", " - "]
        .iter()
        .filter_map(|sep| text.find(sep))
        .min()
        .unwrap_or(text.len());
    text[..cut].trim().to_string()
}

/// Every `[tag]` group in the text, in order of appearance.
pub fn extract_tags(text: &str) -> Vec<String> {
    TAG_RE
        .captures_iter(text)
        .filter_map(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
        .collect()
}

/// Clean a continuation line for use as an item detail.
pub fn clean_detail(line: &str) -> String {
    let trimmed = line.trim();
    trimmed.strip_prefix("- ").unwrap_or(trimmed).trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn open_and_done_checkboxes() {
        let open = parse_checkbox("- [ ] Write docs", 3).unwrap();
        assert_eq!(open.title, "Write docs");
        assert!(!open.completed);
        assert_eq!(open.line, 3);

        assert!(parse_checkbox("- [x] Ship it", 1).unwrap().completed);
        assert!(parse_checkbox("- [X] Ship it", 1).unwrap().completed);
    }

    #[test]
    fn indented_checkbox_is_recognized() {
        let item = parse_checkbox("    - [ ] Nested looking", 7).unwrap();
        assert_eq!(item.title, "Nested looking");
    }

    #[test]
    fn non_checkbox_lines() {
        assert!(parse_checkbox("- plain bullet", 1).is_none());
        assert!(parse_checkbox("- [>] other state", 1).is_none());
        assert!(parse_checkbox("- [ ]", 1).is_none());
        assert!(parse_checkbox("- [x]no space", 1).is_none());
        assert!(parse_checkbox("* [ ] star bullet", 1).is_none());
        assert!(parse_checkbox("", 1).is_none());
    }

    #[test]
    fn bold_title_and_tags() {
        let item = parse_checkbox("- [ ] **Multi-exchange secmaster** [ssmd] - Feb 7", 1).unwrap();
        assert_eq!(item.title, "Multi-exchange secmaster");
        assert_eq!(item.tags, vec!["ssmd"]);
    }

    #[test]
    fn title_cut_at_earliest_separator() {
        assert_eq!(extract_title("Fix login [auth] - urgent"), "Fix login");
        assert_eq!(extract_title("Fix login - see [auth]"), "Fix login");
        assert_eq!(extract_title("No separators here "), "No separators here");
        assert_eq!(extract_title("hyphenated-word stays"), "hyphenated-word stays");
    }

    #[test]
    fn unmatched_bold_falls_back_to_cut() {
        assert_eq!(extract_title("**open bold [tag]"), "**open bold");
    }

    #[test]
    fn bold_pair_uses_first_match() {
        assert_eq!(extract_title("x ** spaced ** and **second**"), "spaced");
    }

    #[test]
    fn tags_found_in_untruncated_text() {
        assert_eq!(
            extract_tags("Deploy [infra] [api/v2] - after [review]"),
            vec!["infra", "api/v2", "review"]
        );
    }

    #[test]
    fn tags_must_start_with_letter() {
        assert!(extract_tags("Numbers [123] and [ ] and [-x]").is_empty());
        assert_eq!(extract_tags("[a1][b2]"), vec!["a1", "b2"]);
    }

    #[test]
    fn detail_cleaning() {
        assert_eq!(clean_detail("  Detail one  "), "Detail one");
        assert_eq!(clean_detail("  - bullet detail"), "bullet detail");
        assert_eq!(clean_detail("-no space"), "-no space");
    }
}
