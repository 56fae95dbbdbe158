use std::collections::HashMap;
use std::time::{Duration, Instant};

use crate::model::section::TodoSection;

use super::fold::{KEY_SEPARATOR, section_key};

/// How long a changed item stays highlighted
pub const FLASH_DURATION: Duration = Duration::from_secs(2);

/// Item identity across parses: parent section key + title
type ItemKey = (String, String);

/// Highlights items whose completion flipped, or that appeared, since the
/// previous parse. The first observed tree is the baseline and flashes nothing.
#[derive(Debug, Default)]
pub struct ChangeTracker {
    previous: Option<HashMap<ItemKey, bool>>,
    flashing: HashMap<ItemKey, Instant>,
}

impl ChangeTracker {
    /// Record a freshly parsed tree and start flashing anything that changed.
    pub fn observe(&mut self, sections: &[TodoSection], now: Instant) {
        let mut current = HashMap::new();
        collect_items(sections, "", &mut current);

        if let Some(previous) = &self.previous {
            for (key, completed) in &current {
                if previous.get(key) != Some(completed) {
                    self.flashing.insert(key.clone(), now + FLASH_DURATION);
                }
            }
        }
        self.flashing.retain(|_, until| *until > now);
        self.previous = Some(current);
    }

    pub fn is_item_flashing(&self, parent_key: &str, title: &str, now: Instant) -> bool {
        self.flashing
            .get(&(parent_key.to_string(), title.to_string()))
            .is_some_and(|until| *until > now)
    }

    /// Whether any item at or below the section `key` is flashing
    pub fn section_has_flash(&self, key: &str, now: Instant) -> bool {
        let nested = format!("{}{}", key, KEY_SEPARATOR);
        self.flashing.iter().any(|((parent, _), until)| {
            *until > now && (parent == key || parent.starts_with(&nested))
        })
    }
}

fn collect_items(sections: &[TodoSection], prefix: &str, out: &mut HashMap<ItemKey, bool>) {
    for s in sections {
        let key = section_key(prefix, &s.heading);
        for item in &s.items {
            out.insert((key.clone(), item.title.clone()), item.completed);
        }
        collect_items(&s.subsections, &key, out);
    }
}
