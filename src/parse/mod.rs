pub mod item_parser;
pub mod section_parser;

pub use item_parser::{extract_tags, extract_title, parse_checkbox};
pub use section_parser::parse_sections;
