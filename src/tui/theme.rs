use std::collections::HashMap;

use ratatui::style::Color;

use crate::model::UiConfig;

/// Pastel section colors, rotated per top-level section
pub const PASTEL_PALETTE: [Color; 8] = [
    Color::Rgb(0x66, 0xB3, 0xEB), // blue
    Color::Rgb(0x59, 0xCC, 0x73), // green
    Color::Rgb(0xF2, 0x99, 0x59), // peach
    Color::Rgb(0x99, 0x73, 0xE6), // lavender
    Color::Rgb(0x4D, 0xD9, 0xB8), // mint
    Color::Rgb(0xEB, 0x66, 0x80), // rose
    Color::Rgb(0xE6, 0xD1, 0x4D), // yellow
    Color::Rgb(0xBF, 0x80, 0xE6), // orchid
];

/// Parsed color theme for the TUI
#[derive(Debug, Clone)]
pub struct Theme {
    pub background: Color,
    pub text: Color,
    pub dim: Color,
    pub badge: Color,
    pub header_fg: Color,
    pub header_bg: Color,
    pub footer_fg: Color,
    pub footer_bg: Color,
    pub selection_bg: Color,
    pub flash_bg: Color,
    pub error: Color,
    /// Section rotation colors (never empty)
    pub palette: Vec<Color>,
    /// Per-tag colors
    pub tag_colors: HashMap<String, Color>,
}

impl Default for Theme {
    fn default() -> Self {
        Theme {
            background: Color::Reset,
            text: Color::Rgb(0xDD, 0xDD, 0xDD),
            dim: Color::Rgb(0x77, 0x77, 0x77),
            badge: Color::Rgb(0x88, 0x88, 0x88),
            header_fg: Color::Rgb(0xFF, 0xFF, 0xFF),
            header_bg: Color::Rgb(0x33, 0x33, 0x33),
            footer_fg: Color::Rgb(0xAA, 0xAA, 0xAA),
            footer_bg: Color::Rgb(0x22, 0x22, 0x22),
            selection_bg: Color::Rgb(0x3A, 0x3A, 0x3A),
            flash_bg: Color::Rgb(0x2E, 0x4A, 0x62),
            error: Color::Rgb(0xFF, 0x55, 0x55),
            palette: PASTEL_PALETTE.to_vec(),
            tag_colors: HashMap::new(),
        }
    }
}

/// Parse a hex color string like "#FF4444" into an RGB Color
fn parse_hex_color(hex: &str) -> Option<Color> {
    let hex = hex.strip_prefix('#')?;
    if hex.len() != 6 {
        return None;
    }
    let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
    let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
    let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
    Some(Color::Rgb(r, g, b))
}

impl Theme {
    /// Create a theme from the UI config, falling back to defaults.
    /// Unparseable colors are skipped.
    pub fn from_config(ui: &UiConfig) -> Self {
        let mut theme = Theme::default();

        for (key, value) in &ui.colors {
            let Some(color) = parse_hex_color(value) else {
                tracing::warn!(key = %key, value = %value, "ignoring invalid color");
                continue;
            };
            match key.as_str() {
                "background" => theme.background = color,
                "text" => theme.text = color,
                "dim" => theme.dim = color,
                "badge" => theme.badge = color,
                "header_fg" => theme.header_fg = color,
                "header_bg" => theme.header_bg = color,
                "footer_fg" => theme.footer_fg = color,
                "footer_bg" => theme.footer_bg = color,
                "selection_bg" => theme.selection_bg = color,
                "flash_bg" => theme.flash_bg = color,
                "error" => theme.error = color,
                _ => tracing::warn!(key = %key, "unknown theme color"),
            }
        }

        let palette: Vec<Color> = ui.palette.iter().filter_map(|c| parse_hex_color(c)).collect();
        if !palette.is_empty() {
            theme.palette = palette;
        }

        for (tag, value) in &ui.tag_colors {
            if let Some(color) = parse_hex_color(value) {
                theme.tag_colors.insert(tag.clone(), color);
            }
        }

        theme
    }

    /// Color for a rotation index
    pub fn section_color(&self, index: usize) -> Color {
        self.palette[index % self.palette.len()]
    }

    /// Color for a tag, falling back to the section color
    pub fn tag_color(&self, tag: &str, section_color: Color) -> Color {
        self.tag_colors.get(tag).copied().unwrap_or(section_color)
    }
}
