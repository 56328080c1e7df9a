use std::fs;
use std::str::FromStr;

use ratatui::style::Color;
use rust_embed::Embed;
use serde::{Deserialize, Serialize};

#[derive(Embed)]
#[folder = "assets/themes/"]
struct ThemeAssets;

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Theme {
    pub name: String,
    pub colors: ThemeColors,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ThemeColors {
    pub bg: String,
    pub fg: String,
    pub cell_bg: String,
    pub cell_fg: String,
    pub cell_border: String,
    pub cell_border_focused: String,
    pub cell_border_filled: String,
    pub label: String,
    pub hint: String,
    pub accent: String,
}

impl Theme {
    pub fn load(name: &str) -> Option<Self> {
        // Try user themes dir
        if let Some(config_dir) = dirs::config_dir() {
            let user_theme_path = config_dir
                .join("otpfield")
                .join("themes")
                .join(format!("{name}.toml"));
            if let Ok(content) = fs::read_to_string(&user_theme_path) {
                if let Ok(theme) = toml::from_str::<Theme>(&content) {
                    return Some(theme);
                }
            }
        }

        // Try bundled themes
        let filename = format!("{name}.toml");
        if let Some(file) = ThemeAssets::get(&filename) {
            if let Ok(content) = std::str::from_utf8(file.data.as_ref()) {
                if let Ok(theme) = toml::from_str::<Theme>(content) {
                    return Some(theme);
                }
            }
        }

        tracing::warn!(message = "theme.missing", name);
        None
    }

    pub fn available_themes() -> Vec<String> {
        ThemeAssets::iter()
            .filter_map(|f| f.strip_suffix(".toml").map(|n| n.to_string()))
            .collect()
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::load("default").unwrap_or_else(|| Self {
            name: "default".to_string(),
            colors: ThemeColors::default(),
        })
    }
}

impl Default for ThemeColors {
    fn default() -> Self {
        Self {
            bg: "#ffffff".to_string(),
            fg: "#000000".to_string(),
            cell_bg: "#ffffff".to_string(),
            cell_fg: "#000000".to_string(),
            cell_border: "#000000".to_string(),
            cell_border_focused: "#1e66f5".to_string(),
            cell_border_filled: "#000000".to_string(),
            label: "#000000".to_string(),
            hint: "#6c6f85".to_string(),
            accent: "#1e66f5".to_string(),
        }
    }
}

impl ThemeColors {
    /// `#rrggbb`, or any colour name ratatui understands ("reset", "blue", ...).
    pub fn parse_color(value: &str) -> Color {
        let hex = value.trim_start_matches('#');
        if value.starts_with('#') && hex.len() == 6 {
            if let (Ok(r), Ok(g), Ok(b)) = (
                u8::from_str_radix(&hex[0..2], 16),
                u8::from_str_radix(&hex[2..4], 16),
                u8::from_str_radix(&hex[4..6], 16),
            ) {
                return Color::Rgb(r, g, b);
            }
        }
        Color::from_str(value).unwrap_or(Color::Reset)
    }

    pub fn bg(&self) -> Color { Self::parse_color(&self.bg) }
    pub fn fg(&self) -> Color { Self::parse_color(&self.fg) }
    pub fn cell_bg(&self) -> Color { Self::parse_color(&self.cell_bg) }
    pub fn cell_fg(&self) -> Color { Self::parse_color(&self.cell_fg) }
    pub fn cell_border(&self) -> Color { Self::parse_color(&self.cell_border) }
    pub fn cell_border_focused(&self) -> Color { Self::parse_color(&self.cell_border_focused) }
    pub fn cell_border_filled(&self) -> Color { Self::parse_color(&self.cell_border_filled) }
    pub fn label(&self) -> Color { Self::parse_color(&self.label) }
    pub fn hint(&self) -> Color { Self::parse_color(&self.hint) }
    pub fn accent(&self) -> Color { Self::parse_color(&self.accent) }
}
