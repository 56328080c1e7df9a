use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Result;
use serde::Deserialize;

use crate::otp::{FieldConfig, FieldStyle, PasteMode};

#[derive(Clone, Debug, Deserialize)]
pub struct Config {
    #[serde(default = "default_cell_count")]
    pub cell_count: usize,
    #[serde(default = "default_masking_enabled")]
    pub masking_enabled: bool,
    #[serde(default = "default_mask_char")]
    pub mask_char: char,
    #[serde(default)]
    pub paste_mode: PasteMode,
    #[serde(default = "default_spacing")]
    pub spacing: u16,
    #[serde(default = "default_corner_radius")]
    pub corner_radius: u16,
    #[serde(default = "default_border_width")]
    pub border_width: u16,
    #[serde(default = "default_theme")]
    pub theme: String,
    #[serde(default)]
    pub shadow: Option<ShadowConfig>,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct ShadowConfig {
    #[serde(default = "default_shadow_offset")]
    pub offset_x: i16,
    #[serde(default = "default_shadow_offset")]
    pub offset_y: i16,
    #[serde(default = "default_shadow_color")]
    pub color: String,
    #[serde(default)]
    pub radius: u16,
    #[serde(default = "default_shadow_opacity")]
    pub opacity: f32,
}

fn default_cell_count() -> usize {
    4
}
fn default_masking_enabled() -> bool {
    false
}
fn default_mask_char() -> char {
    '*'
}
fn default_spacing() -> u16 {
    2
}
fn default_corner_radius() -> u16 {
    0
}
fn default_border_width() -> u16 {
    1
}
fn default_theme() -> String {
    "default".to_string()
}
fn default_shadow_offset() -> i16 {
    1
}
fn default_shadow_color() -> String {
    "#000000".to_string()
}
fn default_shadow_opacity() -> f32 {
    0.5
}

impl Default for Config {
    fn default() -> Self {
        Self {
            cell_count: default_cell_count(),
            masking_enabled: default_masking_enabled(),
            mask_char: default_mask_char(),
            paste_mode: PasteMode::default(),
            spacing: default_spacing(),
            corner_radius: default_corner_radius(),
            border_width: default_border_width(),
            theme: default_theme(),
            shadow: None,
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path())
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if path.exists() {
            let content = fs::read_to_string(path)?;
            let config: Config = toml::from_str(&content)?;
            Ok(config)
        } else {
            Ok(Config::default())
        }
    }

    pub fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("otpfield")
            .join("config.toml")
    }

    pub fn field_config(&self) -> FieldConfig {
        FieldConfig {
            cell_count: self.cell_count,
            masking_enabled: self.masking_enabled,
            mask_char: self.mask_char,
            paste_mode: self.paste_mode,
            style: FieldStyle {
                spacing: self.spacing,
                corner_radius: self.corner_radius,
                border_width: self.border_width,
            },
        }
    }
}
