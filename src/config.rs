//! Page bindings and tunables.
//!
//! Defaults describe the stock portfolio markup. A page may override any subset
//! through a `<script type="application/json" id="portfolio-config">` block.

use serde::{Deserialize, Serialize};

#[cfg_attr(not(target_arch = "wasm32"), allow(dead_code))]
pub const CONFIG_ELEMENT_ID: &str = "portfolio-config";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PageConfig {
    pub selectors: Selectors,
    pub storage: StorageKeys,
    /// Pixels subtracted from a section's top before it counts as current.
    pub section_offset: f64,
    /// Total parallax travel across the hover region; layers move ±half of it.
    pub parallax_strength: f64,
    /// Delay before a closing text panel is hidden, so the CSS transition can run.
    pub panel_hide_delay_ms: u32,
}

impl Default for PageConfig {
    fn default() -> Self {
        Self {
            selectors: Selectors::default(),
            storage: StorageKeys::default(),
            section_offset: 120.0,
            parallax_strength: 20.0,
            panel_hide_delay_ms: 300,
        }
    }
}

impl PageConfig {
    /// Parses an override block; fields left out keep their defaults.
    pub fn from_json(raw: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(raw)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct StorageKeys {
    pub theme: String,
    pub text_settings: String,
}

impl Default for StorageKeys {
    fn default() -> Self {
        Self {
            theme: "theme".to_string(),
            text_settings: "text-settings".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Selectors {
    pub menu_toggle: String,
    pub nav_links: String,
    pub nav_items: String,
    pub theme_toggle: String,
    pub theme_icon: String,
    pub theme_label: String,
    pub text_toggle: String,
    pub text_panel: String,
    pub font_size: String,
    pub line_spacing: String,
    pub font_family: String,
    pub text_color: String,
    pub bg_color: String,
    pub text_reset: String,
    pub sections: String,
    pub hover_region: String,
    pub front_layer: String,
    pub back_layer: String,
}

impl Default for Selectors {
    fn default() -> Self {
        Self {
            menu_toggle: ".menu-toggle".to_string(),
            nav_links: "#nav-links".to_string(),
            nav_items: ".nav-links a".to_string(),
            theme_toggle: ".theme-toggle".to_string(),
            theme_icon: "i".to_string(),
            theme_label: ".theme-text".to_string(),
            text_toggle: ".text-toggle".to_string(),
            text_panel: "#text-controls".to_string(),
            font_size: "#font-size".to_string(),
            line_spacing: "#line-spacing".to_string(),
            font_family: "#font-family".to_string(),
            text_color: "#text-color".to_string(),
            bg_color: "#bg-color".to_string(),
            text_reset: "#reset-settings".to_string(),
            sections: "section".to_string(),
            hover_region: ".image-wrapper".to_string(),
            front_layer: ".box1".to_string(),
            back_layer: ".box2".to_string(),
        }
    }
}
