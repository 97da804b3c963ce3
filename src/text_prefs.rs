//! Reader-adjustable text appearance.
//!
//! The five values are kept as the raw strings of their form controls, so a
//! stored record can be written straight back into the inputs. The whole set is
//! written on every change and removed on reset.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::error::FeatureError;
use crate::storage::PreferenceStore;

pub const DEFAULT_FONT_SIZE: &str = "16";
pub const DEFAULT_LINE_SPACING: &str = "1.5";
pub const DEFAULT_FONT_FAMILY: &str = "system-ui";
pub const DEFAULT_TEXT_COLOR: &str = "#111827";
pub const DEFAULT_BG_COLOR: &str = "#FFFFFF";

#[cfg_attr(not(target_arch = "wasm32"), allow(dead_code))]
pub const PANEL_OPEN_CLASS: &str = "open";

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TextPreferences {
    #[serde(deserialize_with = "control_value")]
    pub font_size: String,
    #[serde(deserialize_with = "control_value")]
    pub line_spacing: String,
    #[serde(deserialize_with = "control_value")]
    pub font_family: String,
    #[serde(deserialize_with = "control_value")]
    pub text_color: String,
    #[serde(deserialize_with = "control_value")]
    pub bg_color: String,
}

impl Default for TextPreferences {
    fn default() -> Self {
        Self {
            font_size: DEFAULT_FONT_SIZE.to_string(),
            line_spacing: DEFAULT_LINE_SPACING.to_string(),
            font_family: DEFAULT_FONT_FAMILY.to_string(),
            text_color: DEFAULT_TEXT_COLOR.to_string(),
            bg_color: DEFAULT_BG_COLOR.to_string(),
        }
    }
}

/// Accepts numbers as well as strings; older records stored sizes as numbers.
fn control_value<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::String(value) => Ok(value),
        Value::Number(value) => Ok(value.to_string()),
        other => Err(serde::de::Error::custom(format!(
            "expected a control value, found {other}"
        ))),
    }
}

impl TextPreferences {
    pub fn decode(raw: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(raw)
    }

    pub fn encode(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Inline style properties for the presentation root, in application order.
    pub fn style_declarations(&self) -> [(&'static str, String); 5] {
        [
            ("font-size", format!("{}px", self.font_size)),
            ("line-height", self.line_spacing.clone()),
            ("font-family", self.font_family.clone()),
            ("color", self.text_color.clone()),
            ("background-color", self.bg_color.clone()),
        ]
    }
}

/// The form controls the preferences are edited through. Controls may
/// normalise what they are given, e.g. a select drops an unknown option.
pub trait TextControls {
    fn read(&self) -> TextPreferences;
    fn write(&self, prefs: &TextPreferences);
}

/// Persistence of the preference record under one storage key.
#[derive(Debug, Clone)]
pub struct TextSettingsStore {
    key: String,
}

impl TextSettingsStore {
    pub fn new(key: &str) -> Self {
        Self {
            key: key.to_string(),
        }
    }

    pub fn read(
        &self,
        store: &dyn PreferenceStore,
    ) -> Result<Option<TextPreferences>, FeatureError> {
        let Some(raw) = store.get(&self.key) else {
            return Ok(None);
        };

        TextPreferences::decode(&raw)
            .map(Some)
            .map_err(|source| FeatureError::MalformedRecord {
                key: self.key.clone(),
                source,
            })
    }

    /// Saved preferences, if any. Unreadable records count as none.
    pub fn restore(&self, store: &dyn PreferenceStore) -> Option<TextPreferences> {
        match self.read(store) {
            Ok(prefs) => prefs,
            Err(err) => {
                log::warn!("ignoring saved text settings: {err}");
                None
            }
        }
    }

    /// Loads saved preferences into `controls` and re-saves what the controls
    /// actually accepted, so the record, inputs and applied style agree.
    pub fn restore_into(
        &self,
        store: &dyn PreferenceStore,
        controls: &dyn TextControls,
    ) -> Option<TextPreferences> {
        let saved = self.restore(store)?;
        controls.write(&saved);
        let accepted = controls.read();
        self.save(store, &accepted);
        Some(accepted)
    }

    pub fn save(&self, store: &dyn PreferenceStore, prefs: &TextPreferences) {
        match prefs.encode() {
            Ok(raw) => store.set(&self.key, &raw),
            Err(err) => log::warn!("failed to encode text settings: {err}"),
        }
    }

    /// Forgets the saved record and returns the values to show instead.
    pub fn reset(&self, store: &dyn PreferenceStore) -> TextPreferences {
        store.remove(&self.key);
        log::debug!("text settings reset");
        TextPreferences::default()
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PanelTransition {
    /// Unhide now, add the open class on the next frame.
    Opened,
    /// Drop the open class now, hide after the transition delay.
    Closing,
}

/// Open/closed state of the settings panel.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TextPanel {
    open: bool,
}

impl TextPanel {
    pub fn is_open(self) -> bool {
        self.open
    }

    pub fn aria_expanded(self) -> &'static str {
        if self.open {
            "true"
        } else {
            "false"
        }
    }

    pub fn toggle(&mut self) -> PanelTransition {
        self.open = !self.open;
        if self.open {
            PanelTransition::Opened
        } else {
            PanelTransition::Closing
        }
    }

    pub fn outside_press(&mut self) -> Option<PanelTransition> {
        if !self.open {
            return None;
        }
        self.open = false;
        Some(PanelTransition::Closing)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;
    use std::cell::RefCell;

    const KEY: &str = "text-settings";

    fn edited() -> TextPreferences {
        TextPreferences {
            font_size: "20".to_string(),
            line_spacing: "1.8".to_string(),
            font_family: "Georgia, serif".to_string(),
            text_color: "#e5e7eb".to_string(),
            bg_color: "#0f172a".to_string(),
        }
    }

    #[test]
    fn record_uses_camel_case_string_fields() {
        let raw = TextPreferences::default().encode().expect("encodes");
        let value: Value = serde_json::from_str(&raw).expect("valid json");

        assert_eq!(value["fontSize"], "16");
        assert_eq!(value["lineSpacing"], "1.5");
        assert_eq!(value["fontFamily"], "system-ui");
        assert_eq!(value["textColor"], "#111827");
        assert_eq!(value["bgColor"], "#FFFFFF");
    }

    #[test]
    fn saving_writes_every_field() {
        let store = MemoryStore::new();
        let settings = TextSettingsStore::new(KEY);

        let mut prefs = TextPreferences::default();
        settings.save(&store, &prefs);
        prefs.font_size = "18".to_string();
        settings.save(&store, &prefs);

        assert_eq!(settings.read(&store).expect("readable"), Some(prefs));
    }

    #[test]
    fn numeric_values_are_accepted() {
        let prefs = TextPreferences::decode(
            r##"{"fontSize": 18, "lineSpacing": 1.25, "fontFamily": "serif", "textColor": "#000000", "bgColor": "#ffffff"}"##,
        )
        .expect("decodes");

        assert_eq!(prefs.font_size, "18");
        assert_eq!(prefs.line_spacing, "1.25");
    }

    #[test]
    fn missing_fields_fall_back_individually() {
        let prefs = TextPreferences::decode(r#"{"fontSize": "22"}"#).expect("decodes");
        assert_eq!(prefs.font_size, "22");
        assert_eq!(prefs.font_family, DEFAULT_FONT_FAMILY);
        assert_eq!(prefs.bg_color, DEFAULT_BG_COLOR);
    }

    #[test]
    fn malformed_records_restore_as_nothing() {
        let settings = TextSettingsStore::new(KEY);
        for raw in ["null", "not json", r#""16px""#, r#"{"fontSize": true}"#] {
            let store = MemoryStore::with_item(KEY, raw);
            assert!(matches!(
                settings.read(&store),
                Err(FeatureError::MalformedRecord { .. })
            ));
            assert_eq!(settings.restore(&store), None);
        }
    }

    /// Mimics browser controls: the select only takes offered families and
    /// color inputs fall back to black on anything that is not `#rrggbb`.
    struct FormControls {
        current: RefCell<TextPreferences>,
    }

    impl FormControls {
        const FAMILIES: [&'static str; 3] = ["system-ui", "Georgia, serif", "monospace"];

        fn new() -> Self {
            Self {
                current: RefCell::new(TextPreferences::default()),
            }
        }

        fn color(value: &str) -> String {
            let hex = value.strip_prefix('#').unwrap_or_default();
            if hex.len() == 6 && hex.chars().all(|c| c.is_ascii_hexdigit()) {
                value.to_ascii_lowercase()
            } else {
                "#000000".to_string()
            }
        }
    }

    impl TextControls for FormControls {
        fn read(&self) -> TextPreferences {
            self.current.borrow().clone()
        }

        fn write(&self, prefs: &TextPreferences) {
            let family = if Self::FAMILIES.contains(&prefs.font_family.as_str()) {
                prefs.font_family.clone()
            } else {
                String::new()
            };
            *self.current.borrow_mut() = TextPreferences {
                font_size: prefs.font_size.clone(),
                line_spacing: prefs.line_spacing.clone(),
                font_family: family,
                text_color: Self::color(&prefs.text_color),
                bg_color: Self::color(&prefs.bg_color),
            };
        }
    }

    #[test]
    fn restore_saves_what_the_controls_accepted() {
        let store = MemoryStore::with_item(
            KEY,
            r#"{"fontSize": 18, "fontFamily": "Comic Sans", "textColor": "red"}"#,
        );
        let settings = TextSettingsStore::new(KEY);
        let controls = FormControls::new();

        let applied = settings
            .restore_into(&store, &controls)
            .expect("a saved record");

        assert_eq!(applied, controls.read());
        assert_eq!(applied.font_size, "18");
        assert_eq!(applied.font_family, "");
        assert_eq!(applied.text_color, "#000000");
        assert_eq!(applied.bg_color, "#ffffff");
        assert_eq!(settings.read(&store).expect("readable"), Some(applied));
    }

    #[test]
    fn restore_leaves_controls_alone_without_a_record() {
        let store = MemoryStore::new();
        let controls = FormControls::new();
        controls.write(&edited());

        assert_eq!(TextSettingsStore::new(KEY).restore_into(&store, &controls), None);
        assert_eq!(controls.read(), edited());
        assert_eq!(store.get(KEY), None);
    }

    #[test]
    fn reset_returns_defaults_and_clears_the_record() {
        let store = MemoryStore::new();
        let settings = TextSettingsStore::new(KEY);
        settings.save(&store, &edited());

        let prefs = settings.reset(&store);

        assert_eq!(prefs, TextPreferences::default());
        assert_eq!(store.get(KEY), None);
        assert_eq!(settings.restore(&store), None);
    }

    #[test]
    fn style_declarations_cover_all_properties() {
        let styles = edited().style_declarations();
        assert_eq!(styles[0], ("font-size", "20px".to_string()));
        assert_eq!(styles[1], ("line-height", "1.8".to_string()));
        assert_eq!(styles[2], ("font-family", "Georgia, serif".to_string()));
        assert_eq!(styles[3], ("color", "#e5e7eb".to_string()));
        assert_eq!(styles[4], ("background-color", "#0f172a".to_string()));
    }

    #[test]
    fn panel_toggle_alternates_transitions() {
        let mut panel = TextPanel::default();
        assert_eq!(panel.aria_expanded(), "false");
        assert_eq!(panel.toggle(), PanelTransition::Opened);
        assert_eq!(panel.aria_expanded(), "true");
        assert_eq!(panel.toggle(), PanelTransition::Closing);
        assert!(!panel.is_open());
    }

    #[test]
    fn outside_press_only_closes_an_open_panel() {
        let mut panel = TextPanel::default();
        assert_eq!(panel.outside_press(), None);

        panel.toggle();
        assert_eq!(panel.outside_press(), Some(PanelTransition::Closing));
        assert!(!panel.is_open());
    }
}
