use crate::storage::PreferenceStore;

#[cfg_attr(not(target_arch = "wasm32"), allow(dead_code))]
pub const DARK_MODE_CLASS: &str = "dark-mode";
pub const ICON_LIGHT_ACTIVE: &str = "fa-circle-half-stroke";
pub const ICON_DARK_ACTIVE: &str = "fa-sun";

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
        }
    }

    pub fn from_stored(value: Option<&str>) -> Self {
        match value {
            Some("dark") => Self::Dark,
            _ => Self::Light,
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::Light,
        }
    }

    pub fn load(store: &dyn PreferenceStore, key: &str) -> Self {
        Self::from_stored(store.get(key).as_deref())
    }

    pub fn persist(self, store: &dyn PreferenceStore, key: &str) {
        store.set(key, self.as_str());
    }

    pub fn appearance(self) -> ThemeAppearance {
        match self {
            Self::Light => ThemeAppearance {
                root_dark: false,
                icon_class: ICON_LIGHT_ACTIVE,
                stale_icon_class: ICON_DARK_ACTIVE,
                label: "Dark Mode",
                pressed: false,
            },
            Self::Dark => ThemeAppearance {
                root_dark: true,
                icon_class: ICON_DARK_ACTIVE,
                stale_icon_class: ICON_LIGHT_ACTIVE,
                label: "Light Mode",
                pressed: true,
            },
        }
    }
}

/// Everything the page shows for a theme. The label names the mode a click
/// would switch to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ThemeAppearance {
    pub root_dark: bool,
    pub icon_class: &'static str,
    pub stale_icon_class: &'static str,
    pub label: &'static str,
    pub pressed: bool,
}

impl ThemeAppearance {
    pub fn aria_pressed(&self) -> &'static str {
        if self.pressed {
            "true"
        } else {
            "false"
        }
    }
}

/// Theme state bound to its storage key.
#[derive(Debug)]
pub struct ThemeState {
    current: Theme,
    key: String,
}

impl ThemeState {
    pub fn restore(store: &dyn PreferenceStore, key: &str) -> Self {
        Self {
            current: Theme::load(store, key),
            key: key.to_string(),
        }
    }

    pub fn current(&self) -> Theme {
        self.current
    }

    pub fn toggle(&mut self, store: &dyn PreferenceStore) -> ThemeAppearance {
        self.current = self.current.toggled();
        self.current.persist(store, &self.key);
        log::debug!("theme switched to {}", self.current.as_str());
        self.current.appearance()
    }
}
