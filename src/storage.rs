use std::cell::RefCell;
use std::collections::HashMap;

/// Origin-scoped key/value persistence. Writes are best effort.
pub trait PreferenceStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: &str);
    fn remove(&self, key: &str);
}

/// In-memory store used off the browser.
#[derive(Debug, Default)]
pub struct MemoryStore {
    items: RefCell<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    #[cfg(test)]
    pub fn with_item(key: &str, value: &str) -> Self {
        let store = Self::new();
        store.set(key, value);
        store
    }
}

impl PreferenceStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.items.borrow().get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) {
        self.items
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
    }

    fn remove(&self, key: &str) {
        self.items.borrow_mut().remove(key);
    }
}

#[cfg(target_arch = "wasm32")]
pub use browser::LocalStorage;

#[cfg(target_arch = "wasm32")]
mod browser {
    use super::PreferenceStore;
    use crate::error::FeatureError;
    use web_sys::{window, Storage};

    /// `window.localStorage`.
    pub struct LocalStorage {
        storage: Storage,
    }

    impl LocalStorage {
        pub fn open() -> Result<Self, FeatureError> {
            let storage = window()
                .ok_or_else(|| FeatureError::Storage("no window".to_string()))?
                .local_storage()
                .map_err(|err| FeatureError::Storage(format!("{err:?}")))?
                .ok_or_else(|| FeatureError::Storage("localStorage disabled".to_string()))?;
            Ok(Self { storage })
        }
    }

    impl PreferenceStore for LocalStorage {
        fn get(&self, key: &str) -> Option<String> {
            self.storage.get_item(key).ok().flatten()
        }

        fn set(&self, key: &str, value: &str) {
            if let Err(err) = self.storage.set_item(key, value) {
                log::warn!("failed to persist `{key}`: {err:?}");
            }
        }

        fn remove(&self, key: &str) {
            if let Err(err) = self.storage.remove_item(key) {
                log::warn!("failed to clear `{key}`: {err:?}");
            }
        }
    }
}
