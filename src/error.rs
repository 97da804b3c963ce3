use thiserror::Error;

/// Why a page feature could not be bound or a preference could not be read.
#[derive(Debug, Error)]
pub enum FeatureError {
    #[error("{feature}: missing element `{selector}`")]
    MissingElement {
        feature: &'static str,
        selector: String,
    },
    #[error("{feature}: {message}")]
    Dom {
        feature: &'static str,
        message: String,
    },
    #[cfg_attr(not(target_arch = "wasm32"), allow(dead_code))]
    #[error("storage unavailable: {0}")]
    Storage(String),
    #[error("malformed record under `{key}`: {source}")]
    MalformedRecord {
        key: String,
        #[source]
        source: serde_json::Error,
    },
}

impl FeatureError {
    pub fn missing(feature: &'static str, selector: &str) -> Self {
        Self::MissingElement {
            feature,
            selector: selector.to_string(),
        }
    }

    /// Whether the feature is simply not present on this page rather than broken.
    pub fn is_absent(&self) -> bool {
        matches!(self, Self::MissingElement { .. })
    }
}
