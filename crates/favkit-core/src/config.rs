//! Favorites engine configuration.
//!
//! Pure configuration types with no infrastructure dependencies.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Default namespace prefix for favorite keys in the shared store.
pub const DEFAULT_KEY_PREFIX: &str = "fav:";

/// Default truthy marker. Matches what the mobile screens wrote
/// (`JSON.stringify(true)`).
pub const DEFAULT_MARKER: &str = "true";

/// Configuration validation errors.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// An empty prefix would make the favorites namespace the whole store.
    #[error("key prefix cannot be empty")]
    EmptyKeyPrefix,

    /// The marker value must be a non-empty string.
    #[error("favorite marker cannot be empty")]
    EmptyMarker,
}

/// How favorites are laid out in the key-value store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FavoritesConfig {
    /// Prefix prepended to every favorite id to form its store key.
    pub key_prefix: String,

    /// Value stored under a favorite key.
    pub marker: String,

    /// Move un-namespaced `<url> = <marker>` entries written by older
    /// installs into the namespace on activation.
    pub import_legacy_markers: bool,
}

impl Default for FavoritesConfig {
    fn default() -> Self {
        Self {
            key_prefix: DEFAULT_KEY_PREFIX.to_string(),
            marker: DEFAULT_MARKER.to_string(),
            import_legacy_markers: false,
        }
    }
}

impl FavoritesConfig {
    /// Create a configuration with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the key prefix. Defaults to `fav:`.
    #[must_use]
    pub fn with_key_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.key_prefix = prefix.into();
        self
    }

    /// Set the truthy marker. Defaults to `true`.
    #[must_use]
    pub fn with_marker(mut self, marker: impl Into<String>) -> Self {
        self.marker = marker.into();
        self
    }

    /// Enable or disable the legacy marker import.
    #[must_use]
    pub const fn with_legacy_import(mut self, enabled: bool) -> Self {
        self.import_legacy_markers = enabled;
        self
    }

    /// Check the configuration for values that would break namespacing.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.key_prefix.is_empty() {
            return Err(ConfigError::EmptyKeyPrefix);
        }
        if self.marker.is_empty() {
            return Err(ConfigError::EmptyMarker);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = FavoritesConfig::new();
        assert_eq!(config.key_prefix, "fav:");
        assert_eq!(config.marker, "true");
        assert!(!config.import_legacy_markers);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_builder_pattern() {
        let config = FavoritesConfig::new()
            .with_key_prefix("anime-fav/")
            .with_marker("1")
            .with_legacy_import(true);

        assert_eq!(config.key_prefix, "anime-fav/");
        assert_eq!(config.marker, "1");
        assert!(config.import_legacy_markers);
    }

    #[test]
    fn test_validate_rejects_empty_values() {
        assert_eq!(
            FavoritesConfig::new().with_key_prefix("").validate(),
            Err(ConfigError::EmptyKeyPrefix)
        );
        assert_eq!(
            FavoritesConfig::new().with_marker("").validate(),
            Err(ConfigError::EmptyMarker)
        );
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config: FavoritesConfig =
            serde_json::from_str(r#"{ "import_legacy_markers": true }"#).unwrap();
        assert_eq!(config.key_prefix, DEFAULT_KEY_PREFIX);
        assert!(config.import_legacy_markers);
    }
}
