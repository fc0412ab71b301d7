//! Startup configuration passed in by the UI shell as JSON.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::settings::DEFAULT_MAP_SIZE;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CoreConfig {
    /// Directory holding bundled resources.
    pub resource_dir: PathBuf,
    /// Catalogue resource name, without the `.plist` extension.
    pub catalogue_name: String,
    /// LMDB environment directory for ratings and preferences.
    pub settings_path: PathBuf,
    pub map_size: usize,
}

impl Default for CoreConfig {
    fn default() -> Self {
        Self {
            resource_dir: PathBuf::from("resources"),
            catalogue_name: "vacation_spots".to_string(),
            settings_path: PathBuf::from("vacation_spots_settings"),
            map_size: DEFAULT_MAP_SIZE,
        }
    }
}

impl CoreConfig {
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_keys_take_defaults() {
        let config = CoreConfig::from_json(r#"{"settings_path": "/tmp/spots"}"#).unwrap();
        assert_eq!(config.settings_path, PathBuf::from("/tmp/spots"));
        assert_eq!(config.catalogue_name, "vacation_spots");
        assert_eq!(config.resource_dir, PathBuf::from("resources"));
        assert_eq!(config.map_size, DEFAULT_MAP_SIZE);
    }

    #[test]
    fn unknown_keys_are_rejected() {
        assert!(CoreConfig::from_json(r#"{"cache": true}"#).is_err());
    }
}
