//! Application configuration.
//!
//! ```toml
//! storage_key = "employees"
//! persistence = "durable"   # or "ephemeral"
//! dates_required = true
//! page_size = 10
//! ```

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Storage key the collection lives under by default.
pub const DEFAULT_STORAGE_KEY: &str = "employees";

/// Page lengths offered by the list.
pub const PAGE_SIZES: [usize; 4] = [10, 25, 50, 100];

/// Where the employee collection lives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Persistence {
    /// JSON array under one storage key; survives reloads.
    #[default]
    Durable,
    /// In-memory for the session only.
    Ephemeral,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub storage_key: String,
    pub persistence: Persistence,
    /// When false, date of birth and start date may be left blank.
    pub dates_required: bool,
    pub page_size: usize,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            storage_key: DEFAULT_STORAGE_KEY.to_string(),
            persistence: Persistence::Durable,
            dates_required: true,
            page_size: PAGE_SIZES[0],
        }
    }
}

impl AppConfig {
    /// Parse TOML; missing keys take their defaults.
    pub fn from_toml(text: &str, origin: &str) -> Result<Self, ConfigError> {
        let config: AppConfig = toml::from_str(text).map_err(|source| ConfigError::Parse {
            path: origin.to_string(),
            source,
        })?;
        if !PAGE_SIZES.contains(&config.page_size) {
            return Err(ConfigError::PageSize(config.page_size));
        }
        Ok(config)
    }
}

pub fn load_config<P: AsRef<Path>>(path: P) -> Result<AppConfig, ConfigError> {
    let path_ref = path.as_ref();
    tracing::debug!("loading configuration from {:?}", path_ref);
    let origin = path_ref.display().to_string();
    let contents = fs::read_to_string(path_ref).map_err(|source| ConfigError::Read {
        path: origin.clone(),
        source,
    })?;
    AppConfig::from_toml(&contents, &origin)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert_eq!(config.storage_key, "employees");
        assert_eq!(config.persistence, Persistence::Durable);
        assert!(config.dates_required);
        assert_eq!(config.page_size, 10);
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config = AppConfig::from_toml("persistence = \"ephemeral\"", "inline").unwrap();
        assert_eq!(config.persistence, Persistence::Ephemeral);
        assert_eq!(config.storage_key, "employees");
    }

    #[test]
    fn test_rejects_odd_page_size() {
        assert!(matches!(
            AppConfig::from_toml("page_size = 7", "inline"),
            Err(ConfigError::PageSize(7))
        ));
    }

    #[test]
    fn test_rejects_unknown_persistence() {
        assert!(matches!(
            AppConfig::from_toml("persistence = \"cloud\"", "inline"),
            Err(ConfigError::Parse { .. })
        ));
    }

    #[test]
    fn test_load_config_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "storage_key = \"staff\"\ndates_required = false\npage_size = 25").unwrap();
        let config = load_config(file.path()).unwrap();
        assert_eq!(config.storage_key, "staff");
        assert!(!config.dates_required);
        assert_eq!(config.page_size, 25);
    }

    #[test]
    fn test_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        assert!(matches!(
            load_config(dir.path().join("nope.toml")),
            Err(ConfigError::Read { .. })
        ));
    }
}
