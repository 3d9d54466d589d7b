//! Loader configuration from environment variables.
//!
//! | Variable   | Default   |
//! |------------|-----------|
//! | `DATA_DIR` | `data`    |
//! | `CITY`     | `Palermo` |

use std::path::PathBuf;

use crate::normalize::{NormalizeContext, DEFAULT_CITY};

pub const DEFAULT_DATA_DIR: &str = "data";

#[derive(Debug, Clone, PartialEq)]
pub struct LoaderConfig {
    /// Directory holding one `{dataset}.json` array per domain.
    pub data_dir: PathBuf,
    /// City used to complete essentials addresses.
    pub city: String,
}

impl Default for LoaderConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from(DEFAULT_DATA_DIR),
            city: DEFAULT_CITY.to_string(),
        }
    }
}

impl LoaderConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup; blank values fall back to the defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let read = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let defaults = Self::default();
        Self {
            data_dir: read("DATA_DIR").map(PathBuf::from).unwrap_or(defaults.data_dir),
            city: read("CITY").map(|c| c.trim().to_string()).unwrap_or(defaults.city),
        }
    }

    pub fn with_data_dir(mut self, data_dir: impl Into<PathBuf>) -> Self {
        self.data_dir = data_dir.into();
        self
    }

    pub fn normalize_context(&self) -> NormalizeContext {
        NormalizeContext {
            city: self.city.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_when_unset_or_blank() {
        let config = LoaderConfig::from_lookup(|key| match key {
            "CITY" => Some("   ".to_string()),
            _ => None,
        });
        assert_eq!(config, LoaderConfig::default());
        assert_eq!(config.data_dir, PathBuf::from("data"));
        assert_eq!(config.city, "Palermo");
    }

    #[test]
    fn test_values_from_lookup() {
        let config = LoaderConfig::from_lookup(|key| match key {
            "DATA_DIR" => Some("/srv/relocation".to_string()),
            "CITY" => Some("Catania".to_string()),
            _ => None,
        });
        assert_eq!(config.data_dir, PathBuf::from("/srv/relocation"));
        assert_eq!(config.normalize_context().city, "Catania");
    }
}
