use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Largest list `range` will build: 16,777,215 elements.
pub const DEFAULT_MAX_LIST_SIZE: usize = 0xFF_FFFF;

/// Language level reported under the `miniscript` key of `version`.
pub const DEFAULT_ENGINE_VERSION: &str = "1.5";

/// Identity of the embedding application, reported by `version`.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct HostInfo {
    /// Host application version.
    pub version: f64,
    pub name: String,
    /// Free-form host description, usually a URL.
    pub info: String,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RuntimeConfig {
    pub host: HostInfo,
    pub max_list_size: usize,
    /// Seed for the shared random generator; entropy-seeded when absent.
    pub seed: Option<u64>,
    pub engine_version: String,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            host: HostInfo::default(),
            max_list_size: DEFAULT_MAX_LIST_SIZE,
            seed: None,
            engine_version: DEFAULT_ENGINE_VERSION.to_string(),
        }
    }
}

impl RuntimeConfig {
    pub fn from_json_str(text: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(text)?)
    }

    pub fn with_host(mut self, host: HostInfo) -> Self {
        self.host = host;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_max_list_size(mut self, max_list_size: usize) -> Self {
        self.max_list_size = max_list_size;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_fields_take_defaults() {
        let config = RuntimeConfig::from_json_str(r#"{"host": {"name": "demo"}}"#).unwrap();
        assert_eq!(config.host.name, "demo");
        assert_eq!(config.host.version, 0.0);
        assert_eq!(config.max_list_size, DEFAULT_MAX_LIST_SIZE);
        assert_eq!(config.seed, None);
        assert_eq!(config.engine_version, DEFAULT_ENGINE_VERSION);
    }

    #[test]
    fn reads_camel_case_keys() {
        let config = RuntimeConfig::from_json_str(r#"{"maxListSize": 10, "seed": 7}"#).unwrap();
        assert_eq!(config.max_list_size, 10);
        assert_eq!(config.seed, Some(7));
    }

    #[test]
    fn rejects_malformed_json() {
        assert!(RuntimeConfig::from_json_str("{").is_err());
    }
}
