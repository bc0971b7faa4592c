use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::errors::{GeminiError, GeminiResult};

/// Default API base; tests point this at a local mock server.
pub const DEFAULT_API_BASE: &str = "https://generativelanguage.googleapis.com/v1";

/// Default model used for essay correction.
pub const DEFAULT_MODEL: &str = "gemini-2.5-pro";

/// Configuration struct for the Gemini API
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct GeminiConfig {
    pub api_key: Option<String>,
    pub model_name: Option<String>,
    pub api_base: Option<String>,
}

impl Default for GeminiConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            model_name: Some(DEFAULT_MODEL.to_string()),
            api_base: None,
        }
    }
}

impl GeminiConfig {
    /// Reads the API key from the `GEMINI_API_KEY` environment variable.
    /// Only the key comes from the environment; the other fields stay
    /// `None` so merging never overrides file-level settings. A missing
    /// key is not an error here: the grading endpoint reports it
    /// per-request.
    pub fn from_env() -> Self {
        Self {
            api_key: std::env::var("GEMINI_API_KEY").ok().filter(|k| !k.is_empty()),
            model_name: None,
            api_base: None,
        }
    }

    /// Loads configuration from a file if it exists, otherwise returns the
    /// default config
    pub fn load_from_file(path: &Path) -> GeminiResult<Self> {
        if path.exists() {
            let content = fs::read_to_string(path).map_err(|e| {
                GeminiError::ConfigError(format!("Failed to read config file: {}", e))
            })?;

            let config: Self = toml::from_str(&content).map_err(|e| {
                GeminiError::ConfigError(format!("Failed to parse config file: {}", e))
            })?;

            Ok(config)
        } else {
            Ok(Self::default())
        }
    }

    /// Merges this config with another config, preferring values from the
    /// other config if present
    pub fn merge(&self, other: &Self) -> Self {
        Self {
            api_key: other.api_key.clone().or_else(|| self.api_key.clone()),
            model_name: other.model_name.clone().or_else(|| self.model_name.clone()),
            api_base: other.api_base.clone().or_else(|| self.api_base.clone()),
        }
    }

    pub fn model_name(&self) -> &str {
        self.model_name.as_deref().unwrap_or(DEFAULT_MODEL)
    }

    pub fn api_base(&self) -> &str {
        self.api_base.as_deref().unwrap_or(DEFAULT_API_BASE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn merge_prefers_values_from_other() {
        let base = GeminiConfig {
            api_key: Some("base-key".to_string()),
            model_name: Some("base-model".to_string()),
            api_base: None,
        };
        let other = GeminiConfig {
            api_key: None,
            model_name: Some("other-model".to_string()),
            api_base: Some("http://localhost:1234".to_string()),
        };

        let merged = base.merge(&other);
        assert_eq!(merged.api_key.as_deref(), Some("base-key"));
        assert_eq!(merged.model_name.as_deref(), Some("other-model"));
        assert_eq!(merged.api_base.as_deref(), Some("http://localhost:1234"));
    }

    #[test]
    fn env_config_only_carries_the_api_key() {
        let config = GeminiConfig::from_env();
        assert!(config.model_name.is_none());
        assert!(config.api_base.is_none());
    }

    #[test]
    fn load_from_file_reads_toml_and_defaults_when_missing() {
        let path = std::env::temp_dir().join(format!("redacao-gemini-{}.toml", std::process::id()));
        fs::write(&path, "api_key = \"file-key\"\nmodel_name = \"gemini-1.5\"\n").unwrap();
        let config = GeminiConfig::load_from_file(&path).unwrap();
        fs::remove_file(&path).ok();

        assert_eq!(config.api_key.as_deref(), Some("file-key"));
        assert_eq!(config.model_name(), "gemini-1.5");

        let missing = GeminiConfig::load_from_file(Path::new("/nonexistent/redacao.toml")).unwrap();
        assert!(missing.api_key.is_none());
    }

    #[test]
    fn defaults_fill_in_accessors() {
        let config = GeminiConfig {
            api_key: None,
            model_name: None,
            api_base: None,
        };
        assert_eq!(config.model_name(), DEFAULT_MODEL);
        assert_eq!(config.api_base(), DEFAULT_API_BASE);
    }
}
