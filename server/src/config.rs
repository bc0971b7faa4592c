use std::fs;
use std::net::SocketAddr;
use std::path::Path;

use anyhow::{Context, Result};
use redacao_core::GeminiConfig;
use serde::{Deserialize, Serialize};

/// Request bodies on the grading endpoint are capped at 2 MB.
pub const GRADING_BODY_LIMIT: usize = 2 * 1024 * 1024;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub http_addr: SocketAddr,
    #[serde(default)]
    pub gemini: GeminiConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            http_addr: SocketAddr::from(([127, 0, 0, 1], 8080)),
            gemini: GeminiConfig::default(),
        }
    }
}

impl AppConfig {
    /// Loads configuration from a TOML file, falling back to defaults when
    /// the file does not exist. The `GEMINI_API_KEY` environment variable
    /// takes precedence over a key from the file.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut config = match path {
            Some(path) if path.exists() => {
                let content = fs::read_to_string(path)
                    .with_context(|| format!("Failed to read config file {}", path.display()))?;
                toml::from_str(&content)
                    .with_context(|| format!("Failed to parse config file {}", path.display()))?
            }
            _ => Self::default(),
        };

        config.gemini = config.gemini.merge(&GeminiConfig::from_env());
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_has_no_api_key() {
        let config = AppConfig::default();
        assert!(config.gemini.api_key.is_none());
        assert_eq!(config.http_addr.port(), 8080);
    }

    #[test]
    fn file_model_name_survives_env_merge() {
        let path = std::env::temp_dir().join(format!("redacao-app-{}.toml", std::process::id()));
        fs::write(
            &path,
            "http_addr = \"127.0.0.1:9090\"\n\n[gemini]\nmodel_name = \"gemini-1.5-custom\"\n",
        )
        .unwrap();
        let config = AppConfig::load(Some(&path)).unwrap();
        fs::remove_file(&path).ok();

        assert_eq!(config.gemini.model_name.as_deref(), Some("gemini-1.5-custom"));
        assert_eq!(config.http_addr.port(), 9090);
    }
}
