//! Configuration types and loading

use eyre::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Main configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Completion endpoint configuration
    pub llm: LlmConfig,

    /// Vision worker configuration
    pub vision: VisionConfig,

    /// Log level (TRACE, DEBUG, INFO, WARN, ERROR); CLI flag wins over this
    #[serde(rename = "log-level")]
    pub log_level: Option<String>,
}

impl Config {
    /// Load configuration with fallback chain
    ///
    /// An explicit path is a hard requirement; the fallback files
    /// (`.boatgpt.yml` in the working directory, then the user config dir)
    /// warn and fall through on failure.
    pub fn load(config_path: Option<&PathBuf>) -> Result<Self> {
        if let Some(path) = config_path {
            return Self::load_from_file(path).context(format!("Failed to load config from {}", path.display()));
        }

        let local_config = PathBuf::from(".boatgpt.yml");
        if local_config.exists() {
            match Self::load_from_file(&local_config) {
                Ok(config) => return Ok(config),
                Err(e) => {
                    tracing::warn!("Failed to load config from {}: {}", local_config.display(), e);
                }
            }
        }

        if let Some(config_dir) = dirs::config_dir() {
            let user_config = config_dir.join("boatgpt").join("boatgpt.yml");
            if user_config.exists() {
                match Self::load_from_file(&user_config) {
                    Ok(config) => return Ok(config),
                    Err(e) => {
                        tracing::warn!("Failed to load config from {}: {}", user_config.display(), e);
                    }
                }
            }
        }

        tracing::info!("No config file found, using defaults");
        Ok(Self::default())
    }

    fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(&path).context("Failed to read config file")?;

        let config: Self = serde_yaml::from_str(&content).context("Failed to parse config file")?;

        tracing::info!("Loaded config from: {}", path.as_ref().display());
        Ok(config)
    }
}

/// Completion endpoint configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LlmConfig {
    /// Model identifier
    pub model: String,

    /// Endpoint base URL; `/v1/chat/completions` is appended
    #[serde(rename = "base-url")]
    pub base_url: String,

    /// Environment variable containing a bearer token, if the endpoint
    /// wants one; the default worker needs none
    #[serde(rename = "api-key-env")]
    pub api_key_env: Option<String>,

    /// Request timeout in milliseconds
    #[serde(rename = "timeout-ms")]
    pub timeout_ms: u64,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            model: "llama-3.1-8b-instant".to_string(),
            base_url: "https://boatgpt-groq.danielmat639.workers.dev".to_string(),
            api_key_env: None,
            timeout_ms: 60_000,
        }
    }
}

/// Vision worker configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct VisionConfig {
    /// Worker URL; images are POSTed to it directly
    #[serde(rename = "base-url")]
    pub base_url: String,

    /// Request timeout in milliseconds
    #[serde(rename = "timeout-ms")]
    pub timeout_ms: u64,
}

impl Default for VisionConfig {
    fn default() -> Self {
        Self {
            base_url: "https://boatgpt-vision.danielmat639.workers.dev".to_string(),
            timeout_ms: 60_000,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.llm.model, "llama-3.1-8b-instant");
        assert!(config.llm.api_key_env.is_none());
        assert_eq!(config.vision.timeout_ms, 60_000);
        assert!(config.log_level.is_none());
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            "llm:\n  model: test-model\n  timeout-ms: 5000\nvision:\n  base-url: http://localhost:9999\nlog-level: DEBUG"
        )
        .unwrap();

        let config = Config::load(Some(&file.path().to_path_buf())).unwrap();
        assert_eq!(config.llm.model, "test-model");
        assert_eq!(config.llm.timeout_ms, 5000);
        // Unset fields keep their defaults
        assert_eq!(config.llm.base_url, "https://boatgpt-groq.danielmat639.workers.dev");
        assert_eq!(config.vision.base_url, "http://localhost:9999");
        assert_eq!(config.log_level.as_deref(), Some("DEBUG"));
    }

    #[test]
    fn test_explicit_missing_path_is_an_error() {
        let path = PathBuf::from("/nonexistent/boatgpt.yml");
        assert!(Config::load(Some(&path)).is_err());
    }
}
