//! Configuration management

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::info;

/// Maximum number of texts per batch request
pub const DEFAULT_BATCH_SIZE: usize = 125;

/// Maximum number of batch requests in flight at once
pub const DEFAULT_CONCURRENT_BATCHES: usize = 7;

/// Configuration for the translator
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TranslatorConfig {
    /// Remote batch-translation endpoint
    pub api_endpoint: String,
    /// Target language code sent with every request
    pub target_lang: String,
    /// Source language code, "auto" lets the endpoint detect it
    pub source_lang: String,
    /// Maximum number of texts per request
    pub batch_size: usize,
    /// Maximum concurrent batch requests
    pub concurrent_batches: usize,
    /// Request timeout in milliseconds
    pub timeout_ms: u64,
    /// Directory for translation backup files
    pub backup_dir: PathBuf,
}

impl Default for TranslatorConfig {
    fn default() -> Self {
        Self {
            api_endpoint: "https://api-translate.daisan.vn/translate/batch".to_string(),
            target_lang: "vi".to_string(),
            source_lang: "auto".to_string(),
            batch_size: DEFAULT_BATCH_SIZE,
            concurrent_batches: DEFAULT_CONCURRENT_BATCHES,
            timeout_ms: 30000,
            backup_dir: PathBuf::from("backup_translations"),
        }
    }
}

impl TranslatorConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> anyhow::Result<Self> {
        let defaults = Self::default();

        let api_endpoint = std::env::var("TRANSLATE_API_ENDPOINT")
            .unwrap_or(defaults.api_endpoint);

        let target_lang = std::env::var("TARGET_LANG").unwrap_or(defaults.target_lang);

        let source_lang = std::env::var("SOURCE_LANG").unwrap_or(defaults.source_lang);

        let batch_size = std::env::var("BATCH_SIZE")
            .unwrap_or_else(|_| DEFAULT_BATCH_SIZE.to_string())
            .parse::<usize>()?;

        let concurrent_batches = std::env::var("CONCURRENT_BATCHES")
            .unwrap_or_else(|_| DEFAULT_CONCURRENT_BATCHES.to_string())
            .parse::<usize>()?;

        let timeout_ms = std::env::var("REQUEST_TIMEOUT_MS")
            .unwrap_or_else(|_| "30000".to_string())
            .parse::<u64>()?;

        let backup_dir = std::env::var("BACKUP_DIR")
            .map(PathBuf::from)
            .unwrap_or(defaults.backup_dir);

        Ok(Self {
            api_endpoint,
            target_lang,
            source_lang,
            batch_size,
            concurrent_batches,
            timeout_ms,
            backup_dir,
        })
    }

    /// Load configuration, validating the result
    pub fn load() -> anyhow::Result<Self> {
        let config = Self::from_env()?;
        config.validate()?;
        info!(
            "Loaded configuration: endpoint={}, target={}, batch_size={}, concurrency={}",
            config.api_endpoint, config.target_lang, config.batch_size, config.concurrent_batches
        );
        Ok(config)
    }

    /// Load from a JSON or YAML file, by extension
    pub fn from_file<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)?;

        let is_yaml = path
            .extension()
            .map(|ext| ext == "yaml" || ext == "yml")
            .unwrap_or(false);

        let config: Self = if is_yaml {
            serde_yaml::from_str(&content)?
        } else {
            serde_json::from_str(&content)?
        };

        Ok(config)
    }

    /// Save configuration to a JSON file
    pub fn to_file<P: AsRef<Path>>(&self, path: P) -> anyhow::Result<()> {
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Validate configuration
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.api_endpoint.is_empty() {
            return Err(anyhow::anyhow!("API endpoint is required"));
        }

        if self.target_lang.is_empty() {
            return Err(anyhow::anyhow!("Target language is required"));
        }

        if self.batch_size == 0 {
            return Err(anyhow::anyhow!("batch_size must be greater than 0"));
        }

        if self.concurrent_batches == 0 {
            return Err(anyhow::anyhow!("concurrent_batches must be greater than 0"));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = TranslatorConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.batch_size, 125);
        assert_eq!(config.concurrent_batches, 7);
    }

    #[test]
    fn test_config_validation_missing_endpoint() {
        let config = TranslatorConfig {
            api_endpoint: "".to_string(),
            ..Default::default()
        };

        assert!(config.validate().is_err());
    }

    #[test]
    fn test_config_validation_zero_batch_size() {
        let config = TranslatorConfig {
            batch_size: 0,
            ..Default::default()
        };

        assert!(config.validate().is_err());
    }

    #[test]
    fn test_config_file_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");

        let config = TranslatorConfig {
            target_lang: "de".to_string(),
            batch_size: 50,
            ..Default::default()
        };
        config.to_file(&path).unwrap();

        let loaded = TranslatorConfig::from_file(&path).unwrap();
        assert_eq!(loaded.target_lang, "de");
        assert_eq!(loaded.batch_size, 50);
    }
}
