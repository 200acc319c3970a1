// rest_api/src/config.rs

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use serde::Deserialize;

/// Represents the configuration for the REST API server itself.
#[derive(Debug, Clone, Deserialize)]
pub struct RestApiConfig {
    pub host: String,
    pub port: u16,
}

impl Default for RestApiConfig {
    fn default() -> Self {
        RestApiConfig {
            host: "127.0.0.1".to_string(),
            port: 8000,
        }
    }
}

/// Storage section: where the sled database lives on disk.
#[derive(Debug, Clone, Deserialize)]
pub struct StorageConfig {
    pub data_directory: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        StorageConfig {
            data_directory: "./clinic_data".to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Default)]
pub struct ClinicConfig {
    #[serde(default)]
    pub rest_api: RestApiConfig,
    #[serde(default)]
    pub storage: StorageConfig,
}

/// Loads `clinic_config.yaml` from the given path, or falls back to
/// defaults when no file exists. A present-but-unparsable file is an
/// error, not a silent fallback.
pub fn load_config(config_file_path: Option<PathBuf>) -> Result<ClinicConfig> {
    let default_config_path = PathBuf::from("clinic_config.yaml");
    let path_to_use = config_file_path.unwrap_or(default_config_path);

    if !path_to_use.exists() {
        return Ok(ClinicConfig::default());
    }

    let config_content = fs::read_to_string(&path_to_use)
        .with_context(|| format!("Failed to read config file {}", path_to_use.display()))?;

    let config: ClinicConfig = serde_yaml2::from_str(&config_content)
        .map_err(|e| anyhow::anyhow!("Failed to parse config file {}: {}", path_to_use.display(), e))?;

    Ok(config)
}
