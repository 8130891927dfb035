use pagecraft_editor::{Device, FileStore, GeometryConfig};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

pub const DEFAULT_CONFIG_NAME: &str = "pagecraft.config.json";

/// Pagecraft configuration file format
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    /// Directory holding one JSON file per page
    #[serde(default = "default_store_dir")]
    pub store_dir: String,

    /// Gesture constraints (`minSize`, `gridPitch`, `clampToParent`)
    #[serde(flatten)]
    pub geometry: GeometryConfig,

    /// Device used when rendering without `--device`
    #[serde(default)]
    pub device: Device,
}

fn default_store_dir() -> String {
    "pages".to_string()
}

impl Config {
    /// Load config from a directory
    pub fn load(cwd: &str) -> anyhow::Result<Self> {
        let config_path = PathBuf::from(cwd).join(DEFAULT_CONFIG_NAME);

        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            let config: Config = serde_json::from_str(&content)?;
            Ok(config)
        } else {
            // Return default config if none exists
            Ok(Config::default())
        }
    }

    /// Get absolute path to the page store
    pub fn get_store_dir(&self, cwd: &str) -> PathBuf {
        PathBuf::from(cwd).join(&self.store_dir)
    }

    pub fn store(&self, cwd: &str) -> FileStore {
        FileStore::new(self.get_store_dir(cwd))
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            store_dir: default_store_dir(),
            geometry: GeometryConfig::default(),
            device: Device::default(),
        }
    }
}
