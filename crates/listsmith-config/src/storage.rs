use std::path::PathBuf;

use serde::Deserialize;

/// Where products, listings and optimization results are kept
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum StorageConfig {
    /// Process-local maps, lost on restart
    Memory,
    /// One pretty-printed JSON array file per collection
    Json {
        #[serde(default = "default_data_dir")]
        data_dir: PathBuf,
    },
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self::Json {
            data_dir: default_data_dir(),
        }
    }
}

fn default_data_dir() -> PathBuf {
    PathBuf::from("data")
}
