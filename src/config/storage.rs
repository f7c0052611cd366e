//! Profile storage configuration

use serde::Deserialize;
use std::path::PathBuf;

/// Profile storage configuration
#[derive(Debug, Clone, Deserialize)]
pub struct StorageConfig {
    /// Which storage backend to use
    #[serde(default)]
    pub backend: StorageBackend,

    /// Directory for the file backend
    #[serde(default = "default_dir")]
    pub dir: PathBuf,
}

/// Storage backend selection
#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    /// Profiles are lost on restart. Suitable for local development and tests.
    #[default]
    Memory,
    File,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            backend: StorageBackend::default(),
            dir: default_dir(),
        }
    }
}

fn default_dir() -> PathBuf {
    PathBuf::from("./data/profiles")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_storage_defaults() {
        let config = StorageConfig::default();
        assert_eq!(config.backend, StorageBackend::Memory);
        assert_eq!(config.dir, PathBuf::from("./data/profiles"));
    }
}
