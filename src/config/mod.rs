use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Default configuration file, relative to the working directory.
pub const DEFAULT_CONFIG_FILE: &str = "spiffsync.toml";

/// Tool configuration, loaded from TOML. Every field has a default so an
/// absent or partial config file is fine.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct Config {
    /// Paths.
    #[serde(default)]
    pub core: CoreConfig,

    /// Hashing behavior.
    #[serde(default)]
    pub hash: HashConfig,
}

/// Data directory and manifest filename.
#[derive(Debug, Clone, Deserialize)]
pub struct CoreConfig {
    /// Directory holding the data files and the manifest.
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,
    /// Manifest filename within the data directory.
    #[serde(default = "default_manifest_name")]
    pub manifest_name: String,
}

/// Hashing behavior.
#[derive(Debug, Clone, Deserialize)]
pub struct HashConfig {
    /// Files at or above this size are memory-mapped instead of read whole.
    #[serde(default = "default_mmap_threshold")]
    pub mmap_threshold: u64,
}

impl Default for CoreConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            manifest_name: default_manifest_name(),
        }
    }
}

impl Default for HashConfig {
    fn default() -> Self {
        Self {
            mmap_threshold: default_mmap_threshold(),
        }
    }
}

impl Config {
    /// Load configuration from a file, falling back to defaults when the
    /// file does not exist.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Cannot read the configuration file
    /// - Configuration file contains invalid TOML
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }
}

// Default functions for serde
fn default_data_dir() -> PathBuf {
    PathBuf::from(crate::DEFAULT_DATA_DIR)
}

fn default_manifest_name() -> String {
    crate::MANIFEST_FILE.to_string()
}

const fn default_mmap_threshold() -> u64 {
    1_048_576 // 1MB
}
