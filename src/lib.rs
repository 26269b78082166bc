#![warn(missing_docs)]

//! # Spiffsync - SPIFFS Manifest Synchronizer
//!
//! Spiffsync keeps a JSON manifest of content checksums in sync with a
//! directory of data files, so a firmware image build pipeline can detect
//! added, removed, or changed files before a SPIFFS partition is flashed.
//!
//! ## Architecture
//!
//! - [`commands`]: Command implementations (sync, status, init)
//! - [`manifest`]: Manifest file parsing and serialization
//! - [`scanner`]: Data directory snapshots
//! - [`hash`]: Content checksum computation (xxHash3)
//! - [`diff`]: Three-way diff between manifest and directory state
//! - [`config`]: Configuration parsing and defaults
//! - [`output`]: Output formatting and verbosity control
//!
//! ## Example Usage
//!
//! ```no_run
//! use spiffsync::SyncContext;
//!
//! # fn main() -> anyhow::Result<()> {
//! let ctx = SyncContext::new(None, None)?;
//! spiffsync::commands::sync::execute(&ctx, false)?;
//! # Ok(())
//! # }
//! ```

/// Commands module containing all CLI command implementations.
pub mod commands;

/// Configuration parsing and defaults.
pub mod config;

/// Three-way diff between recorded and observed checksums.
pub mod diff;

/// Content checksum computation.
pub mod hash;

/// Manifest file parsing and serialization.
pub mod manifest;

/// Output formatting and verbosity control.
pub mod output;

/// Data directory snapshots.
pub mod scanner;

use anyhow::Result;
use std::path::PathBuf;

/// Current version of the spiffsync binary.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Default data directory, relative to the working directory.
pub const DEFAULT_DATA_DIR: &str = "data";

/// Name of the manifest file inside the data directory.
pub const MANIFEST_FILE: &str = "spiffs_manifest.json";

/// Manifest schema version this tool reads and writes.
pub const MANIFEST_VERSION: &str = "0.1";

/// Central context for all spiffsync operations.
///
/// Holds the resolved data directory, manifest filename, and loaded
/// configuration. Resolution precedence for paths: CLI flag, then
/// configuration file, then built-in default.
#[derive(Debug, Clone)]
pub struct SyncContext {
    /// Path to the data directory holding the files and the manifest.
    pub data_dir: PathBuf,

    /// Filename of the manifest within the data directory.
    pub manifest_name: String,

    /// Loaded configuration settings.
    pub config: config::Config,
}

impl SyncContext {
    /// Creates a new `SyncContext`, loading configuration from the default
    /// path (or `SPIFFSYNC_CONFIG_PATH`) and applying CLI overrides.
    ///
    /// # Errors
    /// Returns an error if the configuration file exists but cannot be read
    /// or parsed.
    pub fn new(data_dir: Option<PathBuf>, manifest_name: Option<String>) -> Result<Self> {
        let config_path = if let Ok(path) = std::env::var("SPIFFSYNC_CONFIG_PATH") {
            PathBuf::from(path)
        } else {
            PathBuf::from(config::DEFAULT_CONFIG_FILE)
        };

        let config = config::Config::load(&config_path)?;

        let data_dir = data_dir.unwrap_or_else(|| config.core.data_dir.clone());
        let manifest_name = manifest_name.unwrap_or_else(|| config.core.manifest_name.clone());

        Ok(Self {
            data_dir,
            manifest_name,
            config,
        })
    }

    /// Creates a new `SyncContext` with an explicit data directory and
    /// default configuration. This avoids environment variable manipulation
    /// in tests.
    #[must_use]
    pub fn new_explicit(data_dir: PathBuf) -> Self {
        Self {
            data_dir,
            manifest_name: MANIFEST_FILE.to_string(),
            config: config::Config::default(),
        }
    }

    /// Full path to the manifest file inside the data directory.
    #[must_use]
    pub fn manifest_path(&self) -> PathBuf {
        self.data_dir.join(&self.manifest_name)
    }

    /// Checks that the data directory exists, returning an error if not.
    ///
    /// # Errors
    /// Returns an error if the data directory is missing or not a directory.
    pub fn check_data_dir(&self) -> Result<()> {
        if !self.data_dir.is_dir() {
            return Err(anyhow::anyhow!(
                "Data directory not found: {}",
                self.data_dir.display()
            ));
        }
        Ok(())
    }
}
