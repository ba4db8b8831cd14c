//! TOML configuration file for the `scan` command.
//!
//! The `[source]` table describes where the data lives and how it is laid out:
//!
//! ```toml
//! # writ.toml
//! [source]
//! layout = "paired"
//! patterns = ["coords/c_{}.npy", "forces/f_{}.npy"]
//! parent = "/data/run1"
//! alignment = "exact"
//!
//! [scan]
//! limit = 100
//! ```

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::Path;

use writ::reader::SourceConfig;

/// Root configuration structure for writ.toml files.
#[derive(Debug, Deserialize)]
pub struct Config {
    /// The data source to read.
    pub source: SourceConfig,

    /// Scan-specific settings.
    #[serde(default)]
    pub scan: ScanConfig,
}

/// Configuration for the scan command.
#[derive(Debug, Default, Deserialize)]
pub struct ScanConfig {
    /// Stop after this many items.
    pub limit: Option<usize>,
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        Self::from_str(&content)
    }

    /// Parse configuration from a TOML string.
    pub fn from_str(content: &str) -> Result<Self> {
        toml::from_str(content).context("Failed to parse TOML configuration")
    }
}
