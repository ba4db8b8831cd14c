use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use super::align::Alignment;
use super::fields::Fields;

/// Options for reading a hierarchical container
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContainerConfig {
    /// Serve only groups holding exactly the schema's arrays
    #[serde(default)]
    pub strict: bool,
}

/// Options for pairing files across directories
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PairedConfig {
    /// Directory prepended to every pattern
    #[serde(default)]
    pub parent: Option<PathBuf>,

    /// What to do with keys missing from some patterns
    #[serde(default)]
    pub alignment: Alignment,
}

/// Description of a data source, as written in configuration files
///
/// ```toml
/// layout = "paired"
/// patterns = ["coords/c_{}.npy", "forces/f_{}.npy"]
/// alignment = "exact"
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "layout", rename_all = "snake_case")]
pub enum SourceConfig {
    /// One hierarchical container
    Container {
        /// Path of the container file
        filename: PathBuf,
        /// Array names to serve from each group
        schema: Fields<String>,
        /// Serve only groups holding exactly the schema's arrays
        #[serde(default)]
        strict: bool,
    },

    /// Chunk files matched by one pattern
    Striped {
        /// Naming pattern with one `{}` placeholder
        pattern: Fields<String>,
    },

    /// Chunk files paired across several patterns
    Paired {
        /// One naming pattern per field
        patterns: Fields<String>,
        /// Directory prepended to every pattern
        #[serde(default)]
        parent: Option<PathBuf>,
        /// What to do with keys missing from some patterns
        #[serde(default)]
        alignment: Alignment,
    },
}
