use std::collections::btree_map::{self, BTreeMap};
use std::path::{Path, PathBuf};

use log::{debug, info};
use serde::Serialize;

use super::key::ChunkKey;
use super::pattern::ChunkPattern;
use super::ReaderError;

/// One discovered chunk file
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChunkFile {
    /// Ordering identity of the chunk
    pub key: ChunkKey,
    /// Placeholder text exactly as it appears in the filename
    pub raw_key: String,
    /// Path returned by discovery
    pub path: PathBuf,
}

/// Ordered mapping from chunk key to file for a single naming pattern
///
/// Built once by expanding the pattern on the filesystem; immutable afterwards.
#[derive(Debug, Clone)]
pub struct ChunkIndex {
    pattern: ChunkPattern,
    entries: BTreeMap<ChunkKey, ChunkFile>,
}

impl ChunkIndex {
    /// Discover the files matching a pattern string
    pub fn discover(template: &str) -> Result<Self, ReaderError> {
        Self::build(ChunkPattern::parse(template)?)
    }

    /// Discover the files matching a parsed pattern
    ///
    /// Fails with [`ReaderError::NoMatch`] when nothing matches and with
    /// [`ReaderError::DuplicateKey`] when two files share a key.
    ///
    /// Only the directory holding the placeholder component is listed; when it
    /// cannot be read, discovery fails with [`ReaderError::Io`] naming it
    /// instead of `NoMatch`.
    pub fn build(pattern: ChunkPattern) -> Result<Self, ReaderError> {
        let glob_pattern = pattern.glob_pattern();
        debug!("Expanding {:?} as {:?}", pattern.template(), glob_pattern);

        let mut entries = BTreeMap::new();
        for entry in glob::glob(&glob_pattern)? {
            let path = entry?;
            if path.is_dir() {
                debug!("Skipping directory {}", path.display());
                continue;
            }
            let Some(raw_key) = pattern.extract_key(&path) else {
                debug!("Skipping {}: no key at placeholder", path.display());
                continue;
            };
            let key = ChunkKey::parse(&raw_key);
            match entries.entry(key) {
                btree_map::Entry::Occupied(existing) => {
                    let existing: &ChunkFile = existing.get();
                    return Err(ReaderError::DuplicateKey {
                        key: raw_key,
                        first: existing.path.clone(),
                        second: path,
                    });
                }
                btree_map::Entry::Vacant(slot) => {
                    let key = slot.key().clone();
                    slot.insert(ChunkFile { key, raw_key, path });
                }
            }
        }

        if entries.is_empty() {
            return Err(ReaderError::NoMatch {
                pattern: pattern.template().to_string(),
            });
        }
        info!(
            "Indexed {} chunks for pattern {:?}",
            entries.len(),
            pattern.template()
        );

        Ok(Self { pattern, entries })
    }

    /// The pattern this index was built from
    pub fn pattern(&self) -> &ChunkPattern {
        &self.pattern
    }

    /// Number of chunks
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the index holds no chunks (never true for a built index)
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Whether a chunk with this key exists
    pub fn contains_key(&self, key: &ChunkKey) -> bool {
        self.entries.contains_key(key)
    }

    /// Look up a chunk by key
    pub fn get(&self, key: &ChunkKey) -> Option<&ChunkFile> {
        self.entries.get(key)
    }

    /// Keys in ascending order
    pub fn keys(&self) -> impl Iterator<Item = &ChunkKey> + '_ {
        self.entries.keys()
    }

    /// Chunks in ascending key order
    pub fn iter(&self) -> impl Iterator<Item = &ChunkFile> + '_ {
        self.entries.values()
    }

    /// Paths in ascending key order
    pub fn paths(&self) -> impl Iterator<Item = &Path> + '_ {
        self.entries.values().map(|f| f.path.as_path())
    }
}
