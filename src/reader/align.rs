use std::collections::BTreeSet;
use std::path::PathBuf;

use log::{info, warn};
use serde::{Deserialize, Serialize};

use super::fields::Fields;
use super::index::ChunkIndex;
use super::key::ChunkKey;
use super::ReaderError;

/// What to do with keys that only some sources provide
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Alignment {
    /// Serve the keys every source provides; drop the rest
    #[default]
    Intersect,
    /// Require every source to provide exactly the same keys
    Exact,
}

/// Files of every source belonging to one chunk key
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AlignedChunkSet {
    /// Key shared by all files
    pub key: ChunkKey,
    /// One file per source, in declared source order
    pub files: Fields<PathBuf>,
}

/// Pair up chunk indexes by key
///
/// Returns one [`AlignedChunkSet`] per key in ascending key order. Under
/// [`Alignment::Intersect`] the keys are those present in every index; under
/// [`Alignment::Exact`] any key missing from some index is an error.
pub fn align(
    indexes: &Fields<ChunkIndex>,
    policy: Alignment,
) -> Result<Vec<AlignedChunkSet>, ReaderError> {
    let sources = indexes.as_slice();
    let Some((first, rest)) = sources.split_first() else {
        return Err(ReaderError::Schema(
            "at least one pattern is required".to_string(),
        ));
    };

    if policy == Alignment::Exact {
        let union: BTreeSet<&ChunkKey> = sources.iter().flat_map(ChunkIndex::keys).collect();
        for key in union {
            if let Some(lacking) = sources.iter().find(|index| !index.contains_key(key)) {
                return Err(ReaderError::MissingChunk {
                    key: key.to_string(),
                    pattern: lacking.pattern().template().to_string(),
                });
            }
        }
    }

    let mut sets = Vec::with_capacity(first.len());
    for key in first.keys() {
        if !rest.iter().all(|index| index.contains_key(key)) {
            continue;
        }
        let files = indexes.borrowed().try_map(|index| {
            index
                .get(key)
                .map(|file| file.path.clone())
                .ok_or_else(|| ReaderError::MissingChunk {
                    key: key.to_string(),
                    pattern: index.pattern().template().to_string(),
                })
        })?;
        sets.push(AlignedChunkSet {
            key: key.clone(),
            files,
        });
    }

    if !rest.is_empty() {
        let union: BTreeSet<&ChunkKey> = sources.iter().flat_map(ChunkIndex::keys).collect();
        if union.len() > sets.len() {
            warn!(
                "Dropped {} chunk keys not present for every pattern",
                union.len() - sets.len()
            );
        }
    }
    if sets.is_empty() {
        warn!("Patterns share no chunk keys; nothing will be served");
    } else {
        info!(
            "Aligned {} chunks across {} patterns",
            sets.len(),
            sources.len()
        );
    }

    Ok(sets)
}
