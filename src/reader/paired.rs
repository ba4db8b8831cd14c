use log::debug;
use ndarray_npy::ReadableElement;

use crate::store::{ArrayLoader, NpyLoader};

use super::align::{align, AlignedChunkSet, Alignment};
use super::config::PairedConfig;
use super::fields::Fields;
use super::index::ChunkIndex;
use super::iter::{ChunkSource, Chunks, Records};
use super::pattern::ChunkPattern;
use super::ReaderError;

/// Reader pairing files from several directory trees by their chunk key
///
/// Each pattern names one field, e.g. `a/h_{}_tag.npy` and `b/g_{}_tag.npy`. Files
/// whose placeholders match (`a/h_5_tag.npy` with `b/g_5_tag.npy`) are served
/// together, one array per pattern in pattern order, in ascending key order.
///
/// # Example
///
/// ```rust,no_run
/// use writ::reader::PairedDirReader;
/// use writ::store::NpyLoader;
///
/// let reader: PairedDirReader<NpyLoader<f64>> =
///     PairedDirReader::open(vec!["coords/c_{}.npy", "forces/f_{}.npy"])?;
/// for item in &reader {
///     let arrays = item?.into_vec();
///     println!("{:?} / {:?}", arrays[0].shape(), arrays[1].shape());
/// }
/// # Ok::<(), writ::reader::ReaderError>(())
/// ```
#[derive(Debug)]
pub struct PairedDirReader<L> {
    indexes: Fields<ChunkIndex>,
    sets: Vec<AlignedChunkSet>,
    config: PairedConfig,
    loader: L,
}

impl<A: ReadableElement> PairedDirReader<NpyLoader<A>> {
    /// Discover and pair `.npy` files with the default configuration
    pub fn open(patterns: impl Into<Fields<String>>) -> Result<Self, ReaderError> {
        Self::open_with_config(patterns, PairedConfig::default())
    }

    /// Discover and pair `.npy` files
    pub fn open_with_config(
        patterns: impl Into<Fields<String>>,
        config: PairedConfig,
    ) -> Result<Self, ReaderError> {
        Self::with_loader(patterns, config, NpyLoader::new())
    }
}

impl<L: ArrayLoader> PairedDirReader<L> {
    /// Discover and pair files read by a custom loader
    ///
    /// All patterns are parsed before any directory is searched, so a malformed
    /// pattern is reported without touching the filesystem.
    pub fn with_loader(
        patterns: impl Into<Fields<String>>,
        config: PairedConfig,
        loader: L,
    ) -> Result<Self, ReaderError> {
        let patterns = patterns.into();
        if patterns.is_empty() {
            return Err(ReaderError::Schema(
                "at least one pattern is required".to_string(),
            ));
        }

        let parsed = patterns.try_map(|template| match &config.parent {
            Some(parent) => ChunkPattern::with_parent(parent, &template),
            None => ChunkPattern::parse(template),
        })?;
        let indexes = parsed.try_map(ChunkIndex::build)?;
        let sets = align(&indexes, config.alignment)?;
        debug!("Paired reader planned {} chunks", sets.len());

        Ok(Self {
            indexes,
            sets,
            config,
            loader,
        })
    }

    /// One index per pattern, in pattern order
    pub fn indexes(&self) -> &Fields<ChunkIndex> {
        &self.indexes
    }

    /// The aligned chunks that will be served, in order
    pub fn chunk_sets(&self) -> &[AlignedChunkSet] {
        &self.sets
    }

    /// The alignment policy in effect
    pub fn alignment(&self) -> Alignment {
        self.config.alignment
    }

    /// Number of items a full pass serves
    pub fn len(&self) -> usize {
        self.sets.len()
    }

    /// Whether a pass serves nothing
    pub fn is_empty(&self) -> bool {
        self.sets.is_empty()
    }

    /// Start a new pass over the arrays
    pub fn iter(&self) -> Chunks<'_, Self> {
        Chunks::new(self)
    }

    /// Start a new pass over the arrays and the chunk each came from
    pub fn records(&self) -> Records<'_, Self> {
        Records::new(self)
    }
}

impl<L: ArrayLoader> ChunkSource for PairedDirReader<L> {
    type Entry = AlignedChunkSet;
    type Array = L::Array;

    fn entries(&self) -> &[AlignedChunkSet] {
        &self.sets
    }

    fn materialize(&self, entry: &AlignedChunkSet) -> Result<Fields<L::Array>, ReaderError> {
        entry
            .files
            .borrowed()
            .try_map(|path| self.loader.load(path))
    }
}

impl<'a, L: ArrayLoader> IntoIterator for &'a PairedDirReader<L> {
    type Item = Result<Fields<L::Array>, ReaderError>;
    type IntoIter = Chunks<'a, PairedDirReader<L>>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
