use std::iter::FusedIterator;

use log::debug;
use ndarray::{ArrayD, Axis, Slice};
use ndarray_npy::ReadableElement;

use crate::store::{ArrayLoader, NpyLoader};

use super::align::{align, AlignedChunkSet, Alignment};
use super::fields::Fields;
use super::index::ChunkIndex;
use super::iter::{ChunkSource, Chunks, Records};
use super::ReaderError;

/// Reader over the chunk files matched by one naming pattern
///
/// Flat array files hold a single unnamed array each, so only one field can be
/// served; multi-field patterns are rejected with
/// [`ReaderError::UnsupportedSchema`].
///
/// Besides serving one chunk per item, the reader understands the replica layout
/// where the leading axis of every chunk indexes independent sequences, see
/// [`StripedReader::replicas`].
#[derive(Debug)]
pub struct StripedReader<L> {
    indexes: Fields<ChunkIndex>,
    sets: Vec<AlignedChunkSet>,
    loader: L,
}

impl<A: ReadableElement> StripedReader<NpyLoader<A>> {
    /// Discover the `.npy` chunks matching `pattern`
    pub fn open(pattern: impl Into<Fields<String>>) -> Result<Self, ReaderError> {
        Self::with_loader(pattern, NpyLoader::new())
    }
}

impl<L: ArrayLoader> StripedReader<L> {
    /// Discover the chunks matching `pattern`, read by a custom loader
    pub fn with_loader(pattern: impl Into<Fields<String>>, loader: L) -> Result<Self, ReaderError> {
        let pattern = pattern.into();
        match pattern.len() {
            0 => return Err(ReaderError::Schema("a pattern is required".to_string())),
            1 => {}
            n => {
                return Err(ReaderError::UnsupportedSchema(format!(
                    "flat array files hold one field each, {} patterns given",
                    n
                )))
            }
        }

        let indexes = pattern.try_map(|template| ChunkIndex::discover(&template))?;
        let sets = align(&indexes, Alignment::Intersect)?;
        debug!("Striped reader planned {} chunks", sets.len());

        Ok(Self {
            indexes,
            sets,
            loader,
        })
    }

    /// The index of discovered chunks
    pub fn index(&self) -> &ChunkIndex {
        &self.indexes.as_slice()[0]
    }

    /// Number of chunks a full pass serves
    pub fn len(&self) -> usize {
        self.sets.len()
    }

    /// Whether a pass serves nothing (never true for a constructed reader)
    pub fn is_empty(&self) -> bool {
        self.sets.is_empty()
    }

    /// The chunks that will be served, in order
    pub fn chunk_sets(&self) -> &[AlignedChunkSet] {
        &self.sets
    }

    /// Start a new pass over the chunks
    pub fn iter(&self) -> Chunks<'_, Self> {
        Chunks::new(self)
    }

    /// Start a new pass over the chunks and the file each came from
    pub fn records(&self) -> Records<'_, Self> {
        Records::new(self)
    }
}

impl<L, A> StripedReader<L>
where
    L: ArrayLoader<Array = ArrayD<A>>,
    A: Clone,
{
    /// Serve replicas assembled across all chunks
    ///
    /// Every chunk is expected to have the shape `(replicas, frames, ...)`. Item `r`
    /// is slice `r` of every chunk, concatenated in key order along the frame axis
    /// and then strided along that axis. The replica count is taken from the first
    /// chunk. Chunks are re-read for every replica, so only one replica is ever held
    /// in memory.
    pub fn replicas(&self, stride: usize) -> Result<Replicas<'_, L>, ReaderError> {
        if stride == 0 {
            return Err(ReaderError::InvalidArgument(
                "stride must be at least 1".to_string(),
            ));
        }
        Ok(Replicas {
            reader: self,
            stride,
            next: 0,
            count: None,
            failed: false,
        })
    }

    fn replica_count(&self) -> Result<usize, ReaderError> {
        let first = self.index().iter().next().ok_or_else(|| {
            ReaderError::Shape("no chunks to take replicas from".to_string())
        })?;
        let chunk = self.loader.load(&first.path)?;
        Ok(chunk.shape().first().copied().unwrap_or(0))
    }

    fn replica(&self, replica: usize, stride: usize) -> Result<ArrayD<A>, ReaderError> {
        let mut slices = Vec::with_capacity(self.index().len());
        for file in self.index().iter() {
            let chunk = self.loader.load(&file.path)?;
            if chunk.ndim() < 2 {
                return Err(ReaderError::Shape(format!(
                    "{} has {} dimensions, replicas need at least 2",
                    file.path.display(),
                    chunk.ndim()
                )));
            }
            let available = chunk.shape()[0];
            if replica >= available {
                return Err(ReaderError::Shape(format!(
                    "{} holds {} replicas, replica {} requested",
                    file.path.display(),
                    available,
                    replica
                )));
            }
            slices.push(chunk.index_axis(Axis(0), replica).to_owned());
        }

        let views: Vec<_> = slices.iter().map(|s| s.view()).collect();
        let joined = ndarray::concatenate(Axis(0), &views)
            .map_err(|e| ReaderError::Shape(format!("replica {}: {}", replica, e)))?;
        let step = isize::try_from(stride)
            .map_err(|_| ReaderError::InvalidArgument(format!("stride {} is too large", stride)))?;
        Ok(joined
            .slice_axis(Axis(0), Slice::new(0, None, step))
            .to_owned())
    }
}

impl<L: ArrayLoader> ChunkSource for StripedReader<L> {
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

impl<'a, L: ArrayLoader> IntoIterator for &'a StripedReader<L> {
    type Item = Result<Fields<L::Array>, ReaderError>;
    type IntoIter = Chunks<'a, StripedReader<L>>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Iterator over replicas, created by [`StripedReader::replicas`]
///
/// Stops for good after the first error.
pub struct Replicas<'a, L> {
    reader: &'a StripedReader<L>,
    stride: usize,
    next: usize,
    count: Option<usize>,
    failed: bool,
}

impl<L, A> Iterator for Replicas<'_, L>
where
    L: ArrayLoader<Array = ArrayD<A>>,
    A: Clone,
{
    type Item = Result<ArrayD<A>, ReaderError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed {
            return None;
        }
        let count = match self.count {
            Some(count) => count,
            None => match self.reader.replica_count() {
                Ok(count) => {
                    self.count = Some(count);
                    count
                }
                Err(e) => {
                    self.failed = true;
                    return Some(Err(e));
                }
            },
        };
        if self.next >= count {
            return None;
        }

        let result = self.reader.replica(self.next, self.stride);
        self.next += 1;
        if result.is_err() {
            self.failed = true;
        }
        Some(result)
    }
}

impl<L, A> FusedIterator for Replicas<'_, L>
where
    L: ArrayLoader<Array = ArrayD<A>>,
    A: Clone,
{
}
