use std::iter::FusedIterator;

use super::fields::Fields;
use super::ReaderError;

/// A reader whose items were planned at construction and are read on demand
///
/// `entries` is fixed once the reader exists; `materialize` performs the reads for
/// one entry. Every pass over the reader walks the same entries in the same order.
pub trait ChunkSource {
    /// Identity of one served item
    type Entry;
    /// Array type served
    type Array;

    /// Planned items, in serving order
    fn entries(&self) -> &[Self::Entry];

    /// Read the arrays of one item
    fn materialize(&self, entry: &Self::Entry) -> Result<Fields<Self::Array>, ReaderError>;
}

/// Iterator over items together with their identity
///
/// Stops for good after the first error.
pub struct Records<'a, S: ChunkSource> {
    source: &'a S,
    entries: std::slice::Iter<'a, S::Entry>,
    failed: bool,
}

impl<'a, S: ChunkSource> Records<'a, S> {
    pub(crate) fn new(source: &'a S) -> Self {
        Self {
            source,
            entries: source.entries().iter(),
            failed: false,
        }
    }
}

impl<'a, S: ChunkSource> Iterator for Records<'a, S> {
    type Item = Result<(&'a S::Entry, Fields<S::Array>), ReaderError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed {
            return None;
        }
        let entry = self.entries.next()?;
        match self.source.materialize(entry) {
            Ok(data) => Some(Ok((entry, data))),
            Err(e) => {
                self.failed = true;
                Some(Err(e))
            }
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        if self.failed {
            (0, Some(0))
        } else {
            (0, Some(self.entries.len()))
        }
    }
}

impl<S: ChunkSource> FusedIterator for Records<'_, S> {}

/// Iterator over served arrays
pub struct Chunks<'a, S: ChunkSource> {
    inner: Records<'a, S>,
}

impl<'a, S: ChunkSource> Chunks<'a, S> {
    pub(crate) fn new(source: &'a S) -> Self {
        Self {
            inner: Records::new(source),
        }
    }
}

impl<S: ChunkSource> Iterator for Chunks<'_, S> {
    type Item = Result<Fields<S::Array>, ReaderError>;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|r| r.map(|(_, data)| data))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<S: ChunkSource> FusedIterator for Chunks<'_, S> {}
