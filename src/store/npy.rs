use std::fmt;
use std::fs::File;
use std::io::BufReader;
use std::marker::PhantomData;
use std::path::Path;

use ndarray::ArrayD;
use ndarray_npy::{ReadNpyExt, ReadableElement};

use super::ArrayLoader;
use crate::reader::ReaderError;

/// Loads `.npy` files as dynamic-dimensional arrays of `A`
pub struct NpyLoader<A> {
    _element: PhantomData<fn() -> A>,
}

impl<A> NpyLoader<A> {
    /// Create a loader
    pub fn new() -> Self {
        Self {
            _element: PhantomData,
        }
    }
}

impl<A> Default for NpyLoader<A> {
    fn default() -> Self {
        Self::new()
    }
}

impl<A> Clone for NpyLoader<A> {
    fn clone(&self) -> Self {
        Self::new()
    }
}

impl<A> fmt::Debug for NpyLoader<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "NpyLoader<{}>", std::any::type_name::<A>())
    }
}

impl<A: ReadableElement> ArrayLoader for NpyLoader<A> {
    type Array = ArrayD<A>;

    fn load(&self, path: &Path) -> Result<ArrayD<A>, ReaderError> {
        let file = File::open(path)?;
        ArrayD::<A>::read_npy(BufReader::new(file)).map_err(|e| ReaderError::decode(path, e))
    }
}
