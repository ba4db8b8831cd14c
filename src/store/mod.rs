//! # Array Store Adapters
//!
//! Thin wrappers around the codecs that turn on-disk blobs into arrays:
//!
//! - [`ArrayLoader`]: one flat file → one array ([`NpyLoader`] for `.npy`, or any
//!   closure `Fn(&Path) -> Result<T, ReaderError>`)
//! - [`Container`]: one hierarchical file holding named arrays in groups
//!   ([`NpzContainer`] for `.npz` archives, `H5Container` for HDF5 files with the
//!   `hdf5` feature)
//!
//! Adapters keep no handles open between calls. Every load opens the file, decodes
//! one array and releases the file again, so an abandoned iteration never leaks
//! descriptors.

mod npy;
mod npz;

#[cfg(feature = "hdf5")]
mod h5;

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::path::Path;

use serde::Serialize;

use crate::reader::ReaderError;

pub use npy::NpyLoader;
pub use npz::NpzContainer;

#[cfg(feature = "hdf5")]
pub use h5::H5Container;

/// Element types every bundled codec can decode
#[cfg(not(feature = "hdf5"))]
pub trait Element: ndarray_npy::ReadableElement + Clone {}

#[cfg(not(feature = "hdf5"))]
impl<T: ndarray_npy::ReadableElement + Clone> Element for T {}

/// Element types every bundled codec can decode
#[cfg(feature = "hdf5")]
pub trait Element: ndarray_npy::ReadableElement + hdf5::H5Type + Clone {}

#[cfg(feature = "hdf5")]
impl<T: ndarray_npy::ReadableElement + hdf5::H5Type + Clone> Element for T {}

/// Decodes one flat array file
pub trait ArrayLoader {
    /// Array type produced
    type Array;

    /// Read the array stored at `path`
    fn load(&self, path: &Path) -> Result<Self::Array, ReaderError>;
}

impl<F, T> ArrayLoader for F
where
    F: Fn(&Path) -> Result<T, ReaderError>,
{
    type Array = T;

    fn load(&self, path: &Path) -> Result<T, ReaderError> {
        self(path)
    }
}

/// Address of a group inside a hierarchical container
///
/// Ordered component by component; the root group has no components.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct GroupPath(Vec<String>);

impl GroupPath {
    /// The root group
    pub fn root() -> Self {
        Self::default()
    }

    /// Parse a `/`-separated address; empty components are ignored
    pub fn parse(address: &str) -> Self {
        Self(
            address
                .split('/')
                .filter(|c| !c.is_empty())
                .map(str::to_string)
                .collect(),
        )
    }

    /// Path components from the root
    pub fn components(&self) -> &[String] {
        &self.0
    }

    /// Address of a member of this group
    pub fn member(&self, name: &str) -> String {
        if self.0.is_empty() {
            format!("/{}", name)
        } else {
            format!("{}/{}", self, name)
        }
    }
}

impl fmt::Display for GroupPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            return f.write_str("/");
        }
        for component in &self.0 {
            write!(f, "/{}", component)?;
        }
        Ok(())
    }
}

/// A group and the names of the arrays it holds directly
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GroupListing {
    /// Group address
    pub path: GroupPath,
    /// Names of the arrays stored in the group
    pub fields: BTreeSet<String>,
}

/// A hierarchical file of named arrays
pub trait Container {
    /// Array type produced
    type Array;

    /// Every group that directly holds at least one array, sorted by path
    fn groups(&self) -> Result<Vec<GroupListing>, ReaderError>;

    /// Read the array `name` stored in `group`
    fn read(&self, group: &GroupPath, name: &str) -> Result<Self::Array, ReaderError>;

    /// Where the container lives, for messages
    fn location(&self) -> &Path;
}

/// Distinct sets of array names found across the groups of a container
pub fn kinds<C: Container>(container: &C) -> Result<BTreeSet<BTreeSet<String>>, ReaderError> {
    Ok(container
        .groups()?
        .into_iter()
        .map(|listing| listing.fields)
        .collect())
}

/// Fold `(group, array name)` pairs into sorted listings
pub(crate) fn collect_listings<I>(entries: I) -> Vec<GroupListing>
where
    I: IntoIterator<Item = (GroupPath, String)>,
{
    let mut groups: BTreeMap<GroupPath, BTreeSet<String>> = BTreeMap::new();
    for (path, name) in entries {
        groups.entry(path).or_default().insert(name);
    }
    groups
        .into_iter()
        .map(|(path, fields)| GroupListing { path, fields })
        .collect()
}
