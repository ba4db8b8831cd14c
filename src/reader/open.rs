use std::path::Path;

use ndarray::ArrayD;

use crate::store::{Element, NpyLoader, NpzContainer};

#[cfg(feature = "hdf5")]
use crate::store::H5Container;

use super::config::{ContainerConfig, PairedConfig, SourceConfig};
use super::container::ContainerReader;
use super::fields::Fields;
use super::paired::PairedDirReader;
use super::striped::StripedReader;
use super::ReaderError;

/// Boxed iterator over labelled items of a [`Reader`]
pub type LabelledItems<'a, A> =
    Box<dyn Iterator<Item = Result<(String, Fields<ArrayD<A>>), ReaderError>> + 'a>;

/// Any reader built from a [`SourceConfig`], using the bundled codecs
#[derive(Debug)]
pub enum Reader<A> {
    /// `.npz` container
    Npz(ContainerReader<NpzContainer<A>>),
    /// HDF5 container
    #[cfg(feature = "hdf5")]
    H5(ContainerReader<H5Container<A>>),
    /// `.npy` chunks matched by one pattern
    Striped(StripedReader<NpyLoader<A>>),
    /// `.npy` chunks paired across patterns
    Paired(PairedDirReader<NpyLoader<A>>),
}

impl SourceConfig {
    /// Build the reader this configuration describes
    ///
    /// Container files are recognised by extension: `.npz` archives, and `.h5`,
    /// `.hdf5`, `.h5py` or `.he5` files when the `hdf5` feature is enabled.
    pub fn open<A: Element>(&self) -> Result<Reader<A>, ReaderError> {
        match self {
            SourceConfig::Container {
                filename,
                schema,
                strict,
            } => open_container(
                filename,
                schema.clone(),
                ContainerConfig { strict: *strict },
            ),
            SourceConfig::Striped { pattern } => {
                Ok(Reader::Striped(StripedReader::open(pattern.clone())?))
            }
            SourceConfig::Paired {
                patterns,
                parent,
                alignment,
            } => Ok(Reader::Paired(PairedDirReader::open_with_config(
                patterns.clone(),
                PairedConfig {
                    parent: parent.clone(),
                    alignment: *alignment,
                },
            )?)),
        }
    }
}

fn open_container<A: Element>(
    filename: &Path,
    schema: Fields<String>,
    config: ContainerConfig,
) -> Result<Reader<A>, ReaderError> {
    let extension = filename
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase)
        .unwrap_or_default();

    match extension.as_str() {
        "npz" => Ok(Reader::Npz(ContainerReader::open_with_config(
            NpzContainer::new(filename),
            schema,
            config,
        )?)),
        #[cfg(feature = "hdf5")]
        "h5" | "hdf5" | "h5py" | "he5" => Ok(Reader::H5(ContainerReader::open_with_config(
            H5Container::new(filename),
            schema,
            config,
        )?)),
        #[cfg(not(feature = "hdf5"))]
        "h5" | "hdf5" | "h5py" | "he5" => Err(ReaderError::InvalidArgument(format!(
            "{} is an HDF5 file; rebuild with the `hdf5` feature to read it",
            filename.display()
        ))),
        _ => Err(ReaderError::InvalidArgument(format!(
            "cannot tell the container format of {}",
            filename.display()
        ))),
    }
}

impl<A: Element> Reader<A> {
    /// Number of items a full pass serves
    pub fn len(&self) -> usize {
        match self {
            Reader::Npz(reader) => reader.len(),
            #[cfg(feature = "hdf5")]
            Reader::H5(reader) => reader.len(),
            Reader::Striped(reader) => reader.len(),
            Reader::Paired(reader) => reader.len(),
        }
    }

    /// Whether a pass serves nothing
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Start a new pass; items are labelled with their chunk key or group path
    pub fn records(&self) -> LabelledItems<'_, A> {
        match self {
            Reader::Npz(reader) => Box::new(
                reader
                    .records()
                    .map(|r| r.map(|(group, data)| (group.to_string(), data))),
            ),
            #[cfg(feature = "hdf5")]
            Reader::H5(reader) => Box::new(
                reader
                    .records()
                    .map(|r| r.map(|(group, data)| (group.to_string(), data))),
            ),
            Reader::Striped(reader) => Box::new(
                reader
                    .records()
                    .map(|r| r.map(|(set, data)| (set.key.to_string(), data))),
            ),
            Reader::Paired(reader) => Box::new(
                reader
                    .records()
                    .map(|r| r.map(|(set, data)| (set.key.to_string(), data))),
            ),
        }
    }

    /// Start a new pass over the arrays only
    pub fn iter(&self) -> impl Iterator<Item = Result<Fields<ArrayD<A>>, ReaderError>> + '_ {
        self.records().map(|r| r.map(|(_, data)| data))
    }
}
