use std::fmt;
use std::marker::PhantomData;
use std::path::{Path, PathBuf};

use hdf5::types::H5Type;
use ndarray::ArrayD;

use super::{collect_listings, Container, GroupListing, GroupPath};
use crate::reader::ReaderError;

/// An HDF5 file viewed as a hierarchical container
///
/// The file is opened read-only for each listing or read and closed right after.
pub struct H5Container<A> {
    path: PathBuf,
    _element: PhantomData<fn() -> A>,
}

impl<A> H5Container<A> {
    /// Refer to the file at `path`; nothing is opened until it is read
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            _element: PhantomData,
        }
    }

    /// Open read-only; a missing file is `Io`, an unparseable one `Decode`
    fn open_file(&self) -> Result<hdf5::File, ReaderError> {
        std::fs::metadata(&self.path)?;
        hdf5::File::open(&self.path).map_err(|e| ReaderError::decode(&self.path, e))
    }
}

impl<A> Clone for H5Container<A> {
    fn clone(&self) -> Self {
        Self::new(&self.path)
    }
}

impl<A> fmt::Debug for H5Container<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("H5Container")
            .field("path", &self.path)
            .finish()
    }
}

/// Last component of an HDF5 object name
fn base_name(name: &str) -> &str {
    name.rsplit('/').next().unwrap_or(name)
}

fn visit(
    group: &hdf5::Group,
    path: &GroupPath,
    out: &mut Vec<(GroupPath, String)>,
) -> Result<(), ReaderError> {
    for dataset in group.datasets()? {
        out.push((path.clone(), base_name(&dataset.name()).to_string()));
    }
    for child in group.groups()? {
        let child_path = GroupPath::parse(&child.name());
        visit(&child, &child_path, out)?;
    }
    Ok(())
}

impl<A: H5Type> Container for H5Container<A> {
    type Array = ArrayD<A>;

    fn groups(&self) -> Result<Vec<GroupListing>, ReaderError> {
        let file = self.open_file()?;
        let mut entries = Vec::new();
        visit(&file, &GroupPath::root(), &mut entries)?;
        Ok(collect_listings(entries))
    }

    fn read(&self, group: &GroupPath, name: &str) -> Result<ArrayD<A>, ReaderError> {
        let file = self.open_file()?;
        let member = group.member(name);
        let dataset = file
            .dataset(&member)
            .map_err(|e| ReaderError::decode(&self.path, format!("{}: {}", member, e)))?;
        dataset
            .read_dyn::<A>()
            .map_err(|e| ReaderError::decode(&self.path, format!("{}: {}", member, e)))
    }

    fn location(&self) -> &Path {
        &self.path
    }
}
