use std::fmt;
use std::fs::File;
use std::io::BufReader;
use std::marker::PhantomData;
use std::path::{Path, PathBuf};

use log::debug;
use ndarray::ArrayD;
use ndarray_npy::{ReadNpyExt, ReadableElement};
use zip::ZipArchive;

use super::{collect_listings, Container, GroupListing, GroupPath};
use crate::reader::ReaderError;

const NPY_SUFFIX: &str = ".npy";

/// A `.npz` archive viewed as a hierarchical container
///
/// Entry names are split on `/`: `A/b/coords.npy` is the array `coords` in group
/// `/A/b`, and a bare `coords.npy` lives in the root group.
pub struct NpzContainer<A> {
    path: PathBuf,
    _element: PhantomData<fn() -> A>,
}

impl<A> NpzContainer<A> {
    /// Refer to the archive at `path`; nothing is opened until it is read
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            _element: PhantomData,
        }
    }

    fn open_archive(&self) -> Result<ZipArchive<BufReader<File>>, ReaderError> {
        let file = File::open(&self.path)?;
        ZipArchive::new(BufReader::new(file)).map_err(|e| ReaderError::decode(&self.path, e))
    }
}

impl<A> Clone for NpzContainer<A> {
    fn clone(&self) -> Self {
        Self::new(&self.path)
    }
}

impl<A> fmt::Debug for NpzContainer<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NpzContainer")
            .field("path", &self.path)
            .finish()
    }
}

/// Split an archive entry name into its group and array name
fn split_entry(name: &str) -> Option<(GroupPath, String)> {
    if name.ends_with('/') {
        return None;
    }
    let name = name.strip_suffix(NPY_SUFFIX).unwrap_or(name);
    let (group, field) = match name.rsplit_once('/') {
        Some((group, field)) => (GroupPath::parse(group), field),
        None => (GroupPath::root(), name),
    };
    if field.is_empty() {
        return None;
    }
    Some((group, field.to_string()))
}

impl<A: ReadableElement> Container for NpzContainer<A> {
    type Array = ArrayD<A>;

    fn groups(&self) -> Result<Vec<GroupListing>, ReaderError> {
        let archive = self.open_archive()?;
        let entries: Vec<(GroupPath, String)> = archive
            .file_names()
            .filter_map(|name| {
                let entry = split_entry(name);
                if entry.is_none() {
                    debug!("Ignoring archive entry {:?}", name);
                }
                entry
            })
            .collect();
        Ok(collect_listings(entries))
    }

    fn read(&self, group: &GroupPath, name: &str) -> Result<ArrayD<A>, ReaderError> {
        let mut archive = self.open_archive()?;
        let base = group.member(name);
        let base = base.trim_start_matches('/');

        let index = [format!("{}{}", base, NPY_SUFFIX), base.to_string()]
            .iter()
            .find_map(|candidate| archive.index_for_name(candidate))
            .ok_or_else(|| {
                ReaderError::decode(
                    &self.path,
                    format!("archive has no array {}", group.member(name)),
                )
            })?;

        let entry = archive
            .by_index(index)
            .map_err(|e| {
                ReaderError::decode(&self.path, format!("{}: {}", group.member(name), e))
            })?;
        ArrayD::<A>::read_npy(entry).map_err(|e| {
            ReaderError::decode(&self.path, format!("{}: {}", group.member(name), e))
        })
    }

    fn location(&self) -> &Path {
        &self.path
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_entry() {
        assert_eq!(
            split_entry("A/b/coords.npy"),
            Some((GroupPath::parse("A/b"), "coords".to_string()))
        );
        assert_eq!(
            split_entry("coords.npy"),
            Some((GroupPath::root(), "coords".to_string()))
        );
        assert_eq!(
            split_entry("A/raw"),
            Some((GroupPath::parse("A"), "raw".to_string()))
        );
        assert_eq!(split_entry("A/"), None);
        assert_eq!(split_entry("A/.npy"), None);
    }
}
