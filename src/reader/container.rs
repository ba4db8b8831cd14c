use std::collections::BTreeSet;
use std::path::Path;

use log::info;
use ndarray_npy::ReadableElement;

use crate::store::{Container, GroupListing, GroupPath, NpzContainer};

use super::config::ContainerConfig;
use super::fields::Fields;
use super::iter::{ChunkSource, Chunks, Records};
use super::schema::matching_groups;
use super::ReaderError;

/// Reader over the groups of one hierarchical container
///
/// The container's group tree is walked once at construction. Every group that
/// holds all arrays named by the schema is served, in group path order, as the
/// tuple of those arrays in schema order. Groups may sit at any depth; arrays not
/// named by the schema are ignored unless strict matching is requested.
///
/// # Example
///
/// ```rust,no_run
/// use writ::reader::ContainerReader;
///
/// let reader = ContainerReader::<writ::store::NpzContainer<f32>>::npz(
///     "trajectories.npz",
///     ["coords", "Fs"],
/// )?;
/// for record in reader.records() {
///     let (group, arrays) = record?;
///     println!("{}: {} arrays", group, arrays.len());
/// }
/// # Ok::<(), writ::reader::ReaderError>(())
/// ```
#[derive(Debug)]
pub struct ContainerReader<C> {
    container: C,
    schema: Fields<String>,
    config: ContainerConfig,
    groups: Vec<GroupPath>,
    kinds: BTreeSet<BTreeSet<String>>,
}

impl<A: ReadableElement> ContainerReader<NpzContainer<A>> {
    /// Open an `.npz` archive
    pub fn npz<P: AsRef<Path>>(
        path: P,
        schema: impl Into<Fields<String>>,
    ) -> Result<Self, ReaderError> {
        Self::open(NpzContainer::new(path), schema)
    }
}

impl<C: Container> ContainerReader<C> {
    /// Index a container with lenient schema matching
    pub fn open(container: C, schema: impl Into<Fields<String>>) -> Result<Self, ReaderError> {
        Self::open_with_config(container, schema, ContainerConfig::default())
    }

    /// Index a container
    ///
    /// Fails with [`ReaderError::Schema`] when the schema is empty, repeats a name,
    /// or no group satisfies it.
    pub fn open_with_config(
        container: C,
        schema: impl Into<Fields<String>>,
        config: ContainerConfig,
    ) -> Result<Self, ReaderError> {
        let schema = schema.into();
        schema.validate("field name")?;

        let listings: Vec<GroupListing> = container.groups()?;
        let groups = matching_groups(&listings, &schema, config.strict);
        if groups.is_empty() {
            return Err(ReaderError::Schema(format!(
                "no group in {} holds {}[{}]",
                container.location().display(),
                if config.strict { "exactly " } else { "" },
                schema.as_slice().join(", ")
            )));
        }
        info!(
            "{} of {} groups in {} match the schema",
            groups.len(),
            listings.len(),
            container.location().display()
        );

        let kinds = listings.into_iter().map(|listing| listing.fields).collect();
        Ok(Self {
            container,
            schema,
            config,
            groups,
            kinds,
        })
    }

    /// The underlying container
    pub fn container(&self) -> &C {
        &self.container
    }

    /// Requested array names, in serving order
    pub fn schema(&self) -> &Fields<String> {
        &self.schema
    }

    /// Whether groups must hold exactly the schema's arrays
    pub fn is_strict(&self) -> bool {
        self.config.strict
    }

    /// Groups that will be served, in order
    pub fn groups(&self) -> &[GroupPath] {
        &self.groups
    }

    /// Every distinct set of array names found in the container
    pub fn kinds(&self) -> &BTreeSet<BTreeSet<String>> {
        &self.kinds
    }

    /// Number of items a full pass serves
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    /// Whether a pass serves nothing (never true for a constructed reader)
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Start a new pass over the groups' arrays
    pub fn iter(&self) -> Chunks<'_, Self> {
        Chunks::new(self)
    }

    /// Start a new pass over the groups' arrays and their group paths
    pub fn records(&self) -> Records<'_, Self> {
        Records::new(self)
    }
}

impl<C: Container> ChunkSource for ContainerReader<C> {
    type Entry = GroupPath;
    type Array = C::Array;

    fn entries(&self) -> &[GroupPath] {
        &self.groups
    }

    fn materialize(&self, group: &GroupPath) -> Result<Fields<C::Array>, ReaderError> {
        self.schema
            .borrowed()
            .try_map(|name| self.container.read(group, name))
    }
}

impl<'a, C: Container> IntoIterator for &'a ContainerReader<C> {
    type Item = Result<Fields<C::Array>, ReaderError>;
    type IntoIter = Chunks<'a, ContainerReader<C>>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
