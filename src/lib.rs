//! # writ - Readers for Chunked Array Data
//!
//! `writ` discovers array data that was written out in chunks, orders the chunks
//! deterministically and serves them lazily, one item at a time, as
//! [`ndarray`] arrays.
//!
//! ## Key Features
//!
//! - **Pattern Discovery**: Naming patterns with one `{}` placeholder, such as
//!   `run_{}/coords.npy`, are expanded on the filesystem and each match is keyed by
//!   the text standing in for the placeholder.
//!
//! - **Natural Ordering**: Integer keys order numerically (`1, 2, 10`), so chunks
//!   come back in the order they were written.
//!
//! - **Alignment**: Several patterns can be paired by key to serve one tuple of
//!   arrays per chunk, either on the keys they share or requiring identical keys.
//!
//! - **Hierarchical Containers**: Groups of a container file that hold every
//!   requested array are served in group order (`.npz` archives, and HDF5 files
//!   with the `hdf5` feature).
//!
//! - **Lazy Reads**: Readers plan their items at construction and read each item
//!   only when iteration reaches it; no file stays open between items.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use writ::reader::{PairedConfig, PairedDirReader, Alignment};
//! use writ::store::NpyLoader;
//!
//! let config = PairedConfig {
//!     parent: Some("simulation".into()),
//!     alignment: Alignment::Exact,
//! };
//! let reader: PairedDirReader<NpyLoader<f32>> =
//!     PairedDirReader::open_with_config(vec!["coords/c_{}.npy", "forces/f_{}.npy"], config)?;
//!
//! for record in reader.records() {
//!     let (chunk, arrays) = record?;
//!     println!("chunk {} holds {} arrays", chunk.key, arrays.len());
//! }
//! # Ok::<(), writ::reader::ReaderError>(())
//! ```
//!
//! ## Configuration
//!
//! Sources can be described declaratively and opened without naming a reader type:
//!
//! ```rust,no_run
//! use writ::reader::SourceConfig;
//!
//! let source: SourceConfig = toml::from_str(r#"
//!     layout = "container"
//!     filename = "trajectories.npz"
//!     schema = ["coords", "Fs"]
//! "#)?;
//! let reader = source.open::<f64>()?;
//! for item in reader.records() {
//!     let (group, _arrays) = item?;
//!     println!("{}", group);
//! }
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! ## Architecture
//!
//! - [`reader`]: pattern parsing, chunk indexes, alignment and the readers
//! - [`store`]: codecs turning files into arrays

// Documentation lints - enforce complete documentation for publication
#![deny(missing_docs)]
#![deny(rustdoc::missing_crate_level_docs)]

pub mod reader;
pub mod store;

pub use reader::ReaderError;

/// Re-export commonly used types for convenience
pub mod prelude {
    pub use crate::reader::{
        Alignment, ChunkKey, ChunkPattern, ContainerConfig, ContainerReader, Fields,
        PairedConfig, PairedDirReader, Reader, ReaderError, SourceConfig, StripedReader,
    };
    pub use crate::store::{ArrayLoader, Container, Element, GroupPath, NpyLoader, NpzContainer};
}
