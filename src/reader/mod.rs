//! # Chunk Readers
//!
//! This module discovers chunked array data on disk, puts the chunks in a
//! deterministic order and serves them one item at a time.
//!
//! ## Layouts
//!
//! - **Striped**: one naming pattern such as `run/x_{}.npy`; one array per chunk
//!   ([`StripedReader`])
//! - **Paired directories**: several patterns, one per field, aligned by the key in
//!   their placeholder ([`PairedDirReader`])
//! - **Container**: one hierarchical file whose groups each hold a named array per
//!   field ([`ContainerReader`])
//!
//! Keys that are integers order numerically (`1, 2, 10`), all others
//! lexicographically after them. Readers plan their items once at construction and
//! can be iterated any number of times; each item is read from disk only when the
//! iterator reaches it.
//!
//! ## Example
//!
//! ```rust,no_run
//! use writ::reader::StripedReader;
//! use writ::store::NpyLoader;
//!
//! let reader: StripedReader<NpyLoader<f32>> = StripedReader::open("frames/x_{}.npy")?;
//! println!("{} chunks", reader.len());
//!
//! for chunk in &reader {
//!     let chunk = chunk?.into_single();
//!     println!("{:?}", chunk.map(|a| a.shape().to_vec()));
//! }
//! # Ok::<(), writ::reader::ReaderError>(())
//! ```

mod align;
mod config;
mod container;
mod error;
mod fields;
mod index;
mod iter;
mod key;
mod open;
mod paired;
mod pattern;
mod schema;
mod striped;


pub use align::{align, AlignedChunkSet, Alignment};
pub use config::{ContainerConfig, PairedConfig, SourceConfig};
pub use container::ContainerReader;
pub use error::ReaderError;
pub use fields::Fields;
pub use index::{ChunkFile, ChunkIndex};
pub use iter::{ChunkSource, Chunks, Records};
pub use key::{ChunkKey, Integer};
pub use open::{LabelledItems, Reader};
pub use paired::PairedDirReader;
pub use pattern::{ChunkPattern, PLACEHOLDER};
pub use striped::{Replicas, StripedReader};
