use std::path::{Path, PathBuf};

/// Errors that can occur while discovering or reading chunked data
#[derive(Debug, thiserror::Error)]
pub enum ReaderError {
    /// Naming pattern without exactly one placeholder
    #[error("Invalid pattern {pattern:?}: {reason}")]
    Pattern {
        /// The offending pattern
        pattern: String,
        /// What is wrong with it
        reason: String,
    },

    /// Pattern matched no usable files
    #[error("No files match pattern {pattern:?}")]
    NoMatch {
        /// The pattern that was expanded
        pattern: String,
    },

    /// Requested schema cannot be served by the container
    #[error("Schema error: {0}")]
    Schema(String),

    /// Two files of one source resolve to the same chunk key
    #[error("Duplicate chunk key {key:?}: {first} and {second}")]
    DuplicateKey {
        /// The ambiguous key
        key: String,
        /// First file carrying the key
        first: PathBuf,
        /// Second file carrying the key
        second: PathBuf,
    },

    /// Codec could not parse a chunk
    #[error("Failed to decode {path}: {message}")]
    Decode {
        /// File that failed to decode
        path: PathBuf,
        /// Message reported by the codec
        message: String,
    },

    /// Multi-field request against a layout that holds one field per file
    #[error("Unsupported schema: {0}")]
    UnsupportedSchema(String),

    /// Exact alignment found a key that a source does not provide
    #[error("Chunk {key:?} is missing for pattern {pattern:?}")]
    MissingChunk {
        /// Key present in another source
        key: String,
        /// Pattern of the source lacking it
        pattern: String,
    },

    /// Arrays could not be combined
    #[error("Shape error: {0}")]
    Shape(String),

    /// Invalid argument supplied by the caller
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Malformed glob expression
    #[error("Glob error: {0}")]
    Glob(#[from] glob::PatternError),

    /// ZIP archive error
    #[error("ZIP error: {0}")]
    Zip(#[from] zip::result::ZipError),

    /// HDF5 library error
    #[cfg(feature = "hdf5")]
    #[error("HDF5 error: {0}")]
    Hdf5(#[from] hdf5::Error),
}

impl ReaderError {
    pub(crate) fn decode(path: &Path, err: impl std::fmt::Display) -> Self {
        Self::Decode {
            path: path.to_path_buf(),
            message: err.to_string(),
        }
    }
}

impl From<glob::GlobError> for ReaderError {
    fn from(err: glob::GlobError) -> Self {
        let path = err.path().display().to_string();
        let err = err.into_error();
        Self::Io(std::io::Error::new(err.kind(), format!("{}: {}", path, err)))
    }
}
