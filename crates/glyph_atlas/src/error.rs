//! Error types for atlas generation

use std::path::PathBuf;

use crate::atlas::DescriptorError;
use crate::config::ConfigError;

/// Result type for atlas operations
pub type AtlasResult<T> = Result<T, AtlasError>;

/// Errors that abort an atlas build
///
/// Font candidate failures never show up here; the resolver swallows them and
/// falls back to the built-in font.
#[derive(Debug, thiserror::Error)]
pub enum AtlasError {
    /// Grid has a zero dimension or its pixel size overflows
    #[error("Invalid grid configuration: {0}")]
    InvalidGrid(String),

    /// Build configuration failed validation
    #[error("Invalid atlas configuration: {0}")]
    InvalidConfig(String),

    /// Output directory could not be created
    #[error("Failed to create directory {path:?}: {source}")]
    CreateDir {
        /// Directory that could not be created
        path: PathBuf,
        /// Underlying IO error
        #[source]
        source: std::io::Error,
    },

    /// Atlas image could not be encoded or written
    #[error("Failed to write atlas image {path:?}: {source}")]
    Write {
        /// Destination of the failed write
        path: PathBuf,
        /// Underlying image error
        #[source]
        source: image::ImageError,
    },

    /// Atlas image could not be read back
    #[error("Failed to read atlas image {path:?}: {source}")]
    Read {
        /// Source of the failed read
        path: PathBuf,
        /// Underlying image error
        #[source]
        source: image::ImageError,
    },

    /// Sidecar descriptor error
    #[error(transparent)]
    Descriptor(#[from] DescriptorError),

    /// Configuration file error
    #[error(transparent)]
    Config(#[from] ConfigError),
}
