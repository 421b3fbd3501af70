//! Error types for corpus initialization and mosaic composition

use std::fmt;
use std::path::PathBuf;

/// Main error type for all engine operations
#[derive(Debug)]
pub enum MosaicError {
    /// Corpus directory is missing, unreadable, or holds no decodable images
    Load {
        /// Corpus directory
        path: PathBuf,
        /// What went wrong while loading
        reason: String,
    },

    /// An image file could not be decoded into pixels
    ImageDecode {
        /// Path to the image file
        path: PathBuf,
        /// Underlying image decoding error
        source: image::ImageError,
    },

    /// A pixel buffer does not describe a valid image
    MalformedPixels {
        /// Description of what's wrong with the buffer
        reason: String,
    },

    /// Spatial index construction failed
    Index {
        /// Description of the rejected feature set
        reason: String,
    },

    /// Parameter validation failed
    InvalidParameter {
        /// Name of the invalid parameter
        parameter: &'static str,
        /// Provided value that failed validation
        value: String,
        /// Explanation of why the value is invalid
        reason: String,
    },

    /// Corpus, index and request disagree with each other
    Config {
        /// Description of the mismatch
        reason: String,
    },

    /// Failed to save a generated mosaic to disk
    ImageExport {
        /// Path where export was attempted
        path: PathBuf,
        /// Underlying image export error
        source: image::ImageError,
    },

    /// General file system operation failure
    FileSystem {
        /// Path involved in the operation
        path: PathBuf,
        /// Description of the operation that failed
        operation: &'static str,
        /// Underlying I/O error
        source: std::io::Error,
    },

    /// Precompute cache entry could not be written
    Cache {
        /// Cache file involved
        path: PathBuf,
        /// Description of the failure
        reason: String,
    },
}

impl MosaicError {
    /// Whether the error means the engine cannot serve requests at all
    ///
    /// Initialization failures are fatal. Everything a single conversion
    /// request can trigger is recoverable and should be reported to the caller.
    pub const fn is_fatal(&self) -> bool {
        matches!(
            self,
            Self::Load { .. } | Self::Index { .. } | Self::FileSystem { .. } | Self::Cache { .. }
        )
    }
}

impl fmt::Display for MosaicError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Load { path, reason } => {
                write!(f, "Failed to load corpus '{}': {reason}", path.display())
            }
            Self::ImageDecode { path, source } => {
                write!(f, "Failed to decode image '{}': {source}", path.display())
            }
            Self::MalformedPixels { reason } => {
                write!(f, "Malformed pixel buffer: {reason}")
            }
            Self::Index { reason } => {
                write!(f, "Cannot build spatial index: {reason}")
            }
            Self::InvalidParameter {
                parameter,
                value,
                reason,
            } => {
                write!(f, "Invalid parameter '{parameter}' = '{value}': {reason}")
            }
            Self::Config { reason } => {
                write!(f, "Configuration mismatch: {reason}")
            }
            Self::ImageExport { path, source } => {
                write!(
                    f,
                    "Failed to export image to '{}': {source}",
                    path.display()
                )
            }
            Self::FileSystem {
                path,
                operation,
                source,
            } => {
                write!(
                    f,
                    "File system error during {operation} on '{}': {source}",
                    path.display()
                )
            }
            Self::Cache { path, reason } => {
                write!(f, "Cache error on '{}': {reason}", path.display())
            }
        }
    }
}

impl std::error::Error for MosaicError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::ImageDecode { source, .. } | Self::ImageExport { source, .. } => Some(source),
            Self::FileSystem { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// Convenience type alias for engine results
pub type Result<T> = std::result::Result<T, MosaicError>;

/// Create an invalid parameter error
pub fn invalid_parameter(
    parameter: &'static str,
    value: &impl ToString,
    reason: &impl ToString,
) -> MosaicError {
    MosaicError::InvalidParameter {
        parameter,
        value: value.to_string(),
        reason: reason.to_string(),
    }
}

/// Create a configuration mismatch error
pub fn config_error(reason: &impl ToString) -> MosaicError {
    MosaicError::Config {
        reason: reason.to_string(),
    }
}

/// Create a file system error for the given path and operation
pub fn file_system_error(
    path: impl Into<PathBuf>,
    operation: &'static str,
    source: std::io::Error,
) -> MosaicError {
    MosaicError::FileSystem {
        path: path.into(),
        operation,
        source,
    }
}
