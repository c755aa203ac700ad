//! Error types for session setup and the collaborators around it

use std::fmt;
use std::path::PathBuf;

/// Main error type for all percolation operations
///
/// Every variant is a setup-time or I/O condition. Once a session has been
/// initialized, generating and reducing iterations cannot fail.
#[derive(Debug)]
pub enum PercolationError {
    /// Grid dimensions are not positive
    InvalidDimensions {
        /// Requested number of rows
        rows: usize,
        /// Requested number of columns
        cols: usize,
    },

    /// Derived cell, label, or padded buffer counts overflow the label width
    TooLarge {
        /// Requested number of rows
        rows: usize,
        /// Requested number of columns
        cols: usize,
    },

    /// A backing buffer could not be allocated
    OutOfMemory {
        /// Name of the buffer that failed
        buffer: &'static str,
        /// Number of elements requested
        len: usize,
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

    /// Failed to load a pattern image from the filesystem
    ImageLoad {
        /// Path to the image file
        path: PathBuf,
        /// Underlying image loading error
        source: image::ImageError,
    },

    /// Failed to save a rendered grid to disk
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
}

impl fmt::Display for PercolationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidDimensions { rows, cols } => {
                write!(
                    f,
                    "Invalid grid size {rows}x{cols}: rows and columns must be at least 1"
                )
            }
            Self::TooLarge { rows, cols } => {
                write!(f, "Grid size {rows}x{cols} is too large")
            }
            Self::OutOfMemory { buffer, len } => {
                write!(f, "Out of memory allocating {buffer} ({len} elements)")
            }
            Self::InvalidParameter {
                parameter,
                value,
                reason,
            } => {
                write!(f, "Invalid parameter '{parameter}' = '{value}': {reason}")
            }
            Self::ImageLoad { path, source } => {
                write!(f, "Failed to load image '{}': {source}", path.display())
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
        }
    }
}

impl std::error::Error for PercolationError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::ImageLoad { source, .. } | Self::ImageExport { source, .. } => Some(source),
            Self::FileSystem { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// Convenience type alias for percolation results
pub type Result<T> = std::result::Result<T, PercolationError>;

/// Create an invalid parameter error
pub fn invalid_parameter(
    parameter: &'static str,
    value: &impl ToString,
    reason: &impl ToString,
) -> PercolationError {
    PercolationError::InvalidParameter {
        parameter,
        value: value.to_string(),
        reason: reason.to_string(),
    }
}

/// Allocate a buffer of `len` copies of `value`, reporting failure instead of aborting
///
/// # Errors
///
/// Returns [`PercolationError::OutOfMemory`] if the allocation cannot be satisfied
pub fn try_filled<T: Clone>(buffer: &'static str, len: usize, value: T) -> Result<Vec<T>> {
    let mut data = Vec::new();
    data.try_reserve_exact(len)
        .map_err(|_reserve_error| PercolationError::OutOfMemory { buffer, len })?;
    data.resize(len, value);
    Ok(data)
}
