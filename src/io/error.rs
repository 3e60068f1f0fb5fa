//! Error types for tiling, sampling and persistence operations

use std::fmt;
use std::path::PathBuf;

/// Main error type for all tiling operations
#[derive(Debug)]
pub enum LozengeError {
    /// Coordinate access outside the allocated grid
    ///
    /// The grid is the padded `2N x 2N x 2` box, not the hexagon, so this
    /// always indicates a programming error in the caller.
    OutOfRange {
        /// Requested coordinate as (x, y, orientation)
        coordinate: (usize, usize, usize),
        /// Grid dimensions as (x extent, y extent, orientations)
        dimensions: (usize, usize, usize),
    },

    /// Vertex whose ring of six triangles does not fit in the grid
    ///
    /// Only vertices with `1 <= x, y < 2N` have a complete ring.
    SiteOutOfRange {
        /// Vertex position (x, y)
        site: (usize, usize),
        /// Grid extent along x and y
        extent: usize,
    },

    /// Flip requested at a vertex whose six triangles match neither pattern
    InvalidFlip {
        /// Vertex position (x, y)
        site: (usize, usize),
        /// The six labels found around the vertex
        labels: [u8; 6],
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

    /// Snapshot belongs to a domain of a different size
    SnapshotMismatch {
        /// Side length of the receiving domain
        expected: usize,
        /// Side length recorded in the snapshot
        found: usize,
    },

    /// Snapshot encoding or decoding failed
    Snapshot {
        /// Path of the snapshot file
        path: PathBuf,
        /// Underlying codec error
        source: bincode::Error,
    },

    /// Failed to save a rendered image to disk
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

impl fmt::Display for LozengeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::OutOfRange {
                coordinate,
                dimensions,
            } => {
                write!(
                    f,
                    "Coordinate ({}, {}, {}) is outside the {}x{}x{} grid",
                    coordinate.0,
                    coordinate.1,
                    coordinate.2,
                    dimensions.0,
                    dimensions.1,
                    dimensions.2
                )
            }
            Self::SiteOutOfRange { site, extent } => {
                write!(
                    f,
                    "Vertex ({}, {}) has no complete hexagon inside the {extent}x{extent} grid",
                    site.0, site.1
                )
            }
            Self::InvalidFlip { site, labels } => {
                write!(
                    f,
                    "No flippable hexagon at ({}, {}): labels {labels:?}",
                    site.0, site.1
                )
            }
            Self::InvalidParameter {
                parameter,
                value,
                reason,
            } => {
                write!(f, "Invalid parameter '{parameter}' = '{value}': {reason}")
            }
            Self::SnapshotMismatch { expected, found } => {
                write!(
                    f,
                    "Snapshot is for a domain of size {found}, expected size {expected}"
                )
            }
            Self::Snapshot { path, source } => {
                write!(f, "Snapshot error for '{}': {source}", path.display())
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

impl std::error::Error for LozengeError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Snapshot { source, .. } => Some(source),
            Self::ImageExport { source, .. } => Some(source),
            Self::FileSystem { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// Convenience type alias for tiling results
pub type Result<T> = std::result::Result<T, LozengeError>;

impl From<std::io::Error> for LozengeError {
    fn from(err: std::io::Error) -> Self {
        Self::FileSystem {
            path: PathBuf::from("<unknown>"),
            operation: "unknown",
            source: err,
        }
    }
}

/// Create an invalid parameter error
pub fn invalid_parameter(
    parameter: &'static str,
    value: &impl ToString,
    reason: &impl ToString,
) -> LozengeError {
    LozengeError::InvalidParameter {
        parameter,
        value: value.to_string(),
        reason: reason.to_string(),
    }
}

/// Create an out-of-range error for a grid of the given dimensions
pub const fn out_of_range(
    coordinate: (usize, usize, usize),
    dimensions: (usize, usize, usize),
) -> LozengeError {
    LozengeError::OutOfRange {
        coordinate,
        dimensions,
    }
}
