//! Error types for board construction, moves and transcript export

use std::fmt;
use std::path::PathBuf;

use crate::spatial::grid::Position;

/// Main error type for all board operations
#[derive(Debug)]
pub enum BoardError {
    /// Board requested with a zero or oversized dimension
    InvalidDimensions {
        /// Requested width in columns
        width: usize,
        /// Requested height in rows
        height: usize,
    },

    /// Position lies outside the grid
    OutOfBounds {
        /// The offending position
        position: Position,
        /// Grid dimensions (height, width)
        dimensions: (usize, usize),
    },

    /// Swap positions are not orthogonally adjacent
    InvalidMove {
        /// First position of the requested swap
        first: Position,
        /// Second position of the requested swap
        second: Position,
    },

    /// Token source stopped producing tokens
    SourceExhausted {
        /// Tokens drawn in the failing operation before exhaustion
        drawn: usize,
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

impl fmt::Display for BoardError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidDimensions { width, height } => {
                write!(f, "Invalid board dimensions {width}x{height}")
            }
            Self::OutOfBounds {
                position,
                dimensions,
            } => {
                write!(
                    f,
                    "Position {position} is out of bounds (grid size {}x{})",
                    dimensions.0, dimensions.1
                )
            }
            Self::InvalidMove { first, second } => {
                write!(
                    f,
                    "Cannot swap {first} with {second}: cells are not adjacent"
                )
            }
            Self::SourceExhausted { drawn } => {
                write!(f, "Token source exhausted after {drawn} draws")
            }
            Self::InvalidParameter {
                parameter,
                value,
                reason,
            } => {
                write!(f, "Invalid parameter '{parameter}' = '{value}': {reason}")
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

impl std::error::Error for BoardError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::FileSystem { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// Convenience type alias for board results
pub type Result<T> = std::result::Result<T, BoardError>;

impl From<std::io::Error> for BoardError {
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
) -> BoardError {
    BoardError::InvalidParameter {
        parameter,
        value: value.to_string(),
        reason: reason.to_string(),
    }
}

/// Create a file system error bound to a path
pub fn file_system_error(
    path: impl Into<PathBuf>,
    operation: &'static str,
    source: std::io::Error,
) -> BoardError {
    BoardError::FileSystem {
        path: path.into(),
        operation,
        source,
    }
}
