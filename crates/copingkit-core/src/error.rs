//! Error handling for copingkit
//!
//! Provides error types for every layer of the engine:
//! - Geometry errors (malformed outlines and boundaries)
//! - Layout errors (paver configuration)
//! - Selection errors (extension requests the controller cannot honour)
//!
//! All error types use `thiserror` for ergonomic error handling.

use thiserror::Error;

/// Geometry error type
///
/// Raised when an outline or boundary polygon cannot be used.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GeometryError {
    /// Polygon has too few vertices
    #[error("Polygon needs at least 3 vertices, got {vertices}")]
    TooFewVertices {
        /// The number of vertices supplied.
        vertices: usize,
    },

    /// Polygon contains NaN or infinite coordinates
    #[error("Polygon vertex {index} is not finite")]
    NonFiniteVertex {
        /// Index of the offending vertex.
        index: usize,
    },

    /// Direction vector has no length
    #[error("Direction vector has zero length")]
    ZeroDirection,
}

/// Layout error type
///
/// Represents invalid paver configuration.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum LayoutError {
    /// Named paver option was not recognised
    #[error("Unknown paver option: {option}")]
    UnknownPaverOption {
        /// The option string that failed to parse.
        option: String,
    },

    /// Paver dimensions are not usable
    #[error("Invalid paver size {width}x{height}: {reason}")]
    InvalidPaverSize {
        /// Width in millimeters.
        width: f64,
        /// Height in millimeters.
        height: f64,
        /// Why the size was rejected.
        reason: String,
    },

    /// Edge name was not recognised
    #[error("Unknown edge: {edge}")]
    UnknownEdge {
        /// The edge string that failed to parse.
        edge: String,
    },

    /// An engine parameter is outside its valid range
    #[error("Invalid parameter {name} = {value}: {expected}")]
    InvalidParameter {
        /// Parameter name as stored in configuration.
        name: String,
        /// The rejected value.
        value: f64,
        /// The accepted range.
        expected: String,
    },

    /// Coping is disabled for this configuration
    #[error("Coping is disabled (paver option 'none')")]
    CopingDisabled,
}

/// Selection error type
///
/// Represents extension requests the selection controller refuses.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SelectionError {
    /// Nothing is selected
    #[error("No pavers selected")]
    EmptySelection,

    /// Selection spans more than one edge or row
    #[error("Selection spans multiple edges or rows and cannot be extended")]
    NotExtendable,

    /// A corner paver was selected without an explicit direction
    #[error("Corner paver {paver_id} needs an explicit extension direction")]
    CornerDirectionRequired {
        /// The corner paver awaiting a direction.
        paver_id: String,
    },

    /// A selected id is not in the paver collection
    #[error("Paver {paver_id} not found")]
    PaverNotFound {
        /// The missing paver id.
        paver_id: String,
    },
}

/// Main error type for copingkit
///
/// A unified error type that can represent any engine error.
#[derive(Error, Debug)]
pub enum Error {
    /// Geometry error
    #[error(transparent)]
    Geometry(#[from] GeometryError),

    /// Layout error
    #[error(transparent)]
    Layout(#[from] LayoutError),

    /// Selection error
    #[error(transparent)]
    Selection(#[from] SelectionError),

    /// Standard I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic error
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Create an error from a string message
    pub fn other(msg: impl Into<String>) -> Self {
        Error::Other(msg.into())
    }

    /// Check if this is a geometry error
    pub fn is_geometry_error(&self) -> bool {
        matches!(self, Error::Geometry(_))
    }

    /// Check if this is a selection error
    pub fn is_selection_error(&self) -> bool {
        matches!(self, Error::Selection(_))
    }

    /// Check if the caller must supply a corner direction before retrying
    pub fn needs_corner_direction(&self) -> bool {
        matches!(
            self,
            Error::Selection(SelectionError::CornerDirectionRequired { .. })
        )
    }
}

/// Result type using Error
pub type Result<T> = std::result::Result<T, Error>;
