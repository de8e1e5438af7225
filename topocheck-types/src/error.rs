//! Error type used by the crate.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Structural defect of an input geometry.
///
/// A geometry carrying one of these cannot be checked for topology at all. It is a separate outcome from the
/// topology defects reported by the checkers and callers are expected to exclude such features from the dataset.
#[derive(Debug, Clone, PartialEq, Error, Serialize, Deserialize)]
pub enum GeometryError {
    /// A coordinate is NaN or infinite.
    #[error("invalid coordinate ({x}, {y})")]
    InvalidCoordinate {
        /// X coordinate as supplied.
        x: f64,
        /// Y coordinate as supplied.
        y: f64,
    },
    /// A ring or a line has fewer distinct vertices than its geometry type requires.
    #[error("ring {ring} has only {count} distinct vertices")]
    TooFewVertices {
        /// Index of the ring (or line) inside the geometry.
        ring: u32,
        /// Number of distinct vertices found.
        count: usize,
    },
    /// Polygon exterior encloses no area.
    #[error("polygon has zero area")]
    ZeroArea,
    /// Multi-geometry without any members.
    #[error("geometry is empty")]
    Empty,
    /// The geometry kind has no counterpart in this crate.
    #[error("unsupported geometry type: {0}")]
    UnsupportedType(String),
    /// The polygon-algebra backend rejected the geometry.
    #[error("polygon algebra failed: {0}")]
    Algebra(String),
}
