//! Error types used by the crate.

use thiserror::Error;
use topocheck_types::GeometryError;

/// Invalid [`ToleranceConfig`](crate::ToleranceConfig) value.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    /// A knob is NaN, infinite or negative.
    #[error("{name} must be a finite non-negative number, got {value}")]
    NegativeOrNonFinite {
        /// Name of the knob.
        name: &'static str,
        /// Supplied value.
        value: f64,
    },
}

/// Reason the gap check of a layer could not complete.
///
/// An inconclusive gap check never means "no gaps".
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GapCheckFailure {
    /// The layer is empty, or none of its polygon features is valid.
    #[error("no valid polygon features to check for gaps")]
    EmptyInput,
    /// The polygon-algebra backend failed while building or searching the mosaic.
    #[error("gap search failed: {0}")]
    Algebra(#[from] GeometryError),
}
