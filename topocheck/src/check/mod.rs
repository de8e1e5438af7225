//! Topology checks.
//!
//! Every check is a pure function of its inputs. Topology defects are returned as [`CheckError`] values; features
//! that cannot be evaluated at all are reported separately as [`FeatureGeometryError`]s.

mod containment;
mod gap;
mod overlap;
mod self_intersection;

pub use containment::check_containment;
pub use gap::check_gaps;
pub use overlap::check_overlaps;
pub use self_intersection::check_self_intersections;

use serde::Serialize;
use topocheck_types::GeometryError;

use crate::check_error::CheckError;
use crate::error::GapCheckFailure;

/// Structural defect of a feature met during a check.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FeatureGeometryError {
    /// Id of the offending feature.
    pub feature_id: String,
    /// What is wrong with it.
    pub error: GeometryError,
}

impl FeatureGeometryError {
    pub(crate) fn new(feature_id: &str, error: GeometryError) -> Self {
        Self {
            feature_id: feature_id.to_string(),
            error,
        }
    }
}

/// Result of a per-feature check against a candidate set (overlap, containment).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CheckOutcome {
    /// Topology defects found.
    pub errors: Vec<CheckError>,
    /// Candidates that were skipped because they are structurally invalid.
    pub invalid_candidates: Vec<FeatureGeometryError>,
    /// Set when the checked feature itself is invalid and the check was skipped for it.
    pub geometry_error: Option<GeometryError>,
}

impl CheckOutcome {
    pub(crate) fn invalid_input(error: GeometryError) -> Self {
        Self {
            geometry_error: Some(error),
            ..Default::default()
        }
    }

    /// The checked feature was invalid and nothing was tested.
    pub fn geometry_error_flag(&self) -> bool {
        self.geometry_error.is_some()
    }
}

/// Result of the gap check of a layer.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GapOutcome {
    /// Gaps found.
    pub errors: Vec<CheckError>,
    /// Features left out of the mosaic because they are structurally invalid.
    pub invalid_features: Vec<FeatureGeometryError>,
    /// Set when the check could not complete. `errors` is empty then, which does not mean there are no gaps.
    pub failure: Option<GapCheckFailure>,
}

impl GapOutcome {
    pub(crate) fn failed(
        failure: GapCheckFailure,
        invalid_features: Vec<FeatureGeometryError>,
    ) -> Self {
        Self {
            errors: vec![],
            invalid_features,
            failure: Some(failure),
        }
    }

    /// The check is inconclusive.
    pub fn check_error_flag(&self) -> bool {
        self.failure.is_some()
    }
}
