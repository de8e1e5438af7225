use log::{debug, warn};
use topocheck_types::Vector2d;

use super::{CheckOutcome, FeatureGeometryError};
use crate::algebra::PolygonAlgebra;
use crate::check_error::CheckError;
use crate::config::ToleranceConfig;
use crate::feature::Feature;

/// Measures the area `feature` shares with each candidate and reports the ones above the overlap threshold.
///
/// Candidates are expected to be pruned by bounding box already, but candidates that turn out not to overlap are
/// fine: they produce a zero-area intersection and no error. Structurally invalid candidates are skipped and listed
/// in [`CheckOutcome::invalid_candidates`]; an invalid `feature` skips the whole check.
///
/// Only areal geometries can overlap. Points and lines, as the feature or as a candidate, never produce an error
/// here.
pub fn check_overlaps<'a, A>(
    feature: &Feature,
    candidates: impl IntoIterator<Item = &'a Feature>,
    config: &ToleranceConfig,
    algebra: &A,
) -> CheckOutcome
where
    A: PolygonAlgebra + ?Sized,
{
    if let Err(err) = feature.geometry.validate() {
        warn!("Feature {} is invalid, overlap check skipped: {err}", feature.id);
        return CheckOutcome::invalid_input(err);
    }

    let Some(area) = feature.geometry.as_area() else {
        return CheckOutcome::default();
    };

    let mut outcome = CheckOutcome::default();
    for candidate in candidates {
        if std::ptr::eq(candidate, feature) {
            continue;
        }

        if let Err(err) = candidate.geometry.validate() {
            warn!(
                "Candidate {} of feature {} is invalid, skipped: {err}",
                candidate.id, feature.id
            );
            outcome
                .invalid_candidates
                .push(FeatureGeometryError::new(&candidate.id, err));
            continue;
        }

        let Some(candidate_area) = candidate.geometry.as_area() else {
            continue;
        };

        let intersection = match algebra.intersection(&area, &candidate_area) {
            Ok(v) => v,
            Err(err) => {
                warn!(
                    "Failed to intersect feature {} with {}: {err}",
                    feature.id, candidate.id
                );
                outcome
                    .invalid_candidates
                    .push(FeatureGeometryError::new(&candidate.id, err));
                continue;
            }
        };

        let overlap_area = algebra.area(&intersection);
        if overlap_area <= config.area_noise_floor() || overlap_area <= config.overlap_threshold {
            continue;
        }

        let Some(overlap_location) = algebra.point_on_surface(&intersection) else {
            warn!(
                "No interior point found for overlap of {} and {} with area {overlap_area}, skipped",
                feature.id, candidate.id
            );
            continue;
        };

        debug!(
            "Feature {} overlaps {} by {overlap_area} at {:?}",
            feature.id,
            candidate.id,
            overlap_location.coords()
        );
        outcome.errors.push(overlap_error(
            &candidate.id,
            overlap_area,
            overlap_location,
        ));
    }

    outcome
}

fn overlap_error(other_feature_id: &str, overlap_area: f64, overlap_location: Vector2d) -> CheckError {
    CheckError::Overlap {
        other_feature_id: other_feature_id.to_string(),
        overlap_area,
        overlap_location,
    }
}
