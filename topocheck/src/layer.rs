//! Batch check of all features of one layer.

use log::{debug, info};
use rayon::prelude::*;
use serde::Serialize;
use topocheck_types::GeometryError;

use crate::algebra::{GeoAlgebra, PolygonAlgebra};
use crate::check::{
    check_containment, check_gaps, check_overlaps, check_self_intersections, FeatureGeometryError,
};
use crate::check_error::CheckError;
use crate::config::ToleranceConfig;
use crate::error::GapCheckFailure;
use crate::feature::Feature;
use crate::index::CandidateIndex;

/// Topology defect found for a feature of the layer.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FeatureCheckError {
    /// Id of the feature the defect is reported for.
    pub feature_id: String,
    /// The defect.
    pub error: CheckError,
}

/// Everything found by [`LayerChecker::check`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LayerReport {
    /// Per-feature defects, grouped by feature in input order.
    pub errors: Vec<FeatureCheckError>,
    /// Gaps of the layer's polygon mosaic.
    pub gap_errors: Vec<CheckError>,
    /// Features that could not be checked. They must not be accepted into the dataset.
    pub geometry_errors: Vec<FeatureGeometryError>,
    /// Set when the gap check did not complete.
    pub gap_check_failed: Option<GapCheckFailure>,
}

impl LayerReport {
    /// All checks ran to completion.
    pub fn is_conclusive(&self) -> bool {
        self.gap_check_failed.is_none()
    }

    /// The layer is clean. An inconclusive report never passes.
    pub fn passed(&self) -> bool {
        self.is_conclusive()
            && self.errors.is_empty()
            && self.gap_errors.is_empty()
            && self.geometry_errors.is_empty()
    }

    /// Number of topology defects of all kinds.
    pub fn error_count(&self) -> usize {
        self.errors.len() + self.gap_errors.len()
    }
}

/// Runs every check over a layer.
///
/// Self-intersection, overlap and containment run per feature on the rayon thread pool, using a [`CandidateIndex`]
/// to find the features each one has to be compared with. The gap check runs once for the whole layer, in parallel
/// with them. Results are merged in feature order, so the report does not depend on scheduling.
///
/// An overlap between two features is reported once, for the feature that comes first in the input.
#[derive(Debug, Clone)]
pub struct LayerChecker<A = GeoAlgebra> {
    config: ToleranceConfig,
    algebra: A,
}

impl Default for LayerChecker {
    fn default() -> Self {
        Self::new(ToleranceConfig::default(), GeoAlgebra)
    }
}

impl<A: PolygonAlgebra> LayerChecker<A> {
    /// Creates a new checker.
    pub fn new(config: ToleranceConfig, algebra: A) -> Self {
        Self { config, algebra }
    }

    /// Tolerances used by the checker.
    pub fn config(&self) -> &ToleranceConfig {
        &self.config
    }

    /// Checks all features of the layer.
    pub fn check(&self, features: &[Feature]) -> LayerReport {
        debug!("Checking layer of {} features", features.len());

        let index = CandidateIndex::new(features, self.config.tolerance);
        let (per_feature, gaps) = rayon::join(
            || {
                features
                    .par_iter()
                    .enumerate()
                    .map(|(i, feature)| self.check_feature(features, &index, i, feature))
                    .collect::<Vec<_>>()
            },
            || check_gaps(features, &self.config, &self.algebra),
        );

        let mut report = LayerReport {
            gap_errors: gaps.errors,
            gap_check_failed: gaps.failure,
            ..Default::default()
        };

        for (feature, result) in features.iter().zip(per_feature) {
            match result {
                Ok(errors) => report
                    .errors
                    .extend(errors.into_iter().map(|error| FeatureCheckError {
                        feature_id: feature.id.clone(),
                        error,
                    })),
                Err(error) => report
                    .geometry_errors
                    .push(FeatureGeometryError::new(&feature.id, error)),
            }
        }

        info!(
            "Layer check done: {} errors, {} invalid features, conclusive: {}",
            report.error_count(),
            report.geometry_errors.len(),
            report.is_conclusive()
        );

        report
    }

    fn check_feature(
        &self,
        features: &[Feature],
        index: &CandidateIndex,
        position: usize,
        feature: &Feature,
    ) -> Result<Vec<CheckError>, GeometryError> {
        feature.geometry.validate()?;

        let mut errors = check_self_intersections(&feature.geometry, &self.config);

        let candidates = index.candidates_of(features, position);
        let overlaps = check_overlaps(
            feature,
            candidates
                .iter()
                .filter(|&&i| i > position)
                .map(|&i| &features[i]),
            &self.config,
            &self.algebra,
        );
        errors.extend(overlaps.errors);

        let containment = check_containment(
            feature,
            candidates.iter().map(|&i| &features[i]),
            &self.config,
            &self.algebra,
        );
        errors.extend(containment.errors);

        Ok(errors)
    }
}
