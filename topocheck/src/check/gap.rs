use std::collections::HashMap;

use log::{debug, error, info, warn};
use rstar::RTree;
use topocheck_types::{BoundingBox, MultiPolygon, Polygon, Ring};

use super::{FeatureGeometryError, GapOutcome};
use crate::algebra::PolygonAlgebra;
use crate::check_error::CheckError;
use crate::config::ToleranceConfig;
use crate::error::GapCheckFailure;
use crate::feature::Feature;
use crate::index::{envelope, IndexedBox};

/// Finds regions fully enclosed by the areal features of a layer but covered by none of them.
///
/// Features are grouped into clusters of boxes that touch within the tolerance. Each cluster is unioned and the union
/// is subtracted from a rectangle slightly larger than the cluster's bounding box. Every resulting polygon that does
/// not reach the rectangle's border is a hole in the mosaic and is reported if its area is above the gap threshold.
///
/// Structurally invalid features are left out of the mosaic and listed in [`GapOutcome::invalid_features`]. Points
/// and lines are ignored, so a layer without any polygon has no gaps. The outcome carries a [`GapCheckFailure`] and
/// no errors when the layer is empty, when every polygon of it is invalid, or when the algebra backend fails.
///
/// Errors are ordered by the lower-left corner of the gap's bounding box, so the same layer always produces the
/// same list.
pub fn check_gaps<A>(
    features: &[Feature],
    config: &ToleranceConfig,
    algebra: &A,
) -> GapOutcome
where
    A: PolygonAlgebra + ?Sized,
{
    let mut invalid_features = vec![];
    let mut areas = vec![];
    let mut has_areal = false;
    for feature in features {
        has_areal |= feature.geometry.is_areal();
        if let Err(err) = feature.geometry.validate() {
            warn!("Feature {} is left out of gap check: {err}", feature.id);
            invalid_features.push(FeatureGeometryError::new(&feature.id, err));
            continue;
        }

        let Some(area) = feature.geometry.as_area() else {
            continue;
        };
        let Some(bbox) = area.bounding_box() else {
            continue;
        };

        areas.push(AreaEntry { area, bbox });
    }

    if features.is_empty() || (has_areal && areas.is_empty()) {
        info!("Gap check has no polygon features to work with");
        return GapOutcome::failed(GapCheckFailure::EmptyInput, invalid_features);
    }

    if areas.is_empty() {
        info!("Layer has no polygon features, nothing to check for gaps");
        return GapOutcome {
            invalid_features,
            ..Default::default()
        };
    }

    match find_gaps(areas, config, algebra) {
        Ok(errors) => GapOutcome {
            errors,
            invalid_features,
            failure: None,
        },
        Err(failure) => {
            error!("Gap check failed: {failure}");
            GapOutcome::failed(failure, invalid_features)
        }
    }
}

struct AreaEntry {
    area: MultiPolygon,
    bbox: BoundingBox,
}

fn find_gaps<A>(
    mut areas: Vec<AreaEntry>,
    config: &ToleranceConfig,
    algebra: &A,
) -> Result<Vec<CheckError>, GapCheckFailure>
where
    A: PolygonAlgebra + ?Sized,
{
    let tolerance = config.tolerance;
    let margin = tolerance.max(1e-9) * 10.0;

    let boxes: Vec<BoundingBox> = areas.iter().map(|a| a.bbox).collect();
    let clusters = clusters(&boxes, tolerance);
    info!(
        "Searching gaps among {} polygon features in {} clusters",
        areas.len(),
        clusters.len()
    );

    let mut errors = vec![];
    for members in clusters {
        let Some(cluster_box) = BoundingBox::union_all(members.iter().map(|&i| boxes[i])) else {
            continue;
        };

        let parts = members
            .iter()
            .map(|&i| std::mem::take(&mut areas[i].area))
            .collect();
        let union = algebra.union_all(parts)?;

        let hull_box = cluster_box.expand(margin);
        let hull = MultiPolygon::from(Polygon::from(Ring::new(
            hull_box.into_quadrangle().to_vec(),
        )));
        let uncovered = algebra.difference(&hull, &union)?;

        let inner_box = cluster_box.expand(tolerance);
        for polygon in uncovered.into_polygons() {
            let Some(gap_bbox) = polygon.bounding_box() else {
                continue;
            };
            if !inner_box.contains_box(&gap_bbox) {
                // Region outside of the mosaic.
                continue;
            }

            let gap = MultiPolygon::from(polygon);
            let gap_area = algebra.area(&gap);
            if gap_area <= config.area_noise_floor() || gap_area <= config.gap_threshold {
                continue;
            }

            let error_location = algebra
                .point_on_surface(&gap)
                .unwrap_or_else(|| gap_bbox.center());
            debug!(
                "Gap of area {gap_area} at {:?}",
                error_location.coords()
            );

            errors.push(CheckError::Gap {
                error_location,
                gap_area,
                gap_bbox,
                gap_area_bbox: cluster_box.union(&gap_bbox),
            });
        }
    }

    errors.sort_by(|a, b| {
        let (a, b) = (gap_corner(a), gap_corner(b));
        a[0].total_cmp(&b[0]).then(a[1].total_cmp(&b[1]))
    });

    Ok(errors)
}

fn gap_corner(error: &CheckError) -> [f64; 2] {
    match error {
        CheckError::Gap { gap_bbox, .. } => gap_bbox.min().coords(),
        _ => [f64::NAN; 2],
    }
}

/// Groups boxes that touch each other within the tolerance, directly or through other boxes.
///
/// Members of a cluster are sorted; clusters are ordered by their first member.
fn clusters(boxes: &[BoundingBox], tolerance: f64) -> Vec<Vec<usize>> {
    let tree = RTree::bulk_load(
        boxes
            .iter()
            .enumerate()
            .map(|(i, bbox)| IndexedBox::new(i, bbox))
            .collect(),
    );

    let mut parents: Vec<usize> = (0..boxes.len()).collect();
    for (i, bbox) in boxes.iter().enumerate() {
        for other in tree.locate_in_envelope_intersecting(&envelope(bbox, tolerance)) {
            let a = find_root(&mut parents, i);
            let b = find_root(&mut parents, other.idx);
            if a != b {
                parents[a.max(b)] = a.min(b);
            }
        }
    }

    let mut cluster_of_root = HashMap::new();
    let mut clusters: Vec<Vec<usize>> = vec![];
    for i in 0..boxes.len() {
        let root = find_root(&mut parents, i);
        let cluster = *cluster_of_root.entry(root).or_insert_with(|| {
            clusters.push(vec![]);
            clusters.len() - 1
        });
        clusters[cluster].push(i);
    }

    clusters
}

fn find_root(parents: &mut [usize], mut i: usize) -> usize {
    while parents[i] != i {
        parents[i] = parents[parents[i]];
        i = parents[i];
    }

    i
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::algebra::GeoAlgebra;
    use approx::assert_abs_diff_eq;
    use assert_matches::assert_matches;
    use topocheck_types::{Geom, LineString, Vector2d};

    fn v(x: f64, y: f64) -> Vector2d {
        Vector2d::new(x, y).expect("finite")
    }

    fn rect(id: &str, x1: f64, y1: f64, x2: f64, y2: f64) -> Feature {
        Feature::new(
            id,
            Polygon::from(Ring::new(vec![v(x1, y1), v(x2, y1), v(x2, y2), v(x1, y2)])),
        )
    }

    fn bbox(x1: f64, y1: f64, x2: f64, y2: f64) -> BoundingBox {
        BoundingBox::new(x1, y1, x2, y2).expect("finite")
    }

    /// Four rectangles framing the unit square at (1, 1).
    fn frame(x: f64, y: f64) -> Vec<Feature> {
        vec![
            rect("bottom", x, y, x + 3.0, y + 1.0),
            rect("top", x, y + 2.0, x + 3.0, y + 3.0),
            rect("left", x, y + 1.0, x + 1.0, y + 2.0),
            rect("right", x + 2.0, y + 1.0, x + 3.0, y + 2.0),
        ]
    }

    #[test]
    fn enclosed_hole_is_a_gap() {
        let outcome = check_gaps(&frame(0.0, 0.0), &ToleranceConfig::default(), &GeoAlgebra);
        assert!(!outcome.check_error_flag());
        assert!(outcome.invalid_features.is_empty());
        assert_eq!(outcome.errors.len(), 1);

        let CheckError::Gap {
            error_location,
            gap_area,
            gap_bbox,
            gap_area_bbox,
        } = &outcome.errors[0]
        else {
            panic!("expected gap, got {:?}", outcome.errors[0]);
        };
        assert_abs_diff_eq!(*gap_area, 1.0, epsilon = 1e-9);
        assert!(gap_bbox.eq_on_grid(&bbox(1.0, 1.0, 2.0, 2.0), 1e-6));
        assert!(gap_area_bbox.eq_on_grid(&bbox(0.0, 0.0, 3.0, 3.0), 1e-6));
        assert!(gap_area_bbox.contains_box(gap_bbox));
        assert!(gap_bbox.contains(error_location));
    }

    #[test]
    fn small_gap_is_ignored() {
        let config = ToleranceConfig::default().with_gap_threshold(1.5);
        let outcome = check_gaps(&frame(0.0, 0.0), &config, &GeoAlgebra);
        assert!(!outcome.check_error_flag());
        assert!(outcome.errors.is_empty());
    }

    #[test]
    fn tiling_has_no_gaps() {
        let features = vec![
            rect("a", 0.0, 0.0, 1.0, 1.0),
            rect("b", 1.0, 0.0, 2.0, 1.0),
            rect("c", 0.0, 1.0, 1.0, 2.0),
            rect("d", 1.0, 1.0, 2.0, 2.0),
        ];

        let outcome = check_gaps(&features, &ToleranceConfig::default(), &GeoAlgebra);
        assert!(!outcome.check_error_flag());
        assert!(outcome.errors.is_empty());
    }

    #[test]
    fn open_notch_is_not_a_gap() {
        let features = vec![
            rect("left", 0.0, 0.0, 1.0, 3.0),
            rect("bottom", 1.0, 0.0, 2.0, 1.0),
            rect("right", 2.0, 0.0, 3.0, 3.0),
        ];

        let outcome = check_gaps(&features, &ToleranceConfig::default(), &GeoAlgebra);
        assert!(outcome.errors.is_empty());
    }

    #[test]
    fn gaps_are_sorted() {
        let mut features = frame(10.0, 0.0);
        features.extend(frame(0.0, 5.0));

        let outcome = check_gaps(&features, &ToleranceConfig::default(), &GeoAlgebra);
        assert_eq!(outcome.errors.len(), 2);
        let corners: Vec<[f64; 2]> = outcome.errors.iter().map(gap_corner).collect();
        assert_abs_diff_eq!(corners[0][0], 1.0, epsilon = 1e-9);
        assert_abs_diff_eq!(corners[1][0], 11.0, epsilon = 1e-9);

        let CheckError::Gap { gap_area_bbox, .. } = &outcome.errors[1] else {
            panic!("expected gap");
        };
        assert!(gap_area_bbox.eq_on_grid(&bbox(10.0, 0.0, 13.0, 3.0), 1e-6));
    }

    #[test]
    fn repeated_runs_agree() {
        let features = frame(0.0, 0.0);
        let config = ToleranceConfig::default();

        let first = check_gaps(&features, &config, &GeoAlgebra);
        let second = check_gaps(&features, &config, &GeoAlgebra);
        assert_eq!(first.errors.len(), second.errors.len());
        for (a, b) in first.errors.iter().zip(&second.errors) {
            let (
                CheckError::Gap {
                    gap_bbox: a_bbox,
                    gap_area: a_area,
                    ..
                },
                CheckError::Gap {
                    gap_bbox: b_bbox,
                    gap_area: b_area,
                    ..
                },
            ) = (a, b)
            else {
                panic!("expected gaps");
            };
            assert!(a_bbox.eq_on_grid(b_bbox, 1e-6));
            assert_abs_diff_eq!(*a_area, *b_area, epsilon = 1e-9);
        }
    }

    #[test]
    fn invalid_features_are_excluded() {
        let mut features = frame(0.0, 0.0);
        features.push(Feature::new(
            "broken",
            Polygon::from(Ring::new(vec![v(1.2, 1.2), v(1.8, 1.8)])),
        ));

        let outcome = check_gaps(&features, &ToleranceConfig::default(), &GeoAlgebra);
        assert!(!outcome.check_error_flag());
        assert_eq!(outcome.errors.len(), 1);
        assert_eq!(outcome.invalid_features.len(), 1);
        assert_eq!(outcome.invalid_features[0].feature_id, "broken");
    }

    #[test]
    fn layer_without_polygons_has_no_gaps() {
        let features = vec![
            Feature::new("p", v(0.0, 0.0)),
            Feature::new("l", LineString::new(vec![v(0.0, 0.0), v(1.0, 1.0)])),
            Feature::new("empty", Geom::MultiPoint(vec![])),
        ];

        let outcome = check_gaps(&features, &ToleranceConfig::default(), &GeoAlgebra);
        assert!(!outcome.check_error_flag());
        assert!(outcome.errors.is_empty());
        assert_eq!(outcome.invalid_features.len(), 1);
    }

    #[test]
    fn no_valid_polygons_is_a_failure() {
        let outcome = check_gaps(&[], &ToleranceConfig::default(), &GeoAlgebra);
        assert_matches!(outcome.failure, Some(GapCheckFailure::EmptyInput));

        let features = vec![
            Feature::new("p", v(0.0, 0.0)),
            Feature::new(
                "broken",
                Polygon::from(Ring::new(vec![v(0.0, 0.0), v(1.0, 1.0)])),
            ),
        ];
        let outcome = check_gaps(&features, &ToleranceConfig::default(), &GeoAlgebra);
        assert!(outcome.check_error_flag());
        assert_matches!(outcome.failure, Some(GapCheckFailure::EmptyInput));
        assert!(outcome.errors.is_empty());
        assert_eq!(outcome.invalid_features.len(), 1);
    }

    #[test]
    fn cluster_grouping() {
        let boxes = vec![
            bbox(0.0, 0.0, 1.0, 1.0),
            bbox(5.0, 5.0, 6.0, 6.0),
            bbox(2.0, 0.0, 3.0, 1.0),
            bbox(1.0, 0.0, 2.0, 1.0),
            bbox(6.00001, 5.0, 7.0, 6.0),
        ];

        assert_eq!(clusters(&boxes, 1e-4), vec![vec![0, 2, 3], vec![1, 4]]);
        assert_eq!(
            clusters(&boxes, 0.0),
            vec![vec![0, 2, 3], vec![1], vec![4]]
        );
    }
}
