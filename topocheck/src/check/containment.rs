use log::{debug, warn};
use topocheck_types::{
    segment_intersection, Contour, Geom, GeometryError, LineString, MultiPolygon, Vector2d,
};

use super::{CheckOutcome, FeatureGeometryError};
use crate::algebra::PolygonAlgebra;
use crate::check_error::{CheckError, ContainmentKind};
use crate::config::ToleranceConfig;
use crate::feature::Feature;

/// Reports the candidates whose area encloses `feature`.
///
/// * A point is contained if it lies inside a candidate polygon farther than the tolerance from its boundary.
/// * A multipoint is fully contained if all its points are, and partially if only some are.
/// * A line is contained if every part of it lies inside or on the boundary of a candidate polygon, and at least
///   part of it is away from the boundary. Lines leaving the polygon, even through a vertex, are not reported.
/// * A polygon is contained if no part of it remains after subtracting the candidate.
///
/// Only areal candidates can contain anything. Boundary touches are never reported. Invalid candidates are skipped
/// and listed in [`CheckOutcome::invalid_candidates`].
pub fn check_containment<'a, A>(
    feature: &Feature,
    candidates: impl IntoIterator<Item = &'a Feature>,
    config: &ToleranceConfig,
    algebra: &A,
) -> CheckOutcome
where
    A: PolygonAlgebra + ?Sized,
{
    if let Err(err) = feature.geometry.validate() {
        warn!("Feature {} is invalid, containment check skipped: {err}", feature.id);
        return CheckOutcome::invalid_input(err);
    }

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

        let Some(container) = candidate.geometry.as_area() else {
            continue;
        };

        match containment_kind(&feature.geometry, &container, config, algebra) {
            Ok(Some(containment_kind)) => {
                debug!(
                    "Feature {} is contained in {} ({containment_kind:?})",
                    feature.id, candidate.id
                );
                outcome.errors.push(CheckError::Containment {
                    other_feature_id: candidate.id.clone(),
                    containment_kind,
                });
            }
            Ok(None) => {}
            Err(err) => {
                warn!(
                    "Failed to test containment of {} in {}: {err}",
                    feature.id, candidate.id
                );
                outcome
                    .invalid_candidates
                    .push(FeatureGeometryError::new(&candidate.id, err));
            }
        }
    }

    outcome
}

fn containment_kind<A>(
    geometry: &Geom,
    container: &MultiPolygon,
    config: &ToleranceConfig,
    algebra: &A,
) -> Result<Option<ContainmentKind>, GeometryError>
where
    A: PolygonAlgebra + ?Sized,
{
    let tolerance = config.tolerance;
    let kind = match geometry {
        Geom::Point(point) => container
            .strictly_contains_point(point, tolerance)
            .then_some(ContainmentKind::FullyContains),
        Geom::MultiPoint(points) => {
            let inside = points
                .iter()
                .filter(|p| container.strictly_contains_point(p, tolerance))
                .count();
            match inside {
                0 => None,
                n if n == points.len() => Some(ContainmentKind::FullyContains),
                _ => Some(ContainmentKind::PartiallyContains),
            }
        }
        Geom::Line(line) => line_is_within(line, container, tolerance)
            .then_some(ContainmentKind::FullyContains),
        Geom::Polygon(_) | Geom::MultiPolygon(_) => {
            let Some(area) = geometry.as_area() else {
                return Ok(None);
            };
            let (Some(bbox), Some(container_bbox)) = (area.bounding_box(), container.bounding_box())
            else {
                return Ok(None);
            };
            if !container_bbox.expand(tolerance).contains_box(&bbox) {
                return Ok(None);
            }

            let outside = algebra.difference(&area, container)?;
            (algebra.area(&outside) <= config.area_noise_floor())
                .then_some(ContainmentKind::FullyContains)
        }
    };

    Ok(kind)
}

/// Splits every line segment at its contacts with the container's rings. Between two consecutive contacts the
/// segment is either entirely inside or entirely outside, so one sample per piece decides it.
fn line_is_within(line: &LineString, container: &MultiPolygon, tolerance: f64) -> bool {
    let tolerance_sq = tolerance * tolerance;
    let covers = |p: &Vector2d| {
        container.contains_point(p)
            || container
                .boundary_distance_sq(p)
                .is_some_and(|d| d <= tolerance_sq)
    };

    let mut any_inside = line
        .points()
        .iter()
        .any(|p| container.strictly_contains_point(p, tolerance));

    for segment in line.iter_segments() {
        let (a, b) = (segment.0, segment.1);
        if segment.is_degenerate(tolerance) {
            if !covers(a) {
                return false;
            }
            continue;
        }

        let direction = *b - *a;
        let length_sq = direction.length_sq();
        let param = |p: &Vector2d| ((*p - *a).dot(&direction) / length_sq).clamp(0.0, 1.0);

        let mut params = vec![0.0, 1.0];
        for ring in container.iter_rings() {
            for edge in ring.iter_segments() {
                let contact = segment_intersection(a, b, edge.0, edge.1, tolerance, true);
                if let Some(point) = contact.point() {
                    params.push(param(&point));
                }
            }

            // Colinear runs along an edge give no contact point, their ends are ring vertices.
            params.extend(
                ring.points()
                    .iter()
                    .filter(|v| segment.distance_to_point_sq(v) <= tolerance_sq)
                    .map(param),
            );
        }

        params.sort_by(f64::total_cmp);
        params.dedup();

        for piece in params.windows(2) {
            let sample = a.lerp(b, (piece[0] + piece[1]) / 2.0);
            if !covers(&sample) {
                return false;
            }
            any_inside = any_inside || container.strictly_contains_point(&sample, tolerance);
        }
    }

    any_inside
}
