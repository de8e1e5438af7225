use log::debug;
use rstar::RTree;
use topocheck_types::{segment_intersection, BoundingBox, ContourRef, Geom, SegmentIntersection};

use crate::check_error::CheckError;
use crate::config::ToleranceConfig;
use crate::index::{envelope, IndexedBox};

/// Finds crossings between non-adjacent edges of every ring (or of the line) of the geometry.
///
/// Edges `i` and `i + 1` are adjacent, and so are the first and the last edges of a ring. Zero-length edges are
/// ignored. Only proper crossings are reported: edges that merely touch at a vertex are not an error here.
///
/// Errors are ordered by ring, then by edge pair.
pub fn check_self_intersections(geometry: &Geom, config: &ToleranceConfig) -> Vec<CheckError> {
    let mut errors = vec![];
    for (ring_index, contour) in geometry.iter_contours().enumerate() {
        check_contour(contour, ring_index as u32, config.tolerance, &mut errors);
    }

    if !errors.is_empty() {
        debug!("Found {} self-intersections", errors.len());
    }

    errors
}

fn check_contour(
    contour: ContourRef,
    ring_index: u32,
    tolerance: f64,
    errors: &mut Vec<CheckError>,
) {
    let points = contour.points();
    let edge_count = match (contour.is_closed(), points.len()) {
        (_, 0 | 1) => return,
        (true, n) => n,
        (false, n) => n - 1,
    };
    let edge = |i: usize| (&points[i], &points[(i + 1) % points.len()]);
    let adjacent = |i: usize, j: usize| {
        j == i + 1 || (contour.is_closed() && i == 0 && j == edge_count - 1)
    };

    let tree = RTree::bulk_load(
        (0..edge_count)
            .map(|i| {
                let (a, b) = edge(i);
                IndexedBox::new(i, &BoundingBox::from_corners(*a, *b))
            })
            .collect(),
    );

    let mut found = vec![];
    for i in 0..edge_count {
        let (a, b) = edge(i);
        if a.distance_sq(b) <= tolerance * tolerance {
            continue;
        }

        let search = envelope(&BoundingBox::from_corners(*a, *b), tolerance);
        for candidate in tree.locate_in_envelope_intersecting(&search) {
            let j = candidate.idx;
            if j <= i || adjacent(i, j) {
                continue;
            }

            let (c, d) = edge(j);
            if let SegmentIntersection::Crossing(location) =
                segment_intersection(a, b, c, d, tolerance, false)
            {
                found.push((i, j, location));
            }
        }
    }

    found.sort_by_key(|(i, j, _)| (*i, *j));
    errors.extend(
        found
            .into_iter()
            .map(|(i, j, location)| CheckError::SelfIntersection {
                location,
                ring_index,
                segment_a: i as u32,
                segment_b: j as u32,
            }),
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use topocheck_types::{LineString, MultiPolygon, Polygon, Ring, Vector2d};

    fn v(x: f64, y: f64) -> Vector2d {
        Vector2d::new(x, y).expect("finite")
    }

    fn ring(points: &[(f64, f64)]) -> Ring {
        Ring::new(points.iter().map(|&(x, y)| v(x, y)).collect())
    }

    #[test]
    fn bowtie_has_one_crossing() {
        let bowtie = Geom::from(Polygon::from(ring(&[
            (0.0, 0.0),
            (2.0, 2.0),
            (2.0, 0.0),
            (0.0, 2.0),
            (0.0, 0.0),
        ])));

        let errors = check_self_intersections(&bowtie, &ToleranceConfig::default());
        assert_eq!(
            errors,
            vec![CheckError::SelfIntersection {
                location: v(1.0, 1.0),
                ring_index: 0,
                segment_a: 0,
                segment_b: 2,
            }]
        );
    }

    #[test]
    fn convex_polygon_is_clean() {
        let polygon = Geom::from(Polygon::from(ring(&[
            (0.0, 0.0),
            (4.0, 0.0),
            (5.0, 3.0),
            (2.0, 5.0),
            (-1.0, 3.0),
        ])));

        assert!(check_self_intersections(&polygon, &ToleranceConfig::default()).is_empty());
    }

    #[test]
    fn concave_polygon_with_hole_is_clean() {
        let polygon = Geom::from(Polygon::new(
            ring(&[
                (0.0, 0.0),
                (10.0, 0.0),
                (10.0, 10.0),
                (5.0, 4.0),
                (0.0, 10.0),
            ]),
            vec![ring(&[(1.0, 1.0), (3.0, 1.0), (3.0, 2.0), (1.0, 2.0)])],
        ));

        assert!(check_self_intersections(&polygon, &ToleranceConfig::default()).is_empty());
    }

    #[test]
    fn vertex_touch_is_not_a_crossing() {
        // Two triangles sharing the vertex (2, 2) inside one ring.
        let polygon = Geom::from(Polygon::from(ring(&[
            (0.0, 0.0),
            (4.0, 0.0),
            (2.0, 2.0),
            (4.0, 4.0),
            (0.0, 4.0),
            (2.0, 2.0),
        ])));

        assert!(check_self_intersections(&polygon, &ToleranceConfig::default()).is_empty());
    }

    #[test]
    fn zero_length_edges_are_skipped() {
        let polygon = Geom::from(Polygon::from(ring(&[
            (0.0, 0.0),
            (4.0, 0.0),
            (4.0, 0.0),
            (4.0, 4.0),
            (0.0, 4.0),
        ])));

        assert!(check_self_intersections(&polygon, &ToleranceConfig::default()).is_empty());
    }

    #[test]
    fn crossing_in_hole_reports_ring_index() {
        let polygon = Polygon::new(
            ring(&[(0.0, 0.0), (10.0, 0.0), (10.0, 10.0), (0.0, 10.0)]),
            vec![ring(&[(2.0, 2.0), (4.0, 4.0), (4.0, 2.0), (2.0, 4.0)])],
        );
        let square = Polygon::from(ring(&[(20.0, 0.0), (21.0, 0.0), (21.0, 1.0), (20.0, 1.0)]));
        let geom = Geom::from(MultiPolygon::new(vec![square, polygon]));

        let errors = check_self_intersections(&geom, &ToleranceConfig::default());
        assert_eq!(errors.len(), 1);
        assert_matches!(
            errors[0],
            CheckError::SelfIntersection {
                ring_index: 2,
                segment_a: 0,
                segment_b: 2,
                ..
            }
        );
    }

    #[test]
    fn line_crossing_itself() {
        let line = Geom::from(LineString::new(vec![
            v(0.0, 0.0),
            v(4.0, 0.0),
            v(4.0, 4.0),
            v(2.0, -2.0),
        ]));

        let errors = check_self_intersections(&line, &ToleranceConfig::default());
        assert_eq!(errors.len(), 1);
        assert_matches!(
            errors[0],
            CheckError::SelfIntersection {
                ring_index: 0,
                segment_a: 0,
                segment_b: 2,
                ..
            }
        );
    }

    #[test]
    fn open_line_ends_are_not_adjacent() {
        // First and last edges of a line cross; for a ring they would be neighbours.
        let line = Geom::from(LineString::new(vec![
            v(0.0, 0.0),
            v(4.0, 0.0),
            v(4.0, 4.0),
            v(2.0, 4.0),
            v(2.0, -2.0),
        ]));

        let errors = check_self_intersections(&line, &ToleranceConfig::default());
        assert_eq!(errors.len(), 1);
        assert_matches!(
            errors[0],
            CheckError::SelfIntersection {
                segment_a: 0,
                segment_b: 3,
                ..
            }
        );
    }

    #[test]
    fn points_have_no_edges() {
        let geom = Geom::MultiPoint(vec![v(0.0, 0.0), v(0.0, 0.0)]);
        assert!(check_self_intersections(&geom, &ToleranceConfig::default()).is_empty());
    }
}
