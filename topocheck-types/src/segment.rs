//! Segment distance and segment-segment intersection under an epsilon tolerance.
//!
//! These two routines are the single source of truth for "do these two segments meet" questions across the
//! workspace. Endpoint slack is applied in parameter space: a parameter within `epsilon` of `0` or `1` is considered
//! to be at the segment end.

use serde::{Deserialize, Serialize};

use crate::vec::Vector2d;

/// Result of [`segment_intersection`].
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub enum SegmentIntersection {
    /// Segments have no point in common, are parallel, colinear, or one of them is degenerate.
    None,
    /// Segments meet at or near an endpoint of at least one of them.
    Touching {
        /// Contact point, computed on the first segment.
        point: Vector2d,
        /// Whether the contact is reported as a topological intersection. Only set when improper intersections
        /// are accepted by the caller.
        intersection: bool,
    },
    /// Segments cross through the interiors of both.
    Crossing(Vector2d),
}

impl SegmentIntersection {
    /// Segments share a point, whether or not it counts as an intersection.
    pub fn is_intersect(&self) -> bool {
        !matches!(self, SegmentIntersection::None)
    }

    /// Segments intersect in the topological sense: a proper crossing, or a touching contact accepted as an
    /// intersection.
    pub fn is_topological(&self) -> bool {
        match self {
            SegmentIntersection::None => false,
            SegmentIntersection::Touching { intersection, .. } => *intersection,
            SegmentIntersection::Crossing(_) => true,
        }
    }

    /// Contact point, if any.
    pub fn point(&self) -> Option<Vector2d> {
        match self {
            SegmentIntersection::None => None,
            SegmentIntersection::Touching { point, .. } => Some(*point),
            SegmentIntersection::Crossing(point) => Some(*point),
        }
    }
}

/// Closest point of the segment `a-b` to `p`.
///
/// Returns `(closest_x, closest_y, squared_distance)`. If `a` and `b` are within `epsilon` of each other the
/// segment is collapsed to `a`.
pub fn point_to_segment_distance(
    p: &Vector2d,
    a: &Vector2d,
    b: &Vector2d,
    epsilon: f64,
) -> (f64, f64, f64) {
    let ab = *b - *a;
    let len_sq = ab.length_sq();
    if len_sq <= epsilon * epsilon {
        return (a.x(), a.y(), p.distance_sq(a));
    }

    let t = ((*p - *a).dot(&ab) / len_sq).clamp(0.0, 1.0);
    let closest = *a + ab * t;
    (closest.x(), closest.y(), p.distance_sq(&closest))
}

/// Classifies the intersection of segments `p1-p2` and `p3-p4`.
///
/// * Degenerate segments, parallel segments and colinear segments (even overlapping ones) give
///   [`SegmentIntersection::None`].
/// * Interiors crossing gives [`SegmentIntersection::Crossing`] regardless of `accept_improper`.
/// * Contact at or near an endpoint gives [`SegmentIntersection::Touching`], with the `intersection` flag equal to
///   `accept_improper`.
pub fn segment_intersection(
    p1: &Vector2d,
    p2: &Vector2d,
    p3: &Vector2d,
    p4: &Vector2d,
    epsilon: f64,
    accept_improper: bool,
) -> SegmentIntersection {
    let d1 = *p2 - *p1;
    let d2 = *p4 - *p3;
    let eps_sq = epsilon * epsilon;
    if d1.length_sq() <= eps_sq || d2.length_sq() <= eps_sq {
        return SegmentIntersection::None;
    }

    let denom = d1.cross(&d2);
    if denom.abs() < epsilon {
        return SegmentIntersection::None;
    }

    let w = *p3 - *p1;
    let s = w.cross(&d2) / denom;
    let t = w.cross(&d1) / denom;

    let on_segment = |v: f64| v >= -epsilon && v <= 1.0 + epsilon;
    if !on_segment(s) || !on_segment(t) {
        return SegmentIntersection::None;
    }

    let point = *p1 + d1 * s;
    let interior = |v: f64| v > epsilon && v < 1.0 - epsilon;
    if interior(s) && interior(t) {
        SegmentIntersection::Crossing(point)
    } else {
        SegmentIntersection::Touching {
            point,
            intersection: accept_improper,
        }
    }
}

/// A straight line segment between two points.
#[derive(Debug, PartialEq)]
pub struct Segment<'a>(pub &'a Vector2d, pub &'a Vector2d);

impl Segment<'_> {
    /// Squared length of the segment.
    pub fn length_sq(&self) -> f64 {
        self.0.distance_sq(self.1)
    }

    /// The segment is shorter than `epsilon`.
    pub fn is_degenerate(&self, epsilon: f64) -> bool {
        self.length_sq() <= epsilon * epsilon
    }

    /// Shortest euclidean distance (squared) between a point and the segment:
    ///
    /// * if the normal from the point to the segment ends inside the segment, the returned value is the squared length
    ///   of the normal
    /// * if the normal from the point to the segment ends outside of the segment, the returned value is the smaller one
    ///   of the distances between the point and the segment's endpoints
    pub fn distance_to_point_sq(&self, point: &Vector2d) -> f64 {
        point_to_segment_distance(point, self.0, self.1, 0.0).2
    }

    /// Intersection with another segment, see [`segment_intersection`].
    pub fn intersection(
        &self,
        other: &Segment,
        epsilon: f64,
        accept_improper: bool,
    ) -> SegmentIntersection {
        segment_intersection(self.0, self.1, other.0, other.1, epsilon, accept_improper)
    }
}
