//! Contour is a sequence of points.
//!
//! Contours can be:
//! * **open** - the first and the last points of the contour are not connected. A [`LineString`] is an open
//!   contour.
//! * **closed** - the first and the last points of the contour are connected. A [`Ring`] is a closed contour and
//!   every polygon boundary loop is a ring.
//!
//! # Contour vs OGC LineString
//!
//! In the OGC Simple Feature Access standard a `LineString` is considered to be closed when the first and the last
//! points in the sequence are exactly same. A [`Ring`] accepts that form on construction but does not store the
//! duplicated closing vertex: the segment between the last and the first stored points is produced by
//! [`Contour::iter_points_closing`] and [`Contour::iter_segments`] instead. Thanks to that, edge `i` of a ring always
//! runs from vertex `i` to vertex `i + 1 (mod n)`.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use crate::bounding_rect::BoundingBox;
use crate::segment::Segment;
use crate::vec::Vector2d;

/// Sequence of points. See module level documentation for details.
pub trait Contour {
    /// Whether the contour is closed.
    ///
    /// A closed contour has a segment connecting the last and the first points.
    fn is_closed(&self) -> bool;

    /// Iterate over the points of the contour.
    ///
    /// The last point is not the same as the first one even for the closed contours. If you want to include the first
    /// point at the end of iterator for closed contours, use [`Contour::iter_points_closing`] instead.
    fn iter_points(&self) -> impl Iterator<Item = &'_ Vector2d>;

    /// Same as [`Contour::iter_points`] but for closed contours repeats the first point again at the end of the
    /// iterator.
    fn iter_points_closing(&self) -> impl Iterator<Item = &'_ Vector2d> {
        ContourPointsIterator::new(self.iter_points(), self.is_closed())
    }

    /// Iterates over segments of the contour. For closed contours this includes the segment between the last and the
    /// first points of the contour.
    fn iter_segments(&self) -> impl Iterator<Item = Segment<'_>> {
        ContourSegmentIterator::new(ContourPointsIterator::new(
            self.iter_points(),
            self.is_closed(),
        ))
    }

    /// Squared distance from the point to the closest segment of the contour. `None` for contours without
    /// segments.
    fn distance_to_point_sq(&self, point: &Vector2d) -> Option<f64> {
        self.iter_segments()
            .map(|s| s.distance_to_point_sq(point))
            .min_by(|a, b| a.partial_cmp(b).unwrap_or(Ordering::Equal))
    }

    /// Bounding box of all points of the contour.
    fn bounding_box(&self) -> Option<BoundingBox> {
        BoundingBox::from_points(self.iter_points())
    }

    /// Number of vertices left after collapsing runs of equal consecutive points.
    fn distinct_vertex_count(&self) -> usize {
        let mut count = 0;
        let mut prev: Option<&Vector2d> = None;
        let mut first: Option<&Vector2d> = None;
        for p in self.iter_points() {
            if prev != Some(p) {
                count += 1;
            }
            if first.is_none() {
                first = Some(p);
            }
            prev = Some(p);
        }

        if self.is_closed() && count > 1 && first == prev {
            count -= 1;
        }

        count
    }
}

/// Iterator of contour points.
#[derive(Debug, Clone)]
pub struct ContourPointsIterator<'a, Iter>
where
    Iter: Iterator<Item = &'a Vector2d>,
{
    points_iter: Iter,
    is_closed: bool,
    first_point: Option<&'a Vector2d>,
}

impl<'a, Iter> ContourPointsIterator<'a, Iter>
where
    Iter: Iterator<Item = &'a Vector2d>,
{
    fn new(points_iter: Iter, is_closed: bool) -> Self {
        Self {
            points_iter,
            is_closed,
            first_point: None,
        }
    }
}

impl<'a, Iter> Iterator for ContourPointsIterator<'a, Iter>
where
    Iter: Iterator<Item = &'a Vector2d>,
{
    type Item = &'a Vector2d;

    fn next(&mut self) -> Option<Self::Item> {
        let next = self.points_iter.next();
        if self.is_closed && self.first_point.is_none() {
            self.first_point = next;
        }

        if next.is_none() {
            self.first_point.take()
        } else {
            next
        }
    }
}

/// Iterator of contour segments.
#[derive(Debug, Clone)]
pub struct ContourSegmentIterator<'a, Iter>
where
    Iter: Iterator<Item = &'a Vector2d>,
{
    points_iter: ContourPointsIterator<'a, Iter>,
    prev_point: Option<&'a Vector2d>,
}

impl<'a, Iter> ContourSegmentIterator<'a, Iter>
where
    Iter: Iterator<Item = &'a Vector2d>,
{
    fn new(points_iter: ContourPointsIterator<'a, Iter>) -> Self {
        Self {
            points_iter,
            prev_point: None,
        }
    }
}

impl<'a, Iter> Iterator for ContourSegmentIterator<'a, Iter>
where
    Iter: Iterator<Item = &'a Vector2d>,
{
    type Item = Segment<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let next_point = self.points_iter.next()?;
            if let Some(prev) = self.prev_point.replace(next_point) {
                return Some(Segment(prev, next_point));
            }
        }
    }
}

/// Closed boundary loop of a polygon.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "Vec<Vector2d>", into = "Vec<Vector2d>")]
pub struct Ring {
    points: Vec<Vector2d>,
}

impl Ring {
    /// Creates a new ring. If the first and the last points are equal, the last one is dropped.
    pub fn new(mut points: Vec<Vector2d>) -> Self {
        if points.len() > 1 && points.first() == points.last() {
            points.pop();
        }

        Self { points }
    }

    /// Vertices of the ring, without the closing duplicate.
    pub fn points(&self) -> &[Vector2d] {
        &self.points
    }

    /// Number of stored vertices, which is also the number of edges.
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Ring has no vertices.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Signed area of the ring. Positive for counterclockwise rings.
    pub fn area_signed(&self) -> f64 {
        let mut iter = self.iter_points_closing();
        let Some(mut prev) = iter.next() else {
            return 0.0;
        };

        let mut aggr = 0.0;
        for p in iter {
            aggr += prev.cross(p);
            prev = p;
        }

        aggr / 2.0
    }

    /// Winding direction of the ring.
    pub fn winding(&self) -> Winding {
        if self.area_signed() <= 0.0 {
            Winding::Clockwise
        } else {
            Winding::CounterClockwise
        }
    }
}

impl Contour for Ring {
    fn is_closed(&self) -> bool {
        true
    }

    fn iter_points(&self) -> impl Iterator<Item = &'_ Vector2d> {
        self.points.iter()
    }
}

impl From<Vec<Vector2d>> for Ring {
    fn from(value: Vec<Vector2d>) -> Self {
        Self::new(value)
    }
}

impl From<Ring> for Vec<Vector2d> {
    fn from(value: Ring) -> Self {
        value.points
    }
}

/// Winding direction of a ring.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum Winding {
    /// Clockwise
    Clockwise,
    /// Counterclockwise
    CounterClockwise,
}

/// Open sequence of connected segments.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LineString {
    points: Vec<Vector2d>,
}

impl LineString {
    /// Creates a new line string.
    pub fn new(points: Vec<Vector2d>) -> Self {
        Self { points }
    }

    /// Vertices of the line.
    pub fn points(&self) -> &[Vector2d] {
        &self.points
    }

    /// Number of vertices.
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Line has no vertices.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

impl Contour for LineString {
    fn is_closed(&self) -> bool {
        false
    }

    fn iter_points(&self) -> impl Iterator<Item = &'_ Vector2d> {
        self.points.iter()
    }
}

impl From<Vec<Vector2d>> for LineString {
    fn from(value: Vec<Vector2d>) -> Self {
        Self::new(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn v(x: f64, y: f64) -> Vector2d {
        Vector2d::new(x, y).expect("finite")
    }

    #[test]
    fn ring_drops_closing_point() {
        let ring = Ring::new(vec![v(0.0, 0.0), v(1.0, 0.0), v(1.0, 1.0), v(0.0, 0.0)]);
        assert_eq!(ring.len(), 3);
        assert_eq!(ring, Ring::new(vec![v(0.0, 0.0), v(1.0, 0.0), v(1.0, 1.0)]));
    }

    #[test]
    fn iter_points_closing() {
        let line = LineString::new(vec![v(0.0, 0.0), v(1.0, 1.0)]);
        assert_eq!(line.iter_points_closing().count(), 2);
        assert_eq!(*line.iter_points_closing().last().unwrap(), v(1.0, 1.0));

        let ring = Ring::new(vec![v(0.0, 0.0), v(1.0, 1.0)]);
        assert_eq!(ring.iter_points_closing().count(), 3);
        assert_eq!(*ring.iter_points_closing().last().unwrap(), v(0.0, 0.0));
    }

    #[test]
    fn iter_segments() {
        let line = LineString::new(vec![v(0.0, 0.0)]);
        assert_eq!(line.iter_segments().count(), 0);

        let line = LineString::new(vec![v(0.0, 0.0), v(1.0, 1.0)]);
        assert_eq!(line.iter_segments().count(), 1);
        assert_eq!(
            line.iter_segments().last().unwrap(),
            Segment(&v(0.0, 0.0), &v(1.0, 1.0))
        );

        let ring = Ring::new(vec![v(0.0, 0.0), v(1.0, 1.0)]);
        assert_eq!(ring.iter_segments().count(), 2);
        assert_eq!(
            ring.iter_segments().last().unwrap(),
            Segment(&v(1.0, 1.0), &v(0.0, 0.0))
        );
    }

    #[test]
    fn distance_to_point() {
        let ring = Ring::new(vec![v(0.0, 0.0), v(1.0, 1.0), v(1.0, 0.0)]);

        assert_eq!(ring.distance_to_point_sq(&v(0.0, 0.0)), Some(0.0));
        assert_eq!(ring.distance_to_point_sq(&v(0.5, 0.0)), Some(0.0));
        assert_eq!(ring.distance_to_point_sq(&v(0.5, 0.5)), Some(0.0));
        assert_eq!(ring.distance_to_point_sq(&v(0.0, 1.0)), Some(0.5));
        assert_eq!(ring.distance_to_point_sq(&v(2.0, 2.0)), Some(2.0));
        assert_eq!(ring.distance_to_point_sq(&v(-2.0, -2.0)), Some(8.0));
        assert_eq!(Ring::default().distance_to_point_sq(&v(0.0, 0.0)), None);
    }

    #[test]
    fn area_and_winding() {
        let cw = Ring::new(vec![v(0.0, 0.0), v(0.0, 1.0), v(1.0, 0.0)]);
        assert_eq!(cw.area_signed(), -0.5);
        assert_eq!(cw.winding(), Winding::Clockwise);

        let ccw = Ring::new(vec![v(0.0, 0.0), v(1.0, 0.0), v(0.0, 1.0)]);
        assert_eq!(ccw.area_signed(), 0.5);
        assert_eq!(ccw.winding(), Winding::CounterClockwise);
    }

    #[test]
    fn distinct_vertices() {
        let ring = Ring::new(vec![v(0.0, 0.0), v(0.0, 0.0), v(1.0, 0.0), v(1.0, 0.0)]);
        assert_eq!(ring.distinct_vertex_count(), 2);

        let ring = Ring::new(vec![v(0.0, 0.0), v(1.0, 0.0), v(1.0, 1.0), v(0.0, 0.0)]);
        assert_eq!(ring.distinct_vertex_count(), 3);

        let line = LineString::new(vec![v(0.0, 0.0), v(0.0, 0.0)]);
        assert_eq!(line.distinct_vertex_count(), 1);
    }
}
