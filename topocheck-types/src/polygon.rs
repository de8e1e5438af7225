use serde::{Deserialize, Serialize};

use crate::bounding_rect::BoundingBox;
use crate::contour::{Contour, Ring};
use crate::orient::Orientation;
use crate::segment::Segment;
use crate::vec::Vector2d;

/// Polygon geometry. Polygon consists of one exterior ring and zero or more interior rings (holes).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Polygon {
    exterior: Ring,
    interiors: Vec<Ring>,
}

impl Polygon {
    /// Creates a new polygon.
    pub fn new(exterior: Ring, interiors: Vec<Ring>) -> Self {
        Self {
            exterior,
            interiors,
        }
    }

    /// Outer boundary of the polygon.
    pub fn exterior(&self) -> &Ring {
        &self.exterior
    }

    /// Holes of the polygon.
    pub fn interiors(&self) -> &[Ring] {
        &self.interiors
    }

    /// Iterates over all rings of the polygon starting with the exterior one.
    pub fn iter_rings(&self) -> impl Iterator<Item = &'_ Ring> {
        std::iter::once(&self.exterior).chain(self.interiors.iter())
    }

    /// Iterates over all segments of all rings.
    pub fn iter_segments(&self) -> impl Iterator<Item = Segment<'_>> {
        self.iter_rings().flat_map(|r| r.iter_segments())
    }

    /// Unsigned area of the polygon, holes excluded.
    pub fn area(&self) -> f64 {
        let holes: f64 = self.interiors.iter().map(|r| r.area_signed().abs()).sum();
        (self.exterior.area_signed().abs() - holes).max(0.0)
    }

    /// Bounding box of the exterior ring.
    pub fn bounding_box(&self) -> Option<BoundingBox> {
        self.exterior.bounding_box()
    }

    /// Squared distance from the point to the closest ring of the polygon.
    pub fn boundary_distance_sq(&self, point: &Vector2d) -> Option<f64> {
        self.iter_rings()
            .filter_map(|r| r.distance_to_point_sq(point))
            .reduce(f64::min)
    }

    /// Returns true if the `point` lies inside or on one of the polygon's rings.
    pub fn contains_point(&self, point: &Vector2d) -> bool {
        if self.boundary_distance_sq(point) == Some(0.0) {
            return true;
        }

        winding_number(&self.exterior, point) != 0
            && self
                .interiors
                .iter()
                .all(|hole| winding_number(hole, point) == 0)
    }

    /// Returns true if the point lies inside the polygon and farther than `tolerance` from every ring.
    pub fn strictly_contains_point(&self, point: &Vector2d, tolerance: f64) -> bool {
        match self.boundary_distance_sq(point) {
            Some(d) if d > tolerance * tolerance => self.contains_point(point),
            _ => false,
        }
    }
}

impl From<Ring> for Polygon {
    fn from(value: Ring) -> Self {
        Self::new(value, vec![])
    }
}

/// Winding number of the ring around the point. Zero means the point is outside of the ring.
fn winding_number(ring: &Ring, point: &Vector2d) -> i32 {
    let mut wn = 0;
    for Segment(a, b) in ring.iter_segments() {
        if a.y() <= point.y() {
            if b.y() > point.y() && Orientation::triplet(a, b, point) == Orientation::Counterclockwise
            {
                wn += 1;
            }
        } else if b.y() <= point.y()
            && Orientation::triplet(a, b, point) == Orientation::Clockwise
        {
            wn -= 1;
        }
    }

    wn
}

/// Set of polygons treated as one areal geometry.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MultiPolygon {
    parts: Vec<Polygon>,
}

impl MultiPolygon {
    /// Creates a new multipolygon.
    pub fn new(parts: Vec<Polygon>) -> Self {
        Self { parts }
    }

    /// Member polygons.
    pub fn polygons(&self) -> &[Polygon] {
        &self.parts
    }

    /// Takes the member polygons out.
    pub fn into_polygons(self) -> Vec<Polygon> {
        self.parts
    }

    /// Has no member polygons.
    pub fn is_empty(&self) -> bool {
        self.parts.is_empty()
    }

    /// Iterates over rings of all member polygons.
    pub fn iter_rings(&self) -> impl Iterator<Item = &'_ Ring> {
        self.parts.iter().flat_map(Polygon::iter_rings)
    }

    /// Sum of member areas.
    pub fn area(&self) -> f64 {
        self.parts.iter().map(Polygon::area).sum()
    }

    /// Bounding box of all members.
    pub fn bounding_box(&self) -> Option<BoundingBox> {
        BoundingBox::union_all(self.parts.iter().filter_map(Polygon::bounding_box))
    }

    /// Point is inside or on the boundary of any member.
    pub fn contains_point(&self, point: &Vector2d) -> bool {
        self.parts.iter().any(|p| p.contains_point(point))
    }

    /// Point is inside a member and farther than `tolerance` from any ring.
    pub fn strictly_contains_point(&self, point: &Vector2d, tolerance: f64) -> bool {
        self.contains_point(point)
            && self
                .boundary_distance_sq(point)
                .is_some_and(|d| d > tolerance * tolerance)
    }

    /// Squared distance to the closest ring of any member.
    pub fn boundary_distance_sq(&self, point: &Vector2d) -> Option<f64> {
        self.parts
            .iter()
            .filter_map(|p| p.boundary_distance_sq(point))
            .reduce(f64::min)
    }
}

impl From<Polygon> for MultiPolygon {
    fn from(value: Polygon) -> Self {
        Self::new(vec![value])
    }
}

impl FromIterator<Polygon> for MultiPolygon {
    fn from_iter<T: IntoIterator<Item = Polygon>>(iter: T) -> Self {
        Self::new(iter.into_iter().collect())
    }
}
