use serde::{Deserialize, Serialize};

use crate::bounding_rect::BoundingBox;
use crate::contour::{Contour, LineString, Ring};
use crate::error::GeometryError;
use crate::polygon::{MultiPolygon, Polygon};
use crate::vec::Vector2d;

/// Any geometry a feature can carry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "coordinates")]
pub enum Geom {
    /// Single point.
    Point(Vector2d),
    /// Set of points.
    MultiPoint(Vec<Vector2d>),
    /// Open line.
    Line(LineString),
    /// Polygon.
    Polygon(Polygon),
    /// Set of polygons.
    MultiPolygon(MultiPolygon),
}

/// A contour of a geometry, borrowed.
#[derive(Debug, Clone, Copy)]
pub enum ContourRef<'a> {
    /// Polygon boundary loop.
    Ring(&'a Ring),
    /// Line geometry.
    Line(&'a LineString),
}

impl<'a> ContourRef<'a> {
    /// Number of points stored in the contour.
    pub fn len(&self) -> usize {
        match self {
            ContourRef::Ring(r) => r.len(),
            ContourRef::Line(l) => l.len(),
        }
    }

    /// Contour has no points.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Whether the contour is closed.
    pub fn is_closed(&self) -> bool {
        matches!(self, ContourRef::Ring(_))
    }

    /// Stored points.
    pub fn points(&self) -> &'a [Vector2d] {
        match self {
            ContourRef::Ring(r) => r.points(),
            ContourRef::Line(l) => l.points(),
        }
    }
}

impl Geom {
    /// Iterates over contours that have edges: all rings of areal geometries, or the line itself.
    ///
    /// Rings are enumerated exterior first, then holes, polygon by polygon.
    pub fn iter_contours(&self) -> Box<dyn Iterator<Item = ContourRef<'_>> + '_> {
        match self {
            Geom::Point(_) | Geom::MultiPoint(_) => Box::new(std::iter::empty()),
            Geom::Line(line) => Box::new(std::iter::once(ContourRef::Line(line))),
            Geom::Polygon(polygon) => Box::new(polygon.iter_rings().map(ContourRef::Ring)),
            Geom::MultiPolygon(multi) => Box::new(multi.iter_rings().map(ContourRef::Ring)),
        }
    }

    /// Iterates over every vertex of the geometry.
    pub fn iter_points(&self) -> Box<dyn Iterator<Item = &'_ Vector2d> + '_> {
        match self {
            Geom::Point(p) => Box::new(std::iter::once(p)),
            Geom::MultiPoint(points) => Box::new(points.iter()),
            _ => Box::new(self.iter_contours().flat_map(|c| c.points().iter())),
        }
    }

    /// Bounding box of all vertices.
    pub fn bounding_box(&self) -> Option<BoundingBox> {
        BoundingBox::from_points(self.iter_points())
    }

    /// The geometry covers an area.
    pub fn is_areal(&self) -> bool {
        matches!(self, Geom::Polygon(_) | Geom::MultiPolygon(_))
    }

    /// Areal geometries as a multipolygon, `None` for points and lines.
    pub fn as_area(&self) -> Option<MultiPolygon> {
        match self {
            Geom::Polygon(polygon) => Some(MultiPolygon::from(polygon.clone())),
            Geom::MultiPolygon(multi) => Some(multi.clone()),
            _ => None,
        }
    }

    /// Checks that the geometry can be evaluated at all.
    ///
    /// Rings need at least three distinct vertices, lines at least two, polygons a non-zero exterior area and
    /// multi-geometries at least one member.
    pub fn validate(&self) -> Result<(), GeometryError> {
        match self {
            Geom::Point(_) => Ok(()),
            Geom::MultiPoint(points) if points.is_empty() => Err(GeometryError::Empty),
            Geom::MultiPoint(_) => Ok(()),
            Geom::Line(line) => {
                let count = line.distinct_vertex_count();
                if count < 2 {
                    Err(GeometryError::TooFewVertices { ring: 0, count })
                } else {
                    Ok(())
                }
            }
            Geom::Polygon(polygon) => validate_polygon(polygon, 0),
            Geom::MultiPolygon(multi) if multi.is_empty() => Err(GeometryError::Empty),
            Geom::MultiPolygon(multi) => {
                let mut first_ring = 0;
                for polygon in multi.polygons() {
                    validate_polygon(polygon, first_ring)?;
                    first_ring += polygon.iter_rings().count() as u32;
                }
                Ok(())
            }
        }
    }
}

fn validate_polygon(polygon: &Polygon, first_ring: u32) -> Result<(), GeometryError> {
    for (index, ring) in polygon.iter_rings().enumerate() {
        let count = ring.distinct_vertex_count();
        if count < 3 {
            return Err(GeometryError::TooFewVertices {
                ring: first_ring + index as u32,
                count,
            });
        }
    }

    if polygon.exterior().area_signed() == 0.0 {
        return Err(GeometryError::ZeroArea);
    }

    Ok(())
}

impl From<Vector2d> for Geom {
    fn from(value: Vector2d) -> Self {
        Self::Point(value)
    }
}

impl From<LineString> for Geom {
    fn from(value: LineString) -> Self {
        Self::Line(value)
    }
}

impl From<Polygon> for Geom {
    fn from(value: Polygon) -> Self {
        Self::Polygon(value)
    }
}

impl From<MultiPolygon> for Geom {
    fn from(value: MultiPolygon) -> Self {
        Self::MultiPolygon(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    fn v(x: f64, y: f64) -> Vector2d {
        Vector2d::new(x, y).expect("finite")
    }

    fn square() -> Polygon {
        Polygon::from(Ring::new(vec![
            v(0.0, 0.0),
            v(1.0, 0.0),
            v(1.0, 1.0),
            v(0.0, 1.0),
        ]))
    }

    #[test]
    fn validate() {
        assert!(Geom::from(square()).validate().is_ok());
        assert!(Geom::Point(v(1.0, 1.0)).validate().is_ok());
        assert!(Geom::from(LineString::new(vec![v(0.0, 0.0), v(1.0, 0.0)]))
            .validate()
            .is_ok());

        assert_matches!(
            Geom::from(LineString::new(vec![v(0.0, 0.0), v(0.0, 0.0)])).validate(),
            Err(GeometryError::TooFewVertices { ring: 0, count: 1 })
        );
        assert_matches!(
            Geom::MultiPoint(vec![]).validate(),
            Err(GeometryError::Empty)
        );
        assert_matches!(
            Geom::from(MultiPolygon::default()).validate(),
            Err(GeometryError::Empty)
        );
    }

    #[test]
    fn validate_polygon_rings() {
        let sliver = Polygon::from(Ring::new(vec![v(0.0, 0.0), v(1.0, 0.0), v(0.0, 0.0)]));
        assert_matches!(
            Geom::from(sliver).validate(),
            Err(GeometryError::TooFewVertices { ring: 0, count: 2 })
        );

        let flat = Polygon::from(Ring::new(vec![v(0.0, 0.0), v(1.0, 0.0), v(2.0, 0.0)]));
        assert_matches!(Geom::from(flat).validate(), Err(GeometryError::ZeroArea));

        let bad_hole = Polygon::new(
            square().exterior().clone(),
            vec![Ring::new(vec![v(0.2, 0.2), v(0.4, 0.4)])],
        );
        let multi = MultiPolygon::new(vec![square(), bad_hole]);
        assert_matches!(
            Geom::from(multi).validate(),
            Err(GeometryError::TooFewVertices { ring: 2, count: 2 })
        );
    }

    #[test]
    fn contours_and_points() {
        let polygon = Polygon::new(
            square().exterior().clone(),
            vec![Ring::new(vec![v(0.2, 0.2), v(0.4, 0.2), v(0.4, 0.4)])],
        );
        let geom = Geom::from(polygon);
        assert_eq!(geom.iter_contours().count(), 2);
        assert!(geom.iter_contours().all(|c| c.is_closed()));
        assert_eq!(geom.iter_points().count(), 7);
        assert_eq!(
            geom.bounding_box(),
            Some(BoundingBox::new(0.0, 0.0, 1.0, 1.0).expect("finite"))
        );
        assert!(geom.is_areal());
        assert!(geom.as_area().is_some());

        let point = Geom::Point(v(3.0, 4.0));
        assert_eq!(point.iter_contours().count(), 0);
        assert!(point.as_area().is_none());
    }
}
