use ::geo_types::Geometry;

use crate::contour::LineString;
use crate::error::GeometryError;
use crate::geometry::Geom;
use crate::polygon::{MultiPolygon, Polygon};
use crate::vec::Vector2d;

impl TryFrom<&Geometry<f64>> for Geom {
    type Error = GeometryError;

    fn try_from(value: &Geometry<f64>) -> Result<Self, Self::Error> {
        Ok(match value {
            Geometry::Point(p) => Geom::Point(Vector2d::try_from(*p)?),
            Geometry::MultiPoint(points) => Geom::MultiPoint(
                points
                    .iter()
                    .map(|p| Vector2d::try_from(*p))
                    .collect::<Result<_, _>>()?,
            ),
            Geometry::LineString(line) => Geom::Line(LineString::try_from(line)?),
            Geometry::Polygon(polygon) => Geom::Polygon(Polygon::try_from(polygon)?),
            Geometry::MultiPolygon(multi) => Geom::MultiPolygon(MultiPolygon::try_from(multi)?),
            Geometry::Rect(rect) => Geom::Polygon(Polygon::try_from(&rect.to_polygon())?),
            Geometry::Triangle(triangle) => {
                Geom::Polygon(Polygon::try_from(&triangle.to_polygon())?)
            }
            Geometry::Line(_) => return Err(unsupported("Line")),
            Geometry::MultiLineString(_) => return Err(unsupported("MultiLineString")),
            Geometry::GeometryCollection(_) => return Err(unsupported("GeometryCollection")),
        })
    }
}

impl From<&Geom> for Geometry<f64> {
    fn from(value: &Geom) -> Self {
        match value {
            Geom::Point(p) => Geometry::Point((*p).into()),
            Geom::MultiPoint(points) => Geometry::MultiPoint(
                points
                    .iter()
                    .map(|p| ::geo_types::Point::from(*p))
                    .collect(),
            ),
            Geom::Line(line) => Geometry::LineString(line.into()),
            Geom::Polygon(polygon) => Geometry::Polygon(polygon.into()),
            Geom::MultiPolygon(multi) => Geometry::MultiPolygon(multi.into()),
        }
    }
}

fn unsupported(kind: &str) -> GeometryError {
    GeometryError::UnsupportedType(kind.to_string())
}
