use ::geo_types::{coord, Coord, Point};

use crate::error::GeometryError;
use crate::vec::Vector2d;

impl From<Vector2d> for Coord<f64> {
    fn from(value: Vector2d) -> Self {
        coord!(x: value.x(), y: value.y())
    }
}

impl From<Vector2d> for Point<f64> {
    fn from(value: Vector2d) -> Self {
        Point(value.into())
    }
}

impl TryFrom<Coord<f64>> for Vector2d {
    type Error = GeometryError;

    fn try_from(value: Coord<f64>) -> Result<Self, Self::Error> {
        Vector2d::new(value.x, value.y)
    }
}

impl TryFrom<Point<f64>> for Vector2d {
    type Error = GeometryError;

    fn try_from(value: Point<f64>) -> Result<Self, Self::Error> {
        value.0.try_into()
    }
}
