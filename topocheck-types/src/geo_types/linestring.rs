use ::geo_types::Coord;

use crate::contour::{Contour, LineString, Ring};
use crate::error::GeometryError;
use crate::vec::Vector2d;

impl From<&Ring> for ::geo_types::LineString<f64> {
    fn from(value: &Ring) -> Self {
        value
            .iter_points_closing()
            .map(|p| Coord::from(*p))
            .collect()
    }
}

impl From<&LineString> for ::geo_types::LineString<f64> {
    fn from(value: &LineString) -> Self {
        value.iter_points().map(|p| Coord::from(*p)).collect()
    }
}

impl TryFrom<&::geo_types::LineString<f64>> for Ring {
    type Error = GeometryError;

    fn try_from(value: &::geo_types::LineString<f64>) -> Result<Self, Self::Error> {
        Ok(Ring::new(points(value)?))
    }
}

impl TryFrom<&::geo_types::LineString<f64>> for LineString {
    type Error = GeometryError;

    fn try_from(value: &::geo_types::LineString<f64>) -> Result<Self, Self::Error> {
        Ok(LineString::new(points(value)?))
    }
}

fn points(line: &::geo_types::LineString<f64>) -> Result<Vec<Vector2d>, GeometryError> {
    line.coords().map(|c| Vector2d::try_from(*c)).collect()
}
