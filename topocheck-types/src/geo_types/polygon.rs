use crate::contour::Ring;
use crate::error::GeometryError;
use crate::polygon::{MultiPolygon, Polygon};

impl From<&Polygon> for ::geo_types::Polygon<f64> {
    fn from(value: &Polygon) -> Self {
        ::geo_types::Polygon::new(
            value.exterior().into(),
            value.interiors().iter().map(Into::into).collect(),
        )
    }
}

impl From<&MultiPolygon> for ::geo_types::MultiPolygon<f64> {
    fn from(value: &MultiPolygon) -> Self {
        value.polygons().iter().map(::geo_types::Polygon::from).collect()
    }
}

impl TryFrom<&::geo_types::Polygon<f64>> for Polygon {
    type Error = GeometryError;

    fn try_from(value: &::geo_types::Polygon<f64>) -> Result<Self, Self::Error> {
        let exterior = Ring::try_from(value.exterior())?;
        let interiors = value
            .interiors()
            .iter()
            .map(Ring::try_from)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Polygon::new(exterior, interiors))
    }
}

impl TryFrom<&::geo_types::MultiPolygon<f64>> for MultiPolygon {
    type Error = GeometryError;

    fn try_from(value: &::geo_types::MultiPolygon<f64>) -> Result<Self, Self::Error> {
        value.iter().map(Polygon::try_from).collect()
    }
}
