//! Polygon algebra capability used by the overlap, gap and containment checks.
//!
//! Checkers only talk to the [`PolygonAlgebra`] trait. [`GeoAlgebra`] implements it on top of the `geo` crate and is
//! what callers use unless they bring their own engine.

mod geo_backend;

pub use geo_backend::GeoAlgebra;

use topocheck_types::{GeometryError, MultiPolygon, Vector2d};

/// Boolean operations and measurements over areal geometries.
pub trait PolygonAlgebra: Send + Sync {
    /// Unsigned area.
    fn area(&self, geom: &MultiPolygon) -> f64;

    /// Region covered by both geometries.
    fn intersection(
        &self,
        a: &MultiPolygon,
        b: &MultiPolygon,
    ) -> Result<MultiPolygon, GeometryError>;

    /// Region covered by any of the geometries.
    fn union(&self, a: &MultiPolygon, b: &MultiPolygon) -> Result<MultiPolygon, GeometryError>;

    /// Region covered by `a` but not by `b`.
    fn difference(
        &self,
        a: &MultiPolygon,
        b: &MultiPolygon,
    ) -> Result<MultiPolygon, GeometryError>;

    /// A point guaranteed to lie inside the geometry. `None` for empty geometries.
    fn point_on_surface(&self, geom: &MultiPolygon) -> Option<Vector2d>;

    /// Union of all geometries.
    ///
    /// Unions neighbours pairwise in rounds so every intermediate result stays small. Pairing follows input order.
    fn union_all(&self, geoms: Vec<MultiPolygon>) -> Result<MultiPolygon, GeometryError> {
        let mut level = geoms;
        while level.len() > 1 {
            let mut next = Vec::with_capacity(level.len().div_ceil(2));
            let mut iter = level.into_iter();
            while let Some(a) = iter.next() {
                match iter.next() {
                    Some(b) => next.push(self.union(&a, &b)?),
                    None => next.push(a),
                }
            }
            level = next;
        }

        Ok(level.pop().unwrap_or_default())
    }
}
