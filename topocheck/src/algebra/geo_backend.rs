use std::any::Any;
use std::panic::{catch_unwind, AssertUnwindSafe};

use geo::{Area, BooleanOps, InteriorPoint};
use topocheck_types::{GeometryError, MultiPolygon, Vector2d};

use super::PolygonAlgebra;

type GeoMultiPolygon = geo::MultiPolygon<f64>;

/// [`PolygonAlgebra`] backed by the `geo` crate.
///
/// The boolean operations of `geo` may panic on malformed input (self-crossing rings, for instance). Such panics are
/// caught here and returned as [`GeometryError::Algebra`].
#[derive(Debug, Default, Clone, Copy)]
pub struct GeoAlgebra;

impl GeoAlgebra {
    /// Creates the algebra.
    pub fn new() -> Self {
        Self
    }

    fn boolean_op(
        &self,
        a: &MultiPolygon,
        b: &MultiPolygon,
        op: impl FnOnce(&GeoMultiPolygon, &GeoMultiPolygon) -> GeoMultiPolygon,
    ) -> Result<MultiPolygon, GeometryError> {
        let a = GeoMultiPolygon::from(a);
        let b = GeoMultiPolygon::from(b);
        let result = catch_unwind(AssertUnwindSafe(|| op(&a, &b)))
            .map_err(|payload| GeometryError::Algebra(panic_message(payload.as_ref())))?;

        MultiPolygon::try_from(&result)
    }
}

impl PolygonAlgebra for GeoAlgebra {
    fn area(&self, geom: &MultiPolygon) -> f64 {
        GeoMultiPolygon::from(geom).unsigned_area()
    }

    fn intersection(
        &self,
        a: &MultiPolygon,
        b: &MultiPolygon,
    ) -> Result<MultiPolygon, GeometryError> {
        self.boolean_op(a, b, |a, b| a.intersection(b))
    }

    fn union(&self, a: &MultiPolygon, b: &MultiPolygon) -> Result<MultiPolygon, GeometryError> {
        self.boolean_op(a, b, |a, b| a.union(b))
    }

    fn difference(
        &self,
        a: &MultiPolygon,
        b: &MultiPolygon,
    ) -> Result<MultiPolygon, GeometryError> {
        self.boolean_op(a, b, |a, b| a.difference(b))
    }

    fn point_on_surface(&self, geom: &MultiPolygon) -> Option<Vector2d> {
        let point = GeoMultiPolygon::from(geom).interior_point()?;
        Vector2d::try_from(point).ok()
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        message.to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "boolean operation panicked".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use topocheck_types::{Polygon, Ring};

    fn square(x: f64, y: f64, size: f64) -> MultiPolygon {
        let points = [(x, y), (x + size, y), (x + size, y + size), (x, y + size)]
            .into_iter()
            .map(|p| Vector2d::try_from(p).expect("finite"))
            .collect();
        MultiPolygon::from(Polygon::from(Ring::new(points)))
    }

    #[test]
    fn boolean_ops() {
        let algebra = GeoAlgebra::new();
        let a = square(0.0, 0.0, 2.0);
        let b = square(1.0, 1.0, 2.0);

        let intersection = algebra.intersection(&a, &b).expect("valid input");
        assert_abs_diff_eq!(algebra.area(&intersection), 1.0, epsilon = 1e-9);

        let union = algebra.union(&a, &b).expect("valid input");
        assert_abs_diff_eq!(algebra.area(&union), 7.0, epsilon = 1e-9);

        let difference = algebra.difference(&a, &b).expect("valid input");
        assert_abs_diff_eq!(algebra.area(&difference), 3.0, epsilon = 1e-9);
    }

    #[test]
    fn disjoint_intersection_is_empty() {
        let algebra = GeoAlgebra::new();
        let intersection = algebra
            .intersection(&square(0.0, 0.0, 1.0), &square(5.0, 5.0, 1.0))
            .expect("valid input");
        assert_eq!(algebra.area(&intersection), 0.0);
        assert_eq!(algebra.point_on_surface(&intersection), None);
    }

    #[test]
    fn point_on_surface_is_inside() {
        let algebra = GeoAlgebra::new();
        let geom = square(10.0, 10.0, 3.0);
        let point = algebra.point_on_surface(&geom).expect("not empty");
        assert!(geom.contains_point(&point));
    }

    #[test]
    fn union_all() {
        let algebra = GeoAlgebra::new();
        let squares = (0..5).map(|i| square(i as f64, 0.0, 1.0)).collect();
        let union = algebra.union_all(squares).expect("valid input");
        assert_abs_diff_eq!(algebra.area(&union), 5.0, epsilon = 1e-9);
        assert_eq!(
            algebra.union_all(vec![]).expect("empty input"),
            MultiPolygon::default()
        );
    }
}
