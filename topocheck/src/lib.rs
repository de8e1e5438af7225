//! Topology checks for layers of planar features.
//!
//! The crate finds defects in a set of decoded geometries that belong to one layer of a dataset:
//!
//! * self-intersections of rings and lines ([`check_self_intersections`]),
//! * overlaps between polygons above an area threshold ([`check_overlaps`]),
//! * gaps enclosed by the polygon mosaic ([`check_gaps`]),
//! * features lying inside other features ([`check_containment`]).
//!
//! Every check is a pure function returning [`CheckError`] values. Features whose geometry is malformed are not
//! checked and are reported as [`GeometryError`]s instead. Boolean polygon operations are delegated to a
//! [`PolygonAlgebra`] implementation, [`GeoAlgebra`] by default.
//!
//! [`LayerChecker`] runs all of the checks over a whole layer in parallel:
//!
//! ```
//! use topocheck::{Feature, LayerChecker};
//! use topocheck::topocheck_types::{Polygon, Ring, Vector2d};
//!
//! let square = |id: &str, x: f64| {
//!     let points = [(x, 0.0), (x + 1.0, 0.0), (x + 1.0, 1.0), (x, 1.0)]
//!         .into_iter()
//!         .map(Vector2d::try_from)
//!         .collect::<Result<Vec<_>, _>>()?;
//!     Ok::<_, topocheck::GeometryError>(Feature::new(id, Polygon::from(Ring::new(points))))
//! };
//!
//! let features = vec![square("a", 0.0)?, square("b", 1.0)?];
//! let report = LayerChecker::default().check(&features);
//! assert!(report.passed());
//! # Ok::<(), topocheck::GeometryError>(())
//! ```

pub mod algebra;
pub mod check;
mod check_error;
mod config;
mod error;
mod feature;
mod index;
mod layer;

pub use algebra::{GeoAlgebra, PolygonAlgebra};
pub use check::{
    check_containment, check_gaps, check_overlaps, check_self_intersections, CheckOutcome,
    FeatureGeometryError, GapOutcome,
};
pub use check_error::{CheckError, ContainmentKind};
pub use config::ToleranceConfig;
pub use error::{ConfigError, GapCheckFailure};
pub use feature::Feature;
pub use index::CandidateIndex;
pub use layer::{FeatureCheckError, LayerChecker, LayerReport};
pub use topocheck_types;
pub use topocheck_types::GeometryError;
