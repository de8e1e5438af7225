//! Value types and numeric primitives for topology checking of planar geometries.
//!
//! All coordinates are `f64`. Constructors reject NaN and infinite coordinates with
//! [`GeometryError::InvalidCoordinate`], so every value of these types holds finite numbers only.

mod bounding_rect;
mod contour;
mod error;
mod geo_types;
mod geometry;
mod orient;
mod polygon;
pub mod segment;
mod vec;

pub use bounding_rect::BoundingBox;
pub use contour::{Contour, ContourPointsIterator, ContourSegmentIterator, LineString, Ring, Winding};
pub use error::GeometryError;
pub use geometry::{ContourRef, Geom};
pub use orient::Orientation;
pub use polygon::{MultiPolygon, Polygon};
pub use segment::{point_to_segment_distance, segment_intersection, Segment, SegmentIntersection};
pub use vec::Vector2d;
