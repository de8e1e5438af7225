//! Conversions between the crate geometries and [`geo_types`] ones.
//!
//! Conversions into `geo_types` are infallible. Conversions from `geo_types` validate every coordinate and fail with
//! [`GeometryError::InvalidCoordinate`](crate::GeometryError::InvalidCoordinate) on NaN or infinite values.

mod coord;
mod geometry;
mod linestring;
mod polygon;
