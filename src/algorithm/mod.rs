//! Algorithms on [`Geometry`](crate::geometry::Geometry) values and GeoJSON input.

/// Calculate the bounding rectangle of a `Geometry`.
pub mod bounding_rect;
pub use bounding_rect::{BoundingBox, BoundingRect};

pub mod coords;

/// Report problems in GeoJSON input.
pub mod validate;
pub use validate::{validate_geojson, Validate, ValidationIssue, ValidationReport};
