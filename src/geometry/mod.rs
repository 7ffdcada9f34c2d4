//! The geometry value model shared by every converter in this crate.

pub use coord::Coord;
pub use geometry_type::GeometryType;
pub use scalar::{Geometry, LineCoords, PolygonCoords};

mod coord;
mod geometry_type;
mod scalar;
