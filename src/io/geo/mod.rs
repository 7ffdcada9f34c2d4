//! Convert to and from [`geo`] geometries.

mod scalar;

pub use scalar::{coord_from_geo, coord_to_geo, geometry_from_geo, geometry_to_geo};
