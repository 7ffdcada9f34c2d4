//! Read from and write to [GeoJSON](https://geojson.org/) geometry objects.

pub use reader::{read_geojson, read_geojson_value};
pub use writer::{write_geojson, write_geojson_value};

mod interop;
mod reader;
mod writer;
