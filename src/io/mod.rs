//! Readers and writers for the text geometry formats, and conversions to the `geo` and
//! `geojson` crates.

pub mod geo;
pub mod geojson;
pub mod wkt;
