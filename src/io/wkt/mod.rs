//! Read from and write to [Well-Known Text](https://en.wikipedia.org/wiki/Well-known_text_representation_of_geometry).
//!
//! WKT coordinates are written `x y`, i.e. `longitude latitude`, which is the same order as a
//! GeoJSON position. Neither direction swaps axes.

pub use reader::{
    read_wkt, read_wkt_with_options, CollectionErrors, WktReadOptions, MAX_COLLECTION_DEPTH,
};
pub use writer::{write_wkt, ToWkt};

mod reader;
mod writer;
