//! Geometry and text utilities behind a set of web form widgets: WKT and GeoJSON conversion,
//! GeoJSON validation, coordinate helpers, and a line/word/character text diff.
//!
//! All geometry passes through one in-memory model, [`geometry::Geometry`], so every reader
//! and writer in [`io`] can be combined with every other.

#![cfg_attr(docsrs, feature(doc_auto_cfg))]
#![cfg_attr(not(test), deny(unused_crate_dependencies))]

pub use error::{GeoWidgetsError, Result};

pub mod algorithm;
pub mod convert;
pub mod diff;
pub mod error;
pub mod geometry;
pub mod io;
#[cfg(test)]
pub(crate) mod test;
