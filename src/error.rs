//! Defines [`GeoWidgetsError`], representing all errors returned by this crate.

use std::fmt::Debug;
use thiserror::Error;

/// Enum with all errors in this crate.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum GeoWidgetsError {
    /// The input is not WKT this crate can read.
    #[error("Invalid WKT format: {0}")]
    InvalidWkt(String),

    /// The input is JSON, but not a GeoJSON geometry of the expected shape.
    #[error("Invalid GeoJSON format: {0}")]
    InvalidGeoJson(String),

    /// Well-formed input naming a geometry type outside the supported set.
    #[error("Unsupported geometry type: {0}")]
    UnsupportedType(String),

    /// A coordinate value or coordinate notation that cannot be converted.
    #[error("Invalid coordinate: {0}")]
    InvalidCoordinate(String),

    /// An option or selector value this crate does not know.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Both sides of a diff are empty.
    #[error("Nothing to compare: both inputs are empty")]
    EmptyInput,

    /// [serde_json::Error]
    #[error(transparent)]
    SerdeJson(#[from] serde_json::Error),
}

/// Crate-specific result type.
pub type Result<T> = std::result::Result<T, GeoWidgetsError>;
