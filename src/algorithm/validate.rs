//! Structural and semantic checks on GeoJSON input.
//!
//! The readers in [`crate::io`] only check that input has the right shape. This module is the
//! separate pass that reports everything else a user should know about: out of range
//! ordinates, line strings that are too short, and rings that are not closed.

use std::fmt::Display;

use serde::Serialize;
use serde_json::Value;

use crate::geometry::{Coord, Geometry, GeometryType};
use crate::io::geojson::write_geojson_value;

/// One problem found by the validator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationIssue {
    /// JSON pointer to the offending member, as a URI fragment (`#/coordinates/0`).
    pub path: String,
    pub message: String,
}

impl Display for ValidationIssue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.path, self.message)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ValidationReport {
    pub errors: Vec<ValidationIssue>,
    pub warnings: Vec<ValidationIssue>,
}

impl ValidationReport {
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }
}

/// Validate a GeoJSON geometry, `Feature` or `FeatureCollection`.
///
/// ```
/// use geowidgets::algorithm::validate_geojson;
/// use serde_json::json;
///
/// let report = validate_geojson(&json!({
///     "type": "Polygon",
///     "coordinates": [[[0, 0], [1, 0], [1, 1], [0, 1]]]
/// }));
/// assert!(!report.is_valid());
/// assert!(report.errors[0].message.contains("ring is not closed"));
/// ```
pub fn validate_geojson(value: &Value) -> ValidationReport {
    let mut validator = Validator::default();
    validator.root(value, "#");
    validator.report
}

/// Validation of an in-memory geometry.
pub trait Validate {
    fn validate(&self) -> ValidationReport;
}

impl Validate for Geometry {
    fn validate(&self) -> ValidationReport {
        validate_geojson(&write_geojson_value(self))
    }
}

#[derive(Default)]
struct Validator {
    report: ValidationReport,
}

impl Validator {
    fn error(&mut self, path: &str, message: impl Into<String>) {
        self.report.errors.push(ValidationIssue {
            path: path.to_string(),
            message: message.into(),
        });
    }

    fn warning(&mut self, path: &str, message: impl Into<String>) {
        self.report.warnings.push(ValidationIssue {
            path: path.to_string(),
            message: message.into(),
        });
    }

    fn type_name<'a>(&mut self, value: &'a Value, path: &str) -> Option<&'a str> {
        let Some(object) = value.as_object() else {
            self.error(path, "expected a JSON object");
            return None;
        };
        match object.get("type") {
            Some(Value::String(name)) => Some(name.as_str()),
            Some(_) => {
                self.error(&format!("{path}/type"), "\"type\" must be a string");
                None
            }
            None => {
                self.error(path, "missing \"type\"");
                None
            }
        }
    }

    fn root(&mut self, value: &Value, path: &str) {
        match self.type_name(value, path) {
            Some("FeatureCollection") => self.feature_collection(value, path),
            Some("Feature") => self.feature(value, path),
            Some(_) => self.geometry(value, path),
            None => {}
        }
    }

    fn feature_collection(&mut self, value: &Value, path: &str) {
        let features_path = format!("{path}/features");
        match value.get("features") {
            Some(Value::Array(features)) => {
                if features.is_empty() {
                    self.warning(&features_path, "FeatureCollection has no features");
                }
                for (idx, feature) in features.iter().enumerate() {
                    let feature_path = format!("{features_path}/{idx}");
                    match self.type_name(feature, &feature_path) {
                        Some("Feature") => self.feature(feature, &feature_path),
                        Some(other) => self.error(
                            &feature_path,
                            format!("expected a Feature, found '{other}'"),
                        ),
                        None => {}
                    }
                }
            }
            Some(_) => self.error(&features_path, "\"features\" must be an array"),
            None => self.error(path, "FeatureCollection is missing \"features\""),
        }
    }

    fn feature(&mut self, value: &Value, path: &str) {
        match value.get("properties") {
            None | Some(Value::Null) | Some(Value::Object(_)) => {}
            Some(_) => self.error(
                &format!("{path}/properties"),
                "\"properties\" must be an object or null",
            ),
        }
        match value.get("geometry") {
            Some(Value::Null) => self.warning(path, "Feature has no geometry"),
            Some(geometry) => {
                let geometry_path = format!("{path}/geometry");
                if self.type_name(geometry, &geometry_path).is_some() {
                    self.geometry(geometry, &geometry_path);
                }
            }
            None => self.error(path, "Feature is missing \"geometry\""),
        }
    }

    /// `value` is known to be an object with a string `type`.
    fn geometry(&mut self, value: &Value, path: &str) {
        let name = value.get("type").and_then(Value::as_str).unwrap_or_default();
        let Some(geometry_type) = GeometryType::from_geojson_name(name) else {
            self.error(&format!("{path}/type"), format!("unsupported type '{name}'"));
            return;
        };

        let coordinates_path = format!("{path}/coordinates");
        match (geometry_type, value.get("coordinates")) {
            (GeometryType::GeometryCollection, _) => self.geometry_collection(value, path),
            (_, None) => self.error(
                &coordinates_path,
                format!("{geometry_type} is missing \"coordinates\""),
            ),
            (GeometryType::Point, Some(coordinates)) => {
                self.position(coordinates, &coordinates_path);
            }
            (GeometryType::LineString, Some(coordinates)) => {
                self.line_string(coordinates, &coordinates_path)
            }
            (GeometryType::Polygon, Some(coordinates)) => {
                self.polygon(coordinates, &coordinates_path)
            }
            (GeometryType::MultiPoint, Some(coordinates)) => {
                let path = coordinates_path.as_str();
                if let Some(points) = self.array(coordinates, path, geometry_type) {
                    for (idx, point) in points.iter().enumerate() {
                        self.position(point, &format!("{path}/{idx}"));
                    }
                }
            }
            (GeometryType::MultiLineString, Some(coordinates)) => {
                let path = coordinates_path.as_str();
                if let Some(lines) = self.array(coordinates, path, geometry_type) {
                    for (idx, line) in lines.iter().enumerate() {
                        self.line_string(line, &format!("{path}/{idx}"));
                    }
                }
            }
            (GeometryType::MultiPolygon, Some(coordinates)) => {
                let path = coordinates_path.as_str();
                if let Some(polygons) = self.array(coordinates, path, geometry_type) {
                    for (idx, polygon) in polygons.iter().enumerate() {
                        self.polygon(polygon, &format!("{path}/{idx}"));
                    }
                }
            }
        }
    }

    fn geometry_collection(&mut self, value: &Value, path: &str) {
        let path = format!("{path}/geometries");
        match value.get("geometries") {
            Some(Value::Array(geometries)) => {
                if geometries.is_empty() {
                    self.warning(&path, "GeometryCollection is empty");
                }
                for (idx, geometry) in geometries.iter().enumerate() {
                    let member_path = format!("{path}/{idx}");
                    if self.type_name(geometry, &member_path).is_some() {
                        self.geometry(geometry, &member_path);
                    }
                }
            }
            Some(_) => self.error(&path, "\"geometries\" must be an array"),
            None => self.error(&path, "GeometryCollection is missing \"geometries\""),
        }
    }

    /// The members of a Multi* geometry. Warns when there are none.
    fn array<'a>(
        &mut self,
        value: &'a Value,
        path: &str,
        geometry_type: GeometryType,
    ) -> Option<&'a Vec<Value>> {
        let Some(array) = value.as_array() else {
            self.error(path, "coordinates must be an array");
            return None;
        };
        if array.is_empty() {
            self.warning(path, format!("{geometry_type} is empty"));
        }
        Some(array)
    }

    fn position(&mut self, value: &Value, path: &str) -> Option<Coord> {
        let numbers = value
            .as_array()
            .filter(|array| array.len() >= 2)
            .and_then(|array| array.iter().map(Value::as_f64).collect::<Option<Vec<_>>>());
        let Some(numbers) = numbers else {
            self.error(path, "position must be an array of at least two numbers");
            return None;
        };

        let coord = Coord::new(numbers[0], numbers[1]);
        if !(-180.0..=180.0).contains(&coord.x) {
            self.error(
                path,
                format!("longitude {} is out of range [-180, 180]", coord.x),
            );
        }
        if !(-90.0..=90.0).contains(&coord.y) {
            self.error(
                path,
                format!("latitude {} is out of range [-90, 90]", coord.y),
            );
        }
        Some(coord)
    }

    /// Positions of a line or ring. `None` when the value is not an array or any position is
    /// malformed.
    fn positions(&mut self, value: &Value, path: &str) -> Option<Vec<Coord>> {
        let Some(array) = value.as_array() else {
            self.error(path, "expected an array of positions");
            return None;
        };
        let coords: Vec<Option<Coord>> = array
            .iter()
            .enumerate()
            .map(|(idx, position)| self.position(position, &format!("{path}/{idx}")))
            .collect();
        coords.into_iter().collect()
    }

    fn line_string(&mut self, value: &Value, path: &str) {
        if let Some(coords) = self.positions(value, path) {
            if coords.len() < 2 {
                self.error(
                    path,
                    format!(
                        "LineString must have at least 2 positions, found {}",
                        coords.len()
                    ),
                );
            }
        }
    }

    fn polygon(&mut self, value: &Value, path: &str) {
        let Some(rings) = value.as_array() else {
            self.error(path, "expected an array of rings");
            return;
        };
        if rings.is_empty() {
            self.error(path, "Polygon must have at least one ring");
        }
        for (idx, ring) in rings.iter().enumerate() {
            let ring_path = format!("{path}/{idx}");
            let Some(coords) = self.positions(ring, &ring_path) else {
                continue;
            };
            if coords.len() < 4 {
                self.error(
                    &ring_path,
                    format!(
                        "ring must have at least 4 positions, found {}",
                        coords.len()
                    ),
                );
            }
            if coords.first() != coords.last() {
                self.error(&ring_path, "ring is not closed: first and last positions differ");
            }
        }
    }
}
