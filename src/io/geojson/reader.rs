use serde_json::{Map, Value};
use tracing::debug;

use crate::error::{GeoWidgetsError, Result};
use crate::geometry::{Coord, Geometry, GeometryType, LineCoords, PolygonCoords};

pub(super) fn invalid(message: impl Into<String>) -> GeoWidgetsError {
    GeoWidgetsError::InvalidGeoJson(message.into())
}

/// Read a GeoJSON geometry object from a JSON string.
///
/// ```
/// use geowidgets::geometry::{Coord, Geometry};
/// use geowidgets::io::geojson::read_geojson;
///
/// let geom = read_geojson(r#"{"type": "Point", "coordinates": [13.405, 52.52]}"#).unwrap();
/// assert_eq!(geom, Geometry::Point(Coord::new(13.405, 52.52)));
/// ```
pub fn read_geojson(json: &str) -> Result<Geometry> {
    let value: Value = serde_json::from_str(json)?;
    read_geojson_value(&value)
}

/// Read an already parsed GeoJSON geometry object.
///
/// Positions may carry more than two ordinates; only the first two are kept.
pub fn read_geojson_value(value: &Value) -> Result<Geometry> {
    let object = value
        .as_object()
        .ok_or_else(|| invalid("a geometry must be a JSON object"))?;
    let geometry_type = read_type(object)?;
    debug!(%geometry_type, "reading GeoJSON geometry");

    let geometry = match geometry_type {
        GeometryType::Point => Geometry::Point(read_position(coordinates(object)?)?),
        GeometryType::LineString => Geometry::LineString(read_positions(coordinates(object)?)?),
        GeometryType::Polygon => Geometry::Polygon(read_rings(coordinates(object)?)?),
        GeometryType::MultiPoint => Geometry::MultiPoint(read_positions(coordinates(object)?)?),
        GeometryType::MultiLineString => {
            Geometry::MultiLineString(read_rings(coordinates(object)?)?)
        }
        GeometryType::MultiPolygon => {
            let polygons = non_empty_array(coordinates(object)?, "MultiPolygon coordinates")?
                .iter()
                .map(read_rings)
                .collect::<Result<Vec<PolygonCoords>>>()?;
            Geometry::MultiPolygon(polygons)
        }
        GeometryType::GeometryCollection => {
            let geometries = object
                .get("geometries")
                .ok_or_else(|| invalid("GeometryCollection is missing \"geometries\""))?;
            let geometries = non_empty_array(geometries, "geometries")?
                .iter()
                .map(read_geojson_value)
                .collect::<Result<Vec<_>>>()?;
            Geometry::GeometryCollection(geometries)
        }
    };
    Ok(geometry)
}

fn read_type(object: &Map<String, Value>) -> Result<GeometryType> {
    match object.get("type") {
        Some(Value::String(name)) => GeometryType::from_geojson_name(name)
            .ok_or_else(|| GeoWidgetsError::UnsupportedType(name.clone())),
        Some(_) => Err(invalid("\"type\" must be a string")),
        None => Err(invalid("missing \"type\"")),
    }
}

fn coordinates(object: &Map<String, Value>) -> Result<&Value> {
    object
        .get("coordinates")
        .ok_or_else(|| invalid("missing \"coordinates\""))
}

fn non_empty_array<'a>(value: &'a Value, what: &str) -> Result<&'a Vec<Value>> {
    match value.as_array() {
        Some(array) if !array.is_empty() => Ok(array),
        Some(_) => Err(invalid(format!("{what} must not be empty"))),
        None => Err(invalid(format!("{what} must be an array"))),
    }
}

fn read_position(value: &Value) -> Result<Coord> {
    let bad = || invalid(format!("invalid position {value}"));
    let array = value.as_array().ok_or_else(bad)?;
    match array.as_slice() {
        [x, y, ..] => Ok(Coord::new(
            x.as_f64().ok_or_else(bad)?,
            y.as_f64().ok_or_else(bad)?,
        )),
        _ => Err(bad()),
    }
}

fn read_positions(value: &Value) -> Result<LineCoords> {
    non_empty_array(value, "positions")?
        .iter()
        .map(read_position)
        .collect()
}

fn read_rings(value: &Value) -> Result<Vec<LineCoords>> {
    non_empty_array(value, "rings")?
        .iter()
        .map(read_positions)
        .collect()
}
