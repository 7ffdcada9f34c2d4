use serde_json::{json, Value};

use crate::error::Result;
use crate::geometry::{Coord, Geometry};

fn position(coord: &Coord) -> Value {
    json!([coord.x, coord.y])
}

fn positions(coords: &[Coord]) -> Value {
    Value::Array(coords.iter().map(position).collect())
}

fn rings(lines: &[Vec<Coord>]) -> Value {
    Value::Array(lines.iter().map(|line| positions(line)).collect())
}

/// Write a [`Geometry`] as a GeoJSON geometry object.
pub fn write_geojson_value(geometry: &Geometry) -> Value {
    let type_name = geometry.geometry_type().geojson_name();
    let coordinates = match geometry {
        Geometry::Point(coord) => position(coord),
        Geometry::LineString(coords) | Geometry::MultiPoint(coords) => positions(coords),
        Geometry::Polygon(lines) | Geometry::MultiLineString(lines) => rings(lines),
        Geometry::MultiPolygon(polygons) => {
            Value::Array(polygons.iter().map(|polygon| rings(polygon)).collect())
        }
        Geometry::GeometryCollection(geometries) => {
            let geometries: Vec<Value> = geometries.iter().map(write_geojson_value).collect();
            return json!({"type": type_name, "geometries": geometries});
        }
    };
    json!({"type": type_name, "coordinates": coordinates})
}

/// Write a [`Geometry`] as GeoJSON text.
pub fn write_geojson(geometry: &Geometry, pretty: bool) -> Result<String> {
    let value = write_geojson_value(geometry);
    let text = if pretty {
        serde_json::to_string_pretty(&value)?
    } else {
        serde_json::to_string(&value)?
    };
    Ok(text)
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::io::geojson::read_geojson_value;
    use crate::test::geometry;

    #[test]
    fn point() {
        let text = write_geojson(&geometry::point(), false).unwrap();
        assert_eq!(text, r#"{"type":"Point","coordinates":[13.405,52.52]}"#);
    }

    #[test]
    fn collection() {
        let value = write_geojson_value(&geometry::collection());
        assert_eq!(
            value,
            json!({
                "type": "GeometryCollection",
                "geometries": [
                    {"type": "Point", "coordinates": [4.0, 6.0]},
                    {"type": "LineString", "coordinates": [[4.0, 6.0], [7.0, 10.0]]}
                ]
            })
        );
    }

    #[test]
    fn pretty() {
        let text = write_geojson(&geometry::line_string(), true).unwrap();
        assert!(text.contains('\n'));
        assert!(text.starts_with("{\n  \"type\": \"LineString\""));
    }

    #[test]
    fn round_trip() {
        for geom in geometry::all() {
            let value = write_geojson_value(&geom);
            assert_eq!(read_geojson_value(&value).unwrap(), geom);
        }
    }
}
