//! Conversions between [`Geometry`] and the [`geojson`] crate's geometry type.

use geojson::{PointType, PolygonType, Value as GeoJsonValue};

use crate::error::{GeoWidgetsError, Result};
use crate::geometry::{Coord, Geometry, LineCoords, PolygonCoords};
use crate::io::geojson::reader::invalid;

fn coord_to_position(coord: &Coord) -> PointType {
    vec![coord.x, coord.y]
}

fn line_to_positions(line: &[Coord]) -> Vec<PointType> {
    line.iter().map(coord_to_position).collect()
}

fn polygon_to_positions(polygon: &[Vec<Coord>]) -> PolygonType {
    polygon.iter().map(|ring| line_to_positions(ring)).collect()
}

impl From<&Geometry> for geojson::Geometry {
    fn from(value: &Geometry) -> Self {
        let value = match value {
            Geometry::Point(coord) => GeoJsonValue::Point(coord_to_position(coord)),
            Geometry::LineString(coords) => GeoJsonValue::LineString(line_to_positions(coords)),
            Geometry::Polygon(rings) => GeoJsonValue::Polygon(polygon_to_positions(rings)),
            Geometry::MultiPoint(coords) => GeoJsonValue::MultiPoint(line_to_positions(coords)),
            Geometry::MultiLineString(lines) => GeoJsonValue::MultiLineString(
                lines.iter().map(|line| line_to_positions(line)).collect(),
            ),
            Geometry::MultiPolygon(polygons) => GeoJsonValue::MultiPolygon(
                polygons
                    .iter()
                    .map(|polygon| polygon_to_positions(polygon))
                    .collect(),
            ),
            Geometry::GeometryCollection(geometries) => GeoJsonValue::GeometryCollection(
                geometries.iter().map(geojson::Geometry::from).collect(),
            ),
        };
        geojson::Geometry::new(value)
    }
}

fn non_empty<'a, T>(items: &'a [T], what: &str) -> Result<&'a [T]> {
    if items.is_empty() {
        Err(invalid(format!("{what} must not be empty")))
    } else {
        Ok(items)
    }
}

fn position_to_coord(position: &PointType) -> Result<Coord> {
    match position.as_slice() {
        [x, y, ..] => Ok(Coord::new(*x, *y)),
        _ => Err(invalid(format!("invalid position {position:?}"))),
    }
}

fn positions_to_line(positions: &[PointType]) -> Result<LineCoords> {
    non_empty(positions, "positions")?
        .iter()
        .map(position_to_coord)
        .collect()
}

fn positions_to_polygon(rings: &PolygonType) -> Result<PolygonCoords> {
    non_empty(rings, "rings")?
        .iter()
        .map(|ring| positions_to_line(ring))
        .collect()
}

impl TryFrom<&geojson::Geometry> for Geometry {
    type Error = GeoWidgetsError;

    /// Applies the same shape checks as [`read_geojson_value`](super::read_geojson_value).
    fn try_from(value: &geojson::Geometry) -> Result<Self> {
        let geometry = match &value.value {
            GeoJsonValue::Point(position) => Geometry::Point(position_to_coord(position)?),
            GeoJsonValue::MultiPoint(positions) => {
                Geometry::MultiPoint(positions_to_line(positions)?)
            }
            GeoJsonValue::LineString(positions) => {
                Geometry::LineString(positions_to_line(positions)?)
            }
            GeoJsonValue::MultiLineString(lines) => {
                Geometry::MultiLineString(positions_to_polygon(lines)?)
            }
            GeoJsonValue::Polygon(rings) => Geometry::Polygon(positions_to_polygon(rings)?),
            GeoJsonValue::MultiPolygon(polygons) => Geometry::MultiPolygon(
                non_empty(polygons, "MultiPolygon coordinates")?
                    .iter()
                    .map(positions_to_polygon)
                    .collect::<Result<_>>()?,
            ),
            GeoJsonValue::GeometryCollection(geometries) => Geometry::GeometryCollection(
                non_empty(geometries, "geometries")?
                    .iter()
                    .map(Geometry::try_from)
                    .collect::<Result<_>>()?,
            ),
        };
        Ok(geometry)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::test::geometry;

    #[test]
    fn point() {
        let geom = geojson::Geometry::from(&geometry::point());
        assert_eq!(geom.value, GeoJsonValue::Point(vec![13.405, 52.52]));
    }

    #[test]
    fn round_trip() {
        for geom in geometry::all() {
            let converted = geojson::Geometry::from(&geom);
            assert_eq!(Geometry::try_from(&converted).unwrap(), geom);
        }
    }

    #[test]
    fn short_position_is_rejected() {
        let geom = geojson::Geometry::new(GeoJsonValue::Point(vec![1.0]));
        assert!(matches!(
            Geometry::try_from(&geom),
            Err(GeoWidgetsError::InvalidGeoJson(_))
        ));
    }

    #[test]
    fn altitude_is_dropped() {
        let geom = geojson::Geometry::new(GeoJsonValue::LineString(vec![
            vec![13.405, 52.52, 34.0],
            vec![13.41, 52.53, 35.0],
        ]));
        assert_eq!(Geometry::try_from(&geom).unwrap(), geometry::line_string());
    }

    #[test]
    fn empty_collection_is_rejected() {
        let geom = geojson::Geometry::new(GeoJsonValue::GeometryCollection(vec![]));
        assert!(matches!(
            Geometry::try_from(&geom),
            Err(GeoWidgetsError::InvalidGeoJson(_))
        ));
    }

    #[test]
    fn empty_line_string_is_rejected() {
        let geom = geojson::Geometry::new(GeoJsonValue::LineString(vec![]));
        assert!(matches!(
            Geometry::try_from(&geom),
            Err(GeoWidgetsError::InvalidGeoJson(_))
        ));
    }
}
