use crate::geometry::{Coord, Geometry, LineCoords, PolygonCoords};

/// Convert a [`Coord`] to a [`geo::Coord`].
pub fn coord_to_geo(coord: &Coord) -> geo::Coord {
    geo::Coord {
        x: coord.x,
        y: coord.y,
    }
}

fn line_to_geo(line: &[Coord]) -> geo::LineString {
    geo::LineString::new(line.iter().map(coord_to_geo).collect())
}

/// Convert polygon rings to a [`geo::Polygon`].
///
/// The first ring is the exterior. `geo` closes any ring that is not already closed.
fn polygon_to_geo(rings: &[LineCoords]) -> geo::Polygon {
    let mut rings = rings.iter().map(|ring| line_to_geo(ring));
    let exterior = rings.next().unwrap_or_else(|| geo::LineString::new(vec![]));
    geo::Polygon::new(exterior, rings.collect())
}

/// Convert any [`Geometry`] to a [`geo::Geometry`].
pub fn geometry_to_geo(geometry: &Geometry) -> geo::Geometry {
    match geometry {
        Geometry::Point(coord) => geo::Geometry::Point(geo::Point(coord_to_geo(coord))),
        Geometry::LineString(coords) => geo::Geometry::LineString(line_to_geo(coords)),
        Geometry::Polygon(rings) => geo::Geometry::Polygon(polygon_to_geo(rings)),
        Geometry::MultiPoint(coords) => geo::Geometry::MultiPoint(geo::MultiPoint::new(
            coords
                .iter()
                .map(|coord| geo::Point(coord_to_geo(coord)))
                .collect(),
        )),
        Geometry::MultiLineString(lines) => geo::Geometry::MultiLineString(
            geo::MultiLineString::new(lines.iter().map(|line| line_to_geo(line)).collect()),
        ),
        Geometry::MultiPolygon(polygons) => geo::Geometry::MultiPolygon(geo::MultiPolygon::new(
            polygons
                .iter()
                .map(|polygon| polygon_to_geo(polygon))
                .collect(),
        )),
        Geometry::GeometryCollection(geometries) => geo::Geometry::GeometryCollection(
            geo::GeometryCollection::new_from(geometries.iter().map(geometry_to_geo).collect()),
        ),
    }
}

/// Convert a [`geo::Coord`] to a [`Coord`].
pub fn coord_from_geo(coord: &geo::Coord) -> Coord {
    Coord::new(coord.x, coord.y)
}

fn line_from_geo(line: &geo::LineString) -> LineCoords {
    line.coords().map(coord_from_geo).collect()
}

fn polygon_from_geo(polygon: &geo::Polygon) -> PolygonCoords {
    std::iter::once(polygon.exterior())
        .chain(polygon.interiors())
        .map(line_from_geo)
        .collect()
}

/// Convert any [`geo::Geometry`] to a [`Geometry`].
///
/// `Line` becomes a two point `LineString`, and `Rect` and `Triangle` become a single ring
/// `Polygon`.
pub fn geometry_from_geo(geometry: &geo::Geometry) -> Geometry {
    match geometry {
        geo::Geometry::Point(point) => Geometry::Point(coord_from_geo(&point.0)),
        geo::Geometry::Line(line) => {
            Geometry::LineString(vec![coord_from_geo(&line.start), coord_from_geo(&line.end)])
        }
        geo::Geometry::LineString(line) => Geometry::LineString(line_from_geo(line)),
        geo::Geometry::Polygon(polygon) => Geometry::Polygon(polygon_from_geo(polygon)),
        geo::Geometry::MultiPoint(points) => Geometry::MultiPoint(
            points
                .iter()
                .map(|point| coord_from_geo(&point.0))
                .collect(),
        ),
        geo::Geometry::MultiLineString(lines) => {
            Geometry::MultiLineString(lines.iter().map(line_from_geo).collect())
        }
        geo::Geometry::MultiPolygon(polygons) => {
            Geometry::MultiPolygon(polygons.iter().map(polygon_from_geo).collect())
        }
        geo::Geometry::GeometryCollection(geometries) => {
            Geometry::GeometryCollection(geometries.iter().map(geometry_from_geo).collect())
        }
        geo::Geometry::Rect(rect) => Geometry::Polygon(polygon_from_geo(&rect.to_polygon())),
        geo::Geometry::Triangle(triangle) => {
            Geometry::Polygon(polygon_from_geo(&triangle.to_polygon()))
        }
    }
}

impl From<&Geometry> for geo::Geometry {
    fn from(value: &Geometry) -> Self {
        geometry_to_geo(value)
    }
}

impl From<&geo::Geometry> for Geometry {
    fn from(value: &geo::Geometry) -> Self {
        geometry_from_geo(value)
    }
}
