use crate::geometry::{Coord, GeometryType};

/// A ring or line: an ordered sequence of coordinates.
pub type LineCoords = Vec<Coord>;

/// The rings of a polygon. The first ring is the exterior, the rest are holes.
pub type PolygonCoords = Vec<LineCoords>;

/// A geometry value, as read from WKT or GeoJSON.
///
/// Each variant carries exactly the coordinate nesting its type requires. Values are built
/// fresh by every conversion and are never shared between calls.
#[derive(Debug, Clone, PartialEq)]
pub enum Geometry {
    Point(Coord),
    LineString(LineCoords),
    Polygon(PolygonCoords),
    MultiPoint(Vec<Coord>),
    MultiLineString(Vec<LineCoords>),
    MultiPolygon(Vec<PolygonCoords>),
    GeometryCollection(Vec<Geometry>),
}

impl Geometry {
    pub fn geometry_type(&self) -> GeometryType {
        match self {
            Geometry::Point(_) => GeometryType::Point,
            Geometry::LineString(_) => GeometryType::LineString,
            Geometry::Polygon(_) => GeometryType::Polygon,
            Geometry::MultiPoint(_) => GeometryType::MultiPoint,
            Geometry::MultiLineString(_) => GeometryType::MultiLineString,
            Geometry::MultiPolygon(_) => GeometryType::MultiPolygon,
            Geometry::GeometryCollection(_) => GeometryType::GeometryCollection,
        }
    }

    /// Visit every coordinate, descending into collections.
    pub fn for_each_coord<F: FnMut(&Coord)>(&self, f: &mut F) {
        match self {
            Geometry::Point(c) => f(c),
            Geometry::LineString(coords) | Geometry::MultiPoint(coords) => {
                coords.iter().for_each(|c| f(c))
            }
            Geometry::Polygon(lines) | Geometry::MultiLineString(lines) => {
                lines.iter().flatten().for_each(|c| f(c))
            }
            Geometry::MultiPolygon(polygons) => {
                polygons.iter().flatten().flatten().for_each(|c| f(c))
            }
            Geometry::GeometryCollection(geometries) => {
                for geometry in geometries {
                    geometry.for_each_coord(&mut *f);
                }
            }
        }
    }

    /// Total number of coordinates, descending into collections.
    pub fn num_coords(&self) -> usize {
        let mut count = 0;
        self.for_each_coord(&mut |_| count += 1);
        count
    }
}

impl From<Coord> for Geometry {
    fn from(value: Coord) -> Self {
        Geometry::Point(value)
    }
}
