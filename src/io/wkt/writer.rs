use std::fmt::{self, Display, Write};

use itertools::Itertools;

use crate::geometry::{Coord, Geometry, LineCoords, PolygonCoords};

/// Serialize a geometry as WKT.
pub trait ToWkt {
    fn to_wkt(&self) -> String;
}

impl ToWkt for Geometry {
    fn to_wkt(&self) -> String {
        write_wkt(self)
    }
}

impl Display for Geometry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_geometry(f, self)
    }
}

/// Write a [`Geometry`] as WKT.
///
/// The output is always readable by [`read_wkt`](super::read_wkt), which reproduces an equal
/// geometry.
///
/// ```
/// use geowidgets::geometry::{Coord, Geometry};
/// use geowidgets::io::wkt::write_wkt;
///
/// let line = Geometry::LineString(vec![Coord::new(13.405, 52.52), Coord::new(13.41, 52.53)]);
/// assert_eq!(write_wkt(&line), "LINESTRING(13.405 52.52, 13.41 52.53)");
/// ```
pub fn write_wkt(geometry: &Geometry) -> String {
    let mut out = String::new();
    // Writing into a String cannot fail.
    let _ = write_geometry(&mut out, geometry);
    out
}

fn coord_to_wkt(coord: &Coord) -> String {
    format!("{} {}", coord.x, coord.y)
}

fn coords_to_wkt(coords: &[Coord]) -> String {
    coords.iter().map(coord_to_wkt).join(", ")
}

fn line_string_to_wkt(line: &LineCoords) -> String {
    format!("({})", coords_to_wkt(line))
}

fn polygon_to_wkt(polygon: &PolygonCoords) -> String {
    format!("({})", polygon.iter().map(line_string_to_wkt).join(", "))
}

fn write_geometry<W: Write>(out: &mut W, geometry: &Geometry) -> fmt::Result {
    let keyword = geometry.geometry_type().wkt_keyword();
    match geometry {
        Geometry::Point(coord) => write!(out, "{keyword}({})", coord_to_wkt(coord)),
        Geometry::LineString(coords) | Geometry::MultiPoint(coords) => {
            write!(out, "{keyword}({})", coords_to_wkt(coords))
        }
        Geometry::Polygon(lines) | Geometry::MultiLineString(lines) => {
            write!(
                out,
                "{keyword}({})",
                lines.iter().map(line_string_to_wkt).join(", ")
            )
        }
        Geometry::MultiPolygon(polygons) => write!(
            out,
            "{keyword}({})",
            polygons.iter().map(polygon_to_wkt).join(", ")
        ),
        Geometry::GeometryCollection(geometries) => {
            write!(out, "{keyword}(")?;
            for (idx, member) in geometries.iter().enumerate() {
                if idx > 0 {
                    out.write_str(", ")?;
                }
                write_geometry(out, member)?;
            }
            out.write_char(')')
        }
    }
}
