use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::{GeoWidgetsError, Result};
use crate::geometry::{Coord, Geometry, GeometryType, LineCoords, PolygonCoords};

/// Matches the geometry keyword at the start of a WKT string. Any keyword is captured so
/// that well-formed but unsupported types can be told apart from malformed input.
static TYPE_PREFIX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)^\s*([A-Z]+)\s*\(").expect("Invalid WKT type prefix regex")
});

/// Deepest `GEOMETRYCOLLECTION` nesting accepted by the reader.
pub const MAX_COLLECTION_DEPTH: usize = 64;

static POINT_BODY: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?is)^\s*POINT\s*\(([^()]*)\)\s*$").expect("Invalid POINT regex")
});

static LINESTRING_BODY: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?is)^\s*LINESTRING\s*\(([^()]*)\)\s*$").expect("Invalid LINESTRING regex")
});

static POLYGON_BODY: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?is)^\s*POLYGON\s*\(\s*\((.*)\)\s*\)\s*$").expect("Invalid POLYGON regex")
});

static MULTIPOINT_BODY: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?is)^\s*MULTIPOINT\s*\((.*)\)\s*$").expect("Invalid MULTIPOINT regex")
});

static MULTILINESTRING_BODY: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?is)^\s*MULTILINESTRING\s*\(\s*\((.*)\)\s*\)\s*$")
        .expect("Invalid MULTILINESTRING regex")
});

static MULTIPOLYGON_BODY: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?is)^\s*MULTIPOLYGON\s*\(\s*\(\s*\((.*)\)\s*\)\s*\)\s*$")
        .expect("Invalid MULTIPOLYGON regex")
});

static COLLECTION_BODY: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?is)^\s*GEOMETRYCOLLECTION\s*\((.*)\)\s*$")
        .expect("Invalid GEOMETRYCOLLECTION regex")
});

/// `),(` between the rings of a polygon or the members of a multi line string.
static RING_SEPARATOR: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\)\s*,\s*\(").expect("Invalid ring separator regex"));

/// `)),((` between the polygons of a multi polygon.
static POLYGON_SEPARATOR: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\)\s*\)\s*,\s*\(\s*\(").expect("Invalid polygon separator regex")
});

/// What to do when a member of a `GEOMETRYCOLLECTION` cannot be read.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CollectionErrors {
    /// Fail the whole collection.
    #[default]
    Strict,
    /// Leave the member out of the collection and log a warning.
    Skip,
}

/// Options for [`read_wkt_with_options`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WktReadOptions {
    pub collection_errors: CollectionErrors,
}

/// Read a WKT string into a [`Geometry`].
///
/// ```
/// use geowidgets::geometry::{Coord, Geometry};
/// use geowidgets::io::wkt::read_wkt;
///
/// let geom = read_wkt("POINT(13.4050 52.5200)").unwrap();
/// assert_eq!(geom, Geometry::Point(Coord::new(13.405, 52.52)));
/// ```
pub fn read_wkt(wkt: &str) -> Result<Geometry> {
    read_wkt_with_options(wkt, &WktReadOptions::default())
}

/// Read a WKT string into a [`Geometry`], with control over how collection members that fail
/// to parse are handled.
pub fn read_wkt_with_options(wkt: &str, options: &WktReadOptions) -> Result<Geometry> {
    read_geometry(wkt, options, 0)
}

/// `depth` is the number of collections enclosing `wkt`.
fn read_geometry(wkt: &str, options: &WktReadOptions, depth: usize) -> Result<Geometry> {
    let geometry_type = detect_type(wkt)?;
    debug!(%geometry_type, depth, len = wkt.len(), "reading WKT");

    let geometry = match geometry_type {
        GeometryType::Point => {
            let coords = parse_coords(capture_body(&POINT_BODY, wkt, geometry_type)?)?;
            match coords.as_slice() {
                [coord] => Geometry::Point(*coord),
                _ => {
                    return Err(GeoWidgetsError::InvalidWkt(format!(
                        "POINT must have exactly one coordinate, found {}",
                        coords.len()
                    )))
                }
            }
        }
        GeometryType::LineString => Geometry::LineString(parse_coords(capture_body(
            &LINESTRING_BODY,
            wkt,
            geometry_type,
        )?)?),
        GeometryType::Polygon => Geometry::Polygon(parse_rings(capture_body(
            &POLYGON_BODY,
            wkt,
            geometry_type,
        )?)?),
        GeometryType::MultiPoint => Geometry::MultiPoint(parse_multi_point(capture_body(
            &MULTIPOINT_BODY,
            wkt,
            geometry_type,
        )?)?),
        GeometryType::MultiLineString => Geometry::MultiLineString(parse_rings(capture_body(
            &MULTILINESTRING_BODY,
            wkt,
            geometry_type,
        )?)?),
        GeometryType::MultiPolygon => {
            let body = capture_body(&MULTIPOLYGON_BODY, wkt, geometry_type)?;
            let polygons = POLYGON_SEPARATOR
                .split(body)
                .map(parse_rings)
                .collect::<Result<Vec<PolygonCoords>>>()?;
            Geometry::MultiPolygon(polygons)
        }
        GeometryType::GeometryCollection => {
            if depth >= MAX_COLLECTION_DEPTH {
                return Err(GeoWidgetsError::InvalidWkt(format!(
                    "GEOMETRYCOLLECTION nested deeper than {MAX_COLLECTION_DEPTH} levels"
                )));
            }
            let body = capture_body(&COLLECTION_BODY, wkt, geometry_type)?;
            Geometry::GeometryCollection(parse_collection(body, options, depth + 1)?)
        }
    };

    Ok(geometry)
}

fn detect_type(wkt: &str) -> Result<GeometryType> {
    let keyword = TYPE_PREFIX
        .captures(wkt)
        .and_then(|captures| captures.get(1))
        .ok_or_else(|| {
            GeoWidgetsError::InvalidWkt("missing geometry type keyword".to_string())
        })?;
    GeometryType::from_wkt_keyword(keyword.as_str())
        .ok_or_else(|| GeoWidgetsError::UnsupportedType(keyword.as_str().to_string()))
}

fn capture_body<'a>(regex: &Regex, wkt: &'a str, geometry_type: GeometryType) -> Result<&'a str> {
    regex
        .captures(wkt)
        .and_then(|captures| captures.get(1))
        .map(|body| body.as_str())
        .ok_or_else(|| {
            GeoWidgetsError::InvalidWkt(format!(
                "malformed {} body",
                geometry_type.wkt_keyword()
            ))
        })
}

/// Parse a single `x y` token.
fn parse_coord(token: &str) -> Result<Coord> {
    let invalid = || GeoWidgetsError::InvalidWkt(format!("invalid coordinate '{}'", token.trim()));

    let mut parts = token.split_whitespace();
    let (Some(x), Some(y), None) = (parts.next(), parts.next(), parts.next()) else {
        return Err(invalid());
    };
    let x: f64 = x.parse().map_err(|_| invalid())?;
    let y: f64 = y.parse().map_err(|_| invalid())?;
    if !x.is_finite() || !y.is_finite() {
        return Err(invalid());
    }
    Ok(Coord::new(x, y))
}

/// Parse a comma separated list of `x y` tokens.
fn parse_coords(body: &str) -> Result<LineCoords> {
    if body.trim().is_empty() {
        return Err(GeoWidgetsError::InvalidWkt(
            "empty coordinate list".to_string(),
        ));
    }
    body.split(',').map(parse_coord).collect()
}

/// Parse `x y, x y), (x y, ...` into a list of coordinate lists.
fn parse_rings(body: &str) -> Result<Vec<LineCoords>> {
    RING_SEPARATOR.split(body).map(parse_coords).collect()
}

/// Accepts both `1 2, 3 4` and `(1 2), (3 4)`.
fn parse_multi_point(body: &str) -> Result<Vec<Coord>> {
    if body.trim().is_empty() {
        return Err(GeoWidgetsError::InvalidWkt(
            "empty coordinate list".to_string(),
        ));
    }
    body.split(',')
        .map(|token| {
            let token = token.trim();
            let token = token
                .strip_prefix('(')
                .and_then(|t| t.strip_suffix(')'))
                .unwrap_or(token);
            parse_coord(token)
        })
        .collect()
}

/// Split the body of a collection at the commas that sit outside any parentheses.
fn split_members(body: &str) -> Result<Vec<&str>> {
    let unbalanced =
        || GeoWidgetsError::InvalidWkt("unbalanced parentheses in GEOMETRYCOLLECTION".to_string());

    let mut members = vec![];
    let mut depth = 0usize;
    let mut start = 0;
    for (idx, ch) in body.char_indices() {
        match ch {
            '(' => depth += 1,
            ')' => depth = depth.checked_sub(1).ok_or_else(unbalanced)?,
            ',' if depth == 0 => {
                members.push(body[start..idx].trim());
                start = idx + 1;
            }
            _ => {}
        }
    }
    if depth != 0 {
        return Err(unbalanced());
    }
    members.push(body[start..].trim());

    if members.iter().any(|member| member.is_empty()) {
        return Err(GeoWidgetsError::InvalidWkt(
            "empty GEOMETRYCOLLECTION member".to_string(),
        ));
    }
    Ok(members)
}

fn parse_collection(body: &str, options: &WktReadOptions, depth: usize) -> Result<Vec<Geometry>> {
    let mut geometries = vec![];
    for member in split_members(body)? {
        match read_geometry(member, options, depth) {
            Ok(geometry) => geometries.push(geometry),
            Err(err) => match options.collection_errors {
                CollectionErrors::Strict => return Err(err),
                CollectionErrors::Skip => {
                    warn!(member, error = %err, "skipping unreadable GEOMETRYCOLLECTION member")
                }
            },
        }
    }
    if geometries.is_empty() {
        return Err(GeoWidgetsError::InvalidWkt(
            "no readable GEOMETRYCOLLECTION member".to_string(),
        ));
    }
    Ok(geometries)
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::test::geometry;

    #[test]
    fn point() {
        let geom = read_wkt("POINT(13.4050 52.5200)").unwrap();
        assert_eq!(geom, geometry::point());
    }

    #[test]
    fn keyword_case_and_whitespace() {
        let geom = read_wkt("  point ( 13.405   52.52 )  ").unwrap();
        assert_eq!(geom, geometry::point());
    }

    #[test]
    fn line_string() {
        let geom = read_wkt("LINESTRING(13.405 52.52, 13.41 52.53)").unwrap();
        assert_eq!(geom, geometry::line_string());
    }

    #[test]
    fn polygon_with_hole() {
        let geom = read_wkt(
            "POLYGON((0 0, 10 0, 10 10, 0 10, 0 0),(2 2, 2 4, 4 4, 4 2, 2 2))",
        )
        .unwrap();
        assert_eq!(geom, geometry::polygon());
    }

    #[test]
    fn multi_point_both_forms() {
        let bare = read_wkt("MULTIPOINT(1 2, -3.5 4.25)").unwrap();
        let wrapped = read_wkt("MULTIPOINT((1 2), (-3.5 4.25))").unwrap();
        assert_eq!(bare, geometry::multi_point());
        assert_eq!(wrapped, geometry::multi_point());
    }

    #[test]
    fn multi_line_string() {
        let geom = read_wkt("MULTILINESTRING((0 0, 1 1), (2 2, 3 1, 4 0))").unwrap();
        assert_eq!(geom, geometry::multi_line_string());
    }

    #[test]
    fn multi_polygon() {
        let geom = read_wkt(
            "MULTIPOLYGON(((0 0, 10 0, 10 10, 0 10, 0 0), (2 2, 2 4, 4 4, 4 2, 2 2)), \
             ((20 20, 30 20, 30 30, 20 30, 20 20)))",
        )
        .unwrap();
        assert_eq!(geom, geometry::multi_polygon());
    }

    #[test]
    fn collection() {
        let geom = read_wkt("GEOMETRYCOLLECTION(POINT(4 6), LINESTRING(4 6, 7 10))").unwrap();
        assert_eq!(geom, geometry::collection());
    }

    #[test]
    fn nested_collection() {
        let geom =
            read_wkt("GEOMETRYCOLLECTION(GEOMETRYCOLLECTION(POINT(4 6)), POINT(1 2))").unwrap();
        assert_eq!(
            geom,
            Geometry::GeometryCollection(vec![
                Geometry::GeometryCollection(vec![Geometry::Point(Coord::new(4., 6.))]),
                Geometry::Point(Coord::new(1., 2.)),
            ])
        );
    }

    #[test]
    fn unbalanced_polygon() {
        let err = read_wkt("POLYGON(1 2, 3 4").unwrap_err();
        assert!(matches!(err, GeoWidgetsError::InvalidWkt(_)));
    }

    #[test]
    fn unsupported_type() {
        let err = read_wkt("CIRCULARSTRING(0 0, 1 1, 2 0)").unwrap_err();
        assert!(matches!(err, GeoWidgetsError::UnsupportedType(name) if name == "CIRCULARSTRING"));
        assert!(matches!(
            read_wkt("circle(1 2, 3)"),
            Err(GeoWidgetsError::UnsupportedType(_))
        ));
    }

    #[test]
    fn no_keyword() {
        for wkt in ["", "(1 2)", "POINT EMPTY", "POINT 1 2"] {
            assert!(
                matches!(read_wkt(wkt), Err(GeoWidgetsError::InvalidWkt(_))),
                "{wkt} should not parse"
            );
        }
    }

    #[test]
    fn malformed_multi_bodies() {
        for wkt in [
            "MULTIPOINT()",
            "MULTIPOINT((1 2), (3))",
            "MULTILINESTRING(1 2, 3 4)",
            "MULTILINESTRING((1 2, 3 4)), ((5 6, 7 8))",
            "MULTILINESTRING((1 2, 3 4), ())",
            "MULTIPOLYGON((0 0, 1 0, 1 1, 0 0))",
            "MULTIPOLYGON(((0 0, 1 0, 1 1, 0 0))",
            "MULTIPOLYGON(((0 0, 1 0, 1 1, 0 0)), ((x y, 1 0, 1 1, 0 0)))",
        ] {
            assert!(
                matches!(read_wkt(wkt), Err(GeoWidgetsError::InvalidWkt(_))),
                "{wkt} should not parse"
            );
        }
    }

    fn nested_collection_wkt(depth: usize) -> String {
        format!(
            "{}POINT(1 2){}",
            "GEOMETRYCOLLECTION(".repeat(depth),
            ")".repeat(depth)
        )
    }

    #[test]
    fn nesting_limit() {
        let geom = read_wkt(&nested_collection_wkt(MAX_COLLECTION_DEPTH)).unwrap();
        let mut inner = &geom;
        let mut levels = 0;
        while let Geometry::GeometryCollection(members) = inner {
            inner = &members[0];
            levels += 1;
        }
        assert_eq!(levels, MAX_COLLECTION_DEPTH);
        assert_eq!(inner, &Geometry::Point(Coord::new(1., 2.)));

        let err = read_wkt(&nested_collection_wkt(MAX_COLLECTION_DEPTH + 1)).unwrap_err();
        assert!(matches!(err, GeoWidgetsError::InvalidWkt(_)));
    }

    #[test]
    fn very_deep_nesting_is_an_error() {
        let options = WktReadOptions {
            collection_errors: CollectionErrors::Skip,
        };
        let err = read_wkt_with_options(&nested_collection_wkt(20_000), &options).unwrap_err();
        assert!(matches!(err, GeoWidgetsError::InvalidWkt(_)));
    }

    #[test]
    fn bad_coordinates() {
        for wkt in [
            "POINT(1)",
            "POINT(1 2 3)",
            "POINT(a b)",
            "POINT()",
            "POINT(1 2, 3 4)",
            "LINESTRING(1 2,, 3 4)",
            "POINT(NaN 1)",
        ] {
            assert!(
                matches!(read_wkt(wkt), Err(GeoWidgetsError::InvalidWkt(_))),
                "{wkt} should not parse"
            );
        }
    }

    #[test]
    fn trailing_garbage() {
        assert!(read_wkt("POINT(1 2) POINT(3 4)").is_err());
    }

    #[test]
    fn collection_strict_by_default() {
        let err = read_wkt("GEOMETRYCOLLECTION(POINT(4 6), POINT(x y))").unwrap_err();
        assert!(matches!(err, GeoWidgetsError::InvalidWkt(_)));
    }

    #[test]
    fn collection_skip_members() {
        let options = WktReadOptions {
            collection_errors: CollectionErrors::Skip,
        };
        let geom = read_wkt_with_options(
            "GEOMETRYCOLLECTION(POINT(4 6), POINT(x y), LINESTRING(4 6, 7 10))",
            &options,
        )
        .unwrap();
        assert_eq!(geom, geometry::collection());
    }

    #[test]
    fn collection_skipping_every_member_fails() {
        let options = WktReadOptions {
            collection_errors: CollectionErrors::Skip,
        };
        let err = read_wkt_with_options("GEOMETRYCOLLECTION(POINT(x y))", &options).unwrap_err();
        assert!(matches!(err, GeoWidgetsError::InvalidWkt(_)));
        let geom = read_wkt_with_options(
            "GEOMETRYCOLLECTION(GEOMETRYCOLLECTION(POINT(x y)), POINT(1 2))",
            &options,
        )
        .unwrap();
        assert_eq!(
            geom,
            Geometry::GeometryCollection(vec![Geometry::Point(Coord::new(1., 2.))])
        );
    }

    #[test]
    fn collection_unbalanced_fails_even_when_skipping() {
        let options = WktReadOptions {
            collection_errors: CollectionErrors::Skip,
        };
        let err = read_wkt_with_options("GEOMETRYCOLLECTION(POINT(4 6)), POINT(1 2))", &options)
            .unwrap_err();
        assert!(matches!(err, GeoWidgetsError::InvalidWkt(_)));
    }

    #[test]
    fn options_from_json() {
        let options: WktReadOptions =
            serde_json::from_str(r#"{"collection_errors": "skip"}"#).unwrap();
        assert_eq!(options.collection_errors, CollectionErrors::Skip);
        let options: WktReadOptions = serde_json::from_str("{}").unwrap();
        assert_eq!(options, WktReadOptions::default());
    }
}
