use std::fmt::Display;
use std::str::FromStr;

use crate::error::GeoWidgetsError;

/// The seven geometry kinds shared by WKT and GeoJSON.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GeometryType {
    Point,
    LineString,
    Polygon,
    MultiPoint,
    MultiLineString,
    MultiPolygon,
    GeometryCollection,
}

impl GeometryType {
    pub const ALL: [GeometryType; 7] = [
        GeometryType::Point,
        GeometryType::LineString,
        GeometryType::Polygon,
        GeometryType::MultiPoint,
        GeometryType::MultiLineString,
        GeometryType::MultiPolygon,
        GeometryType::GeometryCollection,
    ];

    /// The upper-case keyword that starts a WKT string of this type.
    pub fn wkt_keyword(&self) -> &'static str {
        match self {
            GeometryType::Point => "POINT",
            GeometryType::LineString => "LINESTRING",
            GeometryType::Polygon => "POLYGON",
            GeometryType::MultiPoint => "MULTIPOINT",
            GeometryType::MultiLineString => "MULTILINESTRING",
            GeometryType::MultiPolygon => "MULTIPOLYGON",
            GeometryType::GeometryCollection => "GEOMETRYCOLLECTION",
        }
    }

    /// The value of the GeoJSON `type` member for this type.
    pub fn geojson_name(&self) -> &'static str {
        match self {
            GeometryType::Point => "Point",
            GeometryType::LineString => "LineString",
            GeometryType::Polygon => "Polygon",
            GeometryType::MultiPoint => "MultiPoint",
            GeometryType::MultiLineString => "MultiLineString",
            GeometryType::MultiPolygon => "MultiPolygon",
            GeometryType::GeometryCollection => "GeometryCollection",
        }
    }

    /// Look up a type by its WKT keyword, ignoring case.
    pub fn from_wkt_keyword(keyword: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|t| t.wkt_keyword().eq_ignore_ascii_case(keyword))
    }

    /// Look up a type by its exact GeoJSON name.
    pub fn from_geojson_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.geojson_name() == name)
    }
}

impl Display for GeometryType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.geojson_name())
    }
}

impl FromStr for GeometryType {
    type Err = GeoWidgetsError;

    /// Accepts either the GeoJSON name or the WKT keyword.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_geojson_name(s)
            .or_else(|| Self::from_wkt_keyword(s))
            .ok_or_else(|| GeoWidgetsError::UnsupportedType(s.to_string()))
    }
}
