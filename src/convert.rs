//! String to string conversions between WKT and GeoJSON.
//!
//! ```
//! use geowidgets::convert::{geojson_to_wkt, wkt_to_geojson, ConvertOptions};
//!
//! let json = wkt_to_geojson("POINT(13.4050 52.5200)", &ConvertOptions::default()).unwrap();
//! assert_eq!(json, r#"{"type":"Point","coordinates":[13.405,52.52]}"#);
//! assert_eq!(geojson_to_wkt(&json).unwrap(), "POINT(13.405 52.52)");
//! ```

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::Result;
use crate::io::geojson::{read_geojson, write_geojson};
use crate::io::wkt::{read_wkt_with_options, write_wkt, WktReadOptions};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConvertOptions {
    /// How to read the WKT side.
    pub wkt: WktReadOptions,
    /// Pretty print the GeoJSON output.
    pub pretty: bool,
}

/// Convert a WKT geometry into a GeoJSON geometry object.
pub fn wkt_to_geojson(wkt: &str, options: &ConvertOptions) -> Result<String> {
    debug!(len = wkt.len(), "converting WKT to GeoJSON");
    let geometry = read_wkt_with_options(wkt, &options.wkt)?;
    let json = write_geojson(&geometry, options.pretty)?;
    debug!(geometry_type = %geometry.geometry_type(), len = json.len(), "converted WKT to GeoJSON");
    Ok(json)
}

/// Convert a GeoJSON geometry object into WKT.
pub fn geojson_to_wkt(json: &str) -> Result<String> {
    debug!(len = json.len(), "converting GeoJSON to WKT");
    let geometry = read_geojson(json)?;
    let wkt = write_wkt(&geometry);
    debug!(geometry_type = %geometry.geometry_type(), len = wkt.len(), "converted GeoJSON to WKT");
    Ok(wkt)
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::error::GeoWidgetsError;
    use crate::io::wkt::CollectionErrors;

    #[test]
    fn point() {
        let json = wkt_to_geojson("POINT(13.4050 52.5200)", &ConvertOptions::default()).unwrap();
        assert_eq!(json, r#"{"type":"Point","coordinates":[13.405,52.52]}"#);
    }

    #[test]
    fn line_string_round_trip() {
        let json = r#"{"type":"LineString","coordinates":[[13.405,52.52],[13.41,52.53]]}"#;
        let wkt = geojson_to_wkt(json).unwrap();
        assert_eq!(wkt, "LINESTRING(13.405 52.52, 13.41 52.53)");
        assert_eq!(wkt_to_geojson(&wkt, &ConvertOptions::default()).unwrap(), json);
    }

    #[test]
    fn pretty() {
        let options = ConvertOptions {
            pretty: true,
            ..Default::default()
        };
        let json = wkt_to_geojson("POINT(1 2)", &options).unwrap();
        assert!(json.contains('\n'));
        assert_eq!(geojson_to_wkt(&json).unwrap(), "POINT(1 2)");
    }

    #[test]
    fn unbalanced_polygon() {
        let err = wkt_to_geojson("POLYGON(1 2, 3 4", &ConvertOptions::default()).unwrap_err();
        assert!(matches!(err, GeoWidgetsError::InvalidWkt(_)));
    }

    #[test]
    fn bad_json() {
        assert!(matches!(
            geojson_to_wkt("{not json").unwrap_err(),
            GeoWidgetsError::SerdeJson(_)
        ));
        assert!(matches!(
            geojson_to_wkt(r#"{"type":"Circle","coordinates":[0,0]}"#).unwrap_err(),
            GeoWidgetsError::UnsupportedType(_)
        ));
    }

    #[test]
    fn skipping_every_member_is_an_error() {
        let options = ConvertOptions {
            wkt: WktReadOptions {
                collection_errors: CollectionErrors::Skip,
            },
            pretty: false,
        };
        let err = wkt_to_geojson("GEOMETRYCOLLECTION(POINT(x y))", &options).unwrap_err();
        assert!(matches!(err, GeoWidgetsError::InvalidWkt(_)));
    }

    #[test]
    fn options_from_json() {
        let options: ConvertOptions =
            serde_json::from_str(r#"{"wkt": {"collection_errors": "skip"}}"#).unwrap();
        assert_eq!(options.wkt.collection_errors, CollectionErrors::Skip);
        assert!(!options.pretty);

        let json = wkt_to_geojson("GEOMETRYCOLLECTION(POINT(1 2), POINT(x y))", &options).unwrap();
        assert_eq!(
            json,
            r#"{"type":"GeometryCollection","geometries":[{"type":"Point","coordinates":[1.0,2.0]}]}"#
        );
    }
}
