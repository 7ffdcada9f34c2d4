//! Coordinate notation and projection helpers: decimal degrees <-> degrees/minutes/seconds,
//! and WGS84 longitude/latitude <-> spherical Web Mercator (EPSG:3857).

use std::f64::consts::{FRAC_PI_2, FRAC_PI_4};
use std::fmt::Display;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::{GeoWidgetsError, Result};
use crate::geometry::Coord;

/// Radius of the sphere used by Web Mercator, in meters.
pub const EARTH_RADIUS: f64 = 6_378_137.0;

/// Latitude at which Web Mercator becomes a square.
pub const MAX_MERCATOR_LATITUDE: f64 = 85.051_128_78;

static DMS: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r#"(?i)^\s*(\d+(?:\.\d+)?)\s*°?\s*(?:(\d+(?:\.\d+)?)\s*['′]?\s*)?(?:(\d+(?:\.\d+)?)\s*(?:"|″|'')?\s*)?([NSEW])\s*$"#,
    )
    .expect("Invalid DMS regex")
});

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Axis {
    Latitude,
    Longitude,
}

impl Axis {
    fn limit(&self) -> f64 {
        match self {
            Axis::Latitude => 90.,
            Axis::Longitude => 180.,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Hemisphere {
    N,
    S,
    E,
    W,
}

impl Hemisphere {
    pub fn axis(&self) -> Axis {
        match self {
            Hemisphere::N | Hemisphere::S => Axis::Latitude,
            Hemisphere::E | Hemisphere::W => Axis::Longitude,
        }
    }

    fn sign(&self) -> f64 {
        match self {
            Hemisphere::N | Hemisphere::E => 1.,
            Hemisphere::S | Hemisphere::W => -1.,
        }
    }

    fn from_letter(letter: &str) -> Option<Self> {
        match letter.to_ascii_uppercase().as_str() {
            "N" => Some(Hemisphere::N),
            "S" => Some(Hemisphere::S),
            "E" => Some(Hemisphere::E),
            "W" => Some(Hemisphere::W),
            _ => None,
        }
    }
}

/// An angle in degrees, minutes and seconds.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Dms {
    pub degrees: u32,
    pub minutes: u32,
    pub seconds: f64,
    pub hemisphere: Hemisphere,
}

impl Dms {
    pub fn to_decimal(&self) -> f64 {
        self.hemisphere.sign()
            * (self.degrees as f64 + self.minutes as f64 / 60. + self.seconds / 3600.)
    }
}

impl Display for Dms {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}°{}'{:.3}\"{:?}",
            self.degrees, self.minutes, self.seconds, self.hemisphere
        )
    }
}

fn check_range(value: f64, axis: Axis) -> Result<()> {
    if value.is_finite() && value.abs() <= axis.limit() {
        Ok(())
    } else {
        Err(GeoWidgetsError::InvalidCoordinate(format!(
            "{value} is not a valid {axis:?}",
        )))
    }
}

/// Convert decimal degrees to degrees, minutes and seconds.
///
/// Seconds are rounded to the millisecond, carrying into minutes and degrees.
///
/// ```
/// use geowidgets::algorithm::coords::{decimal_to_dms, Axis};
///
/// let dms = decimal_to_dms(52.52, Axis::Latitude).unwrap();
/// assert_eq!(dms.to_string(), "52°31'12.000\"N");
/// ```
pub fn decimal_to_dms(value: f64, axis: Axis) -> Result<Dms> {
    check_range(value, axis)?;

    let hemisphere = match (axis, value < 0.) {
        (Axis::Latitude, false) => Hemisphere::N,
        (Axis::Latitude, true) => Hemisphere::S,
        (Axis::Longitude, false) => Hemisphere::E,
        (Axis::Longitude, true) => Hemisphere::W,
    };

    let abs = value.abs();
    let mut degrees = abs.trunc() as u32;
    let total_minutes = abs.fract() * 60.;
    let mut minutes = total_minutes.trunc() as u32;
    let mut seconds = (total_minutes.fract() * 60. * 1000.).round() / 1000.;
    if seconds >= 60. {
        seconds -= 60.;
        minutes += 1;
    }
    if minutes >= 60 {
        minutes -= 60;
        degrees += 1;
    }

    Ok(Dms {
        degrees,
        minutes,
        seconds,
        hemisphere,
    })
}

/// Parse text such as `52°31'12"N`, `52 31 12 N` or `13.405E` into decimal degrees.
///
/// The hemisphere letter is required and decides which axis the value belongs to.
pub fn parse_dms(text: &str) -> Result<(f64, Axis)> {
    let invalid = || GeoWidgetsError::InvalidCoordinate(format!("cannot parse '{text}' as DMS"));

    let captures = DMS.captures(text).ok_or_else(invalid)?;
    let number = |idx: usize| -> Result<f64> {
        match captures.get(idx) {
            Some(m) => m.as_str().parse::<f64>().map_err(|_| invalid()),
            None => Ok(0.),
        }
    };
    let degrees = number(1)?;
    let minutes = number(2)?;
    let seconds = number(3)?;
    let hemisphere = captures
        .get(4)
        .and_then(|m| Hemisphere::from_letter(m.as_str()))
        .ok_or_else(invalid)?;

    if minutes >= 60. || seconds >= 60. {
        return Err(invalid());
    }

    let axis = hemisphere.axis();
    let value = hemisphere.sign() * (degrees + minutes / 60. + seconds / 3600.);
    check_range(value, axis)?;
    Ok((value, axis))
}

/// Project WGS84 longitude/latitude to Web Mercator meters.
///
/// Latitudes beyond [`MAX_MERCATOR_LATITUDE`] are clamped.
pub fn lonlat_to_web_mercator(coord: Coord) -> Result<Coord> {
    check_range(coord.x, Axis::Longitude)?;
    check_range(coord.y, Axis::Latitude)?;

    let lat = coord
        .y
        .clamp(-MAX_MERCATOR_LATITUDE, MAX_MERCATOR_LATITUDE)
        .to_radians();
    Ok(Coord::new(
        EARTH_RADIUS * coord.x.to_radians(),
        EARTH_RADIUS * (FRAC_PI_4 + lat / 2.).tan().ln(),
    ))
}

/// Unproject Web Mercator meters to WGS84 longitude/latitude.
pub fn web_mercator_to_lonlat(coord: Coord) -> Result<Coord> {
    if !coord.x.is_finite() || !coord.y.is_finite() {
        return Err(GeoWidgetsError::InvalidCoordinate(format!(
            "({}, {}) is not a finite Web Mercator position",
            coord.x, coord.y
        )));
    }
    Ok(Coord::new(
        (coord.x / EARTH_RADIUS).to_degrees(),
        (2. * (coord.y / EARTH_RADIUS).exp().atan() - FRAC_PI_2).to_degrees(),
    ))
}

#[cfg(test)]
mod test {
    use approx::assert_relative_eq;

    use super::*;

    #[test]
    fn to_dms() {
        let dms = decimal_to_dms(13.405, Axis::Longitude).unwrap();
        assert_eq!(dms.degrees, 13);
        assert_eq!(dms.minutes, 24);
        assert_relative_eq!(dms.seconds, 18., epsilon = 1e-9);
        assert_eq!(dms.hemisphere, Hemisphere::E);
    }

    #[test]
    fn negative_values() {
        let dms = decimal_to_dms(-33.8688, Axis::Latitude).unwrap();
        assert_eq!(dms.hemisphere, Hemisphere::S);
        assert_relative_eq!(dms.to_decimal(), -33.8688, epsilon = 1e-6);
    }

    #[test]
    fn seconds_carry() {
        let dms = decimal_to_dms(10.999_999_99, Axis::Longitude).unwrap();
        assert_eq!((dms.degrees, dms.minutes), (11, 0));
        assert_eq!(dms.seconds, 0.);
    }

    #[test]
    fn out_of_range() {
        assert!(decimal_to_dms(91., Axis::Latitude).is_err());
        assert!(decimal_to_dms(f64::NAN, Axis::Longitude).is_err());
        assert!(decimal_to_dms(179.5, Axis::Longitude).is_ok());
    }

    #[test]
    fn parse() {
        let (value, axis) = parse_dms("52°31'12\"N").unwrap();
        assert_relative_eq!(value, 52.52, epsilon = 1e-9);
        assert_eq!(axis, Axis::Latitude);

        let (value, axis) = parse_dms("13 24 18 w").unwrap();
        assert_relative_eq!(value, -13.405, epsilon = 1e-9);
        assert_eq!(axis, Axis::Longitude);

        let (value, _) = parse_dms("13.405E").unwrap();
        assert_relative_eq!(value, 13.405, epsilon = 1e-12);
    }

    #[test]
    fn parse_rejects() {
        for text in ["52°31'12\"", "52°61'N", "95N", "north"] {
            assert!(parse_dms(text).is_err(), "{text}");
        }
    }

    #[test]
    fn display_round_trip() {
        let dms = decimal_to_dms(-122.4194, Axis::Longitude).unwrap();
        let (value, _) = parse_dms(&dms.to_string()).unwrap();
        assert_relative_eq!(value, -122.4194, epsilon = 1e-6);
    }

    #[test]
    fn web_mercator_extent() {
        let corner = lonlat_to_web_mercator(Coord::new(180., MAX_MERCATOR_LATITUDE)).unwrap();
        assert_relative_eq!(corner.x, 20_037_508.342_789_244, max_relative = 1e-9);
        assert_relative_eq!(corner.y, 20_037_508.342_789_244, max_relative = 1e-6);
    }

    #[test]
    fn web_mercator_round_trip() {
        let berlin = Coord::new(13.405, 52.52);
        let projected = lonlat_to_web_mercator(berlin).unwrap();
        let back = web_mercator_to_lonlat(projected).unwrap();
        assert_relative_eq!(back.x, berlin.x, epsilon = 1e-9);
        assert_relative_eq!(back.y, berlin.y, epsilon = 1e-9);
    }

    #[test]
    fn web_mercator_clamps_poles() {
        let pole = lonlat_to_web_mercator(Coord::new(0., 90.)).unwrap();
        let limit = lonlat_to_web_mercator(Coord::new(0., MAX_MERCATOR_LATITUDE)).unwrap();
        assert_eq!(pole, limit);
    }
}
