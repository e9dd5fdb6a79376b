//! Angle decoding and the local tangent-plane projection.
//!
//! The projection is the equirectangular approximation: good to the meter over a few
//! kilometers around the origin, wrong for long baselines and near the poles. It is not a
//! geodesic projection.

use num_traits::Float;

use crate::constants::EARTH_RADIUS_M;

/// Decodes an NMEA `DDDMM.MMMM` angle, negated for `S`/`W`.
///
/// Returns `None` if the field is empty or not a number.
pub fn parse_coordinate(field: &str, hemisphere: &str) -> Option<f64> {
    if field.is_empty() {
        return None;
    }
    let value: f64 = field.parse().ok()?;
    if !value.is_finite() {
        return None;
    }
    let degrees = Float::floor(value / 100.0);
    let minutes = value - degrees * 100.0;
    let decimal = degrees + minutes / 60.0;
    match hemisphere.as_bytes().first() {
        Some(b'S') | Some(b'W') => Some(-decimal),
        _ => Some(decimal),
    }
}

/// Decodes an NMEA `DDDMM.MMMM` angle to signed decimal degrees.
///
/// An empty or unreadable field yields `0.0`.
pub fn decode_coordinate(field: &str, hemisphere: &str) -> f64 {
    parse_coordinate(field, hemisphere).unwrap_or(0.0)
}

/// Offset in meters (east, north) of `(lat, lon)` from `(origin_lat, origin_lon)`.
pub fn project(lat: f64, lon: f64, origin_lat: f64, origin_lon: f64) -> (f64, f64) {
    let d_lat = Float::to_radians(lat - origin_lat);
    let d_lon = Float::to_radians(lon - origin_lon);
    let origin_lat_rad = Float::to_radians(origin_lat);

    let x = d_lon * Float::cos(origin_lat_rad) * EARTH_RADIUS_M;
    let y = d_lat * EARTH_RADIUS_M;
    (x, y)
}

/// Reference point of the local plane, captured from the first valid fix
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Origin {
    /// Latitude in degrees
    pub lat: f64,

    /// Longitude in degrees
    pub lon: f64,
}

impl Origin {
    pub const fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }

    /// Offset in meters (east, north) of a position from this origin.
    pub fn project(&self, lat: f64, lon: f64) -> (f64, f64) {
        project(lat, lon, self.lat, self.lon)
    }
}
