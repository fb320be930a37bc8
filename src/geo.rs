use std::fmt;

use crate::error::FlightplanError;

/// Mean Earth radius in meters.
pub const EARTH_RADIUS_M: f64 = 6_371_000.0;

pub const METERS_PER_NAUTICAL_MILE: f64 = 1852.0;

/// Latitude limit of the Web-Mercator map projection.
pub const MERCATOR_LAT_LIMIT: f64 = 85.05112878;

/// Codec-level latitude rule: poles excluded.
pub fn is_valid_lat(lat: f64) -> bool {
    lat > -90.0 && lat < 90.0
}

/// Codec-level longitude rule: -180 excluded, 180 included.
pub fn is_valid_lng(lng: f64) -> bool {
    lng > -180.0 && lng <= 180.0
}

pub fn check_coordinate(lat: f64, lng: f64) -> Result<(), FlightplanError> {
    if is_valid_lat(lat) && is_valid_lng(lng) {
        Ok(())
    } else {
        Err(FlightplanError::InvalidCoordinate { lat, lng })
    }
}

/// Bounds a point picked on the map must satisfy, on top of [`check_coordinate`].
pub fn check_map_coordinate(lat: f64, lng: f64) -> Result<(), FlightplanError> {
    check_coordinate(lat, lng)?;
    if (-MERCATOR_LAT_LIMIT..=MERCATOR_LAT_LIMIT).contains(&lat) && (-180.0..=180.0).contains(&lng)
    {
        Ok(())
    } else {
        Err(FlightplanError::InvalidCoordinate { lat, lng })
    }
}

/// Great-circle distance in meters (haversine).
pub fn distance_m(lat1: f64, lng1: f64, lat2: f64, lng2: f64) -> f64 {
    let d_lat = (lat2 - lat1).to_radians();
    let d_lng = (lng2 - lng1).to_radians();

    let a = (d_lat / 2.0).sin().powi(2)
        + lat1.to_radians().cos() * lat2.to_radians().cos() * (d_lng / 2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());

    EARTH_RADIUS_M * c
}

/// A leg length as shown in the waypoint table.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Distance {
    /// Rounded to a tenth of a meter.
    Meters(f64),
    NauticalMiles(f64),
}

impl Distance {
    /// Meters below 1000 m, nautical miles from there on.
    pub fn from_meters(meters: f64) -> Self {
        if meters >= 1000.0 {
            Self::NauticalMiles(meters / METERS_PER_NAUTICAL_MILE)
        } else {
            Self::Meters((meters * 10.0).round() / 10.0)
        }
    }

    pub fn between(lat1: f64, lng1: f64, lat2: f64, lng2: f64) -> Self {
        Self::from_meters(distance_m(lat1, lng1, lat2, lng2))
    }
}

impl fmt::Display for Distance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Meters(m) => write!(f, "{m}m"),
            Self::NauticalMiles(nm) => write!(f, "{nm:.2}nm"),
        }
    }
}
