//! Acceptance rules the flight controller applies to a received flightplan.
//!
//! The codec only enforces what the planner needs; these checks catch a plan
//! the device would still refuse, before it is sent.

use crate::error::FlightplanError;
use crate::waypoint_types::{Flightplan, WireWaypoint};

pub const MAX_ALT_FT: f64 = 400.0;
pub const MAX_SPEED_KT: f64 = 100.0;
pub const MAX_DROP_SECS: f64 = 60.0;
pub const MAX_ALT_SAMPLES: i32 = 100;

/// Longest `version_fw` the device will copy.
pub const MAX_VERSION_FW_LEN: usize = 63;

/// Index reported for header fields rather than waypoints.
pub const HEADER_INDEX: usize = 0;

pub fn check_device_limits(fplan: &Flightplan) -> Result<(), FlightplanError> {
    if !is_firmware_version(&fplan.version_fw) {
        return Err(limit(
            HEADER_INDEX,
            format!("firmware version '{}' is not a semantic version", fplan.version_fw),
        ));
    }

    match fplan.alt_samples {
        None => return Err(limit(HEADER_INDEX, "altitude samples missing".to_string())),
        Some(samples) if !(0..=MAX_ALT_SAMPLES).contains(&samples) => {
            return Err(limit(
                HEADER_INDEX,
                format!("altitude samples {samples} not in 0..={MAX_ALT_SAMPLES}"),
            ));
        }
        Some(_) => {}
    }

    for (wpt, index) in fplan.waypoints.iter().zip(1..) {
        if let Some(reason) = waypoint_problem(wpt) {
            return Err(limit(index, reason));
        }
    }

    Ok(())
}

fn limit(index: usize, reason: String) -> FlightplanError {
    FlightplanError::DeviceLimit { index, reason }
}

fn waypoint_problem(wpt: &WireWaypoint) -> Option<String> {
    if !(wpt.lat.abs() <= 90.0 && wpt.lng.abs() <= 180.0) {
        Some(format!("coordinates ({}, {}) out of range", wpt.lat, wpt.lng))
    } else if !(0.0..=MAX_ALT_FT).contains(&wpt.alt) {
        Some(format!("altitude {} not in 0..={MAX_ALT_FT}", wpt.alt))
    } else if !(0.0..=MAX_SPEED_KT).contains(&wpt.speed) {
        Some(format!("speed {} not in 0..={MAX_SPEED_KT}", wpt.speed))
    } else if !(0.0..=MAX_DROP_SECS).contains(&wpt.drop) {
        Some(format!("drop time {} not in 0..={MAX_DROP_SECS}", wpt.drop))
    } else {
        None
    }
}

/// `MAJOR[.MINOR[.PATCH]]` with an optional `-pre` and `+build` suffix. An
/// empty string is accepted: the device then uses the version it has stored.
fn is_firmware_version(version: &str) -> bool {
    if version.is_empty() {
        return true;
    }
    if version.len() > MAX_VERSION_FW_LEN {
        return false;
    }

    let (rest, build) = match version.split_once('+') {
        Some((rest, build)) => (rest, Some(build)),
        None => (version, None),
    };
    let (core, pre) = match rest.split_once('-') {
        Some((core, pre)) => (core, Some(pre)),
        None => (rest, None),
    };

    let is_ident = |s: &str| {
        !s.is_empty() && s.chars().all(|c| c.is_ascii_alphanumeric() || c == '.' || c == '-')
    };
    if !pre.is_none_or(is_ident) || !build.is_none_or(is_ident) {
        return false;
    }

    let parts: Vec<&str> = core.split('.').collect();
    parts.len() <= 3
        && parts
            .iter()
            .all(|p| !p.is_empty() && p.chars().all(|c| c.is_ascii_digit()))
}
