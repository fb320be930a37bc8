use serde::{Deserialize, Serialize};

/// Whether the payload is released at a waypoint.
///
/// The map and table views treat this as a flag. On the wire it is a drop
/// duration in seconds, where `0` means no drop.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "bool", into = "bool")]
pub enum PayloadDrop {
    #[default]
    Hold,
    Release,
}

impl PayloadDrop {
    pub fn is_release(self) -> bool {
        self == Self::Release
    }

    /// Wire form: the configured drop duration when releasing, otherwise zero.
    pub fn to_wire_secs(self, drop_secs: u32) -> f64 {
        match self {
            Self::Release => f64::from(drop_secs),
            Self::Hold => 0.0,
        }
    }

    pub fn from_wire_secs(secs: f64) -> Self {
        if secs > 0.0 { Self::Release } else { Self::Hold }
    }
}

impl From<bool> for PayloadDrop {
    fn from(release: bool) -> Self {
        if release { Self::Release } else { Self::Hold }
    }
}

impl From<PayloadDrop> for bool {
    fn from(drop: PayloadDrop) -> Self {
        drop.is_release()
    }
}

/// A waypoint as held by the planner.
///
/// `id` is the 1-based position in flight order and is rewritten whenever the
/// order changes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Waypoint {
    pub id: u32,
    pub lat: f64,
    pub lng: f64,
    /// Feet.
    pub alt: f64,
    /// Knots.
    pub speed: f64,
    pub drop: PayloadDrop,
}

/// Partial edit of a waypoint; `None` leaves the field as is.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct WaypointUpdate {
    pub lat: Option<f64>,
    pub lng: Option<f64>,
    pub alt: Option<f64>,
    pub speed: Option<f64>,
    pub drop: Option<PayloadDrop>,
}

/// A waypoint as exchanged with the device. Carries no id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WireWaypoint {
    pub lat: f64,
    pub lng: f64,
    pub alt: f64,
    pub speed: f64,
    /// Drop duration in seconds.
    pub drop: f64,
}

/// Canonical wire form of a flightplan. Field order is the encoded key order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Flightplan {
    pub version: String,
    pub version_fw: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alt_samples: Option<i32>,
    pub waypoints: Vec<WireWaypoint>,
}

/// Result of decoding a flightplan: header metadata plus numbered waypoints.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DecodedFlightplan {
    pub version_fw: String,
    pub alt_samples: Option<i32>,
    pub waypoints: Vec<Waypoint>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_drop_wire_mapping() {
        assert_eq!(PayloadDrop::Release.to_wire_secs(10), 10.0);
        assert_eq!(PayloadDrop::Hold.to_wire_secs(10), 0.0);
        assert_eq!(PayloadDrop::from_wire_secs(10.0), PayloadDrop::Release);
        assert_eq!(PayloadDrop::from_wire_secs(0.5), PayloadDrop::Release);
        assert_eq!(PayloadDrop::from_wire_secs(0.0), PayloadDrop::Hold);
        assert_eq!(PayloadDrop::from_wire_secs(-3.0), PayloadDrop::Hold);
    }

    #[test]
    fn test_drop_view_form_is_bool() {
        let wpt = Waypoint {
            id: 1,
            lat: 40.0,
            lng: -74.0,
            alt: 100.0,
            speed: 25.0,
            drop: PayloadDrop::Release,
        };
        let json = serde_json::to_value(&wpt).unwrap();
        assert_eq!(json["drop"], true);

        let update: WaypointUpdate = serde_json::from_str(r#"{"drop":false,"alt":120}"#).unwrap();
        assert_eq!(update.drop, Some(PayloadDrop::Hold));
        assert_eq!(update.alt, Some(120.0));
        assert!(update.lat.is_none());
    }

    #[test]
    fn test_alt_samples_omitted_when_unset() {
        let fplan = Flightplan {
            version: "1.0".to_string(),
            version_fw: "1.0.0".to_string(),
            alt_samples: None,
            waypoints: Vec::new(),
        };
        let json = serde_json::to_string(&fplan).unwrap();
        assert_eq!(json, r#"{"version":"1.0","version_fw":"1.0.0","waypoints":[]}"#);
    }
}
