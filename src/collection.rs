use tracing::{debug, warn};

use crate::error::FlightplanError;
use crate::geo::{self, Distance};
use crate::waypoint_types::{PayloadDrop, Waypoint, WaypointUpdate};

type Result<T> = std::result::Result<T, FlightplanError>;

/// Fewer waypoints than this do not make a flightplan worth uploading.
pub const MIN_UPLOAD_WAYPOINTS: usize = 2;

pub const ALT_RANGE_FT: (f64, f64) = (0.0, 400.0);
pub const SPEED_RANGE_KT: (f64, f64) = (1.0, 100.0);

/// Ordered waypoints backing the map and the waypoint table.
///
/// Ids always run `1..=len()` in flight order. Adding a waypoint rejects bad
/// coordinates; editing one clamps to the input ranges instead.
#[derive(Debug, Clone, Default)]
pub struct WaypointCollection {
    waypoints: Vec<Waypoint>,
}

impl WaypointCollection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.waypoints.len()
    }

    pub fn is_empty(&self) -> bool {
        self.waypoints.is_empty()
    }

    pub fn is_uploadable(&self) -> bool {
        self.waypoints.len() >= MIN_UPLOAD_WAYPOINTS
    }

    pub fn get(&self, id: u32) -> Option<&Waypoint> {
        self.index_of(id).map(|i| &self.waypoints[i])
    }

    /// Append a waypoint and return its id.
    pub fn append(
        &mut self,
        lat: f64,
        lng: f64,
        alt: f64,
        speed: f64,
        drop: PayloadDrop,
    ) -> Result<u32> {
        if let Err(e) = geo::check_coordinate(lat, lng) {
            warn!(lat, lng, "rejected waypoint outside coordinate bounds");
            return Err(e);
        }
        Ok(self.push(lat, lng, alt, speed, drop))
    }

    /// Append a waypoint picked on the map or typed in by hand. Also enforces
    /// the map projection's latitude limit.
    pub fn append_from_map(
        &mut self,
        lat: f64,
        lng: f64,
        alt: f64,
        speed: f64,
        drop: PayloadDrop,
    ) -> Result<u32> {
        if let Err(e) = geo::check_map_coordinate(lat, lng) {
            warn!(lat, lng, "rejected waypoint outside map bounds");
            return Err(e);
        }
        Ok(self.push(lat, lng, alt, speed, drop))
    }

    fn push(&mut self, lat: f64, lng: f64, alt: f64, speed: f64, drop: PayloadDrop) -> u32 {
        let id = self.next_id();
        self.waypoints.push(Waypoint {
            id,
            lat,
            lng,
            alt,
            speed,
            drop,
        });
        debug!(id, lat, lng, "waypoint added");
        id
    }

    /// Apply a partial edit. Out-of-range values are clamped.
    pub fn update(&mut self, id: u32, fields: &WaypointUpdate) -> Result<()> {
        let index = self.index_of(id).ok_or(FlightplanError::UnknownId(id))?;

        // Validate everything before touching the waypoint.
        let lat = fields.lat.map(|v| clamp("lat", v, -90.0, 90.0)).transpose()?;
        let lng = fields.lng.map(|v| clamp("lng", v, -180.0, 180.0)).transpose()?;
        let alt = fields
            .alt
            .map(|v| clamp("alt", v, ALT_RANGE_FT.0, ALT_RANGE_FT.1))
            .transpose()?;
        let speed = fields
            .speed
            .map(|v| clamp("speed", v, SPEED_RANGE_KT.0, SPEED_RANGE_KT.1))
            .transpose()?;

        let wpt = &mut self.waypoints[index];
        if let Some(lat) = lat {
            wpt.lat = lat;
        }
        if let Some(lng) = lng {
            wpt.lng = lng;
        }
        if let Some(alt) = alt {
            wpt.alt = alt;
        }
        if let Some(speed) = speed {
            wpt.speed = speed;
        }
        if let Some(drop) = fields.drop {
            wpt.drop = drop;
        }
        debug!(id, "waypoint updated");
        Ok(())
    }

    /// Reposition a waypoint, e.g. after a marker drag.
    pub fn move_to(&mut self, id: u32, lat: f64, lng: f64) -> Result<()> {
        self.update(
            id,
            &WaypointUpdate {
                lat: Some(lat),
                lng: Some(lng),
                ..Default::default()
            },
        )
    }

    /// Remove a waypoint and renumber the rest by their current order.
    pub fn remove(&mut self, id: u32) -> Result<Waypoint> {
        let index = self.index_of(id).ok_or(FlightplanError::UnknownId(id))?;
        let removed = self.waypoints.remove(index);
        self.renumber();
        debug!(id, remaining = self.waypoints.len(), "waypoint removed");
        Ok(removed)
    }

    pub fn clear(&mut self) {
        self.waypoints.clear();
    }

    /// Replace the contents, e.g. with a downloaded flightplan.
    pub fn load(&mut self, waypoints: impl IntoIterator<Item = Waypoint>) {
        self.waypoints = waypoints.into_iter().collect();
        self.renumber();
        debug!(count = self.waypoints.len(), "waypoints loaded");
    }

    pub fn snapshot(&self) -> Vec<Waypoint> {
        self.waypoints.clone()
    }

    pub fn as_slice(&self) -> &[Waypoint] {
        &self.waypoints
    }

    /// Length of each leg, first waypoint to last.
    pub fn leg_distances(&self) -> Vec<Distance> {
        self.waypoints
            .windows(2)
            .map(|pair| Distance::between(pair[0].lat, pair[0].lng, pair[1].lat, pair[1].lng))
            .collect()
    }

    fn next_id(&self) -> u32 {
        self.waypoints.len() as u32 + 1
    }

    fn index_of(&self, id: u32) -> Option<usize> {
        let index = (id as usize).checked_sub(1)?;
        (index < self.waypoints.len()).then_some(index)
    }

    fn renumber(&mut self) {
        for (i, wpt) in self.waypoints.iter_mut().enumerate() {
            wpt.id = i as u32 + 1;
        }
    }
}

fn clamp(field: &'static str, value: f64, min: f64, max: f64) -> Result<f64> {
    if value.is_finite() {
        Ok(value.clamp(min, max))
    } else {
        Err(FlightplanError::NotFinite { field })
    }
}
