pub mod codec;
pub mod collection;
pub mod converter;
pub mod device;
pub mod error;
pub mod geo;
pub mod options;
pub mod waypoint_types;

use wasm_bindgen::prelude::*;

use crate::codec::FlightplanCodec;
use crate::collection::WaypointCollection;
use crate::geo::Distance;
use crate::options::PlannerSettings;
use crate::waypoint_types::{PayloadDrop, WaypointUpdate};

/// Planner state owned by one map/table view.
#[wasm_bindgen]
pub struct Planner {
    waypoints: WaypointCollection,
    codec: FlightplanCodec,
    settings: PlannerSettings,
}

#[wasm_bindgen]
impl Planner {
    #[wasm_bindgen(constructor)]
    pub fn new(settings: JsValue) -> Result<Planner, JsValue> {
        console_error_panic_hook::set_once();

        let settings = parse_settings(settings)?;
        Ok(Planner {
            waypoints: WaypointCollection::new(),
            codec: FlightplanCodec::new(settings.codec_options()),
            settings,
        })
    }

    /// Add a waypoint clicked on the map, with the default altitude and speed.
    #[wasm_bindgen(js_name = addWaypoint)]
    pub fn add_waypoint(&mut self, lat: f64, lng: f64) -> Result<u32, JsValue> {
        let (alt, speed) = (self.settings.default_alt, self.settings.default_speed);
        Ok(self
            .waypoints
            .append_from_map(lat, lng, alt, speed, PayloadDrop::Hold)?)
    }

    #[wasm_bindgen(js_name = addWaypointManual)]
    pub fn add_waypoint_manual(
        &mut self,
        lat: f64,
        lng: f64,
        alt: f64,
        speed: f64,
        drop: bool,
    ) -> Result<u32, JsValue> {
        Ok(self
            .waypoints
            .append_from_map(lat, lng, alt, speed, drop.into())?)
    }

    #[wasm_bindgen(js_name = updateWaypoint)]
    pub fn update_waypoint(&mut self, id: u32, fields: JsValue) -> Result<(), JsValue> {
        let fields: WaypointUpdate = serde_wasm_bindgen::from_value(fields)
            .map_err(|e| JsValue::from_str(&e.to_string()))?;
        Ok(self.waypoints.update(id, &fields)?)
    }

    #[wasm_bindgen(js_name = moveWaypoint)]
    pub fn move_waypoint(&mut self, id: u32, lat: f64, lng: f64) -> Result<(), JsValue> {
        Ok(self.waypoints.move_to(id, lat, lng)?)
    }

    #[wasm_bindgen(js_name = removeWaypoint)]
    pub fn remove_waypoint(&mut self, id: u32) -> Result<(), JsValue> {
        self.waypoints.remove(id)?;
        Ok(())
    }

    /// Current waypoints in flight order.
    pub fn waypoints(&self) -> Result<JsValue, JsValue> {
        serde_wasm_bindgen::to_value(self.waypoints.as_slice())
            .map_err(|e| JsValue::from_str(&e.to_string()))
    }

    /// Formatted length of each leg, for the waypoint table.
    #[wasm_bindgen(js_name = legDistances)]
    pub fn leg_distances(&self) -> js_sys::Array {
        self.waypoints
            .leg_distances()
            .iter()
            .map(|d| JsValue::from_str(&d.to_string()))
            .collect()
    }

    /// Markers and route line as a GeoJSON FeatureCollection string.
    #[wasm_bindgen(js_name = toGeoJson)]
    pub fn to_geojson(&self) -> Result<String, JsValue> {
        let fc = converter::to_feature_collection(self.waypoints.as_slice());
        serde_json::to_string(&fc).map_err(|e| JsValue::from_str(&e.to_string()))
    }

    #[wasm_bindgen(js_name = canUpload)]
    pub fn can_upload(&self) -> bool {
        self.waypoints.is_uploadable()
    }

    /// Serialize the current waypoints for upload.
    #[wasm_bindgen(js_name = exportFlightplan)]
    pub fn export_flightplan(&self) -> Result<String, JsValue> {
        Ok(self
            .codec
            .serialize(self.waypoints.as_slice(), &self.settings.metadata())?)
    }

    /// Replace the current waypoints with a downloaded flightplan. On error
    /// the current waypoints are kept.
    #[wasm_bindgen(js_name = importFlightplan)]
    pub fn import_flightplan(&mut self, text: &str) -> Result<u32, JsValue> {
        let fplan = self.codec.parse(text)?;
        self.waypoints.load(fplan.waypoints);
        Ok(self.waypoints.len() as u32)
    }
}

/// Parse flightplan JSON into its header and numbered waypoints.
#[wasm_bindgen(js_name = parseFlightplan)]
pub fn parse_flightplan(text: &str) -> Result<JsValue, JsValue> {
    console_error_panic_hook::set_once();

    let fplan = FlightplanCodec::default().parse(text)?;
    serde_wasm_bindgen::to_value(&fplan).map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Check flightplan JSON against both the codec and the device's limits.
#[wasm_bindgen(js_name = checkFlightplan)]
pub fn check_flightplan(text: &str) -> Result<(), JsValue> {
    console_error_panic_hook::set_once();

    let fplan = FlightplanCodec::default().decode(text)?;
    device::check_device_limits(&fplan).map_err(JsValue::from)
}

#[wasm_bindgen(js_name = distanceBetween)]
pub fn distance_between(lat1: f64, lng1: f64, lat2: f64, lng2: f64) -> String {
    Distance::between(lat1, lng1, lat2, lng2).to_string()
}

fn parse_settings(settings: JsValue) -> Result<PlannerSettings, JsValue> {
    if settings.is_undefined() || settings.is_null() {
        Ok(PlannerSettings::default())
    } else {
        serde_wasm_bindgen::from_value(settings).map_err(|e| JsValue::from_str(&e.to_string()))
    }
}
