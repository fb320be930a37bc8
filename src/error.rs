use thiserror::Error;
use wasm_bindgen::JsValue;

#[derive(Debug, Error)]
pub enum FlightplanError {
    #[error("invalid coordinates ({lat}, {lng})")]
    InvalidCoordinate { lat: f64, lng: f64 },
    #[error("no waypoint with id {0}")]
    UnknownId(u32),
    #[error("flightplan is too large ({len} encoded bytes, limit is {max})")]
    TooLarge { len: usize, max: usize },
    #[error("malformed flightplan: {0}")]
    MalformedInput(#[from] serde_json::Error),
    #[error("flightplan version '{found}' does not match expected version '{expected}'")]
    VersionMismatch { found: String, expected: String },
    #[error("{field} must be a finite number")]
    NotFinite { field: &'static str },
    /// `index` is the 1-based waypoint number, or 0 for a header field.
    #[error("outside device limits at item {index}: {reason}")]
    DeviceLimit { index: usize, reason: String },
}

impl From<FlightplanError> for JsValue {
    fn from(e: FlightplanError) -> Self {
        JsValue::from_str(&e.to_string())
    }
}
