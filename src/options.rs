use serde::Deserialize;

/// Format version written by this codec and required on parse.
pub const GENERATOR_VERSION: &str = "1.0";

/// Firmware format the generated plans target unless configured otherwise.
pub const FIRMWARE_VERSION: &str = "1.0.0";

/// Encoded-size budget of the receiving device.
pub const DEFAULT_MAX_ENCODED_LEN: usize = 16_384;

/// Planner settings, as kept by the settings store of the UI.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlannerSettings {
    /// Number of altitude samples the device takes before auto mode (default: 10)
    #[serde(default = "default_alt_samples")]
    pub alt_samples: Option<i32>,

    /// Drop duration in seconds for waypoints flagged as drop points (default: 10)
    #[serde(default = "default_drop_secs")]
    pub drop_secs: u32,

    /// Speed in knots given to waypoints added from the map (default: 25)
    #[serde(default = "default_speed")]
    pub default_speed: f64,

    /// Altitude in feet given to waypoints added from the map (default: 20)
    #[serde(default = "default_alt")]
    pub default_alt: f64,

    /// Maximum percent-encoded length of a generated flightplan (default: 16384)
    #[serde(default = "default_max_encoded_len")]
    pub max_encoded_len: usize,

    /// Firmware version written into generated flightplans (default: "1.0.0")
    #[serde(default = "default_firmware_version")]
    pub firmware_version: String,
}

impl Default for PlannerSettings {
    fn default() -> Self {
        Self {
            alt_samples: default_alt_samples(),
            drop_secs: default_drop_secs(),
            default_speed: default_speed(),
            default_alt: default_alt(),
            max_encoded_len: default_max_encoded_len(),
            firmware_version: default_firmware_version(),
        }
    }
}

impl PlannerSettings {
    pub fn codec_options(&self) -> CodecOptions {
        CodecOptions {
            max_encoded_len: self.max_encoded_len,
            ..Default::default()
        }
    }

    pub fn metadata(&self) -> FlightplanMetadata {
        FlightplanMetadata {
            version_fw: self.firmware_version.clone(),
            alt_samples: self.alt_samples,
            drop_secs: self.drop_secs,
        }
    }
}

/// Construction-time parameters of a [`crate::codec::FlightplanCodec`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodecOptions {
    pub version: String,
    pub max_encoded_len: usize,
}

impl Default for CodecOptions {
    fn default() -> Self {
        Self {
            version: GENERATOR_VERSION.to_string(),
            max_encoded_len: DEFAULT_MAX_ENCODED_LEN,
        }
    }
}

/// Header values copied into a flightplan at serialize time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlightplanMetadata {
    pub version_fw: String,
    pub alt_samples: Option<i32>,
    pub drop_secs: u32,
}

impl Default for FlightplanMetadata {
    fn default() -> Self {
        PlannerSettings::default().metadata()
    }
}

fn default_alt_samples() -> Option<i32> {
    Some(10)
}

fn default_drop_secs() -> u32 {
    10
}

fn default_speed() -> f64 {
    25.0
}

fn default_alt() -> f64 {
    20.0
}

fn default_max_encoded_len() -> usize {
    DEFAULT_MAX_ENCODED_LEN
}

fn default_firmware_version() -> String {
    FIRMWARE_VERSION.to_string()
}
