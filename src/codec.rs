use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};
use tracing::{debug, warn};

use crate::error::FlightplanError;
use crate::geo;
use crate::options::{CodecOptions, FlightplanMetadata};
use crate::waypoint_types::*;

type Result<T> = std::result::Result<T, FlightplanError>;

/// Characters `encodeURI` leaves alone: the unreserved marks and the URI
/// reserved set. Everything else, non-ASCII included, becomes `%XX`.
const URI: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')')
    .remove(b';')
    .remove(b',')
    .remove(b'/')
    .remove(b'?')
    .remove(b':')
    .remove(b'@')
    .remove(b'&')
    .remove(b'=')
    .remove(b'+')
    .remove(b'$')
    .remove(b'#');

/// Length of `text` once URI-encoded, which is what the device's transport
/// budget is measured in.
pub fn encoded_len(text: &str) -> usize {
    utf8_percent_encode(text, URI).map(str::len).sum()
}

// serde_json writes NaN and infinities as `null`, which no parser takes back.
fn check_finite(field: &'static str, value: f64) -> Result<()> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(FlightplanError::NotFinite { field })
    }
}

/// Converts between planner waypoints and the device's flightplan JSON.
#[derive(Debug, Clone, Default)]
pub struct FlightplanCodec {
    options: CodecOptions,
}

impl FlightplanCodec {
    pub fn new(options: CodecOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &CodecOptions {
        &self.options
    }

    /// Build the canonical flightplan value for `waypoints`.
    pub fn build(&self, waypoints: &[Waypoint], meta: &FlightplanMetadata) -> Result<Flightplan> {
        let waypoints = waypoints
            .iter()
            .map(|wpt| {
                geo::check_coordinate(wpt.lat, wpt.lng)?;
                check_finite("alt", wpt.alt)?;
                check_finite("speed", wpt.speed)?;
                Ok(WireWaypoint {
                    lat: wpt.lat,
                    lng: wpt.lng,
                    alt: wpt.alt,
                    speed: wpt.speed,
                    drop: wpt.drop.to_wire_secs(meta.drop_secs),
                })
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Flightplan {
            version: self.options.version.clone(),
            version_fw: meta.version_fw.clone(),
            alt_samples: meta.alt_samples,
            waypoints,
        })
    }

    /// Encode `waypoints` as compact JSON within the configured size budget.
    ///
    /// Nothing is returned unless the whole plan fits.
    pub fn serialize(&self, waypoints: &[Waypoint], meta: &FlightplanMetadata) -> Result<String> {
        let fplan = self.build(waypoints, meta)?;
        let json = serde_json::to_string(&fplan)?;

        let len = encoded_len(&json);
        let max = self.options.max_encoded_len;
        if len > max {
            warn!(len, max, waypoints = waypoints.len(), "flightplan exceeds size budget");
            return Err(FlightplanError::TooLarge { len, max });
        }

        debug!(len, waypoints = waypoints.len(), "flightplan serialized");
        Ok(json)
    }

    /// Decode flightplan JSON, requiring this codec's exact version.
    pub fn parse(&self, text: &str) -> Result<DecodedFlightplan> {
        let fplan = self.decode(text)?;

        let waypoints = fplan
            .waypoints
            .iter()
            .zip(1..)
            .map(|(wpt, id)| Waypoint {
                id,
                lat: wpt.lat,
                lng: wpt.lng,
                alt: wpt.alt,
                speed: wpt.speed,
                drop: PayloadDrop::from_wire_secs(wpt.drop),
            })
            .collect();

        Ok(DecodedFlightplan {
            version_fw: fplan.version_fw,
            alt_samples: fplan.alt_samples,
            waypoints,
        })
    }

    /// Decode to the wire form without converting waypoints.
    pub fn decode(&self, text: &str) -> Result<Flightplan> {
        let fplan: Flightplan = serde_json::from_str(text).inspect_err(|e| {
            warn!(error = %e, "malformed flightplan");
        })?;

        if fplan.version != self.options.version {
            warn!(
                found = %fplan.version,
                expected = %self.options.version,
                "flightplan version mismatch"
            );
            return Err(FlightplanError::VersionMismatch {
                found: fplan.version,
                expected: self.options.version.clone(),
            });
        }

        debug!(waypoints = fplan.waypoints.len(), "flightplan decoded");
        Ok(fplan)
    }
}
