use proptest::prelude::*;

use flightplan_wasm::codec::FlightplanCodec;
use flightplan_wasm::collection::WaypointCollection;
use flightplan_wasm::error::FlightplanError;
use flightplan_wasm::options::{CodecOptions, FlightplanMetadata};
use flightplan_wasm::waypoint_types::PayloadDrop;

#[derive(Debug, Clone)]
struct Input {
    lat: f64,
    lng: f64,
    alt: f64,
    speed: f64,
    drop: bool,
}

fn input() -> impl Strategy<Value = Input> {
    (
        -89.999_999f64..89.999_999,
        -179.999_999f64..=180.0,
        0.0f64..=400.0,
        1.0f64..=100.0,
        any::<bool>(),
    )
        .prop_map(|(lat, lng, alt, speed, drop)| Input {
            lat,
            lng,
            alt,
            speed,
            drop,
        })
}

fn collect(inputs: &[Input]) -> WaypointCollection {
    let mut wpts = WaypointCollection::new();
    for i in inputs {
        wpts.append(i.lat, i.lng, i.alt, i.speed, i.drop.into()).unwrap();
    }
    wpts
}

fn unbounded_codec() -> FlightplanCodec {
    FlightplanCodec::new(CodecOptions {
        max_encoded_len: usize::MAX,
        ..Default::default()
    })
}

proptest! {
    #[test]
    fn append_assigns_next_id(inputs in prop::collection::vec(input(), 0..20), extra in input()) {
        let mut wpts = collect(&inputs);
        let before = wpts.len() as u32;
        let id = wpts.append(extra.lat, extra.lng, extra.alt, extra.speed, extra.drop.into()).unwrap();
        prop_assert_eq!(id, before + 1);
        let snapshot = wpts.snapshot();
        prop_assert_eq!(snapshot.last().map(|w| w.id), Some(before + 1));
    }

    #[test]
    fn remove_keeps_ids_contiguous(inputs in prop::collection::vec(input(), 1..20), pick in any::<prop::sample::Index>()) {
        let mut wpts = collect(&inputs);
        let id = pick.index(inputs.len()) as u32 + 1;
        wpts.remove(id).unwrap();

        let ids: Vec<u32> = wpts.snapshot().iter().map(|w| w.id).collect();
        let expected: Vec<u32> = (1..=inputs.len() as u32 - 1).collect();
        prop_assert_eq!(ids, expected);
    }

    #[test]
    fn serialize_parse_round_trip(inputs in prop::collection::vec(input(), 0..30), drop_secs in 1u32..=60) {
        let wpts = collect(&inputs);
        let codec = unbounded_codec();
        let meta = FlightplanMetadata { drop_secs, ..Default::default() };

        let json = codec.serialize(wpts.as_slice(), &meta).unwrap();
        let fplan = codec.parse(&json).unwrap();

        prop_assert_eq!(fplan.waypoints.len(), inputs.len());
        for (got, want) in fplan.waypoints.iter().zip(wpts.as_slice()) {
            prop_assert_eq!(got.id, want.id);
            prop_assert!((got.lat - want.lat).abs() < 1e-9);
            prop_assert!((got.lng - want.lng).abs() < 1e-9);
            prop_assert!((got.alt - want.alt).abs() < 1e-9);
            prop_assert!((got.speed - want.speed).abs() < 1e-9);
            prop_assert_eq!(got.drop, want.drop);
        }
    }

    #[test]
    fn oversize_is_rejected_without_mutation(inputs in prop::collection::vec(input(), 1..20)) {
        let wpts = collect(&inputs);
        let before = wpts.snapshot();
        let meta = FlightplanMetadata::default();

        let json = unbounded_codec().serialize(wpts.as_slice(), &meta).unwrap();
        let tight = FlightplanCodec::new(CodecOptions {
            max_encoded_len: json.len(),
            ..Default::default()
        });
        let is_too_large = matches!(
            tight.serialize(wpts.as_slice(), &meta),
            Err(FlightplanError::TooLarge { .. })
        );
        prop_assert!(is_too_large);
        prop_assert_eq!(wpts.snapshot(), before);
    }

    #[test]
    fn foreign_version_is_rejected(version in "[0-9a-z. ]{0,8}", inputs in prop::collection::vec(input(), 0..5)) {
        prop_assume!(version != "1.0");
        let codec = unbounded_codec();
        let json = codec.serialize(collect(&inputs).as_slice(), &FlightplanMetadata::default()).unwrap();
        let foreign = json.replacen(r#""version":"1.0""#, &format!(r#""version":"{version}""#), 1);

        let is_mismatch = matches!(
            codec.parse(&foreign),
            Err(FlightplanError::VersionMismatch { .. })
        );
        prop_assert!(is_mismatch);
    }
}

#[test]
fn poles_are_excluded() {
    let mut wpts = WaypointCollection::new();
    assert!(wpts.append(90.0, 0.0, 100.0, 25.0, PayloadDrop::Hold).is_err());
    assert!(wpts.append(-90.0, 0.0, 100.0, 25.0, PayloadDrop::Hold).is_err());
    assert!(wpts.is_empty());
    assert!(wpts.append(89.999_999_9, 0.0, 100.0, 25.0, PayloadDrop::Hold).is_ok());
}
