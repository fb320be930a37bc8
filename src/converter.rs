use geojson::{Feature, FeatureCollection, Geometry, Value};
use serde_json::{Map, Value as JsonValue};

use crate::waypoint_types::Waypoint;

/// Render waypoints for the map: one marker per waypoint, then the route line.
pub fn to_feature_collection(waypoints: &[Waypoint]) -> FeatureCollection {
    let mut features: Vec<Feature> = waypoints.iter().map(waypoint_to_feature).collect();

    if waypoints.len() >= 2 {
        features.push(route_to_feature(waypoints));
    }

    FeatureCollection {
        bbox: None,
        features,
        foreign_members: None,
    }
}

fn waypoint_to_feature(wpt: &Waypoint) -> Feature {
    let geometry = Geometry::new(Value::Point(point_coords(wpt)));

    let mut props = Map::new();
    props.insert("kind".to_string(), JsonValue::String("waypoint".to_string()));
    props.insert("id".to_string(), JsonValue::Number(wpt.id.into()));
    insert_number(&mut props, "alt", wpt.alt);
    insert_number(&mut props, "speed", wpt.speed);
    props.insert("drop".to_string(), JsonValue::Bool(wpt.drop.is_release()));

    Feature {
        bbox: None,
        geometry: Some(geometry),
        id: None,
        properties: Some(props),
        foreign_members: None,
    }
}

fn route_to_feature(waypoints: &[Waypoint]) -> Feature {
    let coords: Vec<Vec<f64>> = waypoints.iter().map(point_coords).collect();
    let geometry = Geometry::new(Value::LineString(coords));

    let mut props = Map::new();
    props.insert("kind".to_string(), JsonValue::String("route".to_string()));

    Feature {
        bbox: None,
        geometry: Some(geometry),
        id: None,
        properties: Some(props),
        foreign_members: None,
    }
}

/// GeoJSON order: [lng, lat].
fn point_coords(wpt: &Waypoint) -> Vec<f64> {
    vec![wpt.lng, wpt.lat]
}

fn insert_number(props: &mut Map<String, JsonValue>, key: &str, value: f64) {
    if let Some(n) = serde_json::Number::from_f64(value) {
        props.insert(key.to_string(), JsonValue::Number(n));
    }
}
