//! Heatmap overlay data and the dark base-map style.

use serde::Serialize;

use crate::models::GeoPoint;

pub const DARK_MAP_ID: &str = "dark_map";
pub const DARK_MAP_NAME: &str = "Dark Map";

/// Overlay color ramp, transparent cyan through blue to red.
pub const GRADIENT: [&str; 14] = [
    "rgba(0, 255, 255, 0)",
    "rgba(0, 255, 255, 1)",
    "rgba(0, 191, 255, 1)",
    "rgba(0, 127, 255, 1)",
    "rgba(0, 63, 255, 1)",
    "rgba(0, 0, 255, 1)",
    "rgba(0, 0, 223, 1)",
    "rgba(0, 0, 191, 1)",
    "rgba(0, 0, 159, 1)",
    "rgba(0, 0, 127, 1)",
    "rgba(63, 0, 91, 1)",
    "rgba(127, 0, 63, 1)",
    "rgba(191, 0, 31, 1)",
    "rgba(255, 0, 0, 1)",
];

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LatLng {
    pub lat: f64,
    pub lng: f64,
}

/// A location with its heat contribution.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct WeightedPoint {
    pub lat: f64,
    pub lng: f64,
    pub weight: f64,
}

/// Weight each point by its call count, or by 1 when no count is given.
pub fn weighted_points(points: &[GeoPoint]) -> Vec<WeightedPoint> {
    points
        .iter()
        .map(|p| WeightedPoint {
            lat: p.lat,
            lng: p.lng,
            weight: p.count.map(f64::from).unwrap_or(1.0),
        })
        .collect()
}

/// Initial map options (San Francisco, street level).
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MapSettings {
    pub zoom: u8,
    pub center: LatLng,
    pub gesture_handling: &'static str,
    pub map_type_id: &'static str,
}

impl Default for MapSettings {
    fn default() -> Self {
        MapSettings {
            zoom: 13,
            center: LatLng {
                lat: 37.775,
                lng: -122.434,
            },
            gesture_handling: "greedy",
            map_type_id: "roadmap",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Styler {
    Saturation(i32),
    Color(&'static str),
    Lightness(i32),
    Visibility(&'static str),
    Weight(f64),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MapStyle {
    pub feature_type: &'static str,
    pub element_type: &'static str,
    pub stylers: Vec<Styler>,
}

use Styler::{Color, Lightness, Saturation, Visibility, Weight};

const BLACK: Styler = Color("#000000");

const DARK_RULES: &[(&str, &str, &[Styler])] = &[
    ("all", "labels.text.fill", &[Saturation(36), BLACK, Lightness(40)]),
    ("all", "labels.text.stroke", &[Visibility("on"), BLACK, Lightness(16)]),
    ("all", "labels.icon", &[Visibility("off")]),
    ("administrative", "geometry.fill", &[BLACK, Lightness(20)]),
    ("administrative", "geometry.stroke", &[BLACK, Lightness(17), Weight(1.2)]),
    ("landscape", "geometry", &[BLACK, Lightness(20)]),
    ("poi", "geometry", &[BLACK, Lightness(21)]),
    ("road.highway", "geometry.fill", &[BLACK, Lightness(17)]),
    ("road.highway", "geometry.stroke", &[BLACK, Lightness(29), Weight(0.2)]),
    ("road.arterial", "geometry", &[BLACK, Lightness(18)]),
    ("road.local", "geometry", &[BLACK, Lightness(16)]),
    ("transit", "geometry", &[BLACK, Lightness(19)]),
    ("water", "geometry", &[BLACK, Lightness(17)]),
];

/// Style rules for the dark base map.
pub fn dark_map_style() -> Vec<MapStyle> {
    DARK_RULES
        .iter()
        .map(|&(feature_type, element_type, stylers)| MapStyle {
            feature_type,
            element_type,
            stylers: stylers.to_vec(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn point(lat: f64, lng: f64, count: Option<u32>) -> GeoPoint {
        GeoPoint {
            lat,
            lng,
            count,
            address: None,
            avg_dispatch_time: None,
        }
    }

    #[test]
    fn test_weight_is_count_when_present() {
        let pts = weighted_points(&[point(37.7, -122.4, Some(6))]);
        assert_eq!(pts[0].weight, 6.0);
        assert_eq!(pts[0].lat, 37.7);
    }

    #[test]
    fn test_weight_defaults_to_one() {
        let pts = weighted_points(&[point(37.7, -122.4, None), point(37.8, -122.5, None)]);
        assert!(pts.iter().all(|p| p.weight == 1.0));
        assert_eq!(pts.len(), 2);
    }

    #[test]
    fn test_empty_input() {
        assert!(weighted_points(&[]).is_empty());
    }

    #[test]
    fn test_gradient_starts_transparent_ends_red() {
        assert!(GRADIENT[0].ends_with(", 0)"));
        assert_eq!(GRADIENT[GRADIENT.len() - 1], "rgba(255, 0, 0, 1)");
    }

    #[test]
    fn test_dark_style_serializes_like_styled_map_rules() {
        let json = serde_json::to_value(dark_map_style()).unwrap();
        assert_eq!(json.as_array().unwrap().len(), 13);
        assert_eq!(json[0]["featureType"], "all");
        assert_eq!(json[0]["elementType"], "labels.text.fill");
        assert_eq!(json[0]["stylers"][0]["saturation"], 36);
        assert_eq!(json[0]["stylers"][1]["color"], "#000000");
        assert_eq!(json[4]["stylers"][2]["weight"], 1.2);
        assert_eq!(json[2]["stylers"][0]["visibility"], "off");
    }

    #[test]
    fn test_default_map_settings() {
        let json = serde_json::to_value(MapSettings::default()).unwrap();
        assert_eq!(json["zoom"], 13);
        assert_eq!(json["gestureHandling"], "greedy");
        assert_eq!(json["mapTypeId"], "roadmap");
        assert_eq!(json["center"]["lat"], 37.775);
    }
}
