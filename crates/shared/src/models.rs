use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// A table row as delivered by the API: column name to raw JSON value.
pub type Row = serde_json::Map<String, Value>;

/// The `{ "data": ... }` wrapper around every successful API payload.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Envelope<T> {
    pub data: T,
}

/// Decode a response body and unwrap its envelope.
pub fn decode_envelope<T: for<'de> Deserialize<'de>>(body: &str) -> Result<T, serde_json::Error> {
    let envelope: Envelope<T> = serde_json::from_str(body)?;
    Ok(envelope.data)
}

/// Body returned alongside a non-2xx status.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub status: Option<String>,
    pub message: String,
}

/// Label/value series for single-dataset line and bar charts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LabelSeries {
    pub labels: Vec<String>,
    pub data: Vec<f64>,
}

/// A dataset delivered ready-made by the API. Styling keys the dashboard
/// does not interpret (`backgroundColor`, `type`, `yAxisID`, ...) are kept
/// verbatim so they reach the chart untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Dataset {
    #[serde(default)]
    pub label: String,
    pub data: Vec<f64>,
    #[serde(flatten)]
    pub style: serde_json::Map<String, Value>,
}

/// Call-type breakdown for one battalion.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct BattalionBreakdown {
    pub labels: Vec<String>,
    pub dataset: Dataset,
    pub battalion: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct Limits {
    pub max: f64,
}

/// Multi-series data keyed by date. The per-neighborhood variant carries
/// `limits` and the neighborhood name; the overall variant omits both.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct TrendSeries {
    pub labels: Vec<String>,
    pub datasets: Vec<Dataset>,
    #[serde(default)]
    pub limits: Option<Limits>,
    #[serde(default)]
    pub neighborhood_district: Option<String>,
}

/// A geocoded location, optionally weighted by a call count.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    #[serde(deserialize_with = "de_coordinate")]
    pub lat: f64,
    #[serde(deserialize_with = "de_coordinate")]
    pub lng: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub count: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avg_dispatch_time: Option<String>,
}

impl GeoPoint {
    /// View this point as a generic table row.
    pub fn to_row(&self) -> Row {
        match serde_json::to_value(self) {
            Ok(Value::Object(map)) => map,
            _ => Row::new(),
        }
    }
}

/// Most common unit type dispatched near an address.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct NearbyMatch {
    pub unit_type_match: Option<String>,
    pub unit_type_match_count: Option<u64>,
}

/// Decimal columns arrive either as JSON numbers or as decimal strings.
fn de_coordinate<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Coordinate {
        Number(f64),
        Text(String),
    }

    match Coordinate::deserialize(deserializer)? {
        Coordinate::Number(v) => Ok(v),
        Coordinate::Text(s) => s.trim().parse().map_err(serde::de::Error::custom),
    }
}
