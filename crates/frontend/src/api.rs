use dispatch_shared::endpoints;
use dispatch_shared::models::{
    decode_envelope, BattalionBreakdown, ErrorBody, GeoPoint, LabelSeries, NearbyMatch, Row,
    TrendSeries,
};
use serde::de::DeserializeOwned;

const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded";

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ApiError {
    #[error("Could not reach the server: {0}")]
    Network(String),
    #[error("{message}")]
    Status { status: u16, message: String },
    #[error("Unexpected response: {0}")]
    Decode(String),
}

impl ApiError {
    /// Text for the danger alert shown in a results panel.
    pub fn alert_text(&self) -> String {
        format!("{self} Please try again.")
    }
}

/// Build an error from a non-2xx response, preferring the server's message.
fn status_error(status: u16, reason: &str, body: &str) -> ApiError {
    let message = serde_json::from_str::<ErrorBody>(body)
        .map(|b| b.message)
        .unwrap_or_else(|_| {
            if reason.is_empty() {
                format!("Request failed with status {status}.")
            } else {
                reason.to_string()
            }
        });
    ApiError::Status { status, message }
}

fn decode<T: DeserializeOwned>(body: &str) -> Result<T, ApiError> {
    decode_envelope(body).map_err(|e| ApiError::Decode(e.to_string()))
}

/// Encode key/value pairs as an `application/x-www-form-urlencoded` body.
pub fn encode_form<K: AsRef<str>, V: AsRef<str>>(pairs: &[(K, V)]) -> String {
    url::form_urlencoded::Serializer::new(String::new())
        .extend_pairs(pairs)
        .finish()
}

fn api_base() -> String {
    // Same origin unless overridden at build time.
    if let Some(base) = option_env!("DISPATCH_API_BASE") {
        return base.to_string();
    }
    web_sys::window()
        .and_then(|w| w.location().origin().ok())
        .unwrap_or_default()
}

async fn read(resp: reqwest::Response) -> Result<String, ApiError> {
    let status = resp.status();
    let body = resp
        .text()
        .await
        .map_err(|e| ApiError::Network(e.to_string()))?;
    if !status.is_success() {
        return Err(status_error(
            status.as_u16(),
            status.canonical_reason().unwrap_or_default(),
            &body,
        ));
    }
    Ok(body)
}

async fn get<T: DeserializeOwned>(path: &str) -> Result<T, ApiError> {
    let url = endpoints::join(&api_base(), path);
    let resp = reqwest::Client::new()
        .get(&url)
        .send()
        .await
        .map_err(|e| ApiError::Network(e.to_string()))?;
    let body = read(resp).await?;
    decode(&body)
}

async fn post_form<T, K, V>(path: &str, pairs: &[(K, V)]) -> Result<T, ApiError>
where
    T: DeserializeOwned,
    K: AsRef<str>,
    V: AsRef<str>,
{
    let url = endpoints::join(&api_base(), path);
    let resp = reqwest::Client::new()
        .post(&url)
        .header(reqwest::header::CONTENT_TYPE, FORM_CONTENT_TYPE)
        .body(encode_form(pairs))
        .send()
        .await
        .map_err(|e| ApiError::Network(e.to_string()))?;
    let body = read(resp).await?;
    decode(&body)
}

// API functions

pub async fn fetch_calls_per_hour() -> Result<LabelSeries, ApiError> {
    get(endpoints::CALLS_PER_HOUR).await
}

pub async fn fetch_group_response_time() -> Result<LabelSeries, ApiError> {
    get(endpoints::GROUP_RESPONSE_TIME).await
}

pub async fn fetch_battalion_distribution() -> Result<LabelSeries, ApiError> {
    get(endpoints::BATTALION_DIST).await
}

pub async fn fetch_battalion_breakdown(battalion: &str) -> Result<BattalionBreakdown, ApiError> {
    post_form(endpoints::BATTALION_DIST, &[("battalion", battalion)]).await
}

pub async fn fetch_incidents_per_day() -> Result<TrendSeries, ApiError> {
    get(endpoints::NEIGHBORHOOD_TRENDS).await
}

pub async fn fetch_neighborhood_trend(neighborhood: &str) -> Result<TrendSeries, ApiError> {
    post_form(endpoints::NEIGHBORHOOD_TRENDS, &[("neighborhood", neighborhood)]).await
}

pub async fn fetch_battalions() -> Result<Vec<String>, ApiError> {
    get(endpoints::BATTALIONS).await
}

pub async fn fetch_neighborhoods() -> Result<Vec<String>, ApiError> {
    get(endpoints::NEIGHBORHOODS).await
}

/// Inputs of the most-likely-dispatch form.
#[derive(Debug, Clone, PartialEq)]
pub struct NearbyQuery {
    pub address: String,
    /// As entered; sent as `HH:MM:SS`.
    pub time: String,
    /// Search radius in miles.
    pub radius: String,
}

impl Default for NearbyQuery {
    fn default() -> Self {
        NearbyQuery {
            address: String::new(),
            time: String::new(),
            radius: "1".to_string(),
        }
    }
}

impl NearbyQuery {
    fn pairs(&self) -> [(&'static str, String); 3] {
        [
            ("address", self.address.clone()),
            ("time", with_seconds(&self.time)),
            ("radius", self.radius.clone()),
        ]
    }
}

/// Time inputs omit zero seconds (`"14:30"`), the server wants `HH:MM:SS`.
fn with_seconds(time: &str) -> String {
    let time = time.trim();
    if time.matches(':').count() == 1 {
        format!("{time}:00")
    } else {
        time.to_string()
    }
}

pub async fn fetch_nearby(query: &NearbyQuery) -> Result<NearbyMatch, ApiError> {
    post_form(endpoints::NEARBY, &query.pairs()).await
}

pub async fn fetch_longest_dispatch() -> Result<Vec<GeoPoint>, ApiError> {
    get(endpoints::LONGEST_DISPATCH).await
}

pub async fn fetch_address_frequency() -> Result<Vec<GeoPoint>, ApiError> {
    get(endpoints::ADDRESS_FREQUENCY).await
}

pub async fn fetch_safest_neighborhoods() -> Result<Vec<Row>, ApiError> {
    get(endpoints::SAFEST_NEIGHBORHOODS).await
}
