//! Prediction backend client
//!
//! Every backend follows the same cycle: one `POST` carrying the user's query,
//! one response, then success, application error or transport error. The
//! per-backend differences live in a [`Contract`] impl.

use base64::{engine::general_purpose, Engine as _};
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;
use tracing::{debug, info, instrument, warn};

use crate::state::{ForecastReport, PlotImage};

/// Shown when a non-2xx reply carries no `error` field.
pub const UNKNOWN_ERROR: &str = "An unknown error occurred.";

// ============================================================================
// Errors
// ============================================================================

#[derive(Debug, Clone, PartialEq, Error)]
pub enum FetchError {
    /// The backend answered and rejected the request
    #[error("{0}")]
    Application(String),

    /// No usable answer: unreachable, unreadable or malformed
    #[error("transport failure: {0}")]
    Transport(String),
}

impl FetchError {
    /// Text for the UI: application messages verbatim, transport failures
    /// replaced by the contract's fixed message.
    pub fn display_message<C: Contract>(&self) -> String {
        match self {
            FetchError::Application(message) => message.clone(),
            FetchError::Transport(_) => C::TRANSPORT_MESSAGE.to_string(),
        }
    }
}

// ============================================================================
// Contracts
// ============================================================================

/// What a page does with blank input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmptyQuery {
    /// Send it anyway and let the backend answer
    Submit,
    /// Do nothing
    Ignore,
    /// Show this message instead of calling the backend
    Reject(&'static str),
}

/// Outcome of checking a query before any request is made
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueryGate {
    Send(String),
    Skip,
    Reject(&'static str),
}

/// One backend's request and response shape
pub trait Contract {
    type Output;

    /// Label used in logs
    const NAME: &'static str;
    const PATH: &'static str;
    /// JSON field that carries the query
    const QUERY_FIELD: &'static str;
    const EMPTY_QUERY: EmptyQuery;
    const TRANSPORT_MESSAGE: &'static str;

    /// Parse a 2xx body that did not carry an `error` field.
    fn decode(body: &[u8]) -> Result<Self::Output, FetchError>;
}

/// `POST /forecast` on the quantum forecaster
#[derive(Debug)]
pub struct ForecastContract;

impl Contract for ForecastContract {
    type Output = ForecastReport;

    const NAME: &'static str = "forecast";
    const PATH: &'static str = "/forecast";
    const QUERY_FIELD: &'static str = "location";
    const EMPTY_QUERY: EmptyQuery = EmptyQuery::Submit;
    const TRANSPORT_MESSAGE: &'static str = "Failed to fetch data from the server.";

    fn decode(body: &[u8]) -> Result<ForecastReport, FetchError> {
        serde_json::from_slice(body).map_err(|e| FetchError::Transport(e.to_string()))
    }
}

#[derive(Debug, Deserialize)]
struct PredictionResponse {
    prediction: f64,
}

/// `POST /predict` on the extreme weather predictor
#[derive(Debug)]
pub struct ExtremeContract;

impl Contract for ExtremeContract {
    type Output = f64;

    const NAME: &'static str = "extreme";
    const PATH: &'static str = "/predict";
    const QUERY_FIELD: &'static str = "location";
    const EMPTY_QUERY: EmptyQuery = EmptyQuery::Ignore;
    const TRANSPORT_MESSAGE: &'static str = "Failed to fetch prediction from the server.";

    fn decode(body: &[u8]) -> Result<f64, FetchError> {
        serde_json::from_slice::<PredictionResponse>(body)
            .map(|r| r.prediction)
            .map_err(|e| FetchError::Transport(e.to_string()))
    }
}

/// `POST /get_weather_visualization`, answered with raw image bytes
#[derive(Debug)]
pub struct VisualizationContract;

impl Contract for VisualizationContract {
    type Output = PlotImage;

    const NAME: &'static str = "visualization";
    const PATH: &'static str = "/get_weather_visualization";
    const QUERY_FIELD: &'static str = "city";
    const EMPTY_QUERY: EmptyQuery = EmptyQuery::Reject("Please enter a city name.");
    const TRANSPORT_MESSAGE: &'static str = "An error occurred. Please try again.";

    fn decode(body: &[u8]) -> Result<PlotImage, FetchError> {
        if body.is_empty() {
            return Err(FetchError::Transport("empty image payload".into()));
        }
        Ok(PlotImage {
            payload: general_purpose::STANDARD.encode(body),
        })
    }
}

// ============================================================================
// Cycle
// ============================================================================

/// Apply the contract's blank-input policy.
///
/// `Ignore` only skips an exactly empty query; whitespace is still sent.
/// `Reject` treats whitespace-only input as blank.
pub fn gate<C: Contract>(query: &str) -> QueryGate {
    match C::EMPTY_QUERY {
        EmptyQuery::Ignore if query.is_empty() => QueryGate::Skip,
        EmptyQuery::Reject(message) if query.trim().is_empty() => QueryGate::Reject(message),
        _ => QueryGate::Send(query.to_string()),
    }
}

pub fn request_body<C: Contract>(query: &str) -> Value {
    let mut body = serde_json::Map::new();
    body.insert(C::QUERY_FIELD.to_string(), Value::String(query.to_string()));
    Value::Object(body)
}

pub fn endpoint_url(base_url: &str, path: &str) -> String {
    format!("{}{}", base_url.trim_end_matches('/'), path)
}

fn error_field(json: &Value) -> Option<&str> {
    json.get("error").and_then(Value::as_str)
}

/// Classify a received reply.
pub fn interpret<C: Contract>(status: StatusCode, body: &[u8]) -> Result<C::Output, FetchError> {
    let json = serde_json::from_slice::<Value>(body).ok();

    if !status.is_success() {
        return Err(match json {
            Some(json) => FetchError::Application(
                error_field(&json).unwrap_or(UNKNOWN_ERROR).to_string(),
            ),
            None => FetchError::Transport(format!("HTTP {status} with unreadable body")),
        });
    }

    if let Some(message) = json.as_ref().and_then(error_field) {
        return Err(FetchError::Application(message.to_string()));
    }

    C::decode(body)
}

/// Issue exactly one request for `query` and classify the reply.
#[instrument(skip(client, base_url), fields(contract = C::NAME))]
pub async fn submit<C: Contract>(
    client: &Client,
    base_url: &str,
    query: &str,
) -> Result<C::Output, FetchError> {
    let url = endpoint_url(base_url, C::PATH);
    debug!(url = %url, "Submitting query");

    let response = client
        .post(&url)
        .json(&request_body::<C>(query))
        .send()
        .await
        .map_err(|e| FetchError::Transport(e.to_string()))?;

    let status = response.status();
    let body = response
        .bytes()
        .await
        .map_err(|e| FetchError::Transport(e.to_string()))?;

    let outcome = interpret::<C>(status, &body);
    match &outcome {
        Ok(_) => info!(%status, bytes = body.len(), "Backend answered"),
        Err(FetchError::Application(message)) => warn!(%status, %message, "Backend rejected query"),
        Err(FetchError::Transport(reason)) => warn!(%status, %reason, "Unusable backend reply"),
    }
    outcome
}

/// Shared HTTP client. No timeout and no retries.
pub fn http_client() -> Result<Client, FetchError> {
    Client::builder()
        .user_agent(concat!("quantaweather/", env!("CARGO_PKG_VERSION")))
        .build()
        .map_err(|e| FetchError::Transport(e.to_string()))
}

// ============================================================================
// Artwork
// ============================================================================

/// Download a banner image. Returns base64 of the bytes once they look like an image.
#[instrument(skip(client))]
pub async fn fetch_thumbnail(client: &Client, url: &str) -> Result<String, FetchError> {
    let response = client
        .get(url)
        .send()
        .await
        .map_err(|e| FetchError::Transport(e.to_string()))?;

    let status = response.status();
    if !status.is_success() {
        return Err(FetchError::Transport(format!("HTTP {status}")));
    }

    let bytes = response
        .bytes()
        .await
        .map_err(|e| FetchError::Transport(e.to_string()))?;
    image::guess_format(&bytes).map_err(|e| FetchError::Transport(e.to_string()))?;

    debug!(bytes = bytes.len(), "Thumbnail downloaded");
    Ok(general_purpose::STANDARD.encode(&bytes))
}
