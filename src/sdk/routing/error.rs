use super::polyline::PolylineError;
use serde::Deserialize;
use thiserror::Error;

// Helper struct to parse the JSON error body the directions services return
#[derive(Deserialize, Debug)]
pub struct ApiErrorPayload {
    pub message: String,
}

#[derive(Error, Debug)]
pub enum RoutingError {
    #[error("no route available (code {code})")]
    NoRoute { code: String },

    // This variant holds the structured error from the API
    #[error("API Error: {message}")]
    Api { message: String },

    // A fallback for when we get an error that isn't in the expected JSON format
    #[error("Unstructured API Error: {0}")]
    RawApi(String),

    #[error("Underlying request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("Failed to parse JSON response: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Failed to decode route geometry: {0}")]
    Geometry(#[from] PolylineError),
}
