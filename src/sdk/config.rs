use std::env;
use thiserror::Error;

pub const DEFAULT_GEOCODER_BASE_URL: &str = "https://nominatim.openstreetmap.org";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("missing environment variable: set {0}")]
    MissingVar(&'static str),
}

/// Which directions backend to talk to. Keys and endpoints come from the
/// environment, never from source.
#[derive(Debug, Clone)]
pub enum DirectionsConfig {
    Mapbox { access_token: String },
    Osrm { base_url: String },
}

impl DirectionsConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        if let Ok(access_token) = env::var("MAPBOX_ACCESS_TOKEN") {
            return Ok(Self::Mapbox { access_token });
        }
        if let Ok(base_url) = env::var("OSRM_BASE_URL") {
            return Ok(Self::Osrm { base_url });
        }
        Err(ConfigError::MissingVar(
            "MAPBOX_ACCESS_TOKEN or OSRM_BASE_URL",
        ))
    }
}

pub fn geocoder_base_url() -> String {
    env::var("GEOCODER_BASE_URL").unwrap_or_else(|_| DEFAULT_GEOCODER_BASE_URL.to_string())
}

/// Order-backend endpoint and session token; optional, the tracker works
/// without it.
#[derive(Debug, Clone)]
pub struct OrdersConfig {
    pub base_url: String,
    pub token: String,
}

impl OrdersConfig {
    pub fn from_env() -> Option<Self> {
        let base_url = env::var("BACKEND_URL").ok()?;
        let token = env::var("BACKEND_TOKEN").unwrap_or_default();
        Some(Self { base_url, token })
    }
}
