use super::types::DirectionsResponse;
use crate::sdk::routing::error::{ApiErrorPayload, RoutingError};
use crate::sdk::routing::geo::Coordinate;
use crate::sdk::routing::route::RouteEstimate;
use crate::sdk::routing::service::DirectionsProvider;
use reqwest::blocking::Client;
use std::time::Duration;

/// Self-hosted OSRM backend. Same response schema as Mapbox, no token and
/// no rate limit.
pub struct OsrmProvider {
    client: Client,
    base_url: String,
}

impl OsrmProvider {
    pub fn new(base_url: String) -> Self {
        Self {
            client: Client::builder()
                .timeout(Duration::from_secs(15))
                .build()
                .unwrap(),
            base_url,
        }
    }
}

impl DirectionsProvider for OsrmProvider {
    fn plan_route(
        &self,
        origin: Coordinate,
        destination: Coordinate,
    ) -> Result<RouteEstimate, RoutingError> {
        if origin == destination {
            return Ok(RouteEstimate::from_raw(vec![origin, destination], 0.0, 0.0));
        }

        log::debug!(
            "[PROVIDER] Calling local OSRM for {:?} -> {:?}",
            origin,
            destination
        );
        let url = format!(
            "{}/route/v1/driving/{},{};{},{}",
            self.base_url,
            origin.longitude,
            origin.latitude,
            destination.longitude,
            destination.latitude
        );

        let response = self
            .client
            .get(&url)
            .query(&[("overview", "full"), ("geometries", "polyline")])
            .send()?;

        let status = response.status();
        let text = response.text()?;

        if !status.is_success() {
            if let Ok(payload) = serde_json::from_str::<ApiErrorPayload>(&text) {
                return Err(RoutingError::Api {
                    message: payload.message,
                });
            }
            log::error!(
                "API returned non-success status: {}. Unparseable Body: {}",
                status,
                text
            );
            return Err(RoutingError::RawApi(text));
        }

        let parsed: DirectionsResponse = serde_json::from_str(&text).map_err(|e| {
            log::error!(
                "Failed to parse local DirectionsResponse. URL: {}\nError: {}. Body: {}",
                url,
                e,
                text
            );
            e
        })?;

        parsed.into_estimate()
    }
}
