use super::types::DirectionsResponse;
use crate::sdk::routing::error::{ApiErrorPayload, RoutingError};
use crate::sdk::routing::geo::Coordinate;
use crate::sdk::routing::route::RouteEstimate;
use crate::sdk::routing::service::DirectionsProvider;
use crate::sdk::util::rate_limit::Limiter;
use reqwest::blocking::Client;
use std::time::Duration;

pub struct MapboxProvider {
    client: Client,
    access_token: String,
    base_url: String,
    limiter: Limiter,
}

impl MapboxProvider {
    pub fn new(access_token: String, limiter: Limiter) -> Self {
        Self {
            client: Client::builder()
                .timeout(Duration::from_secs(15))
                .build()
                .unwrap(),
            access_token,
            base_url: "https://api.mapbox.com".to_string(),
            limiter,
        }
    }
}

impl DirectionsProvider for MapboxProvider {
    fn plan_route(
        &self,
        origin: Coordinate,
        destination: Coordinate,
    ) -> Result<RouteEstimate, RoutingError> {
        if origin == destination {
            return Ok(RouteEstimate::from_raw(vec![origin, destination], 0.0, 0.0));
        }

        self.limiter.wait();
        log::debug!(
            "[PROVIDER] Calling Mapbox directions for {:?} -> {:?}",
            origin,
            destination
        );
        let url = format!(
            "{}/directions/v5/mapbox/driving/{},{};{},{}",
            self.base_url,
            origin.longitude,
            origin.latitude,
            destination.longitude,
            destination.latitude
        );

        let response = self
            .client
            .get(&url)
            .query(&[
                ("overview", "full"),
                ("geometries", "polyline"),
                ("access_token", self.access_token.as_str()),
            ])
            .send()?;

        let status = response.status();
        let text = response.text()?;

        if !status.is_success() {
            // Try to parse the structured error first
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
                "Failed to parse DirectionsResponse. URL: {}\nError: {}. Body: {}",
                url,
                e,
                text
            );
            e
        })?;

        parsed.into_estimate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sdk::routing::route::Advisory;

    #[test]
    fn same_point_short_circuits_to_a_zero_estimate() {
        let provider = MapboxProvider::new("test-token".to_string(), Limiter::per_minute(60));
        let here = Coordinate::new(19.0760, 72.8777);
        let estimate = provider.plan_route(here, here).unwrap();
        assert_eq!(estimate.duration_minutes, 0.0);
        assert_eq!(estimate.distance_km, 0.0);
        assert_eq!(estimate.advisory(), Advisory::OnTime);
    }
}
