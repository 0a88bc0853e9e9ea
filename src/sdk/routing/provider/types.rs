use crate::sdk::routing::error::RoutingError;
use crate::sdk::routing::polyline;
use crate::sdk::routing::route::RouteEstimate;
use serde::Deserialize;

// --- Data structures for parsing directions responses ---
//
// Mapbox Directions v5 and OSRM share this schema, so both providers
// deserialize into the same types.

#[derive(Debug, Deserialize)]
pub struct DirectionsResponse {
    pub code: String,
    #[serde(default)]
    pub routes: Vec<DirectionsRoute>,
}

#[derive(Debug, Deserialize)]
pub struct DirectionsRoute {
    pub geometry: String,
    pub duration: f64,
    pub distance: f64,
}

impl DirectionsResponse {
    /// Turns a parsed response into a route estimate, or the no-route
    /// condition when the service did not produce one.
    pub fn into_estimate(self) -> Result<RouteEstimate, RoutingError> {
        let DirectionsResponse { code, routes } = self;
        if code != "Ok" {
            return Err(RoutingError::NoRoute { code });
        }
        let route = routes
            .into_iter()
            .next()
            .ok_or(RoutingError::NoRoute { code })?;

        let path = polyline::decode(&route.geometry)?;
        Ok(RouteEstimate::from_raw(path, route.duration, route.distance))
    }
}
