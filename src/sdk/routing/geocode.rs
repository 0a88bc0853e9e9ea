use super::geo::{haversine_km, Coordinate};
use crate::sdk::util::rate_limit::Limiter;
use reqwest::blocking::Client;
use serde::Deserialize;
use std::time::Duration;
use thiserror::Error;

/// Candidates farther than this from the delivery location are dropped.
pub const NEARBY_RADIUS_KM: f64 = 5.0;

// Nominatim's usage policy asks for an identifying UA and at most 1 req/s.
const GEOCODER_USER_AGENT: &str = concat!("delitrack/", env!("CARGO_PKG_VERSION"));

/// A venue the geocoder matched, in service response order.
#[derive(Debug, Clone)]
pub struct PlaceCandidate {
    pub display_name: String,
    pub location: Coordinate,
}

// Nominatim serializes coordinates as strings.
#[derive(Debug, Deserialize)]
struct SearchResult {
    display_name: String,
    lat: String,
    lon: String,
}

#[derive(Error, Debug)]
pub enum PlaceError {
    #[error("no places found")]
    NoMatches,

    #[error("found {found} places, none within {radius_km} km")]
    NoneNearby { found: usize, radius_km: f64 },

    #[error("Underlying request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("Failed to parse JSON response: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("geocoder returned a malformed coordinate: {0}")]
    BadCoordinate(#[from] std::num::ParseFloatError),
}

pub struct PlaceResolver {
    client: Client,
    base_url: String,
    radius_km: f64,
    limiter: Limiter,
}

impl PlaceResolver {
    pub fn new(base_url: String) -> Self {
        Self {
            client: Client::builder()
                .timeout(Duration::from_secs(15))
                .user_agent(GEOCODER_USER_AGENT)
                .build()
                .unwrap(),
            base_url,
            radius_km: NEARBY_RADIUS_KM,
            limiter: Limiter::per_second(1),
        }
    }

    /// Resolves a free-text venue name to nearby candidates.
    ///
    /// A blank query is a precondition miss, not an error: it returns an
    /// empty list without touching the network. Zero service matches and
    /// zero in-radius matches surface as distinct errors so callers can
    /// word them differently.
    pub fn resolve(
        &self,
        query: &str,
        origin: Coordinate,
    ) -> Result<Vec<PlaceCandidate>, PlaceError> {
        if query.trim().is_empty() {
            return Ok(Vec::new());
        }

        self.limiter.wait();
        log::debug!("[PROVIDER] Calling geocoder for query: \"{}\"", query);

        let url = format!("{}/search", self.base_url);
        let response = self
            .client
            .get(&url)
            .query(&[("format", "json"), ("q", query)])
            .send()?;
        let text = response.text()?;

        let results: Vec<SearchResult> = serde_json::from_str(&text).map_err(|e| {
            log::error!(
                "Failed to parse geocoder response. URL: {}\nError: {}. Body: {}",
                url,
                e,
                text
            );
            e
        })?;

        filter_nearby(results, origin, self.radius_km)
    }
}

fn filter_nearby(
    results: Vec<SearchResult>,
    origin: Coordinate,
    radius_km: f64,
) -> Result<Vec<PlaceCandidate>, PlaceError> {
    if results.is_empty() {
        return Err(PlaceError::NoMatches);
    }

    let found = results.len();
    let mut nearby = Vec::new();
    for result in results {
        let location = Coordinate::new(result.lat.parse()?, result.lon.parse()?);
        if haversine_km(origin, location) <= radius_km {
            nearby.push(PlaceCandidate {
                display_name: result.display_name,
                location,
            });
        }
    }

    if nearby.is_empty() {
        return Err(PlaceError::NoneNearby { found, radius_km });
    }
    Ok(nearby)
}

#[cfg(test)]
mod tests {
    use super::*;

    const ORIGIN: Coordinate = Coordinate::new(19.0760, 72.8777);

    fn raw(name: &str, lat: &str, lon: &str) -> SearchResult {
        SearchResult {
            display_name: name.to_string(),
            lat: lat.to_string(),
            lon: lon.to_string(),
        }
    }

    #[test]
    fn blank_query_resolves_empty_without_network() {
        // The base URL is unreachable on purpose; a network call would fail.
        let resolver = PlaceResolver::new("http://127.0.0.1:1".to_string());
        let candidates = resolver.resolve("   ", ORIGIN).unwrap();
        assert!(candidates.is_empty());
    }

    #[test]
    fn keeps_a_candidate_at_the_origin_itself() {
        let results = vec![raw("Hotel Sea View", "19.0760", "72.8777")];
        let nearby = filter_nearby(results, ORIGIN, NEARBY_RADIUS_KM).unwrap();
        assert_eq!(nearby.len(), 1);
        assert_eq!(nearby[0].display_name, "Hotel Sea View");
    }

    #[test]
    fn drops_candidates_beyond_the_radius() {
        let results = vec![
            raw("Hotel Sea View", "19.0760", "72.8777"),
            raw("Thane Lodge", "19.20", "73.00"),
        ];
        let nearby = filter_nearby(results, ORIGIN, NEARBY_RADIUS_KM).unwrap();
        assert_eq!(nearby.len(), 1);
        assert_eq!(nearby[0].display_name, "Hotel Sea View");
    }

    #[test]
    fn empty_service_response_is_no_matches() {
        let err = filter_nearby(Vec::new(), ORIGIN, NEARBY_RADIUS_KM).unwrap_err();
        assert!(matches!(err, PlaceError::NoMatches));
    }

    #[test]
    fn out_of_radius_only_is_none_nearby() {
        let results = vec![raw("Thane Lodge", "19.20", "73.00")];
        let err = filter_nearby(results, ORIGIN, NEARBY_RADIUS_KM).unwrap_err();
        assert!(matches!(err, PlaceError::NoneNearby { found: 1, .. }));
    }

    #[test]
    fn preserves_service_order() {
        let results = vec![
            raw("First", "19.0760", "72.8777"),
            raw("Second", "19.0900", "72.8700"),
        ];
        let nearby = filter_nearby(results, ORIGIN, NEARBY_RADIUS_KM).unwrap();
        let names: Vec<_> = nearby.iter().map(|c| c.display_name.as_str()).collect();
        assert_eq!(names, ["First", "Second"]);
    }

    #[test]
    fn malformed_coordinate_is_rejected() {
        let results = vec![raw("Broken", "not-a-number", "72.8777")];
        let err = filter_nearby(results, ORIGIN, NEARBY_RADIUS_KM).unwrap_err();
        assert!(matches!(err, PlaceError::BadCoordinate(_)));
    }

    #[test]
    fn parses_nominatim_payload() {
        let body = r#"[
            {"place_id": 1, "display_name": "Hotel Sea View, Mumbai", "lat": "19.0766", "lon": "72.8770", "class": "tourism"},
            {"place_id": 2, "display_name": "Sea View Lodge, Thane", "lat": "19.20", "lon": "73.00", "class": "tourism"}
        ]"#;
        let results: Vec<SearchResult> = serde_json::from_str(body).unwrap();
        assert_eq!(results.len(), 2);
        assert_eq!(results[0].display_name, "Hotel Sea View, Mumbai");
        assert_eq!(results[1].lat, "19.20");
    }
}
