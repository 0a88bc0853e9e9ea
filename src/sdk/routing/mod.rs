pub mod error;
pub mod geo;
pub mod geocode;
pub mod location;
pub mod polyline;
pub mod provider;
pub mod route;
pub mod service;

pub use error::RoutingError;
pub use geo::{haversine_km, Coordinate};
pub use geocode::{PlaceCandidate, PlaceError, PlaceResolver, NEARBY_RADIUS_KM};
pub use location::{
    acquire_location, EnvLocationSource, FixedLocationSource, LocationSource, FALLBACK_LOCATION,
};
pub use polyline::PolylineError;
pub use provider::{MapboxProvider, OsrmProvider};
pub use route::{Advisory, RouteEstimate};
pub use service::DirectionsProvider;
