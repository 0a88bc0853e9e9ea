pub mod sdk;

pub use sdk::routing::{
    haversine_km, Advisory, Coordinate, DirectionsProvider, MapboxProvider, OsrmProvider,
    PlaceCandidate, PlaceResolver, RouteEstimate,
};
pub use sdk::tracking::{Tracker, TrackingSession};
