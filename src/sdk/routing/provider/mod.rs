pub mod mapbox;
pub mod osrm;
pub mod types;

pub use mapbox::MapboxProvider;
pub use osrm::OsrmProvider;
