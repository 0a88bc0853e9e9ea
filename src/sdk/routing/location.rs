use super::geo::Coordinate;
use std::env;
use thiserror::Error;

/// Where tracking starts when the device gives us nothing: Mumbai.
pub const FALLBACK_LOCATION: Coordinate = Coordinate::new(19.0760, 72.8777);

#[derive(Error, Debug)]
pub enum LocationError {
    #[error("no location configured")]
    NotConfigured,

    #[error("invalid coordinate value: {0}")]
    Invalid(#[from] std::num::ParseFloatError),

    #[error("coordinate out of range: latitude {latitude}, longitude {longitude}")]
    OutOfRange { latitude: f64, longitude: f64 },
}

pub trait LocationSource {
    /// Reports the customer's current position.
    fn current_location(&self) -> Result<Coordinate, LocationError>;
}

/// Reads the position from `DELIVERY_LAT` / `DELIVERY_LNG`.
pub struct EnvLocationSource;

impl LocationSource for EnvLocationSource {
    fn current_location(&self) -> Result<Coordinate, LocationError> {
        let lat = env::var("DELIVERY_LAT").map_err(|_| LocationError::NotConfigured)?;
        let lng = env::var("DELIVERY_LNG").map_err(|_| LocationError::NotConfigured)?;
        let latitude: f64 = lat.trim().parse()?;
        let longitude: f64 = lng.trim().parse()?;
        Coordinate::checked(latitude, longitude).ok_or(LocationError::OutOfRange {
            latitude,
            longitude,
        })
    }
}

/// A preset position, e.g. from CLI flags.
pub struct FixedLocationSource(pub Coordinate);

impl LocationSource for FixedLocationSource {
    fn current_location(&self) -> Result<Coordinate, LocationError> {
        Ok(self.0)
    }
}

/// Acquires the delivery location, falling back to [`FALLBACK_LOCATION`]
/// when the source denies or fails. Called once per session; no retry.
pub fn acquire_location(source: &dyn LocationSource) -> Coordinate {
    match source.current_location() {
        Ok(location) => location,
        Err(err) => {
            log::warn!("Falling back to default delivery location: {}", err);
            FALLBACK_LOCATION
        }
    }
}
