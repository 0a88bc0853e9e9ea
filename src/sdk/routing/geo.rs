pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// A latitude/longitude pair in degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coordinate {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinate {
    pub const fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// Builds a coordinate only if both components are in range.
    pub fn checked(latitude: f64, longitude: f64) -> Option<Self> {
        if (-90.0..=90.0).contains(&latitude) && (-180.0..=180.0).contains(&longitude) {
            Some(Self::new(latitude, longitude))
        } else {
            None
        }
    }
}

/// Great-circle distance between two points in kilometers.
pub fn haversine_km(a: Coordinate, b: Coordinate) -> f64 {
    let lat1 = a.latitude.to_radians();
    let lat2 = b.latitude.to_radians();
    let dlat = (b.latitude - a.latitude).to_radians();
    let dlon = (b.longitude - a.longitude).to_radians();

    let sin_dlat = (dlat / 2.0).sin();
    let sin_dlon = (dlon / 2.0).sin();

    let h = sin_dlat * sin_dlat + lat1.cos() * lat2.cos() * sin_dlon * sin_dlon;
    2.0 * EARTH_RADIUS_KM * h.sqrt().atan2((1.0 - h).sqrt())
}

#[cfg(test)]
mod tests {
    use super::*;

    const MUMBAI: Coordinate = Coordinate::new(19.0760, 72.8777);

    #[test]
    fn distance_to_self_is_zero() {
        assert!(haversine_km(MUMBAI, MUMBAI).abs() < 1e-9);
    }

    #[test]
    fn distance_is_symmetric() {
        let other = Coordinate::new(19.0966, 72.8260);
        let there = haversine_km(MUMBAI, other);
        let back = haversine_km(other, MUMBAI);
        assert!((there - back).abs() < 1e-9);
        assert!(there > 0.0);
    }

    #[test]
    fn thane_is_well_outside_five_km() {
        let thane = Coordinate::new(19.20, 73.00);
        let dist = haversine_km(MUMBAI, thane);
        assert!(dist > 5.0);
        assert!((18.0..20.0).contains(&dist), "got {} km", dist);
    }

    #[test]
    fn checked_rejects_out_of_range() {
        assert!(Coordinate::checked(90.1, 0.0).is_none());
        assert!(Coordinate::checked(0.0, -180.5).is_none());
        assert!(Coordinate::checked(-90.0, 180.0).is_some());
    }
}
