use super::geo::Coordinate;

/// A route a driver would take, with its derived estimates.
///
/// Always constructed whole from a single directions response; the path runs
/// origin-first, destination-last.
#[derive(Debug, Clone)]
pub struct RouteEstimate {
    pub path: Vec<Coordinate>,
    pub duration_minutes: f64,
    pub distance_km: f64,
}

impl RouteEstimate {
    /// Derives the estimate from the raw service units (seconds, meters).
    pub fn from_raw(path: Vec<Coordinate>, duration_secs: f64, distance_meters: f64) -> Self {
        Self {
            path,
            duration_minutes: round_to(duration_secs / 60.0, 1),
            distance_km: round_to(distance_meters / 1000.0, 2),
        }
    }

    pub fn advisory(&self) -> Advisory {
        Advisory::classify(self.duration_minutes)
    }
}

pub const DELAY_THRESHOLD_MINUTES: f64 = 15.0;

/// Display tag derived from the estimated duration. No state of its own.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Advisory {
    OnTime,
    Delayed,
}

impl Advisory {
    pub fn classify(duration_minutes: f64) -> Self {
        if duration_minutes > DELAY_THRESHOLD_MINUTES {
            Advisory::Delayed
        } else {
            Advisory::OnTime
        }
    }

    pub fn message(self) -> &'static str {
        match self {
            Advisory::OnTime => "Driver is en route.",
            Advisory::Delayed => "There's traffic, please wait!",
        }
    }
}

fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn derives_units_from_raw_response() {
        let estimate = RouteEstimate::from_raw(Vec::new(), 1200.0, 7500.0);
        assert_eq!(estimate.duration_minutes, 20.0);
        assert_eq!(estimate.distance_km, 7.50);
    }

    #[test]
    fn rounds_to_one_and_two_decimals() {
        let estimate = RouteEstimate::from_raw(Vec::new(), 1234.0, 7654.0);
        assert_eq!(estimate.duration_minutes, 20.6);
        assert_eq!(estimate.distance_km, 7.65);
    }

    #[test]
    fn twenty_minutes_is_delayed() {
        assert_eq!(Advisory::classify(20.0), Advisory::Delayed);
    }

    #[test]
    fn five_minutes_is_on_time() {
        assert_eq!(Advisory::classify(5.0), Advisory::OnTime);
    }

    #[test]
    fn threshold_itself_is_on_time() {
        assert_eq!(Advisory::classify(DELAY_THRESHOLD_MINUTES), Advisory::OnTime);
    }

    #[test]
    fn advisory_messages_differ() {
        assert_eq!(Advisory::OnTime.message(), "Driver is en route.");
        assert_eq!(Advisory::Delayed.message(), "There's traffic, please wait!");
    }
}
