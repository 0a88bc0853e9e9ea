use super::error::RoutingError;
use super::geo::Coordinate;
use super::route::RouteEstimate;

pub trait DirectionsProvider: Send + Sync {
    /// Plans a driving route between two points.
    fn plan_route(
        &self,
        origin: Coordinate,
        destination: Coordinate,
    ) -> Result<RouteEstimate, RoutingError>;
}

impl<P: DirectionsProvider + ?Sized> DirectionsProvider for Box<P> {
    fn plan_route(
        &self,
        origin: Coordinate,
        destination: Coordinate,
    ) -> Result<RouteEstimate, RoutingError> {
        (**self).plan_route(origin, destination)
    }
}
