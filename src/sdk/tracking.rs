use super::routing::error::RoutingError;
use super::routing::geo::Coordinate;
use super::routing::geocode::{PlaceCandidate, PlaceError, PlaceResolver};
use super::routing::location::{acquire_location, LocationSource};
use super::routing::route::RouteEstimate;
use super::routing::service::DirectionsProvider;

/// A search that was handed to the resolver. Carries the sequence number
/// that decides whether its response is still the latest when it lands.
#[derive(Debug, Clone)]
pub struct SearchTicket {
    pub seq: u64,
    pub query: String,
    pub origin: Coordinate,
}

/// What `apply_search` did with a resolver outcome.
#[derive(Debug)]
pub enum SearchApply {
    /// The candidate list was replaced.
    Applied,
    /// A newer search was issued in the meantime; the outcome was dropped.
    Stale,
    /// The resolver failed; the error is handed back for user messaging.
    Failed(PlaceError),
}

/// Per-page tracking state. Every field is replaced wholesale or left
/// unset; nothing is partially mutated.
#[derive(Default)]
pub struct TrackingSession {
    delivery_location: Option<Coordinate>,
    search_text: String,
    candidates: Vec<PlaceCandidate>,
    selected_place: Option<PlaceCandidate>,
    route: Option<RouteEstimate>,
    issued_seq: u64,
}

impl TrackingSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// First write wins; location acquisition fires once per session.
    pub fn set_delivery_location(&mut self, location: Coordinate) {
        if self.delivery_location.is_some() {
            log::debug!("Delivery location already set, ignoring update");
            return;
        }
        self.delivery_location = Some(location);
    }

    /// Issues a search ticket, or `None` when the preconditions are not
    /// met (blank query, no delivery location yet). That is a silent
    /// no-op, not an error.
    pub fn begin_search(&mut self, query: &str) -> Option<SearchTicket> {
        let origin = self.delivery_location?;
        if query.trim().is_empty() {
            return None;
        }

        self.search_text = query.to_string();
        self.issued_seq += 1;
        Some(SearchTicket {
            seq: self.issued_seq,
            query: query.to_string(),
            origin,
        })
    }

    /// Applies a resolver outcome for the ticket `seq`, unless a newer
    /// search has been issued since (last-request-wins).
    ///
    /// On success the candidate list is replaced wholesale and any previous
    /// selection cleared. `NoMatches` leaves the previous list standing,
    /// `NoneNearby` clears it; transport failures change nothing.
    pub fn apply_search(
        &mut self,
        seq: u64,
        outcome: Result<Vec<PlaceCandidate>, PlaceError>,
    ) -> SearchApply {
        if seq != self.issued_seq {
            log::debug!(
                "Discarding stale search response (seq {}, latest {})",
                seq,
                self.issued_seq
            );
            return SearchApply::Stale;
        }

        match outcome {
            Ok(candidates) => {
                self.candidates = candidates;
                self.selected_place = None;
                SearchApply::Applied
            }
            Err(err @ PlaceError::NoneNearby { .. }) => {
                self.candidates.clear();
                SearchApply::Failed(err)
            }
            Err(err) => SearchApply::Failed(err),
        }
    }

    pub fn select_candidate(&mut self, index: usize) -> Option<&PlaceCandidate> {
        let candidate = self.candidates.get(index)?.clone();
        self.selected_place = Some(candidate);
        self.selected_place.as_ref()
    }

    /// The dependency gate for route planning: `Some` only once both the
    /// delivery location and a destination are known.
    pub fn route_inputs(&self) -> Option<(Coordinate, Coordinate)> {
        let origin = self.delivery_location?;
        let destination = self.selected_place.as_ref()?.location;
        Some((origin, destination))
    }

    /// A failed plan leaves whatever route was previously held untouched.
    pub fn apply_route(&mut self, outcome: Result<RouteEstimate, RoutingError>) {
        if let Ok(estimate) = outcome {
            self.route = Some(estimate);
        }
    }

    pub fn delivery_location(&self) -> Option<Coordinate> {
        self.delivery_location
    }

    pub fn search_text(&self) -> &str {
        &self.search_text
    }

    pub fn candidates(&self) -> &[PlaceCandidate] {
        &self.candidates
    }

    pub fn selected_place(&self) -> Option<&PlaceCandidate> {
        self.selected_place.as_ref()
    }

    pub fn route(&self) -> Option<&RouteEstimate> {
        self.route.as_ref()
    }
}

/// Drives a [`TrackingSession`] through the resolver and directions
/// provider. Route planning is a derived computation: it runs exactly when
/// the `(origin, destination)` pair changes, never from scattered call
/// sites.
pub struct Tracker<P> {
    session: TrackingSession,
    resolver: PlaceResolver,
    directions: P,
    last_planned: Option<(Coordinate, Coordinate)>,
}

impl<P: DirectionsProvider> Tracker<P> {
    pub fn new(resolver: PlaceResolver, directions: P) -> Self {
        Self {
            session: TrackingSession::new(),
            resolver,
            directions,
            last_planned: None,
        }
    }

    /// Acquires the delivery location (with fallback) and stores it.
    pub fn start(&mut self, source: &dyn LocationSource) -> Coordinate {
        let location = acquire_location(source);
        self.session.set_delivery_location(location);
        self.sync_route();
        location
    }

    /// Runs a venue search end to end. Returns the (possibly empty)
    /// candidate list, or the resolver error for user messaging.
    pub fn search(&mut self, query: &str) -> Result<&[PlaceCandidate], PlaceError> {
        let Some(ticket) = self.session.begin_search(query) else {
            return Ok(&[]);
        };

        let outcome = self.resolver.resolve(&ticket.query, ticket.origin);
        match self.session.apply_search(ticket.seq, outcome) {
            SearchApply::Applied => Ok(self.session.candidates()),
            SearchApply::Stale => Ok(&[]),
            SearchApply::Failed(err) => Err(err),
        }
    }

    /// Selects a candidate by index and lets the route recompute if its
    /// inputs changed.
    pub fn select(&mut self, index: usize) -> Option<PlaceCandidate> {
        self.session.select_candidate(index)?;
        self.sync_route();
        self.session.selected_place().cloned()
    }

    pub fn session(&self) -> &TrackingSession {
        &self.session
    }

    pub fn route(&self) -> Option<&RouteEstimate> {
        self.session.route()
    }

    // The reactive recomputation effect, keyed on the exact input pair.
    // A failed plan records the attempted pair too; no retry until an
    // input actually changes.
    fn sync_route(&mut self) {
        let Some((origin, destination)) = self.session.route_inputs() else {
            return;
        };
        if self.last_planned == Some((origin, destination)) {
            return;
        }
        self.last_planned = Some((origin, destination));

        let outcome = self.directions.plan_route(origin, destination);
        if let Err(err) = &outcome {
            log::warn!("Route planning failed: {}", err);
        }
        self.session.apply_route(outcome);
    }
}
