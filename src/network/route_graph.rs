use crate::airport::AirportId;
use crate::flight::Flight;
use serde::Serialize;
use std::collections::HashMap;

/// A two-leg route `origin -> intermediate -> destination`.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct TransferPath {
    pub intermediate: AirportId,
    /// Direct flights on `origin -> intermediate`.
    pub first_leg_flights: usize,
    /// Direct flights on `intermediate -> destination`.
    pub second_leg_flights: usize,
}

impl TransferPath {
    /// Number of distinct flight pairings along the path.
    pub fn combinations(&self) -> usize {
        self.first_leg_flights * self.second_leg_flights
    }
}

/// Directed route network over a flight table.
///
/// Adjacency lists keep the order in which each destination was first seen,
/// so every query answers the same way across runs.
pub struct RouteGraph<'a> {
    flights: &'a [Flight],
    adjacency: HashMap<AirportId, Vec<AirportId>>,
    routes: HashMap<AirportId, HashMap<AirportId, Vec<usize>>>,
    route_count: usize,
}

impl<'a> RouteGraph<'a> {
    pub fn new(flights: &'a [Flight]) -> RouteGraph<'a> {
        let mut adjacency: HashMap<AirportId, Vec<AirportId>> = HashMap::new();
        let mut routes: HashMap<AirportId, HashMap<AirportId, Vec<usize>>> = HashMap::new();
        let mut route_count = 0;

        flights.iter().enumerate().for_each(|(idx, f)| {
            let served = routes
                .entry(f.origin_id.clone())
                .or_default()
                .entry(f.destination_id.clone())
                .or_default();
            if served.is_empty() {
                adjacency
                    .entry(f.origin_id.clone())
                    .or_default()
                    .push(f.destination_id.clone());
                route_count += 1;
            }
            served.push(idx);
        });

        RouteGraph {
            flights,
            adjacency,
            routes,
            route_count,
        }
    }

    fn route(&self, origin: &str, destination: &str) -> &[usize] {
        self.routes
            .get(origin)
            .and_then(|dests| dests.get(destination))
            .map(|v| v.as_slice())
            .unwrap_or(&[])
    }

    /// All flights on the ordered pair, in load order. Empty when the pair is not served.
    pub fn direct_flights(&self, origin: &str, destination: &str) -> Vec<&'a Flight> {
        self.route(origin, destination)
            .iter()
            .map(|i| &self.flights[*i])
            .collect()
    }

    pub fn direct_flight_count(&self, origin: &str, destination: &str) -> usize {
        self.route(origin, destination).len()
    }

    /// Destinations one flight away from `origin`, in first-seen order.
    pub fn reachable_destinations(&self, origin: &str) -> &[AirportId] {
        self.adjacency
            .get(origin)
            .map(|v| v.as_slice())
            .unwrap_or(&[])
    }

    /// Every intermediate `m` with `origin -> m` and `m -> destination` served directly,
    /// following the origin's adjacency order.
    pub fn one_transfer_paths(&self, origin: &str, destination: &str) -> Vec<TransferPath> {
        self.reachable_destinations(origin)
            .iter()
            .filter_map(|m| {
                let second_leg_flights = self.direct_flight_count(m, destination);
                (second_leg_flights > 0).then(|| TransferPath {
                    intermediate: m.clone(),
                    first_leg_flights: self.direct_flight_count(origin, m),
                    second_leg_flights,
                })
            })
            .collect()
    }

    /// Distinct ordered origin/destination pairs.
    pub fn route_count(&self) -> usize {
        self.route_count
    }

    pub fn flight_count(&self) -> usize {
        self.flights.len()
    }
}
