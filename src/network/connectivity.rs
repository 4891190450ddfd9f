use crate::airport::AirportId;
use crate::network::route_graph::{RouteGraph, TransferPath};
use crate::order::Demand;
use serde::Serialize;

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct HubTransfer {
    pub hub: AirportId,
    pub path: TransferPath,
}

/// How a demanded destination is served from the hubs.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct DestinationReach {
    pub destination: AirportId,
    pub demand: u64,
    /// Direct flight count from each hub, in hub order.
    pub direct: Vec<(AirportId, usize)>,
    /// Only filled when no hub serves the destination directly.
    pub transfers: Vec<HubTransfer>,
}

impl DestinationReach {
    pub fn has_direct(&self) -> bool {
        self.direct.iter().any(|(_, n)| *n > 0)
    }

    /// Neither a direct flight nor a single stop reaches it from any hub.
    pub fn is_unreachable(&self) -> bool {
        !self.has_direct() && self.transfers.is_empty()
    }
}

/// Reachability of every demanded destination, ordered by demand descending.
pub fn hub_connectivity(
    graph: &RouteGraph,
    hubs: &[AirportId],
    demand: &Demand,
) -> Vec<DestinationReach> {
    demand
        .by_destination
        .iter()
        .map(|(destination, quantity)| {
            let direct = hubs
                .iter()
                .map(|hub| (hub.clone(), graph.direct_flight_count(hub, destination)))
                .collect::<Vec<_>>();
            let mut reach = DestinationReach {
                destination: destination.clone(),
                demand: *quantity,
                direct,
                transfers: vec![],
            };
            if !reach.has_direct() {
                reach.transfers = hubs
                    .iter()
                    .flat_map(|hub| {
                        graph
                            .one_transfer_paths(hub, destination)
                            .into_iter()
                            .map(move |path| HubTransfer {
                                hub: hub.clone(),
                                path,
                            })
                    })
                    .collect();
            }
            reach
        })
        .collect()
}
