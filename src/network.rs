//! Capacity and connectivity analysis over a loaded schedule.

pub mod connectivity;
pub mod coverage;
pub mod route_graph;
pub mod summary;
pub mod window;


use crate::config::AnalysisConfig;
use crate::error::{DatasetKind, DiagError, DiagResult};
use crate::network::connectivity::{hub_connectivity, DestinationReach};
use crate::network::coverage::{project_scenarios, Projection};
use crate::network::route_graph::RouteGraph;
use crate::network::summary::{diagnose, Diagnosis, NetworkSummary};
use crate::network::window::{
    aggregate_windows, sparse_windows, summarize_windows, WindowStats, WindowSummary,
};
use crate::order::{Demand, Order};
use crate::schedule::Schedule;
use serde::Serialize;
use tracing::{info, warn};

#[derive(Debug, Serialize)]
pub struct WindowProfile {
    pub summary: WindowSummary,
    pub windows: Vec<WindowStats>,
}

/// Everything the analysis found, ready for a report emitter.
#[derive(Debug, Serialize)]
pub struct Analysis {
    /// Dataset conditions that make some ratios undefined.
    #[serde(serialize_with = "serialize_conditions")]
    pub conditions: Vec<DiagError>,
    pub demand: Demand,
    pub profiles: Vec<WindowProfile>,
    pub sparse_profile: WindowProfile,
    pub sparse_windows: Vec<WindowStats>,
    pub reach: Vec<DestinationReach>,
    pub projections: Vec<Projection>,
    pub summary: NetworkSummary,
    pub diagnosis: Diagnosis,
}

fn serialize_conditions<S: serde::Serializer>(
    conditions: &[DiagError],
    s: S,
) -> Result<S::Ok, S::Error> {
    s.collect_seq(conditions.iter().map(|e| e.to_string()))
}

impl Analysis {
    pub fn unreachable_destinations(&self) -> impl Iterator<Item = &DestinationReach> {
        self.reach.iter().filter(|r| r.is_unreachable())
    }
}

fn empty_conditions(schedule: &Schedule, orders: &[Order]) -> Vec<DiagError> {
    [
        (schedule.flights.is_empty(), DatasetKind::Flights),
        (schedule.airports.is_empty(), DatasetKind::Airports),
        (orders.is_empty(), DatasetKind::Orders),
    ]
    .into_iter()
    .filter(|(empty, _)| *empty)
    .map(|(_, kind)| DiagError::EmptyDataset(kind))
    .collect()
}

fn profile(schedule: &Schedule, window_minutes: u64) -> DiagResult<WindowProfile> {
    let windows = aggregate_windows(&schedule.flights, window_minutes)?;
    Ok(WindowProfile {
        summary: summarize_windows(window_minutes, &windows),
        windows,
    })
}

/// Runs every analysis over one snapshot. Configuration is validated first.
pub fn analyze(
    schedule: &Schedule,
    orders: &[Order],
    config: &AnalysisConfig,
) -> DiagResult<Analysis> {
    config.validate()?;

    let conditions = empty_conditions(schedule, orders);
    conditions.iter().for_each(|c| warn!("{}", c));

    let demand = Demand::from_orders(orders);
    let graph = RouteGraph::new(&schedule.flights);
    info!(
        "route graph: {} routes over {} flights",
        graph.route_count(),
        graph.flight_count()
    );

    let profiles = config
        .window_sizes
        .iter()
        .map(|sc| profile(schedule, *sc))
        .collect::<DiagResult<Vec<_>>>()?;

    let sparse_profile = profile(schedule, config.thresholds.sparse_window_minutes)?;
    let sparse = sparse_windows(&sparse_profile.windows, config.thresholds.sparse_window_flights)
        .into_iter()
        .cloned()
        .collect();

    let reach = hub_connectivity(&graph, &config.hubs, &demand);
    let projections = project_scenarios(
        &schedule.flights,
        &config.scenarios,
        demand.total_quantity,
        demand.average_order_size(),
    )?;

    let summary = NetworkSummary::new(&graph, &schedule.flights, &demand);
    let diagnosis = diagnose(&summary, &schedule.flights, &demand, &config.thresholds)?;

    Ok(Analysis {
        conditions,
        demand,
        profiles,
        sparse_profile,
        sparse_windows: sparse,
        reach,
        projections,
        summary,
        diagnosis,
    })
}
