use crate::config::Thresholds;
use crate::error::DiagResult;
use crate::flight::Flight;
use crate::network::route_graph::RouteGraph;
use crate::network::window::{aggregate_windows, summarize_windows};
use crate::order::Demand;
use serde::Serialize;

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct NetworkSummary {
    pub flights: usize,
    pub routes: usize,
    pub flights_per_route: f64,
    pub avg_flight_capacity: f64,
    pub daily_capacity: u64,
    pub weekly_capacity: u64,
    pub weekly_demand: u64,
    /// Weekly capacity over weekly demand in percent, `None` without demand.
    pub capacity_ratio_percent: Option<f64>,
}

impl NetworkSummary {
    pub fn new(graph: &RouteGraph, flights: &[Flight], demand: &Demand) -> NetworkSummary {
        let daily_capacity = flights.iter().map(|f| f.capacity).sum::<u64>();
        let weekly_capacity = daily_capacity * 7;
        let ratio = |num: f64, den: usize| if den == 0 { 0.0 } else { num / den as f64 };

        NetworkSummary {
            flights: flights.len(),
            routes: graph.route_count(),
            flights_per_route: ratio(flights.len() as f64, graph.route_count()),
            avg_flight_capacity: ratio(daily_capacity as f64, flights.len()),
            daily_capacity,
            weekly_capacity,
            weekly_demand: demand.total_quantity,
            capacity_ratio_percent: (demand.total_quantity > 0)
                .then(|| weekly_capacity as f64 / demand.total_quantity as f64 * 100.0),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum CapacityVerdict {
    Sufficient { surplus: u64 },
    Insufficient { shortfall: u64 },
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct WindowFit {
    pub window_minutes: u64,
    pub avg_capacity: f64,
    pub avg_order_size: Option<f64>,
    pub orders_per_window: Option<f64>,
    /// Windows needed to move every order at the average fill.
    pub windows_needed: Option<f64>,
    pub too_small: bool,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Diagnosis {
    pub capacity: CapacityVerdict,
    pub window: WindowFit,
}

pub fn diagnose(
    summary: &NetworkSummary,
    flights: &[Flight],
    demand: &Demand,
    thresholds: &Thresholds,
) -> DiagResult<Diagnosis> {
    let capacity = if summary.weekly_capacity < summary.weekly_demand {
        CapacityVerdict::Insufficient {
            shortfall: summary.weekly_demand - summary.weekly_capacity,
        }
    } else {
        CapacityVerdict::Sufficient {
            surplus: summary.weekly_capacity - summary.weekly_demand,
        }
    };

    let window_minutes = thresholds.reference_window_minutes;
    let windows = aggregate_windows(flights, window_minutes)?;
    let avg_capacity = summarize_windows(window_minutes, &windows).avg_capacity;
    let avg_order_size = demand.average_order_size();
    let orders_per_window = avg_order_size.map(|size| avg_capacity / size);
    let windows_needed = orders_per_window
        .filter(|n| *n > 0.0)
        .map(|n| demand.order_count as f64 / n);

    Ok(Diagnosis {
        capacity,
        window: WindowFit {
            window_minutes,
            avg_capacity,
            avg_order_size,
            orders_per_window,
            windows_needed,
            too_small: orders_per_window.is_some_and(|n| n < thresholds.min_orders_per_window),
        },
    })
}
