use crate::config::ScenarioConfig;
use crate::error::DiagResult;
use crate::flight::Flight;
use crate::network::window::{aggregate_windows, summarize_windows, WindowStats};
use crate::time::Time;
use serde::Serialize;
use tracing::debug;

/// Theoretical weekly throughput of one scenario.
///
/// This is a ceiling: every window is assumed fully usable, ignoring airport
/// storage and whether a given destination is reachable at all.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Projection {
    pub scenario: String,
    pub interval_minutes: u64,
    pub advance_limit: u64,
    pub iterations_per_week: u64,
    pub avg_flights_per_window: f64,
    pub avg_capacity_per_window: f64,
    pub projected_weekly_capacity: f64,
    /// Capped at 100. Zero when there is no demand.
    pub coverage_percent: f64,
    /// Average-sized orders that fit in an average window, if any orders exist.
    pub orders_per_window: Option<f64>,
    pub demand_empty: bool,
}

/// `min(100, projected / demand * 100)`, defined as 0 for zero demand.
pub fn coverage_percent(projected_weekly_capacity: f64, weekly_demand: u64) -> f64 {
    if weekly_demand == 0 {
        return 0.0;
    }
    (projected_weekly_capacity / weekly_demand as f64 * 100.0).min(100.0)
}

pub fn project_coverage(
    config: &ScenarioConfig,
    windows: &[WindowStats],
    weekly_demand: u64,
    avg_order_size: Option<f64>,
) -> Projection {
    let sc = config.interval_minutes();
    let iterations_per_week = Time::MINUTES_PER_WEEK / sc;
    let summary = summarize_windows(sc, windows);
    let projected_weekly_capacity = summary.avg_capacity * iterations_per_week as f64;

    debug!(
        "scenario {}: {} iterations, {:.1} avg capacity per window",
        config.name(),
        iterations_per_week,
        summary.avg_capacity
    );

    Projection {
        scenario: config.name().to_string(),
        interval_minutes: sc,
        advance_limit: config.advance_limit(),
        iterations_per_week,
        avg_flights_per_window: summary.avg_flights,
        avg_capacity_per_window: summary.avg_capacity,
        projected_weekly_capacity,
        coverage_percent: coverage_percent(projected_weekly_capacity, weekly_demand),
        orders_per_window: avg_order_size
            .filter(|size| *size > 0.0)
            .map(|size| summary.avg_capacity / size),
        demand_empty: weekly_demand == 0,
    }
}

/// Aggregates and projects each scenario independently, in the given order.
pub fn project_scenarios(
    flights: &[Flight],
    scenarios: &[ScenarioConfig],
    weekly_demand: u64,
    avg_order_size: Option<f64>,
) -> DiagResult<Vec<Projection>> {
    scenarios
        .iter()
        .map(|config| {
            let windows = aggregate_windows(flights, config.interval_minutes())?;
            Ok(project_coverage(config, &windows, weekly_demand, avg_order_size))
        })
        .collect()
}
