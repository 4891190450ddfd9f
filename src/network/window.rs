use crate::error::{DiagError, DiagResult};
use crate::flight::Flight;
use crate::time::Time;
use serde::Serialize;
use tabled::Tabled;
use tracing::debug;

/// Departures inside one `[start, end)` slice of the day.
#[derive(Clone, Debug, PartialEq, Serialize, Tabled)]
pub struct WindowStats {
    pub start: Time,
    pub end: Time,
    pub flight_count: usize,
    pub total_capacity: u64,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct WindowSummary {
    pub window_minutes: u64,
    pub window_count: usize,
    pub avg_flights: f64,
    pub avg_capacity: f64,
    pub min_capacity: u64,
    pub max_capacity: u64,
}

/// Buckets departures into windows of `window_minutes` laid end-to-end from midnight.
///
/// There are `ceil(1440 / window_minutes)` windows; when the size does not divide
/// the day the last one is clipped at 24:00. Windows without departures are kept.
pub fn aggregate_windows(flights: &[Flight], window_minutes: u64) -> DiagResult<Vec<WindowStats>> {
    if window_minutes == 0 {
        return Err(DiagError::Configuration(
            "window size must be positive".to_string(),
        ));
    }
    let day = Time::MINUTES_PER_DAY;
    let window_count = day.div_ceil(window_minutes) as usize;

    let mut windows = (0..window_count as u64)
        .map(|i| {
            let start = Time(i * window_minutes);
            WindowStats {
                start,
                end: Time((start + window_minutes).minutes().min(day)),
                flight_count: 0,
                total_capacity: 0,
            }
        })
        .collect::<Vec<WindowStats>>();

    flights.iter().for_each(|f| {
        let idx = ((f.departure_time.minutes() / window_minutes) as usize).min(window_count - 1);
        windows[idx].flight_count += 1;
        windows[idx].total_capacity += f.capacity;
    });

    debug!(
        "aggregated {} flights into {} windows of {} minutes",
        flights.len(),
        window_count,
        window_minutes
    );
    Ok(windows)
}

pub fn summarize_windows(window_minutes: u64, windows: &[WindowStats]) -> WindowSummary {
    let count = windows.len();
    let (flights, capacity) = windows.iter().fold((0usize, 0u64), |(f, c), w| {
        (f + w.flight_count, c + w.total_capacity)
    });
    let mean = |total: f64| if count == 0 { 0.0 } else { total / count as f64 };

    WindowSummary {
        window_minutes,
        window_count: count,
        avg_flights: mean(flights as f64),
        avg_capacity: mean(capacity as f64),
        min_capacity: windows.iter().map(|w| w.total_capacity).min().unwrap_or(0),
        max_capacity: windows.iter().map(|w| w.total_capacity).max().unwrap_or(0),
    }
}

/// Windows with fewer than `min_flights` departures.
pub fn sparse_windows(windows: &[WindowStats], min_flights: usize) -> Vec<&WindowStats> {
    windows
        .iter()
        .filter(|w| w.flight_count < min_flights)
        .collect()
}
