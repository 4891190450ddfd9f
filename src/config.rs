use crate::airport::AirportId;
use crate::error::{DiagError, DiagResult};
use crate::order::DateRange;
use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::Arc;

/// A named `(Sc, K)` pair under test.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawScenario")]
pub struct ScenarioConfig {
    name: String,
    iteration_interval_minutes: u64,
    iteration_advance_limit: u64,
}

#[derive(Deserialize)]
struct RawScenario {
    name: String,
    #[serde(alias = "sc")]
    iteration_interval_minutes: i64,
    #[serde(alias = "k")]
    iteration_advance_limit: i64,
}

impl TryFrom<RawScenario> for ScenarioConfig {
    type Error = DiagError;

    fn try_from(raw: RawScenario) -> Result<Self, Self::Error> {
        ScenarioConfig::new(
            raw.name,
            raw.iteration_interval_minutes,
            raw.iteration_advance_limit,
        )
    }
}

impl ScenarioConfig {
    pub fn new(
        name: impl Into<String>,
        interval_minutes: i64,
        advance_limit: i64,
    ) -> DiagResult<Self> {
        let name = name.into();
        if interval_minutes <= 0 {
            return Err(DiagError::Configuration(format!(
                "scenario '{}': iteration interval must be positive, got {}",
                name, interval_minutes
            )));
        }
        if advance_limit <= 0 {
            return Err(DiagError::Configuration(format!(
                "scenario '{}': iteration advance limit must be positive, got {}",
                name, advance_limit
            )));
        }
        Ok(ScenarioConfig {
            name,
            iteration_interval_minutes: interval_minutes as u64,
            iteration_advance_limit: advance_limit as u64,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// `Sc`, the window size in minutes.
    pub fn interval_minutes(&self) -> u64 {
        self.iteration_interval_minutes
    }

    /// `K`.
    pub fn advance_limit(&self) -> u64 {
        self.iteration_advance_limit
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Thresholds {
    /// Window size used to look for sparse parts of the day.
    pub sparse_window_minutes: u64,
    /// A window with fewer departures than this is reported as sparse.
    pub sparse_window_flights: usize,
    /// Below this many average-sized orders per window the window is too small.
    pub min_orders_per_window: f64,
    pub reference_window_minutes: u64,
}

impl Default for Thresholds {
    fn default() -> Self {
        Thresholds {
            sparse_window_minutes: 60,
            sparse_window_flights: 50,
            min_orders_per_window: 5.0,
            reference_window_minutes: 120,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AnalysisConfig {
    pub hubs: Vec<AirportId>,
    pub simulation: DateRange,
    pub window_sizes: Vec<u64>,
    pub scenarios: Vec<ScenarioConfig>,
    pub thresholds: Thresholds,
}

fn midnight(year: i32, month: u32, day: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(year, month, day)
        .unwrap_or_default()
        .and_time(NaiveTime::MIN)
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        let scenarios = [
            ("ACTUAL", 120, 24),
            ("Sc x2", 240, 24),
            ("Sc x3", 360, 24),
            ("K /2", 120, 12),
            ("K /2, Sc x2", 240, 12),
            ("K /3, Sc x3", 360, 8),
        ]
        .into_iter()
        .filter_map(|(name, sc, k)| ScenarioConfig::new(name, sc, k).ok())
        .collect();

        AnalysisConfig {
            hubs: vec![Arc::from("SPIM"), Arc::from("EBCI"), Arc::from("UBBB")],
            simulation: DateRange {
                start: midnight(2025, 12, 1),
                end: midnight(2025, 12, 8),
            },
            window_sizes: vec![120, 240, 360, 480, 720],
            scenarios,
            thresholds: Thresholds::default(),
        }
    }
}

impl AnalysisConfig {
    pub fn load_from_file(path: &Path) -> DiagResult<Self> {
        let data = std::fs::read_to_string(path)?;
        let config: AnalysisConfig = serde_json::from_str(&data)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> DiagResult<()> {
        if self.simulation.start >= self.simulation.end {
            return Err(DiagError::Configuration(format!(
                "simulation range is empty: {} .. {}",
                self.simulation.start, self.simulation.end
            )));
        }
        if let Some(sc) = self.window_sizes.iter().find(|sc| **sc == 0) {
            return Err(DiagError::Configuration(format!(
                "window sizes must be positive, got {}",
                sc
            )));
        }
        let t = &self.thresholds;
        if t.sparse_window_minutes == 0 || t.reference_window_minutes == 0 {
            return Err(DiagError::Configuration(
                "threshold window sizes must be positive".to_string(),
            ));
        }
        if t.min_orders_per_window.is_nan() || t.min_orders_per_window < 0.0 {
            return Err(DiagError::Configuration(format!(
                "min_orders_per_window must be non-negative, got {}",
                t.min_orders_per_window
            )));
        }
        Ok(())
    }
}
