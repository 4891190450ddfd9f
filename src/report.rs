use crate::network::Analysis;
use crate::network::summary::CapacityVerdict;
use crate::schedule::ScheduleReport;
use colored::Colorize;
use tabled::settings::{Alignment, Style};
use tabled::{Table, Tabled};

fn render<T: Tabled>(rows: impl IntoIterator<Item = T>) -> String {
    let mut table = Table::new(rows);
    table.with(Style::rounded());
    table.with(Alignment::left());
    table.to_string()
}

fn heading(title: &str) {
    println!("\n{}", title.bold());
}

#[derive(Tabled)]
struct LoadRow {
    source: &'static str,
    loaded: usize,
    outside_range: usize,
    skipped: usize,
}

#[derive(Tabled)]
struct ProfileRow {
    #[tabled(rename = "Sc (min)")]
    window_minutes: u64,
    windows: usize,
    #[tabled(rename = "avg flights")]
    avg_flights: String,
    #[tabled(rename = "avg capacity")]
    avg_capacity: String,
    min: u64,
    max: u64,
}

#[derive(Tabled)]
struct ReachRow {
    destination: String,
    demand: u64,
    #[tabled(rename = "direct from hubs")]
    direct: String,
}

#[derive(Tabled)]
struct ProjectionRow {
    scenario: String,
    #[tabled(rename = "Sc")]
    interval: u64,
    #[tabled(rename = "K")]
    advance: u64,
    iterations: u64,
    #[tabled(rename = "flights/iter")]
    flights: String,
    #[tabled(rename = "cap/iter")]
    capacity: String,
    #[tabled(rename = "orders/iter")]
    orders: String,
    coverage: String,
}

fn optional(value: Option<f64>, precision: usize) -> String {
    value
        .map(|v| format!("{:.*}", precision, v))
        .unwrap_or_else(|| "n/a".to_string())
}

pub fn print_load(schedule: &ScheduleReport, orders: &crate::schedule::LoadReport) {
    heading("Input");
    let rows = [&schedule.flights, &schedule.airports, orders].map(|r| LoadRow {
        source: r.source_name,
        loaded: r.loaded,
        outside_range: r.filtered,
        skipped: r.skipped_count(),
    });
    println!("{}", render(rows));
}

/// Prints the analysis as tables.
/// At most `transfer_limit` one-stop paths are shown per destination.
pub fn print_analysis(analysis: &Analysis, transfer_limit: usize) {
    analysis
        .conditions
        .iter()
        .for_each(|c| println!("{} {}", "warning:".yellow().bold(), c));

    heading("Hourly departures");
    println!("{}", render(&analysis.sparse_profile.windows));
    let sparse = analysis
        .sparse_windows
        .iter()
        .map(|w| w.start.to_string())
        .collect::<Vec<_>>();
    if !sparse.is_empty() {
        println!("{} {}", "sparse windows:".yellow(), sparse.join(", "));
    }

    heading("Capacity per window size");
    println!(
        "{}",
        render(analysis.profiles.iter().map(|p| ProfileRow {
            window_minutes: p.summary.window_minutes,
            windows: p.summary.window_count,
            avg_flights: format!("{:.1}", p.summary.avg_flights),
            avg_capacity: format!("{:.0}", p.summary.avg_capacity),
            min: p.summary.min_capacity,
            max: p.summary.max_capacity,
        }))
    );

    heading("Hub connectivity");
    println!(
        "{}",
        render(analysis.reach.iter().map(|r| ReachRow {
            destination: r.destination.to_string(),
            demand: r.demand,
            direct: r
                .direct
                .iter()
                .map(|(hub, n)| format!("{}:{}", hub, n))
                .collect::<Vec<_>>()
                .join(" / "),
        }))
    );
    analysis.reach.iter().filter(|r| !r.has_direct()).for_each(|r| {
        println!(
            "{} {} ({} units)",
            "no direct hub flight:".yellow(),
            r.destination,
            r.demand
        );
        if r.is_unreachable() {
            println!("    {}", "no one-stop route".red());
        }
        r.transfers.iter().take(transfer_limit).for_each(|t| {
            println!(
                "    {} -> {} -> {} ({} combinations)",
                t.hub,
                t.path.intermediate,
                r.destination,
                t.path.combinations()
            )
        });
    });

    let unreachable = analysis
        .unreachable_destinations()
        .map(|r| r.destination.to_string())
        .collect::<Vec<_>>();
    if !unreachable.is_empty() {
        println!("{} {}", "unreachable from hubs:".red().bold(), unreachable.join(", "));
    }

    heading("Scenario projections");
    println!(
        "{}",
        render(analysis.projections.iter().map(|p| ProjectionRow {
            scenario: p.scenario.clone(),
            interval: p.interval_minutes,
            advance: p.advance_limit,
            iterations: p.iterations_per_week,
            flights: format!("{:.1}", p.avg_flights_per_window),
            capacity: format!("{:.0}", p.avg_capacity_per_window),
            orders: optional(p.orders_per_window, 1),
            coverage: format!("{:.1}%", p.coverage_percent),
        }))
    );

    let s = &analysis.summary;
    heading("Summary");
    println!("  flights:              {}", s.flights);
    println!("  routes:               {}", s.routes);
    println!("  flights per route:    {:.1}", s.flights_per_route);
    println!("  avg flight capacity:  {:.0}", s.avg_flight_capacity);
    println!("  daily capacity:       {}", s.daily_capacity);
    println!("  weekly capacity:      {}", s.weekly_capacity);
    println!("  weekly demand:        {}", s.weekly_demand);
    println!("  capacity / demand:    {}%", optional(s.capacity_ratio_percent, 1));

    heading("Diagnosis");
    match &analysis.diagnosis.capacity {
        CapacityVerdict::Insufficient { shortfall } => println!(
            "  {} weekly capacity is short of demand by {} units",
            "capacity:".red().bold(),
            shortfall
        ),
        CapacityVerdict::Sufficient { surplus } => println!(
            "  {} weekly capacity exceeds demand by {} units",
            "capacity:".green().bold(),
            surplus
        ),
    }
    let w = &analysis.diagnosis.window;
    let label = format!("window (Sc={}):", w.window_minutes);
    let label = if w.too_small { label.red().bold() } else { label.green().bold() };
    println!(
        "  {} avg capacity {:.0}, avg order {}, {} orders fit, {} windows needed",
        label,
        w.avg_capacity,
        optional(w.avg_order_size, 0),
        optional(w.orders_per_window, 1),
        optional(w.windows_needed, 0)
    );
}
