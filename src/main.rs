use capdiag::config::AnalysisConfig;
use capdiag::schedule::{load_orders_from_file, Schedule};
use capdiag::{logging, network, report};
use clap::Parser;
use std::path::PathBuf;
use tracing::info;

#[derive(Parser)]
#[command(about = "Capacity and connectivity diagnostics for a flight schedule")]
struct Args {
    /// Flight table (CSV: origin, destination, HH:MM, HH:MM, capacity)
    #[arg(short, long, value_name = "FILE", default_value = "data/flights.csv")]
    flights: PathBuf,

    /// Airport table (whitespace-delimited, capacity last)
    #[arg(short, long, value_name = "FILE", default_value = "data/airports.txt")]
    airports: PathBuf,

    /// Order log (CSV: timestamp, destination, quantity, client)
    #[arg(short, long, value_name = "FILE", default_value = "data/orders.csv")]
    orders: PathBuf,

    /// Analysis settings (JSON); built-in defaults when omitted
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Print the analysis as JSON instead of tables
    #[arg(long)]
    json: bool,

    /// One-stop routes shown per destination
    #[arg(long, default_value_t = 5)]
    transfer_limit: usize,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();
    logging::init();

    let config = match &args.config {
        Some(path) => {
            info!("using analysis config {}", path.display());
            AnalysisConfig::load_from_file(path)?
        }
        None => AnalysisConfig::default(),
    };

    let (schedule, schedule_report) = Schedule::load_from_files(&args.flights, &args.airports)?;
    let (orders, order_report) = load_orders_from_file(&args.orders, &config.simulation)?;

    let analysis = network::analyze(&schedule, &orders, &config)?;

    if args.json {
        let output = serde_json::json!({
            "input": {
                "flights": schedule_report.flights,
                "airports": schedule_report.airports,
                "orders": order_report,
            },
            "analysis": analysis,
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else {
        report::print_load(&schedule_report, &order_report);
        report::print_analysis(&analysis, args.transfer_limit);
    }
    Ok(())
}
