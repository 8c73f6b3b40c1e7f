//! Freight dispatch simulator CLI
//!
//! Loads a city table, places a random fleet, creates loads and runs
//! assignment/movement rounds, then prints a summary.

use std::error::Error;
use std::path::{Path, PathBuf};

use clap::Parser;
use dispatch_core::cities::CityDirectory;
use dispatch_core::runner::{DispatchSimulation, RunSummary};
use dispatch_core::scenario::{MatchingAlgorithmType, ScenarioParams};
use dispatch_core::ecs::TruckStatus;
use dispatch_core::telemetry::{DispatchEvent, EventRecord, SimSnapshot};
use serde::Serialize;
use tracing::{error, info};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

/// Freight dispatch simulation
#[derive(Parser, Debug)]
#[command(name = "dispatch-sim")]
#[command(about = "Simulate truck dispatch over a table of US cities", long_about = None)]
struct Args {
    /// City table (CSV with id, city, state_name, lat, lng, population)
    #[arg(long, env = "DISPATCH_CITIES")]
    cities: PathBuf,

    /// Number of trucks in the fleet
    #[arg(short, long, default_value = "50")]
    trucks: usize,

    /// Assignment + movement rounds
    #[arg(long, default_value = "10")]
    ticks: u64,

    /// Loads created before the first round
    #[arg(short, long, default_value = "5")]
    loads: usize,

    /// Keep cities with strictly more inhabitants than this
    #[arg(long, default_value = "50000")]
    min_population: u64,

    /// Seed for fleet placement and load generation (random if omitted)
    #[arg(short, long)]
    seed: Option<u64>,

    /// Score added for a truck too small for the load
    #[arg(long, default_value = "1000")]
    penalty: f64,

    /// Never assign a truck that cannot carry the load
    #[arg(long)]
    strict_capacity: bool,

    /// Write the event log to this CSV file
    #[arg(long)]
    events_csv: Option<PathBuf>,

    /// Print every truck and every open load after the run
    #[arg(long)]
    report: bool,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,
}

impl Args {
    fn scenario_params(&self) -> ScenarioParams {
        let algorithm = if self.strict_capacity {
            MatchingAlgorithmType::StrictCapacity
        } else {
            MatchingAlgorithmType::GreedyScoring
        };
        let mut params = ScenarioParams::default()
            .with_trucks(self.trucks)
            .with_ticks(self.ticks)
            .with_loads(self.loads)
            .with_min_population(self.min_population)
            .with_infeasibility_penalty(self.penalty)
            .with_matching_algorithm(algorithm);
        if let Some(seed) = self.seed {
            params = params.with_seed(seed);
        }
        params
    }
}

/// Flat CSV row; fields that do not apply to an event kind stay empty.
#[derive(Debug, Default, Serialize)]
struct EventRow {
    tick: u64,
    event: &'static str,
    load_id: Option<u64>,
    truck_id: Option<u32>,
    origin: Option<u64>,
    destination: Option<u64>,
    weight: Option<u32>,
}

impl From<&EventRecord> for EventRow {
    fn from(record: &EventRecord) -> Self {
        let row = EventRow {
            tick: record.tick,
            event: record.event.name(),
            ..Default::default()
        };
        match record.event {
            DispatchEvent::LoadCreated {
                id,
                origin,
                destination,
                weight,
            } => EventRow {
                load_id: Some(id.0),
                origin: Some(origin.0),
                destination: Some(destination.0),
                weight: Some(weight),
                ..row
            },
            DispatchEvent::LoadAssigned { load_id, truck_id } => EventRow {
                load_id: Some(load_id.0),
                truck_id: Some(truck_id.0),
                ..row
            },
            DispatchEvent::TruckArrived {
                truck_id,
                load_id,
                destination,
            } => EventRow {
                load_id: Some(load_id.0),
                truck_id: Some(truck_id.0),
                destination: Some(destination.0),
                ..row
            },
        }
    }
}

fn write_events(path: &Path, events: &[EventRecord]) -> Result<(), Box<dyn Error>> {
    let mut writer = csv::Writer::from_path(path)?;
    for record in events {
        writer.serialize(EventRow::from(record))?;
    }
    writer.flush()?;
    Ok(())
}

fn print_summary(summary: &RunSummary) {
    let counts = &summary.final_counts;
    println!("ticks run:        {}", summary.ticks);
    println!("operations:       {}", summary.operations);
    println!("loads created:    {}", summary.loads_created);
    println!("loads rejected:   {}", summary.loads_rejected);
    println!("assignments:      {}", summary.assignments);
    println!("deliveries:       {}", summary.deliveries);
    println!(
        "trucks:           {} idle / {} assigned",
        counts.trucks_idle, counts.trucks_assigned
    );
    println!(
        "open loads:       {} pending / {} in transit",
        counts.loads_pending, counts.loads_in_transit
    );
}

/// One line per truck, then one line per open load.
fn render_report(snapshot: &SimSnapshot, cities: &CityDirectory) -> Vec<String> {
    let mut lines = vec![format!("Trucks at tick {}:", snapshot.tick)];
    for truck in &snapshot.trucks {
        let city = truck
            .city
            .map(|id| cities.label(id))
            .unwrap_or_else(|| "unknown city".to_string());
        let status = match (truck.status, truck.assigned_load) {
            (TruckStatus::Assigned, Some(load)) => format!("carrying {load}"),
            (TruckStatus::Assigned, None) => "assigned".to_string(),
            (TruckStatus::Idle, _) => "idle".to_string(),
        };
        lines.push(format!(
            "  {} - {} - {} - cap {}t",
            truck.id, city, status, truck.capacity
        ));
    }

    lines.push("Loads:".to_string());
    if snapshot.loads.is_empty() {
        lines.push("  none open".to_string());
    }
    for load in &snapshot.loads {
        let assigned = match load.assigned_truck {
            Some(truck) => format!("assigned: {truck}"),
            None => "NO AVAILABLE TRUCK".to_string(),
        };
        lines.push(format!(
            "  {} {} -> {} - {}t - {}",
            load.id,
            cities.label(load.origin),
            cities.label(load.destination),
            load.weight,
            assigned
        ));
    }
    lines
}

fn run(args: &Args) -> Result<(), Box<dyn Error>> {
    let cities = CityDirectory::from_csv_path(&args.cities, args.min_population)?;
    info!(
        path = %args.cities.display(),
        cities = cities.len(),
        min_population = args.min_population,
        "city table loaded"
    );

    let mut sim = DispatchSimulation::new(args.scenario_params(), cities)?;
    let summary = sim.run();
    print_summary(&summary);
    if args.report {
        for line in render_report(&sim.snapshot(), sim.cities()) {
            println!("{line}");
        }
    }

    if let Some(path) = &args.events_csv {
        let events = &sim.telemetry().events;
        write_events(path, events)?;
        info!(path = %path.display(), events = events.len(), "event log written");
    }
    Ok(())
}

fn main() {
    let args = Args::parse();

    let default_level = if args.verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    let subscriber = FmtSubscriber::builder().with_env_filter(filter).finish();
    if let Err(err) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("Error: failed to set tracing subscriber: {err}");
    }

    if let Err(err) = run(&args) {
        error!("{err}");
        eprintln!("Error: {err}");
        std::process::exit(1);
    }
}
