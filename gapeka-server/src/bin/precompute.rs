//! Route precomputation: run once to produce the persisted route store the
//! server reads.

use std::time::Instant;

use gapeka_server::config::PrecomputeConfig;
use gapeka_server::data::{self, DataDir, DataError};
use gapeka_server::graph::RailGraph;
use gapeka_server::precompute::PrecomputeSession;

use tracing::info;
use tracing_subscriber::EnvFilter;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    if let Err(e) = run() {
        eprintln!("precompute failed: {e}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), DataError> {
    let data_dir = std::env::var("GAPEKA_DATA_DIR").unwrap_or_else(|_| "data".to_string());
    let data_dir = DataDir::new(data_dir);
    let started = Instant::now();

    let schedules = data::load_schedules(&data_dir.schedules())?;
    let stations = data::load_stations(&data_dir.stations())?;
    let elements = data::load_rail_elements(&data_dir.rail_geometry())?;
    info!(
        trains = schedules.len(),
        stations = stations.len(),
        elements = elements.len(),
        "input data loaded"
    );

    let graph = RailGraph::build(&elements);

    let config = PrecomputeConfig::default();
    let mut session = PrecomputeSession::new(&graph, &stations, &config);
    let store = session.stitch_all(&schedules);

    let output = data_dir.routes();
    store.save(&output)?;

    info!(
        routes = store.len(),
        output = %output.display(),
        elapsed_ms = started.elapsed().as_millis(),
        "precomputation complete"
    );
    Ok(())
}
