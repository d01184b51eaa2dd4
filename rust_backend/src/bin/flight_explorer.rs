//! Flight Explorer terminal binary
//!
//! Loads the flight table once and reads commands from standard input. Text
//! results and chart specifications (as JSON lines) go to standard output.
//!
//! # Usage
//!
//! ```bash
//! flight-explorer --dataset data/airlines_flights_data.csv
//! flight-explorer --config explorer.toml
//! ```
//!
//! # Environment Variables
//!
//! - `RUST_LOG`: Log level (default: the config file's `logging.level`, else info)

use std::env;
use std::io;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{debug, info, Level};
use tracing_subscriber::FmtSubscriber;

use flight_explorer::api::DisplayMode;
use flight_explorer::app::commands::HELP;
use flight_explorer::app::{Session, TerminalCanvas};
use flight_explorer::config::ExplorerConfig;
use flight_explorer::io::{DatasetLoader, DatasetSourceType};
use flight_explorer::services::FlightExplorer;

#[derive(Debug, Parser)]
#[command(name = "flight-explorer", version, about = "Explore flight prices from the terminal")]
struct Cli {
    /// Delimited file with the flight table
    #[arg(long)]
    dataset: Option<PathBuf>,

    /// Configuration file (defaults to explorer.toml in the usual places)
    #[arg(long)]
    config: Option<PathBuf>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let (config, config_found) = match &cli.config {
        Some(path) => (
            ExplorerConfig::from_file(path)
                .with_context(|| format!("Failed to load config {}", path.display()))?,
            true,
        ),
        None => match ExplorerConfig::from_default_location() {
            Ok(config) => (config, true),
            Err(_) => (ExplorerConfig::default(), false),
        },
    };

    // Initialize logging
    FmtSubscriber::builder()
        .with_max_level(
            env::var("RUST_LOG")
                .ok()
                .and_then(|s| s.parse().ok())
                .or_else(|| config.logging.level.parse().ok())
                .unwrap_or(Level::INFO),
        )
        .with_target(true)
        .with_writer(io::stderr)
        .init();

    if !config_found {
        debug!("No explorer.toml found, using defaults");
    }

    let path = cli
        .dataset
        .or_else(|| config.dataset.path.clone())
        .context("No dataset given: pass --dataset or set dataset.path in explorer.toml")?;

    let loaded = match config.dataset_separator()? {
        Some(separator) => {
            DatasetLoader::load_with_separator(&path, DatasetSourceType::Delimited(separator))?
        }
        None => DatasetLoader::load_from_file(&path)?,
    };
    info!("Starting explorer with {} records", loaded.num_records);

    let mut explorer = FlightExplorer::new(loaded.dataset);
    for mode in [DisplayMode::FlightSearch, DisplayMode::Planner, DisplayMode::Summary] {
        explorer.attach(Box::new(TerminalCanvas::new(mode, io::stdout())));
    }

    let mut session = Session::new(explorer);
    println!("{}\n", HELP);
    if let Some(codes) = session.start(&config.explorer)? {
        println!("{}", codes);
    }

    let stdin = io::stdin();
    session.run(stdin.lock(), io::stdout())?;
    Ok(())
}
