use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use tinytown::engine::{EngineBuilder, EngineSettings};
use tinytown::scenario::ScenarioLoader;
use tinytown::web::{self, WebServerConfig};

#[derive(Debug, Parser)]
#[command(author, version, about = "Tiny grid-town simulator")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Run the simulation headless for a fixed number of ticks
    Run {
        /// Path to the scenario YAML file
        #[arg(long, default_value = "scenarios/riverside.yaml")]
        scenario: PathBuf,

        /// Override tick count (uses the scenario default when omitted)
        #[arg(long)]
        ticks: Option<u64>,

        /// Override snapshot interval in ticks (0 disables snapshots)
        #[arg(long)]
        snapshot_interval: Option<u64>,

        /// Directory for snapshots
        #[arg(long)]
        snapshot_dir: Option<PathBuf>,
    },
    /// Serve the browser UI and tick the simulation on a timer
    Serve {
        /// Path to the scenario YAML file
        #[arg(long, default_value = "scenarios/riverside.yaml")]
        scenario: PathBuf,

        #[arg(long, default_value = "127.0.0.1")]
        host: String,

        #[arg(long, default_value_t = 8080)]
        port: u16,

        /// Override snapshot interval in ticks (0 disables snapshots)
        #[arg(long)]
        snapshot_interval: Option<u64>,

        /// Directory for snapshots
        #[arg(long)]
        snapshot_dir: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    match cli.command {
        Command::Run {
            scenario,
            ticks,
            snapshot_interval,
            snapshot_dir,
        } => run_headless(scenario, ticks, snapshot_interval, snapshot_dir),
        Command::Serve {
            scenario,
            host,
            port,
            snapshot_interval,
            snapshot_dir,
        } => serve(scenario, host, port, snapshot_interval, snapshot_dir),
    }
}

fn run_headless(
    scenario_path: PathBuf,
    ticks: Option<u64>,
    snapshot_interval: Option<u64>,
    snapshot_dir: Option<PathBuf>,
) -> Result<()> {
    let loader = ScenarioLoader::new(".");
    let scenario = loader.load(&scenario_path)?;
    let mut world = scenario.build_world()?;
    let ticks = scenario.ticks(ticks);

    let settings = EngineSettings {
        scenario_name: scenario.name.clone(),
        seed: scenario.seed,
        snapshot_interval_ticks: snapshot_interval.unwrap_or(scenario.snapshot.interval),
        snapshot_dir: snapshot_dir.unwrap_or_else(|| scenario.snapshot.output_dir.clone()),
    };
    let mut engine = EngineBuilder::new(settings).with_standard_systems().build();
    engine.run(&mut world, ticks)?;

    tracing::info!(
        scenario = %scenario.name,
        ticks,
        buildings = world.grid().building_count(),
        total_happiness = world.total_happiness(),
        "run complete"
    );
    println!(
        "Scenario '{}' completed after {} ticks. Total happiness: {}",
        scenario.name,
        ticks,
        world.total_happiness()
    );
    Ok(())
}

fn serve(
    scenario_path: PathBuf,
    host: String,
    port: u16,
    snapshot_interval: Option<u64>,
    snapshot_dir: Option<PathBuf>,
) -> Result<()> {
    let loader = ScenarioLoader::new(".");
    let scenario = loader.load(&scenario_path)?;
    let config = WebServerConfig {
        snapshot_interval: snapshot_interval.unwrap_or(scenario.snapshot.interval),
        snapshot_dir: snapshot_dir.unwrap_or_else(|| scenario.snapshot.output_dir.clone()),
        scenario,
        host,
        port,
    };
    tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?
        .block_on(web::run(config))
}
