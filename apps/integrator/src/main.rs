use anyhow::Context;
use clap::Parser;
use feast::domain::config::IntegratorConfig;
use feast::kernel::config::load_config;
use feast::kernel::relation::{read_snapshot, write_snapshot};
use feast::kernel::status::Status;
use std::path::PathBuf;
use tracing::{info, warn};

/// Runs one reconciliation pass of the Feast integrator charm.
#[derive(Debug, Parser)]
#[command(name = "feast-integrator", version, about)]
struct Cli {
    /// Charm configuration file (TOML, YAML or JSON).
    #[arg(long)]
    config: PathBuf,

    /// Model snapshot, rewritten after the pass.
    #[arg(long)]
    state: PathBuf,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config: IntegratorConfig = load_config(&cli.config).context("Failed to load configuration")?;
    let _logger = feast::logging::init(&config.app_name, &config.logging).context("Failed to initialize logger")?;

    let snapshot = read_snapshot(&cli.state).context("Failed to read model snapshot")?;
    info!(leader = snapshot.leader, relations = snapshot.relations.len(), "Reconciling");

    let outcome = feast_integrator::reconcile(&config, &snapshot);
    write_snapshot(&cli.state, &outcome.snapshot).context("Failed to write model snapshot")?;

    match outcome.report.unit_status() {
        Status::Active => info!("Unit status: active"),
        status => warn!(status = status.name(), "Unit status: {status}"),
    }
    Ok(())
}
