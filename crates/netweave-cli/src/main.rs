//! Netweave - Main entry point
//!
//! Crawls a network over CDP/LLDP neighbor relationships starting from the
//! seed devices, then writes the device records and topology graph as JSON.

mod config;
mod output;
mod seeds;

use anyhow::Result;
use chrono::Local;
use clap::Parser;
use netweave_core::{DeviceParams, DeviceStore};
use netweave_discovery::{Frontier, FrontierConfig, RunSummary};
use netweave_session::{CaptureProvider, SessionProvider, SshProvider};
use std::path::PathBuf;
use tracing::{info, info_span, Level, Span};
use tracing_subscriber::FmtSubscriber;
use uuid::Uuid;

#[derive(Parser, Debug)]
#[command(name = "netweave")]
#[command(about = "CDP/LLDP network discovery crawler")]
#[command(version)]
struct Args {
    /// Path to configuration file
    #[arg(short, long, default_value = "netweave.toml")]
    config: PathBuf,

    /// Path to the seed device list
    #[arg(short, long, default_value = "devices.toml")]
    devices: PathBuf,

    /// Directory for result files
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Maximum number of devices to store
    #[arg(short, long)]
    max_devices: Option<usize>,

    /// Excluded range in CIDR notation (repeatable, added to the configured ranges)
    #[arg(short = 'x', long)]
    exclude: Vec<String>,

    /// Replay captured command output from this directory instead of using SSH
    #[arg(long)]
    capture_dir: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, default_value = "info")]
    log_level: String,

    /// Shorthand for --log-level debug
    #[arg(short, long)]
    verbose: bool,

    /// Write a default configuration file to --config and exit
    #[arg(long)]
    init_config: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize logging
    let level = if args.verbose {
        Level::DEBUG
    } else {
        match args.log_level.to_lowercase().as_str() {
            "trace" => Level::TRACE,
            "debug" => Level::DEBUG,
            "info" => Level::INFO,
            "warn" => Level::WARN,
            "error" => Level::ERROR,
            _ => Level::INFO,
        }
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(true)
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;

    info!("Netweave v{}", env!("CARGO_PKG_VERSION"));

    if args.init_config {
        config::save_default_config(&args.config)?;
        info!(path = %args.config.display(), "Wrote default configuration");
        return Ok(());
    }

    // Load configuration, command line wins
    let mut config = config::load_config(&args.config)?;
    if let Some(max_devices) = args.max_devices {
        config.discovery.max_devices = max_devices;
    }
    config.discovery.exclude.extend(args.exclude.iter().cloned());
    if let Some(dir) = args.output_dir {
        config.output.dir = dir;
    }

    info!(
        max_devices = config.discovery.max_devices,
        excluded = config.discovery.exclude.len(),
        output = %config.output.dir.display(),
        "Configuration loaded"
    );

    let seeds = seeds::load_devices(&args.devices)?;

    let run_id = Uuid::new_v4();
    let span = info_span!("discovery", run_id = %run_id);
    let frontier_config = config.to_frontier_config();

    let (store, summary) = match &args.capture_dir {
        Some(dir) => {
            info!(dir = %dir.display(), "Replaying captured device output");
            discover(CaptureProvider::new(dir), frontier_config, seeds, span).await
        }
        None => {
            let provider = SshProvider::new(config.to_ssh_config());
            discover(provider, frontier_config, seeds, span).await
        }
    };

    let written = output::write_results(&store, &config.output.dir, Local::now())?;

    print!("{}", output::render_summary(&store, &summary));
    println!("Results: {}", written.discovery.display());
    println!("Topology: {}", written.topology.display());

    Ok(())
}

async fn discover<S: SessionProvider>(
    provider: S,
    config: FrontierConfig,
    seeds: Vec<DeviceParams>,
    span: Span,
) -> (DeviceStore, RunSummary) {
    let mut frontier = Frontier::new(provider, config, span);
    frontier.seed(seeds);
    let summary = frontier.run().await;
    (frontier.into_store(), summary)
}
