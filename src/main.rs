//! # TrailPass — Ski Trail Manager Server
//!
//! Records trail check-ins keyed by wallet address, serves per-wallet
//! history and aggregate statistics, and runs continuous background jobs
//! (chain monitoring, trail statistics, health sampling).
//!
//! Usage:
//!   trailpass                    # Start with ~/.trailpass/config.toml (or defaults)
//!   trailpass --port 8080        # Override the gateway port
//!   trailpass -v                 # Verbose logging

mod jobs;

use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;
use tracing_subscriber::EnvFilter;
use trailpass_core::TrailPassConfig;
use trailpass_gateway::server::{self, AppState};
use trailpass_scheduler::Scheduler;
use trailpass_store::{CheckInStore, MemoryStore};

#[derive(Parser)]
#[command(
    name = "trailpass",
    version,
    about = "🎿 TrailPass — Ski Trail Manager Server"
)]
struct Cli {
    /// Config file path (default: ~/.trailpass/config.toml)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Override the gateway bind host
    #[arg(long)]
    host: Option<String>,

    /// Override the gateway port
    #[arg(short, long)]
    port: Option<u16>,

    /// Verbose logging
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        "trailpass=debug,trailpass_gateway=debug,trailpass_store=debug,trailpass_scheduler=debug,tower_http=debug"
    } else {
        "info"
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .with_target(false)
        .init();

    let mut config = match &cli.config {
        Some(path) => TrailPassConfig::load_from(path)?,
        None => TrailPassConfig::load()?,
    };
    if let Some(host) = cli.host {
        config.gateway.host = host;
    }
    if let Some(port) = cli.port {
        config.gateway.port = port;
    }

    let started = Instant::now();
    let store: Arc<dyn CheckInStore> = Arc::new(MemoryStore::new());

    // Launch the continuous background jobs before serving traffic.
    let scheduler = Arc::new(Scheduler::new());
    scheduler.start(jobs::background_jobs(&config, store.clone(), started));

    println!("{}", "=".repeat(60));
    println!("🚀 TrailPass Ski Trail Manager Server");
    println!("{}", "=".repeat(60));
    println!(
        "📡 API:    http://{}:{}/api",
        config.gateway.host, config.gateway.port
    );
    println!(
        "❤️  Health: http://{}:{}/health",
        config.gateway.host, config.gateway.port
    );
    println!("🔄 Background jobs are running continuously");
    println!("{}", "=".repeat(60));

    server::start(AppState {
        config,
        store,
        scheduler,
        start_time: started,
    })
    .await
}
