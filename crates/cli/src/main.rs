//! # mydns-proxy
//!
//! DNS-over-HTTPS proxy racing health-weighted public resolvers.

mod bootstrap;
mod di;
mod server;

use clap::Parser;
use mydns_api::{create_api_routes, AppState};
use mydns_domain::CliOverrides;
use mydns_jobs::{HealthScoreJob, JobRunner};
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing::{error, info};

#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

/// Interval of the expired key sweep on the in-memory store
const KV_PURGE_INTERVAL: Duration = Duration::from_secs(60);

#[derive(Parser)]
#[command(name = "mydns-proxy")]
#[command(version)]
#[command(about = "DNS-over-HTTPS proxy with health-weighted upstream racing")]
struct Cli {
    /// Path to a TOML configuration file (built-in defaults when omitted)
    #[arg(short = 'c', long)]
    config: Option<String>,

    /// Bind address
    #[arg(short = 'b', long)]
    bind: Option<String>,

    /// HTTP port
    #[arg(short = 'p', long)]
    port: Option<u16>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short = 'l', long)]
    log_level: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let overrides = CliOverrides {
        bind_address: cli.bind,
        port: cli.port,
        log_level: cli.log_level,
    };

    let config = bootstrap::load_config(cli.config.as_deref(), overrides)?;
    bootstrap::init_logging(&config);
    bootstrap::report_config(cli.config.as_deref(), &config);

    let services = di::Services::new(&config)?;
    let use_cases = di::UseCases::new(&services, &config);
    let shutdown = CancellationToken::new();

    let mut jobs = JobRunner::new(shutdown.clone());
    jobs.spawn_health_scores(
        HealthScoreJob::new(use_cases.health_maintenance.clone())
            .with_interval(config.health.interval_secs),
    );
    let kv = services.kv.clone();
    jobs.spawn_periodic("kv_purge", KV_PURGE_INTERVAL, move || {
        kv.purge_expired();
    });
    info!(jobs = jobs.running(), "Background jobs started");

    let app = create_api_routes(AppState {
        resolve: use_cases.resolve.clone(),
        health_snapshot: use_cases.health_snapshot.clone(),
        list_providers: use_cases.list_providers.clone(),
        analytics: use_cases.analytics.clone(),
    });

    let signal_token = shutdown.clone();
    tokio::spawn(async move {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!(error = %e, "Failed to listen for shutdown signal");
            return;
        }
        info!("Shutdown signal received");
        signal_token.cancel();
    });

    let bind_addr = format!("{}:{}", config.server.bind_address, config.server.port);
    info!(bind = %bind_addr, "Starting mydns-proxy");

    let result = server::start_web_server(bind_addr, app, shutdown.clone()).await;
    jobs.shutdown().await;
    result
}
