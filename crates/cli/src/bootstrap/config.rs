use mydns_domain::{CliOverrides, Config};
use tracing::{info, warn};

/// Loads and validates the configuration. Runs before logging is set up, so
/// nothing is logged here; see [`report_config`].
pub fn load_config(
    config_path: Option<&str>,
    cli_overrides: CliOverrides,
) -> anyhow::Result<Config> {
    let config = Config::load(config_path, cli_overrides)?;
    config.validate()?;
    Ok(config)
}

pub fn report_config(config_path: Option<&str>, config: &Config) {
    info!(
        config_file = config_path.unwrap_or("default"),
        port = config.server.port,
        bind = %config.server.bind_address,
        resolvers = config.resolvers.len(),
        routes = config.routes.len(),
        fanout = config.selection.fanout,
        "Configuration loaded"
    );

    if config.health.expires_between_runs() {
        warn!(
            ttl_secs = config.health.ttl_secs,
            interval_secs = config.health.interval_secs,
            "Health scores expire before the next recomputation; selection will fall back to neutral weights"
        );
    }
}
