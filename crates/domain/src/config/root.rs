use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use url::Url;

use super::errors::ConfigError;
use super::health::HealthConfig;
use super::logging::LoggingConfig;
use super::routing::{default_resolvers, default_routes, ResolverTable, RouteConfig, DEFAULT_ROUTE};
use super::selection::SelectionConfig;
use super::server::ServerConfig;
use super::telemetry::TelemetryConfig;

/// Main configuration structure
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,

    #[serde(default)]
    pub selection: SelectionConfig,

    #[serde(default)]
    pub health: HealthConfig,

    #[serde(default)]
    pub telemetry: TelemetryConfig,

    #[serde(default)]
    pub logging: LoggingConfig,

    #[serde(default = "default_resolvers")]
    pub resolvers: ResolverTable,

    #[serde(default = "default_routes")]
    pub routes: BTreeMap<String, RouteConfig>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server: ServerConfig::default(),
            selection: SelectionConfig::default(),
            health: HealthConfig::default(),
            telemetry: TelemetryConfig::default(),
            logging: LoggingConfig::default(),
            resolvers: default_resolvers(),
            routes: default_routes(),
        }
    }
}

/// Command-line overrides applied on top of the config file
#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
    pub bind_address: Option<String>,
    pub port: Option<u16>,
    pub log_level: Option<String>,
}

impl Config {
    /// Load configuration from a TOML file (or built-in defaults) and apply
    /// command-line overrides.
    pub fn load(path: Option<&str>, overrides: CliOverrides) -> Result<Self, ConfigError> {
        let mut config = match path {
            Some(path) => {
                let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
                    path: path.to_string(),
                    source,
                })?;
                Self::from_toml(&raw).map_err(|source| ConfigError::Parse {
                    path: path.to_string(),
                    source,
                })?
            }
            None => Self::default(),
        };

        config.apply_overrides(overrides);
        Ok(config)
    }

    pub fn from_toml(raw: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(raw)
    }

    pub fn apply_overrides(&mut self, overrides: CliOverrides) {
        if let Some(bind) = overrides.bind_address {
            self.server.bind_address = bind;
        }
        if let Some(port) = overrides.port {
            self.server.port = port;
        }
        if let Some(level) = overrides.log_level {
            self.logging.level = level;
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.routes.contains_key(DEFAULT_ROUTE) {
            return Err(ConfigError::Validation(format!(
                "a '{}' route is required",
                DEFAULT_ROUTE
            )));
        }

        for (key, route) in &self.routes {
            if route.resolvers.is_empty() {
                return Err(ConfigError::Validation(format!(
                    "route '{}' has no resolvers",
                    key
                )));
            }
            if let Some(unknown) = route
                .resolvers
                .iter()
                .find(|id| !self.resolvers.contains_key(id.as_str()))
            {
                return Err(ConfigError::Validation(format!(
                    "route '{}' references unknown resolver '{}'",
                    key, unknown
                )));
            }
        }

        for (id, endpoints) in &self.resolvers {
            for (group, raw) in endpoints {
                let url = Url::parse(raw).map_err(|e| {
                    ConfigError::Validation(format!(
                        "resolver '{}' endpoint '{}' is not a valid URL: {}",
                        id, group, e
                    ))
                })?;
                if url.host_str().is_none() {
                    return Err(ConfigError::Validation(format!(
                        "resolver '{}' endpoint '{}' has no host",
                        id, group
                    )));
                }
            }
        }

        if self.selection.fanout == 0 {
            return Err(ConfigError::Validation(
                "selection.fanout must be at least 1".into(),
            ));
        }

        Ok(())
    }
}
