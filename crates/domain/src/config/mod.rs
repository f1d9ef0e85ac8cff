//! Configuration model for the proxy
//!
//! - `root`: main configuration, loading and CLI overrides
//! - `server`: HTTP binding and hostname suffixes
//! - `selection`: fan-out size and deadlines
//! - `health`: health-score maintenance
//! - `telemetry`: in-memory telemetry retention
//! - `routing`: resolver endpoints and hostname routes
//! - `logging`: logging settings
//! - `errors`: configuration errors

pub mod errors;
pub mod health;
pub mod logging;
pub mod root;
pub mod routing;
pub mod selection;
pub mod server;
pub mod telemetry;

pub use errors::ConfigError;
pub use health::HealthConfig;
pub use logging::{LogFormat, LoggingConfig};
pub use root::{CliOverrides, Config};
pub use routing::{ResolverTable, RouteConfig, DEFAULT_ROUTE};
pub use selection::SelectionConfig;
pub use server::ServerConfig;
pub use telemetry::TelemetryConfig;
