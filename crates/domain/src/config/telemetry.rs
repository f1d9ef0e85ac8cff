use serde::{Deserialize, Serialize};

/// In-process telemetry retention
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct TelemetryConfig {
    /// Events older than this are dropped (default: 24 hours)
    #[serde(default = "default_retention")]
    pub retention_secs: u64,

    /// Upper bound on retained events (default: 200000)
    #[serde(default = "default_max_events")]
    pub max_events: usize,
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            retention_secs: default_retention(),
            max_events: default_max_events(),
        }
    }
}

fn default_retention() -> u64 {
    86_400
}

fn default_max_events() -> usize {
    200_000
}
