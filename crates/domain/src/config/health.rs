use crate::family::Dataset;
use serde::{Deserialize, Serialize};

/// Health score recomputation settings
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct HealthConfig {
    /// Interval between recomputations in seconds (default: 300)
    #[serde(default = "default_interval")]
    pub interval_secs: u64,

    /// Telemetry window read on each run in seconds (default: 2 hours)
    #[serde(default = "default_window")]
    pub window_secs: u64,

    /// Expiry of the stored score map in seconds (default: 600)
    ///
    /// Should exceed `interval_secs`.
    #[serde(default = "default_ttl")]
    pub ttl_secs: u64,

    /// Key holding the score map in the key-value store
    #[serde(default = "default_store_key")]
    pub store_key: String,

    /// Telemetry partition the scores are computed from
    #[serde(default)]
    pub dataset: Dataset,
}

impl HealthConfig {
    /// True when the stored map expires before the next scheduled run.
    pub fn expires_between_runs(&self) -> bool {
        self.ttl_secs <= self.interval_secs
    }
}

impl Default for HealthConfig {
    fn default() -> Self {
        Self {
            interval_secs: default_interval(),
            window_secs: default_window(),
            ttl_secs: default_ttl(),
            store_key: default_store_key(),
            dataset: Dataset::default(),
        }
    }
}

fn default_interval() -> u64 {
    300
}

fn default_window() -> u64 {
    7200
}

fn default_ttl() -> u64 {
    600
}

fn default_store_key() -> String {
    "health-scores".to_string()
}
