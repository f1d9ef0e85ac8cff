use serde::{Deserialize, Serialize};

/// Upstream selection and fan-out settings
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SelectionConfig {
    /// Number of upstreams raced per query (default: 3)
    #[serde(default = "default_fanout")]
    pub fanout: usize,

    /// Deadline for the whole fan-out in milliseconds (default: 5000)
    #[serde(default = "default_request_timeout")]
    pub request_timeout_ms: u64,

    /// Timeout of a single upstream exchange in milliseconds (default: 4000)
    #[serde(default = "default_upstream_timeout")]
    pub upstream_timeout_ms: u64,
}

impl Default for SelectionConfig {
    fn default() -> Self {
        Self {
            fanout: default_fanout(),
            request_timeout_ms: default_request_timeout(),
            upstream_timeout_ms: default_upstream_timeout(),
        }
    }
}

fn default_fanout() -> usize {
    3
}

fn default_request_timeout() -> u64 {
    5000
}

fn default_upstream_timeout() -> u64 {
    4000
}
