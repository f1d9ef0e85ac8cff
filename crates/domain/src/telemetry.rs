use crate::family::{Dataset, Family};
use std::fmt;
use std::sync::Arc;

/// Category of a failed upstream attempt, as tagged in error telemetry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCategory {
    /// Upstream answered with a non-200 status.
    Http(u16),
    Network,
    Timeout,
    Dns,
    Fetch,
}

impl ErrorCategory {
    /// Classifies a transport failure from its nature and message.
    ///
    /// Later rules win: a connect failure whose message mentions a timeout is
    /// a timeout, and a resolver failure is a DNS error.
    ///
    /// Messages routinely name the upstream host (`dns.google`,
    /// `cloudflare-dns.com`), so a bare lowercase `dns` is not a marker; only
    /// the uppercase acronym or the resolver's `dns error` prefix count.
    pub fn classify(is_network: bool, message: &str) -> Self {
        let lower = message.to_ascii_lowercase();
        let mut category = Self::Fetch;
        if is_network {
            category = Self::Network;
        }
        if lower.contains("timeout") || lower.contains("timed out") {
            category = Self::Timeout;
        }
        if message.contains("DNS") || lower.contains("dns error") {
            category = Self::Dns;
        }
        category
    }

    pub fn http_status(&self) -> Option<u16> {
        match self {
            Self::Http(status) => Some(*status),
            _ => None,
        }
    }

    /// Coarse issue bucket used by the `error-types` report.
    pub fn issue_label(&self) -> &'static str {
        match self {
            Self::Network => "Network Issues",
            Self::Timeout => "Timeout Issues",
            Self::Http(_) => "HTTP Errors",
            Self::Dns => "DNS Resolution",
            Self::Fetch => "Other",
        }
    }
}

impl fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Http(status) => write!(f, "HTTP_{}", status),
            Self::Network => f.write_str("NETWORK_ERROR"),
            Self::Timeout => f.write_str("TIMEOUT_ERROR"),
            Self::Dns => f.write_str("DNS_ERROR"),
            Self::Fetch => f.write_str("FETCH_ERROR"),
        }
    }
}

/// A served answer: the provider whose response reached the client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UsageEvent {
    pub provider: Arc<str>,
    pub family: Family,
    pub dataset: Dataset,
}

/// A failed upstream attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorEvent {
    pub provider: Arc<str>,
    pub category: ErrorCategory,
    pub family: Family,
    pub dataset: Dataset,
}

impl ErrorEvent {
    pub fn http_status(&self) -> Option<u16> {
        self.category.http_status()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TelemetryEvent {
    Usage(UsageEvent),
    Error(ErrorEvent),
}

impl TelemetryEvent {
    pub fn provider(&self) -> &str {
        match self {
            Self::Usage(e) => &e.provider,
            Self::Error(e) => &e.provider,
        }
    }

    pub fn dataset(&self) -> Dataset {
        match self {
            Self::Usage(e) => e.dataset,
            Self::Error(e) => e.dataset,
        }
    }
}

/// One `(provider, count)` row of a windowed telemetry aggregate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderCount {
    pub provider: String,
    pub count: u64,
}

impl ProviderCount {
    pub fn new(provider: impl Into<String>, count: u64) -> Self {
        Self {
            provider: provider.into(),
            count,
        }
    }
}
