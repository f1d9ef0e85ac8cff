use crate::telemetry::ErrorCategory;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("Invalid query: {0}")]
    InvalidQuery(String),

    #[error("Invalid DNS response: {0}")]
    InvalidDnsResponse(String),

    #[error("HTTP {status} from {provider}")]
    UpstreamHttp { provider: String, status: u16 },

    #[error("{category} from {provider}: {message}")]
    UpstreamTransport {
        provider: String,
        category: ErrorCategory,
        message: String,
    },

    #[error("All {attempts} upstream attempts failed")]
    AllUpstreamsFailed { attempts: usize },

    #[error("Request deadline of {0}ms exceeded")]
    DeadlineExceeded(u64),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Telemetry error: {0}")]
    Telemetry(String),
}

impl DomainError {
    /// Telemetry category for a failed upstream attempt.
    pub fn upstream_category(&self) -> Option<ErrorCategory> {
        match self {
            Self::UpstreamHttp { status, .. } => Some(ErrorCategory::Http(*status)),
            Self::UpstreamTransport { category, .. } => Some(*category),
            _ => None,
        }
    }

    /// True for failures that must be reported to the client as a generic
    /// server error rather than a client error.
    pub fn is_server_error(&self) -> bool {
        !matches!(self, Self::InvalidQuery(_))
    }
}
