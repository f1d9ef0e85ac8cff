use async_trait::async_trait;
use bytes::Bytes;
use mydns_domain::{DomainError, Endpoint};

/// Raw HTTP outcome of one DoH exchange.
#[derive(Debug, Clone)]
pub struct UpstreamReply {
    pub status: u16,
    pub body: Bytes,
}

impl UpstreamReply {
    pub fn is_ok(&self) -> bool {
        self.status == 200
    }
}

/// Sends one wire-format query to a DoH endpoint.
///
/// Non-200 statuses are replies, not errors; failures to obtain any reply are
/// `DomainError::UpstreamTransport`.
#[async_trait]
pub trait DohTransport: Send + Sync {
    async fn exchange(&self, endpoint: &Endpoint, query: Bytes)
        -> Result<UpstreamReply, DomainError>;
}
