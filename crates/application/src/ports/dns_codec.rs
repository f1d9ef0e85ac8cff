use bytes::Bytes;
use mydns_domain::{DomainError, NormalizedResponse, RecordType};

/// DNS wire-format operations needed on the request path.
pub trait DnsCodec: Send + Sync {
    /// Rewrites an outbound query to request DNSSEC data. Never fails: input
    /// that cannot be decoded is returned unchanged.
    fn enforce_dnssec(&self, query: &[u8]) -> Bytes;

    /// Encodes a recursive query for `name`.
    fn build_query(&self, name: &str, record_type: RecordType) -> Result<Bytes, DomainError>;

    /// Maps an upstream answer into the JSON response shape.
    fn normalize(&self, response: &[u8], provider: &str)
        -> Result<NormalizedResponse, DomainError>;
}
