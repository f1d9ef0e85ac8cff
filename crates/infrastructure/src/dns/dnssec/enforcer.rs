use crate::dns::forwarding::MessageBuilder;
use hickory_proto::op::{Edns, Message};
use mydns_domain::DomainError;
use tracing::warn;

/// UDP payload advertised on enforced queries
pub const ENFORCED_PAYLOAD: u16 = 512;

/// Rewrites outbound queries so upstreams validate and return DNSSEC data.
///
/// - CD is cleared, so the upstream performs validation
/// - RD is set
/// - exactly one OPT record carries DO=1, version 0 and a 512-byte payload;
///   options already present on the query are kept
pub struct DnssecEnforcer;

impl DnssecEnforcer {
    /// Returns the rewritten query, or the original bytes if they cannot be
    /// decoded or re-encoded.
    pub fn enforce(query: &[u8]) -> Vec<u8> {
        match Self::try_enforce(query) {
            Ok(bytes) => bytes,
            Err(e) => {
                warn!(
                    error = %e,
                    len = query.len(),
                    "DNSSEC enforcement skipped, forwarding query as-is"
                );
                query.to_vec()
            }
        }
    }

    pub fn try_enforce(query: &[u8]) -> Result<Vec<u8>, DomainError> {
        let mut message = Message::from_vec(query)
            .map_err(|e| DomainError::InvalidQuery(format!("Undecodable query: {}", e)))?;

        message.set_checking_disabled(false);
        message.set_recursion_desired(true);

        let mut edns = message.extensions().clone().unwrap_or_else(Edns::new);
        edns.set_dnssec_ok(true);
        edns.set_max_payload(ENFORCED_PAYLOAD);
        edns.set_version(0);
        message.set_edns(edns);

        MessageBuilder::serialize_message(&message)
    }
}
