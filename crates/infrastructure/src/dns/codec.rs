use super::dnssec::DnssecEnforcer;
use super::forwarding::MessageBuilder;
use super::normalizer::ResponseNormalizer;
use bytes::Bytes;
use mydns_application::ports::DnsCodec;
use mydns_domain::{DomainError, NormalizedResponse, RecordType};

/// `DnsCodec` backed by hickory-proto.
#[derive(Debug, Default, Clone, Copy)]
pub struct HickoryCodec;

impl HickoryCodec {
    pub fn new() -> Self {
        Self
    }
}

impl DnsCodec for HickoryCodec {
    fn enforce_dnssec(&self, query: &[u8]) -> Bytes {
        Bytes::from(DnssecEnforcer::enforce(query))
    }

    fn build_query(&self, name: &str, record_type: RecordType) -> Result<Bytes, DomainError> {
        MessageBuilder::build_query(name, &record_type).map(Bytes::from)
    }

    fn normalize(
        &self,
        response: &[u8],
        provider: &str,
    ) -> Result<NormalizedResponse, DomainError> {
        ResponseNormalizer::normalize(response, provider)
    }
}
