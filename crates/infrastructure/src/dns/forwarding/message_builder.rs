//! DNS Message Builder
//!
//! Constructs outbound query messages in wire format using `hickory-proto`.

use super::record_type_map::RecordTypeMapper;
use hickory_proto::op::{Edns, Message, MessageType, OpCode, Query};
use hickory_proto::rr::{DNSClass, Name};
use hickory_proto::serialize::binary::{BinEncodable, BinEncoder};
use mydns_domain::{DomainError, RecordType};
use std::str::FromStr;

/// EDNS payload advertised on queries built for the JSON API
pub const JSON_QUERY_PAYLOAD: u16 = 4096;

/// Builds DNS query messages in wire format
pub struct MessageBuilder;

impl MessageBuilder {
    /// Build a recursive query for the JSON API.
    ///
    /// The query carries:
    /// - a random ID in 1..=65534
    /// - RD set, CD clear
    /// - an EDNS0 OPT record with the DO bit and a 4096-byte payload
    pub fn build_query(domain: &str, record_type: &RecordType) -> Result<Vec<u8>, DomainError> {
        let (_, bytes) = Self::build_query_with_id(domain, record_type)?;
        Ok(bytes)
    }

    /// Same as [`build_query`](Self::build_query), also returning the message ID.
    pub fn build_query_with_id(
        domain: &str,
        record_type: &RecordType,
    ) -> Result<(u16, Vec<u8>), DomainError> {
        let name = Name::from_str(domain).map_err(|e| {
            DomainError::InvalidQuery(format!("Invalid domain '{}': {}", domain, e))
        })?;

        let mut query = Query::new();
        query.set_name(name);
        query.set_query_type(RecordTypeMapper::to_hickory(record_type));
        query.set_query_class(DNSClass::IN);

        let id = fastrand::u16(1..=65534);

        let mut message = Message::new();
        message.set_id(id);
        message.set_message_type(MessageType::Query);
        message.set_op_code(OpCode::Query);
        message.set_recursion_desired(true);
        message.set_checking_disabled(false);
        message.add_query(query);

        let mut edns = Edns::new();
        edns.set_dnssec_ok(true);
        edns.set_max_payload(JSON_QUERY_PAYLOAD);
        edns.set_version(0);
        message.set_edns(edns);

        let bytes = Self::serialize_message(&message)?;
        Ok((id, bytes))
    }

    /// Serialize a Message to wire format bytes
    pub(crate) fn serialize_message(message: &Message) -> Result<Vec<u8>, DomainError> {
        let mut buf = Vec::with_capacity(512);
        let mut encoder = BinEncoder::new(&mut buf);

        message.emit(&mut encoder).map_err(|e| {
            DomainError::InvalidQuery(format!("Failed to serialize DNS message: {}", e))
        })?;

        Ok(buf)
    }
}
