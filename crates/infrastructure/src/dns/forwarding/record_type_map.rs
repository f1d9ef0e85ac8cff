use hickory_proto::rr::RecordType as HickoryRecordType;
use mydns_domain::RecordType;

pub struct RecordTypeMapper;

impl RecordTypeMapper {
    /// Convert domain RecordType → hickory RecordType (for building queries)
    pub fn to_hickory(record_type: &RecordType) -> HickoryRecordType {
        match record_type {
            RecordType::A => HickoryRecordType::A,
            RecordType::AAAA => HickoryRecordType::AAAA,
            RecordType::DNSKEY => HickoryRecordType::DNSKEY,
            RecordType::MX => HickoryRecordType::MX,
            RecordType::NS => HickoryRecordType::NS,
            RecordType::SRV => HickoryRecordType::SRV,
            RecordType::TXT => HickoryRecordType::TXT,
        }
    }

    /// Convert hickory RecordType → domain RecordType
    ///
    /// Returns `None` for types the JSON API does not accept.
    pub fn from_hickory(hickory_type: HickoryRecordType) -> Option<RecordType> {
        RecordType::SUPPORTED
            .iter()
            .copied()
            .find(|t| u16::from(hickory_type) == t.code())
    }
}
