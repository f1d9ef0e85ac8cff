use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use hickory_proto::op::Message;
use hickory_proto::rr::{RData, Record, RecordType};
use hickory_proto::serialize::binary::BinEncodable;
use mydns_domain::dns_response::{qualify_name, status_from_mnemonic};
use mydns_domain::{DomainError, NormalizedQuestion, NormalizedRecord, NormalizedResponse};

/// Maps upstream wire answers into the `application/dns-json` shape.
pub struct ResponseNormalizer;

impl ResponseNormalizer {
    pub fn normalize(response: &[u8], provider: &str) -> Result<NormalizedResponse, DomainError> {
        let message = Message::from_vec(response).map_err(|e| {
            DomainError::InvalidDnsResponse(format!(
                "Failed to parse response from {}: {}",
                provider, e
            ))
        })?;

        let status = status_from_mnemonic(rcode_mnemonic(u16::from(message.response_code())));

        let questions = message
            .queries()
            .iter()
            .map(|q| NormalizedQuestion {
                name: qualify_name(&q.name().to_string()),
                record_type: u16::from(q.query_type()),
            })
            .collect();

        // Answerless responses always carry `Authority`, empty if need be.
        let (answers, authority) = if !message.answers().is_empty() {
            let answers = message.answers().iter().map(answer_record).collect();
            (Some(answers), None)
        } else {
            let authority = message.name_servers().iter().map(authority_record).collect();
            (None, Some(authority))
        };

        Ok(NormalizedResponse {
            status,
            tc: Some(message.truncated()),
            rd: Some(message.recursion_desired()),
            ra: Some(message.recursion_available()),
            ad: Some(message.authentic_data()),
            cd: Some(message.checking_disabled()),
            questions,
            answers,
            authority,
            comment: Some(format!("Response from {}", provider)),
        })
    }
}

/// Textual mnemonic of a numeric response code.
fn rcode_mnemonic(code: u16) -> &'static str {
    match code {
        0 => "NOERROR",
        1 => "FORMERR",
        2 => "SERVFAIL",
        3 => "NXDOMAIN",
        4 => "NOTIMP",
        5 => "REFUSED",
        6 => "YXDOMAIN",
        7 => "YXRRSET",
        8 => "NXRRSET",
        9 => "NOTAUTH",
        10 => "NOTZONE",
        11 => "RCODE_11",
        12 => "RCODE_12",
        13 => "RCODE_13",
        14 => "RCODE_14",
        15 => "RCODE_15",
        _ => "UNKNOWN",
    }
}

fn record_base(record: &Record, data: String) -> NormalizedRecord {
    NormalizedRecord {
        name: qualify_name(&record.name().to_string()),
        record_type: u16::from(record.record_type()),
        ttl: record.ttl(),
        data,
    }
}

fn answer_record(record: &Record) -> NormalizedRecord {
    let data = match record.data() {
        None => String::new(),
        Some(rdata) if record.record_type() == RecordType::DNSKEY => {
            format_dnskey(rdata).unwrap_or_else(|| rdata.to_string())
        }
        Some(RData::TXT(txt)) => txt
            .txt_data()
            .first()
            .map(|chunk| String::from_utf8_lossy(chunk).into_owned())
            .unwrap_or_default(),
        Some(RData::SRV(srv)) => format!(
            "{} {} {} {}",
            srv.priority(),
            srv.weight(),
            srv.port(),
            qualify_name(&srv.target().to_string())
        ),
        Some(rdata) => rdata.to_string(),
    };
    record_base(record, data)
}

fn authority_record(record: &Record) -> NormalizedRecord {
    let data = match record.data() {
        None => String::new(),
        Some(RData::SOA(soa)) => format!(
            "{} {} {} {} {} {} {}",
            qualify_name(&soa.mname().to_string()),
            qualify_name(&soa.rname().to_string()),
            soa.serial(),
            soa.refresh(),
            soa.retry(),
            soa.expire(),
            soa.minimum()
        ),
        Some(rdata) => rdata.to_string(),
    };
    record_base(record, data)
}

/// `<flags> <algorithm> <base64 key>` read from the record's wire rdata:
/// flags (u16), protocol (u8), algorithm (u8), public key.
fn format_dnskey(rdata: &RData) -> Option<String> {
    let wire = rdata.to_bytes().ok()?;
    if wire.len() < 4 {
        return None;
    }
    let flags = u16::from_be_bytes([wire[0], wire[1]]);
    let algorithm = wire[3];
    Some(format!("{} {} {}", flags, algorithm, STANDARD.encode(&wire[4..])))
}
