use serde::Serialize;

/// Canonical JSON shape of an upstream answer (`application/dns-json`).
///
/// `Answer` and `Authority` are mutually exclusive: a response without
/// answers renders `Authority`, as an empty list when there is none.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NormalizedResponse {
    #[serde(rename = "Status")]
    pub status: u16,

    #[serde(rename = "TC", skip_serializing_if = "Option::is_none")]
    pub tc: Option<bool>,

    #[serde(rename = "RD", skip_serializing_if = "Option::is_none")]
    pub rd: Option<bool>,

    #[serde(rename = "RA", skip_serializing_if = "Option::is_none")]
    pub ra: Option<bool>,

    #[serde(rename = "AD", skip_serializing_if = "Option::is_none")]
    pub ad: Option<bool>,

    #[serde(rename = "CD", skip_serializing_if = "Option::is_none")]
    pub cd: Option<bool>,

    #[serde(rename = "Question")]
    pub questions: Vec<NormalizedQuestion>,

    #[serde(rename = "Answer", skip_serializing_if = "Option::is_none")]
    pub answers: Option<Vec<NormalizedRecord>>,

    #[serde(rename = "Authority", skip_serializing_if = "Option::is_none")]
    pub authority: Option<Vec<NormalizedRecord>>,

    #[serde(rename = "Comment", skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NormalizedQuestion {
    pub name: String,
    #[serde(rename = "type")]
    pub record_type: u16,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NormalizedRecord {
    pub name: String,
    #[serde(rename = "type")]
    pub record_type: u16,
    #[serde(rename = "TTL")]
    pub ttl: u32,
    pub data: String,
}

/// Numeric status for a textual response code mnemonic.
///
/// Unknown mnemonics map to 0, matching what JSON DoH clients expect.
pub fn status_from_mnemonic(mnemonic: &str) -> u16 {
    match mnemonic.to_ascii_uppercase().as_str() {
        "NOERROR" => 0,
        "FORMERR" => 1,
        "SERVFAIL" => 2,
        "NXDOMAIN" => 3,
        "NOTIMP" => 4,
        "REFUSED" => 5,
        "YXDOMAIN" => 6,
        "YXRRSET" => 7,
        "NXRRSET" => 8,
        "NOTAUTH" => 9,
        "NOTZONE" => 10,
        "RCODE_11" => 11,
        "RCODE_12" => 12,
        "RCODE_13" => 13,
        "RCODE_14" => 14,
        "RCODE_15" => 15,
        _ => 0,
    }
}

/// Renders a domain name fully qualified with exactly one trailing dot.
pub fn qualify_name(name: &str) -> String {
    format!("{}.", name.trim_end_matches('.'))
}
