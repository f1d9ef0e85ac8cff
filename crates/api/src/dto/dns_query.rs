use serde::{Deserialize, Serialize};

/// `GET /dns-query` parameters: either `dns` (base64url wire query) or
/// `name` with an optional `type`.
#[derive(Deserialize, Debug, Default)]
pub struct DnsQueryParams {
    pub dns: Option<String>,
    pub name: Option<String>,
    #[serde(rename = "type")]
    pub record_type: Option<String>,
}

#[derive(Serialize, Debug, Clone)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    #[serde(rename = "validTypes", skip_serializing_if = "Option::is_none")]
    pub valid_types: Option<Vec<&'static str>>,
}
