use super::{bad_request, invalid, request_host, server_error};
use crate::{dto::DnsQueryParams, state::AppState};
use axum::{
    body::Bytes,
    extract::{Query, State},
    http::{header, HeaderMap, Uri},
    response::{IntoResponse, Response},
};
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use mydns_application::use_cases::{DohAnswer, DohRequest};
use mydns_domain::{DomainError, RecordType};
use tracing::{error, instrument, warn};

pub const DNS_MESSAGE: &str = "application/dns-message";
pub const DNS_JSON: &str = "application/dns-json";

/// RFC 8484 POST: the body is the wire-format query.
#[instrument(skip(state, headers, body), name = "api_dns_query_post")]
pub async fn dns_query_post(
    State(state): State<AppState>,
    uri: Uri,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    if body.is_empty() {
        return bad_request("Missing query", "Request body must be a DNS message");
    }
    resolve(&state, &request_host(&headers, &uri), DohRequest::Wire(body)).await
}

/// RFC 8484 GET (`dns=`) or JSON API (`name=`, `type=`).
#[instrument(skip(state, headers), name = "api_dns_query_get")]
pub async fn dns_query_get(
    State(state): State<AppState>,
    uri: Uri,
    headers: HeaderMap,
    Query(params): Query<DnsQueryParams>,
) -> Response {
    let host = request_host(&headers, &uri);

    if let Some(encoded) = params.dns.as_deref() {
        return match URL_SAFE_NO_PAD.decode(encoded.trim_end_matches('=')) {
            Ok(wire) if !wire.is_empty() => {
                resolve(&state, &host, DohRequest::Wire(Bytes::from(wire))).await
            }
            _ => bad_request("Invalid query", "The dns parameter must be base64url"),
        };
    }

    let Some(name) = params.name else {
        return bad_request("Missing query", "Provide either dns or name");
    };

    let record_type = match params.record_type.as_deref() {
        None | Some("") => RecordType::default(),
        Some(raw) => match raw.parse::<RecordType>() {
            Ok(record_type) => record_type,
            Err(message) => {
                return invalid("Invalid type", message, Some(RecordType::supported_names()));
            }
        },
    };

    resolve(&state, &host, DohRequest::Json { name, record_type }).await
}

async fn resolve(state: &AppState, host: &str, request: DohRequest) -> Response {
    match state.resolve.execute(host, request).await {
        Ok(DohAnswer::Wire(bytes)) => ([(header::CONTENT_TYPE, DNS_MESSAGE)], bytes).into_response(),
        Ok(DohAnswer::Json(response)) => match serde_json::to_vec(&response) {
            Ok(body) => ([(header::CONTENT_TYPE, DNS_JSON)], body).into_response(),
            Err(e) => {
                error!(error = %e, "Failed to serialize JSON answer");
                server_error()
            }
        },
        Err(DomainError::InvalidQuery(message)) => bad_request("Invalid query", &message),
        Err(e) => {
            warn!(host = %host, error = %e, "Query resolution failed");
            server_error()
        }
    }
}
