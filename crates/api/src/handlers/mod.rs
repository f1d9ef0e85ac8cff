pub mod analytics;
pub mod dns_query;
pub mod health;
pub mod providers;
pub mod root;

pub use analytics::get_analytics;
pub use dns_query::{dns_query_get, dns_query_post};
pub use health::get_health_scores;
pub use providers::get_providers;
pub use root::{not_found, welcome};

use crate::dto::ErrorResponse;
use axum::{
    http::{header, HeaderMap, StatusCode, Uri},
    response::{IntoResponse, Response},
    Json,
};

const SERVER_ERROR_BODY: &str = "We encountered a server error. Please try again later";

/// Request hostname: the `Host` header, else the URI authority (HTTP/2
/// `:authority`), empty when neither is present.
pub(crate) fn request_host(headers: &HeaderMap, uri: &Uri) -> String {
    headers
        .get(header::HOST)
        .and_then(|v| v.to_str().ok())
        .filter(|host| !host.is_empty())
        .or_else(|| uri.authority().map(|authority| authority.as_str()))
        .unwrap_or_default()
        .to_string()
}

pub(crate) fn bad_request(error: &str, message: &str) -> Response {
    invalid(error, message.to_string(), None)
}

pub(crate) fn invalid(
    error: &str,
    message: String,
    valid_types: Option<Vec<&'static str>>,
) -> Response {
    (
        StatusCode::BAD_REQUEST,
        Json(ErrorResponse {
            error: error.to_string(),
            message,
            valid_types,
        }),
    )
        .into_response()
}

pub(crate) fn server_error() -> Response {
    (StatusCode::INTERNAL_SERVER_ERROR, SERVER_ERROR_BODY).into_response()
}
