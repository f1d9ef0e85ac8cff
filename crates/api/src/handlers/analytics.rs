use super::{bad_request, invalid, server_error};
use crate::{
    dto::{AnalyticsParams, AnalyticsResponse},
    state::AppState,
};
use axum::{
    extract::{Query, State},
    response::{IntoResponse, Response},
    Json,
};
use mydns_domain::analytics::DEFAULT_REPORT_HOURS;
use mydns_domain::{AnalyticsReport, Dataset, DomainError};
use tracing::{debug, instrument, warn};

/// Windowed error breakdowns: `?type=<report>&hours=<1..=720>&dataset=<prod|dev>`.
#[instrument(skip(state), name = "api_get_analytics")]
pub async fn get_analytics(
    State(state): State<AppState>,
    Query(params): Query<AnalyticsParams>,
) -> Response {
    let report = match params.report.as_deref().map(str::parse::<AnalyticsReport>) {
        Some(Ok(report)) => report,
        Some(Err(message)) => {
            return invalid("Invalid type", message, Some(AnalyticsReport::names()));
        }
        None => {
            return invalid(
                "Missing type",
                "Provide a report type".to_string(),
                Some(AnalyticsReport::names()),
            );
        }
    };

    let hours = match params.hours.as_deref().map(str::trim) {
        None | Some("") => DEFAULT_REPORT_HOURS,
        Some(raw) => match raw.parse::<u32>() {
            Ok(hours) => hours,
            Err(_) => return bad_request("Invalid hours", "hours must be a whole number"),
        },
    };

    let dataset = match params.dataset.as_deref().map(str::trim) {
        None | Some("") | Some("prod") => Dataset::Prod,
        Some("dev") => Dataset::Dev,
        Some(_) => return bad_request("Invalid dataset", "dataset must be prod or dev"),
    };

    match state.analytics.execute(report, dataset, hours).await {
        Ok(result) => {
            debug!(report = %report, rows = result.rows.len(), "Analytics report served");
            Json(AnalyticsResponse::from(result)).into_response()
        }
        Err(DomainError::InvalidQuery(message)) => bad_request("Invalid hours", &message),
        Err(e) => {
            warn!(report = %report, error = %e, "Analytics report failed");
            server_error()
        }
    }
}
