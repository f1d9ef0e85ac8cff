use crate::{
    dto::{HealthScoresParams, HealthScoresResponse},
    state::AppState,
};
use axum::{
    extract::{Query, State},
    Json,
};
use mydns_domain::Family;
use tracing::{debug, instrument};

#[instrument(skip(state), name = "api_get_health_scores")]
pub async fn get_health_scores(
    State(state): State<AppState>,
    Query(params): Query<HealthScoresParams>,
) -> Json<HealthScoresResponse> {
    let family = params
        .family
        .as_deref()
        .map(str::trim)
        .filter(|f| !f.is_empty())
        .map(Family::new)
        .unwrap_or_default();

    let snapshot = state.health_snapshot.execute(&family).await;
    debug!(family = %family, providers = snapshot.providers.len(), "Health scores requested");
    Json(snapshot.into())
}
