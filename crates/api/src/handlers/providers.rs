use super::request_host;
use crate::{dto::ProvidersResponse, state::AppState};
use axum::{
    extract::State,
    http::{HeaderMap, Uri},
    Json,
};
use tracing::{debug, instrument};

#[instrument(skip(state, headers), name = "api_get_providers")]
pub async fn get_providers(
    State(state): State<AppState>,
    uri: Uri,
    headers: HeaderMap,
) -> Json<ProvidersResponse> {
    let host = request_host(&headers, &uri);
    let providers = state.list_providers.execute(&host);
    debug!(host = %host, count = providers.len(), "Listing providers");
    Json(ProvidersResponse { providers })
}
