use mydns_application::use_cases::{
    GetAnalyticsReportUseCase, GetHealthSnapshotUseCase, ListProvidersUseCase,
    ResolveDnsQueryUseCase,
};
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub resolve: Arc<ResolveDnsQueryUseCase>,
    pub health_snapshot: Arc<GetHealthSnapshotUseCase>,
    pub list_providers: Arc<ListProvidersUseCase>,
    pub analytics: Arc<GetAnalyticsReportUseCase>,
}
