use super::Services;
use mydns_application::use_cases::{
    GetAnalyticsReportUseCase, GetHealthSnapshotUseCase, ListProvidersUseCase,
    ResolveDnsQueryUseCase, RunHealthMaintenanceUseCase,
};
use mydns_domain::Config;
use std::sync::Arc;
use std::time::Duration;

pub struct UseCases {
    pub resolve: Arc<ResolveDnsQueryUseCase>,
    pub health_snapshot: Arc<GetHealthSnapshotUseCase>,
    pub health_maintenance: Arc<RunHealthMaintenanceUseCase>,
    pub list_providers: Arc<ListProvidersUseCase>,
    pub analytics: Arc<GetAnalyticsReportUseCase>,
}

impl UseCases {
    pub fn new(services: &Services, config: &Config) -> Self {
        Self {
            resolve: Arc::new(ResolveDnsQueryUseCase::new(
                services.router.clone(),
                services.selector.clone(),
                services.dispatcher.clone(),
                services.health.clone(),
                services.codec.clone(),
                services.catalog.clone(),
                config.selection.fanout,
            )),
            health_snapshot: Arc::new(GetHealthSnapshotUseCase::new(
                services.catalog.clone(),
                services.health.clone(),
            )),
            health_maintenance: Arc::new(RunHealthMaintenanceUseCase::new(
                services.catalog.clone(),
                services.telemetry.clone(),
                services.health.clone(),
                Duration::from_secs(config.health.window_secs),
                config.health.dataset,
            )),
            list_providers: Arc::new(ListProvidersUseCase::new(
                services.router.clone(),
                services.catalog.clone(),
            )),
            analytics: Arc::new(GetAnalyticsReportUseCase::new(services.telemetry.clone())),
        }
    }
}
