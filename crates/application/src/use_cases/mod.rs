pub mod analytics;
pub mod health;
pub mod providers;
pub mod resolve;

pub use analytics::{AnalyticsResult, GetAnalyticsReportUseCase};
pub use health::{
    GetHealthSnapshotUseCase, HealthSnapshot, ProviderHealth, RunHealthMaintenanceUseCase,
};
pub use providers::ListProvidersUseCase;
pub use resolve::{DohAnswer, DohRequest, ResolveDnsQueryUseCase};
