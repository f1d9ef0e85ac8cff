use async_trait::async_trait;
use mydns_domain::{Dataset, DomainError, ErrorBreakdown, ProviderCount, TelemetryEvent};
use std::time::Duration;

/// Fire-and-forget sink for usage and error events.
///
/// Must never block or fail the request path.
pub trait TelemetrySink: Send + Sync {
    fn record(&self, event: TelemetryEvent);
}

/// Windowed per-provider counts over recorded telemetry.
#[async_trait]
pub trait TelemetryAggregate: Send + Sync {
    async fn error_counts(
        &self,
        dataset: Dataset,
        window: Duration,
    ) -> Result<Vec<ProviderCount>, DomainError>;

    async fn success_counts(
        &self,
        dataset: Dataset,
        window: Duration,
    ) -> Result<Vec<ProviderCount>, DomainError>;

    /// Error counts per (provider, category, family) within the window.
    async fn error_breakdown(
        &self,
        dataset: Dataset,
        window: Duration,
    ) -> Result<Vec<ErrorBreakdown>, DomainError>;
}
