use crate::ports::TelemetryAggregate;
use mydns_domain::analytics::MAX_REPORT_HOURS;
use mydns_domain::{AnalyticsReport, AnalyticsRow, Dataset, DomainError};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, instrument};

/// A diagnostic report over the last `hours` of error telemetry.
#[derive(Debug, Clone)]
pub struct AnalyticsResult {
    pub report: AnalyticsReport,
    pub dataset: Dataset,
    pub hours: u32,
    pub rows: Vec<AnalyticsRow>,
}

pub struct GetAnalyticsReportUseCase {
    aggregate: Arc<dyn TelemetryAggregate>,
}

impl GetAnalyticsReportUseCase {
    pub fn new(aggregate: Arc<dyn TelemetryAggregate>) -> Self {
        Self { aggregate }
    }

    #[instrument(skip(self))]
    pub async fn execute(
        &self,
        report: AnalyticsReport,
        dataset: Dataset,
        hours: u32,
    ) -> Result<AnalyticsResult, DomainError> {
        if hours == 0 || hours > MAX_REPORT_HOURS {
            return Err(DomainError::InvalidQuery(format!(
                "hours must be between 1 and {}",
                MAX_REPORT_HOURS
            )));
        }

        let window = Duration::from_secs(u64::from(hours) * 3600);
        let cells = self.aggregate.error_breakdown(dataset, window).await?;
        let rows = report.build(&cells);

        debug!(cells = cells.len(), rows = rows.len(), "Analytics report built");

        Ok(AnalyticsResult {
            report,
            dataset,
            hours,
            rows,
        })
    }
}
