use crate::ports::TelemetryAggregate;
use crate::services::HealthStore;
use chrono::{DateTime, Utc};
use mydns_domain::{
    Dataset, DomainError, Family, HealthScore, HealthScores, ProviderCount, ResolverCatalog,
};
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tracing::{error, info, instrument, warn};

/// Recomputes every reachable endpoint's health score from windowed
/// telemetry and replaces the stored map.
pub struct RunHealthMaintenanceUseCase {
    catalog: Arc<ResolverCatalog>,
    aggregate: Arc<dyn TelemetryAggregate>,
    store: Arc<HealthStore>,
    window: Duration,
    dataset: Dataset,
}

impl RunHealthMaintenanceUseCase {
    pub fn new(
        catalog: Arc<ResolverCatalog>,
        aggregate: Arc<dyn TelemetryAggregate>,
        store: Arc<HealthStore>,
        window: Duration,
        dataset: Dataset,
    ) -> Self {
        Self {
            catalog,
            aggregate,
            store,
            window,
            dataset,
        }
    }

    /// Never fails; the computed map is returned even if saving it failed.
    #[instrument(skip(self), fields(dataset = %self.dataset))]
    pub async fn execute(&self) -> HealthScores {
        let mut scores: HealthScores = self
            .catalog
            .reachable_hostnames()
            .into_iter()
            .map(|hostname| (hostname.to_string(), HealthScore::perfect()))
            .collect();

        let errors = to_map(
            "errors",
            self.aggregate.error_counts(self.dataset, self.window).await,
        );
        let successes = to_map(
            "successes",
            self.aggregate
                .success_counts(self.dataset, self.window)
                .await,
        );

        let mut providers: Vec<&String> = errors.keys().chain(successes.keys()).collect();
        providers.sort();
        providers.dedup();

        for provider in providers {
            let failed = errors.get(provider).copied().unwrap_or(0);
            let served = successes.get(provider).copied().unwrap_or(0);
            if let Some(score) = HealthScore::from_counts(failed, served) {
                scores.insert(provider.clone(), score);
            }
        }

        if let Err(e) = self.store.save(&scores).await {
            error!(error = %e, "Failed to store health scores");
        } else {
            info!(providers = scores.len(), "Health scores updated");
        }

        scores
    }
}

fn to_map(
    series: &str,
    counts: Result<Vec<ProviderCount>, DomainError>,
) -> HashMap<String, u64> {
    match counts {
        Ok(rows) => {
            let mut map = HashMap::with_capacity(rows.len());
            for row in rows {
                *map.entry(row.provider).or_insert(0) += row.count;
            }
            map
        }
        Err(e) => {
            warn!(series, error = %e, "Telemetry unavailable, treating as no data");
            HashMap::new()
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderHealth {
    pub provider: String,
    pub health_score: u8,
}

/// Stored health of the endpoints serving one family.
#[derive(Debug, Clone)]
pub struct HealthSnapshot {
    pub family: Family,
    pub last_updated: DateTime<Utc>,
    /// Sorted by provider hostname
    pub providers: Vec<ProviderHealth>,
}

pub struct GetHealthSnapshotUseCase {
    catalog: Arc<ResolverCatalog>,
    store: Arc<HealthStore>,
}

impl GetHealthSnapshotUseCase {
    pub fn new(catalog: Arc<ResolverCatalog>, store: Arc<HealthStore>) -> Self {
        Self { catalog, store }
    }

    #[instrument(skip(self))]
    pub async fn execute(&self, family: &Family) -> HealthSnapshot {
        let hostnames = self.catalog.hostnames_for_group(&family.endpoint_group());
        let scores = self.store.load().await;

        let providers = scores
            .into_iter()
            .filter(|(provider, _)| hostnames.contains(provider.as_str()))
            .map(|(provider, score)| ProviderHealth {
                provider,
                health_score: score.value(),
            })
            .collect();

        HealthSnapshot {
            family: family.clone(),
            last_updated: Utc::now(),
            providers,
        }
    }
}
