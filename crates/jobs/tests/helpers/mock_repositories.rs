#![allow(dead_code)]

use async_trait::async_trait;
use mydns_application::ports::{KeyValueStore, TelemetryAggregate};
use mydns_application::services::HealthStore;
use mydns_application::use_cases::RunHealthMaintenanceUseCase;
use mydns_domain::{Config, Dataset, DomainError, ErrorBreakdown, ProviderCount, ResolverCatalog};
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;

// ============================================================================
// Mock KeyValueStore
// ============================================================================

#[derive(Default)]
pub struct MockKvStore {
    entries: RwLock<HashMap<String, String>>,
    writes: AtomicUsize,
}

impl MockKvStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn writes(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }

    pub async fn raw(&self, key: &str) -> Option<String> {
        self.entries.read().await.get(key).cloned()
    }
}

#[async_trait]
impl KeyValueStore for MockKvStore {
    async fn get(&self, key: &str) -> Result<Option<String>, DomainError> {
        Ok(self.raw(key).await)
    }

    async fn put(&self, key: &str, value: String, _ttl: Duration) -> Result<(), DomainError> {
        self.writes.fetch_add(1, Ordering::SeqCst);
        self.entries.write().await.insert(key.to_string(), value);
        Ok(())
    }
}

// ============================================================================
// Mock TelemetryAggregate
// ============================================================================

#[derive(Default)]
pub struct MockTelemetryAggregate {
    errors: Vec<ProviderCount>,
}

impl MockTelemetryAggregate {
    pub fn with_errors(rows: &[(&str, u64)]) -> Self {
        Self {
            errors: rows.iter().map(|(p, c)| ProviderCount::new(*p, *c)).collect(),
        }
    }
}

#[async_trait]
impl TelemetryAggregate for MockTelemetryAggregate {
    async fn error_counts(
        &self,
        _dataset: Dataset,
        _window: Duration,
    ) -> Result<Vec<ProviderCount>, DomainError> {
        Ok(self.errors.clone())
    }

    async fn success_counts(
        &self,
        _dataset: Dataset,
        _window: Duration,
    ) -> Result<Vec<ProviderCount>, DomainError> {
        Ok(Vec::new())
    }

    async fn error_breakdown(
        &self,
        _dataset: Dataset,
        _window: Duration,
    ) -> Result<Vec<ErrorBreakdown>, DomainError> {
        Ok(Vec::new())
    }
}

// ============================================================================
// Builders
// ============================================================================

pub const SCORES_KEY: &str = "health-scores";

pub fn make_maintenance(
    kv: Arc<MockKvStore>,
    aggregate: MockTelemetryAggregate,
) -> Arc<RunHealthMaintenanceUseCase> {
    let catalog = Arc::new(ResolverCatalog::from_config(&Config::default()).unwrap());
    let store = Arc::new(HealthStore::new(kv, SCORES_KEY, Duration::from_secs(600)));
    Arc::new(RunHealthMaintenanceUseCase::new(
        catalog,
        Arc::new(aggregate),
        store,
        Duration::from_secs(7200),
        Dataset::Prod,
    ))
}
