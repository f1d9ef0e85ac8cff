use async_trait::async_trait;
use chrono::{DateTime, Duration as ChronoDuration, Utc};
use mydns_application::ports::TelemetryAggregate;
use mydns_domain::{
    Dataset, DomainError, ErrorBreakdown, ErrorCategory, Family, ProviderCount, TelemetryEvent,
};
use std::collections::{BTreeMap, HashMap, VecDeque};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Outcome {
    Served,
    Failed(ErrorCategory),
}

#[derive(Debug, Clone)]
struct StoredEvent {
    at: DateTime<Utc>,
    provider: Arc<str>,
    family: Family,
    outcome: Outcome,
}

/// Time-ordered telemetry events kept in memory, one queue per dataset.
///
/// Queues are pruned on every append: events older than the retention period
/// go first, then the oldest events beyond `max_events`.
pub struct InMemoryTelemetryStore {
    datasets: RwLock<HashMap<Dataset, VecDeque<StoredEvent>>>,
    retention: ChronoDuration,
    max_events: usize,
}

impl InMemoryTelemetryStore {
    pub fn new(retention: Duration, max_events: usize) -> Self {
        Self {
            datasets: RwLock::new(HashMap::new()),
            retention: to_chrono(retention),
            max_events: max_events.max(1),
        }
    }

    pub async fn append(&self, events: Vec<TelemetryEvent>) {
        self.append_at(events, Utc::now()).await;
    }

    pub async fn append_at(&self, events: Vec<TelemetryEvent>, at: DateTime<Utc>) {
        let mut datasets = self.datasets.write().await;
        for event in events {
            let (dataset, stored) = match event {
                TelemetryEvent::Usage(e) => (
                    e.dataset,
                    StoredEvent {
                        at,
                        provider: e.provider,
                        family: e.family,
                        outcome: Outcome::Served,
                    },
                ),
                TelemetryEvent::Error(e) => (
                    e.dataset,
                    StoredEvent {
                        at,
                        provider: e.provider,
                        family: e.family,
                        outcome: Outcome::Failed(e.category),
                    },
                ),
            };
            datasets.entry(dataset).or_default().push_back(stored);
        }

        let cutoff = Utc::now() - self.retention;
        for queue in datasets.values_mut() {
            while queue.front().is_some_and(|e| e.at < cutoff) {
                queue.pop_front();
            }
            while queue.len() > self.max_events {
                queue.pop_front();
            }
        }
    }

    pub async fn len(&self, dataset: Dataset) -> usize {
        self.datasets
            .read()
            .await
            .get(&dataset)
            .map_or(0, VecDeque::len)
    }

    async fn counts(&self, dataset: Dataset, window: Duration, failed: bool) -> Vec<ProviderCount> {
        let since = Utc::now() - to_chrono(window);
        let datasets = self.datasets.read().await;
        let Some(queue) = datasets.get(&dataset) else {
            return Vec::new();
        };

        let mut counts: BTreeMap<&str, u64> = BTreeMap::new();
        for event in queue
            .iter()
            .filter(|e| matches!(e.outcome, Outcome::Failed(_)) == failed && e.at >= since)
        {
            *counts.entry(event.provider.as_ref()).or_insert(0) += 1;
        }

        counts
            .into_iter()
            .map(|(provider, count)| ProviderCount::new(provider, count))
            .collect()
    }

    async fn breakdown(&self, dataset: Dataset, window: Duration) -> Vec<ErrorBreakdown> {
        let since = Utc::now() - to_chrono(window);
        let datasets = self.datasets.read().await;
        let Some(queue) = datasets.get(&dataset) else {
            return Vec::new();
        };

        // Insertion order of first sighting keeps the output deterministic.
        let mut cells: Vec<ErrorBreakdown> = Vec::new();
        let mut index: HashMap<(&str, ErrorCategory, &str), usize> = HashMap::new();
        for event in queue.iter().filter(|e| e.at >= since) {
            let Outcome::Failed(category) = event.outcome else {
                continue;
            };
            let key = (event.provider.as_ref(), category, event.family.as_str());
            match index.get(&key) {
                Some(&i) => cells[i].count += 1,
                None => {
                    index.insert(key, cells.len());
                    cells.push(ErrorBreakdown {
                        provider: event.provider.to_string(),
                        category,
                        family: event.family.clone(),
                        count: 1,
                    });
                }
            }
        }
        cells
    }
}

#[async_trait]
impl TelemetryAggregate for InMemoryTelemetryStore {
    async fn error_counts(
        &self,
        dataset: Dataset,
        window: Duration,
    ) -> Result<Vec<ProviderCount>, DomainError> {
        Ok(self.counts(dataset, window, true).await)
    }

    async fn success_counts(
        &self,
        dataset: Dataset,
        window: Duration,
    ) -> Result<Vec<ProviderCount>, DomainError> {
        Ok(self.counts(dataset, window, false).await)
    }

    async fn error_breakdown(
        &self,
        dataset: Dataset,
        window: Duration,
    ) -> Result<Vec<ErrorBreakdown>, DomainError> {
        Ok(self.breakdown(dataset, window).await)
    }
}

fn to_chrono(duration: Duration) -> ChronoDuration {
    ChronoDuration::from_std(duration).unwrap_or_else(|_| ChronoDuration::days(36_500))
}
