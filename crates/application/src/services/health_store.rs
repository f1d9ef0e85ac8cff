use crate::ports::KeyValueStore;
use mydns_domain::{DomainError, HealthScores};
use std::sync::Arc;
use std::time::Duration;
use tracing::warn;

/// Health score map persisted as one JSON blob under a single key.
///
/// The map is only ever replaced whole; readers get a snapshot.
pub struct HealthStore {
    store: Arc<dyn KeyValueStore>,
    key: String,
    ttl: Duration,
}

impl HealthStore {
    pub fn new(store: Arc<dyn KeyValueStore>, key: impl Into<String>, ttl: Duration) -> Self {
        Self {
            store,
            key: key.into(),
            ttl,
        }
    }

    /// Current scores, or an empty map when none are stored or the stored
    /// value is unreadable.
    pub async fn load(&self) -> HealthScores {
        match self.store.get(&self.key).await {
            Ok(Some(raw)) => serde_json::from_str(&raw).unwrap_or_else(|e| {
                warn!(key = %self.key, error = %e, "Discarding unreadable health scores");
                HealthScores::new()
            }),
            Ok(None) => HealthScores::new(),
            Err(e) => {
                warn!(key = %self.key, error = %e, "Failed to load health scores");
                HealthScores::new()
            }
        }
    }

    pub async fn save(&self, scores: &HealthScores) -> Result<(), DomainError> {
        let raw = serde_json::to_string(scores).map_err(|e| DomainError::Storage(e.to_string()))?;
        self.store.put(&self.key, raw, self.ttl).await
    }
}
