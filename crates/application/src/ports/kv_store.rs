use async_trait::async_trait;
use mydns_domain::DomainError;
use std::time::Duration;

/// String key-value store with per-entry expiry.
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    async fn get(&self, key: &str) -> Result<Option<String>, DomainError>;

    async fn put(&self, key: &str, value: String, ttl: Duration) -> Result<(), DomainError>;
}
