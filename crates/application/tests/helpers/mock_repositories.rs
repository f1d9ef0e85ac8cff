#![allow(dead_code)]

use async_trait::async_trait;
use bytes::Bytes;
use mydns_application::ports::{
    DnsCodec, DohTransport, KeyValueStore, TelemetryAggregate, TelemetrySink, UpstreamReply,
};
use mydns_domain::{
    Config, Dataset, DomainError, Endpoint, ErrorBreakdown, ErrorCategory, NormalizedQuestion,
    NormalizedResponse, ProviderCount, RecordType, ResolverCatalog, TelemetryEvent,
};
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::sync::RwLock;

// ============================================================================
// Test configuration
// ============================================================================

pub const TEST_CONFIG: &str = r#"
[resolvers.alpha]
freedom = "https://alpha.test/dns-query"
family = "https://family.alpha.test/dns-query"

[resolvers.beta]
freedom = "https://beta.test/dns-query"
family = "https://family.beta.test/dns-query"

[resolvers.gamma]
freedom = "https://gamma.test/dns-query"

[routes.default]
resolvers = ["alpha", "beta", "gamma"]

[routes."family.mydns.network"]
resolvers = ["alpha", "beta"]

[routes."paranoia.mydns.network"]
resolvers = ["alpha", "gamma"]
"#;

pub fn test_config() -> Config {
    Config::from_toml(TEST_CONFIG).expect("test config parses")
}

pub fn test_catalog() -> Arc<ResolverCatalog> {
    Arc::new(ResolverCatalog::from_config(&test_config()).expect("test config is valid"))
}

pub fn endpoint(hostname: &str) -> Endpoint {
    Endpoint::parse("test", &format!("https://{}/dns-query", hostname)).unwrap()
}

// ============================================================================
// Mock KeyValueStore
// ============================================================================

#[derive(Default)]
pub struct MockKvStore {
    entries: RwLock<HashMap<String, (String, Duration)>>,
    fail_reads: AtomicBool,
    fail_writes: AtomicBool,
    writes: AtomicUsize,
}

impl MockKvStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn insert(&self, key: &str, value: &str) {
        self.entries
            .write()
            .await
            .insert(key.to_string(), (value.to_string(), Duration::from_secs(600)));
    }

    pub async fn raw(&self, key: &str) -> Option<String> {
        self.entries.read().await.get(key).map(|(v, _)| v.clone())
    }

    pub async fn ttl(&self, key: &str) -> Option<Duration> {
        self.entries.read().await.get(key).map(|(_, ttl)| *ttl)
    }

    pub fn set_fail_reads(&self, fail: bool) {
        self.fail_reads.store(fail, Ordering::SeqCst);
    }

    pub fn set_fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    pub fn writes(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl KeyValueStore for MockKvStore {
    async fn get(&self, key: &str) -> Result<Option<String>, DomainError> {
        if self.fail_reads.load(Ordering::SeqCst) {
            return Err(DomainError::Storage("mock read failure".into()));
        }
        Ok(self.raw(key).await)
    }

    async fn put(&self, key: &str, value: String, ttl: Duration) -> Result<(), DomainError> {
        self.writes.fetch_add(1, Ordering::SeqCst);
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(DomainError::Storage("mock write failure".into()));
        }
        self.entries
            .write()
            .await
            .insert(key.to_string(), (value, ttl));
        Ok(())
    }
}

// ============================================================================
// Mock TelemetrySink
// ============================================================================

#[derive(Default)]
pub struct MockTelemetrySink {
    events: Mutex<Vec<TelemetryEvent>>,
}

impl MockTelemetrySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<TelemetryEvent> {
        self.events.lock().unwrap().clone()
    }

    pub fn error_categories(&self) -> Vec<(String, ErrorCategory)> {
        self.events()
            .into_iter()
            .filter_map(|e| match e {
                TelemetryEvent::Error(err) => Some((err.provider.to_string(), err.category)),
                _ => None,
            })
            .collect()
    }

    pub fn usage_providers(&self) -> Vec<String> {
        self.events()
            .into_iter()
            .filter_map(|e| match e {
                TelemetryEvent::Usage(usage) => Some(usage.provider.to_string()),
                _ => None,
            })
            .collect()
    }
}

impl TelemetrySink for MockTelemetrySink {
    fn record(&self, event: TelemetryEvent) {
        self.events.lock().unwrap().push(event);
    }
}

// ============================================================================
// Mock TelemetryAggregate
// ============================================================================

#[derive(Default)]
pub struct MockTelemetryAggregate {
    errors: Vec<ProviderCount>,
    successes: Vec<ProviderCount>,
    breakdown: Vec<ErrorBreakdown>,
    fail_errors: bool,
    fail_successes: bool,
    queried: Mutex<Vec<(Dataset, Duration)>>,
}

impl MockTelemetryAggregate {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_errors(mut self, rows: &[(&str, u64)]) -> Self {
        self.errors = rows.iter().map(|(p, c)| ProviderCount::new(*p, *c)).collect();
        self
    }

    pub fn with_successes(mut self, rows: &[(&str, u64)]) -> Self {
        self.successes = rows.iter().map(|(p, c)| ProviderCount::new(*p, *c)).collect();
        self
    }

    pub fn with_breakdown(mut self, cells: Vec<ErrorBreakdown>) -> Self {
        self.breakdown = cells;
        self
    }

    pub fn failing_errors(mut self) -> Self {
        self.fail_errors = true;
        self
    }

    pub fn failing_successes(mut self) -> Self {
        self.fail_successes = true;
        self
    }

    pub fn queried(&self) -> Vec<(Dataset, Duration)> {
        self.queried.lock().unwrap().clone()
    }
}

#[async_trait]
impl TelemetryAggregate for MockTelemetryAggregate {
    async fn error_counts(
        &self,
        dataset: Dataset,
        window: Duration,
    ) -> Result<Vec<ProviderCount>, DomainError> {
        self.queried.lock().unwrap().push((dataset, window));
        if self.fail_errors {
            return Err(DomainError::Telemetry("mock aggregate down".into()));
        }
        Ok(self.errors.clone())
    }

    async fn success_counts(
        &self,
        dataset: Dataset,
        window: Duration,
    ) -> Result<Vec<ProviderCount>, DomainError> {
        self.queried.lock().unwrap().push((dataset, window));
        if self.fail_successes {
            return Err(DomainError::Telemetry("mock aggregate down".into()));
        }
        Ok(self.successes.clone())
    }

    async fn error_breakdown(
        &self,
        dataset: Dataset,
        window: Duration,
    ) -> Result<Vec<ErrorBreakdown>, DomainError> {
        self.queried.lock().unwrap().push((dataset, window));
        if self.fail_errors {
            return Err(DomainError::Telemetry("mock aggregate down".into()));
        }
        Ok(self.breakdown.clone())
    }
}

// ============================================================================
// Mock DohTransport
// ============================================================================

#[derive(Clone)]
pub enum MockOutcome {
    Status(u16),
    Transport(ErrorCategory),
}

#[derive(Clone)]
struct MockUpstream {
    outcome: MockOutcome,
    delay: Duration,
}

/// Answers with the upstream hostname as body so tests can tell winners apart.
#[derive(Default)]
pub struct MockTransport {
    upstreams: Mutex<HashMap<String, MockUpstream>>,
    calls: Mutex<Vec<(String, Bytes)>>,
    completed: AtomicUsize,
}

impl MockTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn respond(self, hostname: &str, outcome: MockOutcome, delay_ms: u64) -> Self {
        self.upstreams.lock().unwrap().insert(
            hostname.to_string(),
            MockUpstream {
                outcome,
                delay: Duration::from_millis(delay_ms),
            },
        );
        self
    }

    pub fn calls(&self) -> Vec<(String, Bytes)> {
        self.calls.lock().unwrap().clone()
    }

    pub fn completed(&self) -> usize {
        self.completed.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl DohTransport for MockTransport {
    async fn exchange(
        &self,
        endpoint: &Endpoint,
        query: Bytes,
    ) -> Result<UpstreamReply, DomainError> {
        let hostname = endpoint.hostname.to_string();
        self.calls.lock().unwrap().push((hostname.clone(), query));

        let upstream = self
            .upstreams
            .lock()
            .unwrap()
            .get(&hostname)
            .cloned()
            .unwrap_or(MockUpstream {
                outcome: MockOutcome::Status(200),
                delay: Duration::ZERO,
            });

        tokio::time::sleep(upstream.delay).await;
        self.completed.fetch_add(1, Ordering::SeqCst);

        match upstream.outcome {
            MockOutcome::Status(status) => Ok(UpstreamReply {
                status,
                body: Bytes::from(hostname),
            }),
            MockOutcome::Transport(category) => Err(DomainError::UpstreamTransport {
                provider: hostname,
                category,
                message: "mock transport failure".into(),
            }),
        }
    }
}

// ============================================================================
// Mock DnsCodec
// ============================================================================

/// Marks enforced queries with a `dnssec:` prefix and builds `query:<name>`.
#[derive(Default)]
pub struct MockCodec {
    reject_responses: bool,
}

impl MockCodec {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn rejecting_responses() -> Self {
        Self {
            reject_responses: true,
        }
    }
}

impl DnsCodec for MockCodec {
    fn enforce_dnssec(&self, query: &[u8]) -> Bytes {
        let mut out = b"dnssec:".to_vec();
        out.extend_from_slice(query);
        Bytes::from(out)
    }

    fn build_query(&self, name: &str, record_type: RecordType) -> Result<Bytes, DomainError> {
        Ok(Bytes::from(format!("query:{}:{}", name, record_type)))
    }

    fn normalize(
        &self,
        response: &[u8],
        provider: &str,
    ) -> Result<NormalizedResponse, DomainError> {
        if self.reject_responses {
            return Err(DomainError::InvalidDnsResponse("mock decode failure".into()));
        }
        Ok(NormalizedResponse {
            status: 0,
            tc: Some(false),
            rd: Some(true),
            ra: Some(true),
            ad: Some(false),
            cd: Some(false),
            questions: vec![NormalizedQuestion {
                name: String::from_utf8_lossy(response).into_owned(),
                record_type: 1,
            }],
            answers: None,
            authority: None,
            comment: Some(format!("Response from {}", provider)),
        })
    }
}
