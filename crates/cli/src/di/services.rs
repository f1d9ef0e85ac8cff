use mydns_application::ports::{KeyValueStore, TelemetryAggregate};
use mydns_application::services::{HealthStore, HostnameRouter, QueryDispatcher, WeightedSelector};
use mydns_domain::{Config, ResolverCatalog};
use mydns_infrastructure::dns::{HickoryCodec, HttpsTransport};
use mydns_infrastructure::storage::MemoryKvStore;
use mydns_infrastructure::telemetry::{InMemoryTelemetryStore, TelemetryEmitter, TelemetryRecorder};
use std::sync::Arc;
use std::time::Duration;
use tracing::info;

/// Adapters and services shared by every use case.
pub struct Services {
    pub catalog: Arc<ResolverCatalog>,
    pub router: Arc<HostnameRouter>,
    pub selector: Arc<WeightedSelector>,
    pub dispatcher: Arc<QueryDispatcher>,
    pub codec: Arc<HickoryCodec>,
    pub kv: Arc<MemoryKvStore>,
    pub health: Arc<HealthStore>,
    pub telemetry: Arc<dyn TelemetryAggregate>,
}

impl Services {
    /// Must be called inside the tokio runtime: the telemetry recorder task
    /// is spawned here.
    pub fn new(config: &Config) -> anyhow::Result<Self> {
        let catalog = Arc::new(ResolverCatalog::from_config(config)?);

        let telemetry_store = Arc::new(InMemoryTelemetryStore::new(
            Duration::from_secs(config.telemetry.retention_secs),
            config.telemetry.max_events,
        ));
        let (emitter, rx) = TelemetryEmitter::new_enabled();
        // Stops by itself once the dispatcher, and with it the emitter, is dropped.
        TelemetryRecorder::new(telemetry_store.clone()).start(rx);

        let transport = Arc::new(HttpsTransport::new(Duration::from_millis(
            config.selection.upstream_timeout_ms,
        )));
        let dispatcher = Arc::new(QueryDispatcher::new(
            transport,
            Arc::new(emitter),
            Duration::from_millis(config.selection.request_timeout_ms),
        ));

        let kv = Arc::new(MemoryKvStore::new());
        let health = Arc::new(HealthStore::new(
            kv.clone() as Arc<dyn KeyValueStore>,
            config.health.store_key.clone(),
            Duration::from_secs(config.health.ttl_secs),
        ));

        info!(
            resolvers = config.resolvers.len(),
            hostnames = catalog.reachable_hostnames().len(),
            "Services initialized"
        );

        Ok(Self {
            router: Arc::new(HostnameRouter::new(catalog.clone(), &config.server)),
            selector: Arc::new(WeightedSelector::new(catalog.clone())),
            codec: Arc::new(HickoryCodec::new()),
            telemetry: telemetry_store,
            catalog,
            dispatcher,
            kv,
            health,
        })
    }
}
