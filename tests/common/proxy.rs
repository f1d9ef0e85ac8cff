use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use mydns_api::{create_api_routes, AppState};
use mydns_application::ports::KeyValueStore;
use mydns_application::services::{HealthStore, HostnameRouter, QueryDispatcher, WeightedSelector};
use mydns_application::use_cases::{
    GetAnalyticsReportUseCase, GetHealthSnapshotUseCase, ListProvidersUseCase,
    ResolveDnsQueryUseCase, RunHealthMaintenanceUseCase,
};
use mydns_domain::{Config, Dataset, ResolverCatalog};
use mydns_infrastructure::dns::{HickoryCodec, HttpsTransport};
use mydns_infrastructure::storage::MemoryKvStore;
use mydns_infrastructure::telemetry::{InMemoryTelemetryStore, TelemetryEmitter, TelemetryRecorder};
use std::sync::Arc;
use std::time::Duration;
use tower::ServiceExt;

use super::MockUpstream;

pub struct ProxyResponse {
    pub status: StatusCode,
    pub content_type: Option<String>,
    pub body: Vec<u8>,
}

impl ProxyResponse {
    pub fn json(&self) -> serde_json::Value {
        serde_json::from_slice(&self.body).unwrap()
    }
}

/// The proxy wired with real adapters, pointed at local upstreams.
pub struct ProxyHarness {
    pub router: Router,
    pub telemetry: Arc<InMemoryTelemetryStore>,
    pub maintenance: Arc<RunHealthMaintenanceUseCase>,
    pub kv: Arc<MemoryKvStore>,
}

impl ProxyHarness {
    /// Every upstream becomes a resolver serving all families, routed for
    /// every hostname.
    pub fn start(upstreams: &[&MockUpstream], fanout: usize, deadline: Duration) -> Self {
        let urls: Vec<String> = upstreams.iter().map(|u| u.url()).collect();
        Self::start_with_urls(&urls, fanout, deadline)
    }

    pub fn start_with_urls(urls: &[String], fanout: usize, deadline: Duration) -> Self {
        let mut toml = String::new();
        let mut ids = Vec::new();
        for (i, url) in urls.iter().enumerate() {
            let id = format!("upstream{}", i);
            toml.push_str(&format!(
                "[resolvers.{id}]\nfreedom = \"{url}\"\nfamily = \"{url}\"\n\n",
                id = id,
                url = url
            ));
            ids.push(format!("\"{}\"", id));
        }
        toml.push_str(&format!(
            "[routes.default]\nresolvers = [{ids}]\n\n[routes.\"family.mydns.network\"]\nresolvers = [{ids}]\n\n[selection]\nfanout = {fanout}\n",
            ids = ids.join(", "),
            fanout = fanout
        ));

        let config = Config::from_toml(&toml).unwrap();
        config.validate().unwrap();
        let catalog = Arc::new(ResolverCatalog::from_config(&config).unwrap());

        let telemetry = Arc::new(InMemoryTelemetryStore::new(
            Duration::from_secs(3600),
            10_000,
        ));
        let (emitter, rx) = TelemetryEmitter::new_enabled();
        TelemetryRecorder::new(telemetry.clone()).start(rx);

        let kv = Arc::new(MemoryKvStore::new());
        let health = Arc::new(HealthStore::new(
            kv.clone() as Arc<dyn KeyValueStore>,
            config.health.store_key.clone(),
            Duration::from_secs(config.health.ttl_secs),
        ));

        let router = Arc::new(HostnameRouter::new(catalog.clone(), &config.server));
        let dispatcher = Arc::new(QueryDispatcher::new(
            Arc::new(HttpsTransport::new(Duration::from_secs(2))),
            Arc::new(emitter),
            deadline,
        ));

        let maintenance = Arc::new(RunHealthMaintenanceUseCase::new(
            catalog.clone(),
            telemetry.clone(),
            health.clone(),
            Duration::from_secs(3600),
            Dataset::Prod,
        ));

        let state = AppState {
            resolve: Arc::new(ResolveDnsQueryUseCase::new(
                router.clone(),
                Arc::new(WeightedSelector::new(catalog.clone())),
                dispatcher,
                health.clone(),
                Arc::new(HickoryCodec::new()),
                catalog.clone(),
                config.selection.fanout,
            )),
            health_snapshot: Arc::new(GetHealthSnapshotUseCase::new(catalog.clone(), health)),
            list_providers: Arc::new(ListProvidersUseCase::new(router, catalog)),
            analytics: Arc::new(GetAnalyticsReportUseCase::new(telemetry.clone())),
        };

        Self {
            router: create_api_routes(state),
            telemetry,
            maintenance,
            kv,
        }
    }

    pub async fn send(&self, request: Request<Body>) -> ProxyResponse {
        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let content_type = response
            .headers()
            .get(header::CONTENT_TYPE)
            .map(|v| v.to_str().unwrap().to_string());
        let body = response.into_body().collect().await.unwrap().to_bytes();
        ProxyResponse {
            status,
            content_type,
            body: body.to_vec(),
        }
    }

    pub async fn post_wire(&self, host: &str, query: Vec<u8>) -> ProxyResponse {
        self.send(
            Request::builder()
                .method("POST")
                .uri("/dns-query")
                .header(header::HOST, host)
                .header(header::CONTENT_TYPE, "application/dns-message")
                .body(Body::from(query))
                .unwrap(),
        )
        .await
    }

    pub async fn get(&self, host: &str, uri: &str) -> ProxyResponse {
        self.send(
            Request::builder()
                .uri(uri)
                .header(header::HOST, host)
                .body(Body::empty())
                .unwrap(),
        )
        .await
    }

    /// Waits until the recorder has stored at least `count` events.
    pub async fn wait_for_telemetry(&self, dataset: Dataset, count: usize) {
        for _ in 0..100 {
            if self.telemetry.len(dataset).await >= count {
                return;
            }
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
        panic!("telemetry never reached {} events", count);
    }
}
