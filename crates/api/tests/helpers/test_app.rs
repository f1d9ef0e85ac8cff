#![allow(dead_code)]

use async_trait::async_trait;
use axum::Router;
use bytes::Bytes;
use hickory_proto::op::{Message, MessageType, OpCode, Query};
use hickory_proto::rr::rdata::A;
use hickory_proto::rr::{Name, RData, Record, RecordType};
use hickory_proto::serialize::binary::{BinEncodable, BinEncoder};
use mydns_api::{create_api_routes, AppState};
use mydns_application::ports::{DohTransport, KeyValueStore, UpstreamReply};
use mydns_application::services::{HealthStore, HostnameRouter, QueryDispatcher, WeightedSelector};
use mydns_application::use_cases::{
    GetAnalyticsReportUseCase, GetHealthSnapshotUseCase, ListProvidersUseCase,
    ResolveDnsQueryUseCase,
};
use mydns_domain::{Config, DomainError, Endpoint, ResolverCatalog};
use mydns_infrastructure::dns::HickoryCodec;
use mydns_infrastructure::storage::MemoryKvStore;
use mydns_infrastructure::telemetry::{InMemoryTelemetryStore, TelemetryEmitter};
use std::collections::HashSet;
use std::net::Ipv4Addr;
use std::str::FromStr;
use std::sync::{Arc, Mutex};
use std::time::Duration;

pub const SCORES_KEY: &str = "health-scores";

pub const TEST_CONFIG: &str = r#"
[resolvers.alpha]
freedom = "https://alpha.test/dns-query"
family = "https://family.alpha.test/dns-query"

[resolvers.beta]
freedom = "https://beta.test/dns-query"
family = "https://family.beta.test/dns-query"

[routes.default]
resolvers = ["alpha", "beta"]

[routes."family.mydns.network"]
resolvers = ["alpha", "beta"]

[health]
store_key = "health-scores"
"#;

/// Upstream stand-in answering every query with one A record, unless the
/// endpoint host is marked as failing.
#[derive(Default)]
pub struct StubTransport {
    failing: Mutex<HashSet<String>>,
    queries: Mutex<Vec<(String, Vec<u8>)>>,
}

impl StubTransport {
    pub fn fail(&self, hostname: &str) {
        self.failing.lock().unwrap().insert(hostname.to_string());
    }

    pub fn queries(&self) -> Vec<(String, Vec<u8>)> {
        self.queries.lock().unwrap().clone()
    }
}

#[async_trait]
impl DohTransport for StubTransport {
    async fn exchange(
        &self,
        endpoint: &Endpoint,
        query: Bytes,
    ) -> Result<UpstreamReply, DomainError> {
        let host = endpoint.hostname.to_string();
        self.queries
            .lock()
            .unwrap()
            .push((host.clone(), query.to_vec()));

        if self.failing.lock().unwrap().contains(&host) {
            return Ok(UpstreamReply {
                status: 503,
                body: Bytes::new(),
            });
        }

        Ok(UpstreamReply {
            status: 200,
            body: Bytes::from(a_answer(&query, Ipv4Addr::new(192, 0, 2, 1))),
        })
    }
}

pub struct TestApp {
    pub router: Router,
    pub transport: Arc<StubTransport>,
    pub kv: Arc<MemoryKvStore>,
    pub telemetry: Arc<InMemoryTelemetryStore>,
}

pub fn build_app() -> TestApp {
    let config = Config::from_toml(TEST_CONFIG).unwrap();
    let catalog = Arc::new(ResolverCatalog::from_config(&config).unwrap());
    let transport = Arc::new(StubTransport::default());
    let kv = Arc::new(MemoryKvStore::new());
    let telemetry = Arc::new(InMemoryTelemetryStore::new(
        Duration::from_secs(30 * 24 * 3600),
        10_000,
    ));

    let router = Arc::new(HostnameRouter::new(catalog.clone(), &config.server));
    let selector = Arc::new(WeightedSelector::new(catalog.clone()));
    let dispatcher = Arc::new(QueryDispatcher::new(
        transport.clone(),
        Arc::new(TelemetryEmitter::new_disabled()),
        Duration::from_secs(2),
    ));
    let health = Arc::new(HealthStore::new(
        kv.clone() as Arc<dyn KeyValueStore>,
        SCORES_KEY,
        Duration::from_secs(600),
    ));

    let state = AppState {
        resolve: Arc::new(ResolveDnsQueryUseCase::new(
            router.clone(),
            selector,
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

    TestApp {
        router: create_api_routes(state),
        transport,
        kv,
        telemetry,
    }
}

pub fn encode(message: &Message) -> Vec<u8> {
    let mut buf = Vec::new();
    let mut encoder = BinEncoder::new(&mut buf);
    message.emit(&mut encoder).unwrap();
    buf
}

pub fn client_query(domain: &str, record_type: RecordType) -> Vec<u8> {
    let mut message = Message::new();
    message.set_id(0x1234);
    message.set_message_type(MessageType::Query);
    message.set_op_code(OpCode::Query);
    message.set_recursion_desired(true);
    message.add_query(Query::query(Name::from_str(domain).unwrap(), record_type));
    encode(&message)
}

pub fn a_answer(query: &[u8], address: Ipv4Addr) -> Vec<u8> {
    let request = Message::from_vec(query).unwrap();
    let mut message = Message::new();
    message.set_id(request.id());
    message.set_message_type(MessageType::Response);
    message.set_op_code(OpCode::Query);
    message.set_recursion_desired(request.recursion_desired());
    message.set_recursion_available(true);
    for query in request.queries() {
        message.add_query(query.clone());
        message.add_answer(Record::from_rdata(
            query.name().clone(),
            300,
            RData::A(A(address)),
        ));
    }
    encode(&message)
}
