use crate::ports::DnsCodec;
use crate::services::{
    DispatchContext, HealthStore, HostnameRouter, QueryDispatcher, WeightedSelector,
};
use bytes::Bytes;
use mydns_domain::{DomainError, NormalizedResponse, RecordType, ResolverCatalog};
use std::sync::Arc;
use tracing::{debug, instrument};

/// A client query, as received over DoH.
#[derive(Debug, Clone)]
pub enum DohRequest {
    /// RFC 8484 wire-format query
    Wire(Bytes),
    /// JSON API query by name and type
    Json {
        name: String,
        record_type: RecordType,
    },
}

#[derive(Debug, Clone)]
pub enum DohAnswer {
    /// Upstream response bytes, relayed untouched
    Wire(Bytes),
    Json(NormalizedResponse),
}

pub struct ResolveDnsQueryUseCase {
    router: Arc<HostnameRouter>,
    selector: Arc<WeightedSelector>,
    dispatcher: Arc<QueryDispatcher>,
    health: Arc<HealthStore>,
    codec: Arc<dyn DnsCodec>,
    catalog: Arc<ResolverCatalog>,
    fanout: usize,
}

impl ResolveDnsQueryUseCase {
    pub fn new(
        router: Arc<HostnameRouter>,
        selector: Arc<WeightedSelector>,
        dispatcher: Arc<QueryDispatcher>,
        health: Arc<HealthStore>,
        codec: Arc<dyn DnsCodec>,
        catalog: Arc<ResolverCatalog>,
        fanout: usize,
    ) -> Self {
        Self {
            router,
            selector,
            dispatcher,
            health,
            codec,
            catalog,
            fanout,
        }
    }

    #[instrument(skip(self, request))]
    pub async fn execute(
        &self,
        hostname: &str,
        request: DohRequest,
    ) -> Result<DohAnswer, DomainError> {
        let route = self.router.route(hostname);

        let (query, wants_json) = match request {
            DohRequest::Wire(bytes) => (self.codec.enforce_dnssec(&bytes), false),
            DohRequest::Json { name, record_type } => {
                let name = name.trim();
                if name.is_empty() {
                    return Err(DomainError::InvalidQuery("missing query name".into()));
                }
                (self.codec.build_query(name, record_type)?, true)
            }
        };

        let scores = self.health.load().await;
        let selected =
            self.selector
                .select(&route.resolver_ids, &scores, &route.family, self.fanout);
        let targets: Vec<_> = selected
            .iter()
            .filter_map(|id| self.catalog.endpoint(id, &route.endpoint_group))
            .cloned()
            .collect();

        debug!(
            family = %route.family,
            route = %route.config_key,
            targets = targets.len(),
            "Dispatching query"
        );

        let context = DispatchContext {
            family: route.family.clone(),
            dataset: route.dataset,
        };
        let answer = self.dispatcher.dispatch(targets, query, &context).await?;

        if wants_json {
            let normalized = self.codec.normalize(&answer.body, &answer.provider)?;
            Ok(DohAnswer::Json(normalized))
        } else {
            Ok(DohAnswer::Wire(answer.body))
        }
    }
}
