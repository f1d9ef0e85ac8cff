use crate::services::HostnameRouter;
use mydns_domain::ResolverCatalog;
use std::sync::Arc;

/// Endpoint URLs that may serve queries sent to a hostname.
pub struct ListProvidersUseCase {
    router: Arc<HostnameRouter>,
    catalog: Arc<ResolverCatalog>,
}

impl ListProvidersUseCase {
    pub fn new(router: Arc<HostnameRouter>, catalog: Arc<ResolverCatalog>) -> Self {
        Self { router, catalog }
    }

    pub fn execute(&self, hostname: &str) -> Vec<String> {
        let route = self.router.route(hostname);
        route
            .resolver_ids
            .iter()
            .filter_map(|id| self.catalog.endpoint(id, &route.endpoint_group))
            .map(|endpoint| endpoint.url.to_string())
            .collect()
    }
}
