use mydns_domain::config::{ServerConfig, DEFAULT_ROUTE};
use mydns_domain::{Dataset, EndpointGroup, Family, ResolverCatalog};
use std::sync::Arc;
use tracing::debug;

const STAGING_LABEL: &str = ".staging.";

/// Routing decision for one request hostname.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteContext {
    /// Lowercased hostname without port
    pub hostname: String,
    /// Route key actually used (`default` on fallback)
    pub config_key: String,
    pub family: Family,
    pub endpoint_group: EndpointGroup,
    pub resolver_ids: Vec<Arc<str>>,
    pub dataset: Dataset,
}

/// Maps a request hostname to a family and a resolver set.
pub struct HostnameRouter {
    catalog: Arc<ResolverCatalog>,
    domain_suffix: String,
    staging_suffix: String,
}

impl HostnameRouter {
    pub fn new(catalog: Arc<ResolverCatalog>, server: &ServerConfig) -> Self {
        Self {
            catalog,
            domain_suffix: server.domain_suffix.to_ascii_lowercase(),
            staging_suffix: server.staging_suffix.to_ascii_lowercase(),
        }
    }

    /// Never fails: unknown hostnames get the default route.
    pub fn route(&self, raw_hostname: &str) -> RouteContext {
        let hostname = normalize_hostname(raw_hostname);
        let family = Family::from_hostname(&hostname, &self.domain_suffix);
        let lookup_key = self.lookup_key(&hostname);

        let (config_key, resolver_ids) = match self.catalog.route(&lookup_key) {
            Some(ids) => (lookup_key, ids.to_vec()),
            None => {
                debug!(hostname = %hostname, "No route for hostname, using default");
                (
                    DEFAULT_ROUTE.to_string(),
                    self.catalog.default_route().to_vec(),
                )
            }
        };

        let dataset = if hostname.contains(STAGING_LABEL) {
            Dataset::Dev
        } else {
            Dataset::Prod
        };

        RouteContext {
            endpoint_group: family.endpoint_group(),
            hostname,
            config_key,
            family,
            resolver_ids,
            dataset,
        }
    }

    /// Staging hostnames share the production route of the same family.
    fn lookup_key(&self, hostname: &str) -> String {
        let staging = format!(".{}", self.staging_suffix);
        if hostname.contains(&staging) {
            hostname.replacen(&staging, &format!(".{}", self.domain_suffix), 1)
        } else {
            hostname.to_string()
        }
    }
}

fn normalize_hostname(raw: &str) -> String {
    let raw = raw.trim();
    let host = if let Some(rest) = raw.strip_prefix('[') {
        rest.split(']').next().unwrap_or(rest)
    } else {
        raw.split(':').next().unwrap_or(raw)
    };
    host.trim_end_matches('.').to_ascii_lowercase()
}
