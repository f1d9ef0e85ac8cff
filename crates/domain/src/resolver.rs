use crate::config::{Config, ConfigError, DEFAULT_ROUTE};
use crate::family::{EndpointGroup, Family};
use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;
use url::Url;

/// One DoH endpoint of a resolver, keyed for health purposes by its hostname.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoint {
    pub resolver_id: Arc<str>,
    pub url: Arc<str>,
    pub hostname: Arc<str>,
}

impl Endpoint {
    pub fn parse(resolver_id: &str, raw: &str) -> Result<Self, ConfigError> {
        let url = Url::parse(raw).map_err(|e| {
            ConfigError::Validation(format!(
                "resolver '{}' endpoint '{}' is not a valid URL: {}",
                resolver_id, raw, e
            ))
        })?;
        let hostname = url.host_str().ok_or_else(|| {
            ConfigError::Validation(format!(
                "resolver '{}' endpoint '{}' has no host",
                resolver_id, raw
            ))
        })?;

        Ok(Self {
            resolver_id: Arc::from(resolver_id),
            url: Arc::from(raw),
            hostname: Arc::from(hostname.to_ascii_lowercase()),
        })
    }
}

/// An upstream resolver: endpoint group → endpoint.
#[derive(Debug, Clone)]
pub struct ResolverDescriptor {
    pub id: Arc<str>,
    endpoints: BTreeMap<String, Endpoint>,
}

impl ResolverDescriptor {
    pub fn endpoint(&self, group: &EndpointGroup) -> Option<&Endpoint> {
        self.endpoints.get(group.as_str())
    }

    pub fn endpoints(&self) -> impl Iterator<Item = &Endpoint> {
        self.endpoints.values()
    }
}

/// Immutable resolver and route tables, built once from configuration.
#[derive(Debug, Clone)]
pub struct ResolverCatalog {
    resolvers: BTreeMap<String, ResolverDescriptor>,
    routes: BTreeMap<String, Vec<Arc<str>>>,
    domain_suffix: String,
}

impl ResolverCatalog {
    pub fn from_config(config: &Config) -> Result<Self, ConfigError> {
        config.validate()?;

        let mut resolvers = BTreeMap::new();
        for (id, table) in &config.resolvers {
            let mut endpoints = BTreeMap::new();
            for (group, raw) in table {
                endpoints.insert(group.to_ascii_lowercase(), Endpoint::parse(id, raw)?);
            }
            resolvers.insert(
                id.clone(),
                ResolverDescriptor {
                    id: Arc::from(id.as_str()),
                    endpoints,
                },
            );
        }

        let routes = config
            .routes
            .iter()
            .map(|(key, route)| {
                let ids = route
                    .resolvers
                    .iter()
                    .map(|id| Arc::from(id.as_str()))
                    .collect();
                (key.to_ascii_lowercase(), ids)
            })
            .collect();

        Ok(Self {
            resolvers,
            routes,
            domain_suffix: config.server.domain_suffix.to_ascii_lowercase(),
        })
    }

    pub fn resolver(&self, id: &str) -> Option<&ResolverDescriptor> {
        self.resolvers.get(id)
    }

    pub fn endpoint(&self, id: &str, group: &EndpointGroup) -> Option<&Endpoint> {
        self.resolver(id).and_then(|r| r.endpoint(group))
    }

    pub fn route(&self, key: &str) -> Option<&[Arc<str>]> {
        self.routes.get(key).map(Vec::as_slice)
    }

    /// Resolver ids of the `default` route.
    pub fn default_route(&self) -> &[Arc<str>] {
        self.route(DEFAULT_ROUTE).unwrap_or(&[])
    }

    /// Every `(family, resolver ids)` pair derivable from the route keys.
    pub fn family_routes(&self) -> impl Iterator<Item = (Family, &[Arc<str>])> {
        self.routes.iter().map(|(key, ids)| {
            (
                Family::from_hostname(key, &self.domain_suffix),
                ids.as_slice(),
            )
        })
    }

    /// Hostnames of every endpoint some route can reach.
    pub fn reachable_hostnames(&self) -> BTreeSet<Arc<str>> {
        let mut hostnames = BTreeSet::new();
        for (family, ids) in self.family_routes() {
            let group = family.endpoint_group();
            for id in ids {
                if let Some(endpoint) = self.endpoint(id, &group) {
                    hostnames.insert(Arc::clone(&endpoint.hostname));
                }
            }
        }
        hostnames
    }

    /// Hostnames of every resolver endpoint serving `group`.
    pub fn hostnames_for_group(&self, group: &EndpointGroup) -> BTreeSet<Arc<str>> {
        self.resolvers
            .values()
            .filter_map(|r| r.endpoint(group))
            .map(|e| Arc::clone(&e.hostname))
            .collect()
    }

    pub fn domain_suffix(&self) -> &str {
        &self.domain_suffix
    }
}
