use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Route key used when a request hostname has no route of its own
pub const DEFAULT_ROUTE: &str = "default";

/// Resolver id → endpoint group → DoH endpoint URL
pub type ResolverTable = BTreeMap<String, BTreeMap<String, String>>;

/// Ordered resolver set served for one hostname
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct RouteConfig {
    pub resolvers: Vec<String>,
}

impl RouteConfig {
    pub fn new(resolvers: &[&str]) -> Self {
        Self {
            resolvers: resolvers.iter().map(|r| r.to_string()).collect(),
        }
    }
}

pub(crate) fn default_resolvers() -> ResolverTable {
    let mut table = ResolverTable::new();
    let mut add = |id: &str, endpoints: &[(&str, &str)]| {
        table.insert(
            id.to_string(),
            endpoints
                .iter()
                .map(|(group, url)| (group.to_string(), url.to_string()))
                .collect(),
        );
    };

    add(
        "cloudflare",
        &[
            ("freedom", "https://cloudflare-dns.com/dns-query"),
            ("family", "https://family.cloudflare-dns.com/dns-query"),
            ("security", "https://security.cloudflare-dns.com/dns-query"),
        ],
    );
    add("google", &[("freedom", "https://dns.google/dns-query")]);
    add(
        "quad9",
        &[
            ("freedom", "https://dns10.quad9.net/dns-query"),
            ("security", "https://dns.quad9.net/dns-query"),
        ],
    );
    add(
        "adguard",
        &[
            ("freedom", "https://unfiltered.adguard-dns.com/dns-query"),
            ("family", "https://family.adguard-dns.com/dns-query"),
            ("security", "https://dns.adguard-dns.com/dns-query"),
        ],
    );
    add(
        "cleanbrowsing",
        &[
            ("family", "https://doh.cleanbrowsing.org/doh/family-filter/"),
            ("security", "https://doh.cleanbrowsing.org/doh/security-filter/"),
        ],
    );
    table
}

pub(crate) fn default_routes() -> BTreeMap<String, RouteConfig> {
    let mut routes = BTreeMap::new();
    let open = RouteConfig::new(&["cloudflare", "google", "quad9", "adguard"]);
    routes.insert(DEFAULT_ROUTE.to_string(), open.clone());
    routes.insert("freedom.mydns.network".to_string(), open);
    routes.insert(
        "paranoia.mydns.network".to_string(),
        RouteConfig::new(&["cloudflare", "quad9", "adguard"]),
    );
    routes.insert(
        "family.mydns.network".to_string(),
        RouteConfig::new(&["cloudflare", "adguard", "cleanbrowsing"]),
    );
    routes.insert(
        "security.mydns.network".to_string(),
        RouteConfig::new(&["cloudflare", "quad9", "adguard", "cleanbrowsing"]),
    );
    routes
}
