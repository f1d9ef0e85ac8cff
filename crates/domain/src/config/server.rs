use serde::{Deserialize, Serialize};

/// HTTP listener and hostname routing settings
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    #[serde(default = "default_bind_address")]
    pub bind_address: String,

    #[serde(default = "default_port")]
    pub port: u16,

    /// Proxy domain; `<family>.<domain_suffix>` selects a resolver family
    #[serde(default = "default_domain_suffix")]
    pub domain_suffix: String,

    /// Staging hostnames (`<family>.<staging_suffix>`) share production routes
    #[serde(default = "default_staging_suffix")]
    pub staging_suffix: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_address: default_bind_address(),
            port: default_port(),
            domain_suffix: default_domain_suffix(),
            staging_suffix: default_staging_suffix(),
        }
    }
}

fn default_bind_address() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_domain_suffix() -> String {
    "mydns.network".to_string()
}

fn default_staging_suffix() -> String {
    "staging.mydns.network".to_string()
}
