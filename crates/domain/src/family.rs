use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

pub const DEFAULT_FAMILY: &str = "freedom";
const PARANOIA_FAMILY: &str = "paranoia";

/// Resolution-policy variant requested by the client (e.g. `family`,
/// `freedom`, `paranoia`), derived from the request hostname.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Family(Arc<str>);

impl Family {
    pub fn new(name: &str) -> Self {
        Self(Arc::from(name.to_ascii_lowercase()))
    }

    pub fn freedom() -> Self {
        Self(Arc::from(DEFAULT_FAMILY))
    }

    /// Family named by a request hostname or route key: the first label when
    /// the name sits under `.<domain_suffix>`, otherwise `freedom`.
    pub fn from_hostname(hostname: &str, domain_suffix: &str) -> Self {
        let hostname = hostname.to_ascii_lowercase();
        let marker = format!(".{}", domain_suffix.to_ascii_lowercase());
        if !hostname.contains(&marker) {
            return Self::freedom();
        }
        match hostname.split('.').next() {
            Some(label) if !label.is_empty() => Self::new(label),
            _ => Self::freedom(),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The endpoint group this family is served from.
    ///
    /// This is the only place where family aliasing happens: `paranoia` is
    /// served by the `freedom` endpoints of every resolver.
    pub fn endpoint_group(&self) -> EndpointGroup {
        if self.as_str() == PARANOIA_FAMILY {
            EndpointGroup(Arc::from(DEFAULT_FAMILY))
        } else {
            EndpointGroup(Arc::clone(&self.0))
        }
    }
}

impl Default for Family {
    fn default() -> Self {
        Self::freedom()
    }
}

impl fmt::Display for Family {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Key into a resolver's family → endpoint map, after aliasing.
///
/// Only obtainable through [`Family::endpoint_group`] or configuration
/// keys, so lookups can never bypass the alias.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EndpointGroup(Arc<str>);

impl EndpointGroup {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EndpointGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Telemetry partition: staging traffic is kept apart from production.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Dataset {
    #[default]
    Prod,
    Dev,
}

impl Dataset {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Prod => "prod",
            Self::Dev => "dev",
        }
    }
}

impl fmt::Display for Dataset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
