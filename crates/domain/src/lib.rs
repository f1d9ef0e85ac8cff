//! MyDNS Domain Layer
pub mod analytics;
pub mod config;
pub mod dns_record;
pub mod dns_response;
pub mod errors;
pub mod family;
pub mod health;
pub mod resolver;
pub mod telemetry;

pub use analytics::{AnalyticsReport, AnalyticsRow, ErrorBreakdown};
pub use config::{CliOverrides, Config, ConfigError};
pub use dns_record::RecordType;
pub use dns_response::{NormalizedQuestion, NormalizedRecord, NormalizedResponse};
pub use errors::DomainError;
pub use family::{Dataset, EndpointGroup, Family, DEFAULT_FAMILY};
pub use health::{HealthScore, HealthScores};
pub use resolver::{Endpoint, ResolverCatalog, ResolverDescriptor};
pub use telemetry::{ErrorCategory, ErrorEvent, ProviderCount, TelemetryEvent, UsageEvent};
