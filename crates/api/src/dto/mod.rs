pub mod analytics;
pub mod dns_query;
pub mod health;
pub mod providers;

pub use analytics::{AnalyticsParams, AnalyticsResponse};
pub use dns_query::{DnsQueryParams, ErrorResponse};
pub use health::{HealthScoresParams, HealthScoresResponse, ProviderScore};
pub use providers::ProvidersResponse;
