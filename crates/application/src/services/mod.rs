pub mod health_store;
pub mod hostname_router;
pub mod query_dispatcher;
pub mod weighted_selector;

pub use health_store::HealthStore;
pub use hostname_router::{HostnameRouter, RouteContext};
pub use query_dispatcher::{DispatchContext, QueryDispatcher, UpstreamAnswer};
pub use weighted_selector::{sample_n, weighted_sample, WeightedSelector};
