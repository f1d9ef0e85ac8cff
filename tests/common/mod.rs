#![allow(dead_code)]

pub mod proxy;

pub use proxy::{ProxyHarness, ProxyResponse};
pub use upstream::{a_answer, client_query, MockUpstream, UpstreamBehavior};
