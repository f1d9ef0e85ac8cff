pub mod dns_codec;
pub mod doh_transport;
pub mod kv_store;
pub mod telemetry;

pub use dns_codec::DnsCodec;
pub use doh_transport::{DohTransport, UpstreamReply};
pub use kv_store::KeyValueStore;
pub use telemetry::{TelemetryAggregate, TelemetrySink};
