//! MyDNS Infrastructure Layer
pub mod dns;
pub mod storage;
pub mod telemetry;
