pub mod codec;
pub mod dnssec;
pub mod forwarding;
pub mod normalizer;
pub mod transport;

pub use codec::HickoryCodec;
pub use dnssec::DnssecEnforcer;
pub use forwarding::MessageBuilder;
pub use normalizer::ResponseNormalizer;
pub use transport::HttpsTransport;
