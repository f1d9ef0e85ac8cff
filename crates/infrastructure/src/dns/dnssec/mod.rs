pub mod enforcer;

pub use enforcer::{DnssecEnforcer, ENFORCED_PAYLOAD};
