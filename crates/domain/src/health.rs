use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;

/// Synthetic 1–100 reliability estimate of one upstream endpoint.
///
/// Never 0: a degraded provider keeps a nonzero selection probability and can
/// recover once its error rate drops.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct HealthScore(u8);

impl HealthScore {
    pub const MIN: u8 = 1;
    pub const MAX: u8 = 100;

    /// Weight used at selection time for endpoints without a stored score.
    pub const NEUTRAL_WEIGHT: u32 = 50;

    pub fn new(value: i64) -> Self {
        Self(value.clamp(Self::MIN as i64, Self::MAX as i64) as u8)
    }

    pub fn perfect() -> Self {
        Self(Self::MAX)
    }

    /// Score for an endpoint with `errors` failures out of
    /// `errors + successes` observed requests, or `None` when nothing was
    /// observed.
    pub fn from_counts(errors: u64, successes: u64) -> Option<Self> {
        let total = errors + successes;
        if total == 0 {
            return None;
        }
        let error_rate = errors as f64 / total as f64;
        Some(Self::new((100.0 * (1.0 - error_rate)).round() as i64))
    }

    pub fn value(&self) -> u8 {
        self.0
    }

    pub fn weight(&self) -> u32 {
        self.0 as u32
    }
}

impl<'de> Deserialize<'de> for HealthScore {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = i64::deserialize(deserializer)?;
        Ok(Self::new(raw))
    }
}

/// Endpoint hostname → health score, stored and replaced as a single blob.
pub type HealthScores = BTreeMap<String, HealthScore>;
