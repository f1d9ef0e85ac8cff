use fastrand::Rng;
use mydns_domain::{Family, HealthScore, HealthScores, ResolverCatalog};
use std::sync::Arc;
use tracing::debug;

/// Picks up to `n` resolvers for one query, biased by endpoint health.
pub struct WeightedSelector {
    catalog: Arc<ResolverCatalog>,
}

impl WeightedSelector {
    pub fn new(catalog: Arc<ResolverCatalog>) -> Self {
        Self { catalog }
    }

    pub fn select(
        &self,
        candidates: &[Arc<str>],
        scores: &HealthScores,
        family: &Family,
        n: usize,
    ) -> Vec<Arc<str>> {
        self.select_with_rng(candidates, scores, family, n, &mut Rng::new())
    }

    /// Same as [`select`](Self::select) with caller-provided randomness.
    pub fn select_with_rng(
        &self,
        candidates: &[Arc<str>],
        scores: &HealthScores,
        family: &Family,
        n: usize,
        rng: &mut Rng,
    ) -> Vec<Arc<str>> {
        let group = family.endpoint_group();

        let mut unique: Vec<Arc<str>> = Vec::with_capacity(candidates.len());
        for id in candidates {
            if !unique.contains(id) {
                unique.push(Arc::clone(id));
            }
        }

        let weighted: Vec<(Arc<str>, u32)> = unique
            .iter()
            .map(|id| {
                let weight = match self.catalog.endpoint(id, &group) {
                    None => 0,
                    Some(endpoint) => scores
                        .get(&*endpoint.hostname)
                        .map(HealthScore::weight)
                        .unwrap_or(HealthScore::NEUTRAL_WEIGHT),
                };
                (Arc::clone(id), weight)
            })
            .collect();

        if weighted.iter().all(|(_, weight)| *weight == 0) {
            debug!(family = %family, "No weighted candidates, sampling uniformly");
            return sample_n(&unique, n, rng);
        }

        weighted_sample(&weighted, n, rng)
    }
}

/// Samples up to `n` distinct entries, each draw proportional to its weight.
/// Zero-weight entries are never picked.
pub fn weighted_sample<T: Clone>(pool: &[(T, u32)], n: usize, rng: &mut Rng) -> Vec<T> {
    let mut pool: Vec<(T, u64)> = pool
        .iter()
        .filter(|(_, weight)| *weight > 0)
        .map(|(item, weight)| (item.clone(), u64::from(*weight)))
        .collect();
    let mut total: u64 = pool.iter().map(|(_, weight)| weight).sum();
    let mut picked = Vec::with_capacity(n.min(pool.len()));

    while picked.len() < n && !pool.is_empty() && total > 0 {
        let draw = rng.u64(0..total);
        let mut cumulative = 0;
        let mut index = pool.len() - 1;
        for (i, (_, weight)) in pool.iter().enumerate() {
            cumulative += weight;
            if draw < cumulative {
                index = i;
                break;
            }
        }

        let (item, weight) = pool.remove(index);
        total -= weight;
        picked.push(item);
    }

    picked
}

/// Uniform sample of `min(n, items.len())` distinct entries.
pub fn sample_n<T: Clone>(items: &[T], n: usize, rng: &mut Rng) -> Vec<T> {
    let mut items = items.to_vec();
    let k = n.min(items.len());
    for i in 0..k {
        let j = rng.usize(i..items.len());
        items.swap(i, j);
    }
    items.truncate(k);
    items
}
