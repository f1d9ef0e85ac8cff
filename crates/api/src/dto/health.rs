use mydns_application::use_cases::HealthSnapshot;
use serde::{Deserialize, Serialize};

#[derive(Deserialize, Debug, Default)]
pub struct HealthScoresParams {
    pub family: Option<String>,
}

#[derive(Serialize, Debug, Clone)]
pub struct ProviderScore {
    pub provider: String,
    pub health_score: u8,
}

#[derive(Serialize, Debug, Clone)]
pub struct HealthScoresResponse {
    pub family: String,
    pub last_updated: String,
    pub total_providers: usize,
    pub data: Vec<ProviderScore>,
}

impl From<HealthSnapshot> for HealthScoresResponse {
    fn from(snapshot: HealthSnapshot) -> Self {
        let data: Vec<ProviderScore> = snapshot
            .providers
            .into_iter()
            .map(|p| ProviderScore {
                provider: p.provider,
                health_score: p.health_score,
            })
            .collect();

        Self {
            family: snapshot.family.to_string(),
            last_updated: snapshot.last_updated.to_rfc3339(),
            total_providers: data.len(),
            data,
        }
    }
}
