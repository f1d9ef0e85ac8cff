use mydns_application::use_cases::AnalyticsResult;
use mydns_domain::AnalyticsRow;
use serde::{Deserialize, Serialize};

/// `GET /analytics` parameters. Values are taken as strings so that bad
/// input gets a JSON error body instead of a bare rejection.
#[derive(Deserialize, Debug, Default)]
pub struct AnalyticsParams {
    #[serde(rename = "type")]
    pub report: Option<String>,
    pub hours: Option<String>,
    pub dataset: Option<String>,
}

#[derive(Serialize, Debug, Clone)]
pub struct AnalyticsResponse {
    #[serde(rename = "type")]
    pub report: &'static str,
    pub dataset: &'static str,
    pub hours: u32,
    pub total_rows: usize,
    pub data: Vec<AnalyticsRow>,
}

impl From<AnalyticsResult> for AnalyticsResponse {
    fn from(result: AnalyticsResult) -> Self {
        Self {
            report: result.report.as_str(),
            dataset: result.dataset.as_str(),
            hours: result.hours,
            total_rows: result.rows.len(),
            data: result.rows,
        }
    }
}
