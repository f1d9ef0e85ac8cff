use crate::family::Family;
use crate::telemetry::ErrorCategory;
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// Longest window a diagnostic report may cover, in hours
pub const MAX_REPORT_HOURS: u32 = 720;

/// Default report window, in hours
pub const DEFAULT_REPORT_HOURS: u32 = 24;

/// Diagnostic reports over windowed error telemetry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AnalyticsReport {
    /// Errors per provider, category and family
    ErrorRates,
    /// HTTP failures per provider and status
    HttpErrors,
    /// Errors per provider and family
    Reliability,
    /// Errors per provider and coarse issue bucket
    ErrorTypes,
    /// Total errors per provider
    CombinedHealth,
}

impl AnalyticsReport {
    pub const ALL: [AnalyticsReport; 5] = [
        AnalyticsReport::ErrorRates,
        AnalyticsReport::HttpErrors,
        AnalyticsReport::Reliability,
        AnalyticsReport::ErrorTypes,
        AnalyticsReport::CombinedHealth,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ErrorRates => "error-rates",
            Self::HttpErrors => "http-errors",
            Self::Reliability => "reliability",
            Self::ErrorTypes => "error-types",
            Self::CombinedHealth => "combined-health",
        }
    }

    pub fn names() -> Vec<&'static str> {
        Self::ALL.iter().map(|r| r.as_str()).collect()
    }

    /// Rolls breakdown cells up into this report's rows.
    ///
    /// Rows are ordered by count, highest first, except `error-types` which
    /// is ordered by provider and then count.
    pub fn build(&self, cells: &[ErrorBreakdown]) -> Vec<AnalyticsRow> {
        let mut groups: BTreeMap<AnalyticsRow, u64> = BTreeMap::new();

        for cell in cells {
            let key = match self {
                Self::ErrorRates => AnalyticsRow {
                    error_type: Some(cell.category.to_string()),
                    resolver_family: Some(cell.family.to_string()),
                    ..AnalyticsRow::provider(&cell.provider)
                },
                Self::HttpErrors => match cell.category.http_status() {
                    Some(status) => AnalyticsRow {
                        error_type: Some(cell.category.to_string()),
                        http_status: Some(status),
                        ..AnalyticsRow::provider(&cell.provider)
                    },
                    None => continue,
                },
                Self::Reliability => AnalyticsRow {
                    resolver_family: Some(cell.family.to_string()),
                    ..AnalyticsRow::provider(&cell.provider)
                },
                Self::ErrorTypes => AnalyticsRow {
                    issue_category: Some(cell.category.issue_label()),
                    ..AnalyticsRow::provider(&cell.provider)
                },
                Self::CombinedHealth => AnalyticsRow::provider(&cell.provider),
            };
            *groups.entry(key).or_insert(0) += cell.count;
        }

        let mut rows: Vec<AnalyticsRow> = groups
            .into_iter()
            .map(|(key, count)| AnalyticsRow { count, ..key })
            .collect();

        // Stable sort: ties stay in key order.
        match self {
            Self::ErrorTypes => rows.sort_by(|a, b| {
                a.provider
                    .cmp(&b.provider)
                    .then_with(|| b.count.cmp(&a.count))
            }),
            _ => rows.sort_by(|a, b| b.count.cmp(&a.count)),
        }
        rows
    }
}

impl FromStr for AnalyticsReport {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        Self::ALL
            .iter()
            .copied()
            .find(|r| r.as_str() == wanted)
            .ok_or_else(|| format!("Unknown report type: {}", s))
    }
}

impl fmt::Display for AnalyticsReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error count for one (provider, category, family) cell of a window.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorBreakdown {
    pub provider: String,
    pub category: ErrorCategory,
    pub family: Family,
    pub count: u64,
}

/// One report row. Dimensions the report does not group by are `None`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub struct AnalyticsRow {
    pub provider: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resolver_family: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub http_status: Option<u16>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub issue_category: Option<&'static str>,
    pub count: u64,
}

impl AnalyticsRow {
    fn provider(provider: &str) -> Self {
        Self {
            provider: provider.to_string(),
            error_type: None,
            resolver_family: None,
            http_status: None,
            issue_category: None,
            count: 0,
        }
    }
}
