use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Dashboard summary returned by `GET /api/v1/dashboard`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComplianceData {
    pub overall_score: f64,
    pub total_checks: u32,
    pub passing: u32,
    pub failing: u32,
    pub warnings: u32,
    pub frameworks: Vec<FrameworkSummary>,
    pub last_scan: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FrameworkSummary {
    pub name: String,
    pub score: f64,
    pub passing: u32,
    pub failing: u32,
}

/// AI-generated recommendations returned by `GET /api/v1/ai-insights`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AiInsights {
    pub summary: String,
    pub risk_level: String,
    pub recommendations: Vec<Recommendation>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recommendation {
    pub title: String,
    pub description: String,
    pub severity: String,
    pub framework: String,
}

/// One compliance check record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComplianceCheck {
    pub id: String,
    pub framework: String,
    pub provider: String,
    pub severity: String,
    pub status: String,
    pub title: String,
    pub description: String,
    pub resource: String,
    pub last_checked: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScanRequest {
    pub providers: Vec<String>,
    pub frameworks: Vec<String>,
    #[serde(default)]
    pub resources: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScanResult {
    pub scan_id: String,
    pub status: String,
    pub started_at: DateTime<Utc>,
    pub completed_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub checks: Vec<ComplianceCheck>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FrameworkMetrics {
    pub total_checks: u32,
    pub passing: u32,
    pub failing: u32,
    pub average_score: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProviderData {
    pub total_resources: u32,
    pub compliant_resources: u32,
    pub critical_issues: u32,
    #[serde(default)]
    pub recent_scans: Vec<ComplianceCheck>,
}

/// Optional filters for the checks listing.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CheckFilters {
    pub framework: Option<String>,
    pub provider: Option<String>,
    pub severity: Option<String>,
}

impl CheckFilters {
    /// Query pairs in a fixed order: framework, provider, severity.
    /// Empty values are skipped entirely.
    pub fn to_query(&self) -> Vec<(&'static str, String)> {
        let mut params = Vec::new();
        for (key, value) in [
            ("framework", &self.framework),
            ("provider", &self.provider),
            ("severity", &self.severity),
        ] {
            if let Some(value) = value {
                if !value.is_empty() {
                    params.push((key, value.clone()));
                }
            }
        }
        params
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn filters_keep_declaration_order() {
        let filters = CheckFilters {
            framework: Some("SOC2".to_string()),
            provider: Some("AWS".to_string()),
            severity: Some("critical".to_string()),
        };
        assert_eq!(
            filters.to_query(),
            vec![
                ("framework", "SOC2".to_string()),
                ("provider", "AWS".to_string()),
                ("severity", "critical".to_string()),
            ]
        );
    }

    #[test]
    fn filters_skip_empty_fields() {
        let filters = CheckFilters {
            framework: None,
            provider: Some(String::new()),
            severity: Some("high".to_string()),
        };
        assert_eq!(filters.to_query(), vec![("severity", "high".to_string())]);
        assert!(CheckFilters::default().to_query().is_empty());
    }
}
