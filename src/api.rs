//! Typed façade over the compliance backend REST API.
//!
//! Every operation declares one of three failure policies:
//!
//! - **mock fallback**: any failure is logged and replaced with the static
//!   value from [`crate::mock_data`] (dashboard, AI insights);
//! - **opaque re-signal**: the cause is logged and replaced with
//!   [`AppError::Api`] (checks, scans, metrics, provider data, statistics);
//! - **default list**: failures fall back to a hardcoded short list
//!   (frameworks, providers).

use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::Deserialize;

use crate::config::Environment;
use crate::errors::{AppError, AppResult};
use crate::mock_data;
use crate::types::{
    AiInsights, CheckFilters, ComplianceCheck, ComplianceData, FrameworkMetrics, ProviderData,
    ScanRequest, ScanResult,
};

#[derive(Deserialize)]
struct FrameworkList {
    frameworks: Vec<String>,
}

#[derive(Deserialize)]
struct ProviderList {
    providers: Vec<String>,
}

/// API client for the compliance backend.
///
/// Constructed explicitly from an [`Environment`] and passed to callers;
/// substituting a test backend only requires a different base URL.
pub struct ComplianceClient {
    http: Client,
    base_url: String,
}

impl ComplianceClient {
    pub fn new(env: &Environment) -> AppResult<Self> {
        env.validate()?;
        let http = Client::builder().timeout(env.api_timeout).build()?;
        Ok(Self {
            http,
            base_url: format!("{}/api/v1", env.api_base_url),
        })
    }

    /// Dashboard summary. Policy: mock fallback.
    pub async fn dashboard_data(&self) -> ComplianceData {
        match self.get_json("/dashboard", &[]).await {
            Ok(data) => data,
            Err(e) => {
                log::warn!("Compliance dashboard API not available, using mock data: {}", e);
                mock_data::dashboard()
            }
        }
    }

    /// AI insights and recommendations. Policy: mock fallback.
    pub async fn ai_insights(&self) -> AiInsights {
        match self.get_json("/ai-insights", &[]).await {
            Ok(data) => data,
            Err(e) => {
                log::warn!("AI insights API not available, using mock data: {}", e);
                mock_data::ai_insights()
            }
        }
    }

    /// Compliance checks with optional filters. Policy: opaque re-signal.
    pub async fn compliance_checks(
        &self,
        filters: &CheckFilters,
    ) -> AppResult<Vec<ComplianceCheck>> {
        self.get_json("/checks", &filters.to_query())
            .await
            .map_err(|e| resignal("compliance checks", "Failed to load compliance checks", e))
    }

    /// Submit a scan over the given resources. Policy: opaque re-signal.
    pub async fn perform_scan(&self, request: &ScanRequest) -> AppResult<ScanResult> {
        let url = format!("{}/scan", self.base_url);
        let result = async {
            let response = self.http.post(&url).json(request).send().await?;
            Self::decode(response).await
        }
        .await;
        result.map_err(|e| resignal("compliance scan", "Failed to perform compliance scan", e))
    }

    /// Look up a prior scan by id. Policy: opaque re-signal.
    pub async fn scan_results(&self, scan_id: &str) -> AppResult<ScanResult> {
        self.get_json(&format!("/scan/{}", scan_id), &[])
            .await
            .map_err(|e| resignal("scan results", "Failed to load scan results", e))
    }

    /// Per-framework metrics. Policy: opaque re-signal.
    pub async fn framework_metrics(&self, framework: &str) -> AppResult<FrameworkMetrics> {
        self.get_json(&format!("/frameworks/{}/metrics", framework), &[])
            .await
            .map_err(|e| resignal("framework metrics", "Failed to load framework metrics", e))
    }

    /// Provider-specific compliance data. Policy: opaque re-signal.
    pub async fn provider_data(&self, provider: &str) -> AppResult<ProviderData> {
        self.get_json(&format!("/providers/{}", provider), &[])
            .await
            .map_err(|e| resignal("provider data", "Failed to load provider data", e))
    }

    /// Available frameworks. Policy: default list.
    pub async fn frameworks(&self) -> Vec<String> {
        match self.get_json::<FrameworkList>("/frameworks", &[]).await {
            Ok(list) => list.frameworks,
            Err(e) => {
                log::error!("Failed to fetch frameworks: {}", e);
                mock_data::default_frameworks()
            }
        }
    }

    /// Available providers. Policy: default list.
    pub async fn providers(&self) -> Vec<String> {
        match self.get_json::<ProviderList>("/providers", &[]).await {
            Ok(list) => list.providers,
            Err(e) => {
                log::error!("Failed to fetch providers: {}", e);
                mock_data::default_providers()
            }
        }
    }

    /// Detailed statistics, shape left to the backend. Policy: opaque
    /// re-signal.
    pub async fn statistics(&self) -> AppResult<serde_json::Value> {
        self.get_json("/statistics", &[])
            .await
            .map_err(|e| resignal("statistics", "Failed to load statistics", e))
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> AppResult<T> {
        let url = format!("{}{}", self.base_url, path);
        let mut request = self.http.get(&url);
        if !query.is_empty() {
            request = request.query(query);
        }
        let response = request.send().await?;
        Self::decode(response).await
    }

    async fn decode<T: DeserializeOwned>(response: reqwest::Response) -> AppResult<T> {
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::server(status.as_u16(), body));
        }
        let text = response.text().await?;
        Ok(serde_json::from_str(&text)?)
    }
}

/// Opaque re-signal: log the original cause, hand the caller a generic
/// operation-level error.
fn resignal(operation: &str, message: &str, cause: AppError) -> AppError {
    log::error!("Failed to fetch {}: {}", operation, cause);
    AppError::api(message)
}
