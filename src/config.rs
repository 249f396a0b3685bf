use std::time::Duration;

use crate::errors::{AppError, AppResult};

/// Local backend URL used during development.
pub const LOCAL_API_BASE_URL: &str = "http://localhost:8000";

/// Railway deployment serving the production backend.
pub const REMOTE_API_BASE_URL: &str = "https://railway-production-9c73.up.railway.app";

/// Fixed request timeout applied to every API and upload call.
pub const DEFAULT_API_TIMEOUT: Duration = Duration::from_secs(10);

pub const APP_NAME: &str = "CyberWise AI Advisor";
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuildMode {
    Development,
    Production,
}

impl BuildMode {
    /// Reads `APP_ENV`; unset or unrecognized values fall back to the
    /// compile-time profile.
    pub fn from_env() -> Self {
        match std::env::var("APP_ENV").as_deref() {
            Ok("development") => BuildMode::Development,
            Ok("production") => BuildMode::Production,
            Ok(other) => {
                log::warn!("Unrecognized APP_ENV value '{}', using build profile", other);
                Self::default_for_profile()
            }
            Err(_) => Self::default_for_profile(),
        }
    }

    fn default_for_profile() -> Self {
        if cfg!(debug_assertions) {
            BuildMode::Development
        } else {
            BuildMode::Production
        }
    }
}

/// Runtime environment for the API façade and upload transport.
///
/// Constructed explicitly and passed to the clients that need it; there is
/// no process-wide singleton.
#[derive(Debug, Clone)]
pub struct Environment {
    pub mode: BuildMode,
    pub api_base_url: String,
    pub api_timeout: Duration,
}

impl Environment {
    pub fn new(mode: BuildMode) -> Self {
        let api_base_url = match mode {
            BuildMode::Development => LOCAL_API_BASE_URL,
            BuildMode::Production => REMOTE_API_BASE_URL,
        };
        Self {
            mode,
            api_base_url: api_base_url.to_string(),
            api_timeout: DEFAULT_API_TIMEOUT,
        }
    }

    pub fn from_env() -> Self {
        Self::new(BuildMode::from_env())
    }

    /// Override the backend base URL (primarily for tests).
    pub fn with_base_url(mut self, base_url: &str) -> Self {
        self.api_base_url = base_url.trim_end_matches('/').to_string();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.api_timeout = timeout;
        self
    }

    pub fn is_dev(&self) -> bool {
        self.mode == BuildMode::Development
    }

    pub fn is_prod(&self) -> bool {
        self.mode == BuildMode::Production
    }

    pub fn validate(&self) -> AppResult<()> {
        if self.api_base_url.is_empty() {
            return Err(AppError::Config("API base URL cannot be empty".to_string()));
        }
        if !self.api_base_url.starts_with("http://") && !self.api_base_url.starts_with("https://") {
            return Err(AppError::Config(format!(
                "API base URL must be http(s): {}",
                self.api_base_url
            )));
        }
        if self.api_timeout.is_zero() {
            return Err(AppError::Config("API timeout must be greater than 0".to_string()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mode_selects_base_url() {
        let dev = Environment::new(BuildMode::Development);
        assert_eq!(dev.api_base_url, LOCAL_API_BASE_URL);
        assert!(dev.is_dev());
        assert!(!dev.is_prod());

        let prod = Environment::new(BuildMode::Production);
        assert_eq!(prod.api_base_url, REMOTE_API_BASE_URL);
        assert!(prod.is_prod());
    }

    #[test]
    fn base_url_override_strips_trailing_slash() {
        let env = Environment::new(BuildMode::Development).with_base_url("http://127.0.0.1:9999/");
        assert_eq!(env.api_base_url, "http://127.0.0.1:9999");
        assert!(env.validate().is_ok());
    }

    #[test]
    fn validate_rejects_bad_config() {
        let env = Environment::new(BuildMode::Development).with_base_url("");
        assert!(env.validate().is_err());

        let env = Environment::new(BuildMode::Development).with_base_url("ftp://example.com");
        assert!(env.validate().is_err());

        let env = Environment::new(BuildMode::Development).with_timeout(Duration::ZERO);
        assert!(env.validate().is_err());
    }
}
