use std::time::Duration;

use thiserror::Error;

/// Application-level constants
pub const APP_NAME: &str = "intake-forms";
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Environment variable overriding the backend base URL.
pub const API_URL_ENV: &str = "INTAKE_API_URL";
/// Environment variable overriding the submission timeout (seconds).
pub const SUBMIT_TIMEOUT_ENV: &str = "INTAKE_SUBMIT_TIMEOUT_SECS";

const DEFAULT_API_BASE_URL: &str = "http://localhost:3000/api";
const DEFAULT_SUBMIT_TIMEOUT_SECS: u64 = 30;

/// Log filter used when `RUST_LOG` is unset.
pub fn default_log_filter() -> &'static str {
    "info,intake_forms=debug"
}

#[derive(Error, Debug, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Invalid value for {var}: {value}")]
    InvalidValue { var: &'static str, value: String },
}

/// Runtime settings for form submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormsConfig {
    /// Base URL of the backend that creates users, patients and appointments.
    pub api_base_url: String,
    /// Upper bound on a single collaborator call.
    pub submit_timeout: Duration,
}

impl Default for FormsConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            submit_timeout: Duration::from_secs(DEFAULT_SUBMIT_TIMEOUT_SECS),
        }
    }
}

impl FormsConfig {
    /// Defaults overridden by `INTAKE_API_URL` / `INTAKE_SUBMIT_TIMEOUT_SECS`.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Some(url) = lookup(API_URL_ENV).filter(|u| !u.trim().is_empty()) {
            config.api_base_url = url.trim().trim_end_matches('/').to_string();
        }

        if let Some(raw) = lookup(SUBMIT_TIMEOUT_ENV) {
            let secs = raw
                .trim()
                .parse::<u64>()
                .ok()
                .filter(|s| *s > 0)
                .ok_or(ConfigError::InvalidValue {
                    var: SUBMIT_TIMEOUT_ENV,
                    value: raw.clone(),
                })?;
            config.submit_timeout = Duration::from_secs(secs);
        }

        Ok(config)
    }
}
