use crate::error::HealthError;
use crate::scan::retry::{Backoff, RetryPolicy};
use crate::types::scoring::{MetricName, WeightTable};
use serde::Deserialize;
use std::collections::HashMap;
use std::time::Duration;

pub const DEFAULT_API_URL: &str = "https://api.github.com";

#[derive(Debug, Clone, Default, Deserialize)]
pub struct HealthConfig {
    pub api: Option<ApiConfig>,
    pub request: Option<RequestConfig>,
    pub retry: Option<RetryConfig>,
    pub fetch: Option<FetchConfig>,
    pub metrics: Option<MetricsConfig>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ApiConfig {
    #[serde(default = "default_api_url")]
    pub base_url: String,
    pub token: Option<String>,
    #[serde(default = "default_http_timeout")]
    pub timeout_secs: u64,
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_api_url(),
            token: None,
            timeout_secs: default_http_timeout(),
            user_agent: default_user_agent(),
        }
    }
}

fn default_api_url() -> String {
    DEFAULT_API_URL.to_string()
}

fn default_http_timeout() -> u64 {
    30
}

fn default_user_agent() -> String {
    concat!("repo-health/", env!("CARGO_PKG_VERSION")).to_string()
}

#[derive(Debug, Clone, Deserialize)]
pub struct RequestConfig {
    pub timeout_secs: Option<u64>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BackoffMode {
    Fixed,
    Exponential,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RetryConfig {
    pub max_attempts: Option<u32>,
    pub interval_ms: Option<u64>,
    pub backoff: Option<BackoffMode>,
    pub max_interval_ms: Option<u64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct FetchConfig {
    pub open_issue_limit: Option<u32>,
    pub closed_issue_limit: Option<u32>,
    pub closed_issue_window_days: Option<u32>,
    pub pull_request_limit: Option<u32>,
    pub active_window_months: Option<u32>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FetchLimits {
    pub open_issue_limit: u32,
    pub closed_issue_limit: u32,
    pub closed_issue_window_days: u32,
    pub pull_request_limit: u32,
    pub active_window_months: u32,
}

impl Default for FetchLimits {
    fn default() -> Self {
        Self {
            open_issue_limit: 100,
            closed_issue_limit: 100,
            closed_issue_window_days: 30,
            pull_request_limit: 30,
            active_window_months: 3,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct MetricsConfig {
    pub weights: Option<HashMap<String, f64>>,
}

impl HealthConfig {
    pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 120;

    pub fn api(&self) -> ApiConfig {
        self.api.clone().unwrap_or_default()
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(
            self.request
                .as_ref()
                .and_then(|request| request.timeout_secs)
                .unwrap_or(Self::DEFAULT_REQUEST_TIMEOUT_SECS),
        )
    }

    pub fn weights(&self) -> WeightTable {
        let mut table = WeightTable::default();
        if let Some(weights) = self
            .metrics
            .as_ref()
            .and_then(|metrics| metrics.weights.as_ref())
        {
            for (key, weight) in weights {
                if let Some(name) = MetricName::from_key(key) {
                    table.set(name, *weight);
                }
            }
        }
        table
    }

    pub fn retry_policy(&self) -> RetryPolicy {
        let defaults = RetryPolicy::default();
        match &self.retry {
            Some(retry) => RetryPolicy {
                max_attempts: retry.max_attempts.unwrap_or(defaults.max_attempts),
                interval: retry
                    .interval_ms
                    .map(Duration::from_millis)
                    .unwrap_or(defaults.interval),
                backoff: match retry.backoff {
                    Some(BackoffMode::Exponential) => Backoff::Exponential,
                    Some(BackoffMode::Fixed) => Backoff::Fixed,
                    None => defaults.backoff,
                },
                max_interval: retry
                    .max_interval_ms
                    .map(Duration::from_millis)
                    .unwrap_or(defaults.max_interval),
            },
            None => defaults,
        }
    }

    pub fn fetch_limits(&self) -> FetchLimits {
        let defaults = FetchLimits::default();
        match &self.fetch {
            Some(fetch) => FetchLimits {
                open_issue_limit: fetch.open_issue_limit.unwrap_or(defaults.open_issue_limit),
                closed_issue_limit: fetch
                    .closed_issue_limit
                    .unwrap_or(defaults.closed_issue_limit),
                closed_issue_window_days: fetch
                    .closed_issue_window_days
                    .unwrap_or(defaults.closed_issue_window_days),
                pull_request_limit: fetch
                    .pull_request_limit
                    .unwrap_or(defaults.pull_request_limit),
                active_window_months: fetch
                    .active_window_months
                    .unwrap_or(defaults.active_window_months),
            },
            None => defaults,
        }
    }

    pub fn validate(&self) -> Result<(), HealthError> {
        if let Some(weights) = self
            .metrics
            .as_ref()
            .and_then(|metrics| metrics.weights.as_ref())
        {
            let mut unknown = weights
                .keys()
                .filter(|key| MetricName::from_key(key).is_none())
                .cloned()
                .collect::<Vec<_>>();
            if !unknown.is_empty() {
                unknown.sort();
                return Err(HealthError::ConfigParse(format!(
                    "metrics.weights contains unknown key(s): {}",
                    unknown.join(", ")
                )));
            }
        }

        let weights = self.weights();
        if weights
            .entries()
            .iter()
            .any(|(_, weight)| !(0.0..=1.0).contains(weight))
        {
            return Err(HealthError::ConfigParse(
                "metrics.weights values must be between 0.0 and 1.0".to_string(),
            ));
        }
        let weight_sum = weights.sum();
        if (weight_sum - 1.0).abs() > 0.001 {
            return Err(HealthError::ConfigParse(format!(
                "metrics.weights must sum to 1.0 (found {:.3})",
                weight_sum
            )));
        }

        if self.api().timeout_secs == 0 {
            return Err(HealthError::ConfigParse(
                "api.timeout_secs must be greater than 0".to_string(),
            ));
        }
        if self.request_timeout().is_zero() {
            return Err(HealthError::ConfigParse(
                "request.timeout_secs must be greater than 0".to_string(),
            ));
        }

        if self.retry_policy().max_attempts == 0 {
            return Err(HealthError::ConfigParse(
                "retry.max_attempts must be greater than 0".to_string(),
            ));
        }

        let limits = self.fetch_limits();
        for (field, value) in [
            ("open_issue_limit", limits.open_issue_limit),
            ("closed_issue_limit", limits.closed_issue_limit),
            ("closed_issue_window_days", limits.closed_issue_window_days),
            ("pull_request_limit", limits.pull_request_limit),
            ("active_window_months", limits.active_window_months),
        ] {
            if value == 0 {
                return Err(HealthError::ConfigParse(format!(
                    "fetch.{field} must be greater than 0"
                )));
            }
        }
        if limits.open_issue_limit > 100
            || limits.closed_issue_limit > 100
            || limits.pull_request_limit > 100
        {
            return Err(HealthError::ConfigParse(
                "fetch page sizes cannot exceed 100".to_string(),
            ));
        }

        Ok(())
    }
}
