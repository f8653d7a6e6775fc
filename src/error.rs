use crate::github::PlatformError;
use std::time::Duration;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum HealthError {
    #[error("owner and repo parameters are required")]
    MissingParameters,

    #[error("repository not found: {0}")]
    RepositoryNotFound(String),

    #[error("GitHub API rate limit exceeded")]
    RateLimited,

    #[error("assessment timed out after {0:?}")]
    Timeout(Duration),

    #[error("failed to analyze repository health: {0}")]
    Upstream(String),

    #[error("config file not found: {0}")]
    ConfigNotFound(String),

    #[error("config parse error: {0}")]
    ConfigParse(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

impl HealthError {
    pub fn from_platform(err: PlatformError, slug: &str) -> Self {
        match err {
            PlatformError::NotFound => HealthError::RepositoryNotFound(slug.to_string()),
            PlatformError::RateLimited => HealthError::RateLimited,
            other => HealthError::Upstream(other.to_string()),
        }
    }

    /// Status a transport layer should answer with for this failure.
    pub fn http_status(&self) -> u16 {
        match self {
            HealthError::MissingParameters => 400,
            HealthError::RepositoryNotFound(_) => 404,
            HealthError::RateLimited => 429,
            HealthError::Timeout(_) => 504,
            _ => 500,
        }
    }
}

pub type Result<T> = std::result::Result<T, HealthError>;
