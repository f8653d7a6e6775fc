use crate::error::HealthError;
use crate::types::report::HealthReport;
use serde_json::json;

pub fn to_json(report: &HealthReport) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(report)
}

/// Error body a transport layer can answer with.
pub fn error_body(err: &HealthError) -> serde_json::Value {
    match err {
        HealthError::MissingParameters => {
            json!({ "error": "Owner and repo parameters are required" })
        }
        HealthError::RepositoryNotFound(_) => json!({ "error": "Repository not found" }),
        HealthError::RateLimited => json!({ "error": "GitHub API rate limit exceeded" }),
        other => json!({
            "error": "Failed to analyze repository health",
            "message": other.to_string(),
        }),
    }
}
