use chrono::{DateTime, Utc};
use serde::Deserialize;

/// Repository record from `GET /repos/{owner}/{repo}`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Repository {
    pub name: String,
    pub owner: Account,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Account {
    pub login: String,
}

/// One entry of `GET /repos/{owner}/{repo}/stats/commit_activity`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct WeeklyCommits {
    pub total: u64,
}

/// One contributor of `GET /repos/{owner}/{repo}/stats/contributors`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ContributorStats {
    #[serde(default)]
    pub weeks: Vec<ContributorWeek>,
}

#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct ContributorWeek {
    /// Unix timestamp of the week start.
    pub w: i64,
    /// Commits authored that week.
    #[serde(default)]
    pub c: u64,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Issue {
    pub created_at: DateTime<Utc>,
    pub closed_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub comments: u64,
    /// Present when the "issue" is really a pull request.
    pub pull_request: Option<serde_json::Value>,
}

impl Issue {
    pub fn is_pull_request(&self) -> bool {
        self.pull_request.is_some()
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct PullRequest {
    pub created_at: DateTime<Utc>,
    pub merged_at: Option<DateTime<Utc>>,
}

/// Entry of a `GET /repos/{owner}/{repo}/contents/` directory listing.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ContentEntry {
    pub name: String,
}
