pub mod client;
pub mod models;
#[cfg(test)]
pub mod stub;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use models::{ContentEntry, ContributorStats, Issue, PullRequest, Repository, WeeklyCommits};
use std::fmt;

pub use client::GitHubClient;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepoRef {
    pub owner: String,
    pub name: String,
}

impl RepoRef {
    pub fn new(owner: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            owner: owner.into(),
            name: name.into(),
        }
    }
}

impl fmt::Display for RepoRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.owner, self.name)
    }
}

/// Answer of a statistics endpoint that may still be computing.
#[derive(Debug, Clone, PartialEq)]
pub enum Fetched<T> {
    Ready(T),
    Pending,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IssueState {
    Open,
    Closed,
}

impl IssueState {
    pub fn as_str(self) -> &'static str {
        match self {
            IssueState::Open => "open",
            IssueState::Closed => "closed",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct IssueQuery {
    pub state: IssueState,
    pub since: Option<DateTime<Utc>>,
    pub per_page: u32,
}

#[derive(Debug, thiserror::Error)]
pub enum PlatformError {
    #[error("resource not found")]
    NotFound,

    #[error("API rate limit exceeded")]
    RateLimited,

    #[error("HTTP {status}: {body}")]
    Http { status: u16, body: String },

    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),
}

impl PlatformError {
    /// Failures that doom the whole request rather than a single signal.
    pub fn is_hard(&self) -> bool {
        matches!(self, PlatformError::NotFound | PlatformError::RateLimited)
    }
}

/// Read-only view of the hosting platform the engine scores against.
#[async_trait]
pub trait Platform: Send + Sync {
    async fn repository(&self, repo: &RepoRef) -> Result<Repository, PlatformError>;

    async fn commit_activity(
        &self,
        repo: &RepoRef,
    ) -> Result<Fetched<Vec<WeeklyCommits>>, PlatformError>;

    async fn contributor_stats(
        &self,
        repo: &RepoRef,
    ) -> Result<Fetched<Vec<ContributorStats>>, PlatformError>;

    async fn issues(&self, repo: &RepoRef, query: &IssueQuery)
        -> Result<Vec<Issue>, PlatformError>;

    /// Most recently updated closed pull requests, newest first.
    async fn closed_pulls(
        &self,
        repo: &RepoRef,
        per_page: u32,
    ) -> Result<Vec<PullRequest>, PlatformError>;

    async fn root_contents(&self, repo: &RepoRef) -> Result<Vec<ContentEntry>, PlatformError>;
}
