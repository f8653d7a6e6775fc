//! In-memory `Platform` used by engine tests.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};

use super::models::{
    Account, ContentEntry, ContributorStats, ContributorWeek, Issue, PullRequest, Repository,
    WeeklyCommits,
};
use super::{Fetched, IssueQuery, IssueState, Platform, PlatformError, RepoRef};

#[derive(Debug, Clone, Copy)]
pub enum StubFailure {
    NotFound,
    RateLimited,
    Http(u16),
}

impl StubFailure {
    fn into_error(self) -> PlatformError {
        match self {
            StubFailure::NotFound => PlatformError::NotFound,
            StubFailure::RateLimited => PlatformError::RateLimited,
            StubFailure::Http(status) => PlatformError::Http {
                status,
                body: "stub failure".to_string(),
            },
        }
    }
}

fn fail_or<T>(failure: Option<StubFailure>, value: impl FnOnce() -> T) -> Result<T, PlatformError> {
    match failure {
        Some(failure) => Err(failure.into_error()),
        None => Ok(value()),
    }
}

#[derive(Default)]
pub struct StubPlatform {
    pub repository_failure: Option<StubFailure>,
    /// `None` answers pending.
    pub commit_activity: Option<Vec<WeeklyCommits>>,
    pub commit_failure: Option<StubFailure>,
    /// Popped per call; once drained every call answers pending.
    pub contributor_responses: Mutex<VecDeque<Fetched<Vec<ContributorStats>>>>,
    pub contributor_failure: Option<StubFailure>,
    pub contributor_calls: AtomicU32,
    pub open_issues: Vec<Issue>,
    pub closed_issues: Vec<Issue>,
    pub issue_failure: Option<StubFailure>,
    pub issue_queries: Mutex<Vec<IssueQuery>>,
    pub pulls: Vec<PullRequest>,
    pub pulls_failure: Option<StubFailure>,
    pub contents: Vec<ContentEntry>,
    pub contents_failure: Option<StubFailure>,
}

impl StubPlatform {
    pub fn with_contributor_responses(
        responses: impl IntoIterator<Item = Fetched<Vec<ContributorStats>>>,
    ) -> Self {
        Self {
            contributor_responses: Mutex::new(responses.into_iter().collect()),
            ..Default::default()
        }
    }

    pub fn contributor_call_count(&self) -> u32 {
        self.contributor_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Platform for StubPlatform {
    async fn repository(&self, repo: &RepoRef) -> Result<Repository, PlatformError> {
        fail_or(self.repository_failure, || Repository {
            name: repo.name.clone(),
            owner: Account {
                login: repo.owner.clone(),
            },
        })
    }

    async fn commit_activity(
        &self,
        _repo: &RepoRef,
    ) -> Result<Fetched<Vec<WeeklyCommits>>, PlatformError> {
        fail_or(self.commit_failure, || match &self.commit_activity {
            Some(weeks) => Fetched::Ready(weeks.clone()),
            None => Fetched::Pending,
        })
    }

    async fn contributor_stats(
        &self,
        _repo: &RepoRef,
    ) -> Result<Fetched<Vec<ContributorStats>>, PlatformError> {
        self.contributor_calls.fetch_add(1, Ordering::SeqCst);
        let next = self
            .contributor_responses
            .lock()
            .expect("stub lock poisoned")
            .pop_front();
        fail_or(self.contributor_failure, || next.unwrap_or(Fetched::Pending))
    }

    async fn issues(
        &self,
        _repo: &RepoRef,
        query: &IssueQuery,
    ) -> Result<Vec<Issue>, PlatformError> {
        self.issue_queries
            .lock()
            .expect("stub lock poisoned")
            .push(query.clone());
        fail_or(self.issue_failure, || match query.state {
            IssueState::Open => self.open_issues.clone(),
            IssueState::Closed => self.closed_issues.clone(),
        })
    }

    async fn closed_pulls(
        &self,
        _repo: &RepoRef,
        per_page: u32,
    ) -> Result<Vec<PullRequest>, PlatformError> {
        fail_or(self.pulls_failure, || {
            self.pulls.iter().take(per_page as usize).cloned().collect()
        })
    }

    async fn root_contents(&self, _repo: &RepoRef) -> Result<Vec<ContentEntry>, PlatformError> {
        fail_or(self.contents_failure, || self.contents.clone())
    }
}

pub fn issue(created_at: DateTime<Utc>, closed_at: Option<DateTime<Utc>>, comments: u64) -> Issue {
    Issue {
        created_at,
        closed_at,
        comments,
        pull_request: None,
    }
}

pub fn pull_request_issue(created_at: DateTime<Utc>) -> Issue {
    Issue {
        pull_request: Some(serde_json::json!({ "url": "https://example.invalid" })),
        ..issue(created_at, None, 5)
    }
}

pub fn pull(created_at: DateTime<Utc>, merged_after: Option<Duration>) -> PullRequest {
    PullRequest {
        created_at,
        merged_at: merged_after.map(|elapsed| created_at + elapsed),
    }
}

pub fn weeks(totals: &[u64]) -> Vec<WeeklyCommits> {
    totals
        .iter()
        .map(|total| WeeklyCommits { total: *total })
        .collect()
}

/// Contributor whose commits all land in the week starting at `week`.
pub fn contributor(week: DateTime<Utc>, commits: u64) -> ContributorStats {
    ContributorStats {
        weeks: vec![ContributorWeek {
            w: week.timestamp(),
            c: commits,
        }],
    }
}

pub fn entry(name: &str) -> ContentEntry {
    ContentEntry {
        name: name.to_string(),
    }
}
