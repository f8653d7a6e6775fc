pub mod contributors;
pub mod retry;

use crate::github::models::{ContributorStats, Issue, Repository, WeeklyCommits};
use crate::github::{Fetched, IssueQuery, IssueState, Platform, PlatformError, RepoRef};
use crate::types::config::FetchLimits;
use chrono::{DateTime, Duration, Utc};
use retry::RetryPolicy;
use tracing::{debug, warn};

/// Raw inputs the calculators consume, gathered once per assessment.
#[derive(Debug, Clone)]
pub struct RepoSnapshot {
    pub repository: Repository,
    pub commit_activity: Vec<WeeklyCommits>,
    pub contributors: Vec<ContributorStats>,
    pub open_issues: Vec<Issue>,
    pub closed_issues: Vec<Issue>,
}

/// Fetches repository metadata, then the independent activity signals concurrently.
///
/// Only not-found and rate-limit failures abort; any other failure of a single
/// signal leaves that signal empty.
pub async fn acquire(
    platform: &dyn Platform,
    repo: &RepoRef,
    limits: &FetchLimits,
    retry: &RetryPolicy,
    now: DateTime<Utc>,
) -> Result<RepoSnapshot, PlatformError> {
    let repository = platform.repository(repo).await?;

    let open_query = IssueQuery {
        state: IssueState::Open,
        since: None,
        per_page: limits.open_issue_limit,
    };
    let closed_query = IssueQuery {
        state: IssueState::Closed,
        since: Some(now - Duration::days(i64::from(limits.closed_issue_window_days))),
        per_page: limits.closed_issue_limit,
    };

    let (commit_activity, contributors, open_issues, closed_issues) = tokio::try_join!(
        commit_activity(platform, repo),
        async {
            Ok::<_, PlatformError>(contributors::fetch_contributors(platform, repo, retry).await)
        },
        async { soften("open issues", platform.issues(repo, &open_query).await) },
        async { soften("closed issues", platform.issues(repo, &closed_query).await) },
    )?;

    debug!(
        %repo,
        weeks = commit_activity.len(),
        contributors = contributors.len(),
        open_issues = open_issues.len(),
        closed_issues = closed_issues.len(),
        "acquired repository snapshot"
    );

    Ok(RepoSnapshot {
        repository,
        commit_activity,
        contributors,
        open_issues,
        closed_issues,
    })
}

async fn commit_activity(
    platform: &dyn Platform,
    repo: &RepoRef,
) -> Result<Vec<WeeklyCommits>, PlatformError> {
    let activity = platform
        .commit_activity(repo)
        .await
        .map(|fetched| match fetched {
            Fetched::Ready(weeks) => weeks,
            Fetched::Pending => {
                warn!(%repo, "commit activity still being computed, treating as empty");
                Vec::new()
            }
        });
    soften("commit activity", activity)
}

fn soften<T: Default>(signal: &str, result: Result<T, PlatformError>) -> Result<T, PlatformError> {
    match result {
        Ok(value) => Ok(value),
        Err(err) if err.is_hard() => Err(err),
        Err(err) => {
            warn!(signal, error = %err, "signal unavailable, continuing without it");
            Ok(T::default())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::github::stub::{issue, weeks, StubFailure, StubPlatform};
    use chrono::TimeZone;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 1, 0, 0, 0).unwrap()
    }

    fn quick_retry() -> RetryPolicy {
        RetryPolicy {
            max_attempts: 2,
            interval: std::time::Duration::from_millis(1),
            ..RetryPolicy::default()
        }
    }

    fn octo() -> RepoRef {
        RepoRef::new("octo", "demo")
    }

    #[tokio::test]
    async fn acquire_collects_all_signals() {
        let platform = StubPlatform {
            commit_activity: Some(weeks(&[1, 2, 3])),
            open_issues: vec![issue(now(), None, 0)],
            closed_issues: vec![issue(now(), Some(now()), 1)],
            ..Default::default()
        };

        let snapshot = acquire(&platform, &octo(), &FetchLimits::default(), &quick_retry(), now())
            .await
            .expect("acquisition should succeed");
        assert_eq!(snapshot.repository.name, "demo");
        assert_eq!(snapshot.commit_activity.len(), 3);
        assert_eq!(snapshot.open_issues.len(), 1);
        assert_eq!(snapshot.closed_issues.len(), 1);
        assert!(snapshot.contributors.is_empty());
    }

    #[tokio::test]
    async fn closed_issue_query_uses_trailing_window() {
        let platform = StubPlatform::default();
        acquire(&platform, &octo(), &FetchLimits::default(), &quick_retry(), now())
            .await
            .expect("acquisition should succeed");

        let queries = platform.issue_queries.lock().unwrap().clone();
        let open = queries
            .iter()
            .find(|query| query.state == IssueState::Open)
            .expect("open issues requested");
        let closed = queries
            .iter()
            .find(|query| query.state == IssueState::Closed)
            .expect("closed issues requested");
        assert_eq!(open.since, None);
        assert_eq!(open.per_page, 100);
        assert_eq!(
            closed.since,
            Some(Utc.with_ymd_and_hms(2024, 5, 2, 0, 0, 0).unwrap())
        );
        assert_eq!(closed.per_page, 100);
    }

    #[tokio::test]
    async fn pending_commit_activity_becomes_empty() {
        let platform = StubPlatform::default();
        let snapshot = acquire(&platform, &octo(), &FetchLimits::default(), &quick_retry(), now())
            .await
            .expect("acquisition should succeed");
        assert!(snapshot.commit_activity.is_empty());
    }

    #[tokio::test]
    async fn soft_issue_failure_degrades_to_empty() {
        let platform = StubPlatform {
            issue_failure: Some(StubFailure::Http(502)),
            commit_activity: Some(weeks(&[4])),
            ..Default::default()
        };
        let snapshot = acquire(&platform, &octo(), &FetchLimits::default(), &quick_retry(), now())
            .await
            .expect("acquisition should succeed");
        assert!(snapshot.open_issues.is_empty());
        assert!(snapshot.closed_issues.is_empty());
        assert_eq!(snapshot.commit_activity.len(), 1);
    }

    #[tokio::test]
    async fn rate_limit_on_any_signal_aborts() {
        let platform = StubPlatform {
            commit_failure: Some(StubFailure::RateLimited),
            ..Default::default()
        };
        let err = acquire(&platform, &octo(), &FetchLimits::default(), &quick_retry(), now())
            .await
            .expect_err("rate limit should abort");
        assert!(matches!(err, PlatformError::RateLimited));
    }

    #[tokio::test]
    async fn missing_repository_aborts_before_other_fetches() {
        let platform = StubPlatform {
            repository_failure: Some(StubFailure::NotFound),
            ..Default::default()
        };
        let err = acquire(&platform, &octo(), &FetchLimits::default(), &quick_retry(), now())
            .await
            .expect_err("not found should abort");
        assert!(matches!(err, PlatformError::NotFound));
        assert_eq!(platform.contributor_call_count(), 0);
        assert!(platform.issue_queries.lock().unwrap().is_empty());
    }
}
