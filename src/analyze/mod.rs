pub mod aggregate;
pub mod commits;
pub mod contributors;
pub mod docs;
pub mod issues;
pub mod pulls;

use crate::error::{HealthError, Result};
use crate::github::{Platform, RepoRef};
use crate::scan::retry::RetryPolicy;
use crate::types::config::{FetchLimits, HealthConfig};
use crate::types::report::{HealthReport, Metrics};
use crate::types::scoring::{Thresholds, WeightTable};
use chrono::{DateTime, Utc};
use std::time::Duration;
use tracing::info;

/// Immutable tables and limits one assessment runs with.
#[derive(Debug, Clone)]
pub struct EngineSettings {
    pub weights: WeightTable,
    pub thresholds: Thresholds,
    pub limits: FetchLimits,
    pub retry: RetryPolicy,
    pub request_timeout: Duration,
}

impl Default for EngineSettings {
    fn default() -> Self {
        Self::from_config(&HealthConfig::default())
    }
}

impl EngineSettings {
    pub fn from_config(config: &HealthConfig) -> Self {
        Self {
            weights: config.weights(),
            thresholds: Thresholds::default(),
            limits: config.fetch_limits(),
            retry: config.retry_policy(),
            request_timeout: config.request_timeout(),
        }
    }
}

pub(crate) fn elapsed_days(start: DateTime<Utc>, end: DateTime<Utc>) -> f64 {
    (end - start).num_milliseconds() as f64 / 86_400_000.0
}

pub fn validate_params(owner: &str, repo: &str) -> Result<RepoRef> {
    let (owner, repo) = (owner.trim(), repo.trim());
    if owner.is_empty() || repo.is_empty() {
        return Err(HealthError::MissingParameters);
    }
    Ok(RepoRef::new(owner, repo))
}

/// Scores `owner/repo` under the request deadline in `settings`.
pub async fn assess(
    platform: &dyn Platform,
    owner: &str,
    repo: &str,
    settings: &EngineSettings,
) -> Result<HealthReport> {
    let repo = validate_params(owner, repo)?;
    let deadline = settings.request_timeout;
    tokio::time::timeout(deadline, assess_at(platform, &repo, settings, Utc::now()))
        .await
        .map_err(|_| HealthError::Timeout(deadline))?
}

pub async fn assess_at(
    platform: &dyn Platform,
    repo: &RepoRef,
    settings: &EngineSettings,
    now: DateTime<Utc>,
) -> Result<HealthReport> {
    info!(%repo, "assessing repository health");
    let snapshot = crate::scan::acquire(platform, repo, &settings.limits, &settings.retry, now)
        .await
        .map_err(|err| HealthError::from_platform(err, &repo.to_string()))?;

    let thresholds = &settings.thresholds;
    let (pr_merge_time, documentation_score) = tokio::join!(
        pulls::pr_merge_time(
            platform,
            repo,
            settings.limits.pull_request_limit,
            &thresholds.merge_days
        ),
        docs::documentation_score(platform, repo),
    );

    let metrics = Metrics {
        issues_response_time: issues::issue_response_time(
            &snapshot.open_issues,
            &snapshot.closed_issues,
            &thresholds.response_days,
            now,
        ),
        pr_merge_time,
        commit_frequency: commits::commit_frequency(
            &snapshot.commit_activity,
            &thresholds.weekly_commits,
        ),
        contributor_count: contributors::contributor_activity(
            &snapshot.contributors,
            thresholds,
            now,
            settings.limits.active_window_months,
        ),
        issue_close_rate: issues::issue_close_rate(
            &snapshot.open_issues,
            &snapshot.closed_issues,
            &thresholds.close_rate,
        ),
        codebase_growth: commits::codebase_growth(
            &snapshot.commit_activity,
            &thresholds.total_commits,
        ),
        documentation_score,
    };

    let health_score = aggregate::health_score(&metrics, &settings.weights);
    info!(%repo, health_score, "assessment complete");

    Ok(HealthReport {
        repo_name: snapshot.repository.name,
        repo_owner: snapshot.repository.owner.login,
        health_score,
        metrics,
        updated_at: now,
    })
}
