use super::elapsed_days;
use crate::github::models::PullRequest;
use crate::github::{Platform, RepoRef};
use crate::types::report::Metric;
use crate::types::scoring::BucketLadder;
use tracing::warn;

/// Average creation-to-merge time of recently closed pull requests.
///
/// Fetch failures degrade to an `Error` metric instead of failing the report.
pub async fn pr_merge_time(
    platform: &dyn Platform,
    repo: &RepoRef,
    per_page: u32,
    ladder: &BucketLadder,
) -> Metric {
    match platform.closed_pulls(repo, per_page).await {
        Ok(pulls) => merge_time_metric(&pulls, ladder),
        Err(err) => {
            warn!(%repo, error = %err, "failed to calculate PR merge time");
            Metric::failed("Failed to calculate PR merge time")
        }
    }
}

pub fn merge_time_metric(pulls: &[PullRequest], ladder: &BucketLadder) -> Metric {
    let durations = pulls
        .iter()
        .filter_map(|pull| {
            pull.merged_at
                .map(|merged_at| elapsed_days(pull.created_at, merged_at))
        })
        .collect::<Vec<_>>();

    if durations.is_empty() {
        return Metric::not_available("No merged PRs found");
    }

    let avg_days = durations.iter().sum::<f64>() / durations.len() as f64;
    Metric::new(
        ladder.score(avg_days),
        format!("{avg_days:.1} days"),
        format!("Average time to merge PRs: {avg_days:.1} days"),
    )
}
