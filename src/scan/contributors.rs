use super::retry::RetryPolicy;
use crate::github::models::ContributorStats;
use crate::github::{Fetched, Platform, RepoRef};
use tracing::{debug, info, warn};

/// Contributor statistics, polling while the platform is still computing them.
///
/// Never fails: errors and an exhausted retry budget both yield an empty list.
pub async fn fetch_contributors(
    platform: &dyn Platform,
    repo: &RepoRef,
    policy: &RetryPolicy,
) -> Vec<ContributorStats> {
    for attempt in 1..=policy.max_attempts {
        match platform.contributor_stats(repo).await {
            Ok(Fetched::Ready(stats)) => {
                if stats.is_empty() {
                    info!(%repo, "no contributors found");
                }
                return stats;
            }
            Ok(Fetched::Pending) => {
                if policy.exhausted(attempt) {
                    break;
                }
                let wait = policy.delay_after(attempt);
                debug!(
                    %repo,
                    attempt,
                    wait_ms = wait.as_millis() as u64,
                    "contributor statistics pending, retrying"
                );
                tokio::time::sleep(wait).await;
            }
            Err(err) => {
                warn!(%repo, error = %err, "failed to fetch contributor statistics");
                return Vec::new();
            }
        }
    }

    warn!(
        %repo,
        attempts = policy.max_attempts,
        "contributor statistics still pending, continuing without them"
    );
    Vec::new()
}
