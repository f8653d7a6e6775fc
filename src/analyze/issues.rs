use super::elapsed_days;
use crate::github::models::Issue;
use crate::types::report::Metric;
use crate::types::scoring::BucketLadder;
use chrono::{DateTime, Utc};

/// Drops pull requests the issues endpoint reports alongside real issues.
pub fn real_issues(issues: &[Issue]) -> Vec<&Issue> {
    issues
        .iter()
        .filter(|issue| !issue.is_pull_request())
        .collect()
}

/// Average age of discussed issues: creation to close, or to `now` while open.
pub fn issue_response_time(
    open: &[Issue],
    closed: &[Issue],
    ladder: &BucketLadder,
    now: DateTime<Utc>,
) -> Metric {
    let durations = real_issues(open)
        .into_iter()
        .chain(real_issues(closed))
        .filter(|issue| issue.comments > 0)
        .map(|issue| elapsed_days(issue.created_at, issue.closed_at.unwrap_or(now)))
        .collect::<Vec<_>>();

    if durations.is_empty() {
        return Metric::not_available("No issues with responses found");
    }

    let avg_days = durations.iter().sum::<f64>() / durations.len() as f64;
    Metric::new(
        ladder.score(avg_days),
        format!("{avg_days:.1} days"),
        format!("Average time to respond to issues: {avg_days:.1} days"),
    )
}

pub fn issue_close_rate(open: &[Issue], closed: &[Issue], ladder: &BucketLadder) -> Metric {
    let open = real_issues(open);
    let closed = real_issues(closed);
    if open.is_empty() || closed.is_empty() {
        return Metric::not_available("No issues data available");
    }

    let rate = closed.len() as f64 / (open.len() + closed.len()) as f64;
    let percent = rate * 100.0;
    Metric::new(
        ladder.score(rate),
        format!("{percent:.1}%"),
        format!("Issue close rate: {percent:.1}%"),
    )
}
