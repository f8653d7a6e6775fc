use crate::github::models::WeeklyCommits;
use crate::types::report::Metric;
use crate::types::scoring::BucketLadder;

fn total_commits(weeks: &[WeeklyCommits]) -> u64 {
    weeks.iter().map(|week| week.total).sum()
}

pub fn commit_frequency(weeks: &[WeeklyCommits], ladder: &BucketLadder) -> Metric {
    if weeks.is_empty() {
        return Metric::not_available("No commit activity data available");
    }

    let avg_weekly = total_commits(weeks) as f64 / weeks.len() as f64;
    Metric::new(
        ladder.score(avg_weekly),
        format!("{avg_weekly:.1} commits/week"),
        format!("Average weekly commits: {avg_weekly:.1}"),
    )
}

/// Commit volume over the activity window, used as a proxy for codebase growth.
pub fn codebase_growth(weeks: &[WeeklyCommits], ladder: &BucketLadder) -> Metric {
    if weeks.is_empty() {
        return Metric::not_available("No commit activity data available");
    }

    let total = total_commits(weeks);
    Metric::new(
        ladder.score(total as f64),
        format!("{total} commits"),
        format!("Total commits: {total}"),
    )
}
