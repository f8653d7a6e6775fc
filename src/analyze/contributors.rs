use crate::github::models::ContributorStats;
use crate::types::report::Metric;
use crate::types::scoring::Thresholds;
use chrono::{DateTime, Duration, Months, Utc};

/// Start of the trailing window in which a commit makes a contributor active.
pub fn active_since(now: DateTime<Utc>, months: u32) -> DateTime<Utc> {
    now.checked_sub_months(Months::new(months))
        .unwrap_or_else(|| now - Duration::days(i64::from(months) * 30))
}

pub fn is_active(contributor: &ContributorStats, since: DateTime<Utc>) -> bool {
    let cutoff = since.timestamp();
    contributor
        .weeks
        .iter()
        .any(|week| week.w >= cutoff && week.c > 0)
}

pub fn contributor_activity(
    contributors: &[ContributorStats],
    thresholds: &Thresholds,
    now: DateTime<Utc>,
    active_window_months: u32,
) -> Metric {
    if contributors.is_empty() {
        return Metric::not_available("No contributor data available");
    }

    let since = active_since(now, active_window_months);
    let total = contributors.len();
    let active = contributors
        .iter()
        .filter(|contributor| is_active(contributor, since))
        .count();

    Metric::new(
        thresholds.contributor_score(total, active),
        format!("{active}/{total} active"),
        format!("{active} active out of {total} total contributors"),
    )
}
