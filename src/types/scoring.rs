use serde::Serialize;
use std::fmt;

pub type Score = f64;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MetricName {
    IssuesResponseTime,
    PrMergeTime,
    CommitFrequency,
    ContributorCount,
    IssueCloseRate,
    CodebaseGrowth,
    DocumentationScore,
}

impl MetricName {
    pub const ALL: [MetricName; 7] = [
        MetricName::IssuesResponseTime,
        MetricName::PrMergeTime,
        MetricName::CommitFrequency,
        MetricName::ContributorCount,
        MetricName::IssueCloseRate,
        MetricName::CodebaseGrowth,
        MetricName::DocumentationScore,
    ];

    /// Key used in the serialized report and in `[metrics.weights]`.
    pub fn key(self) -> &'static str {
        match self {
            MetricName::IssuesResponseTime => "issuesResponseTime",
            MetricName::PrMergeTime => "prMergeTime",
            MetricName::CommitFrequency => "commitFrequency",
            MetricName::ContributorCount => "contributorCount",
            MetricName::IssueCloseRate => "issueCloseRate",
            MetricName::CodebaseGrowth => "codebaseGrowth",
            MetricName::DocumentationScore => "documentationScore",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|name| name.key() == key)
    }
}

impl fmt::Display for MetricName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WeightTable {
    pub issues_response_time: Score,
    pub pr_merge_time: Score,
    pub commit_frequency: Score,
    pub contributor_count: Score,
    pub issue_close_rate: Score,
    pub codebase_growth: Score,
    pub documentation_score: Score,
}

impl Default for WeightTable {
    fn default() -> Self {
        Self {
            issues_response_time: 0.15,
            pr_merge_time: 0.15,
            commit_frequency: 0.20,
            contributor_count: 0.10,
            issue_close_rate: 0.15,
            codebase_growth: 0.10,
            documentation_score: 0.15,
        }
    }
}

impl WeightTable {
    pub fn weight(&self, name: MetricName) -> Score {
        match name {
            MetricName::IssuesResponseTime => self.issues_response_time,
            MetricName::PrMergeTime => self.pr_merge_time,
            MetricName::CommitFrequency => self.commit_frequency,
            MetricName::ContributorCount => self.contributor_count,
            MetricName::IssueCloseRate => self.issue_close_rate,
            MetricName::CodebaseGrowth => self.codebase_growth,
            MetricName::DocumentationScore => self.documentation_score,
        }
    }

    pub fn set(&mut self, name: MetricName, weight: Score) {
        let slot = match name {
            MetricName::IssuesResponseTime => &mut self.issues_response_time,
            MetricName::PrMergeTime => &mut self.pr_merge_time,
            MetricName::CommitFrequency => &mut self.commit_frequency,
            MetricName::ContributorCount => &mut self.contributor_count,
            MetricName::IssueCloseRate => &mut self.issue_close_rate,
            MetricName::CodebaseGrowth => &mut self.codebase_growth,
            MetricName::DocumentationScore => &mut self.documentation_score,
        };
        *slot = weight;
    }

    pub fn entries(&self) -> [(MetricName, Score); 7] {
        MetricName::ALL.map(|name| (name, self.weight(name)))
    }

    pub fn sum(&self) -> Score {
        self.entries().iter().map(|(_, weight)| weight).sum()
    }
}

/// Lower or upper bound a raw magnitude must satisfy for a step to apply.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Bound {
    AtMost(f64),
    AtLeast(f64),
    Above(f64),
}

impl Bound {
    fn admits(self, value: f64) -> bool {
        match self {
            Bound::AtMost(limit) => value <= limit,
            Bound::AtLeast(limit) => value >= limit,
            Bound::Above(limit) => value > limit,
        }
    }
}

/// Monotonic step function: the first step whose bound admits the value wins.
#[derive(Debug, Clone, PartialEq)]
pub struct BucketLadder {
    steps: Vec<(Bound, Score)>,
    fallback: Score,
}

impl BucketLadder {
    pub fn new(steps: Vec<(Bound, Score)>, fallback: Score) -> Self {
        Self { steps, fallback }
    }

    pub fn score(&self, value: f64) -> Score {
        self.steps
            .iter()
            .find(|(bound, _)| bound.admits(value))
            .map(|(_, score)| *score)
            .unwrap_or(self.fallback)
    }

    /// Elapsed-days ladder shared by issue response and PR merge time.
    pub fn elapsed_days() -> Self {
        Self::new(
            vec![
                (Bound::AtMost(1.0), 1.0),
                (Bound::AtMost(3.0), 0.8),
                (Bound::AtMost(7.0), 0.6),
                (Bound::AtMost(14.0), 0.4),
                (Bound::AtMost(30.0), 0.2),
            ],
            0.0,
        )
    }

    pub fn weekly_commits() -> Self {
        Self::new(
            vec![
                (Bound::AtLeast(20.0), 1.0),
                (Bound::AtLeast(10.0), 0.8),
                (Bound::AtLeast(5.0), 0.6),
                (Bound::AtLeast(1.0), 0.4),
                (Bound::Above(0.0), 0.2),
            ],
            0.0,
        )
    }

    pub fn close_rate() -> Self {
        Self::new(
            vec![
                (Bound::AtLeast(0.9), 1.0),
                (Bound::AtLeast(0.7), 0.8),
                (Bound::AtLeast(0.5), 0.6),
                (Bound::AtLeast(0.3), 0.4),
            ],
            0.2,
        )
    }

    pub fn total_commits() -> Self {
        Self::new(
            vec![
                (Bound::AtLeast(100.0), 1.0),
                (Bound::AtLeast(50.0), 0.8),
                (Bound::AtLeast(20.0), 0.6),
                (Bound::AtLeast(10.0), 0.4),
                (Bound::Above(0.0), 0.2),
            ],
            0.0,
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ContributorTier {
    pub min_total: usize,
    pub min_active: usize,
    pub score: Score,
}

/// Every ladder the calculators consult, built once and shared read-only.
#[derive(Debug, Clone, PartialEq)]
pub struct Thresholds {
    pub response_days: BucketLadder,
    pub merge_days: BucketLadder,
    pub weekly_commits: BucketLadder,
    pub close_rate: BucketLadder,
    pub total_commits: BucketLadder,
    pub contributor_tiers: Vec<ContributorTier>,
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            response_days: BucketLadder::elapsed_days(),
            merge_days: BucketLadder::elapsed_days(),
            weekly_commits: BucketLadder::weekly_commits(),
            close_rate: BucketLadder::close_rate(),
            total_commits: BucketLadder::total_commits(),
            contributor_tiers: vec![
                ContributorTier {
                    min_total: 20,
                    min_active: 10,
                    score: 1.0,
                },
                ContributorTier {
                    min_total: 10,
                    min_active: 5,
                    score: 0.8,
                },
                ContributorTier {
                    min_total: 5,
                    min_active: 3,
                    score: 0.6,
                },
                ContributorTier {
                    min_total: 3,
                    min_active: 1,
                    score: 0.4,
                },
                ContributorTier {
                    min_total: 2,
                    min_active: 0,
                    score: 0.2,
                },
            ],
        }
    }
}

impl Thresholds {
    pub fn contributor_score(&self, total: usize, active: usize) -> Score {
        self.contributor_tiers
            .iter()
            .find(|tier| total >= tier.min_total && active >= tier.min_active)
            .map(|tier| tier.score)
            .unwrap_or(0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_weights_sum_to_one() {
        assert!((WeightTable::default().sum() - 1.0).abs() < 1e-9);
    }

    #[test]
    fn metric_keys_round_trip() {
        for name in MetricName::ALL {
            assert_eq!(MetricName::from_key(name.key()), Some(name));
        }
        assert_eq!(MetricName::from_key("stars"), None);
    }

    #[test]
    fn elapsed_days_boundaries_are_inclusive() {
        let ladder = BucketLadder::elapsed_days();
        assert_eq!(ladder.score(1.0), 1.0);
        assert_eq!(ladder.score(1.000_000_1), 0.8);
        assert_eq!(ladder.score(30.0), 0.2);
        assert_eq!(ladder.score(30.0001), 0.0);
    }

    #[test]
    fn weekly_commit_ladder_distinguishes_zero_from_trickle() {
        let ladder = BucketLadder::weekly_commits();
        assert_eq!(ladder.score(0.0), 0.0);
        assert_eq!(ladder.score(0.1), 0.2);
        assert_eq!(ladder.score(1.0), 0.4);
        assert_eq!(ladder.score(20.0), 1.0);
    }

    #[test]
    fn close_rate_never_drops_below_floor() {
        let ladder = BucketLadder::close_rate();
        assert_eq!(ladder.score(0.0), 0.2);
        assert_eq!(ladder.score(0.9), 1.0);
    }

    #[test]
    fn contributor_tiers_require_both_thresholds() {
        let thresholds = Thresholds::default();
        assert_eq!(thresholds.contributor_score(26, 11), 1.0);
        assert_eq!(thresholds.contributor_score(26, 9), 0.8);
        assert_eq!(thresholds.contributor_score(3, 0), 0.2);
        assert_eq!(thresholds.contributor_score(2, 0), 0.2);
        assert_eq!(thresholds.contributor_score(1, 1), 0.0);
    }

    #[test]
    fn weight_table_set_overrides_single_entry() {
        let mut table = WeightTable::default();
        table.set(MetricName::CodebaseGrowth, 0.05);
        assert_eq!(table.weight(MetricName::CodebaseGrowth), 0.05);
        assert_eq!(table.weight(MetricName::CommitFrequency), 0.20);
    }
}
