use crate::types::scoring::{MetricName, Score};
use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Serialize, Serializer};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Metric {
    pub score: Score,
    pub value: String,
    pub description: String,
}

impl Metric {
    pub fn new(score: Score, value: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            score,
            value: value.into(),
            description: description.into(),
        }
    }

    pub fn not_available(description: impl Into<String>) -> Self {
        Self::new(0.0, "N/A", description)
    }

    pub fn failed(description: impl Into<String>) -> Self {
        Self::new(0.0, "Error", description)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Metrics {
    pub issues_response_time: Metric,
    pub pr_merge_time: Metric,
    pub commit_frequency: Metric,
    pub contributor_count: Metric,
    pub issue_close_rate: Metric,
    pub codebase_growth: Metric,
    pub documentation_score: Metric,
}

impl Metrics {
    pub fn get(&self, name: MetricName) -> &Metric {
        match name {
            MetricName::IssuesResponseTime => &self.issues_response_time,
            MetricName::PrMergeTime => &self.pr_merge_time,
            MetricName::CommitFrequency => &self.commit_frequency,
            MetricName::ContributorCount => &self.contributor_count,
            MetricName::IssueCloseRate => &self.issue_close_rate,
            MetricName::CodebaseGrowth => &self.codebase_growth,
            MetricName::DocumentationScore => &self.documentation_score,
        }
    }

    pub fn entries(&self) -> [(MetricName, &Metric); 7] {
        MetricName::ALL.map(|name| (name, self.get(name)))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthReport {
    pub repo_name: String,
    pub repo_owner: String,
    pub health_score: Score,
    pub metrics: Metrics,
    #[serde(serialize_with = "iso8601")]
    pub updated_at: DateTime<Utc>,
}

fn iso8601<S: Serializer>(at: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&at.to_rfc3339_opts(SecondsFormat::Millis, true))
}
