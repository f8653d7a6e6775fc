use crate::types::report::Metrics;
use crate::types::scoring::{MetricName, Score, WeightTable};

pub fn health_score(metrics: &Metrics, weights: &WeightTable) -> Score {
    weighted_sum(
        metrics
            .entries()
            .into_iter()
            .map(|(name, metric)| (name, metric.score)),
        weights,
    )
}

/// Rounded weighted sum; non-finite scores contribute nothing.
pub fn weighted_sum(
    scores: impl IntoIterator<Item = (MetricName, Score)>,
    weights: &WeightTable,
) -> Score {
    let total = scores
        .into_iter()
        .filter(|(_, score)| score.is_finite())
        .map(|(name, score)| score * weights.weight(name))
        .sum::<Score>();
    round2(total)
}

pub fn round2(value: Score) -> Score {
    (value * 100.0).round() / 100.0
}
