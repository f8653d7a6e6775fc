use crate::types::report::HealthReport;

pub fn to_markdown(report: &HealthReport) -> String {
    let mut output = String::new();
    output.push_str(&format!(
        "# Repository Health: {}/{}\n\n",
        report.repo_owner, report.repo_name
    ));
    output.push_str(&format!("Health score: {:.2}\n\n", report.health_score));
    output.push_str("## Metrics\n\n");
    output.push_str("| Metric | Score | Value | Description |\n");
    output.push_str("|---|---|---|---|\n");
    for (name, metric) in report.metrics.entries() {
        output.push_str(&format!(
            "| {} | {:.2} | {} | {} |\n",
            name, metric.score, metric.value, metric.description
        ));
    }
    output.push('\n');
    output.push_str(&format!(
        "Updated at: {}\n",
        report.updated_at.format("%Y-%m-%dT%H:%M:%SZ")
    ));
    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::fixtures::sample_report;

    #[test]
    fn markdown_report_contains_sections() {
        let rendered = to_markdown(&sample_report());
        assert!(rendered.contains("# Repository Health: octo/demo"));
        assert!(rendered.contains("Health score: 0.60"));
        assert!(rendered.contains("## Metrics"));
        assert!(rendered.contains("| prMergeTime | 0.00 | Error |"));
        assert!(rendered.contains("| contributorCount | 1.00 | 11/26 active |"));
        assert!(rendered.contains("Updated at: 2024-06-01T08:30:00Z"));
    }
}
