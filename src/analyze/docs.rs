use crate::github::models::ContentEntry;
use crate::github::{Platform, RepoRef};
use crate::types::report::Metric;
use tracing::warn;

const README_NAMES: [&str; 3] = ["readme.md", "readme.markdown", "readme"];

pub async fn documentation_score(platform: &dyn Platform, repo: &RepoRef) -> Metric {
    match platform.root_contents(repo).await {
        Ok(entries) => readme_metric(&entries),
        Err(err) => {
            warn!(%repo, error = %err, "failed to calculate documentation score");
            Metric::failed("Failed to calculate documentation score")
        }
    }
}

/// Full credit for a root README; a missing one still earns half.
pub fn readme_metric(entries: &[ContentEntry]) -> Metric {
    let has_readme = entries
        .iter()
        .any(|entry| README_NAMES.contains(&entry.name.to_lowercase().as_str()));

    if has_readme {
        Metric::new(1.0, "README found", "The repository has a README file.")
    } else {
        Metric::new(
            0.5,
            "No README found",
            "The repository does not have a README file.",
        )
    }
}
