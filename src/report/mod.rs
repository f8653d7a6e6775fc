pub mod json;
pub mod md;

use crate::error::HealthError;
use crate::types::report::HealthReport;

#[derive(Debug, Clone, Copy)]
pub enum OutputFormat {
    Json,
    Md,
}

pub fn render(report: &HealthReport, format: OutputFormat) -> Result<String, HealthError> {
    match format {
        OutputFormat::Json => json::to_json(report).map_err(HealthError::Json),
        OutputFormat::Md => Ok(md::to_markdown(report)),
    }
}
