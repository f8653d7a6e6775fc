mod analyze;
mod cli;
mod config;
mod error;
mod github;
mod logging;
mod report;
mod scan;
mod types;

use crate::analyze::EngineSettings;
use crate::error::HealthError;
use crate::github::GitHubClient;
use clap::Parser;
use tracing::warn;

pub mod exit_code {
    pub const SUCCESS: i32 = 0;
    pub const BELOW_MIN_SCORE: i32 = 1;
    pub const MISSING_PARAMETERS: i32 = 2;
    pub const RUNTIME_FAILURE: i32 = 3;
    pub const NOT_FOUND: i32 = 4;
    pub const RATE_LIMITED: i32 = 5;
}

fn exit_code_for(err: &HealthError) -> i32 {
    match err {
        HealthError::MissingParameters => exit_code::MISSING_PARAMETERS,
        HealthError::RepositoryNotFound(_) => exit_code::NOT_FOUND,
        HealthError::RateLimited => exit_code::RATE_LIMITED,
        _ => exit_code::RUNTIME_FAILURE,
    }
}

/// Prints the JSON error body on stdout when the caller asked for JSON.
fn report_failure(err: HealthError, format: &cli::ReportFormat) -> HealthError {
    if matches!(format, cli::ReportFormat::Json) {
        let mut body = report::json::error_body(&err);
        body["status"] = err.http_status().into();
        match serde_json::to_string_pretty(&body) {
            Ok(rendered) => println!("{rendered}"),
            Err(e) => warn!(error = %e, "failed to render error body"),
        }
    }
    err
}

async fn run() -> Result<i32, HealthError> {
    let cli = cli::Cli::parse();
    logging::init_tracing(cli.verbose, cli.quiet);

    match cli.command {
        cli::Commands::Score(cmd) => {
            if let Err(err) = analyze::validate_params(&cmd.owner, &cmd.repo) {
                return Err(report_failure(err, &cmd.format));
            }

            let mut loaded = config::load_config(cli.config.as_deref())?;
            if let Some(token) = cmd.token {
                loaded.api.get_or_insert_with(Default::default).token = Some(token);
            }
            let api = loaded.api();
            if api.token.is_none() {
                warn!("no GitHub token configured; unauthenticated requests are heavily rate limited");
            }

            let settings = EngineSettings::from_config(&loaded);
            let client =
                GitHubClient::new(api).map_err(|e| HealthError::Upstream(e.to_string()))?;
            let health_report =
                match analyze::assess(&client, &cmd.owner, &cmd.repo, &settings).await {
                    Ok(health_report) => health_report,
                    Err(err) => return Err(report_failure(err, &cmd.format)),
                };

            let output_format = match cmd.format {
                cli::ReportFormat::Json => report::OutputFormat::Json,
                cli::ReportFormat::Md => report::OutputFormat::Md,
            };
            let rendered = report::render(&health_report, output_format)?;
            println!("{rendered}");

            match cmd.min_score {
                Some(min_score) if health_report.health_score < min_score => {
                    eprintln!(
                        "warning: health score {:.2} is below the minimum {:.2}",
                        health_report.health_score, min_score
                    );
                    Ok(exit_code::BELOW_MIN_SCORE)
                }
                _ => Ok(exit_code::SUCCESS),
            }
        }
        cli::Commands::Weights => {
            let loaded = config::load_config(cli.config.as_deref())?;
            let weights = loaded.weights();
            for (name, weight) in weights.entries() {
                println!("{name:<20} {weight:.2}");
            }
            println!("{:<20} {:.2}", "total", weights.sum());
            Ok(exit_code::SUCCESS)
        }
    }
}

#[tokio::main]
async fn main() {
    match run().await {
        Ok(code) => {
            if code != 0 {
                std::process::exit(code);
            }
        }
        Err(e) => {
            eprintln!("error: {}", e);
            std::process::exit(exit_code_for(&e));
        }
    }
}
