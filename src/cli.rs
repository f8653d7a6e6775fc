use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "repo-health",
    version,
    about = "Score the health of a GitHub repository from its activity signals"
)]
pub struct Cli {
    /// Increase verbosity (-v for info, -vv for debug)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Extra config file layered over the global and working-directory ones
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Compute the health report for OWNER/REPO
    Score(ScoreCommand),
    /// Print the effective metric weights
    Weights,
}

#[derive(Args)]
pub struct ScoreCommand {
    pub owner: String,
    pub repo: String,
    #[arg(short, long, value_enum, default_value = "json")]
    pub format: ReportFormat,
    /// API token; overrides GITHUB_TOKEN and config files
    #[arg(long)]
    pub token: Option<String>,
    /// Exit with status 1 when the health score falls below this value
    #[arg(long, value_parser = parse_unit_interval)]
    pub min_score: Option<f64>,
}

#[derive(Clone, ValueEnum)]
pub enum ReportFormat {
    Json,
    Md,
}

fn parse_unit_interval(raw: &str) -> Result<f64, String> {
    let value: f64 = raw
        .parse()
        .map_err(|_| format!("`{raw}` is not a number"))?;
    if (0.0..=1.0).contains(&value) {
        Ok(value)
    } else {
        Err("must be between 0.0 and 1.0".to_string())
    }
}
