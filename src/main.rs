mod pipeline;

use anyhow::Result;
use chrono::{NaiveDate, Utc};
use clap::{Parser, Subcommand};
use ideascout_core::{AnalyzedPost, AppConfig, CoreError, ErrorReporter, RawPost};
use report::{read_json, write_json};
use std::path::{Path, PathBuf};
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Collects Reddit posts, scores them as startup ideas and renders daily
/// reports.
///
/// Examples:
///   ideascout run                          # collect, analyze and report
///   ideascout collect --target 30          # only fetch posts
///   ideascout analyze --input posts.json   # score a saved batch
///   ideascout report --input analyzed.json # render a saved analysis
#[derive(Parser, Debug)]
#[command(name = "ideascout")]
#[command(version)]
#[command(about, long_about = None)]
struct Cli {
    /// TOML configuration file
    ///
    /// Without it, built-in defaults plus environment overrides
    /// (SERPER_API_KEY, LLM_API_KEY, LLM_BASE_URL, LLM_MODEL) are used.
    #[arg(short, long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Debug-level logging (RUST_LOG takes precedence)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Fetch posts and save them as JSON
    Collect {
        /// Number of posts to keep (defaults to collector.target_count)
        #[arg(short, long)]
        target: Option<usize>,

        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,
    },
    /// Score a saved batch of posts
    Analyze {
        #[arg(short, long, value_name = "FILE")]
        input: PathBuf,

        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,
    },
    /// Render Markdown and HTML reports from a saved analysis
    Report {
        #[arg(short, long, value_name = "FILE")]
        input: PathBuf,

        /// Report date, YYYY-MM-DD (defaults to today, UTC)
        #[arg(long)]
        date: Option<NaiveDate>,
    },
    /// Collect, analyze and report in one go
    Run {
        #[arg(short, long)]
        target: Option<usize>,
    },
}

fn init_tracing(verbose: bool) {
    let level = if verbose { "debug" } else { "info" };
    let default_filter = format!(
        "ideascout={level},reddit_client={level},scoring_engine={level},llm_interface={level},report={level}"
    );
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

fn load_config(path: Option<&Path>) -> Result<AppConfig, CoreError> {
    match path {
        Some(path) => AppConfig::load(path),
        None => AppConfig::from_env(),
    }
}

fn dated_path(config: &AppConfig, prefix: &str, date: NaiveDate) -> PathBuf {
    config
        .report
        .output_dir
        .join(format!("{}-{}.json", prefix, date))
}

async fn execute(cli: Cli) -> Result<(), CoreError> {
    let config = load_config(cli.config.as_deref())?;
    let today = Utc::now().date_naive();

    match cli.command {
        Command::Collect { target, output } => {
            let target = target.unwrap_or(config.collector.target_count);
            let posts = pipeline::collect(&config, target).await?;
            let output = output.unwrap_or_else(|| dated_path(&config, "reddit-ideas", today));
            write_json(&output, &posts)?;
            info!("Saved {} posts to {}", posts.len(), output.display());
        }
        Command::Analyze { input, output } => {
            let posts: Vec<RawPost> = read_json(&input)?;
            let analyzed = pipeline::analyze(&config, posts).await?;
            let output = output.unwrap_or_else(|| dated_path(&config, "analyzed", today));
            write_json(&output, &analyzed)?;
            info!("Saved {} analyses to {}", analyzed.len(), output.display());
        }
        Command::Report { input, date } => {
            let analyzed: Vec<AnalyzedPost> = read_json(&input)?;
            let files = pipeline::report(&config, &analyzed, date.unwrap_or(today))?;
            info!("Report written to {}", files.markdown.display());
        }
        Command::Run { target } => {
            let target = target.unwrap_or(config.collector.target_count);
            let posts = pipeline::collect(&config, target).await?;
            write_json(&dated_path(&config, "reddit-ideas", today), &posts)?;
            let analyzed = pipeline::analyze(&config, posts).await?;
            let files = pipeline::report(&config, &analyzed, today)?;
            info!(
                "Done: {} ({} / {})",
                files.markdown.display(),
                files.html.display(),
                files.index.display()
            );
        }
    }
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    info!("Starting ideascout");

    if let Err(error) = execute(cli).await {
        ErrorReporter::new().report_error(&error);
        return Err(error.into());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_report_with_date() {
        let cli = Cli::try_parse_from([
            "ideascout",
            "--config",
            "ideascout.toml",
            "report",
            "--input",
            "data/analyzed.json",
            "--date",
            "2026-02-12",
        ])
        .unwrap();
        assert_eq!(cli.config, Some(PathBuf::from("ideascout.toml")));
        match cli.command {
            Command::Report { input, date } => {
                assert_eq!(input, PathBuf::from("data/analyzed.json"));
                assert_eq!(date, NaiveDate::from_ymd_opt(2026, 2, 12));
            }
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn test_verbose_is_global() {
        let cli = Cli::try_parse_from(["ideascout", "run", "--verbose", "--target", "5"]).unwrap();
        assert!(cli.verbose);
        assert!(matches!(cli.command, Command::Run { target: Some(5) }));
    }
}
