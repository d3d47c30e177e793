use anyhow::{Context, Result};
use clap::{CommandFactory, Parser};
use std::io::{IsTerminal, Read};
use tracing_subscriber::EnvFilter;

use suggestion_bot::config::Config;
use suggestion_bot::{make_comments, suggest, ReviewOptions};

const AFTER_HELP: &str = "\
Examples:
  # Submit current changes as suggestions
  GITHUB_TOKEN=<secret> suggestion-bot \"$(git diff)\"

  # Alternatively, pipe to suggestion-bot
  # to avoid escape character issues
  git diff | GITHUB_TOKEN=<secret> suggestion-bot

If your CI is hosted by Azure DevOps, replace `GITHUB_TOKEN` with `AZURE_PERSONAL_ACCESS_TOKEN`.";

#[derive(Parser, Debug)]
#[command(name = "suggestion-bot")]
#[command(about = "Submit code reviews with suggestions based on your diffs")]
#[command(version, disable_version_flag = true, after_help = AFTER_HELP)]
struct Args {
    /// The diff to create suggestions from (read from stdin if not provided)
    #[arg(allow_hyphen_values = true)]
    diff: Option<String>,

    /// Print version
    #[arg(short = 'v', long, action = clap::ArgAction::Version)]
    #[allow(dead_code)]
    version: Option<bool>,

    /// Use the specified message as the PR comment
    #[arg(short, long)]
    message: Option<String>,

    /// Fail if comments could not be posted
    #[arg(short, long)]
    fail: bool,

    /// Print the suggestions as JSON instead of posting them
    #[arg(long)]
    dry_run: bool,
}

fn read_diff(args: &Args) -> Result<Option<String>> {
    if let Some(diff) = &args.diff {
        return Ok(Some(diff.clone()));
    }
    if std::io::stdin().is_terminal() {
        return Ok(None);
    }
    let mut buffer = String::new();
    std::io::stdin()
        .read_to_string(&mut buffer)
        .context("Failed to read diff from stdin")?;
    Ok(Some(buffer))
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let Some(diff) = read_diff(&args)? else {
        Args::command().print_help()?;
        return Ok(());
    };

    if args.dry_run {
        let comments = make_comments(&diff)?;
        println!("{}", serde_json::to_string_pretty(&comments)?);
        return Ok(());
    }

    let config = Config::load()?;
    let options = ReviewOptions {
        message: args.message.or(config.message.clone()),
        fail: args.fail || config.fail,
    };
    suggest(&diff, &options, &config).await
}
