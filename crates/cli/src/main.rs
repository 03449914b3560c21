//! `finops` -- GPU cost/ROI and CI build analytics reports.
//!
//! Usage: `finops [cost|builds]` (defaults to `cost`).
//!
//! # Environment variables
//!
//! | Variable                  | Default                    | Description                          |
//! |---------------------------|----------------------------|--------------------------------------|
//! | `FINOPS_DEMO_CONFIG`      | --                         | JSON file overriding demo config     |
//! | `FINOPS_PRICING`          | built-in catalogue         | JSON map of instance type -> $/hour  |
//! | `FINOPS_MONTHLY_SPEND`    | `10000`                    | Monthly GPU spend for ROI            |
//! | `FINOPS_OUTPUT`           | per command                | Output JSON report path              |
//! | `FINOPS_WORKFLOW`         | `container.yml`            | Workflow to analyze                  |
//! | `FINOPS_WINDOW_DAYS`      | `30`                       | Look-back window in days             |
//! | `FINOPS_RUNS_FILE`        | --                         | Read runs from file instead of GitHub|
//! | `GITHUB_REPOSITORY_OWNER` | `Finoptimize`              | Repository owner                     |
//! | `GITHUB_REPOSITORY_NAME`  | `agentaflow-sro-community` | Repository name                      |
//! | `GITHUB_TOKEN`            | --                         | API token                            |

use finops_ci::{FileRunSource, GithubActionsClient, GithubConfig, RunSource};
use finops_cli::commands;
use finops_cli::render;
use finops_cli::settings::{Command, Settings};

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "finops_cli=info,finops_ci=info,finops=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let command: Command = match std::env::args().nth(1) {
        None => Command::Cost,
        Some(arg) => arg.parse().unwrap_or_else(|e: String| {
            tracing::error!("{e}");
            std::process::exit(2);
        }),
    };

    if let Err(e) = run(command, Settings::from_env()).await {
        tracing::error!("Analysis failed: {e:#}");
        std::process::exit(1);
    }
}

async fn run(command: Command, settings: Settings) -> anyhow::Result<()> {
    let now = chrono::Utc::now();
    let output = settings.output_for(command);

    match command {
        Command::Cost => {
            let report = commands::cost_report(&settings, now)?;
            commands::write_json(&output, &report)?;
            println!("{}", render::demo_summary(&report));
        }
        Command::Builds => {
            let source: Box<dyn RunSource> = match &settings.runs_file {
                Some(path) => Box::new(FileRunSource::new(path.clone())),
                None => {
                    let github = GithubConfig::from_env();
                    if github.token.is_none() {
                        tracing::warn!("GITHUB_TOKEN not set, API rate limits may apply");
                    }
                    Box::new(GithubActionsClient::new(github)?)
                }
            };
            let report = commands::build_report(&settings, source.as_ref(), now).await?;
            commands::write_json(&output, &report)?;
            println!("{}", render::builds_summary(&report, settings.window_days));
        }
    }

    tracing::info!(path = %output.display(), "Analysis complete");
    Ok(())
}
