use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing::{error, info};
use crate::config::{resolve_base_url, Config, EnvConfig};
use crate::data::prediction_api::PredictionClient;
use crate::data::types::{is_probability, PredictionResponse};
use crate::form::draft::PredictionDraft;
use crate::scoring::risk::{classify, format_percentage};
use crate::views::form::SubmissionFailed;
use crate::views::overview::OverviewView;
use crate::views::result::ResultScreen;

#[derive(Parser)]
#[command(
    author,
    version,
    about = "Customer churn risk from the ChurnInsight prediction service",
    long_about = None
)]
pub struct Cli {
    /// Config file (churn-insight.toml is used when present)
    #[arg(long, global = true)]
    pub config: Option<String>,
    /// Prediction service base URL, e.g. http://localhost:8080/v1
    #[arg(long, global = true)]
    pub base_url: Option<String>,
    /// Log requests and failures to stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Show aggregate prediction stats
    Overview,
    /// Fill in a customer and request a churn prediction
    Predict {
        /// TOML file of field values, keyed by wire field name
        #[arg(long)]
        input: Option<PathBuf>,
        /// Set one field, e.g. --set age=42 (repeatable)
        #[arg(long = "set", value_name = "FIELD=VALUE")]
        assignments: Vec<String>,
        /// Print the raw response JSON instead of the result screen
        #[arg(long)]
        json: bool,
    },
    /// Render the result screen for a saved response
    Show {
        /// Response JSON as printed by `predict --json`
        #[arg(long)]
        response: Option<PathBuf>,
    },
    /// Look up the risk tier for a probability without calling the service
    Classify {
        probability: f64,
    },
}

pub async fn run(cli: Cli) -> Result<ExitCode> {
    match cli.command {
        Command::Classify { probability } => classify_offline(probability),
        Command::Overview => {
            let client = connect(cli.config.as_deref(), cli.base_url.as_deref())?;
            show_overview(&client).await
        }
        Command::Predict { input, assignments, json } => {
            let draft = build_draft(input.as_deref(), &assignments)?;
            let client = connect(cli.config.as_deref(), cli.base_url.as_deref())?;
            submit(&client, &draft, json).await
        }
        Command::Show { response } => {
            let saved = response.as_deref().map(load_response).transpose()?;
            let client = connect(cli.config.as_deref(), cli.base_url.as_deref())?;
            show_result(&client, saved.as_ref()).await
        }
    }
}

/// Build a client from the layered configuration
fn connect(config_path: Option<&str>, base_url: Option<&str>) -> Result<PredictionClient> {
    let file_config = Config::load_or_default(config_path)?;
    let env_config = EnvConfig::load();
    let base_url = resolve_base_url(base_url, &env_config, &file_config)?;
    info!("Using prediction service at {}", base_url);

    Ok(PredictionClient::new(base_url))
}

async fn show_overview(client: &PredictionClient) -> Result<ExitCode> {
    let stats = client.fetch_stats().await;
    println!("{}", OverviewView::new(&stats));
    Ok(ExitCode::SUCCESS)
}

async fn show_result(
    client: &PredictionClient,
    response: Option<&PredictionResponse>,
) -> Result<ExitCode> {
    match ResultScreen::new(response) {
        ResultScreen::Ready(view) => {
            println!("{}", view);
            Ok(ExitCode::SUCCESS)
        }
        ResultScreen::Redirect => {
            info!("No prediction to show, returning to overview");
            show_overview(client).await
        }
    }
}

fn build_draft(input: Option<&Path>, assignments: &[String]) -> Result<PredictionDraft> {
    let mut draft = PredictionDraft::default();

    if let Some(path) = input {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read form file: {}", path.display()))?;
        let table: toml::Table = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse form file: {}", path.display()))?;
        draft
            .apply_table(&table)
            .with_context(|| format!("Invalid form file: {}", path.display()))?;
    }

    for assignment in assignments {
        draft.apply_assignment(assignment)?;
    }

    draft.validate()?;
    Ok(draft)
}

async fn submit(
    client: &PredictionClient,
    draft: &PredictionDraft,
    json: bool,
) -> Result<ExitCode> {
    info!("Submitting prediction to {}", client.base_url());

    match client.predict(draft.request()).await {
        Ok(response) if json => {
            println!("{}", serde_json::to_string_pretty(&response)?);
            Ok(ExitCode::SUCCESS)
        }
        Ok(response) => show_result(client, Some(&response)).await,
        Err(e) => {
            error!("Submission aborted: {}", e);
            eprintln!("{}", SubmissionFailed::new(draft));
            Ok(ExitCode::FAILURE)
        }
    }
}

fn load_response(path: &Path) -> Result<PredictionResponse> {
    let contents = fs::read_to_string(path)
        .with_context(|| format!("Failed to read response file: {}", path.display()))?;
    let response: PredictionResponse = serde_json::from_str(&contents)
        .with_context(|| format!("Failed to parse response file: {}", path.display()))?;

    anyhow::ensure!(
        is_probability(response.churn_probability),
        "churnProbability out of range: {}",
        response.churn_probability
    );

    Ok(response)
}

fn classify_offline(probability: f64) -> Result<ExitCode> {
    anyhow::ensure!(
        is_probability(probability),
        "probability must be between 0 and 1 (got {})",
        probability
    );

    let tier = classify(probability);
    println!("{}  {}  {}", tier.as_str(), tier.label(), format_percentage(probability));
    Ok(ExitCode::SUCCESS)
}
