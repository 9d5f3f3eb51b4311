mod briefing;
mod cli;
mod client;
mod config;
mod constant;
mod error;
mod feed;
mod llm;
mod mail;
mod page;
mod sanitize;

use anyhow::{Context, Result};
use chrono::{Local, NaiveDate};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use std::path::Path;

use crate::briefing::{load_user_context, BriefingGenerator};
use crate::cli::{split_page_args, Cli, Command};
use crate::client::build_http_client;
use crate::config::Config;
use crate::error::ConfigError;
use crate::llm::CompletionClient;
use crate::mail::{summarize, GmailClient};
use crate::page::PageBuilder;
use crate::sanitize::sanitize;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    setup_env_and_tracing(cli.verbose, cli.quiet);

    let today = Local::now().date_naive();
    let output = execute(cli.command, Config::from_env, today).await?;
    println!("{output}");

    Ok(())
}

/// Runs one command and returns the text bound for stdout. Configuration is
/// only loaded by the commands that read it.
async fn execute(
    command: Command,
    load_config: impl Fn() -> Result<Config, ConfigError>,
    today: NaiveDate,
) -> Result<String> {
    match command {
        Command::Page { args } => {
            let config = load_config()?;
            let (snippet, urls) = split_page_args(args);
            Ok(build_page(&config, snippet, &urls, today).await)
        }
        Command::Run { urls, hours } => {
            let config = load_config()?;
            let briefing = run_briefing(&config, hours, today).await?;
            Ok(build_page(&config, Some(briefing), &urls, today).await)
        }
        Command::Briefing { hours } => {
            let config = load_config()?;
            run_briefing(&config, hours, today).await
        }
        Command::Emails { hours } => {
            let config = load_config()?;
            let gmail = open_mail_session(&config)?;
            Ok(summarize(&gmail, hours.unwrap_or(config.mail_window_hours)).await)
        }
        Command::Sanitize { file } => sanitize_file(&file),
    }
}

/// Logs go to stderr so stdout carries nothing but the document.
pub fn setup_env_and_tracing(verbose: u8, quiet: bool) {
    dotenv::dotenv().ok();

    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
            1 => EnvFilter::new("debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

async fn build_page(
    config: &Config,
    briefing: Option<String>,
    urls: &[String],
    today: NaiveDate,
) -> String {
    let page = PageBuilder::from_config(config)
        .with_briefing(briefing)
        .with_feeds(urls.iter().cloned())
        .build()
        .assemble(today)
        .await;

    if !page.failures.is_empty() {
        let skipped: Vec<String> = page
            .failures
            .iter()
            .map(|f| format!("{} ({})", f.url, f.error))
            .collect();
        tracing::warn!(
            "{} of {} feeds were left out of the page: {}",
            skipped.len(),
            urls.len(),
            skipped.join(", ")
        );
    }

    page.html
}

fn open_mail_session(config: &Config) -> Result<GmailClient> {
    let http = build_http_client(config.mail_timeout())?;
    GmailClient::from_token_file(&config.gmail_token_path, config.gmail_api_base.clone(), http)
        .context("Mail session unavailable")
}

/// Credentials and configuration are checked up front so a missing one
/// aborts before any network call.
async fn run_briefing(config: &Config, hours: Option<u32>, today: NaiveDate) -> Result<String> {
    let http = build_http_client(config.gemini_timeout())?;
    let completion = CompletionClient::from_config(config, http)?;
    let gmail = open_mail_session(config)?;

    let digest = summarize(&gmail, hours.unwrap_or(config.mail_window_hours)).await;
    let context = load_user_context(&config.user_context_path);

    let generator = BriefingGenerator::new(completion, config.weather_location.clone());
    let briefing = generator
        .generate(&context, &digest, today)
        .await
        .context("Failed to generate the daily briefing")?;

    Ok(briefing)
}

fn sanitize_file(path: &Path) -> Result<String> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    sanitize(&content).with_context(|| format!("Failed to process {}", path.display()))
}
