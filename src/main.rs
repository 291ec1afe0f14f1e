mod cli;
mod config;
mod data;
mod form;
mod scoring;
mod views;

use anyhow::Result;
use clap::Parser;
use std::process::ExitCode;
use tracing::Level;

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let cli = cli::Cli::parse();

    // Screens go to stdout, logs to stderr
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_max_level(if cli.verbose { Level::DEBUG } else { Level::WARN })
        .init();

    tracing::debug!("ChurnInsight client starting");

    cli::run(cli).await
}
