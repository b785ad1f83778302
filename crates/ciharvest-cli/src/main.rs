mod args;

use std::process::ExitCode;
use std::sync::Arc;

use anyhow::Context;
use ciharvest_api::Paginator;
use ciharvest_core::{
    http_client,
    HarvestConfig,
    HarvestPipeline,
    HarvestReport,
};
use ciharvest_github::GitHubClient;
use ciharvest_travis::{
    TravisClient,
    TravisSettings,
};
use clap::Parser;

use crate::args::Cli;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    ciharvest_core::logging::init(cli.verbose);

    match run(&cli).await {
        Ok(report) => {
            if !report.is_clean() {
                tracing::warn!(
                    "Finished with {} failures, see the messages above",
                    report.failures.len()
                );
            }
            ExitCode::SUCCESS
        }
        Err(e) => {
            tracing::error!("{e:#}");
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: &Cli) -> anyhow::Result<HarvestReport> {
    let config = cli.to_config();
    config.validate()?;

    let http = http_client::build_client()?;

    let host = GitHubClient::new(&config.github_api_url, &config.github_token)
        .context("Failed to set up the GitHub client")?;

    let provider = TravisClient::new(http, travis_settings(&config));

    let pipeline = HarvestPipeline::new(Arc::new(host), Arc::new(provider))
        .with_paginator(Paginator::new(cli.page_size));

    let report = pipeline
        .run(&config)
        .await
        .with_context(|| format!("Harvesting {} failed", config.org))?;

    Ok(report)
}

fn travis_settings(config: &HarvestConfig) -> TravisSettings {
    TravisSettings::new(&config.travis_url, config.travis_token.clone())
        .with_authenticated_builds(config.authenticate_builds)
}
