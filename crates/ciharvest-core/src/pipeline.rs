//! End-to-end harvesting run: discovery, build listing, log download

use std::sync::Arc;

use ciharvest_api::{
    CiProvider,
    HarvestResult,
    Paginator,
    Repository,
    SourceHost,
};
use futures::future::join_all;
use tracing::{
    debug,
    info,
    warn,
};

use crate::config::HarvestConfig;
use crate::discovery::{
    dedupe_repositories,
    OrgScanner,
    RepoAggregator,
};
use crate::harvester::LogHarvester;
use crate::report::HarvestReport;

pub struct HarvestPipeline {
    host: Arc<dyn SourceHost>,
    provider: Arc<dyn CiProvider>,
    paginator: Paginator,
}

impl HarvestPipeline {
    pub fn new(host: Arc<dyn SourceHost>, provider: Arc<dyn CiProvider>) -> Self {
        Self {
            host,
            provider,
            paginator: Paginator::default(),
        }
    }

    pub fn with_paginator(mut self, paginator: Paginator) -> Self {
        self.paginator = paginator;
        self
    }

    /// Lists the organization's repositories and, when expanding, those of
    /// its members, keeping one entry per full name.
    pub async fn discover(
        &self, org: &str, expand_members: bool,
    ) -> HarvestResult<Vec<Repository>> {
        info!("Org to scan on Travis CI: {org}");

        let discovery = OrgScanner::new(self.host.as_ref(), self.paginator)
            .scan(org, expand_members)
            .await?;

        let mut repositories = discovery.repositories;
        if expand_members {
            let member_repos = RepoAggregator::new(self.host.as_ref(), self.paginator)
                .aggregate(&discovery.members)
                .await?;
            repositories.extend(member_repos);
        }

        let repositories = dedupe_repositories(repositories);
        info!("Collected {} repositories to harvest", repositories.len());
        debug!("Repositories: {repositories:?}");

        Ok(repositories)
    }

    /// Runs a full harvest.
    ///
    /// Configuration, discovery and authentication errors end the run. A
    /// repository whose builds cannot be listed, or a job whose log cannot
    /// be saved, is recorded in the report and the run moves on.
    pub async fn run(&self, config: &HarvestConfig) -> HarvestResult<HarvestReport> {
        config.validate()?;

        let harvester = LogHarvester::new(
            self.provider.clone(),
            &config.output_dir,
            config.concurrency,
        );
        harvester.prepare_output_dir().await?;

        let repositories = self.discover(&config.org, config.expand_members).await?;
        let mut report = HarvestReport::default();

        for repo in &repositories {
            report.repositories += 1;

            let list = match self.provider.fetch_builds(&repo.full_name).await {
                Ok(list) => list,
                Err(e) if e.is_fatal() => return Err(e),
                Err(e) => {
                    warn!("Skipping {}: {e}", repo.full_name);
                    report.record_repository_failure(&repo.full_name, &e);
                    continue;
                }
            };

            debug!(
                "{} builds for {} ({:?} script shape)",
                list.builds.len(),
                repo.full_name,
                list.shape
            );
            report.builds += list.builds.len();

            let outcomes =
                join_all(list.builds.iter().map(|build| harvester.harvest_build(build))).await;

            for outcome in outcomes.into_iter().flatten() {
                match outcome.result {
                    Err(e) if e.is_fatal() => return Err(e),
                    result => report.record_job(outcome.key, result),
                }
            }
        }

        info!("Done!");
        report.log_summary();
        Ok(report)
    }
}
