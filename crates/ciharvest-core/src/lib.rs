//! Harvesting pipeline for ciharvest
//!
//! Discovers an organization's repositories, lists each repository's CI
//! builds and saves every job log as `{repositoryID}-{buildID}-{jobID}.log`.

pub mod config;
pub mod discovery;
pub mod harvester;
pub mod http_client;
pub mod logging;
pub mod pipeline;
pub mod report;

#[cfg(test)]
mod testing;

pub use config::{
    HarvestConfig,
    DEFAULT_CONCURRENCY,
};
pub use discovery::{
    dedupe_repositories,
    Discovery,
    OrgScanner,
    RepoAggregator,
};
pub use harvester::LogHarvester;
pub use pipeline::HarvestPipeline;
pub use report::{
    Failure,
    FailureScope,
    HarvestReport,
};
