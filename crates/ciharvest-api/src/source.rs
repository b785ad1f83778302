use async_trait::async_trait;

use crate::error::HarvestResult;
use crate::pagination::{
    Page,
    PageRequest,
};
use crate::types::*;

/// Source-control host used to discover an organization's repositories
#[async_trait]
pub trait SourceHost: Send + Sync {
    /// One page of the organization's members
    async fn list_org_members(&self, org: &str, page: PageRequest) -> HarvestResult<Page<Member>>;

    /// One page of repositories owned by the organization
    async fn list_org_repos(
        &self, org: &str, page: PageRequest,
    ) -> HarvestResult<Page<Repository>>;

    /// One page of a member's personal repositories
    async fn list_user_repos(
        &self, login: &str, page: PageRequest,
    ) -> HarvestResult<Page<Repository>>;
}

/// CI provider holding build history and job logs
#[async_trait]
pub trait CiProvider: Send + Sync {
    /// Build history for a repository identified by `owner/name`
    async fn fetch_builds(&self, full_name: &str) -> HarvestResult<BuildList>;

    /// Raw console output of a single job, exactly as served
    async fn fetch_job_log(&self, job_id: u64) -> HarvestResult<Vec<u8>>;
}
