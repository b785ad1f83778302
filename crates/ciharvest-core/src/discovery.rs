//! Organization repository discovery

use std::collections::HashSet;

use ciharvest_api::{
    HarvestResult,
    Member,
    Paginator,
    Repository,
    SourceHost,
};
use tracing::{
    debug,
    info,
};

/// Members and organization-owned repositories found by a scan
#[derive(Debug, Default)]
pub struct Discovery {
    pub repositories: Vec<Repository>,
    pub members: Vec<Member>,
}

pub struct OrgScanner<'a> {
    host: &'a dyn SourceHost,
    paginator: Paginator,
}

impl<'a> OrgScanner<'a> {
    pub fn new(host: &'a dyn SourceHost, paginator: Paginator) -> Self {
        Self { host, paginator }
    }

    /// Collects the organization's members (when `expand_members` is set)
    /// followed by its own repositories. Any listing error aborts the scan.
    pub async fn scan(&self, org: &str, expand_members: bool) -> HarvestResult<Discovery> {
        let members = if expand_members {
            let members = self
                .paginator
                .collect(|page| self.host.list_org_members(org, page))
                .await?;
            info!("Collected {} members of {org}", members.len());
            members
        } else {
            Vec::new()
        };

        let repositories = self
            .paginator
            .collect(|page| self.host.list_org_repos(org, page))
            .await?;
        info!("Collected {} repositories owned by {org}", repositories.len());

        Ok(Discovery {
            repositories,
            members,
        })
    }
}

pub struct RepoAggregator<'a> {
    host: &'a dyn SourceHost,
    paginator: Paginator,
}

impl<'a> RepoAggregator<'a> {
    pub fn new(host: &'a dyn SourceHost, paginator: Paginator) -> Self {
        Self { host, paginator }
    }

    /// Collects every member's personal repositories in member order.
    ///
    /// A failure for any member fails the whole aggregation.
    pub async fn aggregate(&self, members: &[Member]) -> HarvestResult<Vec<Repository>> {
        let mut repositories = Vec::new();

        for member in members {
            let login = member.login.as_str();
            let repos = self
                .paginator
                .collect(|page| self.host.list_user_repos(login, page))
                .await?;
            debug!("Collected {} repositories of member {login}", repos.len());
            repositories.extend(repos);
        }

        info!(
            "Collected {} repositories from {} members",
            repositories.len(),
            members.len()
        );
        Ok(repositories)
    }
}

/// Keeps the first repository seen for each full name
pub fn dedupe_repositories(repositories: Vec<Repository>) -> Vec<Repository> {
    let mut seen = HashSet::new();
    let before = repositories.len();

    let unique: Vec<_> = repositories
        .into_iter()
        .filter(|repo| seen.insert(repo.full_name.clone()))
        .collect();

    if unique.len() < before {
        debug!("Dropped {} duplicate repositories", before - unique.len());
    }
    unique
}
