use async_trait::async_trait;
use ciharvest_api::{
    HarvestError,
    HarvestResult,
    Member,
    Page,
    PageRequest,
    Repository,
    RepositoryOwner,
    SourceHost,
};
use octocrab::Octocrab;
use secrecy::{
    ExposeSecret,
    SecretString,
};
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::{
    config,
    types,
};

pub struct GitHubClient {
    octocrab: Octocrab,
}

impl GitHubClient {
    /// Creates a client authenticated with a personal access token against
    /// the given REST API URL.
    pub fn new(api_url: &str, token: &SecretString) -> HarvestResult<Self> {
        let octocrab = Octocrab::builder()
            .personal_token(token.expose_secret().to_string())
            .base_uri(api_url)
            .map_err(|e| HarvestError::InvalidConfig(format!("Invalid GitHub API URL: {e}")))?
            .build()
            .map_err(|e| {
                HarvestError::Internal(format!("Failed to create GitHub client: {e}"))
            })?;

        Ok(Self { octocrab })
    }

    async fn fetch_page<T: DeserializeOwned>(
        &self, route: String, page: PageRequest,
    ) -> HarvestResult<Page<T>> {
        debug!("Fetching {route} page {}", page.page);

        let params = types::ListParams {
            per_page: page.per_page,
            page: page.page,
        };
        let response: octocrab::Page<T> = self
            .octocrab
            .get(&route, Some(&params))
            .await
            .map_err(|e| map_error(&route, e))?;

        let next_page = response
            .next
            .as_ref()
            .and_then(|uri| uri.query())
            .and_then(config::page_from_query);

        Ok(Page::new(response.items, next_page))
    }

    async fn fetch_repo_page(
        &self, route: String, page: PageRequest, owner: RepositoryOwner,
    ) -> HarvestResult<Page<Repository>> {
        let response = self.fetch_page::<types::Repository>(route, page).await?;

        let items = response
            .items
            .into_iter()
            .map(|repo| {
                let full_name = repo.full_name.ok_or_else(|| {
                    HarvestError::ApiError(format!("Repository {} missing full_name", repo.id))
                })?;
                // The name is spliced into the Travis builds path, so it must be `owner/name`
                if config::parse_repo(&full_name).is_none() {
                    return Err(HarvestError::ApiError(format!(
                        "Invalid repository name: {full_name}"
                    )));
                }

                Ok(Repository {
                    id: repo.id,
                    full_name,
                    owner: owner.clone(),
                })
            })
            .collect::<HarvestResult<Vec<_>>>()?;

        Ok(Page::new(items, response.next_page))
    }
}

#[async_trait]
impl SourceHost for GitHubClient {
    async fn list_org_members(&self, org: &str, page: PageRequest) -> HarvestResult<Page<Member>> {
        let response = self
            .fetch_page::<types::User>(format!("/orgs/{org}/members"), page)
            .await?;

        let members = response
            .items
            .into_iter()
            .map(|user| Member { login: user.login })
            .collect();

        Ok(Page::new(members, response.next_page))
    }

    async fn list_org_repos(
        &self, org: &str, page: PageRequest,
    ) -> HarvestResult<Page<Repository>> {
        self.fetch_repo_page(
            format!("/orgs/{org}/repos"),
            page,
            RepositoryOwner::Organization(org.to_string()),
        )
        .await
    }

    async fn list_user_repos(
        &self, login: &str, page: PageRequest,
    ) -> HarvestResult<Page<Repository>> {
        self.fetch_repo_page(
            format!("/users/{login}/repos"),
            page,
            RepositoryOwner::Member(login.to_string()),
        )
        .await
    }
}

fn map_error(route: &str, err: octocrab::Error) -> HarvestError {
    match err {
        octocrab::Error::GitHub { source, .. } => match source.status_code.as_u16() {
            401 | 403 => HarvestError::AuthenticationFailed(format!(
                "GitHub rejected {route}: {}",
                source.message
            )),
            404 => HarvestError::NotFound(format!("{route}: {}", source.message)),
            status => HarvestError::ApiError(format!(
                "GitHub returned {status} for {route}: {}",
                source.message
            )),
        },
        other => HarvestError::NetworkError(format!("Failed to fetch {route}: {other}")),
    }
}
