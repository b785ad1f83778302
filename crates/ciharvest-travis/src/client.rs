//! HTTP client for the Travis CI builds and job log endpoints

use async_trait::async_trait;
use ciharvest_api::{
    BuildList,
    CiProvider,
    HarvestError,
    HarvestResult,
};
use reqwest::header::{
    ACCEPT,
    AUTHORIZATION,
};
use reqwest::{
    Client,
    RequestBuilder,
    Response,
    StatusCode,
};
use secrecy::ExposeSecret;
use tracing::{
    debug,
    info,
};

use crate::config::TravisSettings;
use crate::mapper;

const BUILDS_ACCEPT: &str = "application/json; version=2";
const LOG_ACCEPT: &str = "text/plain; version=3";

pub struct TravisClient {
    client: Client,
    settings: TravisSettings,
}

impl TravisClient {
    pub fn new(client: Client, settings: TravisSettings) -> Self {
        Self { client, settings }
    }

    fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        request.header(
            AUTHORIZATION,
            format!("token {}", self.settings.token.expose_secret()),
        )
    }

    /// Fetches the latest builds of a repository
    pub async fn fetch_builds(&self, full_name: &str) -> HarvestResult<BuildList> {
        let url = self.settings.builds_url(full_name);
        info!("Requesting builds from: {url}");

        let authenticated = self.settings.authenticate_builds;
        let mut request = self.client.get(&url).header(ACCEPT, BUILDS_ACCEPT);
        if authenticated {
            request = self.authorize(request);
        }

        let response = request.send().await.map_err(|e| {
            HarvestError::NetworkError(format!("Failed to fetch builds for {full_name}: {e}"))
        })?;
        let body = ensure_success(response, &format!("builds for {full_name}"), authenticated)
            .await?
            .text()
            .await
            .map_err(|e| {
                HarvestError::NetworkError(format!("Failed to read builds for {full_name}: {e}"))
            })?;

        let builds = mapper::decode_builds(&body)?;
        debug!(
            "Decoded {} builds for {full_name} ({:?} script shape)",
            builds.builds.len(),
            builds.shape
        );
        Ok(builds)
    }

    /// Fetches the plain text log of a job without decoding it
    pub async fn fetch_job_log(&self, job_id: u64) -> HarvestResult<Vec<u8>> {
        let url = self.settings.job_log_url(job_id);
        info!("Requesting logs from: {url}");

        let response = self
            .authorize(self.client.get(&url).header(ACCEPT, LOG_ACCEPT))
            .send()
            .await
            .map_err(|e| {
                HarvestError::NetworkError(format!("Failed to fetch log for job {job_id}: {e}"))
            })?;

        let body = ensure_success(response, &format!("log for job {job_id}"), true)
            .await?
            .bytes()
            .await
            .map_err(|e| {
                HarvestError::NetworkError(format!("Failed to read log for job {job_id}: {e}"))
            })?;

        Ok(body.to_vec())
    }
}

#[async_trait]
impl CiProvider for TravisClient {
    async fn fetch_builds(&self, full_name: &str) -> HarvestResult<BuildList> {
        TravisClient::fetch_builds(self, full_name).await
    }

    async fn fetch_job_log(&self, job_id: u64) -> HarvestResult<Vec<u8>> {
        TravisClient::fetch_job_log(self, job_id).await
    }
}

/// Maps a non-2xx response to an error. A 401 only means a bad token when
/// one was sent; otherwise the endpoint itself demands a login.
async fn ensure_success(
    response: Response, what: &str, authenticated: bool,
) -> HarvestResult<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let error_text = response
        .text()
        .await
        .unwrap_or_else(|_| "Unknown error".to_string());

    Err(match status {
        StatusCode::UNAUTHORIZED if !authenticated => HarvestError::ApiError(format!(
            "Travis CI requires a login for {what}: {error_text}"
        )),
        StatusCode::UNAUTHORIZED => HarvestError::AuthenticationFailed(format!(
            "Travis CI rejected the token while fetching {what}: {error_text}"
        )),
        StatusCode::NOT_FOUND => HarvestError::NotFound(format!("{what}: {error_text}")),
        _ => HarvestError::ApiError(format!("Failed to fetch {what} ({status}): {error_text}")),
    })
}
