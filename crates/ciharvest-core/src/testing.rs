//! In-memory collaborators for unit tests

use std::collections::{
    HashMap,
    HashSet,
};
use std::sync::atomic::{
    AtomicUsize,
    Ordering,
};
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use ciharvest_api::*;

fn page_of<T: Clone>(all: &[T], req: PageRequest) -> Page<T> {
    let per_page = req.per_page as usize;
    let start = (req.page as usize - 1) * per_page;
    let end = (start + per_page).min(all.len());
    let items = all.get(start..end).map(<[T]>::to_vec).unwrap_or_default();
    let next = if end < all.len() {
        Some(req.page + 1)
    } else {
        None
    };
    Page::new(items, next)
}

pub fn org_repo(id: u64, org: &str, name: &str) -> Repository {
    Repository {
        id,
        full_name: format!("{org}/{name}"),
        owner: RepositoryOwner::Organization(org.to_string()),
    }
}

pub fn member_repo(id: u64, login: &str, full_name: &str) -> Repository {
    Repository {
        id,
        full_name: full_name.to_string(),
        owner: RepositoryOwner::Member(login.to_string()),
    }
}

pub fn build(id: u64, repository_id: u64, job_ids: Vec<u64>, script: Script) -> Build {
    Build {
        id,
        repository_id,
        commit_id: None,
        number: Some(id.to_string()),
        event_type: Some("push".to_string()),
        pull_request: false,
        pull_request_title: None,
        pull_request_number: None,
        config: BuildConfig {
            script,
            result: None,
            language: None,
            group: None,
            dist: None,
        },
        state: Some("passed".to_string()),
        started_at: None,
        finished_at: None,
        duration: None,
        job_ids,
    }
}

#[derive(Default)]
pub struct FakeHost {
    pub members: Vec<Member>,
    pub org_repos: Vec<Repository>,
    pub user_repos: HashMap<String, Vec<Repository>>,
    pub failing_users: HashSet<String>,
    pub requests: Mutex<Vec<String>>,
}

impl FakeHost {
    pub fn with_member(mut self, login: &str, repos: Vec<Repository>) -> Self {
        self.members.push(Member {
            login: login.to_string(),
        });
        self.user_repos.insert(login.to_string(), repos);
        self
    }

    fn record(&self, request: String) {
        self.requests.lock().unwrap().push(request);
    }

    pub fn requests(&self) -> Vec<String> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl SourceHost for FakeHost {
    async fn list_org_members(&self, org: &str, page: PageRequest) -> HarvestResult<Page<Member>> {
        self.record(format!("members:{org}:{}", page.page));
        Ok(page_of(&self.members, page))
    }

    async fn list_org_repos(
        &self, org: &str, page: PageRequest,
    ) -> HarvestResult<Page<Repository>> {
        self.record(format!("org_repos:{org}:{}", page.page));
        Ok(page_of(&self.org_repos, page))
    }

    async fn list_user_repos(
        &self, login: &str, page: PageRequest,
    ) -> HarvestResult<Page<Repository>> {
        self.record(format!("user_repos:{login}:{}", page.page));
        if self.failing_users.contains(login) {
            return Err(HarvestError::NetworkError(format!("{login} timed out")));
        }
        let repos = self.user_repos.get(login).cloned().unwrap_or_default();
        Ok(page_of(&repos, page))
    }
}

#[derive(Default)]
pub struct FakeProvider {
    pub builds: HashMap<String, BuildList>,
    pub failing_repos: HashSet<String>,
    pub unauthorized: bool,
    pub logs: HashMap<u64, Vec<u8>>,
    pub log_delay: Option<Duration>,
    in_flight: AtomicUsize,
    pub max_in_flight: AtomicUsize,
    pub log_requests: AtomicUsize,
}

impl FakeProvider {
    pub fn with_builds(mut self, full_name: &str, builds: Vec<Build>, shape: ScriptShape) -> Self {
        for build in &builds {
            for job_id in &build.job_ids {
                self.logs
                    .entry(*job_id)
                    .or_insert_with(|| format!("log of job {job_id}\n").into_bytes());
            }
        }
        self.builds
            .insert(full_name.to_string(), BuildList { builds, shape });
        self
    }
}

#[async_trait]
impl CiProvider for FakeProvider {
    async fn fetch_builds(&self, full_name: &str) -> HarvestResult<BuildList> {
        if self.failing_repos.contains(full_name) {
            return Err(HarvestError::NetworkError(format!(
                "connection reset fetching {full_name}"
            )));
        }
        self.builds
            .get(full_name)
            .cloned()
            .ok_or_else(|| HarvestError::NotFound(full_name.to_string()))
    }

    async fn fetch_job_log(&self, job_id: u64) -> HarvestResult<Vec<u8>> {
        self.log_requests.fetch_add(1, Ordering::SeqCst);
        if self.unauthorized {
            return Err(HarvestError::AuthenticationFailed("bad token".to_string()));
        }

        let current = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_in_flight.fetch_max(current, Ordering::SeqCst);
        if let Some(delay) = self.log_delay {
            tokio::time::sleep(delay).await;
        }
        self.in_flight.fetch_sub(1, Ordering::SeqCst);

        self.logs
            .get(&job_id)
            .cloned()
            .ok_or_else(|| HarvestError::NotFound(format!("job {job_id}")))
    }
}
