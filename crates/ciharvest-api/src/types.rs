use std::fmt;
use std::path::PathBuf;

use chrono::{
    DateTime,
    Utc,
};
use serde::{
    Deserialize,
    Serialize,
};

use crate::error::HarvestError;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Member {
    pub login: String,
}

/// Where a repository was discovered
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "name", rename_all = "lowercase")]
pub enum RepositoryOwner {
    Organization(String),
    Member(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Repository {
    pub id: u64,
    /// `owner/name`
    pub full_name: String,
    pub owner: RepositoryOwner,
}

/// Which build script representation a builds response used
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScriptShape {
    List,
    Single,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Script {
    List(Vec<String>),
    Single(String),
}

impl Script {
    pub fn shape(&self) -> ScriptShape {
        match self {
            Script::List(_) => ScriptShape::List,
            Script::Single(_) => ScriptShape::Single,
        }
    }

    pub fn as_list(&self) -> Option<&[String]> {
        match self {
            Script::List(commands) => Some(commands),
            Script::Single(_) => None,
        }
    }

    pub fn as_single(&self) -> Option<&str> {
        match self {
            Script::List(_) => None,
            Script::Single(command) => Some(command),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuildConfig {
    pub script: Script,
    pub result: Option<String>,
    pub language: Option<String>,
    pub group: Option<String>,
    pub dist: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Build {
    pub id: u64,
    pub repository_id: u64,
    pub commit_id: Option<u64>,
    pub number: Option<String>,
    pub event_type: Option<String>,
    pub pull_request: bool,
    pub pull_request_title: Option<String>,
    pub pull_request_number: Option<u64>,
    pub config: BuildConfig,
    pub state: Option<String>,
    pub started_at: Option<DateTime<Utc>>,
    pub finished_at: Option<DateTime<Utc>>,
    pub duration: Option<i64>,
    pub job_ids: Vec<u64>,
}

impl Build {
    pub fn log_keys(&self) -> impl Iterator<Item = LogKey> + '_ {
        self.job_ids.iter().map(move |job_id| LogKey {
            repository_id: self.repository_id,
            build_id: self.id,
            job_id: *job_id,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuildList {
    pub builds: Vec<Build>,
    pub shape: ScriptShape,
}

/// Composite identity of one job log on disk
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LogKey {
    pub repository_id: u64,
    pub build_id: u64,
    pub job_id: u64,
}

impl LogKey {
    pub fn file_name(&self) -> String {
        format!("{}-{}-{}.log", self.repository_id, self.build_id, self.job_id)
    }
}

impl fmt::Display for LogKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "repository {} build {} job {}",
            self.repository_id, self.build_id, self.job_id
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WriteResult {
    pub key: LogKey,
    pub path: PathBuf,
    pub bytes_written: u64,
}

/// Outcome of harvesting a single job log
#[derive(Debug)]
pub struct JobOutcome {
    pub key: LogKey,
    pub result: Result<WriteResult, HarvestError>,
}

impl JobOutcome {
    pub fn is_success(&self) -> bool {
        self.result.is_ok()
    }
}
