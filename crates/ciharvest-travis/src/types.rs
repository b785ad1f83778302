//! Wire types for the Travis CI v2 builds endpoint
//!
//! The build config's `script` field is either an array of commands or a
//! single command string depending on the response version. Both shapes
//! share every other field, so the response is generic over the script
//! type and decoded twice at most.

use chrono::{
    DateTime,
    Utc,
};
use ciharvest_api::Script;
use serde::de::DeserializeOwned;
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub(crate) struct BuildsResponse<S> {
    #[serde(default = "Vec::new")]
    pub builds: Vec<Build<S>>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct Build<S> {
    pub id: u64,
    pub repository_id: u64,
    pub commit_id: Option<u64>,
    pub number: Option<String>,
    pub event_type: Option<String>,
    pub pull_request: Option<bool>,
    pub pull_request_title: Option<String>,
    pub pull_request_number: Option<u64>,
    pub config: Option<Config<S>>,
    pub state: Option<String>,
    pub started_at: Option<DateTime<Utc>>,
    pub finished_at: Option<DateTime<Utc>>,
    pub duration: Option<i64>,
    #[serde(default)]
    pub job_ids: Vec<u64>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct Config<S> {
    pub script: Option<S>,
    #[serde(rename = ".result")]
    pub result: Option<String>,
    pub language: Option<String>,
    pub group: Option<String>,
    pub dist: Option<String>,
}

/// A concrete representation of the `script` field
pub(crate) trait ScriptField: DeserializeOwned {
    fn into_script(value: Option<Self>) -> Script;
}

impl ScriptField for Vec<String> {
    fn into_script(value: Option<Self>) -> Script {
        Script::List(value.unwrap_or_default())
    }
}

impl ScriptField for String {
    fn into_script(value: Option<Self>) -> Script {
        Script::Single(value.unwrap_or_default())
    }
}
