//! Decoding of builds responses into the shared build model

use ciharvest_api::{
    Build,
    BuildConfig,
    BuildList,
    HarvestError,
    HarvestResult,
    ScriptShape,
};
use tracing::{
    debug,
    info,
};

use crate::types::{
    self,
    ScriptField,
};

/// Decodes a builds response, trying the list-of-commands script shape
/// before the single-string shape.
pub fn decode_builds(body: &str) -> HarvestResult<BuildList> {
    match serde_json::from_str::<types::BuildsResponse<Vec<String>>>(body) {
        Ok(response) => Ok(into_build_list(response, ScriptShape::List)),
        Err(list_err) => {
            info!("Build script is not an array of strings, trying the single string shape");
            debug!("List shape decode error: {list_err}");

            serde_json::from_str::<types::BuildsResponse<String>>(body)
                .map(|response| into_build_list(response, ScriptShape::Single))
                .map_err(|single_err| {
                    HarvestError::SerializationError(format!(
                        "Builds response matches neither script shape \
                         (array: {list_err}; string: {single_err})"
                    ))
                })
        }
    }
}

fn into_build_list<S: ScriptField>(
    response: types::BuildsResponse<S>, shape: ScriptShape,
) -> BuildList {
    BuildList {
        builds: response.builds.into_iter().map(into_build).collect(),
        shape,
    }
}

fn into_build<S: ScriptField>(build: types::Build<S>) -> Build {
    let config = match build.config {
        Some(config) => BuildConfig {
            script: S::into_script(config.script),
            result: config.result,
            language: config.language,
            group: config.group,
            dist: config.dist,
        },
        None => BuildConfig {
            script: S::into_script(None),
            result: None,
            language: None,
            group: None,
            dist: None,
        },
    };

    Build {
        id: build.id,
        repository_id: build.repository_id,
        commit_id: build.commit_id,
        number: build.number,
        event_type: build.event_type,
        pull_request: build.pull_request.unwrap_or(false),
        pull_request_title: build.pull_request_title,
        pull_request_number: build.pull_request_number,
        config,
        state: build.state,
        started_at: build.started_at,
        finished_at: build.finished_at,
        duration: build.duration,
        job_ids: build.job_ids,
    }
}
