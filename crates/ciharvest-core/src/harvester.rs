//! Concurrent job log download and persistence

use std::path::{
    Path,
    PathBuf,
};
use std::sync::Arc;

use ciharvest_api::{
    Build,
    CiProvider,
    HarvestError,
    HarvestResult,
    JobOutcome,
    LogKey,
    WriteResult,
};
use futures::future::join_all;
use tokio::sync::Semaphore;
use tracing::{
    info,
    warn,
};

/// Downloads job logs and writes one file per job.
///
/// A single semaphore bounds in-flight downloads across every build the
/// harvester is given, whichever script shape the build was decoded from.
pub struct LogHarvester {
    provider: Arc<dyn CiProvider>,
    output_dir: PathBuf,
    semaphore: Arc<Semaphore>,
}

impl LogHarvester {
    pub fn new(
        provider: Arc<dyn CiProvider>, output_dir: impl Into<PathBuf>, max_concurrency: usize,
    ) -> Self {
        Self {
            provider,
            output_dir: output_dir.into(),
            semaphore: Arc::new(Semaphore::new(max_concurrency.max(1))),
        }
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    pub async fn prepare_output_dir(&self) -> HarvestResult<()> {
        tokio::fs::create_dir_all(&self.output_dir)
            .await
            .map_err(|e| {
                HarvestError::Io(format!(
                    "Failed to create output directory {}: {e}",
                    self.output_dir.display()
                ))
            })
    }

    /// Harvests every job of a build, returning one outcome per job ID in
    /// job order.
    pub async fn harvest_build(&self, build: &Build) -> Vec<JobOutcome> {
        info!(
            "Gathering {} jobs of build {} (repository {})",
            build.job_ids.len(),
            build.id,
            build.repository_id
        );

        join_all(build.log_keys().map(|key| self.harvest_job(key))).await
    }

    async fn harvest_job(&self, key: LogKey) -> JobOutcome {
        let result = self.fetch_and_write(key).await;
        if let Err(e) = &result {
            warn!("Failed to harvest {key}: {e}");
        }
        JobOutcome { key, result }
    }

    async fn fetch_and_write(&self, key: LogKey) -> HarvestResult<WriteResult> {
        let _permit = self
            .semaphore
            .acquire()
            .await
            .map_err(|e| HarvestError::Internal(format!("Download limiter closed: {e}")))?;

        info!("JobID: {}", key.job_id);
        let log = self.provider.fetch_job_log(key.job_id).await?;

        let path = self.output_dir.join(key.file_name());
        tokio::fs::write(&path, &log)
            .await
            .map_err(|e| HarvestError::Io(format!("Failed to write {}: {e}", path.display())))?;

        let bytes_written = log.len() as u64;
        info!("{bytes_written} bytes written successfully to {}", path.display());

        Ok(WriteResult {
            key,
            path,
            bytes_written,
        })
    }
}
