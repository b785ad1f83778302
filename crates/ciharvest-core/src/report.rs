use ciharvest_api::{
    HarvestError,
    LogKey,
    WriteResult,
};
use tracing::{
    info,
    warn,
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FailureScope {
    Repository { full_name: String },
    Job { key: LogKey },
}

#[derive(Debug, Clone)]
pub struct Failure {
    pub scope: FailureScope,
    pub reason: String,
}

/// Totals for one harvesting run
#[derive(Debug, Default)]
pub struct HarvestReport {
    pub repositories: usize,
    pub builds: usize,
    pub logs_written: usize,
    pub bytes_written: u64,
    pub written: Vec<WriteResult>,
    pub failures: Vec<Failure>,
}

impl HarvestReport {
    pub fn record_repository_failure(&mut self, full_name: &str, error: &HarvestError) {
        self.failures.push(Failure {
            scope: FailureScope::Repository {
                full_name: full_name.to_string(),
            },
            reason: error.to_string(),
        });
    }

    pub fn record_job(&mut self, key: LogKey, result: Result<WriteResult, HarvestError>) {
        match result {
            Ok(written) => {
                self.logs_written += 1;
                self.bytes_written += written.bytes_written;
                self.written.push(written);
            }
            Err(e) => self.failures.push(Failure {
                scope: FailureScope::Job { key },
                reason: e.to_string(),
            }),
        }
    }

    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }

    pub fn log_summary(&self) {
        info!(
            "Harvested {} logs ({} bytes) from {} builds across {} repositories",
            self.logs_written, self.bytes_written, self.builds, self.repositories
        );

        for failure in &self.failures {
            match &failure.scope {
                FailureScope::Repository { full_name } => {
                    warn!("Repository {full_name} skipped: {}", failure.reason)
                }
                FailureScope::Job { key } => warn!("Log for {key} missing: {}", failure.reason),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::*;

    fn key(job_id: u64) -> LogKey {
        LogKey {
            repository_id: 2,
            build_id: 1,
            job_id,
        }
    }

    #[test]
    fn test_record_job_totals() {
        let mut report = HarvestReport::default();
        report.record_job(
            key(10),
            Ok(WriteResult {
                key: key(10),
                path: PathBuf::from("2-1-10.log"),
                bytes_written: 40,
            }),
        );
        report.record_job(
            key(11),
            Err(HarvestError::NetworkError("reset".to_string())),
        );

        assert_eq!(report.logs_written, 1);
        assert_eq!(report.bytes_written, 40);
        assert!(!report.is_clean());
        assert_eq!(report.failures[0].scope, FailureScope::Job { key: key(11) });
    }

    #[test]
    fn test_repository_failure_is_tagged() {
        let mut report = HarvestReport::default();
        report.record_repository_failure(
            "acme/widgets",
            &HarvestError::NotFound("acme/widgets".to_string()),
        );

        assert_eq!(
            report.failures[0].scope,
            FailureScope::Repository {
                full_name: "acme/widgets".to_string()
            }
        );
        assert!(report.failures[0].reason.contains("Not found"));
    }
}
