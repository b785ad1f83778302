use std::path::PathBuf;

use ciharvest_api::{
    HarvestError,
    HarvestResult,
};
use secrecy::{
    ExposeSecret,
    SecretString,
};

pub const DEFAULT_CONCURRENCY: usize = 10;

/// Settings for a single harvesting run
#[derive(Debug)]
pub struct HarvestConfig {
    /// Organization to scan (case-sensitive)
    pub org: String,
    pub github_token: SecretString,
    pub travis_token: SecretString,
    /// Also harvest members' personal repositories
    pub expand_members: bool,
    /// Directory receiving `{repositoryID}-{buildID}-{jobID}.log` files
    pub output_dir: PathBuf,
    /// Upper bound on in-flight log downloads
    pub concurrency: usize,
    pub github_api_url: String,
    pub travis_url: String,
    pub authenticate_builds: bool,
}

impl HarvestConfig {
    pub fn new(
        org: impl Into<String>, github_token: SecretString, travis_token: SecretString,
    ) -> Self {
        Self {
            org: org.into(),
            github_token,
            travis_token,
            expand_members: true,
            output_dir: PathBuf::from("."),
            concurrency: DEFAULT_CONCURRENCY,
            github_api_url: "https://api.github.com".to_string(),
            travis_url: "https://api.travis-ci.org".to_string(),
            authenticate_builds: false,
        }
    }

    /// Rejects configurations that cannot start a run
    pub fn validate(&self) -> HarvestResult<()> {
        if self.org.trim().is_empty() {
            return Err(HarvestError::InvalidConfig(
                "You have to specify an org to scan".to_string(),
            ));
        }
        if self.github_token.expose_secret().trim().is_empty() {
            return Err(HarvestError::InvalidConfig(
                "You have to specify a GitHub token".to_string(),
            ));
        }
        if self.travis_token.expose_secret().trim().is_empty() {
            return Err(HarvestError::InvalidConfig(
                "You have to specify a Travis token".to_string(),
            ));
        }
        if self.concurrency == 0 {
            return Err(HarvestError::InvalidConfig(
                "Concurrency must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn secret(value: &str) -> SecretString {
        SecretString::from(value.to_string())
    }

    fn valid_config() -> HarvestConfig {
        HarvestConfig::new("acme", secret("gh"), secret("travis"))
    }

    #[test]
    fn test_defaults() {
        let config = valid_config();
        assert!(config.expand_members);
        assert_eq!(config.concurrency, DEFAULT_CONCURRENCY);
        assert_eq!(config.output_dir, PathBuf::from("."));
        assert!(!config.authenticate_builds);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_missing_values_are_rejected() {
        let mut config = valid_config();
        config.org = String::new();
        assert!(
            matches!(config.validate(), Err(HarvestError::InvalidConfig(msg)) if msg.contains("org"))
        );

        let mut config = valid_config();
        config.github_token = secret(" ");
        assert!(
            matches!(config.validate(), Err(HarvestError::InvalidConfig(msg)) if msg.contains("GitHub"))
        );

        let mut config = valid_config();
        config.travis_token = secret("");
        assert!(
            matches!(config.validate(), Err(HarvestError::InvalidConfig(msg)) if msg.contains("Travis"))
        );

        let mut config = valid_config();
        config.concurrency = 0;
        assert!(config.validate().is_err());
    }
}
