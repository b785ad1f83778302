//! Connection settings for the Travis CI API

use secrecy::SecretString;

pub const DEFAULT_BASE_URL: &str = "https://api.travis-ci.org";

/// Number of builds requested per repository
pub const BUILDS_LIMIT: u32 = 100;

#[derive(Debug)]
pub struct TravisSettings {
    pub base_url: String,
    pub token: SecretString,
    /// Attach the token to builds listing requests as well as log requests
    pub authenticate_builds: bool,
}

impl TravisSettings {
    pub fn new(base_url: &str, token: SecretString) -> Self {
        Self {
            base_url: normalize_base_url(base_url),
            token,
            authenticate_builds: false,
        }
    }

    pub fn with_authenticated_builds(mut self, enabled: bool) -> Self {
        self.authenticate_builds = enabled;
        self
    }

    pub fn builds_url(&self, full_name: &str) -> String {
        format!(
            "{}/repos/{}/builds?limit={BUILDS_LIMIT}",
            self.base_url,
            full_name.trim_matches('/')
        )
    }

    pub fn job_log_url(&self, job_id: u64) -> String {
        format!("{}/v3/job/{job_id}/log.txt", self.base_url)
    }
}

fn normalize_base_url(url: &str) -> String {
    let trimmed = url.trim();
    if trimmed.is_empty() {
        DEFAULT_BASE_URL.to_string()
    } else {
        trimmed.trim_end_matches('/').to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settings(base: &str) -> TravisSettings {
        TravisSettings::new(base, SecretString::from("t0ken".to_string()))
    }

    #[test]
    fn test_builds_url() {
        assert_eq!(
            settings(DEFAULT_BASE_URL).builds_url("acme/widgets"),
            "https://api.travis-ci.org/repos/acme/widgets/builds?limit=100"
        );
    }

    #[test]
    fn test_job_log_url() {
        assert_eq!(
            settings("https://api.travis-ci.com/").job_log_url(42),
            "https://api.travis-ci.com/v3/job/42/log.txt"
        );
    }

    #[test]
    fn test_empty_base_url_uses_default() {
        assert_eq!(settings("  ").base_url, DEFAULT_BASE_URL);
        assert!(!settings("").authenticate_builds);
    }
}
