use std::path::PathBuf;

use ciharvest_api::DEFAULT_PER_PAGE;
use ciharvest_core::{
    HarvestConfig,
    DEFAULT_CONCURRENCY,
};
use clap::{
    ArgAction,
    Parser,
};
use secrecy::SecretString;

#[derive(Debug, Parser)]
#[command(
    name = "ciharvest",
    version,
    about = "Download the CI job logs of every repository in a GitHub organization"
)]
pub struct Cli {
    /// The org to scan (this is case sensitive)
    #[arg(long, env = "CIHARVEST_ORG")]
    pub org: String,

    /// GitHub token used to list the org's members and repositories
    #[arg(long, env = "GITHUB_TOKEN", hide_env_values = true)]
    pub github_token: String,

    /// Travis token used to download job logs
    #[arg(long, env = "TRAVIS_TOKEN", hide_env_values = true)]
    pub travis_token: String,

    /// Also harvest the personal repositories of every org member
    #[arg(
        long,
        action = ArgAction::Set,
        default_value_t = true,
        num_args = 0..=1,
        default_missing_value = "true"
    )]
    pub expand: bool,

    /// Directory the `.log` files are written to
    #[arg(short, long, env = "CIHARVEST_OUTPUT_DIR", default_value = ".")]
    pub output_dir: PathBuf,

    /// Maximum number of logs downloaded at once
    #[arg(short = 'j', long, default_value_t = DEFAULT_CONCURRENCY)]
    pub concurrency: usize,

    /// Items requested per page when listing members and repositories
    #[arg(long, default_value_t = DEFAULT_PER_PAGE)]
    pub page_size: u8,

    /// GitHub or GitHub Enterprise base URL
    #[arg(long, env = "CIHARVEST_GITHUB_URL", default_value = ciharvest_github::DEFAULT_BASE_URL)]
    pub github_url: String,

    /// Travis CI API base URL
    #[arg(long, env = "CIHARVEST_TRAVIS_URL", default_value = ciharvest_travis::DEFAULT_BASE_URL)]
    pub travis_url: String,

    /// Send the Travis token with builds listing requests too
    #[arg(long)]
    pub authenticate_builds: bool,

    /// Log at debug level
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    pub fn to_config(&self) -> HarvestConfig {
        let mut config = HarvestConfig::new(
            self.org.clone(),
            SecretString::from(self.github_token.clone()),
            SecretString::from(self.travis_token.clone()),
        );
        config.expand_members = self.expand;
        config.output_dir = self.output_dir.clone();
        config.concurrency = self.concurrency;
        config.github_api_url = ciharvest_github::build_api_url(&self.github_url);
        config.travis_url = self.travis_url.clone();
        config.authenticate_builds = self.authenticate_builds;
        config
    }
}
