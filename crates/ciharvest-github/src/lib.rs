//! GitHub backend for ciharvest
//!
//! Implements `SourceHost` on top of octocrab: organization members,
//! organization repositories and members' personal repositories, one page
//! at a time.

mod client;
mod config;
mod types;

pub use client::GitHubClient;
pub use config::{
    build_api_url,
    DEFAULT_BASE_URL,
};
