//! Travis CI backend for ciharvest
//!
//! Lists a repository's builds through the v2 API and downloads job logs
//! through the v3 API.
//!
//! # Architecture
//!
//! - `client` - HTTP client implementing `CiProvider`
//! - `types` - builds response wire types
//! - `mapper` - dual-shape decoding into the shared build model
//! - `config` - base URL and token settings

mod client;
mod config;
mod mapper;
mod types;

pub use client::TravisClient;
pub use config::{
    TravisSettings,
    BUILDS_LIMIT,
    DEFAULT_BASE_URL,
};
pub use mapper::decode_builds;
