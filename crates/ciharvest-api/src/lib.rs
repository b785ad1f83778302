//! Shared building blocks for ciharvest
//!
//! - `types` - repositories, builds and job log identities
//! - `pagination` - cursor-following listing collection
//! - `source` - traits implemented by the hosting and CI backends
//! - `error` - the error type shared by every crate

pub mod error;
pub mod pagination;
pub mod source;
pub mod types;

pub use error::{
    HarvestError,
    HarvestResult,
};
pub use pagination::{
    Page,
    PageRequest,
    Paginator,
    DEFAULT_PER_PAGE,
};
pub use source::{
    CiProvider,
    SourceHost,
};
pub use types::{
    Build,
    BuildConfig,
    BuildList,
    JobOutcome,
    LogKey,
    Member,
    Repository,
    RepositoryOwner,
    Script,
    ScriptShape,
    WriteResult,
};
