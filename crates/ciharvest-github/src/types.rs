//! Minimal GitHub REST response types
//!
//! Only the fields discovery needs are decoded; octocrab's `Page` handles
//! the `Link` header pagination around them.

use serde::{
    Deserialize,
    Serialize,
};

#[derive(Debug, Deserialize)]
pub(crate) struct User {
    pub login: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct Repository {
    pub id: u64,
    pub full_name: Option<String>,
}

#[derive(Debug, Serialize)]
pub(crate) struct ListParams {
    pub per_page: u8,
    pub page: u32,
}
