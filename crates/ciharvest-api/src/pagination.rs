//! Cursor-following collection of paged listings

use std::future::Future;

use serde::{
    Deserialize,
    Serialize,
};

use crate::HarvestResult;

pub const DEFAULT_PER_PAGE: u8 = 10;

/// One page of a listing plus the cursor to the next one
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub next_page: Option<u32>,
}

impl<T> Page<T> {
    pub fn new(items: Vec<T>, next_page: Option<u32>) -> Self {
        Self { items, next_page }
    }

    pub fn last(items: Vec<T>) -> Self {
        Self::new(items, None)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageRequest {
    pub page: u32,
    pub per_page: u8,
}

/// Fetches every page of a listing, starting at page 1
#[derive(Debug, Clone, Copy)]
pub struct Paginator {
    pub per_page: u8,
}

impl Default for Paginator {
    fn default() -> Self {
        Self {
            per_page: DEFAULT_PER_PAGE,
        }
    }
}

impl Paginator {
    pub fn new(per_page: u8) -> Self {
        Self {
            per_page: per_page.max(1),
        }
    }

    /// Collects all items in provider order.
    ///
    /// The first error aborts the listing and nothing collected so far is
    /// returned. A next page that does not move forward ends the listing.
    ///
    /// # Example
    ///
    /// ```ignore
    /// let repos = Paginator::default()
    ///     .collect(|req| host.list_org_repos("acme", req))
    ///     .await?;
    /// ```
    pub async fn collect<F, Fut, T>(&self, mut fetch: F) -> HarvestResult<Vec<T>>
    where
        F: FnMut(PageRequest) -> Fut,
        Fut: Future<Output = HarvestResult<Page<T>>>,
    {
        let mut items = Vec::new();
        let mut page = 1;

        loop {
            let response = fetch(PageRequest {
                page,
                per_page: self.per_page,
            })
            .await?;
            items.extend(response.items);

            match response.next_page {
                Some(next) if next > page => page = next,
                _ => break,
            }
        }

        Ok(items)
    }
}
