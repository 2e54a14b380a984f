//! Text-TV upstream
//!
//! The content provider the fetch handlers read through. Only the trait is
//! consumed by the rest of the crate; `HttpTextTvClient` is the live binding.

mod client;
mod record;

use std::collections::BTreeMap;

use async_trait::async_trait;

use crate::error::Result;

pub use client::{HttpTextTvClient, TextTvClientConfig};
pub use record::PageRecord;

/// Read access to Text-TV pages.
///
/// Every method may fail with `TextTvError::Upstream`; callers must not cache
/// a failure.
#[async_trait]
pub trait TextTvProvider: Send + Sync {
    /// First (current) subpage of `page`.
    async fn get_page(&self, page: u16, include_plain_text: bool) -> Result<PageRecord>;

    /// One record per page number in `start..=end`, ordered by page number.
    /// Pages the provider has no content for are simply absent.
    async fn get_page_range(
        &self,
        start: u16,
        end: u16,
        include_plain_text: bool,
    ) -> Result<BTreeMap<u16, PageRecord>>;

    /// Every rotation variant of `page`; empty when there are none.
    async fn get_all_subpages(&self, page: u16, include_plain_text: bool)
        -> Result<Vec<PageRecord>>;

    /// Pages in `start..=end` whose content matches `query`.
    async fn search(
        &self,
        query: &str,
        start: u16,
        end: u16,
        include_plain_text: bool,
    ) -> Result<BTreeMap<u16, PageRecord>>;
}
