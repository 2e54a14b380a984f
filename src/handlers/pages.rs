//! Single page and subpage handlers.

use crate::cache::keys::{page_key, subpages_key};
use crate::config::ttl;
use crate::error::Result;
use crate::models::{GetPageInput, PageResult, SubpageResult, SubpagesResult};

use super::{ensure_valid, TextTvService};

impl TextTvService {
    /// Current version of one page.
    pub async fn get_page(&self, input: &GetPageInput) -> Result<PageResult> {
        ensure_valid(input)?;
        let page = input.page_number();
        let plain = input.include_plain_text;

        self.read_through(page_key(page, plain), ttl::PAGE, || async move {
            let record = self.provider().get_page(page, plain).await?;
            Ok(PageResult::from(&record))
        })
        .await
    }

    /// Every rotating subpage of one page.
    pub async fn get_subpages(&self, input: &GetPageInput) -> Result<SubpagesResult> {
        ensure_valid(input)?;
        let page = input.page_number();
        let plain = input.include_plain_text;

        self.read_through(subpages_key(page, plain), ttl::PAGE, || async move {
            let records = self.provider().get_all_subpages(page, plain).await?;
            let subpages: Vec<SubpageResult> = records.iter().map(SubpageResult::from).collect();
            Ok(SubpagesResult {
                page,
                subpage_count: subpages.len(),
                subpages,
            })
        })
        .await
    }
}
