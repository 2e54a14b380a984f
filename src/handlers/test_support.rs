//! In-memory provider for handler tests.

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;

use crate::cache::TtlCache;
use crate::error::{Result, TextTvError};
use crate::texttv::{PageRecord, TextTvProvider};

use super::TextTvService;

pub fn record(num: u16, content: &str) -> PageRecord {
    PageRecord {
        num,
        id: format!("{}-1", num),
        title: Some(format!("Sida {}", num)),
        content: content.to_string(),
        content_plain: Some(content.replace("<b>", "").replace("</b>", "")),
        date_updated_unix: 1_700_000_000,
        next_page: Some(num + 1),
        prev_page: Some(num - 1),
    }
}

/// Serves a fixed page table and counts every upstream call.
#[derive(Default)]
pub struct StubProvider {
    pages: BTreeMap<u16, Vec<PageRecord>>,
    calls: AtomicUsize,
    failing: AtomicBool,
}

impl StubProvider {
    pub fn with_pages(records: Vec<PageRecord>) -> Self {
        let mut pages: BTreeMap<u16, Vec<PageRecord>> = BTreeMap::new();
        for record in records {
            pages.entry(record.num).or_default().push(record);
        }
        Self {
            pages,
            ..Self::default()
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    fn enter(&self) -> Result<()> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.failing.load(Ordering::SeqCst) {
            return Err(TextTvError::Upstream("connection refused".to_string()));
        }
        Ok(())
    }

    fn range(&self, start: u16, end: u16) -> BTreeMap<u16, PageRecord> {
        self.pages
            .range(start..=end)
            .filter_map(|(num, variants)| variants.first().map(|r| (*num, r.clone())))
            .collect()
    }
}

#[async_trait]
impl TextTvProvider for StubProvider {
    async fn get_page(&self, page: u16, _include_plain_text: bool) -> Result<PageRecord> {
        self.enter()?;
        self.pages
            .get(&page)
            .and_then(|variants| variants.first().cloned())
            .ok_or_else(|| TextTvError::Upstream(format!("Page {} not found", page)))
    }

    async fn get_page_range(
        &self,
        start: u16,
        end: u16,
        _include_plain_text: bool,
    ) -> Result<BTreeMap<u16, PageRecord>> {
        self.enter()?;
        Ok(self.range(start, end))
    }

    async fn get_all_subpages(
        &self,
        page: u16,
        _include_plain_text: bool,
    ) -> Result<Vec<PageRecord>> {
        self.enter()?;
        Ok(self.pages.get(&page).cloned().unwrap_or_default())
    }

    async fn search(
        &self,
        query: &str,
        start: u16,
        end: u16,
        _include_plain_text: bool,
    ) -> Result<BTreeMap<u16, PageRecord>> {
        self.enter()?;
        let needle = query.to_lowercase();
        Ok(self
            .range(start, end)
            .into_iter()
            .filter(|(_, r)| r.content.to_lowercase().contains(&needle))
            .collect())
    }
}

pub fn service(provider: Arc<StubProvider>) -> TextTvService {
    TextTvService::new(Arc::new(TtlCache::new()), provider)
}
