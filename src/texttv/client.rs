//! HTTP binding to the texttv.nu API.

use std::collections::BTreeMap;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use tracing::debug;

use super::{PageRecord, TextTvProvider};
use crate::error::{Result, TextTvError};

#[derive(Debug, Clone)]
pub struct TextTvClientConfig {
    pub base_url: String,
    pub app_id: String,
    pub timeout: Duration,
}

impl TextTvClientConfig {
    pub fn new(base_url: impl Into<String>, app_id: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            app_id: app_id.into(),
            timeout: Duration::from_secs(10),
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

/// Live Text-TV provider. No retries; a failed call surfaces immediately.
#[derive(Debug, Clone)]
pub struct HttpTextTvClient {
    client: Client,
    config: TextTvClientConfig,
}

impl HttpTextTvClient {
    pub fn new(config: TextTvClientConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.timeout)
            .user_agent(concat!("texttv_mcp/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self { client, config })
    }

    fn url_for(&self, start: u16, end: u16) -> String {
        let base = self.config.base_url.trim_end_matches('/');
        if start == end {
            format!("{}/get/{}", base, start)
        } else {
            format!("{}/get/{}-{}", base, start, end)
        }
    }

    async fn fetch(&self, start: u16, end: u16, include_plain_text: bool) -> Result<Vec<PageRecord>> {
        let url = self.url_for(start, end);
        let mut query = vec![("app", self.config.app_id.as_str())];
        if include_plain_text {
            query.push(("includePlainTextContent", "1"));
        }

        debug!("Fetching Text-TV pages {}-{}", start, end);

        let response = self.client.get(&url).query(&query).send().await?;

        if !response.status().is_success() {
            return Err(TextTvError::Upstream(format!(
                "Text-TV API returned {} for pages {}-{}",
                response.status(),
                start,
                end
            )));
        }

        let body = response.text().await?;
        serde_json::from_str(&body).map_err(|e| {
            TextTvError::Upstream(format!("Malformed Text-TV response: {}", e))
        })
    }
}

/// Keeps the first record seen for each page number.
fn first_per_page(records: Vec<PageRecord>) -> BTreeMap<u16, PageRecord> {
    let mut pages = BTreeMap::new();
    for record in records {
        pages.entry(record.num).or_insert(record);
    }
    pages
}

/// Case-insensitive substring match against HTML and plain content.
fn matches_query(record: &PageRecord, needle: &str) -> bool {
    record.content.to_lowercase().contains(needle)
        || record
            .content_plain
            .as_deref()
            .is_some_and(|plain| plain.to_lowercase().contains(needle))
}

#[async_trait]
impl TextTvProvider for HttpTextTvClient {
    async fn get_page(&self, page: u16, include_plain_text: bool) -> Result<PageRecord> {
        let records = self.fetch(page, page, include_plain_text).await?;
        records
            .into_iter()
            .find(|record| record.num == page)
            .ok_or_else(|| TextTvError::Upstream(format!("No content for page {}", page)))
    }

    async fn get_page_range(
        &self,
        start: u16,
        end: u16,
        include_plain_text: bool,
    ) -> Result<BTreeMap<u16, PageRecord>> {
        let records = self.fetch(start, end, include_plain_text).await?;
        Ok(first_per_page(records))
    }

    async fn get_all_subpages(
        &self,
        page: u16,
        include_plain_text: bool,
    ) -> Result<Vec<PageRecord>> {
        let records = self.fetch(page, page, include_plain_text).await?;
        Ok(records.into_iter().filter(|record| record.num == page).collect())
    }

    async fn search(
        &self,
        query: &str,
        start: u16,
        end: u16,
        include_plain_text: bool,
    ) -> Result<BTreeMap<u16, PageRecord>> {
        let needle = query.to_lowercase();
        let pages = self.get_page_range(start, end, include_plain_text).await?;
        Ok(pages
            .into_iter()
            .filter(|(_, record)| matches_query(record, &needle))
            .collect())
    }
}
