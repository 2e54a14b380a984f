//! Response DTOs
//!
//! Result shapes returned by the fetch handlers, plus the HTTP-only bodies.
//! Optional fields are omitted from JSON when absent.

use serde::Serialize;

use crate::cache::CacheStats;
use crate::catalog::PageRange;
use crate::config::{SERVER_NAME, SERVER_VERSION};
use crate::texttv::PageRecord;

/// Result of `texttv_get_page`
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageResult {
    pub page: u16,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    pub content: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content_plain: Option<String>,
    pub updated_at: String,
    pub updated_unix: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_page: Option<u16>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prev_page: Option<u16>,
}

impl From<&PageRecord> for PageResult {
    fn from(record: &PageRecord) -> Self {
        Self {
            page: record.num,
            title: record.title.clone(),
            content: record.content.clone(),
            content_plain: record.content_plain.clone(),
            updated_at: record.updated_at(),
            updated_unix: record.date_updated_unix,
            next_page: record.next_page,
            prev_page: record.prev_page,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubpageResult {
    pub page: u16,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    pub content: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content_plain: Option<String>,
    pub updated_at: String,
    pub updated_unix: i64,
    pub id: String,
}

impl From<&PageRecord> for SubpageResult {
    fn from(record: &PageRecord) -> Self {
        Self {
            page: record.num,
            title: record.title.clone(),
            content: record.content.clone(),
            content_plain: record.content_plain.clone(),
            updated_at: record.updated_at(),
            updated_unix: record.date_updated_unix,
            id: record.id.clone(),
        }
    }
}

/// Result of `texttv_get_subpages`
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubpagesResult {
    pub page: u16,
    pub subpage_count: usize,
    pub subpages: Vec<SubpageResult>,
}

/// One page inside a news or sports section
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SectionPage {
    pub page: u16,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    pub content: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content_plain: Option<String>,
    pub updated_at: String,
    pub updated_unix: i64,
}

impl From<&PageRecord> for SectionPage {
    fn from(record: &PageRecord) -> Self {
        Self {
            page: record.num,
            title: record.title.clone(),
            content: record.content.clone(),
            content_plain: record.content_plain.clone(),
            updated_at: record.updated_at(),
            updated_unix: record.date_updated_unix,
        }
    }
}

/// Result of `texttv_get_news` and `texttv_get_sports`
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SectionResult {
    pub category: String,
    pub category_label: String,
    pub page_count: usize,
    pub pages: Vec<SectionPage>,
}

/// Result of `texttv_get_weather`
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WeatherResult {
    pub region: String,
    pub region_label: String,
    pub page: u16,
    pub content: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content_plain: Option<String>,
    pub updated_at: String,
    pub updated_unix: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TvSchedulePage {
    pub page: u16,
    pub channel: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    pub content: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content_plain: Option<String>,
    pub updated_at: String,
    pub updated_unix: i64,
}

/// Result of `texttv_get_tv_schedule`
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TvScheduleResult {
    pub channel: String,
    pub channel_label: String,
    pub page_count: usize,
    pub pages: Vec<TvSchedulePage>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchHit {
    pub page: u16,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    pub content: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content_plain: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub match_context: Option<String>,
    pub updated_at: String,
    pub updated_unix: i64,
}

/// Result of `texttv_search`
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResult {
    pub query: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    pub total_results: usize,
    pub results: Vec<SearchHit>,
}

impl SearchResult {
    /// Copy limited to the first `max` hits; `total_results` follows the cut.
    pub fn truncated(&self, max: usize) -> Self {
        let results: Vec<SearchHit> = self.results.iter().take(max).cloned().collect();
        Self {
            query: self.query.clone(),
            category: self.category.clone(),
            total_results: self.total_results.min(max),
            results,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryPage {
    pub page: u16,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    pub updated_at: String,
    pub updated_unix: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content_plain: Option<String>,
}

/// Result of `texttv_browse_category`
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BrowseCategoryResult {
    pub category: String,
    pub category_label: String,
    pub category_label_en: String,
    pub page_range: PageRange,
    pub page_count: usize,
    pub pages: Vec<CategoryPage>,
}

impl BrowseCategoryResult {
    /// Copy limited to the first `limit` pages.
    pub fn truncated(&self, limit: usize) -> Self {
        let pages: Vec<CategoryPage> = self.pages.iter().take(limit).cloned().collect();
        Self {
            category: self.category.clone(),
            category_label: self.category_label.clone(),
            category_label_en: self.category_label_en.clone(),
            page_range: self.page_range,
            page_count: self.page_count.min(limit),
            pages,
        }
    }
}

// == HTTP Bodies ==

/// Response body for the health endpoint (GET /health)
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub server: String,
    pub version: String,
    /// Current timestamp in ISO 8601 format
    pub timestamp: String,
}

impl HealthResponse {
    pub fn ok() -> Self {
        Self {
            status: "ok".to_string(),
            server: SERVER_NAME.to_string(),
            version: SERVER_VERSION.to_string(),
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }
}

/// Response body for the stats endpoint (GET /stats)
#[derive(Debug, Clone, Serialize)]
pub struct StatsResponse {
    pub hits: u64,
    pub misses: u64,
    pub expired_on_read: u64,
    pub swept: u64,
    /// Stored entries, expired-but-unswept included
    pub total_entries: usize,
    pub hit_rate: f64,
}

impl From<CacheStats> for StatsResponse {
    fn from(stats: CacheStats) -> Self {
        Self {
            hit_rate: stats.hit_rate(),
            hits: stats.hits,
            misses: stats.misses,
            expired_on_read: stats.expired_on_read,
            swept: stats.swept,
            total_entries: stats.total_entries,
        }
    }
}
