//! Fetch Handlers
//!
//! One handler per logical operation. Each validates its input, builds a cache
//! key, reads through the shared cache and on a miss calls the upstream,
//! shapes the record and stores it with the operation's TTL.
//!
//! Concurrent misses for the same key are not coalesced: each caller fetches
//! and writes, and the last write wins. Failed fetches are never stored.

mod pages;
mod search;
mod sections;

#[cfg(test)]
pub(crate) mod test_support;

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use tracing::debug;

use crate::cache::TtlCache;
use crate::error::{Result, TextTvError};
use crate::models::{
    BrowseCategoryResult, PageResult, SearchResult, SectionResult, SubpagesResult,
    TvScheduleResult, Validate, WeatherResult,
};
use crate::texttv::TextTvProvider;

pub use search::extract_match_context;

// == Cached Result ==
/// Every handler result shape, so one process-wide cache can hold them all.
#[derive(Debug, Clone)]
pub enum CachedResult {
    Page(PageResult),
    Subpages(SubpagesResult),
    Section(SectionResult),
    Weather(WeatherResult),
    TvSchedule(TvScheduleResult),
    Search(SearchResult),
    Category(BrowseCategoryResult),
}

/// A handler result that can live in the shared cache.
pub trait Cacheable: Clone + Sized {
    fn into_cached(self) -> CachedResult;
    fn from_cached(cached: CachedResult) -> Option<Self>;

    /// Whether a freshly fetched value should be stored at all.
    fn worth_caching(&self) -> bool {
        true
    }
}

macro_rules! impl_cacheable {
    ($ty:ty, $variant:ident) => {
        impl Cacheable for $ty {
            fn into_cached(self) -> CachedResult {
                CachedResult::$variant(self)
            }

            fn from_cached(cached: CachedResult) -> Option<Self> {
                match cached {
                    CachedResult::$variant(value) => Some(value),
                    _ => None,
                }
            }
        }
    };
}

impl_cacheable!(PageResult, Page);
impl_cacheable!(SectionResult, Section);
impl_cacheable!(WeatherResult, Weather);
impl_cacheable!(TvScheduleResult, TvSchedule);
impl_cacheable!(SearchResult, Search);
impl_cacheable!(BrowseCategoryResult, Category);

impl Cacheable for SubpagesResult {
    fn into_cached(self) -> CachedResult {
        CachedResult::Subpages(self)
    }

    fn from_cached(cached: CachedResult) -> Option<Self> {
        match cached {
            CachedResult::Subpages(value) => Some(value),
            _ => None,
        }
    }

    // A page without subpages is answered but not remembered
    fn worth_caching(&self) -> bool {
        self.subpage_count > 0
    }
}

pub(crate) fn ensure_valid<T: Validate>(input: &T) -> Result<()> {
    match input.validate() {
        Some(error_msg) => Err(TextTvError::Validation(error_msg)),
        None => Ok(()),
    }
}

// == Service ==
/// The handler set, sharing one cache and one upstream provider.
#[derive(Clone)]
pub struct TextTvService {
    cache: Arc<TtlCache<CachedResult>>,
    provider: Arc<dyn TextTvProvider>,
}

impl TextTvService {
    pub fn new(cache: Arc<TtlCache<CachedResult>>, provider: Arc<dyn TextTvProvider>) -> Self {
        Self { cache, provider }
    }

    pub fn cache(&self) -> &Arc<TtlCache<CachedResult>> {
        &self.cache
    }

    fn provider(&self) -> &dyn TextTvProvider {
        self.provider.as_ref()
    }

    /// Returns the cached value under `key`, or runs `fetch` and stores its
    /// result for `ttl`.
    async fn read_through<T, F, Fut>(&self, key: String, ttl: Duration, fetch: F) -> Result<T>
    where
        T: Cacheable,
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T>>,
    {
        if let Some(hit) = self.cache.get(&key).and_then(T::from_cached) {
            debug!("Cache hit: {}", key);
            return Ok(hit);
        }

        debug!("Cache miss: {}", key);
        let value = fetch().await?;

        if value.worth_caching() {
            self.cache.set(key, value.clone().into_cached(), ttl);
        }
        Ok(value)
    }
}
