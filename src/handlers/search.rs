//! Search and category browsing.

use crate::cache::keys::{category_key, search_key};
use crate::catalog::{Category, PageRange};
use crate::config::ttl;
use crate::error::Result;
use crate::models::{
    BrowseCategoryInput, BrowseCategoryResult, CategoryPage, SearchHit, SearchInput, SearchResult,
};

use super::{ensure_valid, TextTvService};

/// Range searched when no category is given
const DEFAULT_SEARCH_RANGE: PageRange = PageRange::new(100, 199);
/// Characters kept on each side of a match
const CONTEXT_CHARS: usize = 100;

impl TextTvService {
    /// Searches one category (news by default). The whole hit list is
    /// cached; `maxResults` only shapes what is returned.
    pub async fn search(&self, input: &SearchInput) -> Result<SearchResult> {
        ensure_valid(input)?;
        let range = input
            .category
            .map(|c| c.range())
            .unwrap_or(DEFAULT_SEARCH_RANGE);
        let plain = input.include_plain_text;
        let query = input.query.as_str();

        let key = search_key(query, range.start, range.end);
        let full = self
            .read_through(key, ttl::SEARCH, || async move {
                let records = self
                    .provider()
                    .search(query, range.start, range.end, plain)
                    .await?;

                let results: Vec<SearchHit> = records
                    .values()
                    .map(|record| {
                        let haystack = if plain {
                            record.best_text()
                        } else {
                            record.content.as_str()
                        };
                        SearchHit {
                            page: record.num,
                            title: record.title.clone(),
                            content: record.content.clone(),
                            content_plain: record.content_plain.clone(),
                            match_context: extract_match_context(haystack, query),
                            updated_at: record.updated_at(),
                            updated_unix: record.date_updated_unix,
                        }
                    })
                    .collect();

                Ok(SearchResult {
                    query: query.to_string(),
                    category: input.category.map(|c| c.as_str().to_string()),
                    total_results: results.len(),
                    results,
                })
            })
            .await?;

        Ok(full.truncated(input.max_results()))
    }

    /// Lists the first `limit` pages of a category.
    pub async fn browse_category(&self, input: &BrowseCategoryInput) -> Result<BrowseCategoryResult> {
        ensure_valid(input)?;
        let category = input.category;
        let include_content = input.include_content;
        let limit = input.limit();

        let key = category_key(category.as_str(), include_content);
        let result = self
            .read_through(key, ttl::CATEGORY, || async move {
                let range = category.range();
                let fetch_end = browse_end(range, limit);
                let records = self
                    .provider()
                    .get_page_range(range.start, fetch_end, include_content)
                    .await?;

                let pages: Vec<CategoryPage> = records
                    .values()
                    .map(|record| CategoryPage {
                        page: record.num,
                        title: record.title.clone(),
                        updated_at: record.updated_at(),
                        updated_unix: record.date_updated_unix,
                        content: include_content.then(|| record.content.clone()),
                        content_plain: if include_content {
                            record.content_plain.clone()
                        } else {
                            None
                        },
                    })
                    .collect();

                Ok(browse_result(category, pages))
            })
            .await?;

        Ok(result.truncated(limit))
    }
}

fn browse_end(range: PageRange, limit: usize) -> u16 {
    let span = u16::try_from(limit.saturating_sub(1)).unwrap_or(u16::MAX);
    range.start.saturating_add(span).min(range.end)
}

fn browse_result(category: Category, pages: Vec<CategoryPage>) -> BrowseCategoryResult {
    BrowseCategoryResult {
        category: category.as_str().to_string(),
        category_label: category.label().to_string(),
        category_label_en: category.label_en().to_string(),
        page_range: category.range(),
        page_count: pages.len(),
        pages,
    }
}

/// Text around the first case-insensitive occurrence of `query`.
///
/// Keeps up to 100 characters either side, replaces HTML tags with spaces,
/// collapses whitespace and marks clipped ends with `...`.
pub fn extract_match_context(content: &str, query: &str) -> Option<String> {
    let chars: Vec<char> = content.chars().collect();
    let folded: Vec<char> = chars.iter().map(|c| fold(*c)).collect();
    let needle: Vec<char> = query.chars().map(fold).collect();

    if needle.is_empty() || needle.len() > folded.len() {
        return None;
    }
    let index = folded
        .windows(needle.len())
        .position(|window| window == needle.as_slice())?;

    let start = index.saturating_sub(CONTEXT_CHARS);
    let end = (index + needle.len() + CONTEXT_CHARS).min(chars.len());

    let excerpt: String = chars[start..end].iter().collect();
    let cleaned = collapse_whitespace(&strip_tags(&excerpt));

    let mut context = String::with_capacity(cleaned.len() + 6);
    if start > 0 {
        context.push_str("...");
    }
    context.push_str(&cleaned);
    if end < chars.len() {
        context.push_str("...");
    }
    Some(context)
}

fn fold(c: char) -> char {
    c.to_lowercase().next().unwrap_or(c)
}

/// Replaces every complete `<...>` tag with a space.
fn strip_tags(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut rest = text;
    while let Some(open) = rest.find('<') {
        match rest[open..].find('>') {
            Some(close) => {
                out.push_str(&rest[..open]);
                out.push(' ');
                rest = &rest[open + close + 1..];
            }
            None => break,
        }
    }
    out.push_str(rest);
    out
}

fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::super::test_support::{record, service, StubProvider};
    use super::*;
    use crate::error::TextTvError;

    fn search_input(query: &str, max_results: i64) -> SearchInput {
        SearchInput {
            query: query.to_string(),
            category: None,
            max_results,
            include_plain_text: false,
        }
    }

    fn news_pages(count: u16) -> Arc<StubProvider> {
        let records = (0..count)
            .map(|i| record(100 + i, &format!("<b>Sverige</b> nyhet {}", i)))
            .collect();
        Arc::new(StubProvider::with_pages(records))
    }

    #[test]
    fn test_context_short_content_unclipped() {
        let context = extract_match_context("<b>Hej</b> Sverige idag", "sverige").unwrap();
        assert_eq!(context, "Hej Sverige idag");
    }

    #[test]
    fn test_context_clipped_both_sides() {
        let content = format!("{}MATCH{}", "a".repeat(150), "b".repeat(150));
        let context = extract_match_context(&content, "match").unwrap();

        assert!(context.starts_with("..."));
        assert!(context.ends_with("..."));
        assert_eq!(context.chars().count(), 3 + 100 + 5 + 100 + 3);
    }

    #[test]
    fn test_context_missing_query() {
        assert_eq!(extract_match_context("nothing here", "absent"), None);
    }

    #[test]
    fn test_context_non_ascii() {
        let context = extract_match_context("Väder i MALMÖ", "malmö").unwrap();
        assert_eq!(context, "Väder i MALMÖ");
    }

    #[test]
    fn test_strip_tags_keeps_unclosed_bracket() {
        assert_eq!(strip_tags("a<b>c</b>d"), "a c d");
        assert_eq!(strip_tags("x < y"), "x < y");
    }

    #[test]
    fn test_browse_end() {
        assert_eq!(browse_end(PageRange::new(100, 199), 20), 119);
        assert_eq!(browse_end(PageRange::new(400, 499), 100), 499);
        assert_eq!(browse_end(PageRange::new(100, 199), 1), 100);
    }

    #[tokio::test]
    async fn test_search_defaults_to_news_range() {
        let stub = Arc::new(StubProvider::with_pages(vec![
            record(110, "Sverige vann"),
            record(330, "Sverige i fotboll"),
        ]));
        let svc = service(stub);

        let result = svc.search(&search_input("sverige", 10)).await.unwrap();
        assert_eq!(result.total_results, 1);
        assert_eq!(result.results[0].page, 110);
        assert_eq!(result.category, None);
        assert_eq!(
            result.results[0].match_context.as_deref(),
            Some("Sverige vann")
        );
        assert!(svc.cache().has("search:sverige:100-199"));
    }

    #[tokio::test]
    async fn test_search_category_range() {
        let stub = Arc::new(StubProvider::with_pages(vec![
            record(110, "Sverige vann"),
            record(330, "Sverige i fotboll"),
        ]));
        let svc = service(stub);
        let mut input = search_input("sverige", 10);
        input.category = Some(Category::Sports);

        let result = svc.search(&input).await.unwrap();
        assert_eq!(result.category.as_deref(), Some("sports"));
        assert_eq!(result.results[0].page, 330);
        assert!(svc.cache().has("search:sverige:300-399"));
    }

    #[tokio::test]
    async fn test_search_truncates_on_miss_and_hit() {
        let stub = news_pages(8);
        let svc = service(stub.clone());

        let first = svc.search(&search_input("sverige", 3)).await.unwrap();
        assert_eq!(first.results.len(), 3);
        assert_eq!(first.total_results, 3);

        let second = svc.search(&search_input("sverige", 5)).await.unwrap();
        assert_eq!(second.results.len(), 5);
        assert_eq!(second.total_results, 5);
        assert_eq!(stub.calls(), 1);
    }

    #[tokio::test]
    async fn test_search_validation_before_upstream() {
        let stub = news_pages(1);
        let svc = service(stub.clone());

        let result = svc.search(&search_input("", 10)).await;
        assert!(matches!(result, Err(TextTvError::Validation(_))));
        assert_eq!(stub.calls(), 0);
    }

    #[tokio::test]
    async fn test_search_key_shared_across_plain_text_flag() {
        let stub = news_pages(2);
        let svc = service(stub.clone());

        let html = svc.search(&search_input("sverige", 10)).await.unwrap();
        let mut input = search_input("sverige", 10);
        input.include_plain_text = true;
        let plain = svc.search(&input).await.unwrap();

        // Within the TTL the plain-text request is served the HTML hits
        assert_eq!(stub.calls(), 1);
        assert_eq!(plain.results, html.results);
        assert!(plain.results[0].match_context.is_some());
    }

    #[tokio::test]
    async fn test_browse_metadata_only() {
        let stub = news_pages(30);
        let svc = service(stub);
        let input = BrowseCategoryInput {
            category: Category::News,
            include_content: false,
            limit: 5,
        };

        let result = svc.browse_category(&input).await.unwrap();
        assert_eq!(result.category_label, "Nyheter");
        assert_eq!(result.category_label_en, "News");
        assert_eq!(result.page_range, PageRange::new(100, 199));
        assert_eq!(result.page_count, 5);
        assert!(result.pages.iter().all(|p| p.content.is_none()));
        assert!(svc.cache().has("category:news:meta"));
    }

    #[tokio::test]
    async fn test_browse_hit_applies_smaller_limit() {
        let stub = news_pages(30);
        let svc = service(stub.clone());
        let mut input = BrowseCategoryInput {
            category: Category::News,
            include_content: true,
            limit: 10,
        };

        let wide = svc.browse_category(&input).await.unwrap();
        assert_eq!(wide.page_count, 10);
        assert!(wide.pages[0].content.is_some());

        input.limit = 4;
        let narrow = svc.browse_category(&input).await.unwrap();
        assert_eq!(narrow.page_count, 4);
        assert_eq!(narrow.pages.len(), 4);
        assert_eq!(stub.calls(), 1);
        assert!(svc.cache().has("category:news:content"));
    }
}
