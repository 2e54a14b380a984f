//! Request DTOs for the Text-TV tools
//!
//! Tool arguments arrive as loose JSON objects. Each input type deserializes
//! them with defaults applied, then `validate` checks the documented domain.

use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value;

use crate::catalog::{
    Category, NewsCategory, SportsCategory, TvChannel, WeatherRegion, PAGE_MAX, PAGE_MIN,
};
use crate::error::{Result, TextTvError};

/// Longest accepted search query, in characters
pub const MAX_QUERY_LENGTH: usize = 100;
pub const MAX_SEARCH_RESULTS: i64 = 50;
pub const MAX_BROWSE_LIMIT: i64 = 100;

/// Deserializes tool arguments and validates them.
///
/// Missing arguments are treated as an empty object.
pub fn parse_input<T: DeserializeOwned + Validate>(args: Value) -> Result<T> {
    let args = if args.is_null() {
        Value::Object(Default::default())
    } else {
        args
    };

    let input: T = serde_json::from_value(args)?;
    if let Some(error_msg) = input.validate() {
        return Err(TextTvError::Validation(error_msg));
    }
    Ok(input)
}

/// Domain check run after deserialization.
pub trait Validate {
    /// Returns an error message if validation fails, None if valid.
    fn validate(&self) -> Option<String>;
}

fn validate_page(page: i64) -> Option<String> {
    if page < i64::from(PAGE_MIN) {
        return Some(format!("Page number must be at least {}", PAGE_MIN));
    }
    if page > i64::from(PAGE_MAX) {
        return Some(format!("Page number must be at most {}", PAGE_MAX));
    }
    None
}

/// Input for `texttv_get_page` and `texttv_get_subpages`
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GetPageInput {
    pub page: i64,
    #[serde(default)]
    pub include_plain_text: bool,
}

impl GetPageInput {
    /// Page number, valid once `validate` has passed.
    pub fn page_number(&self) -> u16 {
        u16::try_from(self.page).unwrap_or(PAGE_MIN)
    }
}

impl Validate for GetPageInput {
    fn validate(&self) -> Option<String> {
        validate_page(self.page)
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GetNewsInput {
    #[serde(default)]
    pub category: NewsCategory,
    #[serde(default)]
    pub include_plain_text: bool,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GetSportsInput {
    #[serde(default)]
    pub category: SportsCategory,
    #[serde(default)]
    pub include_plain_text: bool,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GetWeatherInput {
    #[serde(default)]
    pub region: WeatherRegion,
    #[serde(default)]
    pub include_plain_text: bool,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GetTvScheduleInput {
    #[serde(default)]
    pub channel: TvChannel,
    #[serde(default)]
    pub include_plain_text: bool,
}

// Enum selectors are checked by deserialization itself
impl Validate for GetNewsInput {
    fn validate(&self) -> Option<String> {
        None
    }
}

impl Validate for GetSportsInput {
    fn validate(&self) -> Option<String> {
        None
    }
}

impl Validate for GetWeatherInput {
    fn validate(&self) -> Option<String> {
        None
    }
}

impl Validate for GetTvScheduleInput {
    fn validate(&self) -> Option<String> {
        None
    }
}

fn default_max_results() -> i64 {
    10
}

/// Input for `texttv_search`
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchInput {
    pub query: String,
    #[serde(default)]
    pub category: Option<Category>,
    #[serde(default = "default_max_results")]
    pub max_results: i64,
    #[serde(default)]
    pub include_plain_text: bool,
}

impl SearchInput {
    pub fn max_results(&self) -> usize {
        usize::try_from(self.max_results).unwrap_or(0)
    }
}

impl Validate for SearchInput {
    fn validate(&self) -> Option<String> {
        let length = self.query.chars().count();
        if length == 0 {
            return Some("Search query must not be empty".to_string());
        }
        if length > MAX_QUERY_LENGTH {
            return Some(format!(
                "Search query exceeds maximum length of {} characters",
                MAX_QUERY_LENGTH
            ));
        }
        if !(1..=MAX_SEARCH_RESULTS).contains(&self.max_results) {
            return Some(format!(
                "maxResults must be between 1 and {}",
                MAX_SEARCH_RESULTS
            ));
        }
        None
    }
}

fn default_limit() -> i64 {
    20
}

/// Input for `texttv_browse_category`
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BrowseCategoryInput {
    pub category: Category,
    #[serde(default)]
    pub include_content: bool,
    #[serde(default = "default_limit")]
    pub limit: i64,
}

impl BrowseCategoryInput {
    pub fn limit(&self) -> usize {
        usize::try_from(self.limit).unwrap_or(0)
    }
}

impl Validate for BrowseCategoryInput {
    fn validate(&self) -> Option<String> {
        if !(1..=MAX_BROWSE_LIMIT).contains(&self.limit) {
            return Some(format!("limit must be between 1 and {}", MAX_BROWSE_LIMIT));
        }
        None
    }
}
