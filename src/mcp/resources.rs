//! Read-only resources.
//!
//! Page-backed resources read through the cached `get_page` handler with
//! plain text enabled, so they share entries with the page tool.

use serde::Serialize;
use serde_json::{json, Value};

use crate::catalog::{news, sports, tv, weather, Category};
use crate::error::{Result, TextTvError};
use crate::handlers::TextTvService;
use crate::models::{GetPageInput, PageResult};

pub const CATEGORIES: &str = "texttv://categories";
pub const NEWS_LATEST: &str = "texttv://news/latest";
pub const SPORTS_LATEST: &str = "texttv://sports/latest";
pub const WEATHER_NATIONAL: &str = "texttv://weather/national";
pub const TV_TODAY: &str = "texttv://tv/today";

pub const MIME_TYPE: &str = "application/json";

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResourceDefinition {
    pub uri: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub mime_type: &'static str,
}

impl ResourceDefinition {
    const fn json(uri: &'static str, name: &'static str, description: &'static str) -> Self {
        Self {
            uri,
            name,
            description,
            mime_type: MIME_TYPE,
        }
    }
}

pub fn definitions() -> Vec<ResourceDefinition> {
    vec![
        ResourceDefinition::json(
            CATEGORIES,
            "Text-TV Categories",
            "List of available Text-TV categories with page ranges",
        ),
        ResourceDefinition::json(
            NEWS_LATEST,
            "Latest News",
            "Current main news from Text-TV page 100",
        ),
        ResourceDefinition::json(
            SPORTS_LATEST,
            "Latest Sports",
            "Current sports headlines from Text-TV page 300",
        ),
        ResourceDefinition::json(
            WEATHER_NATIONAL,
            "National Weather",
            "Current national weather forecast from Text-TV page 400",
        ),
        ResourceDefinition::json(
            TV_TODAY,
            "Today's TV Schedule",
            "Current TV schedule for SVT1 and SVT2",
        ),
    ]
}

/// Produces the JSON document behind `uri`.
pub async fn read(service: &TextTvService, uri: &str) -> Result<Value> {
    match uri {
        CATEGORIES => Ok(categories()),
        NEWS_LATEST => {
            let page = plain_page(service, news::MAIN).await?;
            Ok(headline(&page))
        }
        SPORTS_LATEST => {
            let page = plain_page(service, sports::MAIN).await?;
            Ok(headline(&page))
        }
        WEATHER_NATIONAL => {
            let page = plain_page(service, weather::NATIONAL).await?;
            Ok(json!({
                "page": page.page,
                "region": "national",
                "content": page.content,
                "contentPlain": page.content_plain,
                "updatedAt": page.updated_at,
            }))
        }
        TV_TODAY => {
            let (svt1, svt2) = tokio::try_join!(
                plain_page(service, tv::SVT1),
                plain_page(service, tv::SVT2)
            )?;
            Ok(json!({
                "svt1": schedule_entry(&svt1),
                "svt2": schedule_entry(&svt2),
            }))
        }
        other => Err(TextTvError::UnknownResource(other.to_string())),
    }
}

/// `resources/read` result body.
pub async fn read_result(service: &TextTvService, uri: &str) -> Result<Value> {
    let value = read(service, uri).await?;
    let text = serde_json::to_string_pretty(&value).map_err(|e| TextTvError::Internal(e.to_string()))?;
    Ok(json!({
        "contents": [{ "uri": uri, "mimeType": MIME_TYPE, "text": text }]
    }))
}

async fn plain_page(service: &TextTvService, page: u16) -> Result<PageResult> {
    let input = GetPageInput {
        page: i64::from(page),
        include_plain_text: true,
    };
    service.get_page(&input).await
}

fn headline(page: &PageResult) -> Value {
    json!({
        "page": page.page,
        "title": page.title,
        "content": page.content,
        "contentPlain": page.content_plain,
        "updatedAt": page.updated_at,
    })
}

fn schedule_entry(page: &PageResult) -> Value {
    json!({
        "page": page.page,
        "content": page.content,
        "contentPlain": page.content_plain,
        "updatedAt": page.updated_at,
    })
}

fn categories() -> Value {
    let categories: Vec<Value> = Category::ALL
        .iter()
        .map(|category| {
            json!({
                "id": category.as_str(),
                "label": category.label(),
                "labelEn": category.label_en(),
                "pageRange": category.range(),
            })
        })
        .collect();

    json!({
        "categories": categories,
        "knownPages": {
            "news": {
                "MAIN": news::MAIN,
                "DOMESTIC_START": news::DOMESTIC.start,
                "DOMESTIC_END": news::DOMESTIC.end,
                "FOREIGN_START": news::FOREIGN.start,
                "FOREIGN_END": news::FOREIGN.end,
                "FULL_START": news::FULL.start,
                "FULL_END": news::FULL.end,
            },
            "sports": {
                "MAIN": sports::MAIN,
                "RESULTS": sports::RESULTS,
                "FOOTBALL_START": sports::FOOTBALL.start,
                "FOOTBALL_END": sports::FOOTBALL.end,
                "HOCKEY_START": sports::HOCKEY.start,
                "HOCKEY_END": sports::HOCKEY.end,
                "FULL_START": sports::FULL.start,
                "FULL_END": sports::FULL.end,
            },
            "weather": {
                "MAIN": weather::NATIONAL,
                "NATIONAL": weather::NATIONAL,
                "STOCKHOLM": weather::STOCKHOLM,
                "GOTHENBURG": weather::GOTHENBURG,
                "MALMO": weather::MALMO,
                "FORECASTS_START": weather::FORECASTS.start,
                "FORECASTS_END": weather::FORECASTS.end,
            },
            "tvSchedule": {
                "SVT1": tv::SVT1,
                "SVT2": tv::SVT2,
                "SVT1_START": tv::SVT1_RANGE.start,
                "SVT1_END": tv::SVT1_RANGE.end,
                "SVT2_START": tv::SVT2_RANGE.start,
                "SVT2_END": tv::SVT2_RANGE.end,
            },
        },
    })
}
