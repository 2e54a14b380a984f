//! Prompt templates.
//!
//! Each prompt fetches the relevant pages as plain text through the cached
//! page handler and wraps them in a Swedish instruction for the model.

use futures::future::join_all;
use serde::Serialize;
use serde_json::{json, Map, Value};

use crate::catalog::{news, sports, tv, weather, PAGE_MAX, PAGE_MIN};
use crate::error::{Result, TextTvError};
use crate::handlers::TextTvService;
use crate::models::{GetPageInput, PageResult};

pub const SWEDISH_NEWS_SUMMARY: &str = "swedish_news_summary";
pub const SPORTS_UPDATE: &str = "sports_update";
pub const WEATHER_FORECAST: &str = "weather_forecast";
pub const TV_TONIGHT: &str = "tv_tonight";
pub const TEXTTV_PAGE: &str = "texttv_page";

#[derive(Debug, Clone, Serialize)]
pub struct PromptArgument {
    pub name: &'static str,
    pub description: &'static str,
    pub required: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct PromptDefinition {
    pub name: &'static str,
    pub description: &'static str,
    pub arguments: Vec<PromptArgument>,
}

fn prompt(
    name: &'static str,
    description: &'static str,
    argument: &'static str,
    argument_description: &'static str,
    required: bool,
) -> PromptDefinition {
    PromptDefinition {
        name,
        description,
        arguments: vec![PromptArgument {
            name: argument,
            description: argument_description,
            required,
        }],
    }
}

pub fn definitions() -> Vec<PromptDefinition> {
    vec![
        prompt(
            SWEDISH_NEWS_SUMMARY,
            "Get a summary of current Swedish news from Text-TV",
            "focus",
            "Focus area: domestic, foreign, or all",
            false,
        ),
        prompt(
            SPORTS_UPDATE,
            "Get latest sports updates and results from Text-TV",
            "sport",
            "Specific sport: football, hockey, or all",
            false,
        ),
        prompt(
            WEATHER_FORECAST,
            "Get Swedish weather forecast from Text-TV",
            "region",
            "Region: national, stockholm, gothenburg, or malmo",
            false,
        ),
        prompt(
            TV_TONIGHT,
            "Get tonight's TV schedule for SVT channels",
            "channel",
            "Channel: svt1, svt2, or both",
            false,
        ),
        prompt(
            TEXTTV_PAGE,
            "Analyze content from a specific Text-TV page",
            "page",
            "Page number (100-899)",
            true,
        ),
    ]
}

/// Builds the `prompts/get` result for `name`.
pub async fn get(service: &TextTvService, name: &str, args: &Map<String, Value>) -> Result<Value> {
    let text = match name {
        SWEDISH_NEWS_SUMMARY => news_summary(service, argument(args, "focus")).await,
        SPORTS_UPDATE => sports_update(service, argument(args, "sport")).await?,
        WEATHER_FORECAST => weather_forecast(service, argument(args, "region")).await?,
        TV_TONIGHT => tv_tonight(service, argument(args, "channel")).await,
        TEXTTV_PAGE => page_analysis(service, argument(args, "page")).await?,
        other => return Err(TextTvError::UnknownPrompt(other.to_string())),
    };

    Ok(json!({
        "messages": [{
            "role": "user",
            "content": { "type": "text", "text": text }
        }]
    }))
}

/// Prompt arguments are strings, but numbers are accepted too.
fn argument(args: &Map<String, Value>, name: &str) -> Option<String> {
    match args.get(name)? {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

async fn plain_page(service: &TextTvService, page: u16) -> Result<PageResult> {
    let input = GetPageInput {
        page: i64::from(page),
        include_plain_text: true,
    };
    service.get_page(&input).await
}

fn page_text(page: &PageResult) -> &str {
    page.content_plain.as_deref().unwrap_or(&page.content)
}

/// Fetches pages concurrently and joins the ones that succeeded.
async fn joined_pages(service: &TextTvService, pages: &[u16]) -> String {
    let results = join_all(pages.iter().map(|page| plain_page(service, *page))).await;

    results
        .into_iter()
        .filter_map(|result| result.ok())
        .map(|page| format!("--- Sida {} ---\n{}", page.page, page_text(&page)))
        .collect::<Vec<_>>()
        .join("\n\n")
}

async fn news_summary(service: &TextTvService, focus: Option<String>) -> String {
    let pages: Vec<u16> = match focus.as_deref() {
        Some("domestic") => (0..3).map(|i| news::DOMESTIC.start + i).collect(),
        Some("foreign") => (0..3).map(|i| news::FOREIGN.start + i).collect(),
        Some("all") => vec![news::MAIN, news::DOMESTIC.start, news::FOREIGN.start],
        _ => vec![news::MAIN],
    };
    let content = joined_pages(service, &pages).await;

    format!(
        "Sammanfatta de viktigaste nyheterna från SVT Text-TV. Fokus: {}.\n\nInnehåll från Text-TV:\n\n{}",
        focus.as_deref().unwrap_or("huvudnyheter"),
        content
    )
}

async fn sports_update(service: &TextTvService, sport: Option<String>) -> Result<String> {
    let page = match sport.as_deref() {
        Some("football") => sports::FOOTBALL.start,
        Some("hockey") => sports::HOCKEY.start,
        _ => sports::MAIN,
    };
    let result = plain_page(service, page).await?;

    Ok(format!(
        "Ge mig en sportuppdatering baserat på SVT Text-TV. Sport: {}.\n\nInnehåll från sida {}:\n\n{}",
        sport.as_deref().unwrap_or("allmänt"),
        result.page,
        page_text(&result)
    ))
}

async fn weather_forecast(service: &TextTvService, region: Option<String>) -> Result<String> {
    let page = match region.as_deref() {
        Some("stockholm") => weather::STOCKHOLM,
        Some("gothenburg") => weather::GOTHENBURG,
        Some("malmo") => weather::MALMO,
        _ => weather::NATIONAL,
    };
    let result = plain_page(service, page).await?;

    Ok(format!(
        "Ge mig väderprognosen för {} baserat på SVT Text-TV.\n\nInnehåll från sida {}:\n\n{}",
        region.as_deref().unwrap_or("Sverige"),
        result.page,
        page_text(&result)
    ))
}

async fn tv_tonight(service: &TextTvService, channel: Option<String>) -> String {
    let pages = match channel.as_deref() {
        Some("svt1") => vec![tv::SVT1],
        Some("svt2") => vec![tv::SVT2],
        _ => vec![tv::SVT1, tv::SVT2],
    };
    let content = joined_pages(service, &pages).await;

    format!(
        "Vad går det för program på SVT ikväll? Kanal: {}.\n\nTV-tablå från Text-TV:\n\n{}",
        channel.as_deref().unwrap_or("SVT1 och SVT2"),
        content
    )
}

async fn page_analysis(service: &TextTvService, page: Option<String>) -> Result<String> {
    let raw = page.ok_or_else(|| TextTvError::Validation("Page argument is required".to_string()))?;
    let page = raw
        .trim()
        .parse::<u16>()
        .ok()
        .filter(|p| (PAGE_MIN..=PAGE_MAX).contains(p))
        .ok_or_else(|| {
            TextTvError::Validation(format!(
                "Invalid page number. Must be between {} and {}.",
                PAGE_MIN, PAGE_MAX
            ))
        })?;

    let result = plain_page(service, page).await?;
    Ok(format!(
        "Analysera innehållet på Text-TV sida {}:\n\n{}",
        page,
        page_text(&result)
    ))
}
