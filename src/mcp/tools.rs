//! Tool catalog and dispatch.
//!
//! Each tool maps onto one fetch handler. Arguments are parsed and validated
//! here, and every failure is reported inside the tool result with
//! `isError: true` rather than as a protocol error.

use serde::Serialize;
use serde_json::{json, Map, Value};
use tracing::warn;

use crate::error::{Result, TextTvError};
use crate::handlers::TextTvService;
use crate::models::{
    parse_input, BrowseCategoryInput, GetNewsInput, GetPageInput, GetSportsInput,
    GetTvScheduleInput, GetWeatherInput, SearchInput,
};

pub const GET_PAGE: &str = "texttv_get_page";
pub const GET_SUBPAGES: &str = "texttv_get_subpages";
pub const GET_NEWS: &str = "texttv_get_news";
pub const GET_SPORTS: &str = "texttv_get_sports";
pub const GET_WEATHER: &str = "texttv_get_weather";
pub const GET_TV_SCHEDULE: &str = "texttv_get_tv_schedule";
pub const SEARCH: &str = "texttv_search";
pub const BROWSE_CATEGORY: &str = "texttv_browse_category";

const PLAIN_TEXT_DESCRIPTION: &str = "Include plain text content without HTML formatting";

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ToolAnnotations {
    pub title: &'static str,
    pub read_only_hint: bool,
    pub idempotent_hint: bool,
    pub open_world_hint: bool,
}

impl ToolAnnotations {
    /// Every tool only reads from the upstream.
    fn read_only(title: &'static str) -> Self {
        Self {
            title,
            read_only_hint: true,
            idempotent_hint: true,
            open_world_hint: true,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ToolDefinition {
    pub name: &'static str,
    pub description: &'static str,
    pub input_schema: Value,
    pub annotations: ToolAnnotations,
}

fn plain_text_property() -> Value {
    json!({
        "type": "boolean",
        "description": PLAIN_TEXT_DESCRIPTION,
        "default": false
    })
}

fn page_schema() -> Value {
    json!({
        "type": "object",
        "properties": {
            "page": {
                "type": "number",
                "description": "Text-TV page number (100-899)",
                "minimum": 100,
                "maximum": 899
            },
            "includePlainText": plain_text_property()
        },
        "required": ["page"]
    })
}

fn selector_schema(field: &str, values: &[&str], description: &str, default: &str) -> Value {
    let mut properties = Map::new();
    properties.insert(
        field.to_string(),
        json!({
            "type": "string",
            "enum": values,
            "description": description,
            "default": default
        }),
    );
    properties.insert("includePlainText".to_string(), plain_text_property());

    json!({
        "type": "object",
        "properties": properties
    })
}

const CATEGORY_VALUES: [&str; 5] = ["news", "sports", "weather", "tv_schedule", "other"];

/// Every tool, in listing order.
pub fn definitions() -> Vec<ToolDefinition> {
    vec![
        ToolDefinition {
            name: GET_PAGE,
            description: "Get a specific SVT Text-TV page by number (100-899). Returns the page content with optional plain text formatting.",
            input_schema: page_schema(),
            annotations: ToolAnnotations::read_only("Get Text-TV Page"),
        },
        ToolDefinition {
            name: GET_SUBPAGES,
            description: "Get all subpage versions of a specific Text-TV page. Some pages have multiple subpages that rotate.",
            input_schema: page_schema(),
            annotations: ToolAnnotations::read_only("Get Text-TV Subpages"),
        },
        ToolDefinition {
            name: GET_NEWS,
            description: "Get news from SVT Text-TV. Categories: main (page 100), domestic (inrikes, pages 101-103), foreign (utrikes, pages 104-109).",
            input_schema: selector_schema(
                "category",
                &["main", "domestic", "foreign"],
                "News category: main (page 100), domestic (inrikes), foreign (utrikes)",
                "main",
            ),
            annotations: ToolAnnotations::read_only("Get Text-TV News"),
        },
        ToolDefinition {
            name: GET_SPORTS,
            description: "Get sports content from SVT Text-TV. Categories: main (page 300), football (pages 330-339), hockey (pages 340-349), results (page 301).",
            input_schema: selector_schema(
                "category",
                &["main", "football", "hockey", "results"],
                "Sports category: main, football, hockey, or results",
                "main",
            ),
            annotations: ToolAnnotations::read_only("Get Text-TV Sports"),
        },
        ToolDefinition {
            name: GET_WEATHER,
            description: "Get weather forecasts from SVT Text-TV. Available regions: national (page 400), stockholm (402), gothenburg (403), malmo (404).",
            input_schema: selector_schema(
                "region",
                &["national", "stockholm", "gothenburg", "malmo"],
                "Weather region: national, stockholm, gothenburg, or malmo",
                "national",
            ),
            annotations: ToolAnnotations::read_only("Get Text-TV Weather"),
        },
        ToolDefinition {
            name: GET_TV_SCHEDULE,
            description: "Get TV schedules from SVT Text-TV. Channels: svt1 (pages 600-619), svt2 (pages 650-669), or both.",
            input_schema: selector_schema(
                "channel",
                &["svt1", "svt2", "both"],
                "TV channel: svt1, svt2, or both",
                "both",
            ),
            annotations: ToolAnnotations::read_only("Get Text-TV TV Schedule"),
        },
        ToolDefinition {
            name: SEARCH,
            description: "Search for content across SVT Text-TV pages. Optionally filter by category (news, sports, weather, tv_schedule).",
            input_schema: json!({
                "type": "object",
                "properties": {
                    "query": {
                        "type": "string",
                        "description": "Search query string",
                        "minLength": 1,
                        "maxLength": 100
                    },
                    "category": {
                        "type": "string",
                        "enum": CATEGORY_VALUES,
                        "description": "Category to search within (optional)"
                    },
                    "maxResults": {
                        "type": "number",
                        "description": "Maximum number of results to return (1-50)",
                        "minimum": 1,
                        "maximum": 50,
                        "default": 10
                    },
                    "includePlainText": plain_text_property()
                },
                "required": ["query"]
            }),
            annotations: ToolAnnotations::read_only("Search Text-TV"),
        },
        ToolDefinition {
            name: BROWSE_CATEGORY,
            description: "Browse pages in a Text-TV category. Get a list of available pages with optional content.",
            input_schema: json!({
                "type": "object",
                "properties": {
                    "category": {
                        "type": "string",
                        "enum": CATEGORY_VALUES,
                        "description": "Category to browse: news (100-199), sports (300-399), weather (400-499), tv_schedule (500-699), other (700-899)"
                    },
                    "includeContent": {
                        "type": "boolean",
                        "description": "Include page content (slower, more data)",
                        "default": false
                    },
                    "limit": {
                        "type": "number",
                        "description": "Maximum number of pages to return (1-100)",
                        "minimum": 1,
                        "maximum": 100,
                        "default": 20
                    }
                },
                "required": ["category"]
            }),
            annotations: ToolAnnotations::read_only("Browse Text-TV Category"),
        },
    ]
}

/// Runs one tool and returns its result as JSON.
pub async fn call(service: &TextTvService, name: &str, args: Value) -> Result<Value> {
    match name {
        GET_PAGE => to_json(service.get_page(&parse_input::<GetPageInput>(args)?).await?),
        GET_SUBPAGES => to_json(service.get_subpages(&parse_input::<GetPageInput>(args)?).await?),
        GET_NEWS => to_json(service.get_news(&parse_input::<GetNewsInput>(args)?).await?),
        GET_SPORTS => to_json(service.get_sports(&parse_input::<GetSportsInput>(args)?).await?),
        GET_WEATHER => to_json(service.get_weather(&parse_input::<GetWeatherInput>(args)?).await?),
        GET_TV_SCHEDULE => to_json(
            service
                .get_tv_schedule(&parse_input::<GetTvScheduleInput>(args)?)
                .await?,
        ),
        SEARCH => to_json(service.search(&parse_input::<SearchInput>(args)?).await?),
        BROWSE_CATEGORY => to_json(
            service
                .browse_category(&parse_input::<BrowseCategoryInput>(args)?)
                .await?,
        ),
        other => Err(TextTvError::UnknownTool(other.to_string())),
    }
}

fn to_json<T: Serialize>(result: T) -> Result<Value> {
    serde_json::to_value(result).map_err(|e| TextTvError::Internal(e.to_string()))
}

/// `tools/call` result body: the handler output as pretty JSON text, or the
/// error message flagged with `isError`.
pub async fn call_result(service: &TextTvService, name: &str, args: Value) -> Value {
    match call(service, name, args).await {
        Ok(value) => {
            let text = serde_json::to_string_pretty(&value).unwrap_or_else(|_| value.to_string());
            json!({
                "content": [{ "type": "text", "text": text }]
            })
        }
        Err(e) => {
            warn!("Tool {} failed: {}", name, e);
            json!({
                "content": [{ "type": "text", "text": json!({ "error": e.to_string() }).to_string() }],
                "isError": true
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_eight_read_only_tools() {
        let tools = definitions();
        assert_eq!(tools.len(), 8);
        assert!(tools.iter().all(|t| t.annotations.read_only_hint));

        let json = serde_json::to_value(&tools[0]).unwrap();
        assert_eq!(json["name"], GET_PAGE);
        assert_eq!(json["inputSchema"]["required"][0], "page");
        assert_eq!(json["annotations"]["idempotentHint"], true);
    }

    #[test]
    fn test_selector_schema_shape() {
        let schema = selector_schema("region", &["national", "malmo"], "Region", "national");
        assert_eq!(schema["properties"]["region"]["enum"][1], "malmo");
        assert_eq!(schema["properties"]["region"]["default"], "national");
        assert!(schema.get("required").is_none());
    }

    #[test]
    fn test_tool_names_unique() {
        let mut names: Vec<&str> = definitions().iter().map(|t| t.name).collect();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), 8);
    }
}
