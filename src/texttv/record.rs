//! Page records as delivered by the Text-TV API.

use chrono::{TimeZone, Utc};
use serde::{de, Deserialize, Deserializer};
use serde_json::Value;

/// One subpage of a Text-TV page.
///
/// The API is loose with types: numbers sometimes arrive as strings and
/// content as an array of HTML fragments, so fields are read leniently.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct PageRecord {
    #[serde(deserialize_with = "de_page_number")]
    pub num: u16,
    /// Distinguishes rotation variants of the same page
    #[serde(default, deserialize_with = "de_id")]
    pub id: String,
    #[serde(default, deserialize_with = "de_opt_text")]
    pub title: Option<String>,
    #[serde(deserialize_with = "de_text")]
    pub content: String,
    #[serde(default, deserialize_with = "de_opt_text")]
    pub content_plain: Option<String>,
    #[serde(default, deserialize_with = "de_unix")]
    pub date_updated_unix: i64,
    #[serde(default, deserialize_with = "de_opt_page_number")]
    pub next_page: Option<u16>,
    #[serde(default, deserialize_with = "de_opt_page_number")]
    pub prev_page: Option<u16>,
}

impl PageRecord {
    /// Last update as an RFC 3339 timestamp.
    pub fn updated_at(&self) -> String {
        Utc.timestamp_opt(self.date_updated_unix, 0)
            .single()
            .unwrap_or_default()
            .to_rfc3339()
    }

    /// Plain text when present, HTML content otherwise.
    pub fn best_text(&self) -> &str {
        self.content_plain.as_deref().unwrap_or(&self.content)
    }
}

fn number_from(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_i64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

fn text_from(value: Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s),
        Value::Array(parts) => Some(
            parts
                .into_iter()
                .filter_map(|part| match part {
                    Value::String(s) => Some(s),
                    _ => None,
                })
                .collect::<Vec<_>>()
                .join("\n"),
        ),
        other => Some(other.to_string()),
    }
}

fn de_page_number<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u16, D::Error> {
    let value = Value::deserialize(deserializer)?;
    number_from(&value)
        .and_then(|n| u16::try_from(n).ok())
        .ok_or_else(|| de::Error::custom(format!("invalid page number: {}", value)))
}

fn de_opt_page_number<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Option<u16>, D::Error> {
    let value = Value::deserialize(deserializer)?;
    Ok(number_from(&value).and_then(|n| u16::try_from(n).ok()))
}

fn de_unix<'de, D: Deserializer<'de>>(deserializer: D) -> Result<i64, D::Error> {
    let value = Value::deserialize(deserializer)?;
    Ok(number_from(&value).unwrap_or(0))
}

fn de_id<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::String(s) => s,
        Value::Null => String::new(),
        other => other.to_string(),
    })
}

fn de_text<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    let value = Value::deserialize(deserializer)?;
    Ok(text_from(value).unwrap_or_default())
}

fn de_opt_text<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<String>, D::Error> {
    let value = Value::deserialize(deserializer)?;
    Ok(text_from(value))
}
