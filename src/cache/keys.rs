//! Cache key construction.
//!
//! Each family starts with its own literal tag, and handler keys prefix a
//! domain tag on top, so two logically different requests never share a key.

fn content_mode(include_plain_text: bool) -> &'static str {
    if include_plain_text {
        "plain"
    } else {
        "html"
    }
}

/// `page:<N>:<plain|html>`
pub fn page_key(page: u16, include_plain_text: bool) -> String {
    format!("page:{}:{}", page, content_mode(include_plain_text))
}

/// `range:<start>-<end>:<plain|html>`
pub fn page_range_key(start: u16, end: u16, include_plain_text: bool) -> String {
    format!(
        "range:{}-{}:{}",
        start,
        end,
        content_mode(include_plain_text)
    )
}

/// `search:<query>:<start>-<end>`
pub fn search_key(query: &str, start: u16, end: u16) -> String {
    format!("search:{}:{}-{}", query, start, end)
}

/// `category:<name>:<content|meta>`
pub fn category_key(category: &str, include_content: bool) -> String {
    let mode = if include_content { "content" } else { "meta" };
    format!("category:{}:{}", category, mode)
}

// == Handler Keys ==

pub fn subpages_key(page: u16, include_plain_text: bool) -> String {
    format!("subpages:{}", page_key(page, include_plain_text))
}

pub fn weather_key(page: u16, include_plain_text: bool) -> String {
    format!("weather:{}", page_key(page, include_plain_text))
}

pub fn news_key(start: u16, end: u16, include_plain_text: bool) -> String {
    format!("news:{}", page_range_key(start, end, include_plain_text))
}

pub fn sports_key(start: u16, end: u16, include_plain_text: bool) -> String {
    format!("sports:{}", page_range_key(start, end, include_plain_text))
}

pub fn tv_schedule_key(start: u16, end: u16, include_plain_text: bool) -> String {
    format!("tvschedule:{}", page_range_key(start, end, include_plain_text))
}
