//! Text-TV page catalog
//!
//! Fixed page numbers and ranges of SVT Text-TV, and the labels shown for them.

use serde::{Deserialize, Serialize};

/// Lowest valid page number
pub const PAGE_MIN: u16 = 100;
/// Highest valid page number
pub const PAGE_MAX: u16 = 899;

/// Inclusive range of page numbers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PageRange {
    pub start: u16,
    pub end: u16,
}

impl PageRange {
    pub const fn new(start: u16, end: u16) -> Self {
        Self { start, end }
    }

    pub const fn single(page: u16) -> Self {
        Self::new(page, page)
    }

    pub fn contains(&self, page: u16) -> bool {
        (self.start..=self.end).contains(&page)
    }
}

pub mod news {
    use super::PageRange;

    pub const MAIN: u16 = 100;
    pub const DOMESTIC: PageRange = PageRange::new(101, 103);
    pub const FOREIGN: PageRange = PageRange::new(104, 109);
    pub const FULL: PageRange = PageRange::new(100, 130);
}

pub mod sports {
    use super::PageRange;

    pub const MAIN: u16 = 300;
    pub const RESULTS: u16 = 301;
    pub const FOOTBALL: PageRange = PageRange::new(330, 339);
    pub const HOCKEY: PageRange = PageRange::new(340, 349);
    pub const FULL: PageRange = PageRange::new(300, 399);
}

pub mod weather {
    use super::PageRange;

    pub const NATIONAL: u16 = 400;
    pub const STOCKHOLM: u16 = 402;
    pub const GOTHENBURG: u16 = 403;
    pub const MALMO: u16 = 404;
    pub const FORECASTS: PageRange = PageRange::new(400, 420);
}

pub mod tv {
    use super::PageRange;

    pub const SVT1: u16 = 600;
    pub const SVT2: u16 = 650;
    pub const SVT1_RANGE: PageRange = PageRange::new(600, 619);
    pub const SVT2_RANGE: PageRange = PageRange::new(650, 669);
}

// == Categories ==

/// Top-level Text-TV section.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    News,
    Sports,
    Weather,
    TvSchedule,
    Other,
}

impl Category {
    pub const ALL: [Category; 5] = [
        Category::News,
        Category::Sports,
        Category::Weather,
        Category::TvSchedule,
        Category::Other,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::News => "news",
            Category::Sports => "sports",
            Category::Weather => "weather",
            Category::TvSchedule => "tv_schedule",
            Category::Other => "other",
        }
    }

    pub fn range(&self) -> PageRange {
        match self {
            Category::News => PageRange::new(100, 199),
            Category::Sports => PageRange::new(300, 399),
            Category::Weather => PageRange::new(400, 499),
            Category::TvSchedule => PageRange::new(500, 699),
            Category::Other => PageRange::new(700, 899),
        }
    }

    /// Swedish label
    pub fn label(&self) -> &'static str {
        match self {
            Category::News => "Nyheter",
            Category::Sports => "Sport",
            Category::Weather => "Väder",
            Category::TvSchedule => "TV-tablå",
            Category::Other => "Övrigt",
        }
    }

    pub fn label_en(&self) -> &'static str {
        match self {
            Category::News => "News",
            Category::Sports => "Sports",
            Category::Weather => "Weather",
            Category::TvSchedule => "TV Schedule",
            Category::Other => "Other",
        }
    }

    /// Section a page belongs to. Pages 200-299 have no section of their own.
    pub fn for_page(page: u16) -> Category {
        match page {
            100..=199 => Category::News,
            300..=399 => Category::Sports,
            400..=499 => Category::Weather,
            500..=699 => Category::TvSchedule,
            _ => Category::Other,
        }
    }
}

// == Handler Selectors ==

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NewsCategory {
    #[default]
    Main,
    Domestic,
    Foreign,
}

impl NewsCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            NewsCategory::Main => "main",
            NewsCategory::Domestic => "domestic",
            NewsCategory::Foreign => "foreign",
        }
    }

    pub fn pages(&self) -> PageRange {
        match self {
            NewsCategory::Main => PageRange::single(news::MAIN),
            NewsCategory::Domestic => news::DOMESTIC,
            NewsCategory::Foreign => news::FOREIGN,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            NewsCategory::Main => "Huvudnyheter",
            NewsCategory::Domestic => "Inrikes",
            NewsCategory::Foreign => "Utrikes",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SportsCategory {
    #[default]
    Main,
    Football,
    Hockey,
    Results,
}

impl SportsCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            SportsCategory::Main => "main",
            SportsCategory::Football => "football",
            SportsCategory::Hockey => "hockey",
            SportsCategory::Results => "results",
        }
    }

    pub fn pages(&self) -> PageRange {
        match self {
            SportsCategory::Main => PageRange::single(sports::MAIN),
            SportsCategory::Football => sports::FOOTBALL,
            SportsCategory::Hockey => sports::HOCKEY,
            SportsCategory::Results => PageRange::single(sports::RESULTS),
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            SportsCategory::Main => "Sport",
            SportsCategory::Football => "Fotboll",
            SportsCategory::Hockey => "Hockey",
            SportsCategory::Results => "Resultat",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WeatherRegion {
    #[default]
    National,
    Stockholm,
    Gothenburg,
    Malmo,
}

impl WeatherRegion {
    pub fn as_str(&self) -> &'static str {
        match self {
            WeatherRegion::National => "national",
            WeatherRegion::Stockholm => "stockholm",
            WeatherRegion::Gothenburg => "gothenburg",
            WeatherRegion::Malmo => "malmo",
        }
    }

    pub fn page(&self) -> u16 {
        match self {
            WeatherRegion::National => weather::NATIONAL,
            WeatherRegion::Stockholm => weather::STOCKHOLM,
            WeatherRegion::Gothenburg => weather::GOTHENBURG,
            WeatherRegion::Malmo => weather::MALMO,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            WeatherRegion::National => "Sverige",
            WeatherRegion::Stockholm => "Stockholm",
            WeatherRegion::Gothenburg => "Göteborg",
            WeatherRegion::Malmo => "Malmö",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TvChannel {
    Svt1,
    Svt2,
    #[default]
    Both,
}

impl TvChannel {
    pub fn as_str(&self) -> &'static str {
        match self {
            TvChannel::Svt1 => "svt1",
            TvChannel::Svt2 => "svt2",
            TvChannel::Both => "both",
        }
    }

    pub fn pages(&self) -> PageRange {
        match self {
            TvChannel::Svt1 => tv::SVT1_RANGE,
            TvChannel::Svt2 => tv::SVT2_RANGE,
            TvChannel::Both => PageRange::new(tv::SVT1_RANGE.start, tv::SVT2_RANGE.end),
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            TvChannel::Svt1 => "SVT1",
            TvChannel::Svt2 => "SVT2",
            TvChannel::Both => "SVT1 & SVT2",
        }
    }
}

/// Channel whose schedule a page carries.
pub fn channel_for_page(page: u16) -> &'static str {
    match page {
        600..=649 => "SVT1",
        650..=699 => "SVT2",
        _ => "Unknown",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_for_page() {
        assert_eq!(Category::for_page(100), Category::News);
        assert_eq!(Category::for_page(199), Category::News);
        assert_eq!(Category::for_page(250), Category::Other);
        assert_eq!(Category::for_page(301), Category::Sports);
        assert_eq!(Category::for_page(402), Category::Weather);
        assert_eq!(Category::for_page(650), Category::TvSchedule);
        assert_eq!(Category::for_page(777), Category::Other);
    }

    #[test]
    fn test_category_serde_names() {
        let json = serde_json::to_string(&Category::TvSchedule).unwrap();
        assert_eq!(json, "\"tv_schedule\"");
        for category in Category::ALL {
            let parsed: Category =
                serde_json::from_value(serde_json::json!(category.as_str())).unwrap();
            assert_eq!(parsed, category);
        }
    }

    #[test]
    fn test_selector_ranges() {
        assert_eq!(NewsCategory::Main.pages(), PageRange::single(100));
        assert_eq!(NewsCategory::Foreign.pages(), PageRange::new(104, 109));
        assert_eq!(SportsCategory::Results.pages(), PageRange::single(301));
        assert_eq!(SportsCategory::Hockey.pages(), PageRange::new(340, 349));
        assert_eq!(WeatherRegion::Malmo.page(), 404);
        assert_eq!(TvChannel::Both.pages(), PageRange::new(600, 669));
    }

    #[test]
    fn test_selector_defaults() {
        assert_eq!(NewsCategory::default(), NewsCategory::Main);
        assert_eq!(SportsCategory::default(), SportsCategory::Main);
        assert_eq!(WeatherRegion::default(), WeatherRegion::National);
        assert_eq!(TvChannel::default(), TvChannel::Both);
    }

    #[test]
    fn test_channel_for_page() {
        assert_eq!(channel_for_page(600), "SVT1");
        assert_eq!(channel_for_page(669), "SVT2");
        assert_eq!(channel_for_page(500), "Unknown");
    }

    #[test]
    fn test_page_range_contains() {
        let range = PageRange::new(101, 103);
        assert!(range.contains(101));
        assert!(range.contains(103));
        assert!(!range.contains(104));
    }
}
