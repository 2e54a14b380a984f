//! Request and Response models
//!
//! Tool inputs with their validation, the result shapes the fetch handlers
//! produce, and the HTTP-only response bodies.

pub mod requests;
pub mod responses;

// Re-export commonly used types
pub use requests::{
    parse_input, BrowseCategoryInput, GetNewsInput, GetPageInput, GetSportsInput,
    GetTvScheduleInput, GetWeatherInput, SearchInput, Validate,
};
pub use responses::{
    BrowseCategoryResult, CategoryPage, HealthResponse, PageResult, SearchHit, SearchResult,
    SectionPage, SectionResult, StatsResponse, SubpageResult, SubpagesResult, TvSchedulePage,
    TvScheduleResult, WeatherResult,
};
