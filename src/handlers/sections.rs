//! News, sports, weather and TV schedule handlers.

use crate::cache::keys::{news_key, sports_key, tv_schedule_key, weather_key};
use crate::catalog::{channel_for_page, PageRange};
use crate::config::ttl;
use crate::error::Result;
use crate::models::{
    GetNewsInput, GetSportsInput, GetTvScheduleInput, GetWeatherInput, SectionPage,
    SectionResult, TvSchedulePage, TvScheduleResult, WeatherResult,
};

use super::{ensure_valid, TextTvService};

impl TextTvService {
    pub async fn get_news(&self, input: &GetNewsInput) -> Result<SectionResult> {
        ensure_valid(input)?;
        let range = input.category.pages();
        let plain = input.include_plain_text;

        let key = news_key(range.start, range.end, plain);
        self.read_through(key, ttl::PAGE, || async move {
            let pages = self.fetch_section(range, plain).await?;
            Ok(SectionResult {
                category: input.category.as_str().to_string(),
                category_label: input.category.label().to_string(),
                page_count: pages.len(),
                pages,
            })
        })
        .await
    }

    pub async fn get_sports(&self, input: &GetSportsInput) -> Result<SectionResult> {
        ensure_valid(input)?;
        let range = input.category.pages();
        let plain = input.include_plain_text;

        let key = sports_key(range.start, range.end, plain);
        self.read_through(key, ttl::PAGE, || async move {
            let pages = self.fetch_section(range, plain).await?;
            Ok(SectionResult {
                category: input.category.as_str().to_string(),
                category_label: input.category.label().to_string(),
                page_count: pages.len(),
                pages,
            })
        })
        .await
    }

    pub async fn get_weather(&self, input: &GetWeatherInput) -> Result<WeatherResult> {
        ensure_valid(input)?;
        let page = input.region.page();
        let plain = input.include_plain_text;

        self.read_through(weather_key(page, plain), ttl::WEATHER, || async move {
            let record = self.provider().get_page(page, plain).await?;
            Ok(WeatherResult {
                region: input.region.as_str().to_string(),
                region_label: input.region.label().to_string(),
                page: record.num,
                updated_at: record.updated_at(),
                updated_unix: record.date_updated_unix,
                content: record.content,
                content_plain: record.content_plain,
            })
        })
        .await
    }

    pub async fn get_tv_schedule(&self, input: &GetTvScheduleInput) -> Result<TvScheduleResult> {
        ensure_valid(input)?;
        let range = input.channel.pages();
        let plain = input.include_plain_text;

        let key = tv_schedule_key(range.start, range.end, plain);
        self.read_through(key, ttl::TV_SCHEDULE, || async move {
            let records = self
                .provider()
                .get_page_range(range.start, range.end, plain)
                .await?;

            let pages: Vec<TvSchedulePage> = records
                .values()
                .map(|record| TvSchedulePage {
                    page: record.num,
                    channel: channel_for_page(record.num).to_string(),
                    title: record.title.clone(),
                    content: record.content.clone(),
                    content_plain: record.content_plain.clone(),
                    updated_at: record.updated_at(),
                    updated_unix: record.date_updated_unix,
                })
                .collect();

            Ok(TvScheduleResult {
                channel: input.channel.as_str().to_string(),
                channel_label: input.channel.label().to_string(),
                page_count: pages.len(),
                pages,
            })
        })
        .await
    }

    /// Range fetch shaped into section pages, ordered by page number.
    async fn fetch_section(&self, range: PageRange, plain: bool) -> Result<Vec<SectionPage>> {
        let records = self
            .provider()
            .get_page_range(range.start, range.end, plain)
            .await?;
        Ok(records.values().map(SectionPage::from).collect())
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::time::Duration;

    use super::super::test_support::{record, service, StubProvider};
    use crate::catalog::{NewsCategory, SportsCategory, TvChannel, WeatherRegion};
    use crate::models::{GetNewsInput, GetSportsInput, GetTvScheduleInput, GetWeatherInput};

    fn provider() -> Arc<StubProvider> {
        Arc::new(StubProvider::with_pages(vec![
            record(100, "Huvudnyheter"),
            record(103, "Inrikes tre"),
            record(101, "Inrikes ett"),
            record(300, "Sport"),
            record(342, "Hockey"),
            record(402, "Sol i Stockholm"),
            record(601, "SVT1 kväll"),
            record(655, "SVT2 kväll"),
        ]))
    }

    #[tokio::test]
    async fn test_news_pages_sorted_with_labels() {
        let svc = service(provider());
        let input = GetNewsInput {
            category: NewsCategory::Domestic,
            include_plain_text: false,
        };

        let result = svc.get_news(&input).await.unwrap();
        assert_eq!(result.category, "domestic");
        assert_eq!(result.category_label, "Inrikes");
        assert_eq!(result.page_count, 2);
        let pages: Vec<u16> = result.pages.iter().map(|p| p.page).collect();
        assert_eq!(pages, vec![101, 103]);
        assert!(svc.cache().has("news:range:101-103:html"));
    }

    #[tokio::test]
    async fn test_default_news_is_main_page() {
        let svc = service(provider());
        let result = svc.get_news(&GetNewsInput::default()).await.unwrap();
        assert_eq!(result.category, "main");
        assert_eq!(result.pages.len(), 1);
        assert_eq!(result.pages[0].page, 100);
    }

    #[tokio::test]
    async fn test_sports_and_news_keys_do_not_collide() {
        let stub = provider();
        let svc = service(stub.clone());

        svc.get_news(&GetNewsInput::default()).await.unwrap();
        let sports = svc
            .get_sports(&GetSportsInput {
                category: SportsCategory::Hockey,
                include_plain_text: false,
            })
            .await
            .unwrap();

        assert_eq!(sports.category_label, "Hockey");
        assert_eq!(sports.pages[0].page, 342);
        assert_eq!(stub.calls(), 2);
        assert!(svc.cache().has("sports:range:340-349:html"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_weather_uses_longer_ttl() {
        let stub = provider();
        let svc = service(stub.clone());
        let input = GetWeatherInput {
            region: WeatherRegion::Stockholm,
            include_plain_text: true,
        };

        let result = svc.get_weather(&input).await.unwrap();
        assert_eq!(result.page, 402);
        assert_eq!(result.region_label, "Stockholm");
        assert!(svc.cache().has("weather:page:402:plain"));

        tokio::time::advance(Duration::from_secs(30)).await;
        svc.get_weather(&input).await.unwrap();
        assert_eq!(stub.calls(), 1);

        tokio::time::advance(Duration::from_secs(30)).await;
        svc.get_weather(&input).await.unwrap();
        assert_eq!(stub.calls(), 2);
    }

    #[tokio::test]
    async fn test_tv_schedule_tags_channels() {
        let svc = service(provider());
        let result = svc
            .get_tv_schedule(&GetTvScheduleInput::default())
            .await
            .unwrap();

        assert_eq!(result.channel, "both");
        assert_eq!(result.channel_label, "SVT1 & SVT2");
        assert_eq!(result.page_count, 2);
        assert_eq!(result.pages[0].channel, "SVT1");
        assert_eq!(result.pages[1].channel, "SVT2");
        assert!(svc.cache().has("tvschedule:range:600-669:html"));
    }

    #[tokio::test]
    async fn test_single_channel_schedule() {
        let svc = service(provider());
        let result = svc
            .get_tv_schedule(&GetTvScheduleInput {
                channel: TvChannel::Svt2,
                include_plain_text: false,
            })
            .await
            .unwrap();
        assert_eq!(result.pages.len(), 1);
        assert_eq!(result.pages[0].page, 655);
    }
}
