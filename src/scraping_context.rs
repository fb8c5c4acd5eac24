use crate::{
    config::ScrapingConfig, requests::RequestClient, timetable_scraper::TimetableScraper,
};

pub struct ScrapingContext {
    pub scraping_config: ScrapingConfig,
    pub request_client: RequestClient,
}

impl ScrapingContext {
    pub fn new() -> anyhow::Result<Self> {
        Self::from_config(ScrapingConfig::new()?)
    }

    pub fn from_config(scraping_config: ScrapingConfig) -> anyhow::Result<Self> {
        let request_client = RequestClient::new(&scraping_config.request_options)?;
        Ok(ScrapingContext {
            scraping_config,
            request_client,
        })
    }

    pub fn into_scraper(self) -> TimetableScraper<RequestClient> {
        let ScrapingConfig {
            options, endpoints, ..
        } = self.scraping_config;
        TimetableScraper::new(options, endpoints, self.request_client)
    }
}
