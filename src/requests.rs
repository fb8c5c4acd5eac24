use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, ClientBuilder, Response};
use tokio::sync::Semaphore;

use crate::error::{Result, ScrapeError};

/// Anything that can turn a URL into a response body.
#[async_trait]
pub trait Fetch: Send + Sync {
    async fn fetch_text(&self, url: &str) -> Result<String>;
}

#[derive(Debug, Clone, Default)]
pub struct RequestOptions {
    pub user_agent: Option<String>,
    pub timeout: Option<Duration>,
    /// Cap on requests in flight at once across the whole scrape.
    pub max_in_flight: Option<usize>,
}

pub struct RequestClient {
    client: Client,
    in_flight: Option<Arc<Semaphore>>,
}

impl RequestClient {
    pub fn new(options: &RequestOptions) -> anyhow::Result<Self> {
        let mut builder = ClientBuilder::new();
        if let Some(user_agent) = &options.user_agent {
            builder = builder.user_agent(user_agent);
        }
        if let Some(timeout) = options.timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build()?;
        let in_flight = options
            .max_in_flight
            .map(|permits| Arc::new(Semaphore::new(permits.max(1))));
        Ok(Self { client, in_flight })
    }

    async fn fetch_url_response(&self, url: &str) -> Result<Response> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| ScrapeError::transport(url, e))?;
        response
            .error_for_status()
            .map_err(|e| ScrapeError::transport(url, e))
    }

    /// Fetches a whole body. The in-flight permit covers the body download too.
    pub async fn fetch_url_body(&self, url: &str) -> Result<String> {
        let _permit = match &self.in_flight {
            Some(semaphore) => Some(
                semaphore
                    .acquire()
                    .await
                    .map_err(|e| ScrapeError::transport(url, e))?,
            ),
            None => None,
        };

        let response = self.fetch_url_response(url).await?;
        response
            .text()
            .await
            .map_err(|e| ScrapeError::transport(url, e))
    }

    #[cfg(test)]
    fn available_permits(&self) -> Option<usize> {
        self.in_flight.as_ref().map(|s| s.available_permits())
    }
}

#[async_trait]
impl Fetch for RequestClient {
    async fn fetch_text(&self, url: &str) -> Result<String> {
        self.fetch_url_body(url).await
    }
}
