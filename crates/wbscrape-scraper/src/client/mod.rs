//! HTTP client for the marketplace's public catalogue, listing and sales
//! endpoints.

mod crawl;
mod sales;

use std::time::Duration;

use reqwest::Client;
use serde::de::DeserializeOwned;
use wbscrape_core::{AppConfig, Endpoints};

use crate::catalogue::parse_catalogue;
use crate::error::ScraperError;
use crate::pagination::ListingQuery;
use crate::retry::retry_with_backoff;
use crate::types::{CatalogueNode, ListingResponse};

/// Transport settings for [`WbClient`].
#[derive(Debug, Clone)]
pub struct ClientOptions {
    pub request_timeout_secs: u64,
    pub connect_timeout_secs: u64,
    pub user_agent: String,
    /// Additional attempts after a transient failure. `0` disables retries.
    pub max_retries: u32,
    pub retry_backoff_base_ms: u64,
    /// Pause between consecutive listing pages of one crawl.
    pub inter_request_delay_ms: u64,
}

impl ClientOptions {
    #[must_use]
    pub fn from_config(config: &AppConfig) -> Self {
        Self {
            request_timeout_secs: config.request_timeout_secs,
            connect_timeout_secs: config.connect_timeout_secs,
            user_agent: config.user_agent.clone(),
            max_retries: config.max_retries,
            retry_backoff_base_ms: config.retry_backoff_base_ms,
            inter_request_delay_ms: config.inter_request_delay_ms,
        }
    }
}

impl Default for ClientOptions {
    fn default() -> Self {
        Self {
            request_timeout_secs: 30,
            connect_timeout_secs: 10,
            user_agent: "Chrome/51.0.2704.103 Safari/537.36".to_owned(),
            max_retries: 0,
            retry_backoff_base_ms: 1_000,
            inter_request_delay_ms: 0,
        }
    }
}

/// Client for the marketplace's public JSON endpoints.
///
/// Non-2xx responses surface as [`ScraperError::UnexpectedStatus`] and bodies
/// that do not match the expected shape as [`ScraperError::Deserialize`].
/// Requests are issued one at a time; nothing here spawns or joins.
pub struct WbClient {
    client: Client,
    endpoints: Endpoints,
    max_retries: u32,
    backoff_base_ms: u64,
    inter_request_delay_ms: u64,
}

impl WbClient {
    /// Creates a client for the given endpoints.
    ///
    /// # Errors
    ///
    /// Returns [`ScraperError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn new(endpoints: Endpoints, options: &ClientOptions) -> Result<Self, ScraperError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(options.request_timeout_secs))
            .connect_timeout(Duration::from_secs(options.connect_timeout_secs))
            .user_agent(options.user_agent.as_str())
            .build()?;
        Ok(Self {
            client,
            endpoints,
            max_retries: options.max_retries,
            backoff_base_ms: options.retry_backoff_base_ms,
            inter_request_delay_ms: options.inter_request_delay_ms,
        })
    }

    /// Creates a client from application config.
    ///
    /// # Errors
    ///
    /// Returns [`ScraperError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn from_config(config: &AppConfig) -> Result<Self, ScraperError> {
        Self::new(config.endpoints.clone(), &ClientOptions::from_config(config))
    }

    #[must_use]
    pub fn endpoints(&self) -> &Endpoints {
        &self.endpoints
    }

    /// Downloads the catalogue and returns the body unparsed, for callers that
    /// cache it on disk.
    ///
    /// # Errors
    ///
    /// - [`ScraperError::UnexpectedStatus`] on any non-2xx status.
    /// - [`ScraperError::Http`] on network or TLS failure.
    pub async fn fetch_catalogue_raw(&self) -> Result<String, ScraperError> {
        let url = self.endpoints.catalogue_url.clone();
        tracing::debug!(url = %url, "downloading catalogue");
        self.get_body(&url).await
    }

    /// Downloads and decodes the catalogue tree.
    ///
    /// # Errors
    ///
    /// Everything [`Self::fetch_catalogue_raw`] returns, plus
    /// [`ScraperError::Deserialize`] if the body is not a JSON array of nodes.
    pub async fn fetch_catalogue(&self) -> Result<Vec<CatalogueNode>, ScraperError> {
        let body = self.fetch_catalogue_raw().await?;
        parse_catalogue(&body)
    }

    /// Fetches and decodes one listing page.
    ///
    /// # Errors
    ///
    /// - [`ScraperError::InvalidUrl`] if the page URL cannot be built.
    /// - [`ScraperError::UnexpectedStatus`] on any non-2xx status.
    /// - [`ScraperError::Http`] on network or TLS failure.
    /// - [`ScraperError::Deserialize`] if the body does not match the
    ///   listing shape.
    pub async fn fetch_listing_page(
        &self,
        query: &ListingQuery,
        page: u32,
    ) -> Result<ListingResponse, ScraperError> {
        let url = query.page_url(&self.endpoints, page)?;
        tracing::debug!(page, url = %url, "fetching listing page");
        let body = self.get_body(&url).await?;
        decode(&body, &format!("listing page {page} ({url})"))
    }

    /// GETs `url` and returns the body of a 2xx response, retrying transient
    /// failures per the configured policy.
    async fn get_body(&self, url: &str) -> Result<String, ScraperError> {
        retry_with_backoff(self.max_retries, self.backoff_base_ms, || self.get_body_once(url))
            .await
    }

    /// GETs `url` exactly once and returns the body of a 2xx response.
    async fn get_body_once(&self, url: &str) -> Result<String, ScraperError> {
        let response = self
            .client
            .get(url)
            .header(reqwest::header::ACCEPT, "*/*")
            .send()
            .await?;
        let status = response.status();
        if !status.is_success() {
            return Err(ScraperError::UnexpectedStatus {
                status: status.as_u16(),
                url: url.to_owned(),
            });
        }
        Ok(response.text().await?)
    }
}

fn decode<T: DeserializeOwned>(body: &str, context: &str) -> Result<T, ScraperError> {
    serde_json::from_str(body).map_err(|e| ScraperError::Deserialize {
        context: context.to_owned(),
        source: e,
    })
}

#[cfg(test)]
#[path = "../client_test.rs"]
mod tests;
