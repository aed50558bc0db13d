//! Per-item sales lookups for `WbClient`.

use wbscrape_core::{ProductRecord, SalesOutcome};

use crate::enrich::{classify_sales, enrich_records, RecoveryPolicy};
use crate::error::ScraperError;
use crate::progress::ProgressObserver;
use crate::types::SalesEntry;

use super::{decode, WbClient};

impl WbClient {
    /// Builds the sales-lookup URL for one item.
    ///
    /// # Errors
    ///
    /// Returns [`ScraperError::InvalidUrl`] if the configured sales base URL
    /// is not a valid URL.
    pub(super) fn sales_url(&self, item_id: u64) -> Result<String, ScraperError> {
        let base = format!(
            "{}/by-nm/",
            self.endpoints.sales_api_base.trim_end_matches('/')
        );
        let mut url = reqwest::Url::parse(&base).map_err(|e| ScraperError::InvalidUrl {
            url: base.clone(),
            reason: e.to_string(),
        })?;
        url.query_pairs_mut().append_pair("nm", &item_id.to_string());
        Ok(url.into())
    }

    /// Fetches the raw sales entries for one item: empty when the endpoint
    /// has no data for it.
    ///
    /// Sent exactly once. Transport retries never apply here; a failed lookup
    /// is left to the caller's [`RecoveryPolicy`].
    ///
    /// # Errors
    ///
    /// - [`ScraperError::UnexpectedStatus`] on any non-2xx status.
    /// - [`ScraperError::Http`] on network failure, including timeouts.
    /// - [`ScraperError::Deserialize`] if the body is not an array of entries.
    pub async fn fetch_sales(&self, item_id: u64) -> Result<Vec<SalesEntry>, ScraperError> {
        let url = self.sales_url(item_id)?;
        let body = self.get_body_once(&url).await?;
        decode(&body, &format!("sales lookup for item {item_id}"))
    }

    /// Looks up and classifies the sales outcome of one item.
    ///
    /// # Errors
    ///
    /// Returns the lookup error when `policy` does not recover its kind.
    pub async fn lookup_sales(
        &self,
        item_id: u64,
        policy: &RecoveryPolicy,
    ) -> Result<SalesOutcome, ScraperError> {
        classify_sales(self.fetch_sales(item_id).await, policy)
    }

    /// Attaches a sales outcome to every record, one lookup at a time, in
    /// record order.
    ///
    /// # Errors
    ///
    /// Returns the first lookup error that `policy` does not recover; the
    /// records are dropped.
    pub async fn enrich_sales(
        &self,
        records: Vec<ProductRecord>,
        policy: &RecoveryPolicy,
        progress: &mut dyn ProgressObserver,
    ) -> Result<Vec<ProductRecord>, ScraperError> {
        enrich_records(records, policy, |item_id| self.fetch_sales(item_id), progress).await
    }
}
