//! Listing crawls for `WbClient`: one shared page loop, two entry points.

use std::time::Duration;

use wbscrape_core::{CategoryDescriptor, ProductRecord};

use crate::error::ScraperError;
use crate::normalize::extract_products;
use crate::pagination::{paginate, ListingQuery};
use crate::progress::ProgressObserver;

use super::WbClient;

impl WbClient {
    /// Crawls every page of a listing and returns its records in page order.
    ///
    /// `inter_request_delay_ms` is applied before every page except the first.
    ///
    /// **All-or-nothing semantics**: on any page failure the records from
    /// earlier pages are dropped and the error is returned.
    ///
    /// # Errors
    ///
    /// Propagates any error from [`Self::fetch_listing_page`].
    pub async fn crawl_listing(
        &self,
        query: &ListingQuery,
        progress: &mut dyn ProgressObserver,
    ) -> Result<Vec<ProductRecord>, ScraperError> {
        let delay = Duration::from_millis(self.inter_request_delay_ms);
        let storefront = self.endpoints.storefront_base.as_str();

        paginate(
            move |page| async move {
                if page > 1 && !delay.is_zero() {
                    tokio::time::sleep(delay).await;
                }
                self.fetch_listing_page(query, page)
                    .await
                    .map(|response| extract_products(response, storefront))
            },
            progress,
        )
        .await
    }

    /// Crawls all products in a catalogue category.
    ///
    /// # Errors
    ///
    /// Propagates any error from [`Self::crawl_listing`].
    pub async fn crawl_category(
        &self,
        category: &CategoryDescriptor,
        progress: &mut dyn ProgressObserver,
    ) -> Result<Vec<ProductRecord>, ScraperError> {
        tracing::info!(
            category = %category.name,
            shard = %category.shard_id,
            "crawling category"
        );
        self.crawl_listing(&ListingQuery::category(category), progress)
            .await
    }

    /// Crawls all products in the results of a keyword search.
    ///
    /// # Errors
    ///
    /// Returns [`ScraperError::EmptySearchKeyword`] for a blank keyword, and
    /// propagates any error from [`Self::crawl_listing`].
    pub async fn crawl_search(
        &self,
        keyword: &str,
        progress: &mut dyn ProgressObserver,
    ) -> Result<Vec<ProductRecord>, ScraperError> {
        let query = ListingQuery::search(keyword)?;
        tracing::info!(keyword, "crawling search results");
        self.crawl_listing(&query, progress).await
    }
}
