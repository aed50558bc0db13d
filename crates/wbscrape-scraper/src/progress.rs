//! Progress reporting hooks for crawls and sales enrichment.
//!
//! The crawl loop and the enricher call these as they go. Nothing in the
//! pipeline depends on what an observer does with them.

use wbscrape_core::SalesOutcome;

use crate::pagination::PageStop;

pub trait ProgressObserver {
    /// A listing page produced `added` records.
    fn page_fetched(&mut self, _page: u32, _added: usize) {}

    /// Pagination ended; `total` records were accumulated.
    fn pagination_finished(&mut self, _stop: PageStop, _total: usize) {}

    /// Record `index` (1-based) of `total` received its sales outcome.
    fn sales_enriched(
        &mut self,
        _index: usize,
        _total: usize,
        _item_id: u64,
        _outcome: SalesOutcome,
    ) {
    }
}

/// Discards all progress events.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoProgress;

impl ProgressObserver for NoProgress {}

/// Reports progress through `tracing` at `info` level.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingProgress;

impl ProgressObserver for TracingProgress {
    fn page_fetched(&mut self, page: u32, added: usize) {
        tracing::info!(page, added, "listing page loaded");
    }

    fn pagination_finished(&mut self, stop: PageStop, total: usize) {
        match stop {
            PageStop::EmptyPage { page } => {
                tracing::info!(page, total, "listing exhausted");
            }
            PageStop::PageCap { pages } => {
                tracing::info!(pages, total, "listing stopped at page cap");
            }
        }
    }

    fn sales_enriched(&mut self, index: usize, total: usize, item_id: u64, outcome: SalesOutcome) {
        tracing::info!(index, total, item_id, ?outcome, "sales collected");
    }
}
