//! Sales enrichment: one lookup per record, classified into a
//! [`SalesOutcome`].
//!
//! An empty lookup response means the endpoint has no figure for the item
//! and is recorded as [`SalesOutcome::Unavailable`]. A failed lookup is
//! recorded as [`SalesOutcome::Unknown`] only when its [`FailureKind`] is
//! covered by the [`RecoveryPolicy`]; any other failure aborts the run.

use std::future::Future;

use wbscrape_core::{AppConfig, FailureKind, ProductRecord, SalesOutcome};

use crate::error::ScraperError;
use crate::progress::ProgressObserver;
use crate::types::SalesEntry;

/// Which lookup failures are recorded as [`SalesOutcome::Unknown`] instead
/// of aborting enrichment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecoveryPolicy {
    recoverable: Vec<FailureKind>,
}

impl RecoveryPolicy {
    #[must_use]
    pub fn new(kinds: impl IntoIterator<Item = FailureKind>) -> Self {
        let mut recoverable = Vec::new();
        for kind in kinds {
            if !recoverable.contains(&kind) {
                recoverable.push(kind);
            }
        }
        Self { recoverable }
    }

    /// A policy under which every lookup failure is fatal.
    #[must_use]
    pub fn none() -> Self {
        Self {
            recoverable: Vec::new(),
        }
    }

    #[must_use]
    pub fn from_config(config: &AppConfig) -> Self {
        Self::new(config.sales_recoverable.iter().copied())
    }

    #[must_use]
    pub fn recovers(&self, err: &ScraperError) -> bool {
        self.recoverable.contains(&err.failure_kind())
    }
}

impl Default for RecoveryPolicy {
    /// Only timeouts are recovered.
    fn default() -> Self {
        Self::new([FailureKind::Timeout])
    }
}

/// Maps the result of one sales lookup to an outcome.
///
/// Only the first entry of a non-empty response is used.
///
/// # Errors
///
/// Returns the lookup error unchanged when `policy` does not recover it.
pub fn classify_sales(
    lookup: Result<Vec<SalesEntry>, ScraperError>,
    policy: &RecoveryPolicy,
) -> Result<SalesOutcome, ScraperError> {
    match lookup {
        Ok(entries) => Ok(entries
            .first()
            .map_or(SalesOutcome::Unavailable, |entry| SalesOutcome::Count(entry.qnt))),
        Err(err) if policy.recovers(&err) => {
            tracing::warn!(
                kind = %err.failure_kind(),
                error = %err,
                "sales lookup failed, recording as unknown"
            );
            Ok(SalesOutcome::Unknown)
        }
        Err(err) => Err(err),
    }
}

/// Runs `lookup` for every record, in order, and stores the classified
/// outcome in its `sales_count`.
///
/// Lookups are strictly sequential. Record order and length are preserved.
///
/// # Errors
///
/// Returns the first lookup error that `policy` does not recover. Records
/// enriched before it are dropped.
pub async fn enrich_records<F, Fut>(
    mut records: Vec<ProductRecord>,
    policy: &RecoveryPolicy,
    mut lookup: F,
    progress: &mut dyn ProgressObserver,
) -> Result<Vec<ProductRecord>, ScraperError>
where
    F: FnMut(u64) -> Fut,
    Fut: Future<Output = Result<Vec<SalesEntry>, ScraperError>>,
{
    let total = records.len();
    for (idx, record) in records.iter_mut().enumerate() {
        let outcome = classify_sales(lookup(record.item_id).await, policy)?;
        record.sales_count = Some(outcome);
        progress.sales_enriched(idx + 1, total, record.item_id, outcome);
    }
    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(item_id: u64) -> ProductRecord {
        ProductRecord {
            listing_url: format!("https://www.wildberries.ru/catalog/{item_id}/detail.aspx"),
            item_id,
            name: format!("Item {item_id}"),
            brand_name: "Brand".to_owned(),
            brand_id: 1,
            regular_price: 500,
            discounted_price: 450,
            rating: 4.0,
            review_count: 3,
            sales_count: None,
        }
    }

    fn entries(qnts: &[u64]) -> Vec<SalesEntry> {
        qnts.iter().map(|&qnt| SalesEntry { qnt }).collect()
    }

    fn server_error() -> ScraperError {
        ScraperError::UnexpectedStatus {
            status: 500,
            url: "https://product-order-qnt.wildberries.ru/by-nm/?nm=1".to_owned(),
        }
    }

    #[derive(Default)]
    struct Recorder {
        events: Vec<(usize, usize, u64, SalesOutcome)>,
    }

    impl ProgressObserver for Recorder {
        fn sales_enriched(&mut self, index: usize, total: usize, item_id: u64, outcome: SalesOutcome) {
            self.events.push((index, total, item_id, outcome));
        }
    }

    #[test]
    fn first_entry_is_the_count() {
        let outcome = classify_sales(Ok(entries(&[42, 7])), &RecoveryPolicy::default()).unwrap();
        assert_eq!(outcome, SalesOutcome::Count(42));
    }

    #[test]
    fn zero_count_is_distinct_from_unavailable() {
        let policy = RecoveryPolicy::default();
        assert_eq!(
            classify_sales(Ok(entries(&[0])), &policy).unwrap(),
            SalesOutcome::Count(0)
        );
        assert_eq!(
            classify_sales(Ok(Vec::new()), &policy).unwrap(),
            SalesOutcome::Unavailable
        );
    }

    #[test]
    fn recoverable_failure_is_unknown() {
        let policy = RecoveryPolicy::new([FailureKind::Status]);
        let outcome = classify_sales(Err(server_error()), &policy).unwrap();
        assert_eq!(outcome, SalesOutcome::Unknown);
    }

    #[test]
    fn unrecoverable_failure_propagates() {
        let err = classify_sales(Err(server_error()), &RecoveryPolicy::default()).unwrap_err();
        assert!(matches!(err, ScraperError::UnexpectedStatus { status: 500, .. }));
    }

    #[test]
    fn none_policy_recovers_nothing() {
        assert!(!RecoveryPolicy::none().recovers(&server_error()));
    }

    #[test]
    fn new_dedups_kinds() {
        let policy = RecoveryPolicy::new([FailureKind::Timeout, FailureKind::Timeout]);
        assert_eq!(policy, RecoveryPolicy::default());
    }

    #[tokio::test]
    async fn enrichment_preserves_order_and_reports_progress() {
        let records = vec![record(30), record(10), record(20)];
        let mut progress = Recorder::default();
        let mut looked_up = Vec::new();

        let enriched = enrich_records(
            records,
            &RecoveryPolicy::default(),
            |item_id| {
                looked_up.push(item_id);
                let result = if item_id == 10 {
                    Ok(Vec::new())
                } else {
                    Ok(entries(&[item_id * 2]))
                };
                std::future::ready(result)
            },
            &mut progress,
        )
        .await
        .unwrap();

        assert_eq!(looked_up, [30, 10, 20]);
        let outcomes: Vec<(u64, Option<SalesOutcome>)> =
            enriched.iter().map(|r| (r.item_id, r.sales_count)).collect();
        assert_eq!(
            outcomes,
            [
                (30, Some(SalesOutcome::Count(60))),
                (10, Some(SalesOutcome::Unavailable)),
                (20, Some(SalesOutcome::Count(40))),
            ]
        );
        assert_eq!(
            progress.events,
            [
                (1, 3, 30, SalesOutcome::Count(60)),
                (2, 3, 10, SalesOutcome::Unavailable),
                (3, 3, 20, SalesOutcome::Count(40)),
            ]
        );
    }

    #[tokio::test]
    async fn fatal_lookup_stops_enrichment() {
        let mut looked_up = Vec::new();
        let result = enrich_records(
            vec![record(1), record(2), record(3)],
            &RecoveryPolicy::default(),
            |item_id| {
                looked_up.push(item_id);
                let result = if item_id == 2 {
                    Err(server_error())
                } else {
                    Ok(entries(&[1]))
                };
                std::future::ready(result)
            },
            &mut crate::progress::NoProgress,
        )
        .await;

        assert!(result.is_err());
        assert_eq!(looked_up, [1, 2], "no lookups after a fatal failure");
    }

    #[tokio::test]
    async fn empty_input_makes_no_lookups() {
        let mut calls = 0;
        let enriched = enrich_records(
            Vec::new(),
            &RecoveryPolicy::default(),
            |_| {
                calls += 1;
                std::future::ready(Ok(Vec::new()))
            },
            &mut crate::progress::NoProgress,
        )
        .await
        .unwrap();
        assert!(enriched.is_empty());
        assert_eq!(calls, 0);
    }
}
