use serde::{Deserialize, Serialize};

/// One browsable marketplace category, flattened out of the catalogue tree.
///
/// Only built when all four routing fields are present on the source node;
/// `shard_id` and `query_string` are required to address the category's
/// listing endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryDescriptor {
    /// Display name, e.g. `"Книги"`.
    pub name: String,
    /// Storefront path, e.g. `"/catalog/knigi"`.
    pub url_path: String,
    /// Listing shard, e.g. `"books"`.
    pub shard_id: String,
    /// Opaque listing filter appended verbatim to the page URL, e.g. `"cat=8"`.
    pub query_string: String,
}

/// Result of the per-item sales lookup.
///
/// The three states are kept apart all the way to export: a lookup that
/// answered "no data" is not the same as one that never answered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", content = "count", rename_all = "snake_case")]
pub enum SalesOutcome {
    /// Lookup returned a quantity.
    Count(u64),
    /// Lookup succeeded but returned an empty result.
    Unavailable,
    /// Lookup failed with a recoverable transport condition (e.g. timeout).
    Unknown,
}

impl SalesOutcome {
    /// Returns the sold quantity when the lookup produced one.
    #[must_use]
    pub fn count(self) -> Option<u64> {
        match self {
            Self::Count(n) => Some(n),
            Self::Unavailable | Self::Unknown => None,
        }
    }
}

/// A single listing item, normalized from one listing page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductRecord {
    /// Storefront product page, e.g. `"https://www.wildberries.ru/catalog/123/detail.aspx"`.
    pub listing_url: String,
    pub item_id: u64,
    pub name: String,
    pub brand_name: String,
    pub brand_id: u64,
    /// Whole currency units, truncated from the minor-unit price.
    pub regular_price: i64,
    /// Whole currency units, truncated from the minor-unit sale price.
    pub discounted_price: i64,
    pub rating: f64,
    pub review_count: u64,
    /// `None` until the sales enricher has visited this record.
    pub sales_count: Option<SalesOutcome>,
}
