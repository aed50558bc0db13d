//! Wire types for the marketplace's public JSON endpoints.
//!
//! ## Catalogue (`main-menu-ru-ru-v2.json`)
//! A top-level JSON array of nodes. Each node usually carries `id`, `name`,
//! `url`, `shard` and `query`, plus a `childs` array for sub-categories.
//! The schema is not consistent: landing-page nodes often lack `shard` or
//! `query`, and a handful of ids arrive as numbers where strings are
//! expected. Every field is therefore optional here; validity is decided in
//! [`crate::catalogue`].
//!
//! ## Listing pages (category and search)
//! Both modes answer with `{"data": {"products": [...]}}`. Past the last
//! page the endpoint still answers 200, with `products` empty, absent, or
//! with no `data` at all. All three shapes decode to an empty page.
//!
//! ## Sales lookup (`/by-nm/?nm=ID`)
//! Either `[]` or a one-element array `[{"nm": ID, "qnt": N}]`.

use serde::{Deserialize, Deserializer};

/// One node of the category tree.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CatalogueNode {
    #[serde(default, deserialize_with = "lenient_string")]
    pub name: Option<String>,

    /// Storefront path, e.g. `"/catalog/knigi"`.
    #[serde(default, deserialize_with = "lenient_string")]
    pub url: Option<String>,

    #[serde(default, deserialize_with = "lenient_string")]
    pub shard: Option<String>,

    /// Listing filter such as `"cat=8"` or `"subject=381;1257"`.
    #[serde(default, deserialize_with = "lenient_string")]
    pub query: Option<String>,

    /// Sub-categories. The upstream key is `childs`.
    #[serde(default, alias = "childs")]
    pub children: Option<Vec<CatalogueNode>>,
}

/// Top-level response of a listing page.
#[derive(Debug, Default, Deserialize)]
pub struct ListingResponse {
    #[serde(default)]
    pub data: Option<ListingData>,
}

#[derive(Debug, Default, Deserialize)]
pub struct ListingData {
    #[serde(default)]
    pub products: Option<Vec<RawProduct>>,
}

impl ListingResponse {
    /// Consumes the response and returns its items, empty when the page
    /// carried none.
    #[must_use]
    pub fn into_products(self) -> Vec<RawProduct> {
        self.data.and_then(|d| d.products).unwrap_or_default()
    }
}

/// A single product as returned on a listing page.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawProduct {
    /// Article number (`nm`), also the sales-lookup key.
    pub id: u64,

    pub name: String,

    #[serde(default)]
    pub brand: String,

    /// `0` on unbranded items; absent on some promoted cards.
    #[serde(default)]
    pub brand_id: u64,

    /// Regular price in kopecks.
    pub price_u: i64,

    /// Discounted price in kopecks.
    pub sale_price_u: i64,

    #[serde(default)]
    pub rating: f64,

    /// Review count.
    #[serde(default)]
    pub feedbacks: u64,
}

/// One element of a sales-lookup response.
#[derive(Debug, Clone, Deserialize)]
pub struct SalesEntry {
    /// Units sold.
    pub qnt: u64,
}

/// Accepts a string or a number; anything else (null, objects, arrays) is
/// treated as absent.
fn lenient_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(serde_json::Value::String(s)) => Some(s),
        Some(serde_json::Value::Number(n)) => Some(n.to_string()),
        _ => None,
    })
}
