//! Normalization from listing-page wire types to [`ProductRecord`].

use wbscrape_core::ProductRecord;

use crate::types::{ListingResponse, RawProduct};

/// Converts a minor-unit amount (kopecks) to whole units, truncating.
///
/// `123_450` becomes `1234`, not `1235`.
#[must_use]
pub fn minor_to_major(minor: i64) -> i64 {
    minor / 100
}

/// Storefront link for an item, e.g.
/// `"https://www.wildberries.ru/catalog/123/detail.aspx"`.
#[must_use]
pub fn listing_url(storefront_base: &str, item_id: u64) -> String {
    format!(
        "{}/catalog/{item_id}/detail.aspx",
        storefront_base.trim_end_matches('/')
    )
}

/// Normalizes one raw listing item. The sales slot is left empty.
#[must_use]
pub fn normalize_product(product: RawProduct, storefront_base: &str) -> ProductRecord {
    ProductRecord {
        listing_url: listing_url(storefront_base, product.id),
        item_id: product.id,
        name: product.name,
        brand_name: product.brand,
        brand_id: product.brand_id,
        regular_price: minor_to_major(product.price_u),
        discounted_price: minor_to_major(product.sale_price_u),
        rating: product.rating,
        review_count: product.feedbacks,
        sales_count: None,
    }
}

/// Extracts every product on a listing page, in response order.
///
/// A page with no items (absent `data`, absent or empty `products`) yields
/// an empty vector. The paginator treats that as end of results.
#[must_use]
pub fn extract_products(page: ListingResponse, storefront_base: &str) -> Vec<ProductRecord> {
    page.into_products()
        .into_iter()
        .map(|p| normalize_product(p, storefront_base))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const BASE: &str = "https://www.wildberries.ru";

    fn page(json: serde_json::Value) -> ListingResponse {
        serde_json::from_value(json).expect("fixture should decode")
    }

    fn raw_item(id: u64, price_u: i64, sale_price_u: i64) -> serde_json::Value {
        serde_json::json!({
            "id": id,
            "name": format!("Item {id}"),
            "brand": "Эксмо",
            "brandId": 17,
            "priceU": price_u,
            "salePriceU": sale_price_u,
            "rating": 4.5,
            "feedbacks": 12
        })
    }

    #[test]
    fn minor_units_are_truncated_not_rounded() {
        assert_eq!(minor_to_major(123_450), 1234);
        assert_eq!(minor_to_major(99), 0);
        assert_eq!(minor_to_major(100), 1);
        assert_eq!(minor_to_major(199_999), 1999);
    }

    #[test]
    fn listing_url_strips_trailing_slash_from_base() {
        assert_eq!(
            listing_url("https://www.wildberries.ru/", 42),
            "https://www.wildberries.ru/catalog/42/detail.aspx"
        );
    }

    #[test]
    fn extracts_all_fields() {
        let records = extract_products(
            page(serde_json::json!({"data": {"products": [raw_item(9001, 123_450, 99_999)]}})),
            BASE,
        );

        assert_eq!(records.len(), 1);
        let r = &records[0];
        assert_eq!(r.listing_url, "https://www.wildberries.ru/catalog/9001/detail.aspx");
        assert_eq!(r.item_id, 9001);
        assert_eq!(r.name, "Item 9001");
        assert_eq!(r.brand_name, "Эксмо");
        assert_eq!(r.brand_id, 17);
        assert_eq!(r.regular_price, 1234);
        assert_eq!(r.discounted_price, 999);
        assert!((r.rating - 4.5).abs() < f64::EPSILON);
        assert_eq!(r.review_count, 12);
        assert!(r.sales_count.is_none());
    }

    #[test]
    fn preserves_response_order_and_duplicates() {
        let records = extract_products(
            page(serde_json::json!({"data": {"products": [
                raw_item(3, 100, 100),
                raw_item(1, 100, 100),
                raw_item(3, 100, 100)
            ]}})),
            BASE,
        );
        let ids: Vec<u64> = records.iter().map(|r| r.item_id).collect();
        assert_eq!(ids, [3, 1, 3]);
    }

    #[test]
    fn empty_product_list_yields_nothing() {
        let records = extract_products(page(serde_json::json!({"data": {"products": []}})), BASE);
        assert!(records.is_empty());
    }

    #[test]
    fn absent_product_list_yields_nothing() {
        let records = extract_products(page(serde_json::json!({"data": {}})), BASE);
        assert!(records.is_empty());
        let records = extract_products(page(serde_json::json!({"state": 0})), BASE);
        assert!(records.is_empty());
    }
}
