use std::path::PathBuf;

use crate::failure::FailureKind;

/// Base URLs and routing parameters for the marketplace's public endpoints.
///
/// Split out of [`AppConfig`] so tests can point the client at a mock server
/// without building a whole config.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoints {
    pub catalogue_url: String,
    pub catalog_api_base: String,
    pub search_api_base: String,
    pub sales_api_base: String,
    pub storefront_base: String,
    /// Region routing value sent as `dest` on every listing request.
    pub dest: String,
}

impl Endpoints {
    /// Points every endpoint at the same base URL (catalogue at
    /// `{base}/catalogue.json`). Used for mock servers.
    #[must_use]
    pub fn single_host(base: &str) -> Self {
        let base = base.trim_end_matches('/');
        Self {
            catalogue_url: format!("{base}/catalogue.json"),
            catalog_api_base: base.to_owned(),
            search_api_base: base.to_owned(),
            sales_api_base: base.to_owned(),
            storefront_base: base.to_owned(),
            dest: "-1257786".to_owned(),
        }
    }
}

impl Default for Endpoints {
    fn default() -> Self {
        Self {
            catalogue_url: "https://static-basket-01.wb.ru/vol0/data/main-menu-ru-ru-v2.json"
                .to_owned(),
            catalog_api_base: "https://catalog.wb.ru".to_owned(),
            search_api_base: "https://search.wb.ru".to_owned(),
            sales_api_base: "https://product-order-qnt.wildberries.ru".to_owned(),
            storefront_base: "https://www.wildberries.ru".to_owned(),
            dest: "-1257786".to_owned(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub log_level: String,
    pub user_agent: String,
    pub request_timeout_secs: u64,
    pub connect_timeout_secs: u64,
    pub inter_request_delay_ms: u64,
    pub max_retries: u32,
    pub retry_backoff_base_ms: u64,
    /// Failure kinds the sales enricher maps to `SalesOutcome::Unknown`
    /// instead of aborting the run.
    pub sales_recoverable: Vec<FailureKind>,
    pub catalogue_cache_path: PathBuf,
    pub output_dir: PathBuf,
    pub endpoints: Endpoints,
}
