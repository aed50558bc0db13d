//! Page-numbered listing traversal shared by category and search modes.
//!
//! Both listing endpoints take a 1-based `page` parameter and answer with the
//! same body shape. There is no cursor or total count; the only end-of-results
//! signal is a page with no products. [`paginate`] walks pages from 1 until
//! that happens or [`MAX_PAGES`] is reached. The endpoint refuses to serve
//! past page 100 anyway, and the cap keeps a misbehaving endpoint from
//! looping forever.

use std::future::Future;

use percent_encoding::{utf8_percent_encode, AsciiSet, CONTROLS};
use wbscrape_core::{CategoryDescriptor, Endpoints, ProductRecord};

use crate::error::ScraperError;
use crate::progress::ProgressObserver;

/// Hard upper bound on pages fetched per crawl.
pub const MAX_PAGES: u32 = 100;

/// Characters escaped inside a search-keyword word. Spaces never reach this
/// set because words are joined with a literal `%20`.
const KEYWORD: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'&')
    .add(b'+')
    .add(b'<')
    .add(b'=')
    .add(b'>')
    .add(b'?')
    .add(b'`');

/// Why pagination stopped. Both are normal, successful terminations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageStop {
    /// `page` returned no products.
    EmptyPage { page: u32 },
    /// Every page up to the cap returned products.
    PageCap { pages: u32 },
}

/// What to list: a catalogue category or a keyword search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListingQuery {
    Category { shard: String, query: String },
    Search { keyword: String },
}

impl ListingQuery {
    #[must_use]
    pub fn category(descriptor: &CategoryDescriptor) -> Self {
        Self::Category {
            shard: descriptor.shard_id.clone(),
            query: descriptor.query_string.clone(),
        }
    }

    /// Builds a search query. Runs of whitespace collapse to single spaces.
    ///
    /// # Errors
    ///
    /// Returns [`ScraperError::EmptySearchKeyword`] if the keyword has no
    /// non-whitespace characters.
    pub fn search(keyword: &str) -> Result<Self, ScraperError> {
        let keyword = keyword.split_whitespace().collect::<Vec<_>>().join(" ");
        if keyword.is_empty() {
            return Err(ScraperError::EmptySearchKeyword);
        }
        Ok(Self::Search { keyword })
    }

    /// Builds the URL for one listing page.
    ///
    /// The category `query` is spliced in verbatim: it is an opaque
    /// `key=value` filter taken from the catalogue.
    ///
    /// # Errors
    ///
    /// Returns [`ScraperError::InvalidUrl`] if the configured base URL does
    /// not produce a valid URL.
    pub fn page_url(&self, endpoints: &Endpoints, page: u32) -> Result<String, ScraperError> {
        let dest = &endpoints.dest;
        let raw = match self {
            Self::Category { shard, query } => format!(
                "{base}/catalog/{shard}/catalog?appType=1&{query}&curr=rub&dest={dest}\
                 &page={page}&sort=popular&spp=24",
                base = endpoints.catalog_api_base.trim_end_matches('/'),
            ),
            Self::Search { keyword } => {
                let encoded = keyword
                    .split(' ')
                    .map(|word| utf8_percent_encode(word, KEYWORD).to_string())
                    .collect::<Vec<_>>()
                    .join("%20");
                format!(
                    "{base}/exactmatch/ru/common/v4/search?appType=1&curr=rub&dest={dest}\
                     &page={page}&query={encoded}&resultset=catalog&sort=popular&spp=24\
                     &suppressSpellcheck=false",
                    base = endpoints.search_api_base.trim_end_matches('/'),
                )
            }
        };

        reqwest::Url::parse(&raw)
            .map(String::from)
            .map_err(|e| ScraperError::InvalidUrl {
                url: raw,
                reason: e.to_string(),
            })
    }
}

/// Fetches pages `1..=MAX_PAGES` through `fetch_page` and accumulates their
/// records in page order.
///
/// Stops at the first page that yields no records, or after [`MAX_PAGES`]
/// pages. Either way the accumulated records are returned.
///
/// **All-or-nothing semantics**: any error from `fetch_page` is returned
/// immediately and the records gathered so far are dropped.
///
/// # Errors
///
/// Propagates the first error returned by `fetch_page`.
pub async fn paginate<F, Fut>(
    mut fetch_page: F,
    progress: &mut dyn ProgressObserver,
) -> Result<Vec<ProductRecord>, ScraperError>
where
    F: FnMut(u32) -> Fut,
    Fut: Future<Output = Result<Vec<ProductRecord>, ScraperError>>,
{
    let mut records: Vec<ProductRecord> = Vec::new();

    for page in 1..=MAX_PAGES {
        let batch = fetch_page(page).await?;
        if batch.is_empty() {
            progress.pagination_finished(PageStop::EmptyPage { page }, records.len());
            return Ok(records);
        }
        progress.page_fetched(page, batch.len());
        records.extend(batch);
    }

    progress.pagination_finished(PageStop::PageCap { pages: MAX_PAGES }, records.len());
    Ok(records)
}
