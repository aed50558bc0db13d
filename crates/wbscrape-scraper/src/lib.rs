pub mod catalogue;
pub mod client;
pub mod enrich;
pub mod error;
pub mod normalize;
pub mod pagination;
pub mod progress;
pub mod resolve;
pub mod retry;
pub mod types;

pub use catalogue::{flatten_catalogue, parse_catalogue};
pub use client::{ClientOptions, WbClient};
pub use enrich::RecoveryPolicy;
pub use error::ScraperError;
pub use normalize::extract_products;
pub use pagination::{ListingQuery, PageStop, MAX_PAGES};
pub use progress::{NoProgress, ProgressObserver, TracingProgress};
pub use resolve::resolve_category;
pub use types::{CatalogueNode, ListingResponse, RawProduct, SalesEntry};
