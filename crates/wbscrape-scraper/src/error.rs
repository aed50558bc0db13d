use thiserror::Error;
use wbscrape_core::FailureKind;

#[derive(Debug, Error)]
pub enum ScraperError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("unexpected HTTP status {status} from {url}")]
    UnexpectedStatus { status: u16, url: String },

    #[error("invalid URL \"{url}\": {reason}")]
    InvalidUrl { url: String, reason: String },

    #[error("search keyword is empty")]
    EmptySearchKeyword,

    #[error("category not found: \"{input}\"")]
    CategoryNotFound { input: String },
}

impl ScraperError {
    /// Classifies the error for retry and recovery decisions.
    ///
    /// `reqwest` marks connect timeouts as both connect and timeout errors;
    /// they are reported as [`FailureKind::Timeout`].
    #[must_use]
    pub fn failure_kind(&self) -> FailureKind {
        match self {
            Self::Http(e) if e.is_timeout() => FailureKind::Timeout,
            Self::Http(e) if e.is_connect() => FailureKind::Connect,
            Self::Http(e) if e.is_status() => FailureKind::Status,
            Self::Http(e) if e.is_decode() || e.is_body() => FailureKind::Decode,
            Self::UnexpectedStatus { .. } => FailureKind::Status,
            Self::Deserialize { .. } => FailureKind::Decode,
            Self::Http(_)
            | Self::InvalidUrl { .. }
            | Self::EmptySearchKeyword
            | Self::CategoryNotFound { .. } => FailureKind::Other,
        }
    }
}
