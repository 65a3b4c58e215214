//! Error types for the crawl pipeline

use thiserror::Error;

/// Boxed error from an underlying collaborator (HTTP client, fixture source)
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

#[derive(Debug, Error)]
pub enum CrawlError {
    /// Network or HTTP failure while fetching a page
    #[error("failed to fetch {url}: {source}")]
    Fetch {
        url: String,
        #[source]
        source: BoxError,
    },

    #[error("invalid url {url}: {source}")]
    InvalidUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },

    #[error("invalid selector `{selector}`: {reason}")]
    InvalidSelector { selector: String, reason: String },

    /// An expected structural anchor is absent from the page markup
    #[error("no element matching `{selector}` in {context}")]
    MissingElement {
        selector: String,
        context: &'static str,
    },

    #[error("element `{selector}` has no `{attr}` attribute")]
    MissingAttribute { selector: String, attr: String },

    /// Extraction of a single listing failed
    #[error("listing {url}: {source}")]
    Listing {
        url: String,
        #[source]
        source: Box<CrawlError>,
    },

    #[error("pattern `{0}` given more than once")]
    DuplicatePattern(String),

    #[error("pattern `{pattern}` matched {matches} detail blocks")]
    AmbiguousMatch { pattern: String, matches: usize },

    #[error("column mismatch: expected {expected:?}, got {found:?}")]
    ColumnMismatch {
        expected: Vec<String>,
        found: Vec<String>,
    },

    #[error("invalid crawl config: {0}")]
    Config(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, CrawlError>;

impl CrawlError {
    pub(crate) fn fetch(url: &str, source: impl Into<BoxError>) -> Self {
        CrawlError::Fetch {
            url: url.to_string(),
            source: source.into(),
        }
    }
}
