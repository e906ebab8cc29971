use thiserror::Error;

/// Why a raw record could not become a [`trendscope_core::Post`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NormalizeError {
    #[error("raw record is not a JSON object")]
    NotAnObject,

    #[error("missing required field `{field}`: {reason}")]
    MissingRequiredField { field: &'static str, reason: String },
}

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

    #[error("I/O error reading {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("rate limited by {host} (retry after {retry_after_secs}s)")]
    RateLimited { host: String, retry_after_secs: u64 },

    #[error("unexpected HTTP status {status} from {url}")]
    UnexpectedStatus { status: u16, url: String },

    #[error("invalid scraper base URL \"{base_url}\": {reason}")]
    InvalidBaseUrl { base_url: String, reason: String },

    /// A single record failed normalization.
    #[error("malformed record: {0}")]
    MalformedRecord(#[from] NormalizeError),

    /// A hashtag query exceeded its time bound.
    #[error("query for #{hashtag} timed out after {timeout_secs}s")]
    CollectorTimeout { hashtag: String, timeout_secs: u64 },
}
