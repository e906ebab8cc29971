use thiserror::Error;

#[derive(Debug, Error)]
pub enum TrendError {
    /// Raised before any scraper query is issued.
    #[error("configuration invalid: {0}")]
    ConfigurationInvalid(#[from] trendscope_core::ConfigError),
}
