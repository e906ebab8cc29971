//! HTTP adapter for a scraper service that exposes hashtag datasets.

use std::time::Duration;

use percent_encoding::{utf8_percent_encode, NON_ALPHANUMERIC};
use reqwest::Client;
use trendscope_core::AppConfig;

use super::PostSource;
use crate::error::ScraperError;
use crate::rate_limit::retry_with_backoff;
use crate::types::{RawRecord, RecordBatch};

/// Client for `GET {base}/hashtags/{tag}/posts?limit=N`.
///
/// 429 responses and network failures are retried with exponential backoff
/// up to `max_retries` additional attempts.
pub struct HttpPostSource {
    client: Client,
    base_url: String,
    host: String,
    api_token: Option<String>,
    max_retries: u32,
    backoff_base_secs: u64,
}

impl HttpPostSource {
    /// # Errors
    ///
    /// Returns [`ScraperError::InvalidBaseUrl`] if `base_url` is not an
    /// `http(s)://` URL, or [`ScraperError::Http`] if the `reqwest::Client`
    /// cannot be constructed.
    pub fn new(
        base_url: &str,
        api_token: Option<String>,
        timeout_secs: u64,
        user_agent: &str,
        max_retries: u32,
        backoff_base_secs: u64,
    ) -> Result<Self, ScraperError> {
        let base_url = base_url.trim().trim_end_matches('/').to_string();
        let host = host_of(&base_url).ok_or_else(|| ScraperError::InvalidBaseUrl {
            base_url: base_url.clone(),
            reason: "expected an http:// or https:// URL with a host".to_string(),
        })?;

        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(user_agent)
            .build()?;

        Ok(Self {
            client,
            base_url,
            host,
            api_token,
            max_retries,
            backoff_base_secs,
        })
    }

    /// Build from the `TRENDSCOPE_SCRAPER_*` settings.
    ///
    /// # Errors
    ///
    /// Returns [`ScraperError::InvalidBaseUrl`] when no base URL is configured,
    /// plus anything [`Self::new`] returns.
    pub fn from_app_config(config: &AppConfig) -> Result<Self, ScraperError> {
        let base_url =
            config
                .scraper_base_url
                .as_deref()
                .ok_or_else(|| ScraperError::InvalidBaseUrl {
                    base_url: String::new(),
                    reason: "TRENDSCOPE_SCRAPER_BASE_URL is not set".to_string(),
                })?;
        Self::new(
            base_url,
            config.scraper_api_token.clone(),
            config.scraper_request_timeout_secs,
            &config.scraper_user_agent,
            config.scraper_max_retries,
            config.scraper_retry_backoff_base_secs,
        )
    }

    fn hashtag_url(&self, hashtag: &str, limit: u32) -> String {
        format!(
            "{}/hashtags/{}/posts?limit={limit}",
            self.base_url,
            utf8_percent_encode(hashtag, NON_ALPHANUMERIC)
        )
    }

    async fn fetch_once(&self, url: &str) -> Result<Vec<RawRecord>, ScraperError> {
        let mut request = self
            .client
            .get(url)
            .header(reqwest::header::ACCEPT, "application/json");
        if let Some(token) = &self.api_token {
            request = request.bearer_auth(token);
        }

        let response = request.send().await?;
        let status = response.status();

        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            let retry_after_secs = response
                .headers()
                .get(reqwest::header::RETRY_AFTER)
                .and_then(|v| v.to_str().ok())
                .and_then(|s| s.parse::<u64>().ok())
                .unwrap_or(0);
            return Err(ScraperError::RateLimited {
                host: self.host.clone(),
                retry_after_secs,
            });
        }
        if !status.is_success() {
            return Err(ScraperError::UnexpectedStatus {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        let body = response.text().await?;
        Ok(RecordBatch::parse(&body, url)?.into_records())
    }
}

impl PostSource for HttpPostSource {
    async fn fetch_hashtag(
        &self,
        hashtag: &str,
        limit: u32,
    ) -> Result<Vec<RawRecord>, ScraperError> {
        let url = self.hashtag_url(hashtag, limit);
        let url = url.as_str();
        let records = retry_with_backoff(self.max_retries, self.backoff_base_secs, || {
            self.fetch_once(url)
        })
        .await?;
        tracing::debug!(hashtag, count = records.len(), "fetched hashtag records");
        Ok(records)
    }
}

fn host_of(base_url: &str) -> Option<String> {
    let rest = base_url
        .strip_prefix("https://")
        .or_else(|| base_url.strip_prefix("http://"))?;
    let host = rest.split(['/', '?', '#']).next()?;
    (!host.is_empty()).then(|| host.to_string())
}
