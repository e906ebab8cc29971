use std::path::PathBuf;
use std::time::Duration;

use crate::settings::{ClassifierConfig, EngagementWeights, TrendConfig};

#[derive(Clone)]
pub struct AppConfig {
    pub log_level: String,
    pub data_dir: PathBuf,
    pub categories_path: Option<PathBuf>,
    pub scraper_base_url: Option<String>,
    pub scraper_api_token: Option<String>,
    pub scraper_user_agent: String,
    pub scraper_request_timeout_secs: u64,
    pub scraper_query_timeout_secs: u64,
    pub scraper_max_concurrent_queries: usize,
    pub scraper_results_per_hashtag: u32,
    pub scraper_max_retries: u32,
    pub scraper_retry_backoff_base_secs: u64,
    pub sentiment_model_url: Option<String>,
    pub max_age_hours: i64,
    pub max_items: usize,
    pub max_candidates: usize,
    pub comment_weight: u32,
    pub like_weight: u32,
    pub duplicate_window_hours: i64,
    pub min_text_len: usize,
    pub min_theme_recurrence: usize,
    pub max_themes: usize,
}

impl AppConfig {
    /// Trend settings for `category`, seeded from the environment defaults.
    #[must_use]
    pub fn trend_config<I, S>(&self, category: &str, hashtags: I) -> TrendConfig
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        TrendConfig {
            max_candidates: self.max_candidates,
            max_age_hours: self.max_age_hours,
            weights: EngagementWeights {
                comment: self.comment_weight,
                like: self.like_weight,
            },
            duplicate_window_hours: self.duplicate_window_hours,
            max_items: self.max_items,
            query_timeout: Duration::from_secs(self.scraper_query_timeout_secs),
            max_concurrent_queries: self.scraper_max_concurrent_queries,
            results_per_hashtag: self.scraper_results_per_hashtag,
            ..TrendConfig::new(category, hashtags)
        }
    }

    #[must_use]
    pub fn classifier_config(&self) -> ClassifierConfig {
        ClassifierConfig {
            min_text_len: self.min_text_len,
            min_theme_recurrence: self.min_theme_recurrence,
            max_themes: self.max_themes,
            ..ClassifierConfig::default()
        }
    }
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("log_level", &self.log_level)
            .field("data_dir", &self.data_dir)
            .field("categories_path", &self.categories_path)
            .field("scraper_base_url", &self.scraper_base_url)
            .field(
                "scraper_api_token",
                &self.scraper_api_token.as_ref().map(|_| "[redacted]"),
            )
            .field("scraper_user_agent", &self.scraper_user_agent)
            .field(
                "scraper_request_timeout_secs",
                &self.scraper_request_timeout_secs,
            )
            .field("scraper_query_timeout_secs", &self.scraper_query_timeout_secs)
            .field(
                "scraper_max_concurrent_queries",
                &self.scraper_max_concurrent_queries,
            )
            .field(
                "scraper_results_per_hashtag",
                &self.scraper_results_per_hashtag,
            )
            .field("scraper_max_retries", &self.scraper_max_retries)
            .field(
                "scraper_retry_backoff_base_secs",
                &self.scraper_retry_backoff_base_secs,
            )
            .field("sentiment_model_url", &self.sentiment_model_url)
            .field("max_age_hours", &self.max_age_hours)
            .field("max_items", &self.max_items)
            .field("max_candidates", &self.max_candidates)
            .field("comment_weight", &self.comment_weight)
            .field("like_weight", &self.like_weight)
            .field("duplicate_window_hours", &self.duplicate_window_hours)
            .field("min_text_len", &self.min_text_len)
            .field("min_theme_recurrence", &self.min_theme_recurrence)
            .field("max_themes", &self.max_themes)
            .finish()
    }
}
