use crate::app_config::AppConfig;
use crate::ConfigError;

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if a value is present but invalid.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the process.
///
/// Unlike [`load_app_config`], this does NOT load `.env` files.
///
/// # Errors
///
/// Returns `ConfigError` if a value is present but invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// Every variable is optional; parsing is decoupled from the process
/// environment so tests can feed a plain `HashMap`.
///
/// # Errors
///
/// Returns `ConfigError` if a value is present but invalid.
pub fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    use std::path::PathBuf;

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let optional = |var: &str| -> Option<String> {
        lookup(var).ok().filter(|v| !v.trim().is_empty())
    };

    let parse = |var: &str, default: &str| -> Result<ParsedNumber, ConfigError> {
        let raw = or_default(var, default);
        raw.trim()
            .parse::<i64>()
            .map(|value| ParsedNumber { var: var.to_string(), value })
            .map_err(|e| ConfigError::InvalidEnvVar {
                var: var.to_string(),
                reason: e.to_string(),
            })
    };

    let log_level = or_default("TRENDSCOPE_LOG_LEVEL", "info");
    let data_dir = PathBuf::from(or_default("TRENDSCOPE_DATA_DIR", "./data"));
    let categories_path = optional("TRENDSCOPE_CATEGORIES_PATH").map(PathBuf::from);
    let scraper_base_url = optional("TRENDSCOPE_SCRAPER_BASE_URL");
    let scraper_api_token = optional("TRENDSCOPE_SCRAPER_API_TOKEN");
    let scraper_user_agent = or_default(
        "TRENDSCOPE_SCRAPER_USER_AGENT",
        "trendscope/0.1 (trend-intelligence)",
    );
    let sentiment_model_url = optional("TRENDSCOPE_SENTIMENT_MODEL_URL");

    let scraper_request_timeout_secs =
        parse("TRENDSCOPE_SCRAPER_REQUEST_TIMEOUT_SECS", "30")?.positive_u64()?;
    let scraper_query_timeout_secs =
        parse("TRENDSCOPE_SCRAPER_QUERY_TIMEOUT_SECS", "90")?.positive_u64()?;
    let scraper_max_concurrent_queries =
        parse("TRENDSCOPE_SCRAPER_MAX_CONCURRENT_QUERIES", "4")?.positive_usize()?;
    let scraper_results_per_hashtag =
        parse("TRENDSCOPE_SCRAPER_RESULTS_PER_HASHTAG", "50")?.positive_u32()?;
    let scraper_max_retries = parse("TRENDSCOPE_SCRAPER_MAX_RETRIES", "3")?.non_negative_u32()?;
    let scraper_retry_backoff_base_secs =
        parse("TRENDSCOPE_SCRAPER_RETRY_BACKOFF_BASE_SECS", "5")?.non_negative_u64()?;

    let max_age_hours = parse("TRENDSCOPE_MAX_AGE_HOURS", "72")?.non_negative()?;
    let max_items = parse("TRENDSCOPE_MAX_ITEMS", "40")?.positive_usize()?;
    let max_candidates = parse("TRENDSCOPE_MAX_CANDIDATES", "200")?.positive_usize()?;
    let comment_weight = parse("TRENDSCOPE_COMMENT_WEIGHT", "2")?.positive_u32()?;
    let like_weight = parse("TRENDSCOPE_LIKE_WEIGHT", "1")?.positive_u32()?;
    let duplicate_window_hours =
        parse("TRENDSCOPE_DUPLICATE_WINDOW_HOURS", "24")?.non_negative()?;
    let min_text_len = parse("TRENDSCOPE_MIN_TEXT_LEN", "20")?.positive_usize()?;
    let min_theme_recurrence = parse("TRENDSCOPE_MIN_THEME_RECURRENCE", "2")?.positive_usize()?;
    let max_themes = parse("TRENDSCOPE_MAX_THEMES", "5")?.positive_usize()?;

    Ok(AppConfig {
        log_level,
        data_dir,
        categories_path,
        scraper_base_url,
        scraper_api_token,
        scraper_user_agent,
        scraper_request_timeout_secs,
        scraper_query_timeout_secs,
        scraper_max_concurrent_queries,
        scraper_results_per_hashtag,
        scraper_max_retries,
        scraper_retry_backoff_base_secs,
        sentiment_model_url,
        max_age_hours,
        max_items,
        max_candidates,
        comment_weight,
        like_weight,
        duplicate_window_hours,
        min_text_len,
        min_theme_recurrence,
        max_themes,
    })
}

/// An integer env value, kept with its variable name for range errors.
struct ParsedNumber {
    var: String,
    value: i64,
}

impl ParsedNumber {
    fn out_of_range(&self, reason: &str) -> ConfigError {
        ConfigError::InvalidEnvVar {
            var: self.var.clone(),
            reason: format!("{reason}, got {}", self.value),
        }
    }

    fn non_negative(self) -> Result<i64, ConfigError> {
        if self.value < 0 {
            return Err(self.out_of_range("must not be negative"));
        }
        Ok(self.value)
    }

    fn non_negative_u64(self) -> Result<u64, ConfigError> {
        u64::try_from(self.value).map_err(|_| self.out_of_range("must not be negative"))
    }

    fn non_negative_u32(self) -> Result<u32, ConfigError> {
        u32::try_from(self.value).map_err(|_| self.out_of_range("must fit in 0..=u32::MAX"))
    }

    fn positive_u64(self) -> Result<u64, ConfigError> {
        if self.value <= 0 {
            return Err(self.out_of_range("must be positive"));
        }
        self.non_negative_u64()
    }

    fn positive_u32(self) -> Result<u32, ConfigError> {
        if self.value <= 0 {
            return Err(self.out_of_range("must be positive"));
        }
        self.non_negative_u32()
    }

    fn positive_usize(self) -> Result<usize, ConfigError> {
        if self.value <= 0 {
            return Err(self.out_of_range("must be positive"));
        }
        usize::try_from(self.value).map_err(|_| self.out_of_range("too large"))
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
