use std::collections::HashMap;
use std::env::VarError;

use super::*;

fn lookup_from_map<'a>(
    map: &'a HashMap<&'a str, &'a str>,
) -> impl Fn(&str) -> Result<String, VarError> + 'a {
    move |key| {
        map.get(key)
            .map(|v| (*v).to_string())
            .ok_or(VarError::NotPresent)
    }
}

fn assert_invalid(map: &HashMap<&str, &str>, expected_var: &str) {
    let result = build_app_config(lookup_from_map(map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == expected_var),
        "expected InvalidEnvVar({expected_var}), got: {result:?}"
    );
}

#[test]
fn build_app_config_succeeds_with_empty_env() {
    let map: HashMap<&str, &str> = HashMap::new();
    let result = build_app_config(lookup_from_map(&map));
    assert!(result.is_ok(), "expected Ok, got: {result:?}");
    let cfg = result.unwrap();
    assert_eq!(cfg.log_level, "info");
    assert_eq!(cfg.data_dir.to_str(), Some("./data"));
    assert!(cfg.categories_path.is_none());
    assert!(cfg.scraper_base_url.is_none());
    assert!(cfg.scraper_api_token.is_none());
    assert_eq!(cfg.scraper_user_agent, "trendscope/0.1 (trend-intelligence)");
    assert_eq!(cfg.scraper_request_timeout_secs, 30);
    assert_eq!(cfg.scraper_query_timeout_secs, 90);
    assert_eq!(cfg.scraper_max_concurrent_queries, 4);
    assert_eq!(cfg.scraper_results_per_hashtag, 50);
    assert_eq!(cfg.scraper_max_retries, 3);
    assert_eq!(cfg.scraper_retry_backoff_base_secs, 5);
    assert!(cfg.sentiment_model_url.is_none());
    assert_eq!(cfg.max_age_hours, 72);
    assert_eq!(cfg.max_items, 40);
    assert_eq!(cfg.max_candidates, 200);
    assert_eq!(cfg.comment_weight, 2);
    assert_eq!(cfg.like_weight, 1);
    assert_eq!(cfg.duplicate_window_hours, 24);
    assert_eq!(cfg.min_text_len, 20);
    assert_eq!(cfg.min_theme_recurrence, 2);
    assert_eq!(cfg.max_themes, 5);
}

#[test]
fn overrides_are_applied() {
    let mut map = HashMap::new();
    map.insert("TRENDSCOPE_MAX_AGE_HOURS", "48");
    map.insert("TRENDSCOPE_COMMENT_WEIGHT", "3");
    map.insert("TRENDSCOPE_SCRAPER_BASE_URL", "http://localhost:8080");
    map.insert("TRENDSCOPE_CATEGORIES_PATH", "./config/categories.yaml");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert_eq!(cfg.max_age_hours, 48);
    assert_eq!(cfg.comment_weight, 3);
    assert_eq!(
        cfg.scraper_base_url.as_deref(),
        Some("http://localhost:8080")
    );
    assert!(cfg.categories_path.is_some());
}

#[test]
fn blank_optional_values_are_treated_as_unset() {
    let mut map = HashMap::new();
    map.insert("TRENDSCOPE_SCRAPER_API_TOKEN", "  ");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert!(cfg.scraper_api_token.is_none());
}

#[test]
fn non_numeric_value_is_invalid() {
    let mut map = HashMap::new();
    map.insert("TRENDSCOPE_SCRAPER_REQUEST_TIMEOUT_SECS", "not-a-number");
    assert_invalid(&map, "TRENDSCOPE_SCRAPER_REQUEST_TIMEOUT_SECS");
}

#[test]
fn negative_age_window_is_invalid() {
    let mut map = HashMap::new();
    map.insert("TRENDSCOPE_MAX_AGE_HOURS", "-1");
    assert_invalid(&map, "TRENDSCOPE_MAX_AGE_HOURS");
}

#[test]
fn zero_age_window_is_accepted() {
    let mut map = HashMap::new();
    map.insert("TRENDSCOPE_MAX_AGE_HOURS", "0");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert_eq!(cfg.max_age_hours, 0);
}

#[test]
fn zero_weight_is_invalid() {
    let mut map = HashMap::new();
    map.insert("TRENDSCOPE_LIKE_WEIGHT", "0");
    assert_invalid(&map, "TRENDSCOPE_LIKE_WEIGHT");
}

#[test]
fn negative_weight_is_invalid() {
    let mut map = HashMap::new();
    map.insert("TRENDSCOPE_COMMENT_WEIGHT", "-2");
    assert_invalid(&map, "TRENDSCOPE_COMMENT_WEIGHT");
}

#[test]
fn negative_duplicate_window_is_invalid() {
    let mut map = HashMap::new();
    map.insert("TRENDSCOPE_DUPLICATE_WINDOW_HOURS", "-24");
    assert_invalid(&map, "TRENDSCOPE_DUPLICATE_WINDOW_HOURS");
}

#[test]
fn zero_retries_are_allowed() {
    let mut map = HashMap::new();
    map.insert("TRENDSCOPE_SCRAPER_MAX_RETRIES", "0");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert_eq!(cfg.scraper_max_retries, 0);
}

#[test]
fn debug_redacts_api_token() {
    let mut map = HashMap::new();
    map.insert("TRENDSCOPE_SCRAPER_API_TOKEN", "super-secret");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    let rendered = format!("{cfg:?}");
    assert!(!rendered.contains("super-secret"));
    assert!(rendered.contains("[redacted]"));
}

#[test]
fn trend_config_inherits_env_defaults() {
    let mut map = HashMap::new();
    map.insert("TRENDSCOPE_MAX_ITEMS", "10");
    map.insert("TRENDSCOPE_SCRAPER_QUERY_TIMEOUT_SECS", "15");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    let trend = cfg.trend_config("gym", ["#Gym", "legday"]);
    assert_eq!(trend.category, "gym");
    assert_eq!(trend.hashtags, vec!["gym", "legday"]);
    assert_eq!(trend.max_items, 10);
    assert_eq!(trend.query_timeout.as_secs(), 15);
    assert!(trend.validate().is_ok());
}

#[test]
fn classifier_config_inherits_env_thresholds() {
    let mut map = HashMap::new();
    map.insert("TRENDSCOPE_MIN_TEXT_LEN", "40");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    let classifier = cfg.classifier_config();
    assert_eq!(classifier.min_text_len, 40);
    assert_eq!(classifier.min_theme_recurrence, 2);
}
