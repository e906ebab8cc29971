//! Pipeline settings and their validation.
//!
//! Defaults are domain heuristics carried over from the upstream scraper
//! (comments outweigh likes, 72 h trend window, 24 h duplicate window).
//! They are starting points, not tuned values.

use std::time::Duration;

use chrono::TimeDelta;

use crate::categories::normalize_hashtags;
use crate::ConfigError;

pub const DEFAULT_MAX_AGE_HOURS: i64 = 72;
pub const DEFAULT_DUPLICATE_WINDOW_HOURS: i64 = 24;
pub const DEFAULT_MAX_ITEMS: usize = 40;
pub const DEFAULT_MAX_CANDIDATES: usize = 200;
pub const DEFAULT_COMMENT_WEIGHT: u32 = 2;
pub const DEFAULT_LIKE_WEIGHT: u32 = 1;

/// Weight pair used by the engagement ranker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EngagementWeights {
    pub comment: u32,
    pub like: u32,
}

impl Default for EngagementWeights {
    fn default() -> Self {
        Self {
            comment: DEFAULT_COMMENT_WEIGHT,
            like: DEFAULT_LIKE_WEIGHT,
        }
    }
}

impl EngagementWeights {
    /// `comment * comment_count + like * like_count`, saturating at `u64::MAX`.
    #[must_use]
    pub fn score(&self, comment_count: u64, like_count: u64) -> u64 {
        u64::from(self.comment)
            .saturating_mul(comment_count)
            .saturating_add(u64::from(self.like).saturating_mul(like_count))
    }
}

/// Settings for one per-category trend run.
#[derive(Debug, Clone)]
pub struct TrendConfig {
    pub category: String,
    /// Normalized hashtags (no `#`, lowercase, unique, in query order).
    pub hashtags: Vec<String>,
    pub max_candidates: usize,
    pub max_age_hours: i64,
    pub weights: EngagementWeights,
    pub duplicate_window_hours: i64,
    /// Truncation bound for the final report ("max reels").
    pub max_items: usize,
    /// Upper bound on each hashtag query to the scraper collaborator.
    pub query_timeout: Duration,
    pub max_concurrent_queries: usize,
    pub results_per_hashtag: u32,
}

impl TrendConfig {
    /// Build a config with default bounds for `category` and `hashtags`.
    ///
    /// Hashtags are normalized here; validation happens in [`Self::validate`].
    #[must_use]
    pub fn new<I, S>(category: impl Into<String>, hashtags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            category: category.into(),
            hashtags: normalize_hashtags(hashtags),
            max_candidates: DEFAULT_MAX_CANDIDATES,
            max_age_hours: DEFAULT_MAX_AGE_HOURS,
            weights: EngagementWeights::default(),
            duplicate_window_hours: DEFAULT_DUPLICATE_WINDOW_HOURS,
            max_items: DEFAULT_MAX_ITEMS,
            query_timeout: Duration::from_secs(90),
            max_concurrent_queries: 4,
            results_per_hashtag: 50,
        }
    }

    /// Check every bound. Callers run this before issuing any scraper query.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] naming the first offending field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let invalid = |field: &'static str, reason: &str| {
            Err(ConfigError::Invalid {
                field,
                reason: reason.to_string(),
            })
        };

        if self.category.trim().is_empty() {
            return invalid("category", "must be non-empty");
        }
        if self.hashtags.is_empty() {
            return invalid("hashtags", "at least one hashtag is required");
        }
        if self.weights.comment == 0 {
            return invalid("comment_weight", "must be positive");
        }
        if self.weights.like == 0 {
            return invalid("like_weight", "must be positive");
        }
        if self.max_age_hours < 0 {
            return invalid("max_age_hours", "must not be negative");
        }
        if TimeDelta::try_hours(self.max_age_hours).is_none() {
            return invalid("max_age_hours", "is too large to represent as a duration");
        }
        if self.duplicate_window_hours < 0 {
            return invalid("duplicate_window_hours", "must not be negative");
        }
        if TimeDelta::try_hours(self.duplicate_window_hours).is_none() {
            return invalid(
                "duplicate_window_hours",
                "is too large to represent as a duration",
            );
        }
        if self.max_items == 0 {
            return invalid("max_items", "must be positive");
        }
        if self.max_candidates == 0 {
            return invalid("max_candidates", "must be positive");
        }
        if self.max_concurrent_queries == 0 {
            return invalid("max_concurrent_queries", "must be positive");
        }
        if self.results_per_hashtag == 0 {
            return invalid("results_per_hashtag", "must be positive");
        }
        if self.query_timeout.is_zero() {
            return invalid("query_timeout", "must be positive");
        }
        Ok(())
    }
}

/// Settings for the sentiment and theme classifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassifierConfig {
    /// Below this many characters of caption + comment text the sentiment
    /// is reported as unknown.
    pub min_text_len: usize,
    /// Number of distinct comments a phrase must appear in to become a theme.
    pub min_theme_recurrence: usize,
    pub max_themes: usize,
    pub max_key_comments: usize,
    /// How many posts are scored at once.
    pub concurrency: usize,
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            min_text_len: 20,
            min_theme_recurrence: 2,
            max_themes: 5,
            max_key_comments: 4,
            concurrency: 4,
        }
    }
}

impl ClassifierConfig {
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] when a threshold would let the
    /// classifier guess on empty text or emit single-mention themes.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.min_text_len == 0 {
            return Err(ConfigError::Invalid {
                field: "min_text_len",
                reason: "must be positive".to_string(),
            });
        }
        if self.min_theme_recurrence < 2 {
            return Err(ConfigError::Invalid {
                field: "min_theme_recurrence",
                reason: format!("must be at least 2, got {}", self.min_theme_recurrence),
            });
        }
        if self.concurrency == 0 {
            return Err(ConfigError::Invalid {
                field: "concurrency",
                reason: "must be positive".to_string(),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid() -> TrendConfig {
        TrendConfig::new("restaurant", ["foodie", "#StreetFood"])
    }

    fn invalid_field(result: Result<(), ConfigError>) -> &'static str {
        match result {
            Err(ConfigError::Invalid { field, .. }) => field,
            other => panic!("expected ConfigError::Invalid, got {other:?}"),
        }
    }

    #[test]
    fn defaults_match_documented_heuristics() {
        let cfg = valid();
        assert_eq!(cfg.max_age_hours, 72);
        assert_eq!(cfg.duplicate_window_hours, 24);
        assert_eq!(cfg.weights, EngagementWeights { comment: 2, like: 1 });
        assert_eq!(cfg.max_items, 40);
        assert_eq!(cfg.hashtags, vec!["foodie", "streetfood"]);
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn score_weights_comments_over_likes() {
        let weights = EngagementWeights::default();
        assert_eq!(weights.score(10, 100), 120);
        assert_eq!(weights.score(100, 10), 210);
    }

    #[test]
    fn score_saturates() {
        let weights = EngagementWeights::default();
        assert_eq!(weights.score(u64::MAX, 1), u64::MAX);
    }

    #[test]
    fn rejects_empty_hashtags() {
        let cfg = TrendConfig::new("restaurant", Vec::<String>::new());
        assert_eq!(invalid_field(cfg.validate()), "hashtags");
    }

    #[test]
    fn rejects_blank_only_hashtags() {
        let cfg = TrendConfig::new("restaurant", ["#", "  "]);
        assert_eq!(invalid_field(cfg.validate()), "hashtags");
    }

    #[test]
    fn rejects_zero_weights() {
        let mut cfg = valid();
        cfg.weights.comment = 0;
        assert_eq!(invalid_field(cfg.validate()), "comment_weight");

        let mut cfg = valid();
        cfg.weights.like = 0;
        assert_eq!(invalid_field(cfg.validate()), "like_weight");
    }

    #[test]
    fn rejects_negative_windows() {
        let mut cfg = valid();
        cfg.max_age_hours = -1;
        assert_eq!(invalid_field(cfg.validate()), "max_age_hours");

        let mut cfg = valid();
        cfg.duplicate_window_hours = -1;
        assert_eq!(invalid_field(cfg.validate()), "duplicate_window_hours");
    }

    #[test]
    fn rejects_windows_beyond_duration_range() {
        let mut cfg = valid();
        cfg.max_age_hours = 10_000_000_000_000;
        assert_eq!(invalid_field(cfg.validate()), "max_age_hours");

        let mut cfg = valid();
        cfg.duplicate_window_hours = i64::MAX;
        assert_eq!(invalid_field(cfg.validate()), "duplicate_window_hours");
    }

    #[test]
    fn large_but_representable_window_is_allowed() {
        let mut cfg = valid();
        cfg.max_age_hours = 24 * 365 * 100;
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn zero_age_window_is_allowed() {
        let mut cfg = valid();
        cfg.max_age_hours = 0;
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn rejects_zero_max_items() {
        let mut cfg = valid();
        cfg.max_items = 0;
        assert_eq!(invalid_field(cfg.validate()), "max_items");
    }

    #[test]
    fn classifier_rejects_single_mention_themes() {
        let cfg = ClassifierConfig {
            min_theme_recurrence: 1,
            ..ClassifierConfig::default()
        };
        assert_eq!(invalid_field(cfg.validate()), "min_theme_recurrence");
    }

    #[test]
    fn classifier_defaults_are_valid() {
        let cfg = ClassifierConfig::default();
        assert_eq!(cfg.min_text_len, 20);
        assert_eq!(cfg.min_theme_recurrence, 2);
        assert!(cfg.validate().is_ok());
    }
}
