use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

/// Media format of a post as reported by the scraper.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaType {
    Image,
    Video,
    Carousel,
}

impl std::fmt::Display for MediaType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MediaType::Image => write!(f, "image"),
            MediaType::Video => write!(f, "video"),
            MediaType::Carousel => write!(f, "carousel"),
        }
    }
}

/// Audit flags raised by the normalizer when a record was coerced rather
/// than rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecordFlag {
    /// A like or comment counter was negative and clamped to zero.
    NegativeCount,
    /// A like or comment counter could not be read as a number.
    NonNumericCount,
    /// The publish timestamp was later than collection time.
    FutureTimestamp,
    /// An audio reference arrived on a non-video post and was dropped.
    AudioOnNonVideo,
}

/// A single social-media post in canonical form.
///
/// Built only by the record normalizer; downstream stages never mutate a
/// `Post` they receive, they build new values from it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    /// Platform-unique identifier (the Instagram shortcode in practice).
    pub id: String,
    /// Canonical post URL, e.g. `"https://www.instagram.com/reel/C1a2b3/"`.
    pub url: String,
    /// Cleaned caption text. Empty when the scraper captured none.
    #[serde(default)]
    pub caption: String,
    /// Comment texts in the order the scraper captured them.
    #[serde(default)]
    pub comments: Vec<String>,
    pub media_type: MediaType,
    pub like_count: u64,
    pub comment_count: u64,
    #[serde(rename = "timestamp")]
    pub published_at: DateTime<Utc>,
    /// Reusable audio-track reference. Only ever set on video posts.
    #[serde(default)]
    pub audio_ref: Option<String>,
    /// Lowercase caption hashtags without the leading `#`, sorted and unique.
    #[serde(default)]
    pub hashtags: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub flags: Vec<RecordFlag>,
}

impl Post {
    /// Time elapsed between publishing and `now`.
    #[must_use]
    pub fn age_at(&self, now: DateTime<Utc>) -> Duration {
        now.signed_duration_since(self.published_at)
    }

    #[must_use]
    pub fn is_flagged(&self) -> bool {
        !self.flags.is_empty()
    }
}

/// Overall comment mood for a post.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sentiment {
    Positive,
    Mixed,
    Negative,
    /// Not enough text or evidence to decide.
    Unknown,
}

impl std::fmt::Display for Sentiment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Sentiment::Positive => write!(f, "positive"),
            Sentiment::Mixed => write!(f, "mixed"),
            Sentiment::Negative => write!(f, "negative"),
            Sentiment::Unknown => write!(f, "unknown"),
        }
    }
}

/// A [`Post`] with interpretive labels attached by the classifier.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassifiedPost {
    #[serde(flatten)]
    pub post: Post,
    pub sentiment: Sentiment,
    /// Scorer confidence in `[0.0, 1.0]`; `0.0` for unknown sentiment.
    pub confidence: f32,
    pub themes: Vec<String>,
    #[serde(default)]
    pub key_comments: Vec<String>,
    /// Filled by the tier-gating step outside the classifier.
    #[serde(default)]
    pub insight: Option<String>,
    /// Why classification failed, when it did.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub classification_error: Option<String>,
}

impl ClassifiedPost {
    /// Build the fallback result for a post that could not be classified.
    #[must_use]
    pub fn unclassified(post: Post, reason: impl Into<String>) -> Self {
        Self {
            post,
            sentiment: Sentiment::Unknown,
            confidence: 0.0,
            themes: Vec::new(),
            key_comments: Vec::new(),
            insight: None,
            classification_error: Some(reason.into()),
        }
    }
}
