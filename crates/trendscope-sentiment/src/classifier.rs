//! Per-post sentiment and theme classification.

use futures::stream::{self, StreamExt};
use serde::Serialize;
use trendscope_core::{ClassifiedPost, ClassifierConfig, Post, Sentiment};

use crate::error::SentimentError;
use crate::scorer::{SentimentScore, SentimentScorer};
use crate::text::scoring_text;
use crate::themes::extract_themes;

/// Classifier over any [`SentimentScorer`].
pub struct Classifier<S> {
    scorer: S,
    config: ClassifierConfig,
}

impl<S: SentimentScorer> Classifier<S> {
    /// # Errors
    ///
    /// Returns [`SentimentError::Config`] if `config` fails validation.
    pub fn new(scorer: S, config: ClassifierConfig) -> Result<Self, SentimentError> {
        config.validate()?;
        Ok(Self { scorer, config })
    }

    #[must_use]
    pub fn config(&self) -> &ClassifierConfig {
        &self.config
    }

    /// Classify one post. Never fails: a scorer error yields an unknown
    /// result with the reason attached.
    pub async fn classify_post(&self, post: Post) -> ClassifiedPost {
        let text = scoring_text(&post);

        let score = if text.chars().count() < self.config.min_text_len {
            SentimentScore::unknown()
        } else {
            match self.scorer.classify(&text).await {
                Ok(score) => score,
                Err(e) => {
                    tracing::warn!(post_id = %post.id, error = %e, "classification failed");
                    return ClassifiedPost::unclassified(post, e.to_string());
                }
            }
        };

        let summary = extract_themes(&post.comments, &self.config);

        ClassifiedPost {
            post,
            sentiment: score.sentiment,
            confidence: score.confidence,
            themes: summary.themes,
            key_comments: summary.key_comments,
            insight: None,
            classification_error: None,
        }
    }

    /// Classify every post with at most `concurrency` in flight. Output order
    /// matches input order.
    pub async fn classify_all(&self, posts: Vec<Post>) -> Vec<ClassifiedPost> {
        let total = posts.len();
        let classified: Vec<ClassifiedPost> = stream::iter(posts)
            .map(|post| self.classify_post(post))
            .buffered(self.config.concurrency.max(1))
            .collect()
            .await;

        let stats = ClassificationStats::from_posts(&classified);
        tracing::info!(
            total,
            positive = stats.positive,
            mixed = stats.mixed,
            negative = stats.negative,
            unknown = stats.unknown,
            failed = stats.failed,
            "classification finished"
        );
        classified
    }
}

/// Label counts over a classified batch.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassificationStats {
    pub total: usize,
    pub positive: usize,
    pub mixed: usize,
    pub negative: usize,
    pub unknown: usize,
    /// Posts whose scorer call failed (also counted as unknown).
    pub failed: usize,
}

impl ClassificationStats {
    #[must_use]
    pub fn from_posts(posts: &[ClassifiedPost]) -> Self {
        let mut stats = Self {
            total: posts.len(),
            ..Self::default()
        };
        for post in posts {
            match post.sentiment {
                Sentiment::Positive => stats.positive += 1,
                Sentiment::Mixed => stats.mixed += 1,
                Sentiment::Negative => stats.negative += 1,
                Sentiment::Unknown => stats.unknown += 1,
            }
            if post.classification_error.is_some() {
                stats.failed += 1;
            }
        }
        stats
    }
}

#[cfg(test)]
#[path = "classifier_test.rs"]
mod tests;
