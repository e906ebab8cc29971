//! Sentiment scoring strategies.
//!
//! [`SentimentScorer`] is the seam: the classifier is generic over it, so a
//! lexicon scorer and a model-backed scorer are interchangeable.

use std::future::Future;

use trendscope_core::Sentiment;

use crate::error::SentimentError;

/// A sentiment label plus the scorer's confidence in `[0.0, 1.0]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SentimentScore {
    pub sentiment: Sentiment,
    pub confidence: f32,
}

impl SentimentScore {
    #[must_use]
    pub fn unknown() -> Self {
        Self {
            sentiment: Sentiment::Unknown,
            confidence: 0.0,
        }
    }
}

pub trait SentimentScorer: Send + Sync {
    /// Score already-prepared text. Must be deterministic for identical input.
    fn classify(
        &self,
        text: &str,
    ) -> impl Future<Output = Result<SentimentScore, SentimentError>> + Send;
}

/// Net polarity at or beyond which a post is positive (or negative).
const POLARITY_THRESHOLD: f32 = 0.35;

/// Confidence floor for mixed results that did have evidence.
const MIXED_CONFIDENCE_FLOOR: f32 = 0.1;

/// Comment-register word weights.
///
/// Keys are lowercase single words with apostrophes removed. Positive
/// values count as positive evidence, negative values as negative evidence.
pub(crate) const LEXICON: &[(&str, f32)] = &[
    // Positive signals
    ("love", 0.5),
    ("loved", 0.5),
    ("loving", 0.4),
    ("obsessed", 0.5),
    ("amazing", 0.5),
    ("awesome", 0.5),
    ("best", 0.5),
    ("great", 0.4),
    ("good", 0.3),
    ("delicious", 0.5),
    ("yummy", 0.4),
    ("tasty", 0.4),
    ("fresh", 0.3),
    ("perfect", 0.5),
    ("beautiful", 0.4),
    ("gorgeous", 0.4),
    ("incredible", 0.5),
    ("fantastic", 0.5),
    ("excellent", 0.5),
    ("friendly", 0.3),
    ("recommend", 0.4),
    ("recommended", 0.4),
    ("favorite", 0.4),
    ("favourite", 0.4),
    ("fire", 0.3),
    ("goals", 0.3),
    ("wow", 0.3),
    ("thanks", 0.2),
    ("thank", 0.2),
    ("nice", 0.3),
    ("cute", 0.3),
    ("clean", 0.2),
    ("worth", 0.3),
    // Negative signals
    ("bad", -0.4),
    ("terrible", -0.6),
    ("awful", -0.6),
    ("horrible", -0.6),
    ("worst", -0.6),
    ("disgusting", -0.7),
    ("gross", -0.5),
    ("rude", -0.5),
    ("cold", -0.3),
    ("overpriced", -0.5),
    ("expensive", -0.3),
    ("slow", -0.3),
    ("dirty", -0.5),
    ("disappointed", -0.5),
    ("disappointing", -0.5),
    ("bland", -0.4),
    ("stale", -0.4),
    ("never", -0.2),
    ("waited", -0.3),
    ("wrong", -0.4),
    ("poisoning", -0.7),
    ("sick", -0.4),
    ("refund", -0.4),
    ("scam", -0.7),
    ("fake", -0.5),
    ("unprofessional", -0.6),
    ("avoid", -0.5),
    ("hate", -0.5),
    ("meh", -0.2),
];

/// Emoji weights, matched per character occurrence.
pub(crate) const EMOJI_LEXICON: &[(char, f32)] = &[
    ('😍', 0.5),
    ('🥰', 0.5),
    ('❤', 0.4),
    ('💕', 0.4),
    ('🔥', 0.4),
    ('😋', 0.4),
    ('🤤', 0.4),
    ('👏', 0.3),
    ('👌', 0.3),
    ('👍', 0.3),
    ('🙌', 0.3),
    ('💯', 0.3),
    ('😊', 0.3),
    ('😂', 0.1),
    ('😡', -0.5),
    ('🤮', -0.6),
    ('🤢', -0.5),
    ('👎', -0.4),
    ('😞', -0.4),
    ('😢', -0.3),
    ('💩', -0.5),
    ('😒', -0.3),
];

/// Words that flip the polarity of the next scored word ("not good").
const NEGATORS: &[&str] = &["not", "no", "isnt", "wasnt", "dont", "didnt", "aint"];

/// Sum positive and negative lexicon evidence separately.
///
/// Returns `(positive, negative)`, both non-negative.
#[must_use]
pub fn lexicon_evidence(text: &str) -> (f32, f32) {
    let mut positive = 0.0_f32;
    let mut negative = 0.0_f32;
    let mut add = |weight: f32| {
        if weight > 0.0 {
            positive += weight;
        } else {
            negative -= weight;
        }
    };

    let mut negate_next = false;
    for raw in text.split_whitespace() {
        for ch in raw.chars() {
            if let Some(&(_, weight)) = EMOJI_LEXICON.iter().find(|(e, _)| *e == ch) {
                add(weight);
            }
        }

        let word: String = raw
            .chars()
            .filter(|c| *c != '\'' && *c != '’')
            .collect::<String>()
            .trim_matches(|c: char| !c.is_alphabetic())
            .to_lowercase();
        if word.is_empty() {
            continue;
        }
        if NEGATORS.contains(&word.as_str()) {
            negate_next = true;
            continue;
        }
        if let Some(&(_, weight)) = LEXICON.iter().find(|(w, _)| *w == word) {
            add(if negate_next { -weight } else { weight });
        }
        negate_next = false;
    }

    (positive, negative)
}

/// Classify text from lexicon evidence alone.
///
/// No evidence at all is reported as [`Sentiment::Unknown`] rather than
/// guessed. Otherwise the net polarity `(pos - neg) / (pos + neg)` decides
/// between positive, negative, and mixed.
#[must_use]
pub fn lexicon_sentiment(text: &str) -> SentimentScore {
    let (positive, negative) = lexicon_evidence(text);
    let total = positive + negative;
    if total <= f32::EPSILON {
        return SentimentScore::unknown();
    }

    let net = (positive - negative) / total;
    let strength = total.min(1.0);
    let sentiment = if net >= POLARITY_THRESHOLD {
        Sentiment::Positive
    } else if net <= -POLARITY_THRESHOLD {
        Sentiment::Negative
    } else {
        Sentiment::Mixed
    };
    let mut confidence = strength * net.abs();
    if sentiment == Sentiment::Mixed {
        confidence = confidence.max(MIXED_CONFIDENCE_FLOOR);
    }

    SentimentScore {
        sentiment,
        confidence: confidence.clamp(0.0, 1.0),
    }
}

/// Scorer backed by the built-in comment lexicon. Never fails.
#[derive(Debug, Clone, Copy, Default)]
pub struct LexiconScorer;

impl SentimentScorer for LexiconScorer {
    async fn classify(&self, text: &str) -> Result<SentimentScore, SentimentError> {
        Ok(lexicon_sentiment(text))
    }
}
