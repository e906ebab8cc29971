//! Model-backed scorer calling a TEI (Text Embeddings Inference) `/predict`
//! endpoint that serves a sequence-classification model.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use trendscope_core::Sentiment;

use crate::error::SentimentError;
use crate::scorer::{SentimentScore, SentimentScorer};

#[derive(Serialize)]
struct PredictRequest<'a> {
    inputs: &'a str,
    truncate: bool,
}

#[derive(Debug, Deserialize)]
struct LabelScore {
    label: String,
    score: f32,
}

/// TEI answers a single input with a flat list, a batch with nested lists.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum PredictResponse {
    Flat(Vec<LabelScore>),
    Nested(Vec<Vec<LabelScore>>),
}

impl PredictResponse {
    fn into_scores(self) -> Vec<LabelScore> {
        match self {
            PredictResponse::Flat(scores) => scores,
            PredictResponse::Nested(batches) => batches.into_iter().next().unwrap_or_default(),
        }
    }
}

/// Map a classifier label to a sentiment. Covers plain labels and the
/// `LABEL_n` ids of three-class models (0 negative, 1 neutral, 2 positive).
fn label_sentiment(label: &str) -> Option<Sentiment> {
    match label.trim().to_lowercase().as_str() {
        "positive" | "pos" | "label_2" => Some(Sentiment::Positive),
        "negative" | "neg" | "label_0" => Some(Sentiment::Negative),
        "neutral" | "mixed" | "label_1" => Some(Sentiment::Mixed),
        _ => None,
    }
}

/// Sentiment scorer backed by a hosted classification model.
pub struct ModelScorer {
    client: reqwest::Client,
    url: String,
}

impl ModelScorer {
    /// # Errors
    ///
    /// Returns [`SentimentError::Http`] if the `reqwest::Client` cannot be built.
    pub fn new(base_url: &str, timeout_secs: u64) -> Result<Self, SentimentError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .build()?;
        Ok(Self {
            client,
            url: format!("{}/predict", base_url.trim_end_matches('/')),
        })
    }
}

impl SentimentScorer for ModelScorer {
    async fn classify(&self, text: &str) -> Result<SentimentScore, SentimentError> {
        let response = self
            .client
            .post(&self.url)
            .json(&PredictRequest {
                inputs: text,
                truncate: true,
            })
            .send()
            .await
            .map_err(|e| SentimentError::Tei(format!("TEI request failed: {e}")))?;

        if !response.status().is_success() {
            return Err(SentimentError::Tei(format!(
                "TEI returned status {}",
                response.status()
            )));
        }

        let predictions: PredictResponse = response
            .json()
            .await
            .map_err(|e| SentimentError::Tei(format!("TEI response parse error: {e}")))?;

        let top = predictions
            .into_scores()
            .into_iter()
            .max_by(|a, b| a.score.total_cmp(&b.score))
            .ok_or_else(|| SentimentError::Tei("TEI returned no predictions".to_string()))?;

        let sentiment =
            label_sentiment(&top.label).ok_or_else(|| SentimentError::UnknownLabel(top.label))?;

        Ok(SentimentScore {
            sentiment,
            confidence: top.score.clamp(0.0, 1.0),
        })
    }
}
