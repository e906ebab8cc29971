//! Sentiment and theme classification for scraped posts.
//!
//! Scores caption + comment text with a pluggable [`SentimentScorer`]
//! (built-in lexicon or a TEI-hosted model) and extracts comment themes that
//! recur across distinct comments.

pub mod classifier;
pub mod error;
pub mod model;
pub mod scorer;
pub mod text;
pub mod themes;

pub use classifier::{ClassificationStats, Classifier};
pub use error::SentimentError;
pub use model::ModelScorer;
pub use scorer::{lexicon_sentiment, LexiconScorer, SentimentScore, SentimentScorer};
pub use themes::{extract_themes, ThemeSummary};
