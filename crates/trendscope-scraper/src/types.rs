//! Record shapes emitted by the external scraper.
//!
//! ## Observed dumps
//!
//! - Profile dumps: `{ "handle": "...", "scraped_at": "...", "posts": [...] }`
//!   where each post carries `url`, `timestamp`, `raw_text`, `type`.
//! - Trend dumps: `{ "category": "...", "reels": [...] }` where each reel
//!   carries `shortcode`, `likes`, `comments` (a count), `audio_name`, `caption`.
//! - Dataset endpoints usually return a bare array of records.
//!
//! Records stay loosely typed ([`RawRecord`]); the normalizer owns all
//! interpretation.

use serde::Deserialize;

use crate::error::ScraperError;

/// One scraped post as the collaborator produced it.
pub type RawRecord = serde_json::Value;

/// A batch of raw records in any of the shapes the scraper writes.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum RecordBatch {
    Bare(Vec<RawRecord>),
    Wrapped(WrappedBatch),
}

#[derive(Debug, Deserialize)]
pub struct WrappedBatch {
    #[serde(alias = "reels", alias = "items")]
    pub posts: Vec<RawRecord>,
    /// Profile handle, present on profile dumps.
    #[serde(default)]
    pub handle: Option<String>,
}

impl RecordBatch {
    /// Parse a JSON body in any supported batch shape.
    ///
    /// # Errors
    ///
    /// Returns [`ScraperError::Deserialize`] if the body matches no shape.
    pub fn parse(body: &str, context: &str) -> Result<Self, ScraperError> {
        serde_json::from_str(body).map_err(|e| ScraperError::Deserialize {
            context: context.to_owned(),
            source: e,
        })
    }

    #[must_use]
    pub fn handle(&self) -> Option<&str> {
        match self {
            RecordBatch::Bare(_) => None,
            RecordBatch::Wrapped(w) => w.handle.as_deref(),
        }
    }

    #[must_use]
    pub fn into_records(self) -> Vec<RawRecord> {
        match self {
            RecordBatch::Bare(records) => records,
            RecordBatch::Wrapped(w) => w.posts,
        }
    }
}
