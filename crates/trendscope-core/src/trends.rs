use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::posts::Post;

/// A post under consideration for one trend run.
///
/// Only exists between the collector and the report assembler; it is never
/// persisted on its own.
#[derive(Debug, Clone, PartialEq)]
pub struct TrendCandidate {
    pub post: Post,
    pub category: String,
    /// Hours between publishing and the run's reference time.
    pub age_hours: f64,
    /// Set by the engagement ranker; `0` until then.
    pub engagement_score: u64,
    /// Number of posts this candidate stands for, itself included.
    pub cluster_size: usize,
    /// Reusable audio for this trend. Starts as the post's own audio and may
    /// be linked from an absorbed duplicate; the post itself is left as is.
    pub audio_ref: Option<String>,
}

impl TrendCandidate {
    #[must_use]
    pub fn new(post: Post, category: impl Into<String>, age_hours: f64) -> Self {
        Self {
            audio_ref: post.audio_ref.clone(),
            post,
            category: category.into(),
            age_hours,
            engagement_score: 0,
            cluster_size: 1,
        }
    }
}

/// One ranked entry of a [`TrendReport`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrendItem {
    /// 1-based position in the report.
    pub rank: usize,
    pub post: Post,
    pub engagement_score: u64,
    pub cluster_size: usize,
    pub audio_ref: Option<String>,
    pub age_hours: f64,
}

/// Run-level counters returned alongside the report.
///
/// Per-record and per-query failures are tallied here instead of aborting
/// the run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RunStats {
    pub queries_issued: usize,
    /// Hashtags whose query exceeded the timeout.
    pub queries_timed_out: Vec<String>,
    /// Hashtags whose query failed for any other reason.
    pub queries_failed: Vec<String>,
    pub records_seen: usize,
    pub malformed_records: usize,
    pub flagged_records: usize,
    /// Records dropped because another hashtag already returned the same id.
    pub duplicate_ids: usize,
    /// Oldest candidates cut by the collection cap before recency filtering.
    pub capped_candidates: usize,
    pub stale_candidates: usize,
    pub duplicates_collapsed: usize,
    /// Items cut by the report size bound.
    pub truncated: usize,
}

/// The per-category trend artifact consumed by the strategy engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrendReport {
    pub run_id: Uuid,
    pub category: String,
    pub hashtags_used: Vec<String>,
    pub window_hours: i64,
    pub max_items: usize,
    pub generated_at: DateTime<Utc>,
    pub stats: RunStats,
    pub items: Vec<TrendItem>,
}

impl TrendReport {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
