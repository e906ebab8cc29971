//! Trend Report Assembler.

use chrono::{DateTime, Utc};
use trendscope_core::{RunStats, TrendCandidate, TrendConfig, TrendItem, TrendReport};
use uuid::Uuid;

/// Package ranked, deduplicated candidates into a [`TrendReport`].
///
/// Keeps at most `config.max_items` entries, records how many were cut in
/// `stats.truncated`, and numbers items from 1 in sequence order.
#[must_use]
pub fn assemble_report(
    candidates: Vec<TrendCandidate>,
    config: &TrendConfig,
    run_id: Uuid,
    generated_at: DateTime<Utc>,
    mut stats: RunStats,
) -> TrendReport {
    stats.truncated = candidates.len().saturating_sub(config.max_items);

    let items = candidates
        .into_iter()
        .take(config.max_items)
        .enumerate()
        .map(|(idx, c)| TrendItem {
            rank: idx + 1,
            engagement_score: c.engagement_score,
            cluster_size: c.cluster_size,
            audio_ref: c.audio_ref,
            age_hours: c.age_hours,
            post: c.post,
        })
        .collect();

    TrendReport {
        run_id,
        category: config.category.clone(),
        hashtags_used: config.hashtags.clone(),
        window_hours: config.max_age_hours,
        max_items: config.max_items,
        generated_at,
        stats,
        items,
    }
}
