//! Per-category trend pipeline orchestration.
//!
//! Collector → Recency Filter → Engagement Ranker → Deduplicator → Report
//! Assembler. Every stage consumes its input and returns a new value, so
//! [`build_report`] can be re-run against a cached collection.

use chrono::{DateTime, Utc};
use trendscope_core::{TrendConfig, TrendReport};
use trendscope_scraper::{collect_candidates, CollectionOutcome, PostSource};
use uuid::Uuid;

use crate::dedup::deduplicate;
use crate::error::TrendError;
use crate::rank::rank_candidates;
use crate::recency::filter_recent;
use crate::report::assemble_report;

/// Run the full trend pipeline for one category.
///
/// `now` is both the collection time handed to the normalizer and the
/// reference time for post ages.
///
/// # Errors
///
/// Returns [`TrendError::ConfigurationInvalid`] before any query is issued if
/// `config` fails validation. Query failures, timeouts, and malformed
/// records are not errors; they are counted in the report's stats.
pub async fn run_trends<S: PostSource>(
    source: &S,
    config: &TrendConfig,
    now: DateTime<Utc>,
) -> Result<TrendReport, TrendError> {
    config.validate()?;

    tracing::info!(
        category = %config.category,
        hashtags = config.hashtags.len(),
        max_age_hours = config.max_age_hours,
        "starting trend run"
    );
    let collection = collect_candidates(source, config, now).await;
    Ok(build_report(collection, config, now))
}

/// Filter, rank, deduplicate, and package an already-collected candidate set.
#[must_use]
pub fn build_report(
    collection: CollectionOutcome,
    config: &TrendConfig,
    now: DateTime<Utc>,
) -> TrendReport {
    let CollectionOutcome {
        category,
        posts,
        mut stats,
    } = collection;

    let recent = filter_recent(posts, &category, config.max_age_hours, now);
    stats.stale_candidates = recent.stale;

    let ranked = rank_candidates(recent.candidates, config.weights);

    let deduped = deduplicate(ranked, config.duplicate_window_hours);
    stats.duplicates_collapsed = deduped.collapsed;

    let report = assemble_report(deduped.candidates, config, Uuid::new_v4(), now, stats);

    if report.is_empty() {
        tracing::warn!(category = %report.category, "no trend candidates survived filtering");
    }
    tracing::info!(
        category = %report.category,
        run_id = %report.run_id,
        items = report.items.len(),
        stale = report.stats.stale_candidates,
        collapsed = report.stats.duplicates_collapsed,
        truncated = report.stats.truncated,
        "trend report assembled"
    );
    report
}
