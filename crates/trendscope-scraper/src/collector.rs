//! Candidate Collector: fan hashtag queries out to a [`PostSource`], then
//! normalize and merge the results deterministically.

use std::collections::HashSet;

use chrono::{DateTime, Utc};
use futures::stream::{self, StreamExt};
use trendscope_core::{Post, RunStats, TrendConfig};

use crate::error::ScraperError;
use crate::normalize::normalize_record;
use crate::source::PostSource;
use crate::types::RawRecord;

/// Normalized, id-unique posts for one category, plus the counters gathered
/// while collecting them.
#[derive(Debug, Clone, Default)]
pub struct CollectionOutcome {
    pub category: String,
    /// Sorted by id, at most `max_candidates` long.
    pub posts: Vec<Post>,
    pub stats: RunStats,
}

enum QueryResult {
    Records(Vec<RawRecord>),
    TimedOut,
    Failed(ScraperError),
}

/// Query every hashtag in `config`, normalize what comes back, and merge.
///
/// Queries run concurrently (at most `max_concurrent_queries` in flight),
/// each bounded by `query_timeout`. A query that times out or fails
/// contributes nothing and is recorded in the returned stats. Results are
/// merged in hashtag order, so when two hashtags return the same post id the
/// record from the earlier hashtag wins regardless of completion order.
/// Above `max_candidates`, the most recently published posts are kept (ties
/// by id) and the rest are counted in `capped_candidates`.
///
/// `config` is expected to be validated already.
pub async fn collect_candidates<S: PostSource>(
    source: &S,
    config: &TrendConfig,
    collected_at: DateTime<Utc>,
) -> CollectionOutcome {
    let limit = config.results_per_hashtag;
    let timeout = config.query_timeout;

    let mut results: Vec<(usize, &str, QueryResult)> =
        stream::iter(config.hashtags.iter().enumerate())
            .map(|(idx, hashtag)| async move {
                let result =
                    match tokio::time::timeout(timeout, source.fetch_hashtag(hashtag, limit)).await
                    {
                        Ok(Ok(records)) => QueryResult::Records(records),
                        Ok(Err(e)) => QueryResult::Failed(e),
                        Err(_) => QueryResult::TimedOut,
                    };
                (idx, hashtag.as_str(), result)
            })
            .buffer_unordered(config.max_concurrent_queries.max(1))
            .collect()
            .await;
    results.sort_by_key(|(idx, _, _)| *idx);

    let mut stats = RunStats {
        queries_issued: results.len(),
        ..RunStats::default()
    };
    let mut seen: HashSet<String> = HashSet::new();
    let mut posts: Vec<Post> = Vec::new();

    for (_, hashtag, result) in results {
        let records = match result {
            QueryResult::Records(records) => records,
            QueryResult::TimedOut => {
                let err = ScraperError::CollectorTimeout {
                    hashtag: hashtag.to_string(),
                    timeout_secs: timeout.as_secs(),
                };
                tracing::warn!(hashtag, error = %err, "hashtag query timed out");
                stats.queries_timed_out.push(hashtag.to_string());
                continue;
            }
            QueryResult::Failed(err) => {
                tracing::warn!(hashtag, error = %err, "hashtag query failed");
                stats.queries_failed.push(hashtag.to_string());
                continue;
            }
        };

        tracing::debug!(hashtag, count = records.len(), "hashtag query returned");
        stats.records_seen += records.len();

        for raw in &records {
            let post = match normalize_record(raw, collected_at).map_err(ScraperError::from) {
                Ok(post) => post,
                Err(err) => {
                    tracing::warn!(hashtag, error = %err, "dropping malformed record");
                    stats.malformed_records += 1;
                    continue;
                }
            };
            if !seen.insert(post.id.clone()) {
                stats.duplicate_ids += 1;
                continue;
            }
            if post.is_flagged() {
                stats.flagged_records += 1;
            }
            posts.push(post);
        }
    }

    if posts.len() > config.max_candidates {
        posts.sort_by(|a, b| {
            b.published_at
                .cmp(&a.published_at)
                .then_with(|| a.id.cmp(&b.id))
        });
        stats.capped_candidates = posts.len() - config.max_candidates;
        tracing::debug!(
            kept = config.max_candidates,
            dropped = stats.capped_candidates,
            "candidate cap reached, keeping the newest"
        );
        posts.truncate(config.max_candidates);
    }
    posts.sort_by(|a, b| a.id.cmp(&b.id));

    tracing::info!(
        category = %config.category,
        queries = stats.queries_issued,
        candidates = posts.len(),
        malformed = stats.malformed_records,
        timed_out = stats.queries_timed_out.len(),
        "candidate collection finished"
    );

    CollectionOutcome {
        category: config.category.clone(),
        posts,
        stats,
    }
}

#[cfg(test)]
#[path = "collector_test.rs"]
mod tests;
