//! Recency Filter: drop posts older than the trend window.

use chrono::{DateTime, TimeDelta, Utc};
use trendscope_core::{Post, TrendCandidate};

const MILLIS_PER_HOUR: f64 = 3_600_000.0;

/// Survivors of the recency filter and how many were dropped.
#[derive(Debug, Clone, Default)]
pub struct RecencyOutcome {
    pub candidates: Vec<TrendCandidate>,
    pub stale: usize,
}

/// Age in fractional hours between publishing and `now`.
#[must_use]
pub fn age_hours(post: &Post, now: DateTime<Utc>) -> f64 {
    #[allow(clippy::cast_precision_loss)]
    let millis = post.age_at(now).num_milliseconds() as f64;
    millis / MILLIS_PER_HOUR
}

/// Keep posts whose age is at most `max_age_hours`. The boundary is
/// inclusive: a post exactly `max_age_hours` old survives.
///
/// Windows too large for a [`TimeDelta`] keep every post.
///
/// Each survivor becomes a [`TrendCandidate`] tagged with `category` and its
/// age as of `now`.
#[must_use]
pub fn filter_recent(
    posts: Vec<Post>,
    category: &str,
    max_age_hours: i64,
    now: DateTime<Utc>,
) -> RecencyOutcome {
    let window = TimeDelta::try_hours(max_age_hours).unwrap_or(TimeDelta::MAX);
    let mut outcome = RecencyOutcome::default();

    for post in posts {
        if post.age_at(now) <= window {
            let age = age_hours(&post, now);
            outcome
                .candidates
                .push(TrendCandidate::new(post, category, age));
        } else {
            outcome.stale += 1;
        }
    }

    tracing::debug!(
        kept = outcome.candidates.len(),
        stale = outcome.stale,
        max_age_hours,
        "recency filter applied"
    );
    outcome
}
