//! Engagement Ranker.

use std::cmp::Ordering;

use trendscope_core::{EngagementWeights, TrendCandidate};

/// Report order: higher engagement first, then more recent, then id ascending.
/// Total over candidates with distinct ids, so sorting is reproducible.
#[must_use]
pub fn rank_order(a: &TrendCandidate, b: &TrendCandidate) -> Ordering {
    b.engagement_score
        .cmp(&a.engagement_score)
        .then_with(|| b.post.published_at.cmp(&a.post.published_at))
        .then_with(|| a.post.id.cmp(&b.post.id))
}

/// Score every candidate with `weights` and sort by [`rank_order`].
#[must_use]
pub fn rank_candidates(
    candidates: Vec<TrendCandidate>,
    weights: EngagementWeights,
) -> Vec<TrendCandidate> {
    let mut ranked: Vec<TrendCandidate> = candidates
        .into_iter()
        .map(|mut c| {
            c.engagement_score = weights.score(c.post.comment_count, c.post.like_count);
            c
        })
        .collect();
    ranked.sort_by(rank_order);
    ranked
}
