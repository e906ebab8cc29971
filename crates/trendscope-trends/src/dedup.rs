//! Deduplicator / Media Linker.
//!
//! Two candidates are duplicates when they share a normalized caption or a
//! specific audio track, and were published within the proximity window of
//! each other. Each cluster keeps its highest-ranked member.

use chrono::Duration;
use trendscope_core::TrendCandidate;

use crate::rank::rank_order;

/// Audio labels the platform assigns to any unnamed track. Sharing one says
/// nothing about two posts being the same content.
const GENERIC_AUDIO: &[&str] = &["original audio", "original sound", "audio original"];

#[derive(Debug, Clone, Default)]
pub struct DedupOutcome {
    /// Representatives in rank order.
    pub candidates: Vec<TrendCandidate>,
    /// Candidates absorbed into a representative.
    pub collapsed: usize,
}

/// Lowercase, whitespace-collapsed caption used for duplicate matching.
#[must_use]
pub fn normalize_caption(caption: &str) -> String {
    caption
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

fn normalize_audio(audio: &str) -> String {
    normalize_caption(audio)
}

/// `true` for platform placeholder audio such as "Original audio".
#[must_use]
pub fn is_generic_audio(audio: &str) -> bool {
    let audio = normalize_audio(audio);
    GENERIC_AUDIO.iter().any(|g| audio.starts_with(g))
}

/// Whether `a` and `b` are duplicates under the caption/audio + proximity rule.
#[must_use]
pub fn are_duplicates(a: &TrendCandidate, b: &TrendCandidate, window: Duration) -> bool {
    let gap = a
        .post
        .published_at
        .signed_duration_since(b.post.published_at)
        .num_milliseconds()
        .unsigned_abs();
    let window = window.num_milliseconds().unsigned_abs();
    if gap > window {
        return false;
    }

    let caption_a = normalize_caption(&a.post.caption);
    let same_caption = !caption_a.is_empty() && caption_a == normalize_caption(&b.post.caption);

    let same_audio = match (&a.audio_ref, &b.audio_ref) {
        (Some(x), Some(y)) => {
            !is_generic_audio(x) && normalize_audio(x) == normalize_audio(y)
        }
        _ => false,
    };

    same_caption || same_audio
}

/// Collapse duplicates, keeping the highest-ranked member of each cluster.
///
/// Input is re-sorted by [`rank_order`] first. Each candidate joins the first
/// earlier representative it duplicates; otherwise it becomes one. A
/// representative without audio takes the first audio found among its
/// members. Because linking audio can create new matches, passes repeat
/// until nothing merges, so running this on its own output changes nothing.
#[must_use]
pub fn deduplicate(candidates: Vec<TrendCandidate>, window_hours: i64) -> DedupOutcome {
    let window = Duration::try_hours(window_hours).unwrap_or(Duration::MAX);
    let input_len = candidates.len();
    let mut current = candidates;
    current.sort_by(rank_order);

    loop {
        let mut representatives: Vec<TrendCandidate> = Vec::with_capacity(current.len());
        let mut merged = false;

        for candidate in current {
            match representatives
                .iter_mut()
                .find(|rep| are_duplicates(rep, &candidate, window))
            {
                Some(rep) => {
                    tracing::debug!(
                        representative = %rep.post.id,
                        duplicate = %candidate.post.id,
                        "collapsing duplicate"
                    );
                    rep.cluster_size += candidate.cluster_size;
                    if rep.audio_ref.is_none() {
                        rep.audio_ref = candidate.audio_ref;
                    }
                    merged = true;
                }
                None => representatives.push(candidate),
            }
        }

        current = representatives;
        if !merged {
            break;
        }
    }

    DedupOutcome {
        collapsed: input_len - current.len(),
        candidates: current,
    }
}

#[cfg(test)]
#[path = "dedup_test.rs"]
mod tests;
