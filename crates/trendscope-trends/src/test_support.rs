use chrono::{DateTime, Duration, TimeZone, Utc};
use trendscope_core::{MediaType, Post, TrendCandidate};

pub(crate) fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 3, 2, 12, 0, 0).unwrap()
}

/// A video post published `hours_ago` before [`now`].
pub(crate) fn post(id: &str, likes: u64, comments: u64, hours_ago: f64) -> Post {
    #[allow(clippy::cast_possible_truncation)]
    let age = Duration::milliseconds((hours_ago * 3_600_000.0).round() as i64);
    Post {
        id: id.to_string(),
        url: format!("https://www.instagram.com/reel/{id}/"),
        caption: format!("caption for {id}"),
        comments: vec![],
        media_type: MediaType::Video,
        like_count: likes,
        comment_count: comments,
        published_at: now() - age,
        audio_ref: None,
        hashtags: vec![],
        flags: vec![],
    }
}

pub(crate) fn candidate(post: Post) -> TrendCandidate {
    let age_hours = post.age_at(now()).num_milliseconds() as f64 / 3_600_000.0;
    TrendCandidate::new(post, "restaurant", age_hours)
}
