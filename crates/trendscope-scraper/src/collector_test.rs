use std::collections::HashMap;
use std::time::Duration;

use chrono::TimeZone;
use serde_json::json;

use super::*;

/// Scripted source: per-hashtag delay and response.
#[derive(Default)]
struct ScriptedSource {
    responses: HashMap<String, (Duration, Result<Vec<RawRecord>, u16>)>,
}

impl ScriptedSource {
    fn with(mut self, hashtag: &str, delay_ms: u64, records: Vec<RawRecord>) -> Self {
        self.responses.insert(
            hashtag.to_string(),
            (Duration::from_millis(delay_ms), Ok(records)),
        );
        self
    }

    fn failing(mut self, hashtag: &str, status: u16) -> Self {
        self.responses
            .insert(hashtag.to_string(), (Duration::ZERO, Err(status)));
        self
    }
}

impl PostSource for ScriptedSource {
    async fn fetch_hashtag(
        &self,
        hashtag: &str,
        _limit: u32,
    ) -> Result<Vec<RawRecord>, ScraperError> {
        let Some((delay, response)) = self.responses.get(hashtag) else {
            return Ok(Vec::new());
        };
        tokio::time::sleep(*delay).await;
        match response {
            Ok(records) => Ok(records.clone()),
            Err(status) => Err(ScraperError::UnexpectedStatus {
                status: *status,
                url: format!("http://scraper.test/hashtags/{hashtag}/posts"),
            }),
        }
    }
}

fn collected_at() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 3, 2, 12, 0, 0).unwrap()
}

fn record(id: &str, likes: i64) -> RawRecord {
    json!({
        "id": id,
        "url": format!("https://www.instagram.com/reel/{id}/"),
        "timestamp": "2026-03-02T06:00:00Z",
        "likeCount": likes,
        "commentCount": 3
    })
}

fn config(hashtags: &[&str]) -> TrendConfig {
    let mut cfg = TrendConfig::new("restaurant", hashtags);
    cfg.query_timeout = Duration::from_millis(200);
    cfg
}

#[tokio::test]
async fn merges_and_dedups_by_id() {
    let source = ScriptedSource::default()
        .with("foodie", 0, vec![record("b", 10), record("a", 20)])
        .with("streetfood", 0, vec![record("a", 20), record("c", 5)]);
    let outcome = collect_candidates(&source, &config(&["foodie", "streetfood"]), collected_at())
        .await;

    let ids: Vec<&str> = outcome.posts.iter().map(|p| p.id.as_str()).collect();
    assert_eq!(ids, vec!["a", "b", "c"]);
    assert_eq!(outcome.category, "restaurant");
    assert_eq!(outcome.stats.queries_issued, 2);
    assert_eq!(outcome.stats.records_seen, 4);
    assert_eq!(outcome.stats.duplicate_ids, 1);
}

#[tokio::test]
async fn earlier_hashtag_wins_regardless_of_completion_order() {
    // "foodie" is listed first but answers last.
    let source = ScriptedSource::default()
        .with("foodie", 60, vec![record("a", 111)])
        .with("streetfood", 0, vec![record("a", 999)]);
    let outcome = collect_candidates(&source, &config(&["foodie", "streetfood"]), collected_at())
        .await;

    assert_eq!(outcome.posts.len(), 1);
    assert_eq!(outcome.posts[0].like_count, 111);
}

#[tokio::test]
async fn timed_out_query_contributes_nothing() {
    let source = ScriptedSource::default()
        .with("foodie", 0, vec![record("a", 1)])
        .with("slowtag", 5_000, vec![record("z", 1)]);
    let outcome =
        collect_candidates(&source, &config(&["foodie", "slowtag"]), collected_at()).await;

    let ids: Vec<&str> = outcome.posts.iter().map(|p| p.id.as_str()).collect();
    assert_eq!(ids, vec!["a"]);
    assert_eq!(outcome.stats.queries_timed_out, vec!["slowtag"]);
    assert!(outcome.stats.queries_failed.is_empty());
}

#[tokio::test]
async fn failed_query_is_counted_separately() {
    let source = ScriptedSource::default()
        .with("foodie", 0, vec![record("a", 1)])
        .failing("broken", 500);
    let outcome = collect_candidates(&source, &config(&["foodie", "broken"]), collected_at()).await;

    assert_eq!(outcome.posts.len(), 1);
    assert_eq!(outcome.stats.queries_failed, vec!["broken"]);
    assert!(outcome.stats.queries_timed_out.is_empty());
}

#[tokio::test]
async fn malformed_records_are_dropped_and_counted() {
    let source = ScriptedSource::default().with(
        "foodie",
        0,
        vec![
            record("a", 1),
            json!({"id": "no-timestamp", "url": "https://www.instagram.com/p/x/"}),
            json!("not an object"),
        ],
    );
    let outcome = collect_candidates(&source, &config(&["foodie"]), collected_at()).await;

    assert_eq!(outcome.posts.len(), 1);
    assert_eq!(outcome.stats.malformed_records, 2);
    assert_eq!(outcome.stats.records_seen, 3);
}

#[tokio::test]
async fn flagged_records_are_kept_and_counted() {
    let mut negative = record("neg", 1);
    negative["likeCount"] = json!(-3);
    let source = ScriptedSource::default().with("foodie", 0, vec![negative]);
    let outcome = collect_candidates(&source, &config(&["foodie"]), collected_at()).await;

    assert_eq!(outcome.posts.len(), 1);
    assert_eq!(outcome.posts[0].like_count, 0);
    assert_eq!(outcome.stats.flagged_records, 1);
}

#[tokio::test]
async fn max_candidates_caps_sorted_output() {
    let source = ScriptedSource::default().with(
        "foodie",
        0,
        vec![record("d", 1), record("a", 1), record("c", 1), record("b", 1)],
    );
    let mut cfg = config(&["foodie"]);
    cfg.max_candidates = 2;
    let outcome = collect_candidates(&source, &cfg, collected_at()).await;

    let ids: Vec<&str> = outcome.posts.iter().map(|p| p.id.as_str()).collect();
    assert_eq!(ids, vec!["a", "b"]);
    assert_eq!(outcome.stats.capped_candidates, 2);
}

#[tokio::test]
async fn cap_keeps_newest_posts_over_low_ids() {
    let stale = |id: &str| {
        json!({
            "id": id,
            "url": format!("https://www.instagram.com/reel/{id}/"),
            "timestamp": "2026-02-09T20:00:00Z",
            "likeCount": 1,
            "commentCount": 0
        })
    };
    let source = ScriptedSource::default().with(
        "foodie",
        0,
        vec![stale("a0"), stale("a1"), stale("a2"), record("z_fresh", 1000)],
    );
    let mut cfg = config(&["foodie"]);
    cfg.max_candidates = 3;
    let outcome = collect_candidates(&source, &cfg, collected_at()).await;

    let ids: Vec<&str> = outcome.posts.iter().map(|p| p.id.as_str()).collect();
    assert_eq!(ids, vec!["a0", "a1", "z_fresh"]);
    assert_eq!(outcome.stats.capped_candidates, 1);
}

#[tokio::test]
async fn under_cap_nothing_is_counted() {
    let source = ScriptedSource::default().with("foodie", 0, vec![record("a", 1)]);
    let outcome = collect_candidates(&source, &config(&["foodie"]), collected_at()).await;
    assert_eq!(outcome.stats.capped_candidates, 0);
}
