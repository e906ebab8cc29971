//! Field-level parsing for scraped post records.
//!
//! The upstream scraper reads most values off rendered page text, so counts
//! arrive as display strings (`"12,345"`, `"4.5M"`), captions carry page
//! chrome, and identifiers sometimes exist only inside the URL.

use std::sync::LazyLock;

use chrono::{DateTime, TimeZone, Utc};
use regex::Regex;

/// Page-footer markers; everything from the first marker on is dropped.
const FOOTER_MARKERS: &[&str] = &[
    "More posts from",
    "About Blog Jobs Help",
    "Instagram from",
    "Uploading & Non-Users",
    "Privacy Terms",
    "Meta ©",
];

static PLAYBACK_NOISE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)sorry, we're having trouble playing this video\.?")
        .expect("valid playback noise regex")
});

static WHITESPACE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("valid whitespace regex"));

static HASHTAG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"#(\w+)").expect("valid hashtag regex"));

static SHORTCODE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"/(?:p|reel|reels|tv)/([A-Za-z0-9_-]+)").expect("valid shortcode regex")
});

/// Strip playback noise and footer chrome, then collapse whitespace.
#[must_use]
pub fn clean_text(text: &str) -> String {
    let mut text = PLAYBACK_NOISE.replace_all(text, "").into_owned();
    for marker in FOOTER_MARKERS {
        if let Some(pos) = text.find(marker) {
            text.truncate(pos);
        }
    }
    collapse_whitespace(&text)
}

/// Collapse every whitespace run to a single space and trim the ends.
#[must_use]
pub fn collapse_whitespace(text: &str) -> String {
    WHITESPACE.replace_all(text, " ").trim().to_string()
}

/// Lowercase hashtags found in `caption`, without `#`, sorted and unique.
#[must_use]
pub fn extract_hashtags(caption: &str) -> Vec<String> {
    let mut tags: Vec<String> = HASHTAG
        .captures_iter(caption)
        .map(|c| c[1].to_lowercase())
        .collect();
    tags.sort_unstable();
    tags.dedup();
    tags
}

/// Shortcode from a `/p/<code>/` or `/reel/<code>/` URL.
#[must_use]
pub fn shortcode_from_url(url: &str) -> Option<String> {
    SHORTCODE.captures(url).map(|c| c[1].to_string())
}

/// Parse a displayed counter into a signed integer.
///
/// Handles thousands separators (`"12,345"`), suffixes (`"12.3K"`, `"4.5M"`,
/// `"1B"`), a decimal comma before a suffix (`"12,3K"`), and trailing words
/// (`"1,204 likes"`). Returns `None` when no number can be read. Negative
/// values are returned as-is so the caller can decide how to treat them.
#[must_use]
pub fn parse_count(raw: &str) -> Option<i64> {
    let token = raw.split_whitespace().next()?.to_lowercase();

    let (number, multiplier) = match token.chars().last()? {
        'k' => (&token[..token.len() - 1], 1_000_f64),
        'm' => (&token[..token.len() - 1], 1_000_000_f64),
        'b' => (&token[..token.len() - 1], 1_000_000_000_f64),
        _ => (token.as_str(), 1_f64),
    };

    let has_suffix = multiplier > 1.0;
    let number = match number.split_once(',') {
        // "12,3K" uses the comma as a decimal point.
        Some((whole, frac))
            if has_suffix && !number.contains('.') && !frac.contains(',') && frac.len() <= 2 =>
        {
            format!("{whole}.{frac}")
        }
        _ => number.replace(',', ""),
    };

    let value: f64 = number.parse().ok()?;
    if !value.is_finite() {
        return None;
    }

    #[allow(clippy::cast_possible_truncation)]
    let scaled = (value * multiplier).round() as i64;
    Some(scaled)
}

/// Parse a publish timestamp: RFC 3339 (`Z` or offset), a naive
/// `YYYY-MM-DDTHH:MM:SS[.fff]` taken as UTC, or unix seconds.
#[must_use]
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    if let Ok(naive) = chrono::NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f") {
        return Some(naive.and_utc());
    }
    raw.parse::<i64>().ok().and_then(unix_seconds)
}

/// Convert unix seconds to a UTC timestamp, rejecting out-of-range values.
#[must_use]
pub fn unix_seconds(secs: i64) -> Option<DateTime<Utc>> {
    Utc.timestamp_opt(secs, 0).single()
}

#[cfg(test)]
#[path = "parse_test.rs"]
mod tests;
